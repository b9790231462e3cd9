//! Canonical module names.
//!
//! A module's name is its path relative to the project root, extension
//! stripped, `/`-separated. Naming is pluggable through [`NameResolver`];
//! the extractor canonicalizes separators in whatever a resolver returns.
//!
//! All path arithmetic here is lexical. Nothing touches the filesystem.

use std::path::{Component, Path, PathBuf};

/// What a resolver knows besides the path being named.
#[derive(Debug, Clone, Copy)]
pub struct NameContext<'a> {
    /// Project root names are relative to.
    pub cwd: &'a Path,
    /// Source extension stripped from the final segment (e.g. `.js`).
    pub extension: &'a str,
}

/// Strategy turning an absolute file location into a module name.
///
/// Implemented by [`DefaultNameResolver`], [`Namespaced`], and any
/// `Fn(&Path, &NameContext) -> String` closure.
pub trait NameResolver: Send + Sync {
    fn module_name(&self, file_path: &Path, ctx: &NameContext<'_>) -> String;
}

impl<F> NameResolver for F
where
    F: Fn(&Path, &NameContext<'_>) -> String + Send + Sync,
{
    fn module_name(&self, file_path: &Path, ctx: &NameContext<'_>) -> String {
        self(file_path, ctx)
    }
}

/// Relative path from `cwd`, extension stripped.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNameResolver;

impl NameResolver for DefaultNameResolver {
    fn module_name(&self, file_path: &Path, ctx: &NameContext<'_>) -> String {
        resolve_module_name(file_path, ctx.cwd, ctx.extension)
    }
}

/// Prefixes every name produced by `inner`, e.g. `appkit/` + `foo`.
#[derive(Debug, Clone)]
pub struct Namespaced<R> {
    prefix: String,
    inner: R,
}

impl<R: NameResolver> Namespaced<R> {
    pub fn new(prefix: impl Into<String>, inner: R) -> Self {
        Self {
            prefix: prefix.into(),
            inner,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl<R: NameResolver> NameResolver for Namespaced<R> {
    fn module_name(&self, file_path: &Path, ctx: &NameContext<'_>) -> String {
        format!("{}{}", self.prefix, self.inner.module_name(file_path, ctx))
    }
}

/// Canonical name of `file_path` relative to `cwd`.
///
/// Relative `file_path`s are taken relative to `cwd`. The extension is
/// removed only when the last segment ends with it and is longer than it.
pub fn resolve_module_name(file_path: &Path, cwd: &Path, extension: &str) -> String {
    let cwd = normalize_lexically(cwd);
    let file_path = normalize_lexically(&cwd.join(file_path));

    let mut segments: Vec<String> = relative_to(&file_path, &cwd)
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    if let Some(last) = segments.last_mut() {
        if !extension.is_empty() && last.len() > extension.len() && last.ends_with(extension) {
            last.truncate(last.len() - extension.len());
        }
    }

    canonical_separators(&segments.join("/"))
}

/// Resolve an import's `from` value to a module name.
///
/// Values starting with `.` are paths relative to the importing file and go
/// through `resolver`; anything else is an opaque module name returned as is.
pub fn resolve_import_source(
    from: &str,
    file_path: &Path,
    ctx: &NameContext<'_>,
    resolver: &dyn NameResolver,
) -> String {
    if !from.starts_with('.') {
        return from.to_string();
    }

    let importer = ctx.cwd.join(file_path);
    let dir = importer.parent().unwrap_or(ctx.cwd);
    let target = normalize_lexically(&dir.join(from));
    canonical_separators(&resolver.module_name(&target, ctx))
}

/// Replace `\` with `/`.
pub fn canonical_separators(name: &str) -> String {
    name.replace('\\', "/")
}

/// Fold `.` and `..` without consulting the filesystem.
///
/// `..` at the root is dropped; leading `..` of a relative path is kept.
pub(crate) fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out.into_iter().collect()
}

/// Path from `base` to `path`, both already normalized.
fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let path: Vec<Component<'_>> = path.components().collect();
    let base: Vec<Component<'_>> = base.components().collect();

    let shared = path
        .iter()
        .zip(base.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in shared..base.len() {
        relative.push("..");
    }
    for component in &path[shared..] {
        relative.push(component.as_os_str());
    }
    relative
}
