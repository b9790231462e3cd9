//! Module descriptor extraction.
//!
//! An [`Extractor`] turns one source file into a [`ModuleDescriptor`]:
//! parse, then walk the top-level items in order. Relative import sources
//! are resolved to module names before the descriptor is returned.

use crate::ast::{ExportDecl, ImportDecl, ImportSpecifier, Item};
use crate::config::CheckConfig;
use crate::error::AnalyzeError;
use crate::naming::{canonical_separators, resolve_import_source};
use crate::parser::parse;
use crate::vfs::Filesystem;
use modgraph_types::{ExportRef, ImportRef, ModuleDescriptor, DEFAULT_EXPORT, NAMESPACE_IMPORT};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extracts descriptors using a fixed configuration.
#[derive(Debug, Clone)]
pub struct Extractor {
    config: CheckConfig,
}

impl Extractor {
    pub fn new(config: CheckConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Canonical module name for a file.
    pub fn module_name(&self, file_path: &Path) -> String {
        let absolute = self.config.absolute(file_path);
        let name = self
            .config
            .resolver
            .module_name(&absolute, &self.config.name_context());
        canonical_separators(&name)
    }

    /// Module name an import in `file_path` refers to.
    pub fn import_source(&self, from: &str, file_path: &Path) -> String {
        resolve_import_source(
            from,
            &self.config.absolute(file_path),
            &self.config.name_context(),
            self.config.resolver.as_ref(),
        )
    }

    /// Build the descriptor for `source`.
    ///
    /// Parse failure is fatal: no partial descriptor is returned.
    pub fn analyze(
        &self,
        source: &str,
        name: impl Into<String>,
        file_path: impl Into<PathBuf>,
    ) -> Result<ModuleDescriptor, AnalyzeError> {
        let file_path = file_path.into();
        let module = parse(source).map_err(|errors| AnalyzeError::Parse {
            path: file_path.clone(),
            errors,
        })?;

        let mut descriptor = ModuleDescriptor::new(name, file_path);
        for item in &module.items {
            match item {
                Item::Import(decl) => {
                    let imports = self.import_refs(decl, &descriptor.file_path);
                    descriptor.imports.extend(imports);
                }
                Item::Export(decl) => {
                    descriptor.exports.extend(export_refs(decl, &descriptor.name));
                }
                Item::Other => {}
            }
        }

        debug!(
            module = %descriptor.name,
            imports = descriptor.imports.len(),
            exports = descriptor.exports.len(),
            "analyzed module"
        );
        Ok(descriptor)
    }

    /// Read `path` from `fs` and analyze it under its resolved name.
    ///
    /// Relative paths are read from the configured `cwd`. The descriptor
    /// keeps `path` as given for error reporting.
    pub async fn analyze_file(
        &self,
        fs: &dyn Filesystem,
        path: &Path,
    ) -> Result<ModuleDescriptor, AnalyzeError> {
        let absolute = self.config.absolute(path);
        let source = fs
            .read_to_string(&absolute)
            .await
            .map_err(|source| AnalyzeError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let name = self.module_name(&absolute);
        debug!(path = %path.display(), module = %name, "read source");
        self.analyze(&source, name, path)
    }

    fn import_refs(&self, decl: &ImportDecl, file_path: &Path) -> Vec<ImportRef> {
        let from = self.import_source(&decl.source, file_path);

        // `import "m"` still requires the module's default export.
        if decl.specifiers.is_empty() {
            return vec![ImportRef::new(DEFAULT_EXPORT, from)];
        }

        decl.specifiers
            .iter()
            .map(|specifier| {
                let name = match specifier {
                    ImportSpecifier::Default { .. } => DEFAULT_EXPORT,
                    ImportSpecifier::Namespace { .. } => NAMESPACE_IMPORT,
                    ImportSpecifier::Named { imported, .. } => imported.as_str(),
                };
                ImportRef::new(name, from.as_str())
            })
            .collect()
    }
}

fn export_refs(decl: &ExportDecl, module: &str) -> Vec<ExportRef> {
    match decl {
        ExportDecl::Named { specifiers, .. } => specifiers
            .iter()
            .map(|s| ExportRef::new(s.exported.as_str()))
            .collect(),
        ExportDecl::Declared(names) => names.iter().map(|n| ExportRef::new(n.as_str())).collect(),
        ExportDecl::Default => vec![ExportRef::new(DEFAULT_EXPORT)],
        ExportDecl::All { source } => {
            debug!(module, source = %source, "export * contributes no names");
            Vec::new()
        }
    }
}
