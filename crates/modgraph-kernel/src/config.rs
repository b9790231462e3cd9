//! Check configuration.
//!
//! Every entry point takes a [`CheckConfig`]. Nothing is read from ambient
//! process state except through [`CheckConfig::from_current_dir`].

use crate::naming::{DefaultNameResolver, NameContext, NameResolver};
use modgraph_types::Whitelist;
use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default source extension.
pub const DEFAULT_EXTENSION: &str = ".js";

/// Options for analysis and validation.
#[derive(Clone)]
pub struct CheckConfig {
    /// Project root. Module names are relative to it, and relative input
    /// paths are read from it.
    pub cwd: PathBuf,
    /// Source extension stripped from module names.
    pub extension: String,
    /// External modules treated as always present.
    pub whitelist: Whitelist,
    /// Naming strategy.
    pub resolver: Arc<dyn NameResolver>,
    /// Maximum number of files analyzed at once.
    pub concurrency: usize,
}

impl std::fmt::Debug for CheckConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckConfig")
            .field("cwd", &self.cwd)
            .field("extension", &self.extension)
            .field("whitelist", &self.whitelist)
            .field("resolver", &"<dyn NameResolver>")
            .field("concurrency", &self.concurrency)
            .finish()
    }
}

impl CheckConfig {
    /// Config rooted at `cwd` with every other option at its default.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            whitelist: Whitelist::default(),
            resolver: Arc::new(DefaultNameResolver),
            concurrency: default_concurrency(),
        }
    }

    /// Config rooted at the process working directory.
    pub fn from_current_dir() -> io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_whitelist(mut self, whitelist: Whitelist) -> Self {
        self.whitelist = whitelist;
        self
    }

    pub fn with_resolver(mut self, resolver: impl NameResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Zero is treated as one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// The naming context handed to resolvers.
    pub fn name_context(&self) -> NameContext<'_> {
        NameContext {
            cwd: &self.cwd,
            extension: &self.extension,
        }
    }

    /// `path` as an absolute location under `cwd`.
    pub fn absolute(&self, path: &Path) -> PathBuf {
        crate::naming::normalize_lexically(&self.cwd.join(path))
    }
}

fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}
