//! Batch analysis and the top-level entry points.
//!
//! Each file is read, parsed and extracted in its own task. Results are
//! merged into the registry in input order once every task has finished, so
//! registry order (and therefore error order) never depends on scheduling.

use crate::config::CheckConfig;
use crate::error::{AnalyzeError, CheckError};
use crate::extract::Extractor;
use crate::validator::validate;
use crate::vfs::{Filesystem, LocalFs};
use modgraph_types::{ModuleDescriptor, ModuleRegistry};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Analyzes files from a [`Filesystem`] with a shared [`Extractor`].
#[derive(Clone)]
pub struct Analyzer {
    extractor: Arc<Extractor>,
    fs: Arc<dyn Filesystem>,
}

impl Analyzer {
    /// Analyzer reading the local filesystem under `config.cwd`.
    pub fn new(config: CheckConfig) -> Self {
        let fs = Arc::new(LocalFs::new(config.cwd.clone()));
        Self::with_filesystem(config, fs)
    }

    /// Analyzer reading from any filesystem backend.
    pub fn with_filesystem(config: CheckConfig, fs: Arc<dyn Filesystem>) -> Self {
        Self {
            extractor: Arc::new(Extractor::new(config)),
            fs,
        }
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    pub fn config(&self) -> &CheckConfig {
        self.extractor.config()
    }

    pub async fn analyze_file(&self, path: &Path) -> Result<ModuleDescriptor, AnalyzeError> {
        self.extractor.analyze_file(self.fs.as_ref(), path).await
    }

    /// Analyze every path and merge the descriptors by name.
    ///
    /// At most `config.concurrency` files are in flight. The first failure
    /// to be observed cancels the remaining tasks and is returned; there is
    /// no partial registry.
    pub async fn analyze_files<P: AsRef<Path>>(
        &self,
        paths: &[P],
    ) -> Result<ModuleRegistry, CheckError> {
        let semaphore = Arc::new(Semaphore::new(self.config().concurrency.max(1)));
        let mut tasks = JoinSet::new();

        for (index, path) in paths.iter().enumerate() {
            let path: PathBuf = path.as_ref().to_path_buf();
            let extractor = Arc::clone(&self.extractor);
            let fs = Arc::clone(&self.fs);
            let semaphore = Arc::clone(&semaphore);

            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| CheckError::Task(e.to_string()))?;
                let descriptor = extractor.analyze_file(fs.as_ref(), &path).await?;
                Ok::<_, CheckError>((index, descriptor))
            });
        }

        let mut slots: Vec<Option<ModuleDescriptor>> = vec![None; paths.len()];
        while let Some(joined) = tasks.join_next().await {
            let outcome = joined.unwrap_or_else(|e| Err(CheckError::Task(e.to_string())));
            match outcome {
                Ok((index, descriptor)) => {
                    if let Some(slot) = slots.get_mut(index) {
                        *slot = Some(descriptor);
                    }
                }
                Err(err) => {
                    tasks.abort_all();
                    warn!(error = %err, "analysis failed");
                    return Err(err);
                }
            }
        }

        let registry: ModuleRegistry = slots.into_iter().flatten().collect();
        info!(files = paths.len(), modules = registry.len(), "analyzed files");
        Ok(registry)
    }

    /// Analyze every path, then validate the registry against the
    /// configured whitelist.
    pub async fn validate_imports<P: AsRef<Path>>(
        &self,
        paths: &[P],
    ) -> Result<ModuleRegistry, CheckError> {
        let registry = self.analyze_files(paths).await?;
        validate(registry, &self.config().whitelist).map_err(CheckError::Unresolved)
    }
}

/// Build the descriptor for in-memory source.
pub fn analyze_source(
    source: &str,
    name: impl Into<String>,
    file_path: impl Into<PathBuf>,
    config: &CheckConfig,
) -> Result<ModuleDescriptor, AnalyzeError> {
    Extractor::new(config.clone()).analyze(source, name, file_path)
}

/// Analyze one file from the local filesystem.
pub async fn analyze_file(
    path: impl AsRef<Path>,
    config: &CheckConfig,
) -> Result<ModuleDescriptor, AnalyzeError> {
    Analyzer::new(config.clone()).analyze_file(path.as_ref()).await
}

/// Analyze files from the local filesystem into one registry.
pub async fn analyze_files<P: AsRef<Path>>(
    paths: &[P],
    config: &CheckConfig,
) -> Result<ModuleRegistry, CheckError> {
    Analyzer::new(config.clone()).analyze_files(paths).await
}

/// Analyze and validate files from the local filesystem.
pub async fn validate_imports<P: AsRef<Path>>(
    paths: &[P],
    config: &CheckConfig,
) -> Result<ModuleRegistry, CheckError> {
    Analyzer::new(config.clone()).validate_imports(paths).await
}
