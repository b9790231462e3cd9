//! Local filesystem backend.
//!
//! Reads source files from a real project tree.

use super::traits::Filesystem;
use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Local filesystem backend.
///
/// Relative paths are resolved against `root`, so with `root` at
/// `/home/amy/project`, `read("src/main.js")` reads
/// `/home/amy/project/src/main.js`. Absolute paths are used as given;
/// projects routinely import from outside their own root.
#[derive(Debug, Clone)]
pub struct LocalFs {
    root: PathBuf,
}

impl LocalFs {
    /// Create a new local filesystem rooted at the given path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the root path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

#[async_trait]
impl Filesystem for LocalFs {
    async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(self.resolve(path)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn reads_relative_to_root() {
        let dir = TempDir::new().expect("tempdir");
        std::fs::create_dir_all(dir.path().join("lib")).expect("mkdir");
        std::fs::write(dir.path().join("lib/foo.js"), "export default 1;").expect("seed");

        let fs = LocalFs::new(dir.path());
        assert_eq!(fs.root(), dir.path());
        assert_eq!(
            fs.read_to_string(Path::new("lib/foo.js")).await.expect("read"),
            "export default 1;"
        );
    }

    #[tokio::test]
    async fn absolute_paths_bypass_root() {
        let dir = TempDir::new().expect("tempdir");
        let other = TempDir::new().expect("tempdir");
        std::fs::write(other.path().join("x.js"), "x").expect("seed");

        let fs = LocalFs::new(dir.path());
        let data = fs.read(&other.path().join("x.js")).await.expect("read");
        assert_eq!(data, b"x");
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = TempDir::new().expect("tempdir");
        let fs = LocalFs::new(dir.path());
        let err = fs.read(Path::new("nope.js")).await.expect_err("missing");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn invalid_utf8_is_invalid_data() {
        let dir = TempDir::new().expect("tempdir");
        std::fs::write(dir.path().join("bin.js"), [0xff, 0xfe]).expect("seed");
        let fs = LocalFs::new(dir.path());
        let err = fs
            .read_to_string(Path::new("bin.js"))
            .await
            .expect_err("not utf-8");
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
