//! In-memory filesystem implementation.
//!
//! Used for testing and for checking sources that never touch disk.

use super::traits::Filesystem;
use async_trait::async_trait;
use std::collections::HashMap;
use std::io;
use std::path::{Component, Path, PathBuf};
use tokio::sync::RwLock;

/// In-memory filesystem.
///
/// Thread-safe via internal `RwLock`. All data is lost when dropped.
/// Absolute and relative spellings of a path name the same file.
#[derive(Debug, Default)]
pub struct MemoryFs {
    files: RwLock<HashMap<PathBuf, Vec<u8>>>,
}

impl MemoryFs {
    /// Create a new empty in-memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize a path: remove leading `/`, resolve `.` and `..`.
    fn normalize(path: &Path) -> PathBuf {
        let mut result = PathBuf::new();
        for component in path.components() {
            match component {
                Component::RootDir | Component::CurDir | Component::Prefix(_) => {}
                Component::ParentDir => {
                    result.pop();
                }
                Component::Normal(s) => {
                    result.push(s);
                }
            }
        }
        result
    }

    /// Store a file, replacing any previous contents.
    pub async fn insert(
        &self,
        path: impl AsRef<Path>,
        data: impl Into<Vec<u8>>,
    ) -> io::Result<()> {
        let path = path.as_ref();
        let normalized = Self::normalize(path);
        if normalized.as_os_str().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a file path: {}", path.display()),
            ));
        }
        self.files.write().await.insert(normalized, data.into());
        Ok(())
    }
}

#[async_trait]
impl Filesystem for MemoryFs {
    async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        let files = self.files.read().await;
        files.get(&Self::normalize(path)).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("not found: {}", path.display()),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_and_read() {
        let fs = MemoryFs::new();
        fs.insert("proj/foo.js", b"export default 1;")
            .await
            .expect("insert");

        assert_eq!(
            fs.read(Path::new("/proj/./foo.js")).await.expect("read"),
            b"export default 1;"
        );
    }

    #[tokio::test]
    async fn insert_replaces() {
        let fs = MemoryFs::new();
        fs.insert("a.js", b"one").await.expect("insert");
        fs.insert("a.js", b"two").await.expect("insert");
        assert_eq!(fs.read(Path::new("a.js")).await.expect("read"), b"two");
    }

    #[tokio::test]
    async fn missing_is_not_found() {
        let fs = MemoryFs::new();
        let err = fs.read(Path::new("nope.js")).await.expect_err("missing");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn root_is_not_a_file() {
        let fs = MemoryFs::new();
        let err = fs.insert("/", b"x").await.expect_err("root");
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
