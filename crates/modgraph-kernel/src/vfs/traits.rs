//! Core VFS trait.

use async_trait::async_trait;
use std::io;
use std::path::Path;

/// Abstract filesystem interface.
///
/// Paths are relative to the filesystem root; absolute paths are accepted
/// and interpreted by each backend.
#[async_trait]
pub trait Filesystem: Send + Sync {
    /// Read the entire contents of a file.
    async fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Read a file as UTF-8 text.
    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let bytes = self.read(path).await?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}
