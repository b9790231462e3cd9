//! File access for analysis.
//!
//! The analyzer reads sources through [`Filesystem`] so batches can run
//! against a real project tree or an in-memory one:
//!
//! - **LocalFs**: Real filesystem access rooted at a directory
//! - **MemoryFs**: In-memory storage (for tests and embedding)

mod local;
mod memory;
mod traits;

pub use local::LocalFs;
pub use memory::MemoryFs;
pub use traits::Filesystem;
