//! modgraph-kernel: the core of modgraph.
//!
//! This crate provides:
//!
//! - **Lexer**: Tokenizes ES module source using logos
//! - **Parser**: Builds a module outline from tokens using chumsky
//! - **Extractor**: Turns an outline into a [`ModuleDescriptor`]
//! - **Naming**: Pluggable canonical module names
//! - **Analyzer**: Concurrent batch analysis over a [`vfs::Filesystem`]
//! - **Validator**: Checks every import against the registry and whitelist
//!
//! # Example
//!
//! ```no_run
//! use modgraph_kernel::{validate_imports, CheckConfig, CheckError};
//!
//! # async fn run() -> Result<(), CheckError> {
//! let config = CheckConfig::new("/path/to/project");
//! match validate_imports(&["src/app.js", "src/util.js"], &config).await {
//!     Ok(registry) => println!("{} modules ok", registry.len()),
//!     Err(CheckError::Unresolved(errors)) => {
//!         for error in errors {
//!             println!("{}: {}", error.file_path().display(), error);
//!         }
//!     }
//!     Err(other) => return Err(other),
//! }
//! # Ok(())
//! # }
//! ```

pub mod analyze;
pub mod ast;
pub mod config;
pub mod error;
pub mod extract;
pub mod lexer;
pub mod naming;
pub mod parser;
pub mod validator;
pub mod vfs;

pub use analyze::{analyze_file, analyze_files, analyze_source, validate_imports, Analyzer};
pub use config::{CheckConfig, DEFAULT_EXTENSION};
pub use error::{AnalyzeError, CheckError};
pub use extract::Extractor;
pub use naming::{DefaultNameResolver, NameContext, NameResolver, Namespaced};
pub use validator::validate;

pub use modgraph_types::{
    ExportRef, ImportRef, ModuleDescriptor, ModuleRegistry, ValidationError, Whitelist,
    DEFAULT_EXPORT, NAMESPACE_IMPORT,
};
