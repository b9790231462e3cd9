//! modgraph-types: pure data types shared by the modgraph kernel and CLI.
//!
//! This crate has no I/O and no parsing. It defines:
//!
//! - **Descriptors**: one [`ModuleDescriptor`] per analysed (or whitelisted) module
//! - **Registry**: the insertion-ordered name → descriptor map validated as a graph
//! - **Whitelist**: external modules with declared export lists
//! - **Validation errors**: the recoverable, collected error kinds

mod descriptor;
mod error;
mod registry;
mod whitelist;

pub use descriptor::{ExportRef, ImportRef, ModuleDescriptor, DEFAULT_EXPORT, NAMESPACE_IMPORT};
pub use error::ValidationError;
pub use registry::ModuleRegistry;
pub use whitelist::Whitelist;
