//! Import validation over a module registry.
//!
//! The validator runs after every file has been analyzed. It checks:
//!
//! - **Module existence**: Is each import target analyzed or whitelisted?
//! - **Export existence**: Does the target export the requested name?
//!
//! Problems are collected across the whole registry and returned together,
//! in registry order and then import declaration order.
//!
//! # Example
//!
//! ```
//! use modgraph_kernel::validator::validate;
//! use modgraph_types::{ImportRef, ModuleDescriptor, ModuleRegistry, Whitelist};
//!
//! let mut bar = ModuleDescriptor::new("bar", "bar.js");
//! bar.imports.push(ImportRef::new("default", "resolver"));
//!
//! let registry: ModuleRegistry = [bar].into_iter().collect();
//! let whitelist: Whitelist = [("resolver", vec!["default"])].into_iter().collect();
//!
//! let registry = validate(registry, &whitelist).expect("all imports resolve");
//! assert!(registry.contains("resolver"));
//! ```

mod walker;

pub use walker::ImportValidator;

use modgraph_types::{ModuleRegistry, ValidationError, Whitelist};
use tracing::warn;

/// Add `whitelist` to `registry`, then check every import.
///
/// Returns the augmented registry when everything resolves, otherwise
/// every error found. Never both.
pub fn validate(
    mut registry: ModuleRegistry,
    whitelist: &Whitelist,
) -> Result<ModuleRegistry, Vec<ValidationError>> {
    registry.augment(whitelist);

    let errors = ImportValidator::new(&registry).check();
    if errors.is_empty() {
        Ok(registry)
    } else {
        warn!(count = errors.len(), "unresolved imports");
        Err(errors)
    }
}
