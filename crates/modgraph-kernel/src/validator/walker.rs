//! Registry walker that checks each import against its target.

use modgraph_types::{ImportRef, ModuleDescriptor, ModuleRegistry, ValidationError};
use tracing::debug;

/// Checks imports against a fixed registry.
pub struct ImportValidator<'a> {
    registry: &'a ModuleRegistry,
}

impl<'a> ImportValidator<'a> {
    pub fn new(registry: &'a ModuleRegistry) -> Self {
        Self { registry }
    }

    /// Every unresolved import in the registry.
    pub fn check(&self) -> Vec<ValidationError> {
        self.registry
            .iter()
            .flat_map(|module| self.check_module(module))
            .collect()
    }

    /// Unresolved imports of one module, in declaration order.
    pub fn check_module(&self, module: &ModuleDescriptor) -> Vec<ValidationError> {
        let errors: Vec<_> = module
            .imports
            .iter()
            .filter_map(|import| self.check_import(module, import))
            .collect();

        debug!(module = %module.name, errors = errors.len(), "checked imports");
        errors
    }

    /// At most one error per import: a missing module is never also
    /// reported as a missing export.
    fn check_import(&self, module: &ModuleDescriptor, import: &ImportRef) -> Option<ValidationError> {
        let Some(target) = self.registry.get(&import.from) else {
            return Some(ValidationError::UnresolvedModule {
                module: module.name.clone(),
                file_path: module.file_path.clone(),
                from: import.from.clone(),
            });
        };

        if import.is_namespace() || target.exports_name(&import.name) {
            return None;
        }

        Some(ValidationError::UnresolvedExport {
            module: module.name.clone(),
            file_path: module.file_path.clone(),
            export: import.name.clone(),
            from: import.from.clone(),
        })
    }
}
