//! Module descriptors: the normalized record of one module's boundary.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Sentinel name for a default import or default export.
pub const DEFAULT_EXPORT: &str = "default";

/// Sentinel name for a namespace import (`import * as ns from "m"`).
///
/// A namespace import only requires the target module to exist.
pub const NAMESPACE_IMPORT: &str = "*";

/// One imported symbol and the module it is requested from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImportRef {
    /// Name requested from the target module (`"default"` for default imports).
    pub name: String,
    /// Canonical module name of the target, or a bare identifier as written.
    pub from: String,
}

impl ImportRef {
    pub fn new(name: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            from: from.into(),
        }
    }

    /// True for `import * as ns` style references.
    pub fn is_namespace(&self) -> bool {
        self.name == NAMESPACE_IMPORT
    }
}

/// One symbol a module makes available.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExportRef {
    pub name: String,
}

impl ExportRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The identity, imports and exports of one module.
///
/// Created once per analysed file or whitelist entry and not mutated after.
/// `imports` and `exports` keep source declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    /// Canonical module name; the registry key.
    pub name: String,
    /// Originating file, used for error reporting only.
    pub file_path: PathBuf,
    pub imports: Vec<ImportRef>,
    pub exports: Vec<ExportRef>,
}

impl ModuleDescriptor {
    /// An empty descriptor for `name` located at `file_path`.
    pub fn new(name: impl Into<String>, file_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            file_path: file_path.into(),
            imports: Vec::new(),
            exports: Vec::new(),
        }
    }

    /// A descriptor for a module outside the analysed set.
    ///
    /// The file path is the module name itself and there are no imports.
    pub fn external<I, S>(name: impl Into<String>, export_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        Self {
            file_path: PathBuf::from(&name),
            exports: export_names.into_iter().map(ExportRef::new).collect(),
            imports: Vec::new(),
            name,
        }
    }

    /// Whether `name` appears in this module's export list.
    ///
    /// Duplicate exports are allowed; this is plain membership.
    pub fn exports_name(&self, name: &str) -> bool {
        self.exports.iter().any(|e| e.name == name)
    }

    /// Export names in declaration order.
    pub fn export_names(&self) -> impl Iterator<Item = &str> {
        self.exports.iter().map(|e| e.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_uses_name_as_path() {
        let desc = ModuleDescriptor::external("resolver", ["default"]);
        assert_eq!(desc.file_path, PathBuf::from("resolver"));
        assert!(desc.imports.is_empty());
        assert!(desc.exports_name("default"));
        assert!(!desc.exports_name("other"));
    }

    #[test]
    fn duplicate_exports_are_kept() {
        let mut desc = ModuleDescriptor::new("dup", "dup.js");
        desc.exports.push(ExportRef::new("a"));
        desc.exports.push(ExportRef::new("a"));
        assert_eq!(desc.export_names().collect::<Vec<_>>(), vec!["a", "a"]);
        assert!(desc.exports_name("a"));
    }

    #[test]
    fn namespace_sentinel() {
        assert!(ImportRef::new("*", "m").is_namespace());
        assert!(!ImportRef::new("default", "m").is_namespace());
    }
}
