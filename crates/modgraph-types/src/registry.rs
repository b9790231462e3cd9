//! The module registry: name → descriptor, in insertion order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::descriptor::ModuleDescriptor;
use crate::whitelist::Whitelist;

/// All modules known to a validation run, keyed by canonical name.
///
/// Iteration follows insertion order, which fixes the order of validation
/// errors. Inserting an existing name replaces the descriptor in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleRegistry {
    modules: IndexMap<String, ModuleDescriptor>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a descriptor under its own name, returning the one it replaced.
    pub fn insert(&mut self, descriptor: ModuleDescriptor) -> Option<ModuleDescriptor> {
        self.modules.insert(descriptor.name.clone(), descriptor)
    }

    /// Add one external descriptor per whitelist entry, overwriting analysed
    /// modules of the same name.
    pub fn augment(&mut self, whitelist: &Whitelist) {
        for (name, exports) in whitelist.iter() {
            self.insert(ModuleDescriptor::external(name, exports.iter().cloned()));
        }
    }

    pub fn get(&self, name: &str) -> Option<&ModuleDescriptor> {
        self.modules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModuleDescriptor> {
        self.modules.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl FromIterator<ModuleDescriptor> for ModuleRegistry {
    fn from_iter<T: IntoIterator<Item = ModuleDescriptor>>(iter: T) -> Self {
        let mut registry = Self::new();
        for descriptor in iter {
            registry.insert(descriptor);
        }
        registry
    }
}

impl IntoIterator for ModuleRegistry {
    type Item = ModuleDescriptor;
    type IntoIter = indexmap::map::IntoValues<String, ModuleDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.modules.into_values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_order_is_kept() {
        let registry: ModuleRegistry = ["c", "a", "b"]
            .into_iter()
            .map(|n| ModuleDescriptor::new(n, format!("{n}.js")))
            .collect();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["c", "a", "b"]);
    }

    #[test]
    fn last_write_wins() {
        let mut registry = ModuleRegistry::new();
        registry.insert(ModuleDescriptor::new("a", "first.js"));
        let replaced = registry.insert(ModuleDescriptor::new("a", "second.js"));

        assert_eq!(replaced.map(|d| d.file_path), Some("first.js".into()));
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get("a").map(|d| d.file_path.clone()),
            Some("second.js".into())
        );
    }

    #[test]
    fn augment_overwrites_analysed_module() {
        let mut registry = ModuleRegistry::new();
        registry.insert(ModuleDescriptor::new("ext", "ext.js"));

        let mut whitelist = Whitelist::new();
        whitelist.insert("ext", ["default"]);
        whitelist.insert("other", ["a", "b"]);
        registry.augment(&whitelist);

        assert_eq!(registry.len(), 2);
        let ext = registry.get("ext").expect("ext present");
        assert!(ext.exports_name("default"));
        assert_eq!(ext.file_path, std::path::PathBuf::from("ext"));
        assert!(registry.contains("other"));
    }
}
