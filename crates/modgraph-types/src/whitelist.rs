//! Whitelisted external modules.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Modules outside the analysed set that imports may target, with the
/// exports each one provides.
///
/// Deserializes from a plain table, e.g. TOML `resolver = ["default"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Whitelist {
    entries: IndexMap<String, Vec<String>>,
}

impl Whitelist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whitelist `name` with the given export names, replacing any prior entry.
    pub fn insert<I, S>(&mut self, name: impl Into<String>, exports: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .insert(name.into(), exports.into_iter().map(Into::into).collect());
    }

    /// Merge `other` into `self`; entries in `other` win.
    pub fn extend(&mut self, other: Whitelist) {
        self.entries.extend(other.entries);
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N, E> FromIterator<(N, Vec<E>)> for Whitelist
where
    N: Into<String>,
    E: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (N, Vec<E>)>>(iter: T) -> Self {
        let mut whitelist = Self::new();
        for (name, exports) in iter {
            whitelist.insert(name, exports);
        }
        whitelist
    }
}
