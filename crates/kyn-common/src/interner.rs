//! String interning for identifier deduplication.
//!
//! Interned strings are represented by `Atom`, a small copyable handle with
//! O(1) equality and hashing. Interning is thread-safe so that multiple
//! classes can be bound and checked in parallel by an outer driver.

use dashmap::DashMap;
use std::sync::RwLock;

/// Handle to an interned string.
///
/// Two `Atom`s are equal iff they were interned from equal strings in the
/// same `Interner`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom(pub u32);

/// Thread-safe string interner.
pub struct Interner {
    map: DashMap<Box<str>, Atom>,
    strings: RwLock<Vec<Box<str>>>,
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

impl Interner {
    pub fn new() -> Self {
        Self {
            map: DashMap::new(),
            strings: RwLock::new(Vec::new()),
        }
    }

    /// Intern a string, returning its `Atom`.
    pub fn intern(&self, text: &str) -> Atom {
        if let Some(existing) = self.map.get(text) {
            return *existing;
        }

        let mut strings = self.strings.write().unwrap_or_else(|e| e.into_inner());
        // Re-check under the write lock: another thread may have raced us.
        if let Some(existing) = self.map.get(text) {
            return *existing;
        }
        let atom = Atom(u32::try_from(strings.len()).unwrap_or(u32::MAX));
        strings.push(text.into());
        self.map.insert(text.into(), atom);
        atom
    }

    /// Resolve an `Atom` back to its string.
    ///
    /// Returns an empty string for atoms not produced by this interner.
    pub fn resolve(&self, atom: Atom) -> String {
        let strings = self.strings.read().unwrap_or_else(|e| e.into_inner());
        strings
            .get(atom.0 as usize)
            .map(|s| s.to_string())
            .unwrap_or_default()
    }

    /// Number of interned strings.
    pub fn len(&self) -> usize {
        self.strings.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
