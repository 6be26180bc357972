//! # Token-Kind Interning
//!
//! Rule names ("token kinds") are opaque strings that get attached to
//! automaton states and compared constantly during subset construction and
//! minimization. Interning stores each unique name once and hands out a
//! small copyable key, so kind comparison is O(1) and kind sets stay cheap
//! to hash and order.
//!
//! ## Usage
//!
//! ```rust
//! use relex::intern::{Interner, KindSet};
//!
//! let mut interner = Interner::new();
//! let kw = interner.intern("KEYWORD");
//! let id = interner.intern("IDENTIFIER");
//! assert_eq!(kw, interner.intern("KEYWORD"));
//!
//! let mut kinds = KindSet::new();
//! kinds.insert(id);
//! kinds.insert(kw);
//! kinds.insert(kw); // duplicates collapse
//! assert_eq!(kinds.len(), 2);
//! ```

use lasso::{Rodeo, RodeoReader, Spur};
use smallvec::SmallVec;
use std::fmt;
use std::hash::{Hash, Hasher};

/// An interned token-kind name.
///
/// Lightweight handle comparing by identity of the interned string. Resolve
/// back to the name with [`Interner::resolve`] or [`FrozenInterner::resolve`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct KindId(Spur);

impl Hash for KindId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for KindId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KindId({:?})", self.0)
    }
}

/// A string interner used while rules are being compiled.
pub struct Interner {
    rodeo: Rodeo,
}

impl Interner {
    /// Create a new empty interner
    #[must_use]
    pub fn new() -> Self {
        Self {
            rodeo: Rodeo::new(),
        }
    }

    /// Intern a kind name, returning its key
    ///
    /// If the name has already been interned, returns the existing key.
    pub fn intern(&mut self, name: &str) -> KindId {
        KindId(self.rodeo.get_or_intern(name))
    }

    /// Get the key for an already-interned name, if it exists
    #[must_use]
    pub fn get(&self, name: &str) -> Option<KindId> {
        self.rodeo.get(name).map(KindId)
    }

    /// Resolve a kind key to its name
    ///
    /// # Panics
    ///
    /// Panics if the key was not created by this interner.
    #[must_use]
    pub fn resolve(&self, kind: KindId) -> &str {
        self.rodeo.resolve(&kind.0)
    }

    /// Get the number of interned names
    #[must_use]
    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    /// Check if the interner is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }

    /// Freeze the interner into a read-only, shareable form.
    ///
    /// A compiled lexer is immutable, so it holds a [`FrozenInterner`]; the
    /// frozen form is `Send + Sync` and can be resolved from any thread.
    #[must_use]
    pub fn into_frozen(self) -> FrozenInterner {
        FrozenInterner {
            rodeo: self.rodeo.into_reader(),
        }
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Interner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interner")
            .field("len", &self.rodeo.len())
            .finish()
    }
}

/// A read-only interner carried by a compiled lexer.
pub struct FrozenInterner {
    rodeo: RodeoReader,
}

impl FrozenInterner {
    /// Get the key for an interned name, if it exists
    #[must_use]
    pub fn get(&self, name: &str) -> Option<KindId> {
        self.rodeo.get(name).map(KindId)
    }

    /// Resolve a kind key to its name
    ///
    /// # Panics
    ///
    /// Panics if the key was not created by the interner this was frozen from.
    #[must_use]
    pub fn resolve(&self, kind: KindId) -> &str {
        self.rodeo.resolve(&kind.0)
    }

    /// Get the number of interned names
    #[must_use]
    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    /// Check if the interner is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }
}

impl fmt::Debug for FrozenInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrozenInterner")
            .field("len", &self.rodeo.len())
            .finish()
    }
}

/// A set of token kinds, kept sorted and deduplicated.
///
/// An accepting DFA state carries one of these: the union of every rule that
/// accepts at that state. Two states accept "the same rules" exactly when
/// their kind sets compare equal, which is what minimization's initial
/// partition relies on.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KindSet(SmallVec<[KindId; 2]>);

impl KindSet {
    /// Create an empty kind set
    #[must_use]
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    /// Insert a kind, keeping the set sorted; duplicates are ignored
    pub fn insert(&mut self, kind: KindId) {
        if let Err(at) = self.0.binary_search(&kind) {
            self.0.insert(at, kind);
        }
    }

    /// Union another set into this one
    pub fn union_with(&mut self, other: &Self) {
        for &kind in &other.0 {
            self.insert(kind);
        }
    }

    /// Check whether a kind is present
    #[must_use]
    pub fn contains(&self, kind: KindId) -> bool {
        self.0.binary_search(&kind).is_ok()
    }

    /// Iterate over the kinds in sorted key order
    pub fn iter(&self) -> impl Iterator<Item = KindId> + '_ {
        self.0.iter().copied()
    }

    /// Get the number of kinds in the set
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<KindId> for KindSet {
    fn from_iter<I: IntoIterator<Item = KindId>>(iter: I) -> Self {
        let mut set = Self::new();
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

impl fmt::Debug for KindSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.0.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interner_basic() {
        let mut interner = Interner::new();

        let key1 = interner.intern("KEYWORD");
        let key2 = interner.intern("KEYWORD");
        let key3 = interner.intern("IDENTIFIER");

        assert_eq!(key1, key2);
        assert_ne!(key1, key3);

        assert_eq!(interner.resolve(key1), "KEYWORD");
        assert_eq!(interner.resolve(key3), "IDENTIFIER");
    }

    #[test]
    fn test_interner_get() {
        let mut interner = Interner::new();

        assert!(interner.get("NUMBER").is_none());
        let key = interner.intern("NUMBER");
        assert_eq!(interner.get("NUMBER"), Some(key));
    }

    #[test]
    fn test_interner_len() {
        let mut interner = Interner::new();

        assert!(interner.is_empty());
        interner.intern("A");
        interner.intern("B");
        interner.intern("A");
        assert_eq!(interner.len(), 2);
    }

    #[test]
    fn test_frozen_interner_resolves() {
        let mut interner = Interner::new();
        let kw = interner.intern("KEYWORD");

        let frozen = interner.into_frozen();
        assert_eq!(frozen.resolve(kw), "KEYWORD");
        assert_eq!(frozen.get("KEYWORD"), Some(kw));
        assert_eq!(frozen.len(), 1);
    }

    #[test]
    fn test_kind_set_sorted_dedup() {
        let mut interner = Interner::new();
        let a = interner.intern("A");
        let b = interner.intern("B");
        let c = interner.intern("C");

        let mut set = KindSet::new();
        set.insert(c);
        set.insert(a);
        set.insert(b);
        set.insert(a);

        assert_eq!(set.len(), 3);
        let collected: Vec<_> = set.iter().collect();
        let mut sorted = collected.clone();
        sorted.sort();
        assert_eq!(collected, sorted);
    }

    #[test]
    fn test_kind_set_equality_is_set_equality() {
        let mut interner = Interner::new();
        let a = interner.intern("A");
        let b = interner.intern("B");

        let forward: KindSet = [a, b].into_iter().collect();
        let backward: KindSet = [b, a].into_iter().collect();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_kind_set_union() {
        let mut interner = Interner::new();
        let a = interner.intern("A");
        let b = interner.intern("B");
        let c = interner.intern("C");

        let mut left: KindSet = [a, b].into_iter().collect();
        let right: KindSet = [b, c].into_iter().collect();
        left.union_with(&right);

        assert_eq!(left.len(), 3);
        assert!(left.contains(a) && left.contains(b) && left.contains(c));
    }
}
