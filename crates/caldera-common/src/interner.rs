//! String interning for identifier deduplication.
//!
//! Analysis is single-threaded and synchronous (see the concurrency model in
//! the design notes), so unlike a sharded, lock-protected interner this one
//! is a plain arena: a `Vec<Box<str>>` plus a reverse `FxHashMap` for lookup.

use rustc_hash::FxHashMap;

/// An interned string. Cheap to copy and compare.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom(u32);

impl std::fmt::Debug for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Atom({})", self.0)
    }
}

/// Interns strings so repeated identifiers (class names, member names, type
/// parameter names) compare and hash as a single `u32`.
#[derive(Default)]
pub struct Interner {
    strings: Vec<Box<str>>,
    lookup: FxHashMap<Box<str>, Atom>,
}

impl Interner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `s`, returning an existing `Atom` if `s` was already interned.
    pub fn intern(&mut self, s: &str) -> Atom {
        if let Some(&atom) = self.lookup.get(s) {
            return atom;
        }
        let atom = Atom(self.strings.len() as u32);
        let boxed: Box<str> = s.into();
        self.strings.push(boxed.clone());
        self.lookup.insert(boxed, atom);
        atom
    }

    /// Resolves an `Atom` back to its string. Panics if `atom` was not
    /// produced by this interner.
    #[must_use]
    pub fn resolve(&self, atom: Atom) -> &str {
        &self.strings[atom.0 as usize]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_same_string_returns_same_atom() {
        let mut interner = Interner::new();
        let a = interner.intern("Option");
        let b = interner.intern("Option");
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_strings_get_distinct_atoms() {
        let mut interner = Interner::new();
        let a = interner.intern("A");
        let b = interner.intern("B");
        assert_ne!(a, b);
    }

    #[test]
    fn resolve_round_trips() {
        let mut interner = Interner::new();
        let atom = interner.intern("Box");
        assert_eq!(interner.resolve(atom), "Box");
    }
}
