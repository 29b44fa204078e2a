//! String interning for source identifiers.
//!
//! Identifiers are case-insensitive in the source language: the scanner
//! upper-cases every identifier lexeme before it reaches this module, so
//! `x`, `X` and `x` all intern to the same [`Symbol`]. Interning happens
//! against a per-[`Interner`] table rather than a global one, since the
//! compiler is single-threaded and bundles all mutable state into a single
//! context value (see `pslc-drv`).

use rustc_hash::FxHashMap;
use std::fmt;

/// A compact handle to an interned, upper-cased identifier string.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

/// Owns the backing storage for all [`Symbol`]s produced during a compilation.
///
/// Strings are deduplicated by exact match; callers are responsible for
/// upper-casing identifiers before interning (the scanner does this as it
/// accumulates an identifier lexeme).
#[derive(Default)]
pub struct Interner {
    map: FxHashMap<Box<str>, u32>,
    strings: Vec<Box<str>>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `text`, returning the existing symbol if already present.
    pub fn intern(&mut self, text: &str) -> Symbol {
        if let Some(&id) = self.map.get(text) {
            return Symbol(id);
        }
        let id = self.strings.len() as u32;
        let boxed: Box<str> = text.into();
        self.strings.push(boxed.clone());
        self.map.insert(boxed, id);
        Symbol(id)
    }

    /// Resolve a symbol back to its string. Panics if the symbol was not
    /// produced by this interner.
    pub fn resolve(&self, symbol: Symbol) -> &str {
        &self.strings[symbol.0 as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_text_interns_once() {
        let mut interner = Interner::new();
        let a = interner.intern("FOO");
        let b = interner.intern("FOO");
        assert_eq!(a, b);
        assert_eq!(interner.resolve(a), "FOO");
    }

    #[test]
    fn distinct_text_gets_distinct_symbols() {
        let mut interner = Interner::new();
        let a = interner.intern("FOO");
        let b = interner.intern("BAR");
        assert_ne!(a, b);
    }
}
