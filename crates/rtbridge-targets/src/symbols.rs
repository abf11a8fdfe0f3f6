//! Host configuration symbol predicates.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A source of host configuration symbols (e.g. `ARCH_RISCV64`, `RT_USING_SMP`).
pub trait ConfigSymbols {
    /// Whether `symbol` is enabled in the host configuration.
    fn has(&self, symbol: &str) -> bool;

    /// Whether any of `symbols` is enabled.
    fn has_any(&self, symbols: &[&str]) -> bool {
        symbols.iter().any(|s| self.has(s))
    }
}

impl<F> ConfigSymbols for F
where
    F: Fn(&str) -> bool,
{
    fn has(&self, symbol: &str) -> bool {
        self(symbol)
    }
}

/// An explicit set of enabled symbols, typically loaded from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolSet(BTreeSet<String>);

impl SymbolSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl ConfigSymbols for SymbolSet {
    fn has(&self, symbol: &str) -> bool {
        self.0.contains(symbol)
    }
}

impl<S: Into<String>> FromIterator<S> for SymbolSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
