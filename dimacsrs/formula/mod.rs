//! Boolean formulas the translator builds DIMACS problems into.
//!
//! The translator only relies on [`FormulaBuilder`]; [`FormulaManager`] is the
//! implementation shipped with the crate and produces [`Formula`] trees.
mod manager;
mod symbol;
mod tree;

use std::hash::Hash;

pub use crate::formula::manager::FormulaManager;
pub use crate::formula::symbol::{GlobalCounter, LocalCounter, Symbol, SymbolGenerator, SymbolId};
pub use crate::formula::tree::Formula;

/// Constructs formulas out of fresh symbols, negation, and n-ary disjunction
/// and conjunction.
pub trait FormulaBuilder {
    type Symbol: Clone + Eq + Hash;
    type Formula: Clone;

    /// Create a symbol whose name is unique for this builder. The first `{}`
    /// in `template` is replaced by a counter; without a placeholder the
    /// counter is appended as `_<counter>`.
    fn fresh_symbol(&self, template: &str) -> Self::Symbol;

    /// Formula consisting of just the symbol.
    fn symbol(&self, symbol: &Self::Symbol) -> Self::Formula;

    fn negate(&self, formula: &Self::Formula) -> Self::Formula;

    /// Disjunction of the formulas, in order.
    fn or_all(&self, formulas: Vec<Self::Formula>) -> Self::Formula;

    /// Conjunction of the formulas, in order.
    fn and_all(&self, formulas: Vec<Self::Formula>) -> Self::Formula;
}
