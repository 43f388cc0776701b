use tracing::trace;

use crate::formula::{Formula, FormulaBuilder, GlobalCounter, Symbol, SymbolGenerator};

/// Builds [`Formula`] trees. Symbol freshness is delegated to the generator
/// the manager was created with.
#[derive(Debug, Default)]
pub struct FormulaManager<G: SymbolGenerator = GlobalCounter> {
    generator: G,
}

impl<G: SymbolGenerator> FormulaManager<G> {
    #[must_use]
    pub fn new(generator: G) -> Self {
        FormulaManager { generator }
    }
}

impl<G: SymbolGenerator> FormulaBuilder for FormulaManager<G> {
    type Symbol = Symbol;
    type Formula = Formula;

    fn fresh_symbol(&self, template: &str) -> Symbol {
        let symbol = Symbol::new(template, self.generator.next_id());
        trace!(name = symbol.name(), "created fresh symbol");
        symbol
    }

    fn symbol(&self, symbol: &Symbol) -> Formula {
        Formula::Symbol(symbol.clone())
    }

    fn negate(&self, formula: &Formula) -> Formula {
        Formula::Not(Box::new(formula.clone()))
    }

    fn or_all(&self, formulas: Vec<Formula>) -> Formula {
        Formula::Or(formulas)
    }

    fn and_all(&self, formulas: Vec<Formula>) -> Formula {
        Formula::And(formulas)
    }
}
