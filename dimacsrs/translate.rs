//! Translation of DIMACS problems into formulas over fresh symbols.
use std::hash::Hash;

use bon::Builder;
use rustc_hash::FxHashMap;
use tracing::{debug, instrument, trace};

use crate::dimacs::Problem;
use crate::error::{PreconditionError, Result};
use crate::formula::{Formula, FormulaBuilder, FormulaManager, GlobalCounter, Symbol};
use crate::literal::{variable, Clause, Literal};

#[derive(Debug, Clone, Builder)]
pub struct TranslatorOptions {
    /// Prefix of symbol names. Variable `i` gets a symbol named
    /// `<prefix>_<i>_<counter>`.
    #[builder(default = String::from("_dimacs"), into)]
    pub symbol_prefix: String,
}

impl Default for TranslatorOptions {
    fn default() -> Self {
        TranslatorOptions::builder().build()
    }
}

/// Symbols created for a DIMACS problem.
///
/// Every literal `i` maps to the formula of its symbol and `-i` to the negation
/// of it. Only positive symbols are mapped back to their variable index.
#[derive(Debug, Clone)]
pub struct SymbolTable<S, F> {
    literals: FxHashMap<Literal, F>,
    variables: FxHashMap<S, usize>,
}

impl<S: Eq + Hash, F> SymbolTable<S, F> {
    /// Formula a literal translates to.
    #[must_use]
    pub fn literal(&self, literal: Literal) -> Option<&F> {
        self.literals.get(&literal)
    }

    /// DIMACS index of the variable a symbol was created for.
    #[must_use]
    pub fn variable(&self, symbol: &S) -> Option<usize> {
        self.variables.get(symbol).copied()
    }

    /// Number of literals with a translation, twice the number of variables.
    #[must_use]
    pub fn literal_count(&self) -> usize {
        self.literals.len()
    }

    #[must_use]
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Mapping from symbols back to DIMACS variable indices.
    #[must_use]
    pub fn variables(&self) -> &FxHashMap<S, usize> {
        &self.variables
    }

    #[must_use]
    pub fn into_variables(self) -> FxHashMap<S, usize> {
        self.variables
    }
}

/// Translates DIMACS clauses into formulas built by `B`.
#[derive(Debug)]
pub struct Translator<B: FormulaBuilder> {
    builder: B,
    options: TranslatorOptions,
}

impl<B: FormulaBuilder> Translator<B> {
    #[must_use]
    pub fn new(builder: B) -> Self {
        Translator::with_options(builder, TranslatorOptions::default())
    }

    #[must_use]
    pub fn with_options(builder: B, options: TranslatorOptions) -> Self {
        Translator { builder, options }
    }

    /// Translate clauses over `variable_count` variables into the conjunction
    /// of the disjunctions of their literals. Clause and literal order is kept.
    /// A fresh symbol is created for every variable, used or not.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError`] if `variable_count` is zero, if there are
    /// no clauses, if a clause is empty, if a literal is zero or exceeds `variable_count`, or if
    /// `variable_count` does not fit into a [`Literal`]. No symbol is
    /// created in that case.
    #[instrument(skip_all, fields(variables = variable_count, clauses = clauses.len()))]
    pub fn translate(
        &self,
        variable_count: usize,
        clauses: &[Clause],
        comments: &[String],
    ) -> Result<(B::Formula, SymbolTable<B::Symbol, B::Formula>)> {
        check_clauses(variable_count, clauses)?;
        trace!(comments = comments.len(), "comments are not translated");

        let table = self.symbol_table(variable_count);
        let disjunctions = clauses
            .iter()
            .enumerate()
            .map(|(index, clause)| {
                clause
                    .iter()
                    .map(|&literal| {
                        table
                            .literal(literal)
                            .cloned()
                            .ok_or(PreconditionError::UndeclaredLiteral { literal, index })
                    })
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map(|literals| self.builder.or_all(literals))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!(
            symbols = table.variable_count(),
            clauses = disjunctions.len(),
            "translated DIMACS clauses"
        );

        Ok((self.builder.and_all(disjunctions), table))
    }

    fn symbol_table(&self, variable_count: usize) -> SymbolTable<B::Symbol, B::Formula> {
        let mut literals = FxHashMap::default();
        let mut variables = FxHashMap::default();

        for idx in 1..=variable_count {
            let symbol = self
                .builder
                .fresh_symbol(&format!("{}_{idx}_{{}}", self.options.symbol_prefix));
            let positive = self.builder.symbol(&symbol);
            let negative = self.builder.negate(&positive);

            // `check_clauses` bounds `variable_count` by `Literal::MAX`.
            #[allow(clippy::cast_possible_wrap)]
            let literal = idx as Literal;
            literals.insert(literal, positive);
            literals.insert(-literal, negative);
            variables.insert(symbol, idx);
        }

        SymbolTable {
            literals,
            variables,
        }
    }
}

fn check_clauses(
    variable_count: usize,
    clauses: &[Clause],
) -> std::result::Result<(), PreconditionError> {
    if variable_count == 0 {
        return Err(PreconditionError::NoVariables);
    }

    if Literal::try_from(variable_count).is_err() {
        return Err(PreconditionError::TooManyVariables { variable_count });
    }

    if clauses.is_empty() {
        return Err(PreconditionError::EmptyClauseList);
    }

    for (index, clause) in clauses.iter().enumerate() {
        if clause.is_empty() {
            return Err(PreconditionError::EmptyClause { index });
        }

        if let Some(&literal) = clause
            .iter()
            .find(|&&literal| literal == 0 || variable(literal) > variable_count)
        {
            return Err(PreconditionError::UndeclaredLiteral { literal, index });
        }
    }

    Ok(())
}

impl Problem {
    /// Translate the problem with `translator`.
    ///
    /// # Errors
    ///
    /// See [`Translator::translate`].
    pub fn to_formula<B: FormulaBuilder>(
        &self,
        translator: &Translator<B>,
    ) -> Result<(B::Formula, SymbolTable<B::Symbol, B::Formula>)> {
        translator.translate(self.variable_count(), self.clauses(), self.comments())
    }
}

/// Translate clauses into a [`Formula`] over process-unique symbols and return
/// it along with the mapping from symbols to DIMACS variable indices.
///
/// # Errors
///
/// See [`Translator::translate`].
pub fn dimacs_to_formula(
    variable_count: usize,
    clauses: &[Clause],
    comments: &[String],
) -> Result<(Formula, FxHashMap<Symbol, usize>)> {
    let translator = Translator::new(FormulaManager::new(GlobalCounter));
    let (formula, table) = translator.translate(variable_count, clauses, comments)?;
    Ok((formula, table.into_variables()))
}
