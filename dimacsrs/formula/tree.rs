use std::fmt::Display;

use crate::formula::Symbol;

/// Formula tree. Disjunctions and conjunctions are n-ary and keep the order of
/// their operands; an empty disjunction is false and an empty conjunction true.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Formula {
    Symbol(Symbol),
    Not(Box<Formula>),
    Or(Vec<Formula>),
    And(Vec<Formula>),
}

impl Formula {
    /// Number of nodes in the tree.
    #[must_use]
    pub fn size(&self) -> usize {
        match self {
            Formula::Symbol(_) => 1,
            Formula::Not(formula) => 1 + formula.size(),
            Formula::Or(formulas) | Formula::And(formulas) => {
                1 + formulas.iter().map(Formula::size).sum::<usize>()
            }
        }
    }

    /// Operands of a disjunction or conjunction, the negated formula of a
    /// negation, nothing for a symbol.
    #[must_use]
    pub fn children(&self) -> &[Formula] {
        match self {
            Formula::Symbol(_) => &[],
            Formula::Not(formula) => std::slice::from_ref(&**formula),
            Formula::Or(formulas) | Formula::And(formulas) => formulas,
        }
    }

    fn fmt_operand(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Formula::Or(formulas) | Formula::And(formulas) if formulas.len() > 1 => {
                write!(f, "({self})")
            }
            _ => write!(f, "{self}"),
        }
    }

    fn fmt_nary(
        f: &mut std::fmt::Formatter<'_>,
        formulas: &[Formula],
        operator: &str,
        empty: &str,
    ) -> std::fmt::Result {
        if formulas.is_empty() {
            return write!(f, "{empty}");
        }

        for (idx, formula) in formulas.iter().enumerate() {
            if idx > 0 {
                write!(f, " {operator} ")?;
            }
            formula.fmt_operand(f)?;
        }

        Ok(())
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Formula::Symbol(symbol) => write!(f, "{symbol}"),
            Formula::Not(formula) => {
                write!(f, "!")?;
                formula.fmt_operand(f)
            }
            Formula::Or(formulas) => Formula::fmt_nary(f, formulas, "|", "false"),
            Formula::And(formulas) => Formula::fmt_nary(f, formulas, "&", "true"),
        }
    }
}
