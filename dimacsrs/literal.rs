/// Signed DIMACS literal. The magnitude is the 1-based index of the variable,
/// the sign its polarity. `0` is reserved as the clause terminator and is never
/// a valid literal.
pub type Literal = isize;

/// Single clause -- disjunction of literals.
pub type Clause = Vec<Literal>;

/// Index of the variable a literal refers to.
#[must_use]
pub fn variable(literal: Literal) -> usize {
    literal.unsigned_abs()
}

/// Largest variable index referenced by any of the clauses, or `None` when
/// there is no literal at all.
#[must_use]
pub fn max_variable(clauses: &[Clause]) -> Option<usize> {
    clauses.iter().flatten().copied().map(variable).max()
}
