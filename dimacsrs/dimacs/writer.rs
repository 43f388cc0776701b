//! DIMACS writer. The preamble is derived from the clauses themselves: the
//! variable count is the largest variable index they reference.
use std::fmt::Display;
use std::io::Write;

use tracing::instrument;

use crate::dimacs::Preamble;
use crate::error::{PreconditionError, Result};
use crate::literal::{max_variable, Clause};

/// Write clauses in DIMACS CNF format.
///
/// # Errors
///
/// Returns an error if the clause list is empty, if a clause is empty or
/// contains a zero literal, or if writing fails. Nothing is written when the
/// clauses are rejected.
#[instrument(skip_all, fields(clauses = clauses.len()))]
pub fn write_clauses(clauses: &[Clause], writer: &mut dyn Write) -> Result<()> {
    let preamble = check_clauses(clauses)?;
    write_unchecked(preamble, clauses, writer)
}

/// Render clauses in DIMACS CNF format.
///
/// # Errors
///
/// Returns an error under the same conditions as [`write_clauses`].
pub fn to_string(clauses: &[Clause]) -> Result<String> {
    let preamble = check_clauses(clauses)?;
    Ok(Dimacs { preamble, clauses }.to_string())
}

/// Checked clauses along with their preamble.
struct Dimacs<'a> {
    preamble: Preamble,
    clauses: &'a [Clause],
}

impl Display for Dimacs<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.preamble)?;

        self.clauses.iter().try_for_each(|clause| {
            clause
                .iter()
                .try_for_each(|literal| write!(f, "{literal} "))?;
            writeln!(f, "0")
        })
    }
}

/// Validate clauses and compute the preamble describing them.
pub(crate) fn check_clauses(clauses: &[Clause]) -> std::result::Result<Preamble, PreconditionError> {
    if clauses.is_empty() {
        return Err(PreconditionError::EmptyClauseList);
    }

    for (index, clause) in clauses.iter().enumerate() {
        if clause.is_empty() {
            return Err(PreconditionError::EmptyClause { index });
        }

        if clause.contains(&0) {
            return Err(PreconditionError::ZeroLiteral { index });
        }
    }

    Ok(Preamble {
        clauses: clauses.len(),
        variables: max_variable(clauses).unwrap_or_default(),
    })
}

pub(crate) fn write_unchecked(
    preamble: Preamble,
    clauses: &[Clause],
    writer: &mut dyn Write,
) -> Result<()> {
    write!(writer, "{}", Dimacs { preamble, clauses })?;
    Ok(())
}
