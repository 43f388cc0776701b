//! Errors raised while reading, writing, and translating DIMACS problems.
use std::num::ParseIntError;

use thiserror::Error;

use crate::literal::Literal;

/// The input is not a well-formed DIMACS CNF file. Line numbers are 1-based.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("line {line}: problem type must be 'cnf' but found '{found}'")]
    WrongProblemType { line: usize, found: String },

    #[error("line {line}: problem line must contain exactly 4 fields: 'p cnf VARIABLES CLAUSES'")]
    MalformedProblemLine { line: usize },

    #[error("line {line}: could not parse number of {field}: {source}")]
    InvalidCount {
        line: usize,
        field: &'static str,
        source: ParseIntError,
    },

    #[error("preamble is missing a problem line")]
    MissingProblemLine,

    #[error("line {line}: expected a comment or the problem line but found '{found}'")]
    UnexpectedLine { line: usize, found: String },

    #[error("line {line}: clause is not terminated by '0'")]
    MissingTerminator { line: usize },

    #[error("line {line}: literal '{token}' is invalid: {source}")]
    InvalidLiteral {
        line: usize,
        token: String,
        source: ParseIntError,
    },

    #[error("line {line}: literal 0 may only terminate a clause")]
    ZeroLiteral { line: usize },

    #[error("line {line}: clause contains no literals")]
    EmptyClause { line: usize },

    #[error("line {line}: expected '0' after '%' but found '{found}' instead")]
    MalformedTrailer { line: usize, found: String },

    #[error("mismatch between declared clauses ({declared}) and actual clauses ({actual})")]
    ClauseCountMismatch { declared: usize, actual: usize },

    #[error("mismatch between declared variables ({declared}) and actual variables ({actual})")]
    VariableCountMismatch { declared: usize, actual: usize },
}

/// An operation was invoked with arguments it cannot work with.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PreconditionError {
    #[error("clause list is empty")]
    EmptyClauseList,

    #[error("clause {index} is empty")]
    EmptyClause { index: usize },

    #[error("clause {index} contains literal 0")]
    ZeroLiteral { index: usize },

    #[error("variable count must be positive")]
    NoVariables,

    #[error("variable count {variable_count} does not fit into a literal")]
    TooManyVariables { variable_count: usize },

    #[error("literal {literal} in clause {index} refers to an undeclared variable")]
    UndeclaredLiteral { literal: Literal, index: usize },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Precondition(#[from] PreconditionError),
}

pub type Result<T> = std::result::Result<T, Error>;
