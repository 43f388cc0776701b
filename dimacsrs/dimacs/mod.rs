//! DIMACS CNF problem files: the in-memory [`Problem`], its [`reader`], and
//! its [`writer`].
pub mod reader;
pub mod writer;

use std::fmt::Display;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use tracing::instrument;

use crate::error::{Error, Result};
use crate::literal::Clause;

/// Preamble of the DIMACS file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Preamble {
    pub clauses: usize,
    pub variables: usize,
}

impl Display for Preamble {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "p cnf {} {}", self.variables, self.clauses)
    }
}

/// CNF problem read from a DIMACS file.
///
/// A problem obtained from the [`reader`] is guaranteed to declare exactly as
/// many clauses as it contains and at least as many variables as its clauses
/// reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    variable_count: usize,
    clauses: Vec<Clause>,
    comments: Vec<String>,
}

impl Problem {
    /// Read and validate a whole problem.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] if the input is not a valid DIMACS CNF file
    /// and [`Error::Io`] if the input could not be read.
    pub fn from_reader(reader: &mut dyn std::io::BufRead) -> Result<Problem> {
        reader::read(reader)
    }

    /// Number of variables declared by the problem line.
    #[must_use]
    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    #[must_use]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Comment lines in the order they appeared, without line terminators.
    #[must_use]
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    #[must_use]
    pub fn preamble(&self) -> Preamble {
        Preamble {
            clauses: self.clauses.len(),
            variables: self.variable_count,
        }
    }

    /// Split the problem into `(variable_count, clauses, comments)`.
    #[must_use]
    pub fn into_parts(self) -> (usize, Vec<Clause>, Vec<String>) {
        (self.variable_count, self.clauses, self.comments)
    }
}

impl FromStr for Problem {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Problem::from_reader(&mut s.as_bytes())
    }
}

/// Renders the problem with its comments first, followed by the declared
/// preamble and the clauses.
impl Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for comment in &self.comments {
            writeln!(f, "{comment}")?;
        }

        writeln!(f, "{}", self.preamble())?;

        self.clauses.iter().try_for_each(|clause| {
            clause
                .iter()
                .try_for_each(|literal| write!(f, "{literal} "))?;
            writeln!(f, "0")
        })
    }
}

/// Read a DIMACS CNF file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read, or if its contents
/// are not a valid DIMACS CNF problem.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn read_dimacs<P: AsRef<Path>>(path: P) -> Result<Problem> {
    let file = File::open(path.as_ref())?;
    let mut reader = BufReader::new(file);
    Problem::from_reader(&mut reader)
}

/// Write clauses into a DIMACS CNF file, replacing its contents. The file is
/// not created when the clauses are rejected.
///
/// # Errors
///
/// Returns [`Error::Precondition`] if the clause list is empty or contains an
/// empty clause or a zero literal, and [`Error::Io`] on write failures.
#[instrument(skip_all, fields(path = %path.as_ref().display(), clauses = clauses.len()))]
pub fn write_dimacs<P: AsRef<Path>>(clauses: &[Clause], path: P) -> Result<()> {
    let preamble = writer::check_clauses(clauses)?;

    let f = File::create(path.as_ref())?;
    let mut b = BufWriter::new(f);
    writer::write_unchecked(preamble, clauses, &mut b)?;
    b.flush()?;

    Ok(())
}
