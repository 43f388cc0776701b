//! # Reader, writer, and translator for DIMACS CNF problems.
//!
//! [DIMACS](https://www21.in.tum.de/~lammich/2015_SS_Seminar_SAT/resources/dimacs-cnf.pdf)
//! is the plain-text format SAT solvers use for formulas in conjunctive normal
//! form: a problem line `p cnf VARIABLES CLAUSES` followed by one line per
//! clause, each a list of signed variable indices terminated by `0`.
//!
//! The crate supports:
//! * reading and validating DIMACS CNF files, comments included,
//! * writing clauses back to DIMACS,
//! * translating a problem into a formula over freshly named Boolean symbols.
//!
//! ```rust
//! use dimacsrs::dimacs::{writer, Problem};
//! use dimacsrs::formula::{FormulaManager, LocalCounter};
//! use dimacsrs::translate::Translator;
//!
//! let problem: Problem = "c example
//! p cnf 3 2
//! 1 -2 0
//! 2 3 0
//! "
//! .parse()
//! .unwrap();
//!
//! assert_eq!(problem.variable_count(), 3);
//! assert_eq!(problem.clauses(), [vec![1, -2], vec![2, 3]]);
//!
//! let translator = Translator::new(FormulaManager::new(LocalCounter::default()));
//! let (formula, symbols) = problem.to_formula(&translator).unwrap();
//! assert_eq!(
//!     formula.to_string(),
//!     "(_dimacs_1_0 | !_dimacs_2_1) & (_dimacs_2_1 | _dimacs_3_2)"
//! );
//! assert_eq!(symbols.variable_count(), 3);
//!
//! assert_eq!(
//!     writer::to_string(problem.clauses()).unwrap(),
//!     "p cnf 3 2\n1 -2 0\n2 3 0\n"
//! );
//! ```
//!
//! Main entry points are:
//!
//! * [`crate::dimacs::read_dimacs`] -- read a problem from a file
//! * [`crate::dimacs::write_dimacs`] -- write clauses into a file
//! * [`crate::translate::Translator::translate`] -- translate clauses into a formula
//! * [`crate::translate::dimacs_to_formula`] -- translate with process-unique symbols
pub mod dimacs;
pub mod error;
pub mod formula;
/// Literals and clauses.
pub mod literal;
pub mod translate;

pub use crate::error::{Error, Result};
