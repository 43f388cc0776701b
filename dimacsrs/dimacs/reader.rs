//! DIMACS reader responsible for parsing DIMACS CNF problem files.
//!
//! Lines are split on any run of whitespace, so tabs and repeated spaces are
//! accepted between fields and literals. Blank lines are skipped.
use std::io::BufRead;

use tracing::{debug, instrument, trace};

use crate::dimacs::{Preamble, Problem};
use crate::error::{FormatError, Result};
use crate::literal::{variable, Clause, Literal};

/// Current state of the DIMACS reader.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum DimacsReaderState {
    Initialized,
    PreambleParsed,
    ParsingClauses,
    Finished,
}

/// Incremental DIMACS reader.
///
/// The preamble is parsed first with [`DimacsReader::parse_preamble`], clauses
/// are then pulled one by one with [`DimacsReader::parse_next_clause`]. Comment
/// lines are collected along the way, wherever they appear.
#[allow(clippy::module_name_repetitions)]
pub struct DimacsReader<'a> {
    reader: &'a mut dyn BufRead,
    state: DimacsReaderState,
    line: usize,
    preamble: Option<Preamble>,
    comments: Vec<String>,
    clauses_read: usize,
    max_variable: usize,
}

impl<'a> DimacsReader<'a> {
    #[must_use]
    pub fn new(reader: &'a mut dyn BufRead) -> Self {
        DimacsReader {
            reader,
            state: DimacsReaderState::Initialized,
            line: 0,
            preamble: None,
            comments: Vec::new(),
            clauses_read: 0,
            max_variable: 0,
        }
    }

    /// Parse preamble of the DIMACS file. Calling it again returns the
    /// already parsed preamble.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// * the input ends before the problem line,
    /// * a line other than a comment precedes the problem line,
    /// * the problem line is not of the form `p cnf VARIABLES CLAUSES`,
    /// * the input could not be read.
    pub fn parse_preamble(&mut self) -> Result<Preamble> {
        if let Some(preamble) = self.preamble {
            return Ok(preamble);
        }

        loop {
            let Some(line) = self.next_line()? else {
                return Err(FormatError::MissingProblemLine.into());
            };

            if line.starts_with('c') {
                self.comments.push(line);
                continue;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if !line.starts_with('p') {
                return Err(FormatError::UnexpectedLine {
                    line: self.line,
                    found: line,
                }
                .into());
            }

            let preamble = self.parse_problem_line(trimmed)?;
            debug!(
                variables = preamble.variables,
                clauses = preamble.clauses,
                "parsed problem line"
            );

            self.preamble = Some(preamble);
            self.state = DimacsReaderState::PreambleParsed;
            return Ok(preamble);
        }
    }

    /// Parse the next clause. The preamble is parsed first if it has not been
    /// yet. Returns `None` once the clause data is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if the preamble is invalid, if a clause line is not a
    /// `0`-terminated list of nonzero integers, or if the input could not be
    /// read.
    pub fn parse_next_clause(&mut self) -> Result<Option<Clause>> {
        match self.state {
            DimacsReaderState::Initialized => {
                self.parse_preamble()?;
            }
            DimacsReaderState::Finished => return Ok(None),
            DimacsReaderState::PreambleParsed | DimacsReaderState::ParsingClauses => {}
        }

        loop {
            let Some(line) = self.next_line()? else {
                self.state = DimacsReaderState::Finished;
                return Ok(None);
            };

            if line.starts_with('c') {
                self.comments.push(line);
                continue;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            self.state = DimacsReaderState::ParsingClauses;

            // SATLIB benchmarks end the clause data with '%' followed by a line with '0'.
            if trimmed == "%" {
                return self.parse_trailer();
            }

            let clause = self.parse_clause_line(trimmed)?;
            self.clauses_read += 1;
            self.max_variable = clause
                .iter()
                .copied()
                .map(variable)
                .fold(self.max_variable, usize::max);

            trace!(line = self.line, literals = clause.len(), "parsed clause");
            return Ok(Some(clause));
        }
    }

    /// Check the declared counts of the preamble against the clauses read so
    /// far. Meaningful once [`DimacsReader::parse_next_clause`] returned `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the preamble has not been parsed, if the number of
    /// clauses differs from the declared one, or if a clause references a
    /// variable above the declared variable count.
    pub fn validate(&self) -> std::result::Result<(), FormatError> {
        let preamble = self.preamble.ok_or(FormatError::MissingProblemLine)?;

        if preamble.clauses != self.clauses_read {
            return Err(FormatError::ClauseCountMismatch {
                declared: preamble.clauses,
                actual: self.clauses_read,
            });
        }

        if self.max_variable > preamble.variables {
            return Err(FormatError::VariableCountMismatch {
                declared: preamble.variables,
                actual: self.max_variable,
            });
        }

        Ok(())
    }

    /// Comment lines collected so far.
    #[must_use]
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    #[must_use]
    pub fn into_comments(self) -> Vec<String> {
        self.comments
    }

    /// Largest variable index referenced by the clauses read so far.
    #[must_use]
    pub fn max_variable(&self) -> usize {
        self.max_variable
    }

    fn parse_problem_line(&self, line: &str) -> std::result::Result<Preamble, FormatError> {
        let items: Vec<_> = line.split_whitespace().collect();
        let [marker, problem_type, variables, clauses] = items.as_slice() else {
            return Err(FormatError::MalformedProblemLine { line: self.line });
        };

        if *marker != "p" {
            return Err(FormatError::MalformedProblemLine { line: self.line });
        }

        if *problem_type != "cnf" {
            return Err(FormatError::WrongProblemType {
                line: self.line,
                found: (*problem_type).to_owned(),
            });
        }

        let variables = variables
            .parse::<usize>()
            .map_err(|source| FormatError::InvalidCount {
                line: self.line,
                field: "variables",
                source,
            })?;

        let clauses = clauses
            .parse::<usize>()
            .map_err(|source| FormatError::InvalidCount {
                line: self.line,
                field: "clauses",
                source,
            })?;

        Ok(Preamble { clauses, variables })
    }

    fn parse_clause_line(&self, line: &str) -> std::result::Result<Clause, FormatError> {
        let tokens: Vec<_> = line.split_whitespace().collect();
        let Some((&"0", tokens)) = tokens.split_last() else {
            return Err(FormatError::MissingTerminator { line: self.line });
        };

        if tokens.is_empty() {
            return Err(FormatError::EmptyClause { line: self.line });
        }

        tokens
            .iter()
            .map(|token| match token.parse::<Literal>() {
                Err(source) => Err(FormatError::InvalidLiteral {
                    line: self.line,
                    token: (*token).to_owned(),
                    source,
                }),
                Ok(0) => Err(FormatError::ZeroLiteral { line: self.line }),
                Ok(literal) => Ok(literal),
            })
            .collect()
    }

    fn parse_trailer(&mut self) -> Result<Option<Clause>> {
        let zero = self.next_line()?.unwrap_or_default();
        if zero.trim() != "0" {
            return Err(FormatError::MalformedTrailer {
                line: self.line,
                found: zero,
            }
            .into());
        }

        self.state = DimacsReaderState::Finished;
        Ok(None)
    }

    /// Read the next line without its line terminator, or `None` at the end
    /// of the input.
    fn next_line(&mut self) -> Result<Option<String>> {
        let mut buf = String::new();
        if self.reader.read_line(&mut buf)? == 0 {
            return Ok(None);
        }

        self.line += 1;
        let len = buf.trim_end_matches(['\n', '\r']).len();
        buf.truncate(len);
        Ok(Some(buf))
    }
}

/// Read and validate a whole DIMACS problem.
///
/// # Errors
///
/// Returns an error if the input is not a valid DIMACS CNF problem or could
/// not be read. Nothing read before the failure is returned.
#[instrument(skip_all)]
pub fn read(reader: &mut dyn BufRead) -> Result<Problem> {
    let mut dimacs = DimacsReader::new(reader);
    let preamble = dimacs.parse_preamble()?;

    let mut clauses = Vec::new();
    while let Some(clause) = dimacs.parse_next_clause()? {
        clauses.push(clause);
    }

    dimacs.validate()?;
    debug!(
        variables = preamble.variables,
        clauses = clauses.len(),
        comments = dimacs.comments().len(),
        "read DIMACS problem"
    );

    Ok(Problem {
        variable_count: preamble.variables,
        clauses,
        comments: dimacs.into_comments(),
    })
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use std::io::BufReader;

    use super::{DimacsReader, Preamble};
    use crate::dimacs::Problem;
    use crate::error::{Error, FormatError};
    use crate::literal::Clause;

    fn collect_clauses(dimacs: &mut DimacsReader) -> Vec<Clause> {
        let mut clauses = Vec::new();

        loop {
            match dimacs.parse_next_clause() {
                Ok(Some(clause)) => clauses.push(clause),
                Ok(None) => break,
                Err(err) => panic!("{err}"),
            }
        }

        clauses
    }

    fn format_error(contents: &str) -> FormatError {
        match contents.parse::<Problem>() {
            Err(Error::Format(err)) => err,
            other => panic!("expected a format error, got {other:?}"),
        }
    }

    #[test]
    fn dimacs_ok() {
        let contents = "c Example CNF format file
c
p cnf 4 3
1 3 -4 0
4 0
2 -3 0";
        let mut reader = BufReader::new(contents.as_bytes());
        let mut dimacs = DimacsReader::new(&mut reader);

        assert_eq!(
            dimacs.parse_preamble().unwrap(),
            Preamble {
                variables: 4,
                clauses: 3
            }
        );

        let clauses = collect_clauses(&mut dimacs);

        assert_eq!(clauses, vec![vec![1, 3, -4], vec![4], vec![2, -3]]);
        assert_eq!(dimacs.comments(), ["c Example CNF format file", "c"]);
        assert_eq!(dimacs.max_variable(), 4);
        assert_eq!(dimacs.validate(), Ok(()));
    }

    #[test]
    fn read_problem() {
        let problem: Problem = "p cnf 3 2\n1 -2 0\n2 3 0\n".parse().unwrap();

        assert_eq!(problem.variable_count(), 3);
        assert_eq!(problem.clauses(), [vec![1, -2], vec![2, 3]]);
        assert!(problem.comments().is_empty());
    }

    #[test]
    fn comments_are_collected_in_order() {
        let problem: Problem = "c this is a comment
p cnf 3 2
c between clauses
1 -2 0
2 3 0
c at the end
"
        .parse()
        .unwrap();

        assert_eq!(problem.variable_count(), 3);
        assert_eq!(problem.clauses(), [vec![1, -2], vec![2, 3]]);
        assert_eq!(
            problem.comments(),
            ["c this is a comment", "c between clauses", "c at the end"]
        );
    }

    #[test]
    fn preamble_with_whitespace() {
        let contents = "c Example CNF format file
c
p   cnf  4   3
1 3 -4 0
4 0 2
-3 0";
        let mut reader = BufReader::new(contents.as_bytes());
        let mut dimacs = DimacsReader::new(&mut reader);

        assert_eq!(
            dimacs.parse_preamble().unwrap(),
            Preamble {
                variables: 4,
                clauses: 3
            }
        );
        assert_eq!(
            dimacs.parse_preamble().unwrap(),
            Preamble {
                variables: 4,
                clauses: 3
            }
        );
    }

    #[test]
    fn clauses_with_whitespace() {
        let problem: Problem = "c Example CNF format file
p cnf 4 2
1  3\t-4 0

  4 0
"
        .parse()
        .unwrap();

        assert_eq!(problem.clauses(), [vec![1, 3, -4], vec![4]]);
    }

    #[test]
    fn crlf_line_endings() {
        let problem: Problem = "c windows\r\np cnf 2 1\r\n1 -2 0\r\n".parse().unwrap();

        assert_eq!(problem.clauses(), [vec![1, -2]]);
        assert_eq!(problem.comments(), ["c windows"]);
    }

    #[test]
    fn trailing_eof_syntax() {
        // This weird format with trailing '%\n0\n' is in the SATLIB benchmarks: https://www.cs.ubc.ca/~hoos/SATLIB/benchm.html
        let problem: Problem = "c Example CNF format file
c
p cnf 4 2
1 3 -4 0
4 0
%
0
"
        .parse()
        .unwrap();

        assert_eq!(problem.clauses(), [vec![1, 3, -4], vec![4]]);
    }

    #[test]
    fn malformed_trailer() {
        assert_eq!(
            format_error("p cnf 4 1\n1 3 -4 0\n%\n1\n"),
            FormatError::MalformedTrailer {
                line: 4,
                found: "1".to_owned()
            }
        );
    }

    #[test]
    fn clause_count_mismatch() {
        assert_eq!(
            format_error("p cnf 3 3\n1 -2 0\n2 3 0\n"),
            FormatError::ClauseCountMismatch {
                declared: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn variable_count_mismatch() {
        assert_eq!(
            format_error("p cnf 2 1\n1 2 3 0\n"),
            FormatError::VariableCountMismatch {
                declared: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn missing_terminator() {
        assert_eq!(
            format_error("p cnf 3 2\n1 -2 0\n2 3\n"),
            FormatError::MissingTerminator { line: 3 }
        );
    }

    #[test]
    fn zero_inside_clause() {
        assert_eq!(
            format_error("p cnf 3 1\n1 0 -2 0\n"),
            FormatError::ZeroLiteral { line: 2 }
        );
    }

    #[test]
    fn empty_clause() {
        assert_eq!(
            format_error("p cnf 3 2\n1 -2 0\n0\n"),
            FormatError::EmptyClause { line: 3 }
        );
    }

    #[test]
    fn invalid_literal() {
        let FormatError::InvalidLiteral { line, token, .. } = format_error("p cnf 3 1\n1 x 0\n")
        else {
            panic!("expected an invalid literal");
        };

        assert_eq!((line, token.as_str()), (2, "x"));
    }

    #[test]
    fn wrong_problem_type() {
        assert_eq!(
            format_error("c weighted\np wcnf 3 2\n"),
            FormatError::WrongProblemType {
                line: 2,
                found: "wcnf".to_owned()
            }
        );
    }

    #[test]
    fn malformed_problem_line() {
        assert_eq!(
            format_error("p cnf 3\n1 0\n"),
            FormatError::MalformedProblemLine { line: 1 }
        );
        assert_eq!(
            format_error("p cnf 3 1 7\n1 0\n"),
            FormatError::MalformedProblemLine { line: 1 }
        );
    }

    #[test]
    fn invalid_counts() {
        assert!(matches!(
            format_error("p cnf -3 1\n1 0\n"),
            FormatError::InvalidCount {
                line: 1,
                field: "variables",
                ..
            }
        ));
        assert!(matches!(
            format_error("p cnf 3 many\n1 0\n"),
            FormatError::InvalidCount {
                line: 1,
                field: "clauses",
                ..
            }
        ));
    }

    #[test]
    fn missing_problem_line() {
        assert_eq!(
            format_error("c only comments\n"),
            FormatError::MissingProblemLine
        );
    }

    #[test]
    fn clause_before_problem_line() {
        assert_eq!(
            format_error("1 2 0\np cnf 2 1\n"),
            FormatError::UnexpectedLine {
                line: 1,
                found: "1 2 0".to_owned()
            }
        );
    }

    #[test]
    fn duplicates_and_tautologies_are_accepted() {
        let problem: Problem = "p cnf 5 2\n1 1 -1 0\n5 0\n".parse().unwrap();

        assert_eq!(problem.clauses(), [vec![1, 1, -1], vec![5]]);
    }
}
