use std::fs;

use pretty_assertions::assert_eq;

use dimacsrs::dimacs::{read_dimacs, write_dimacs};
use dimacsrs::error::{Error, FormatError, PreconditionError};
use dimacsrs::literal::{max_variable, Clause};
use dimacsrs::translate::dimacs_to_formula;

#[test]
fn read_write_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.cnf");
    fs::write(
        &input,
        "c generated by hand
p cnf 6 3
1 -2 0
c interleaved
2 3 -6 0
-1 0
",
    )
    .unwrap();

    let problem = read_dimacs(&input).unwrap();
    assert_eq!(problem.variable_count(), 6);
    assert_eq!(problem.comments(), ["c generated by hand", "c interleaved"]);
    assert_eq!(problem.clauses().len(), problem.preamble().clauses);
    assert!(max_variable(problem.clauses()).unwrap() <= problem.variable_count());

    let output = dir.path().join("output.cnf");
    write_dimacs(problem.clauses(), &output).unwrap();
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "p cnf 6 3\n1 -2 0\n2 3 -6 0\n-1 0\n"
    );

    let reread = read_dimacs(&output).unwrap();
    assert_eq!(reread.clauses(), problem.clauses());
    assert!(reread.comments().is_empty());
}

#[test]
fn reduced_clause_list_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reduced.cnf");
    let clauses: Vec<Clause> = vec![vec![-3, 1], vec![2]];

    write_dimacs(&clauses, &path).unwrap();
    let problem = read_dimacs(&path).unwrap();

    assert_eq!(problem.variable_count(), 3);
    assert_eq!(problem.clauses(), clauses.as_slice());
}

#[test]
fn empty_clause_list_creates_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.cnf");

    let err = write_dimacs(&[], &path).unwrap_err();

    assert!(matches!(
        err,
        Error::Precondition(PreconditionError::EmptyClauseList)
    ));
    assert!(!path.exists());
}

#[test]
fn format_errors_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.cnf");
    fs::write(&path, "p cnf 3 3\n1 -2 0\n2 3 0\n").unwrap();

    let err = read_dimacs(&path).unwrap_err();

    assert!(matches!(
        err,
        Error::Format(FormatError::ClauseCountMismatch {
            declared: 3,
            actual: 2
        })
    ));
    assert_eq!(
        err.to_string(),
        "mismatch between declared clauses (3) and actual clauses (2)"
    );
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();

    assert!(matches!(
        read_dimacs(dir.path().join("missing.cnf")),
        Err(Error::Io(_))
    ));
}

#[test]
fn translate_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("problem.cnf");
    fs::write(&path, "p cnf 3 2\n1 -2 0\n2 3 0\n").unwrap();

    let (variable_count, clauses, comments) = read_dimacs(&path).unwrap().into_parts();
    let (formula, symbols) = dimacs_to_formula(variable_count, &clauses, &comments).unwrap();

    assert_eq!(symbols.len(), 3);
    let mut indices: Vec<_> = symbols.values().copied().collect();
    indices.sort_unstable();
    assert_eq!(indices, vec![1, 2, 3]);
    for (symbol, idx) in &symbols {
        assert!(symbol.name().starts_with(&format!("_dimacs_{idx}_")));
    }

    // And(Or(x1, Not(x2)), Or(x2, x3))
    assert_eq!(formula.size(), 8);
}
