//! DIMACS CNF reading. Variables are 1-based on the wire and 0-based in
//! [`Formula`], so literal `-3` becomes `¬x2`.

use crate::formula::{Clause, Formula, Literal, Variable};
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::io::{BufRead, BufReader, Read};

pub fn parse<R: Read>(reader: R) -> Result<Formula, DimacsParseError> {
    let reader = BufReader::new(reader);

    let mut clauses = vec![];
    let mut num_variables = None;
    let mut num_clauses = None;

    for line in reader.lines() {
        let line = line?;
        let mut line = line.split_whitespace().peekable();

        match line.peek() {
            Some(&"c") | None => continue,
            Some(&"p") => {
                let _ = line.next();

                if line.next() != Some("cnf") {
                    return Err(DimacsParseError::Format("missing 'cnf'".into()));
                }

                num_variables = Some(
                    line.next()
                        .and_then(|c| c.parse::<usize>().ok())
                        .ok_or_else(|| DimacsParseError::Format("invalid variable count".into()))?,
                );

                num_clauses = Some(
                    line.next()
                        .and_then(|c| c.parse::<usize>().ok())
                        .ok_or_else(|| DimacsParseError::Format("invalid clause count".into()))?,
                );
            }
            Some(_) => {
                let expected = match num_clauses {
                    Some(n) => n,
                    None => {
                        return Err(DimacsParseError::Format(
                            "missing 'p' line before clauses".into(),
                        ))
                    }
                };

                let mut clause = vec![];
                for x in line {
                    match parse_literal(x)? {
                        Some(l) => clause.push(l),
                        None => break, // the 0 terminator
                    }
                }
                if !clause.is_empty() {
                    clauses.push(Clause::new(clause));
                }

                if clauses.len() >= expected {
                    break;
                }
            }
        }
    }

    let num_variables = num_variables
        .ok_or_else(|| DimacsParseError::Format("missing 'p' line before clauses".into()))?;

    let mut formula = Formula::new(clauses);
    // the header may declare variables that never occur in a clause
    formula.reserve_variables(num_variables);
    Ok(formula)
}

fn parse_literal(s: &str) -> Result<Option<Literal>, DimacsParseError> {
    let l = s
        .parse::<isize>()
        .map_err(|_| DimacsParseError::Format(format!("invalid literal '{}'", s)))?;
    if l > 0 {
        Ok(Some(Literal::Positive(Variable(l as usize - 1))))
    } else if l < 0 {
        Ok(Some(Literal::Negative(Variable(-l as usize - 1))))
    } else {
        Ok(None)
    }
}

#[derive(Debug)]
pub enum DimacsParseError {
    Io(std::io::Error),
    Format(String),
}

impl Display for DimacsParseError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            DimacsParseError::Io(e) => write!(f, "i/o error: {}", e),
            DimacsParseError::Format(msg) => write!(f, "invalid DIMACS: {}", msg),
        }
    }
}

impl Error for DimacsParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DimacsParseError::Io(e) => Some(e),
            DimacsParseError::Format(_) => None,
        }
    }
}

impl From<std::io::Error> for DimacsParseError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{n, p};
    use crate::{SatResult, Solver};

    #[test]
    fn parse_cnf_basic() {
        let cnf = "c  simple_v3_c2.cnf
c
p cnf 3 2
1 -3 0
2 3 -1 0";
        let f = parse(cnf.as_bytes()).expect("failed to parse");
        assert_eq!(f.clauses().count(), 2);
        assert_eq!(f.num_variables(), 3);

        assert_eq!(
            f.clauses().nth(0).unwrap().literals().cloned().collect::<Vec<_>>(),
            vec![p(0), n(2)]
        );
        assert_eq!(
            f.clauses().nth(1).unwrap().literals().cloned().collect::<Vec<_>>(),
            vec![p(1), p(2), n(0)]
        );
    }

    #[test]
    fn parse_header_declares_unused_variables() {
        let cnf = "p cnf 5 1
1 2 0";
        let f = parse(cnf.as_bytes()).expect("failed to parse");
        assert_eq!(f.num_variables(), 5);
    }

    #[test]
    fn parse_missing_header() {
        let cnf = "1 2 0";
        assert!(parse(cnf.as_bytes()).is_err());
    }

    #[test]
    fn parse_bad_literal() {
        let cnf = "p cnf 2 1
1 x 0";
        assert!(parse(cnf.as_bytes()).is_err());
    }

    #[test]
    fn solve_cnf_quinn() {
        let cnf = "c  quinn.cnf
c
p cnf 16 18
  1    2  0
 -2   -4  0
  3    4  0
 -4   -5  0
  5   -6  0
  6   -7  0
  6    7  0
  7  -16  0
  8   -9  0
 -8  -14  0
  9   10  0
  9  -10  0
-10  -11  0
 10   12  0
 11   12  0
 13   14  0
 14  -15  0
 15   16  0
";

        let f = parse(cnf.as_bytes()).expect("failed to parse");

        match Solver::new(f.clone()).solve() {
            SatResult::Satisfiable(model) => assert!(f.is_satisfied(model.values())),
            SatResult::Unsatisfiable => panic!("quinn.cnf is satisfiable"),
        }
    }
}
