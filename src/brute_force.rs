use crate::formula::Formula;
use crate::{Model, SatResult};
use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// Past this many variables the 2^N sweep stops being a reasonable oracle.
pub const DEFAULT_VARIABLE_LIMIT: usize = 24;

/// The formula has more variables than this solver is willing to enumerate.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ProblemTooLarge {
    pub num_variables: usize,
    pub limit: usize,
}

impl Display for ProblemTooLarge {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "formula has {} variables, brute-force limit is {}",
            self.num_variables, self.limit
        )
    }
}

impl Error for ProblemTooLarge {}

/// Exhaustive search over all 2^N total assignments. Exponential with no
/// early-termination heuristics, so it refuses formulas above a variable
/// ceiling; useful as a correctness oracle for the DPLL solver on small
/// instances, not for production solving.
pub struct BruteForceSolver {
    formula: Formula,
    variable_limit: usize,
}

impl BruteForceSolver {
    pub fn new(formula: Formula) -> Self {
        Self::with_variable_limit(formula, DEFAULT_VARIABLE_LIMIT)
    }

    pub fn with_variable_limit(formula: Formula, variable_limit: usize) -> Self {
        Self {
            formula,
            variable_limit,
        }
    }

    /// Depth-first enumeration in index order, `false` before `true` at each
    /// position, stopping at the first satisfying assignment. One assignment
    /// buffer is reused across the whole recursion, so auxiliary space is
    /// O(N) even though the search space is 2^N.
    pub fn solve(&self) -> Result<SatResult, ProblemTooLarge> {
        let num_variables = self.formula.num_variables();
        if num_variables > self.variable_limit {
            return Err(ProblemTooLarge {
                num_variables,
                limit: self.variable_limit,
            });
        }

        let mut assignment = vec![false; num_variables];
        if self.search(&mut assignment, 0) {
            Ok(SatResult::Satisfiable(Model::new(assignment)))
        } else {
            Ok(SatResult::Unsatisfiable)
        }
    }

    fn search(&self, assignment: &mut Vec<bool>, index: usize) -> bool {
        if index == assignment.len() {
            return self.formula.is_satisfied(assignment);
        }
        assignment[index] = false;
        if self.search(assignment, index + 1) {
            return true;
        }
        assignment[index] = true;
        self.search(assignment, index + 1)
    }
}
