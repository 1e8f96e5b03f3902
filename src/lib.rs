pub mod brute_force;
pub mod formula;
mod solver;

pub use brute_force::{BruteForceSolver, ProblemTooLarge};
pub use formula::{Clause, Formula, InvalidLiteral, Literal, Variable};
pub use solver::Solver;

/// A total assignment: one Boolean per variable, indexed by variable number.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Model(Vec<bool>);

impl Model {
    pub fn new(values: Vec<bool>) -> Self {
        Self(values)
    }

    pub fn value(&self, variable: Variable) -> bool {
        self.0[variable.0]
    }

    pub fn values(&self) -> &[bool] {
        &self.0
    }
}

/// The outcome of solving. Unsatisfiability is a first-class result, not an
/// error and not a sentinel: a caller can't mistake it for a missing model.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum SatResult {
    Satisfiable(Model),
    Unsatisfiable,
}

impl SatResult {
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, SatResult::Satisfiable(_))
    }

    pub fn model(&self) -> Option<&Model> {
        match self {
            SatResult::Satisfiable(model) => Some(model),
            SatResult::Unsatisfiable => None,
        }
    }
}
