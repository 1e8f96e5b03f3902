use crate::formula::{Clause, Formula, Variable};
use crate::{Model, SatResult};
use log::trace;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// DPLL: recursive backtracking search over partial assignments, with
/// pure-literal elimination and unit propagation as the simplification
/// rules. No clause learning, no watched literals; worst case is
/// exponential in the number of variables.
pub struct Solver {
    clauses: Vec<Clause>,
    num_variables: usize,
}

/// One branch of the search. Every recursive call owns its own copy, so a
/// tentative assignment in one branch can never leak into a sibling branch.
#[derive(Clone, Debug)]
struct SearchState {
    /// Clauses not yet proven true, already stripped of assigned literals.
    clauses: Vec<Clause>,
    /// Unassigned variables, in ascending index order.
    free: Vec<Variable>,
    /// The partial model built up along this branch.
    model: HashMap<Variable, bool>,
}

enum ClauseStatus {
    /// Some literal is already true under the partial model.
    Satisfied,
    /// Every literal is assigned and none is true.
    Conflict,
    /// What's left of the clause after dropping the assigned (false) literals.
    Residual(Clause),
}

fn evaluate(clause: &Clause, model: &HashMap<Variable, bool>) -> ClauseStatus {
    let mut residual = Vec::new();
    for literal in clause.literals() {
        match model.get(literal.variable()) {
            Some(&value) if literal.evaluate(value) => return ClauseStatus::Satisfied,
            Some(_) => {}
            None => residual.push(literal.clone()),
        }
    }
    if residual.is_empty() {
        // also covers a clause that was empty to begin with
        ClauseStatus::Conflict
    } else {
        ClauseStatus::Residual(Clause::new(residual))
    }
}

/// Assign every pure variable its satisfying polarity. A variable is pure if
/// all of its occurrences across the residual clauses share one polarity;
/// satisfying that polarity can never falsify a remaining clause.
fn assign_pure_literals(state: &mut SearchState) -> bool {
    let mut polarity: HashMap<Variable, Option<bool>> = HashMap::new();
    for clause in &state.clauses {
        for literal in clause.literals() {
            match polarity.entry(*literal.variable()) {
                Entry::Vacant(entry) => {
                    entry.insert(Some(literal.is_positive()));
                }
                Entry::Occupied(mut entry) => {
                    if *entry.get() != Some(literal.is_positive()) {
                        entry.insert(None);
                    }
                }
            }
        }
    }

    let model = &mut state.model;
    let mut assigned = false;
    state.free.retain(|variable| match polarity.get(variable) {
        Some(&Some(value)) => {
            trace!("pure literal: {} = {}", variable, value);
            model.insert(*variable, value);
            assigned = true;
            false
        }
        _ => true,
    });
    assigned
}

/// Propagate the first unit clause, if any. Only one per level; deeper
/// units fall out of the re-simplification on the next recursive call.
fn assign_unit_clause(state: &mut SearchState) -> bool {
    let unit = state.clauses.iter().find_map(|clause| {
        let mut literals = clause.literals();
        match (literals.next(), literals.next()) {
            (Some(literal), None) => Some(literal.clone()),
            _ => None,
        }
    });
    match unit {
        Some(literal) => {
            let variable = *literal.variable();
            trace!("unit clause: {} = {}", variable, literal.is_positive());
            state.model.insert(variable, literal.is_positive());
            state.free.retain(|v| *v != variable);
            true
        }
        None => false,
    }
}

impl Solver {
    pub fn new(formula: Formula) -> Self {
        let num_variables = formula.num_variables();
        Self {
            clauses: formula.into_clauses(),
            num_variables,
        }
    }

    pub fn solve(&self) -> SatResult {
        let root = SearchState {
            clauses: self.clauses.clone(),
            free: (0..self.num_variables).map(Variable).collect(),
            model: HashMap::new(),
        };
        self.dpll(root)
    }

    fn dpll(&self, mut state: SearchState) -> SatResult {
        // Simplify: drop satisfied clauses, strip falsified literals, and
        // bail out as soon as any clause has gone fully false.
        let mut residual = Vec::with_capacity(state.clauses.len());
        for clause in &state.clauses {
            match evaluate(clause, &state.model) {
                ClauseStatus::Satisfied => {}
                ClauseStatus::Conflict => {
                    trace!("conflict in {}", clause);
                    return SatResult::Unsatisfiable;
                }
                ClauseStatus::Residual(rest) => residual.push(rest),
            }
        }

        // Every clause proven true: the partial model already satisfies the
        // formula, so any completion of it does too.
        if residual.is_empty() {
            return SatResult::Satisfiable(self.complete(&state.model));
        }
        state.clauses = residual;

        let pure = assign_pure_literals(&mut state);
        let unit = assign_unit_clause(&mut state);
        if pure || unit {
            return self.dpll(state);
        }

        // Branch on the lowest free variable, false before true. Residual
        // clauses only mention free variables, so the free list is nonempty
        // here. The false branch gets its own copy of the state.
        let variable = state.free.remove(0);
        let mut tentative = state.clone();
        tentative.model.insert(variable, false);
        trace!("branch: {} = false", variable);
        match self.dpll(tentative) {
            SatResult::Unsatisfiable => {
                trace!("branch: {} = true", variable);
                state.model.insert(variable, true);
                self.dpll(state)
            }
            satisfiable => satisfiable,
        }
    }

    /// Extend a satisfying partial model to a total one. Variables the
    /// search never touched default to true; callers observe this, so it's
    /// part of the contract.
    fn complete(&self, model: &HashMap<Variable, bool>) -> Model {
        let values = (0..self.num_variables)
            .map(|index| model.get(&Variable(index)).copied().unwrap_or(true))
            .collect();
        Model::new(values)
    }
}
