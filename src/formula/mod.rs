pub mod dimacs;

use rand::Rng;
use std::error::Error;
use std::fmt::{self, Display, Formatter};

#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub struct Variable(pub usize);

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Literal {
    Positive(Variable),
    Negative(Variable),
}

impl Literal {
    pub fn variable(&self) -> &Variable {
        match self {
            Literal::Positive(v) => v,
            Literal::Negative(v) => v,
        }
    }

    pub fn is_positive(&self) -> bool {
        match self {
            Literal::Positive(_) => true,
            Literal::Negative(_) => false,
        }
    }

    pub fn idx(&self) -> usize {
        self.variable().0
    }

    pub fn negated(&self) -> Self {
        match self {
            Literal::Positive(v) => Literal::Negative(*v),
            Literal::Negative(v) => Literal::Positive(*v),
        }
    }

    /// Whether this literal is true when its variable takes `value`.
    pub fn evaluate(&self, value: bool) -> bool {
        value == self.is_positive()
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Literal::Positive(v) => write!(f, "{}", v),
            Literal::Negative(v) => write!(f, "¬{}", v),
        }
    }
}

/// A disjunction of literals. Duplicate literals are allowed; OR is
/// idempotent, so they're harmless and we don't spend time deduplicating.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub fn new(disjuncts: impl IntoIterator<Item = Literal>) -> Self {
        Self {
            literals: disjuncts.into_iter().collect(),
        }
    }

    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// An empty clause is an empty disjunction, i.e. identically false.
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("(")?;
        let mut first = true;
        for literal in &self.literals {
            if first {
                first = false;
            } else {
                f.write_str(" ∨ ")?;
            }
            write!(f, "{}", literal)?;
        }
        f.write_str(")")
    }
}

/// Malformed input to [`Formula::add_clause`]: the two parallel slices
/// describing the clause disagree in length.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct InvalidLiteral {
    pub indices: usize,
    pub polarities: usize,
}

impl Display for InvalidLiteral {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "clause has {} variable indices but {} polarities",
            self.indices, self.polarities
        )
    }
}

impl Error for InvalidLiteral {}

/// A conjunction of clauses. Variables are numbered densely from 0;
/// `num_variables` tracks the highest index that has ever appeared, plus one.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct Formula {
    clauses: Vec<Clause>,
    num_variables: usize,
}

impl Formula {
    pub fn new(conjuncts: impl IntoIterator<Item = Clause>) -> Self {
        let clauses: Vec<Clause> = conjuncts.into_iter().collect();
        let num_variables = clauses
            .iter()
            .flat_map(|clause| clause.literals())
            .map(|literal| literal.idx() + 1)
            .max()
            .unwrap_or(0);
        Self {
            clauses,
            num_variables,
        }
    }

    /// Append a clause given as parallel slices: a variable index for each
    /// literal, and `true` if the literal is the variable itself (rather
    /// than its negation). Grows `num_variables` to cover every index used.
    pub fn add_clause(&mut self, indices: &[usize], polarities: &[bool]) -> Result<(), InvalidLiteral> {
        if indices.len() != polarities.len() {
            return Err(InvalidLiteral {
                indices: indices.len(),
                polarities: polarities.len(),
            });
        }
        let literals = indices.iter().zip(polarities).map(|(&index, &positive)| {
            if positive {
                Literal::Positive(Variable(index))
            } else {
                Literal::Negative(Variable(index))
            }
        });
        let clause = Clause::new(literals);
        for literal in clause.literals() {
            if literal.idx() + 1 > self.num_variables {
                self.num_variables = literal.idx() + 1;
            }
        }
        self.clauses.push(clause);
        Ok(())
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    /// Grow `num_variables` to at least `count`, for sources (like a DIMACS
    /// header) that declare more variables than actually occur in clauses.
    pub fn reserve_variables(&mut self, count: usize) {
        if count > self.num_variables {
            self.num_variables = count;
        }
    }

    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    pub(crate) fn into_clauses(self) -> Vec<Clause> {
        self.clauses
    }

    /// Whether a total assignment (one value per variable, indexed by
    /// variable number) makes every clause true. Each clause short-circuits
    /// on its first true literal; the empty formula is trivially satisfied.
    pub fn is_satisfied(&self, assignment: &[bool]) -> bool {
        self.clauses.iter().all(|clause| {
            clause
                .literals()
                .any(|literal| literal.evaluate(assignment[literal.idx()]))
        })
    }

    /// Generate `num_clauses` random 3-literal clauses, indices drawn with
    /// replacement from `0..num_variables`, each polarity an independent
    /// coin flip. The caller supplies the generator, so one seeded rng can
    /// be threaded through a whole reproducible run.
    pub fn random_3cnf<R: Rng>(num_variables: usize, num_clauses: usize, rng: &mut R) -> Self {
        let mut formula = Formula::default();
        let mut indices = [0usize; 3];
        let mut polarities = [false; 3];
        for _ in 0..num_clauses {
            for k in 0..3 {
                indices[k] = rng.gen_range(0, num_variables);
                polarities[k] = rng.gen();
            }
            formula
                .add_clause(&indices, &polarities)
                .expect("three indices and three polarities");
        }
        formula
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let mut first = true;
        for clause in &self.clauses {
            if first {
                first = false;
            } else {
                f.write_str(" ∧ ")?;
            }
            write!(f, "{}", clause)?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn p(x: usize) -> Literal {
    Literal::Positive(Variable(x))
}

#[cfg(test)]
pub(crate) fn n(x: usize) -> Literal {
    Literal::Negative(Variable(x))
}

#[cfg(test)]
pub(crate) fn formula_3sat_strategy() -> impl proptest::strategy::Strategy<Value = Formula> {
    use proptest::prelude::*;

    const MAX_VARS: usize = 8;
    let literal = (0..MAX_VARS, any::<bool>())
        .prop_map(|(index, positive)| if positive { p(index) } else { n(index) });
    let clause = proptest::collection::vec(literal, 3).prop_map(Clause::new);
    proptest::collection::vec(clause, 1..16).prop_map(Formula::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn literal_accessors() {
        assert_eq!(p(3).idx(), 3);
        assert!(p(3).is_positive());
        assert!(!n(3).is_positive());
        assert_eq!(p(3).negated(), n(3));
        assert_eq!(n(3).negated(), p(3));
        assert!(p(0).evaluate(true));
        assert!(!p(0).evaluate(false));
        assert!(n(0).evaluate(false));
    }

    #[test]
    fn add_clause_tracks_variable_count() {
        let mut f = Formula::default();
        assert_eq!(f.num_variables(), 0);

        f.add_clause(&[0, 2], &[true, false]).unwrap();
        assert_eq!(f.num_variables(), 3);

        f.add_clause(&[1], &[true]).unwrap();
        assert_eq!(f.num_variables(), 3);

        f.add_clause(&[5], &[false]).unwrap();
        assert_eq!(f.num_variables(), 6);
        assert_eq!(f.clauses().count(), 3);
    }

    #[test]
    fn add_clause_length_mismatch() {
        let mut f = Formula::default();
        let err = f.add_clause(&[0, 1, 2], &[true, false]).unwrap_err();
        assert_eq!(
            err,
            InvalidLiteral {
                indices: 3,
                polarities: 2
            }
        );
        // the bad clause must not be recorded
        assert_eq!(f.clauses().count(), 0);
        assert_eq!(f.num_variables(), 0);
    }

    #[test]
    fn satisfied_empty_formula() {
        let f = Formula::default();
        assert!(f.is_satisfied(&[]));
    }

    #[test]
    fn empty_clause_never_satisfied() {
        let f = Formula::new(vec![Clause::new(vec![])]);
        assert!(!f.is_satisfied(&[]));
    }

    #[test]
    fn satisfied_book_example() {
        // (x0 ∨ x0 ∨ x1) ∧ (¬x0 ∨ ¬x1 ∨ ¬x1) ∧ (¬x0 ∨ x1 ∨ x1)
        let f = Formula::new(vec![
            Clause::new(vec![p(0), p(0), p(1)]),
            Clause::new(vec![n(0), n(1), n(1)]),
            Clause::new(vec![n(0), p(1), p(1)]),
        ]);

        assert!(!f.is_satisfied(&[false, false]));
        assert!(f.is_satisfied(&[false, true]));
        assert!(f.is_satisfied(&[true, false]));
        assert!(!f.is_satisfied(&[true, true]));
    }

    #[test]
    fn display_rendering() {
        let f = Formula::new(vec![Clause::new(vec![p(0), n(1), p(2)]), Clause::new(vec![n(0)])]);
        assert_eq!(format!("{}", f), "(x0 ∨ ¬x1 ∨ x2) ∧ (¬x0)");
    }

    #[test]
    fn random_3cnf_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        let f = Formula::random_3cnf(5, 12, &mut rng);
        assert_eq!(f.clauses().count(), 12);
        for clause in f.clauses() {
            assert_eq!(clause.len(), 3);
            for literal in clause.literals() {
                assert!(literal.idx() < 5);
            }
        }
    }

    #[test]
    fn random_3cnf_reproducible() {
        let mut rng1 = StdRng::seed_from_u64(7);
        let mut rng2 = StdRng::seed_from_u64(7);
        let f1 = Formula::random_3cnf(6, 20, &mut rng1);
        let f2 = Formula::random_3cnf(6, 20, &mut rng2);
        assert_eq!(f1, f2);
    }

    #[test]
    fn random_3cnf_seeds_differ() {
        let mut rng1 = StdRng::seed_from_u64(7);
        let mut rng2 = StdRng::seed_from_u64(8);
        let f1 = Formula::random_3cnf(6, 20, &mut rng1);
        let f2 = Formula::random_3cnf(6, 20, &mut rng2);
        assert_ne!(f1, f2);
    }
}
