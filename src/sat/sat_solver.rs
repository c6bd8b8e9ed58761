use super::cadical_solver::CadicalSolver;
use std::{
    fmt::Display,
    num::{NonZeroIsize, NonZeroUsize},
};

/// A variable in a SAT solver.
///
/// A variable is represented by a non-null positive integer.
/// It can be obtained through the [From] trait from an integer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable(NonZeroUsize);

macro_rules! impl_var_from {
    ($t: ty) => {
        impl From<$t> for Variable {
            fn from(v: $t) -> Self {
                Self(NonZeroUsize::try_from(v as usize).unwrap())
            }
        }
    };
}
impl_var_from!(usize);
impl_var_from!(u64);
impl_var_from!(u32);

macro_rules! impl_var_from_neg {
    ($t: ty) => {
        impl From<$t> for Variable {
            fn from(v: $t) -> Self {
                if v < 0 {
                    panic!("cannot build a variable from a negative integer")
                }
                Self(NonZeroUsize::try_from(v as usize).unwrap())
            }
        }
    };
}
impl_var_from_neg!(isize);
impl_var_from_neg!(i64);
impl_var_from_neg!(i32);

impl From<Variable> for usize {
    fn from(v: Variable) -> Self {
        v.0.into()
    }
}

impl From<Variable> for Literal {
    fn from(v: Variable) -> Self {
        Literal::from(usize::from(v) as isize)
    }
}

/// A literal in a SAT solver.
///
/// A literal is represented by a non-null integer.
/// It can be obtained through the [From] trait from a signed integer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Literal(NonZeroIsize);

impl Literal {
    /// Returns the opposite literal.
    pub fn negate(self) -> Self {
        Self::from(-self.0.get())
    }

    /// Returns the variable of this literal.
    pub fn var(&self) -> Variable {
        Variable(self.0.unsigned_abs())
    }

    /// Returns `true` iff this literal asserts its variable is true.
    pub fn is_positive(&self) -> bool {
        self.0.get() > 0
    }

    /// Returns this literal or its negation depending on the provided polarity.
    pub fn with_polarity(self, positive: bool) -> Self {
        if positive {
            self
        } else {
            self.negate()
        }
    }
}

macro_rules! impl_lit_from {
    ($t: ty) => {
        impl From<$t> for Literal {
            fn from(l: $t) -> Self {
                Self(NonZeroIsize::try_from(l as isize).unwrap())
            }
        }
    };
}
impl_lit_from!(isize);
impl_lit_from!(i64);
impl_lit_from!(i32);

impl From<Literal> for isize {
    fn from(l: Literal) -> Self {
        l.0.into()
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Builds a clause from a list of integers.
#[macro_export]
macro_rules! clause {
    () => (
        vec![] as Vec<Literal>
    );
    ($($x:expr),+ $(,)?) => (
        [$($x),+].into_iter().map(Literal::from).collect::<Vec<Literal>>()
    );
}

/// An assignment of a set of variables.
///
/// Inside the set of variables involved in the assignment, some may be unassigned.
/// This is the reason why accessors to assigned value returns an [Option<bool>].
/// Variables beyond the ones known by the solver are considered unassigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment(Vec<Option<bool>>);

impl Assignment {
    pub(crate) fn new(assignment: Vec<Option<bool>>) -> Self {
        Self(assignment)
    }

    /// Returns the value potentially assigned to the variable.
    ///
    /// The result in an [Option].
    /// In case the variable is not assigned, [Option::None] is returned.
    /// Else, [Option::Some] is returned and contains the assigned value.
    pub fn value_of<T>(&self, v: T) -> Option<bool>
    where
        T: Into<Variable>,
    {
        self.0.get(usize::from(v.into()) - 1).copied().flatten()
    }

    /// Returns the truth value of a literal under this assignment, if its variable is assigned.
    pub fn value_of_literal(&self, l: Literal) -> Option<bool> {
        self.value_of(l.var()).map(|b| b == l.is_positive())
    }

    /// Returns `true` iff the literal is assigned to true.
    pub fn is_true(&self, l: Literal) -> bool {
        self.value_of_literal(l) == Some(true)
    }

    pub(crate) fn iter(&self) -> AssignmentIterator {
        AssignmentIterator {
            assignment: self,
            next: 0,
        }
    }
}

pub(crate) struct AssignmentIterator<'a> {
    assignment: &'a Assignment,
    next: usize,
}

impl Iterator for AssignmentIterator<'_> {
    type Item = (usize, Option<bool>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next == self.assignment.0.len() {
            None
        } else {
            self.next += 1;
            Some((self.next, self.assignment.0[self.next - 1]))
        }
    }
}

/// The result of a call to a SAT solver.
#[derive(Debug, PartialEq, Eq)]
pub enum SolvingResult {
    /// The formula is satisfiable; a model is given.
    Satisfiable(Assignment),
    /// The formula is unsatisfiable.
    Unsatisfiable,
    /// The solver could not decide.
    Unknown,
}

impl SolvingResult {
    /// Returns the underlying model if it exists, or [Option::None].
    ///
    /// # Panics
    ///
    /// If the solving result is set [SolvingResult::Unknown], this function panics.
    pub fn unwrap_model(self) -> Option<Assignment> {
        match self {
            SolvingResult::Satisfiable(assignment) => Some(assignment),
            SolvingResult::Unsatisfiable => None,
            SolvingResult::Unknown => {
                panic!(r#"cannot unwrap solving result when the solver returned "Unknown""#)
            }
        }
    }

    /// Returns the underlying model if it exists, considering an unknown result as the absence of model.
    pub fn model(self) -> Option<Assignment> {
        match self {
            SolvingResult::Satisfiable(assignment) => Some(assignment),
            SolvingResult::Unsatisfiable | SolvingResult::Unknown => None,
        }
    }
}

/// The result of a propagation under assumptions.
#[derive(Debug, PartialEq, Eq)]
pub enum PropagationResult {
    /// The assumptions lead to a conflict.
    Conflict,
    /// The propagation succeeded; the literals forced by the clauses and the assumptions are returned, ordered by variable.
    Propagated(Vec<Literal>),
}

/// A trait for objects listening to SAT solvers events.
pub trait SolvingListener {
    /// Called when a SAT solver starts a search.
    fn solving_start(&self, n_vars: usize, n_clauses: usize);

    /// Called when a SAT solver ends a search.
    fn solving_end(&self, result: &SolvingResult);
}

/// A trait for SAT solvers.
pub trait SatSolver {
    /// Adds a clause to this solver.
    fn add_clause(&mut self, cl: Vec<Literal>);

    /// Solves the problem formed by the clauses added so far.
    fn solve(&mut self) -> SolvingResult;

    /// Solves the problem formed by the clauses added so far and the provided assumptions.
    fn solve_under_assumptions(&mut self, assumptions: &[Literal]) -> SolvingResult;

    /// Applies unit propagation on the clauses added so far and the provided assumptions, without any search.
    fn propagate(&mut self, assumptions: &[Literal]) -> PropagationResult;

    /// Returns the highest variable index involved in a clause so far.
    fn n_vars(&self) -> usize;

    /// Adds a listener to this solver.
    fn add_listener(&mut self, listener: Box<dyn SolvingListener>);
}

/// A factory for SAT solvers.
///
/// Solvers that must be rebuilt from scratch request a new instance to their factory.
pub trait SatSolverFactory {
    /// Returns a new SAT solver.
    fn new_solver(&self) -> Box<dyn SatSolver>;
}

/// The factory of the default SAT solver.
#[derive(Default)]
pub struct DefaultSatSolverFactory;

impl SatSolverFactory for DefaultSatSolverFactory {
    fn new_solver(&self) -> Box<dyn SatSolver> {
        default_solver()
    }
}

/// The default SAT solver (Cadical).
pub fn default_solver() -> Box<dyn SatSolver> {
    Box::new(CadicalSolver::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_from_pos() {
        let v = Variable::from(1);
        assert_eq!(1, usize::from(v))
    }

    #[test]
    #[allow(unused_must_use)]
    #[should_panic]
    fn test_var_from_null() {
        Variable::from(0);
    } // kcov-ignore

    #[test]
    #[allow(unused_must_use)]
    #[should_panic]
    fn test_var_from_neg() {
        Variable::from(-1);
    } // kcov-ignore

    #[test]
    fn test_lit_from_neg() {
        let l = Literal::from(-1);
        assert_eq!(-1, isize::from(l));
        assert!(!l.is_positive());
    }

    #[test]
    fn test_lit_polarity() {
        let l = Literal::from(3);
        assert_eq!(l, l.with_polarity(true));
        assert_eq!(Literal::from(-3), l.with_polarity(false));
        assert_eq!(l, Literal::from(Variable::from(3)));
    }

    #[test]
    fn test_negate_lit() {
        assert_eq!(Literal::from(-1), Literal::from(1).negate());
        assert_eq!(Literal::from(1), Literal::from(-1).negate());
    }

    #[test]
    fn test_assignment_values() {
        let assignment = Assignment::new(vec![Some(true), Some(false), None]);
        assert_eq!(Some(true), assignment.value_of(1));
        assert_eq!(Some(false), assignment.value_of(2));
        assert_eq!(None, assignment.value_of(3));
        assert_eq!(None, assignment.value_of(4));
        assert!(assignment.is_true(Literal::from(-2)));
        assert!(!assignment.is_true(Literal::from(2)));
        assert!(!assignment.is_true(Literal::from(3)));
        assert_eq!(
            vec![(1, Some(true)), (2, Some(false)), (3, None)],
            assignment.iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_solving_result_unwrap_model_none() {
        assert_eq!(None, SolvingResult::Unsatisfiable.unwrap_model());
    }

    #[test]
    #[should_panic]
    fn test_solving_result_unwrap_model_unknown() {
        SolvingResult::Unknown.unwrap_model();
    } // kcov-ignore

    #[test]
    fn test_solving_result_model_unknown() {
        assert_eq!(None, SolvingResult::Unknown.model());
    }
}
