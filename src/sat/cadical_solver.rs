use super::{
    sat_solver::SolvingResult, unit_propagator::UnitPropagator, Assignment, Literal,
    PropagationResult, SatSolver, SolvingListener,
};
use cadical::Solver as CadicalCSolver;

/// A wrapper around the Cadical SAT solver.
///
/// Clauses are mirrored in a propagation-only store to provide [`SatSolver::propagate`].
#[derive(Default)]
pub struct CadicalSolver {
    solver: CadicalCSolver,
    propagator: UnitPropagator,
    listeners: Vec<Box<dyn SolvingListener>>,
}

impl SatSolver for CadicalSolver {
    fn add_clause(&mut self, cl: Vec<Literal>) {
        self.propagator.add_clause(&cl);
        self.solver
            .add_clause(cl.into_iter().map(|l| isize::from(l) as i32))
    }

    fn solve(&mut self) -> SolvingResult {
        self.solve_under_assumptions(&[])
    }

    fn solve_under_assumptions(&mut self, assumptions: &[Literal]) -> SolvingResult {
        let n_vars = self.n_vars();
        let n_clauses = self.propagator.n_clauses();
        self.listeners
            .iter()
            .for_each(|l| l.solving_start(n_vars, n_clauses));
        let result = match self
            .solver
            .solve_with(assumptions.iter().map(|l| isize::from(*l) as i32))
        {
            Some(true) => {
                let assignment = Assignment::new(
                    (1..=self.solver.max_variable())
                        .map(|i| self.solver.value(i))
                        .collect(),
                );
                SolvingResult::Satisfiable(assignment)
            }
            Some(false) => SolvingResult::Unsatisfiable,
            None => SolvingResult::Unknown,
        };
        self.listeners.iter().for_each(|l| l.solving_end(&result));
        result
    }

    fn propagate(&mut self, assumptions: &[Literal]) -> PropagationResult {
        self.propagator.propagate(assumptions)
    }

    fn n_vars(&self) -> usize {
        self.solver.max_variable() as usize
    }

    fn add_listener(&mut self, listener: Box<dyn SolvingListener>) {
        self.listeners.push(listener);
    }
}
