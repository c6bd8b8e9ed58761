use crate::{
    aa::Semantics,
    dynamics::{DynamicFramework, VariableLayout},
    encodings::{encode_conjunction, ConstraintsEncoder, EncodingOptions, SemanticsEncoder},
    sat::{Assignment, Literal, SatSolver, SatSolverFactory},
};
use log::debug;

/// A SAT solver loaded with the constraints of a semantics for a given variable layout.
///
/// Fresh variables (targets, selectors) are allocated above the variables of the layout.
pub(crate) struct OracleSession {
    solver: Box<dyn SatSolver>,
    semantics: Semantics,
    layout_version: usize,
    next_var: usize,
}

impl OracleSession {
    pub(crate) fn new(
        factory: &dyn SatSolverFactory,
        af: &DynamicFramework,
        semantics: Semantics,
        options: EncodingOptions,
    ) -> Self {
        let layout = af.layout();
        debug!(
            "building a SAT oracle for {} ({:?} mode, {} indices, {} arguments)",
            semantics.as_ref(),
            layout.mode(),
            layout.n_indices(),
            af.n_arguments()
        );
        let mut solver = factory.new_solver();
        SemanticsEncoder::new(semantics, options).encode_constraints(af, solver.as_mut());
        Self {
            solver,
            semantics,
            layout_version: layout.version(),
            next_var: layout.n_vars() + 1,
        }
    }

    pub(crate) fn semantics(&self) -> Semantics {
        self.semantics
    }

    /// Returns `true` iff the clauses of this session match the semantics and the layout.
    pub(crate) fn is_valid_for(&self, semantics: Semantics, layout: &VariableLayout) -> bool {
        self.semantics == semantics && self.layout_version == layout.version()
    }

    pub(crate) fn fresh_literal(&mut self) -> Literal {
        let l = Literal::from(self.next_var as isize);
        self.next_var += 1;
        l
    }

    pub(crate) fn add_clause(&mut self, cl: Vec<Literal>) {
        self.solver.add_clause(cl)
    }

    /// Solves under assumptions, considering an unknown result as unsatisfiable.
    pub(crate) fn solve(&mut self, assumptions: &[Literal]) -> Option<Assignment> {
        self.solver.solve_under_assumptions(assumptions).model()
    }

    /// Encodes the conjunction of the literals, allocating a fresh variable if needed.
    pub(crate) fn encode_target(&mut self, lits: &[Literal]) -> Option<Literal> {
        let next_var = &mut self.next_var;
        encode_conjunction(lits, self.solver.as_mut(), || {
            let l = Literal::from(*next_var as isize);
            *next_var += 1;
            l
        })
    }

    /// Definitively disables the clauses guarded by a selector.
    pub(crate) fn retire_selector(&mut self, selector: Literal) {
        self.solver.add_clause(vec![selector]);
    }
}
