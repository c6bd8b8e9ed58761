use super::ConstraintsEncoder;
use crate::{
    dynamics::{DynamicFramework, FrameworkMode},
    sat::SatSolver,
};

/// The encoder for completeness.
///
/// An existing argument whose attackers are all rejected must be accepted.
/// This encoder requires the admissibility constraints and their prerequisites.
#[derive(Default)]
pub struct CompleteConstraintsEncoder;

impl ConstraintsEncoder for CompleteConstraintsEncoder {
    fn encode_constraints(&self, af: &DynamicFramework, solver: &mut dyn SatSolver) {
        let layout = af.layout();
        match layout.mode() {
            FrameworkMode::Static => {
                let structure = af.static_structure();
                af.iter_existing().for_each(|i| {
                    let mut cl = vec![layout.accepted(i)];
                    structure
                        .attackers(i)
                        .iter()
                        .for_each(|a| cl.push(layout.rejected(*a).negate()));
                    solver.add_clause(cl);
                });
            }
            FrameworkMode::Dynamic => {
                let n = layout.n_indices();
                for i in 0..n {
                    for j in 0..n {
                        let source_rejected = layout.source_rejected(i, j);
                        solver.add_clause(vec![layout.att_exists(i, j), source_rejected]);
                        solver.add_clause(vec![layout.rejected(i).negate(), source_rejected]);
                        solver.add_clause(vec![
                            layout.att_exists(i, j).negate(),
                            layout.rejected(i),
                            source_rejected.negate(),
                        ]);
                    }
                }
                for i in 0..n {
                    let mut cl = vec![layout.arg_exists(i).negate(), layout.accepted(i)];
                    for j in 0..n {
                        cl.push(layout.source_rejected(j, i).negate());
                    }
                    solver.add_clause(cl);
                }
            }
        }
    }
}
