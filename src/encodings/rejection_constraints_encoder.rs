use super::ConstraintsEncoder;
use crate::{
    dynamics::{DynamicFramework, FrameworkMode},
    sat::SatSolver,
};

/// The encoder defining the rejected arguments.
///
/// An argument is rejected iff it is attacked by an accepted argument.
/// A rejected argument is never accepted.
#[derive(Default)]
pub struct RejectionConstraintsEncoder;

impl ConstraintsEncoder for RejectionConstraintsEncoder {
    fn encode_constraints(&self, af: &DynamicFramework, solver: &mut dyn SatSolver) {
        let layout = af.layout();
        match layout.mode() {
            FrameworkMode::Static => {
                let structure = af.static_structure();
                af.iter_existing().for_each(|i| {
                    let rejected = layout.rejected(i);
                    solver.add_clause(vec![rejected.negate(), layout.accepted(i).negate()]);
                    let mut full_cl = vec![rejected.negate()];
                    structure.attackers(i).iter().for_each(|a| {
                        solver.add_clause(vec![rejected, layout.accepted(*a).negate()]);
                        full_cl.push(layout.accepted(*a));
                    });
                    solver.add_clause(full_cl);
                });
            }
            FrameworkMode::Dynamic => {
                let n = layout.n_indices();
                for i in 0..n {
                    let rejected = layout.rejected(i);
                    solver.add_clause(vec![rejected.negate(), layout.accepted(i).negate()]);
                    solver.add_clause(vec![layout.arg_exists(i), rejected.negate()]);
                    for j in 0..n {
                        let source_accepted = layout.source_accepted(i, j);
                        solver.add_clause(vec![layout.att_exists(i, j), source_accepted.negate()]);
                        solver.add_clause(vec![layout.accepted(i), source_accepted.negate()]);
                        solver.add_clause(vec![
                            layout.att_exists(i, j).negate(),
                            layout.accepted(i).negate(),
                            source_accepted,
                        ]);
                    }
                }
                for i in 0..n {
                    let rejected = layout.rejected(i);
                    let mut full_cl = vec![rejected.negate()];
                    for j in 0..n {
                        solver.add_clause(vec![rejected, layout.source_accepted(j, i).negate()]);
                        full_cl.push(layout.source_accepted(j, i));
                    }
                    solver.add_clause(full_cl);
                }
            }
        }
    }
}
