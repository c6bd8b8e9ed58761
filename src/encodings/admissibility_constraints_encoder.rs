use super::ConstraintsEncoder;
use crate::{
    dynamics::{DynamicFramework, FrameworkMode},
    sat::SatSolver,
};

/// The encoder for admissibility.
///
/// Each attacker of an accepted argument must be rejected.
/// This encoder requires both the conflict-freeness and the rejection constraints.
#[derive(Default)]
pub struct AdmissibilityConstraintsEncoder;

impl ConstraintsEncoder for AdmissibilityConstraintsEncoder {
    fn encode_constraints(&self, af: &DynamicFramework, solver: &mut dyn SatSolver) {
        let layout = af.layout();
        match layout.mode() {
            FrameworkMode::Static => {
                let structure = af.static_structure();
                af.iter_existing()
                    .filter(|i| !structure.is_self_attacking(*i))
                    .for_each(|i| {
                        structure
                            .attackers(i)
                            .iter()
                            .filter(|a| !structure.is_symmetric(**a, i))
                            .for_each(|a| {
                                solver.add_clause(vec![
                                    layout.accepted(i).negate(),
                                    layout.rejected(*a),
                                ])
                            })
                    });
            }
            FrameworkMode::Dynamic => {
                let n = layout.n_indices();
                for i in 0..n {
                    for j in 0..n {
                        solver.add_clause(vec![
                            layout.att_exists(j, i).negate(),
                            layout.accepted(i).negate(),
                            layout.rejected(j),
                        ]);
                    }
                }
            }
        }
    }
}
