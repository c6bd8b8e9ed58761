use super::ConstraintsEncoder;
use crate::{
    dynamics::{DynamicFramework, FrameworkMode},
    sat::SatSolver,
};

/// The encoder for conflict-freeness.
///
/// No accepted argument has an accepted attacker; self-attacking arguments are never accepted.
/// In dynamic mode, non-existing arguments are never accepted.
#[derive(Default)]
pub struct ConflictFreenessConstraintsEncoder;

impl ConstraintsEncoder for ConflictFreenessConstraintsEncoder {
    fn encode_constraints(&self, af: &DynamicFramework, solver: &mut dyn SatSolver) {
        let layout = af.layout();
        match layout.mode() {
            FrameworkMode::Static => {
                let structure = af.static_structure();
                af.iter_existing().for_each(|i| {
                    structure.attackers(i).iter().for_each(|a| {
                        if *a == i {
                            solver.add_clause(vec![layout.accepted(i).negate()]);
                        } else {
                            solver.add_clause(vec![
                                layout.accepted(i).negate(),
                                layout.accepted(*a).negate(),
                            ]);
                        }
                    })
                });
            }
            FrameworkMode::Dynamic => {
                let n = layout.n_indices();
                for i in 0..n {
                    solver.add_clause(vec![layout.arg_exists(i), layout.accepted(i).negate()]);
                }
                for i in 0..n {
                    for j in 0..n {
                        let mut cl = vec![
                            layout.att_exists(i, j).negate(),
                            layout.accepted(i).negate(),
                        ];
                        if i != j {
                            cl.push(layout.accepted(j).negate());
                        }
                        solver.add_clause(cl);
                    }
                }
            }
        }
    }
}
