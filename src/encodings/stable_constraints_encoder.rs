use super::ConstraintsEncoder;
use crate::{
    dynamics::{DynamicFramework, FrameworkMode},
    sat::SatSolver,
};

/// The encoder for the totality of stable extensions.
///
/// Each existing argument must be either accepted or rejected.
/// This encoder requires the rejection constraints.
#[derive(Default)]
pub struct StableConstraintsEncoder;

impl ConstraintsEncoder for StableConstraintsEncoder {
    fn encode_constraints(&self, af: &DynamicFramework, solver: &mut dyn SatSolver) {
        let layout = af.layout();
        match layout.mode() {
            FrameworkMode::Static => af.iter_existing().for_each(|i| {
                solver.add_clause(vec![layout.accepted(i), layout.rejected(i)]);
            }),
            FrameworkMode::Dynamic => (0..layout.n_indices()).for_each(|i| {
                solver.add_clause(vec![
                    layout.arg_exists(i).negate(),
                    layout.accepted(i),
                    layout.rejected(i),
                ]);
            }),
        }
    }
}
