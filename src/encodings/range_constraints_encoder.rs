use super::ConstraintsEncoder;
use crate::{
    dynamics::{DynamicFramework, FrameworkMode},
    sat::SatSolver,
};

/// The definition of the range variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeKind {
    /// The range is the union of the accepted and the rejected arguments.
    ///
    /// Requires the rejection constraints.
    SemiStable,
    /// The range is the union of the accepted arguments and the arguments they attack.
    ///
    /// In static mode, the range is defined directly from the attacks.
    /// In dynamic mode, it relies on the rejection constraints like the semi-stable one.
    Stage,
}

/// The encoder defining the range of the accepted arguments.
///
/// The range variables of existing arguments are set equivalent to the membership to the range.
pub struct RangeConstraintsEncoder {
    kind: RangeKind,
}

impl RangeConstraintsEncoder {
    /// Builds an encoder for the given range definition.
    pub fn new(kind: RangeKind) -> Self {
        Self { kind }
    }

    fn encode_union(&self, af: &DynamicFramework, solver: &mut dyn SatSolver, i: usize) {
        let layout = af.layout();
        let range = layout.range(i);
        solver.add_clause(vec![range, layout.accepted(i).negate()]);
        solver.add_clause(vec![range, layout.rejected(i).negate()]);
        solver.add_clause(vec![range.negate(), layout.accepted(i), layout.rejected(i)]);
    }
}

impl ConstraintsEncoder for RangeConstraintsEncoder {
    fn encode_constraints(&self, af: &DynamicFramework, solver: &mut dyn SatSolver) {
        let layout = af.layout();
        match (layout.mode(), self.kind) {
            (FrameworkMode::Static, RangeKind::SemiStable) => af
                .iter_existing()
                .for_each(|i| self.encode_union(af, solver, i)),
            (FrameworkMode::Static, RangeKind::Stage) => {
                let structure = af.static_structure();
                af.iter_existing().for_each(|i| {
                    let range = layout.range(i);
                    solver.add_clause(vec![range, layout.accepted(i).negate()]);
                    let mut full_cl = vec![range.negate(), layout.accepted(i)];
                    structure.attackers(i).iter().for_each(|a| {
                        solver.add_clause(vec![range, layout.accepted(*a).negate()]);
                        full_cl.push(layout.accepted(*a));
                    });
                    solver.add_clause(full_cl);
                });
            }
            (FrameworkMode::Dynamic, _) => {
                (0..layout.n_indices()).for_each(|i| self.encode_union(af, solver, i))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        encodings::{
            test_utils::{framework, is_conflict_free, range_of, subsets},
            ConflictFreenessConstraintsEncoder, RejectionConstraintsEncoder,
        },
        sat::default_solver,
    };

    fn assert_range(mode: FrameworkMode, kind: RangeKind) {
        let af = framework(mode, 4, &[(1, 2), (2, 3), (3, 3), (4, 1)]);
        let layout = af.layout().clone();
        let mut solver = default_solver();
        ConflictFreenessConstraintsEncoder.encode_constraints(&af, solver.as_mut());
        RejectionConstraintsEncoder.encode_constraints(&af, solver.as_mut());
        RangeConstraintsEncoder::new(kind).encode_constraints(&af, solver.as_mut());
        for set in subsets(&af) {
            let mut assumptions = af.structure_assumptions();
            af.iter_existing()
                .for_each(|i| assumptions.push(layout.accepted(i).with_polarity(set.contains(&i))));
            match solver.solve_under_assumptions(&assumptions).unwrap_model() {
                Some(model) => {
                    let range = range_of(&af, &set);
                    af.iter_existing().for_each(|i| {
                        assert_eq!(range.contains(&i), model.is_true(layout.range(i)))
                    });
                }
                None => assert!(!is_conflict_free(&af, &set)),
            }
        }
    }

    #[test]
    fn test_semi_stable_range() {
        assert_range(FrameworkMode::Static, RangeKind::SemiStable);
        assert_range(FrameworkMode::Dynamic, RangeKind::SemiStable);
    }

    #[test]
    fn test_stage_range() {
        assert_range(FrameworkMode::Static, RangeKind::Stage);
        assert_range(FrameworkMode::Dynamic, RangeKind::Stage);
    }
}
