use super::{
    AdmissibilityConstraintsEncoder, BaseConstraint, CompleteConstraintsEncoder,
    ConflictFreenessConstraintsEncoder, ConstraintsEncoder, EncodingOptions,
    RangeConstraintsEncoder, RangeKind, RejectionConstraintsEncoder, StableConstraintsEncoder,
};
use crate::{
    aa::Semantics,
    dynamics::DynamicFramework,
    sat::SatSolver,
};
use log::trace;

/// The encoder of the structural constraints of a semantics.
///
/// It composes the constraint encoders the semantics relies on, each of them being applied once.
/// For the maximal semantics (preferred, semi-stable and ideal), the constraints are the ones of their base;
/// maximality is obtained by the solvers.
/// A conflict-freeness base given for one of them is replaced by admissibility.
pub struct SemanticsEncoder {
    semantics: Semantics,
    options: EncodingOptions,
}

impl SemanticsEncoder {
    /// Builds the encoder for a semantics.
    pub fn new(semantics: Semantics, options: EncodingOptions) -> Self {
        Self { semantics, options }
    }

    fn base_encoders(base: BaseConstraint) -> Vec<Box<dyn ConstraintsEncoder>> {
        let mut encoders: Vec<Box<dyn ConstraintsEncoder>> = vec![
            Box::new(ConflictFreenessConstraintsEncoder),
            Box::new(RejectionConstraintsEncoder),
        ];
        if base != BaseConstraint::ConflictFreeness {
            encoders.push(Box::new(AdmissibilityConstraintsEncoder));
        }
        if base == BaseConstraint::Completeness {
            encoders.push(Box::new(CompleteConstraintsEncoder));
        }
        encoders
    }

    fn maximal_base(base: BaseConstraint) -> BaseConstraint {
        match base {
            BaseConstraint::ConflictFreeness => BaseConstraint::Admissibility,
            b => b,
        }
    }

    fn encoders(&self) -> Vec<Box<dyn ConstraintsEncoder>> {
        match self.semantics {
            Semantics::AD => Self::base_encoders(BaseConstraint::Admissibility),
            Semantics::CO => Self::base_encoders(BaseConstraint::Completeness),
            Semantics::ST => {
                let mut encoders = Self::base_encoders(self.options.stable_base);
                encoders.push(Box::new(StableConstraintsEncoder));
                encoders
            }
            Semantics::PR => Self::base_encoders(Self::maximal_base(self.options.preferred_base)),
            Semantics::ID => Self::base_encoders(Self::maximal_base(self.options.ideal_base)),
            Semantics::SST => {
                let mut encoders =
                    Self::base_encoders(Self::maximal_base(self.options.semi_stable_base));
                encoders.push(Box::new(RangeConstraintsEncoder::new(RangeKind::SemiStable)));
                encoders
            }
            Semantics::STG => {
                let mut encoders: Vec<Box<dyn ConstraintsEncoder>> = vec![
                    Box::new(ConflictFreenessConstraintsEncoder),
                    Box::new(RejectionConstraintsEncoder),
                ];
                encoders.push(Box::new(RangeConstraintsEncoder::new(RangeKind::Stage)));
                encoders
            }
        }
    }
}

impl ConstraintsEncoder for SemanticsEncoder {
    fn encode_constraints(&self, af: &DynamicFramework, solver: &mut dyn SatSolver) {
        let mode = af.layout().mode();
        trace!(
            "encoding {} constraints in {:?} mode over {} indices",
            self.semantics.as_ref(),
            mode,
            af.layout().n_indices()
        );
        self.encoders()
            .iter()
            .for_each(|e| e.encode_constraints(af, solver));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dynamics::FrameworkMode,
        encodings::test_utils::{framework, subsets},
        sat::default_solver,
    };

    fn count_models(af: &DynamicFramework, encoder: &SemanticsEncoder) -> usize {
        let mut solver = default_solver();
        encoder.encode_constraints(af, solver.as_mut());
        subsets(af)
            .iter()
            .filter(|set| {
                let mut assumptions = af.structure_assumptions();
                af.iter_existing().for_each(|i| {
                    assumptions.push(af.layout().accepted(i).with_polarity(set.contains(&i)))
                });
                solver
                    .solve_under_assumptions(&assumptions)
                    .unwrap_model()
                    .is_some()
            })
            .count()
    }

    #[test]
    fn test_stable_bases_agree() {
        let attacks = [(1, 2), (2, 1), (2, 3), (3, 4), (4, 3), (5, 5), (4, 5)];
        for mode in [FrameworkMode::Static, FrameworkMode::Dynamic] {
            let af = framework(mode, 5, &attacks);
            let counts = [
                BaseConstraint::ConflictFreeness,
                BaseConstraint::Admissibility,
                BaseConstraint::Completeness,
            ]
            .iter()
            .map(|b| {
                let options = EncodingOptions {
                    stable_base: *b,
                    ..Default::default()
                };
                count_models(&af, &SemanticsEncoder::new(Semantics::ST, options))
            })
            .collect::<Vec<usize>>();
            assert_eq!(vec![2, 2, 2], counts);
        }
    }

    #[test]
    fn test_base_constraints() {
        let attacks = [(1, 2), (2, 3)];
        for mode in [FrameworkMode::Static, FrameworkMode::Dynamic] {
            let af = framework(mode, 3, &attacks);
            let options = EncodingOptions::default();
            assert_eq!(3, count_models(&af, &SemanticsEncoder::new(Semantics::AD, options)));
            assert_eq!(1, count_models(&af, &SemanticsEncoder::new(Semantics::CO, options)));
            assert_eq!(3, count_models(&af, &SemanticsEncoder::new(Semantics::PR, options)));
            assert_eq!(1, count_models(&af, &SemanticsEncoder::new(Semantics::SST, options)));
            assert_eq!(5, count_models(&af, &SemanticsEncoder::new(Semantics::STG, options)));
        }
    }

    #[test]
    fn test_stage_defines_rejected_arguments() {
        for mode in [FrameworkMode::Static, FrameworkMode::Dynamic] {
            let af = framework(mode, 2, &[(1, 2)]);
            let layout = af.layout().clone();
            let mut solver = default_solver();
            SemanticsEncoder::new(Semantics::STG, EncodingOptions::default())
                .encode_constraints(&af, solver.as_mut());
            let with_structure = |lits: &[crate::sat::Literal]| {
                let mut assumptions = af.structure_assumptions();
                assumptions.extend_from_slice(lits);
                assumptions
            };
            assert!(solver
                .solve_under_assumptions(&with_structure(&[layout.rejected(0)]))
                .unwrap_model()
                .is_none());
            assert!(solver
                .solve_under_assumptions(&with_structure(&[
                    layout.accepted(0),
                    layout.rejected(1).negate()
                ]))
                .unwrap_model()
                .is_none());
            assert!(solver
                .solve_under_assumptions(&with_structure(&[layout.accepted(0), layout.rejected(1)]))
                .unwrap_model()
                .is_some());
        }
    }
}
