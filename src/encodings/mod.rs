//! Objects used to encode semantics into SAT solvers.

mod admissibility_constraints_encoder;
pub use admissibility_constraints_encoder::AdmissibilityConstraintsEncoder;

mod complete_constraints_encoder;
pub use complete_constraints_encoder::CompleteConstraintsEncoder;

mod conflict_freeness_constraints_encoder;
pub use conflict_freeness_constraints_encoder::ConflictFreenessConstraintsEncoder;

mod range_constraints_encoder;
pub use range_constraints_encoder::RangeConstraintsEncoder;
pub use range_constraints_encoder::RangeKind;

mod rejection_constraints_encoder;
pub use rejection_constraints_encoder::RejectionConstraintsEncoder;

mod semantics_encoder;
pub use semantics_encoder::SemanticsEncoder;

mod specs;
pub use specs::BaseConstraint;
pub use specs::ConstraintsEncoder;
pub use specs::EncodingOptions;

mod stable_constraints_encoder;
pub use stable_constraints_encoder::StableConstraintsEncoder;

mod target_encoder;
pub use target_encoder::encode_conjunction;

#[cfg(test)]
pub(crate) mod test_utils;
