use crate::{dynamics::DynamicFramework, sat::SatSolver};
use strum_macros::{AsRefStr, EnumIter, EnumString};

/// The trait for encoders from AF to SAT.
///
/// Encoders emit their clauses in the shape matching the framework mode:
/// in static mode, the clauses are built from the current attacks and only involve existing arguments;
/// in dynamic mode, they are built over the whole index range and gated by the existence variables.
///
/// The variables involved are given by the framework [layout](crate::dynamics::VariableLayout).
/// Encoders only emit their own defining clauses; prerequisites are handled by [`SemanticsEncoder`](super::SemanticsEncoder).
pub trait ConstraintsEncoder {
    /// Encodes the constraints into the SAT solver.
    fn encode_constraints(&self, af: &DynamicFramework, solver: &mut dyn SatSolver);
}

/// The constraint used as a basis for a semantics which is not directly encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumIter, EnumString)]
pub enum BaseConstraint {
    /// Conflict-freeness, together with the definition of rejected arguments
    #[strum(serialize = "cf")]
    ConflictFreeness,
    /// Admissibility
    #[strum(serialize = "ad")]
    Admissibility,
    /// Completeness
    #[strum(serialize = "co")]
    Completeness,
}

/// The alternative encodings used for the semantics.
///
/// All the alternatives lead to the same answers; they only differ by the efficiency of the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingOptions {
    /// The base constraint of the preferred semantics (admissibility or completeness).
    pub preferred_base: BaseConstraint,
    /// The base constraint of the semi-stable semantics (admissibility or completeness).
    pub semi_stable_base: BaseConstraint,
    /// The base constraint of the ideal semantics (admissibility or completeness).
    pub ideal_base: BaseConstraint,
    /// The base constraint completed by totality for the stable semantics.
    pub stable_base: BaseConstraint,
    /// Whether the literals forced by the grounded extension are assumed during stable searches.
    pub grounded_in_stable: bool,
    /// Whether semi-stable and stage problems first check for the existence of a stable extension.
    pub stable_shortcut: bool,
}

impl Default for EncodingOptions {
    fn default() -> Self {
        Self {
            preferred_base: BaseConstraint::Admissibility,
            semi_stable_base: BaseConstraint::Completeness,
            ideal_base: BaseConstraint::Admissibility,
            stable_base: BaseConstraint::ConflictFreeness,
            grounded_in_stable: true,
            stable_shortcut: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_base_constraint_strings() {
        assert_eq!(
            BaseConstraint::Completeness,
            BaseConstraint::from_str("co").unwrap()
        );
        assert_eq!("cf", BaseConstraint::ConflictFreeness.as_ref());
        assert!(BaseConstraint::from_str("pr").is_err());
    }
}
