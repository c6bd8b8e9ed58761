use crate::{
    aa::Semantics,
    dynamics::DynamicFramework,
    encodings::{ConstraintsEncoder, EncodingOptions, SemanticsEncoder},
    sat::{Literal, PropagationResult, SatSolverFactory},
};
use log::debug;

/// Returns the acceptance and rejection literals forced by the grounded extension.
///
/// They are obtained by unit propagation on the complete semantics constraints, without any search.
/// In case the propagation leads to a conflict, no literal is returned.
pub(crate) fn grounded_assumptions(
    af: &DynamicFramework,
    factory: &dyn SatSolverFactory,
    structure: &[Literal],
) -> Vec<Literal> {
    let mut propagator = factory.new_solver();
    SemanticsEncoder::new(Semantics::CO, EncodingOptions::default())
        .encode_constraints(af, propagator.as_mut());
    let max_var = 2 * af.layout().n_indices();
    match propagator.propagate(structure) {
        PropagationResult::Propagated(literals) => literals
            .into_iter()
            .filter(|l| usize::from(l.var()) <= max_var)
            .collect(),
        PropagationResult::Conflict => {
            debug!("conflict while propagating the grounded extension");
            vec![]
        }
    }
}
