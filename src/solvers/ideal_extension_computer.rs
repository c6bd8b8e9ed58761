use super::{maximal_extension_computer::MaximalExtensionComputer, oracle_session::OracleSession};
use crate::{
    dynamics::{DynamicFramework, FrameworkMode},
    sat::{Assignment, Literal},
};
use log::{debug, trace};

/// Computes the ideal extension, if it satisfies the target.
///
/// The session must hold the constraints of the ideal base (admissibility or completeness).
/// A first enumeration collects the arguments attacked by some extension of the base;
/// these arguments are forbidden and the remaining ones are maximized by a CEGAR search.
///
/// If a target is provided and no extension of the base satisfies it, [`None`] is returned without further search.
pub(crate) fn compute_ideal_extension(
    session: &mut OracleSession,
    af: &DynamicFramework,
    structure: &[Literal],
    target: Option<Literal>,
) -> Option<Assignment> {
    let layout = af.layout();
    let n = layout.n_indices();
    let enumeration_selector = session.fresh_literal();
    let mut union_of_accepted = vec![false; n];
    let mut union_of_rejected = vec![false; n];
    let mut n_models = 0;
    loop {
        let mut assumptions = structure.to_vec();
        if n_models == 0 {
            assumptions.extend(target);
        } else {
            assumptions.push(enumeration_selector.negate());
        }
        let model = match session.solve(&assumptions) {
            Some(m) => m,
            None if n_models == 0 && target.is_some() => {
                debug!("no extension of the ideal base satisfies the target");
                session.retire_selector(enumeration_selector);
                return None;
            }
            None => break,
        };
        n_models += 1;
        let mut blocking_clause = vec![enumeration_selector];
        af.iter_existing().for_each(|i| {
            if model.is_true(layout.accepted(i)) {
                union_of_accepted[i] = true;
            } else if !union_of_accepted[i] {
                blocking_clause.push(layout.accepted(i));
            }
            if model.is_true(layout.rejected(i)) {
                union_of_rejected[i] = true;
            } else if !union_of_rejected[i] {
                blocking_clause.push(layout.rejected(i));
            }
        });
        session.add_clause(blocking_clause);
    }
    session.retire_selector(enumeration_selector);
    trace!("{} models enumerated to compute the ideal candidates", n_models);
    let cegar_selector = match layout.mode() {
        FrameworkMode::Static => None,
        FrameworkMode::Dynamic => Some(session.fresh_literal()),
    };
    let mut objectives = Vec::with_capacity(n);
    af.iter_existing().for_each(|i| {
        if union_of_rejected[i] {
            let mut cl = vec![layout.accepted(i).negate()];
            cl.extend(cegar_selector);
            session.add_clause(cl);
        } else {
            objectives.push(layout.accepted(i));
        }
    });
    debug!(
        "{} arguments out of {} may belong to the ideal extension",
        objectives.len(),
        af.n_arguments()
    );
    MaximalExtensionComputer::new(session, structure, &objectives, target, cegar_selector)
        .compute_maximal()
}
