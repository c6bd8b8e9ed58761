use super::oracle_session::OracleSession;
use crate::sat::{Assignment, Literal};
use log::trace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MaximalExtensionComputerState {
    /// A new candidate must be searched.
    Init,
    /// A candidate satisfying the target was found; it may be extended.
    Candidate(Assignment),
    /// The candidate cannot be extended under the target; it remains to check it is maximal without it.
    TargetMaximal(Assignment),
    /// The model is maximal with respect to the objectives.
    Maximal(Assignment),
    /// No maximal model satisfies the target.
    None,
}

/// A CEGAR-based search for models maximizing a set of objective literals.
///
/// Each candidate found is extended until no strict superset of its true objectives is reachable.
/// The clauses forbidding the subsets of the candidates are guarded by the selector literal, if any;
/// this selector is definitively disabled when the computer is dropped.
pub(crate) struct MaximalExtensionComputer<'a> {
    session: &'a mut OracleSession,
    assumptions: &'a [Literal],
    objectives: &'a [Literal],
    target: Option<Literal>,
    selector: Option<Literal>,
    state: MaximalExtensionComputerState,
}

impl<'a> MaximalExtensionComputer<'a> {
    pub(crate) fn new(
        session: &'a mut OracleSession,
        assumptions: &'a [Literal],
        objectives: &'a [Literal],
        target: Option<Literal>,
        selector: Option<Literal>,
    ) -> Self {
        Self {
            session,
            assumptions,
            objectives,
            target,
            selector,
            state: MaximalExtensionComputerState::Init,
        }
    }

    /// Runs the search until a maximal model is found or none can exist.
    pub(crate) fn compute_maximal(mut self) -> Option<Assignment> {
        loop {
            match std::mem::replace(&mut self.state, MaximalExtensionComputerState::None) {
                MaximalExtensionComputerState::Maximal(model) => return Some(model),
                MaximalExtensionComputerState::None => return None,
                state => {
                    self.state = state;
                    self.compute_next();
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &MaximalExtensionComputerState {
        &self.state
    }

    pub(crate) fn compute_next(&mut self) {
        let state = std::mem::replace(&mut self.state, MaximalExtensionComputerState::None);
        self.state = match state {
            MaximalExtensionComputerState::Init => self.new_candidate(),
            MaximalExtensionComputerState::Candidate(model) => self.increase_candidate(model),
            MaximalExtensionComputerState::TargetMaximal(model) => self.check_without_target(model),
            MaximalExtensionComputerState::Maximal(model) => {
                MaximalExtensionComputerState::Maximal(model)
            }
            MaximalExtensionComputerState::None => panic!("no more extensions"),
        };
    }

    fn base_assumptions(&self) -> Vec<Literal> {
        let mut assumptions = Vec::with_capacity(self.assumptions.len() + self.objectives.len() + 2);
        assumptions.extend_from_slice(self.assumptions);
        if let Some(s) = self.selector {
            assumptions.push(s.negate());
        }
        assumptions
    }

    fn new_candidate(&mut self) -> MaximalExtensionComputerState {
        let mut assumptions = self.base_assumptions();
        assumptions.extend(self.target);
        match self.session.solve(&assumptions) {
            Some(model) => MaximalExtensionComputerState::Candidate(model),
            None => MaximalExtensionComputerState::None,
        }
    }

    fn increase_candidate(&mut self, model: Assignment) -> MaximalExtensionComputerState {
        let (satisfied, mut unsatisfied) = split_objectives(self.objectives, &model);
        if unsatisfied.is_empty() {
            return MaximalExtensionComputerState::Maximal(model);
        }
        trace!(
            "increasing a candidate satisfying {} out of {} objectives",
            satisfied.len(),
            self.objectives.len()
        );
        unsatisfied.extend(self.selector);
        self.session.add_clause(unsatisfied);
        let mut assumptions = self.base_assumptions();
        assumptions.extend(self.target);
        assumptions.extend_from_slice(&satisfied);
        match self.session.solve(&assumptions) {
            Some(new_model) => MaximalExtensionComputerState::Candidate(new_model),
            None if self.target.is_some() => MaximalExtensionComputerState::TargetMaximal(model),
            None => MaximalExtensionComputerState::Maximal(model),
        }
    }

    fn check_without_target(&mut self, model: Assignment) -> MaximalExtensionComputerState {
        let (satisfied, _) = split_objectives(self.objectives, &model);
        let mut assumptions = self.base_assumptions();
        assumptions.extend_from_slice(&satisfied);
        match self.session.solve(&assumptions) {
            Some(_) => {
                trace!("the candidate is not maximal once the target is dropped");
                MaximalExtensionComputerState::Init
            }
            None => MaximalExtensionComputerState::Maximal(model),
        }
    }
}

impl Drop for MaximalExtensionComputer<'_> {
    fn drop(&mut self) {
        if let Some(s) = self.selector {
            self.session.retire_selector(s);
        }
    }
}

// Splits the objectives into the ones satisfied by the model and the other ones.
fn split_objectives(objectives: &[Literal], model: &Assignment) -> (Vec<Literal>, Vec<Literal>) {
    objectives.iter().partition(|l| model.is_true(**l))
}

/// Checks whether no model strictly extends the objectives satisfied by the given one.
///
/// A clause guarded by the selector (if any) is added to the session to forbid the subsets of the model.
pub(crate) fn is_maximal_model(
    session: &mut OracleSession,
    assumptions: &[Literal],
    objectives: &[Literal],
    selector: Option<Literal>,
    model: &Assignment,
) -> bool {
    let (satisfied, mut unsatisfied) = split_objectives(objectives, model);
    if unsatisfied.is_empty() {
        return true;
    }
    unsatisfied.extend(selector);
    session.add_clause(unsatisfied);
    let mut all_assumptions = assumptions.to_vec();
    if let Some(s) = selector {
        all_assumptions.push(s.negate());
    }
    all_assumptions.extend_from_slice(&satisfied);
    session.solve(&all_assumptions).is_none()
}
