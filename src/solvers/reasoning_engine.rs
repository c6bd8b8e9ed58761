use super::{
    grounded_assumptions::grounded_assumptions,
    ideal_extension_computer::compute_ideal_extension,
    maximal_extension_computer::{is_maximal_model, MaximalExtensionComputer},
    oracle_session::OracleSession,
    EngineOptions, EngineState, ExtensionCache,
};
use crate::{
    aa::Semantics,
    dynamics::{DynamicFramework, DynamicSolver, FrameworkMode},
    sat::{Assignment, DefaultSatSolverFactory, Literal, SatSolverFactory},
};
use anyhow::{anyhow, Result};
use log::debug;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusKind {
    In,
    Out,
}

#[derive(Debug, Clone, Copy)]
struct StatusAssumption {
    id: i32,
    kind: StatusKind,
    positive: bool,
}

// The statuses of the arguments existing when the last witness was found, by identifier.
#[derive(Debug)]
struct Witness {
    statuses: HashMap<i32, (Option<bool>, Option<bool>)>,
    accepted_vector: Vec<bool>,
    extension: Vec<i32>,
}

impl Witness {
    fn new(af: &DynamicFramework, model: &Assignment) -> Self {
        let layout = af.layout();
        let accepted_vector = (0..layout.n_indices())
            .map(|i| af.exists(i) && model.value_of_literal(layout.accepted(i)) == Some(true))
            .collect::<Vec<bool>>();
        let statuses = af
            .iter_existing()
            .filter_map(|i| {
                let id = af.id_of(i)?;
                let accepted = model.value_of_literal(layout.accepted(i));
                let rejected = model.value_of_literal(layout.rejected(i));
                Some((id, (accepted, rejected)))
            })
            .collect::<HashMap<i32, (Option<bool>, Option<bool>)>>();
        let mut extension = af
            .iter_existing()
            .filter(|i| accepted_vector[*i])
            .filter_map(|i| af.id_of(i))
            .collect::<Vec<i32>>();
        extension.sort_unstable();
        Self {
            statuses,
            accepted_vector,
            extension,
        }
    }

    fn value(&self, id: i32, kind: StatusKind) -> Option<bool> {
        let (accepted, rejected) = self.statuses.get(&id)?;
        match kind {
            StatusKind::In => *accepted,
            StatusKind::Out => *rejected,
        }
    }
}

/// An incremental SAT-based reasoning engine for dynamic argumentation frameworks.
///
/// The engine owns a [`DynamicFramework`] which is modified through the [`DynamicSolver`] trait.
/// Queries are answered by [`solve`](Self::solve) for the semantics set by [`set_semantics`](Self::set_semantics),
/// the argument statuses to check being staged beforehand by [`assume_in`](Self::assume_in) and [`assume_out`](Self::assume_out).
/// A credulous query checks whether an extension satisfies all the staged statuses,
/// while a skeptical query checks whether all the extensions do.
///
/// In dynamic mode, the SAT oracle is kept between queries and the structure of the framework is given by assumptions;
/// it is rebuilt only when the semantics changes or when the argument buffer grows.
/// In static mode, the oracle is rebuilt for each query.
///
/// Any failing operation moves the engine into the [`Error`](EngineState::Error) state;
/// in this state, queries are ignored.
///
/// # Example
///
/// ```
/// # use dynabri::aa::Semantics;
/// # use dynabri::dynamics::DynamicSolver;
/// # use dynabri::solvers::{EngineState, ReasoningEngine};
/// let mut engine = ReasoningEngine::new();
/// engine.set_semantics(Semantics::ST);
/// for arg in 1..=3 {
///     engine.add_argument(arg).unwrap();
/// }
/// engine.add_attack(2, 1).unwrap();
/// engine.add_attack(3, 2).unwrap();
/// engine.assume_in(1).unwrap();
/// assert_eq!(EngineState::Accept, engine.solve(true));
/// assert_eq!(vec![1, 3], engine.extension());
/// ```
pub struct ReasoningEngine {
    framework: DynamicFramework,
    semantics: Option<Semantics>,
    options: EngineOptions,
    solver_factory: Box<dyn SatSolverFactory>,
    session: Option<OracleSession>,
    extensions: ExtensionCache,
    status_assumptions: Vec<StatusAssumption>,
    witness: Option<Witness>,
    state: EngineState,
}

impl Default for ReasoningEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ReasoningEngine {
    /// Builds a new engine with the default options and the default SAT solver.
    pub fn new() -> Self {
        Self::new_with_options(EngineOptions::default())
    }

    /// Builds a new engine with the given options and the default SAT solver.
    pub fn new_with_options(options: EngineOptions) -> Self {
        Self::new_with_options_and_factory(options, Box::new(DefaultSatSolverFactory))
    }

    /// Builds a new engine with the given options, using the factory to get SAT solvers.
    pub fn new_with_options_and_factory(
        options: EngineOptions,
        solver_factory: Box<dyn SatSolverFactory>,
    ) -> Self {
        Self {
            framework: DynamicFramework::new_with_parameters(
                options.start_mode,
                options.buffer_capacity,
                options.dynamic_threshold,
            ),
            semantics: None,
            options,
            solver_factory,
            session: None,
            extensions: ExtensionCache::new(options.cache_capacity),
            status_assumptions: vec![],
            witness: None,
            state: EngineState::Input,
        }
    }

    /// Sets the semantics used by the next queries.
    pub fn set_semantics(&mut self, semantics: Semantics) {
        if self.semantics != Some(semantics) {
            self.extensions.clear();
        }
        self.semantics = Some(semantics);
    }

    /// Forces the static mode for the remaining lifetime of the engine.
    pub fn set_static(&mut self) {
        self.framework.set_static();
    }

    /// Returns the underlying framework.
    pub fn framework(&self) -> &DynamicFramework {
        &self.framework
    }

    /// Returns the current state.
    pub fn get_state(&self) -> EngineState {
        self.state
    }

    fn fail<T>(&mut self, e: anyhow::Error) -> Result<T> {
        debug!("engine error: {}", e);
        self.state = EngineState::Error;
        Err(e)
    }

    fn checked(&mut self, result: Result<()>) -> Result<()> {
        match result {
            Ok(()) => Ok(()),
            Err(e) => self.fail(e),
        }
    }

    fn stage(&mut self, arg: i32, kind: StatusKind) -> Result<()> {
        let id = arg.checked_abs();
        match id.filter(|id| self.framework.index_of(*id).is_some()) {
            Some(id) => {
                self.status_assumptions.push(StatusAssumption {
                    id,
                    kind,
                    positive: arg >= 0,
                });
                Ok(())
            }
            None => self.fail(anyhow!("no such argument: {}", arg)),
        }
    }

    /// Stages the (non-)acceptance of an argument for the next query.
    ///
    /// A non-negative identifier requires the argument to be accepted, while a negative one requires it not to be.
    /// The argument `0` can only be required to be accepted.
    pub fn assume_in(&mut self, arg: i32) -> Result<()> {
        self.stage(arg, StatusKind::In)
    }

    /// Stages the (non-)rejection of an argument for the next query.
    ///
    /// A non-negative identifier requires the argument to be rejected, while a negative one requires it not to be.
    /// The argument `0` can only be required to be rejected.
    pub fn assume_out(&mut self, arg: i32) -> Result<()> {
        self.stage(arg, StatusKind::Out)
    }

    fn witness_value(&mut self, arg: i32, kind: StatusKind) -> Result<Option<bool>> {
        if arg < 0 || self.framework.index_of(arg).is_none() {
            return self.fail(anyhow!("no such argument: {}", arg));
        }
        Ok(self.witness.as_ref().and_then(|w| w.value(arg, kind)))
    }

    /// Returns the acceptance of an argument in the witness of the last query, if any.
    ///
    /// Arguments added after the last query have no value.
    pub fn get_val_in(&mut self, arg: i32) -> Result<Option<bool>> {
        self.witness_value(arg, StatusKind::In)
    }

    /// Returns the rejection of an argument in the witness of the last query, if any.
    pub fn get_val_out(&mut self, arg: i32) -> Result<Option<bool>> {
        self.witness_value(arg, StatusKind::Out)
    }

    /// Returns the identifiers of the arguments accepted in the witness of the last query, in increasing order.
    ///
    /// The witness is an extension satisfying the staged statuses for a credulous query,
    /// or an extension falsifying one of them for a skeptical query.
    /// If the last query has no witness, an empty vector is returned.
    pub fn extension(&self) -> Vec<i32> {
        self.witness
            .as_ref()
            .map(|w| w.extension.clone())
            .unwrap_or_default()
    }

    /// Answers a query for the current semantics and the staged statuses, which are consumed.
    ///
    /// A credulous query is accepted iff an extension satisfies all the statuses;
    /// a skeptical query is accepted iff no extension falsifies one of them.
    /// The new state of the engine is returned.
    pub fn solve(&mut self, credulous: bool) -> EngineState {
        let status_assumptions = std::mem::take(&mut self.status_assumptions);
        self.witness = None;
        if self.state == EngineState::Error {
            return self.state;
        }
        let semantics = match self.semantics {
            Some(s) => s,
            None => {
                debug!("engine error: no semantics set");
                self.state = EngineState::Error;
                return self.state;
            }
        };
        self.refresh_framework(semantics);
        let status_lits = match self.status_literals(&status_assumptions) {
            Ok(lits) => lits,
            Err(e) => {
                debug!("engine error: {}", e);
                self.state = EngineState::Error;
                return self.state;
            }
        };
        let mut session = self.take_session(semantics);
        let found = self.search(&mut session, semantics, &status_lits, credulous);
        self.session = Some(session);
        if let Some(model) = found {
            let witness = Witness::new(&self.framework, &model);
            self.extensions.push(witness.accepted_vector.clone());
            self.witness = Some(witness);
        }
        self.state = match (self.witness.is_some(), credulous) {
            (true, true) | (false, false) => EngineState::Accept,
            (true, false) | (false, true) => EngineState::Reject,
        };
        self.state
    }

    fn refresh_framework(&mut self, semantics: Semantics) {
        if self.framework.mode() == FrameworkMode::Dynamic && self.framework.needs_growth() {
            self.framework.grow_buffer();
            self.session = None;
            self.extensions.clear();
        }
        if self.framework.refresh_layout(semantics.uses_range()) {
            debug!(
                "new variable layout ({:?} mode, {} indices)",
                self.framework.layout().mode(),
                self.framework.layout().n_indices()
            );
            self.session = None;
            self.extensions.clear();
        }
    }

    fn status_literals(&self, status_assumptions: &[StatusAssumption]) -> Result<Vec<Literal>> {
        let layout = self.framework.layout();
        status_assumptions
            .iter()
            .map(|s| {
                let index = self
                    .framework
                    .index_of(s.id)
                    .ok_or_else(|| anyhow!("no such argument: {}", s.id))?;
                let lit = match s.kind {
                    StatusKind::In => layout.accepted(index),
                    StatusKind::Out => layout.rejected(index),
                };
                Ok(lit.with_polarity(s.positive))
            })
            .collect()
    }

    fn take_session(&mut self, semantics: Semantics) -> OracleSession {
        let layout = self.framework.layout();
        if let Some(session) = self.session.take() {
            if layout.mode() == FrameworkMode::Dynamic && session.is_valid_for(semantics, layout) {
                return session;
            }
            if session.semantics() != semantics {
                self.extensions.clear();
            }
        }
        OracleSession::new(
            self.solver_factory.as_ref(),
            &self.framework,
            semantics,
            self.options.encoding_options,
        )
    }

    fn objectives(&self, semantics: Semantics) -> Vec<Literal> {
        let layout = self.framework.layout();
        match semantics {
            Semantics::PR => self
                .framework
                .iter_existing()
                .map(|i| layout.accepted(i))
                .collect(),
            Semantics::SST | Semantics::STG => self
                .framework
                .iter_existing()
                .map(|i| layout.range(i))
                .collect(),
            _ => vec![],
        }
    }

    fn search(
        &self,
        session: &mut OracleSession,
        semantics: Semantics,
        status_lits: &[Literal],
        credulous: bool,
    ) -> Option<Assignment> {
        let af = &self.framework;
        let encoding_options = &self.options.encoding_options;
        let target = session
            .encode_target(status_lits)
            .map(|t| t.with_polarity(credulous));
        let selector = match (af.layout().mode(), semantics) {
            (FrameworkMode::Dynamic, Semantics::PR | Semantics::SST | Semantics::STG) => {
                Some(session.fresh_literal())
            }
            _ => None,
        };
        let structure = af.structure_assumptions();
        let objectives = self.objectives(semantics);
        if semantics != Semantics::ID {
            if let Some(model) =
                self.check_cache(session, semantics, &structure, target, &objectives, selector)
            {
                debug!("query answered from the extension cache");
                if let Some(s) = selector {
                    session.retire_selector(s);
                }
                return Some(model);
            }
        }
        let with_target = |mut assumptions: Vec<Literal>| {
            assumptions.extend(target);
            assumptions
        };
        let with_grounded = |mut assumptions: Vec<Literal>| {
            if encoding_options.grounded_in_stable {
                assumptions.append(&mut grounded_assumptions(
                    af,
                    self.solver_factory.as_ref(),
                    &structure,
                ));
            }
            assumptions
        };
        let with_full_range = |mut assumptions: Vec<Literal>| {
            assumptions.extend(af.iter_existing().map(|i| af.layout().range(i)));
            assumptions
        };
        let stable_exists = matches!(semantics, Semantics::SST | Semantics::STG)
            && encoding_options.stable_shortcut
            && session
                .solve(&with_full_range(structure.clone()))
                .is_some();
        match semantics {
            Semantics::AD | Semantics::CO => session.solve(&with_target(structure.clone())),
            Semantics::ST => session.solve(&with_target(with_grounded(structure.clone()))),
            Semantics::SST | Semantics::STG if stable_exists => {
                debug!("a stable extension exists; searching among them");
                if let Some(s) = selector {
                    session.retire_selector(s);
                }
                let assumptions = with_full_range(with_grounded(structure.clone()));
                session.solve(&with_target(assumptions))
            }
            Semantics::PR | Semantics::SST | Semantics::STG => {
                MaximalExtensionComputer::new(session, &structure, &objectives, target, selector)
                    .compute_maximal()
            }
            Semantics::ID => compute_ideal_extension(session, af, &structure, target),
        }
    }

    fn check_cache(
        &self,
        session: &mut OracleSession,
        semantics: Semantics,
        structure: &[Literal],
        target: Option<Literal>,
        objectives: &[Literal],
        selector: Option<Literal>,
    ) -> Option<Assignment> {
        let af = &self.framework;
        let layout = af.layout();
        for extension in self.extensions.iter() {
            if extension
                .iter()
                .enumerate()
                .any(|(i, accepted)| *accepted && !af.exists(i))
            {
                continue;
            }
            let mut assumptions = structure.to_vec();
            assumptions.extend(target);
            (0..layout.n_indices()).for_each(|i| {
                let accepted = extension.get(i).copied().unwrap_or(false);
                assumptions.push(layout.accepted(i).with_polarity(accepted));
            });
            let model = match session.solve(&assumptions) {
                Some(m) => m,
                None => continue,
            };
            if !semantics.is_maximal()
                || is_maximal_model(session, structure, objectives, selector, &model)
            {
                return Some(model);
            }
        }
        None
    }
}

impl DynamicSolver for ReasoningEngine {
    fn add_argument(&mut self, id: i32) -> Result<()> {
        let result = self.framework.add_argument(id);
        self.checked(result)
    }

    fn del_argument(&mut self, id: i32) -> Result<()> {
        let result = self.framework.del_argument(id);
        self.checked(result)
    }

    fn add_attack(&mut self, source: i32, target: i32) -> Result<()> {
        let result = self.framework.add_attack(source, target);
        self.checked(result)
    }

    fn del_attack(&mut self, source: i32, target: i32) -> Result<()> {
        let result = self.framework.del_attack(source, target);
        self.checked(result)
    }
}
