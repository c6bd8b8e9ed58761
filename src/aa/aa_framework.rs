use super::{Argument, ArgumentSet, LabelType};
use crate::dynamics::DynamicSolver;
use anyhow::{anyhow, Context, Result};
use log::debug;
use std::collections::HashSet;

/// A labelled Abstract Argumentation framework, as produced by instance readers.
///
/// This object only stores the arguments and attacks;
/// reasoning is made by loading it into a [`DynamicSolver`] with [`load_into`](Self::load_into).
#[derive(Default)]
pub struct AAFramework<T>
where
    T: LabelType,
{
    arguments: ArgumentSet<T>,
    attacks: Vec<(i32, i32)>,
    attack_set: HashSet<(i32, i32)>,
}

/// An attack, represented as a couple of two arguments.
///
/// Attacks are built by [`AAFramework`] objects.
pub struct Attack<'a, T>(&'a Argument<T>, &'a Argument<T>)
where
    T: LabelType;

impl<'a, T> Attack<'a, T>
where
    T: LabelType,
{
    /// Returns the attacker.
    ///
    /// Example
    ///
    /// ```
    /// # use dynabri::aa::{Attack, LabelType};
    /// fn describe_attack<T: LabelType>(attack: &Attack<T>) {
    ///     println!("{} attacks {}", attack.attacker(), attack.attacked());
    /// }
    /// ```
    pub fn attacker(&self) -> &'a Argument<T> {
        self.0
    }

    /// Returns the attacked argument.
    pub fn attacked(&self) -> &'a Argument<T> {
        self.1
    }
}

impl<T> AAFramework<T>
where
    T: LabelType,
{
    /// Builds an AA framework without attacks given its set of arguments.
    ///
    /// # Example
    ///
    /// ```
    /// # use dynabri::aa::{ArgumentSet, AAFramework};
    /// let arguments = ArgumentSet::new_with_labels(&["a", "b", "c"]);
    /// let framework = AAFramework::new_with_argument_set(arguments);
    /// assert_eq!(3, framework.argument_set().len());
    /// assert_eq!(0, framework.iter_attacks().count());
    /// ```
    pub fn new_with_argument_set(arguments: ArgumentSet<T>) -> Self {
        AAFramework {
            arguments,
            attacks: vec![],
            attack_set: HashSet::new(),
        }
    }

    /// Adds a new argument to this argumentation framework.
    ///
    /// If an argument with the same label is already defined, an error is returned.
    pub fn new_argument(&mut self, label: T) -> Result<()> {
        if self.arguments.new_argument(label.clone()) {
            Ok(())
        } else {
            Err(anyhow!("argument {} is already defined", label))
        }
    }

    /// Adds a new attack given the labels of the source and destination arguments.
    ///
    /// If one of the arguments is undefined or if the attack already exists, an error is returned.
    ///
    /// # Example
    ///
    /// ```
    /// # use dynabri::aa::{ArgumentSet, AAFramework};
    /// let labels = vec!["a", "b", "c"];
    /// let arguments = ArgumentSet::new_with_labels(&labels);
    /// let mut framework = AAFramework::new_with_argument_set(arguments);
    /// framework.new_attack(&labels[0], &labels[1]).unwrap();
    /// assert!(framework.new_attack(&labels[0], &labels[1]).is_err());
    /// assert_eq!(1, framework.n_attacks());
    /// ```
    pub fn new_attack(&mut self, from: &T, to: &T) -> Result<()> {
        let context = || format!("cannot add an attack from {} to {}", from, to);
        let attacker_id = self.arguments.get_argument(from).with_context(context)?.id();
        let attacked_id = self.arguments.get_argument(to).with_context(context)?.id();
        self.new_attack_by_ids(attacker_id, attacked_id)
            .with_context(context)
    }

    /// Adds a new attack given the ids of the source and destination arguments.
    ///
    /// If one of the arguments is undefined or if the attack already exists, an error is returned.
    pub fn new_attack_by_ids(&mut self, from: i32, to: i32) -> Result<()> {
        let n_arguments = self.arguments.len() as i32;
        if from < 1 || to < 1 || from > n_arguments || to > n_arguments {
            return Err(anyhow!(
                "cannot add an attack from identifiers {} to {}; ids must be between 1 and {}",
                from,
                to,
                n_arguments
            ));
        }
        if !self.attack_set.insert((from, to)) {
            return Err(anyhow!("attack from {} to {} is already defined", from, to));
        }
        self.attacks.push((from, to));
        Ok(())
    }

    /// Returns the argument set of the framework.
    pub fn argument_set(&self) -> &ArgumentSet<T> {
        &self.arguments
    }

    /// Provides an iterator to the attacks, in insertion order.
    pub fn iter_attacks(&self) -> impl Iterator<Item = Attack<'_, T>> + '_ {
        self.attacks.iter().filter_map(|(a, b)| {
            Some(Attack(
                self.arguments.get_argument_by_id(*a)?,
                self.arguments.get_argument_by_id(*b)?,
            ))
        })
    }

    /// Returns the number of arguments in this framework.
    pub fn n_arguments(&self) -> usize {
        self.argument_set().len()
    }

    /// Returns the number of attacks in this framework.
    pub fn n_attacks(&self) -> usize {
        self.attacks.len()
    }

    /// Feeds the arguments and the attacks of this framework to a solver.
    ///
    /// Arguments are given their identifiers (`1..=n`), then the attacks are added.
    ///
    /// # Example
    ///
    /// ```
    /// # use dynabri::aa::{ArgumentSet, AAFramework, Semantics};
    /// # use dynabri::solvers::{EngineState, ReasoningEngine};
    /// let labels = vec!["a", "b"];
    /// let mut framework = AAFramework::new_with_argument_set(ArgumentSet::new_with_labels(&labels));
    /// framework.new_attack(&"a", &"b").unwrap();
    /// let mut engine = ReasoningEngine::new();
    /// framework.load_into(&mut engine).unwrap();
    /// engine.set_semantics(Semantics::ST);
    /// assert_eq!(EngineState::Accept, engine.solve(true));
    /// assert_eq!(vec![1], engine.extension());
    /// ```
    pub fn load_into(&self, solver: &mut dyn DynamicSolver) -> Result<()> {
        debug!(
            "loading a framework with {} arguments and {} attacks",
            self.n_arguments(),
            self.n_attacks()
        );
        self.arguments
            .iter()
            .try_for_each(|a| solver.add_argument(a.id()))
            .context("while loading the arguments")?;
        self.attacks
            .iter()
            .try_for_each(|(a, b)| solver.add_attack(*a, *b))
            .context("while loading the attacks")
    }
}
