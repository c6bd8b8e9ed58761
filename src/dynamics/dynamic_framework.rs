use super::{FrameworkMode, VariableLayout};
use crate::sat::Literal;
use anyhow::{anyhow, Result};
use log::debug;
use std::{
    cell::OnceCell,
    collections::{BTreeSet, HashMap, HashSet},
};

/// The initial number of placeholder indices reserved by a dynamic framework.
pub const DEFAULT_BUFFER_CAPACITY: usize = 16;

/// The live argument count above which a framework leaves the dynamic mode.
pub const DEFAULT_DYNAMIC_THRESHOLD: usize = 256;

/// Attack-related data used by the static encodings.
///
/// This data is computed from scratch each time it is requested after a structural change.
#[derive(Debug, Default)]
pub struct StaticStructure {
    attackers: Vec<Vec<usize>>,
    self_attacking: Vec<bool>,
    symmetric: HashSet<(usize, usize)>,
}

impl StaticStructure {
    fn compute(n_indices: usize, attacks: &BTreeSet<(usize, usize)>) -> Self {
        let mut structure = StaticStructure {
            attackers: vec![vec![]; n_indices],
            self_attacking: vec![false; n_indices],
            symmetric: HashSet::new(),
        };
        for (source, target) in attacks.iter().copied() {
            structure.attackers[target].push(source);
            if source == target {
                structure.self_attacking[source] = true;
            } else if attacks.contains(&(target, source)) {
                structure.symmetric.insert((source, target));
            }
        }
        structure
    }

    /// Returns the indices of the arguments attacking the one with the given index.
    pub fn attackers(&self, index: usize) -> &[usize] {
        &self.attackers[index]
    }

    /// Returns `true` iff the argument with the given index attacks itself.
    pub fn is_self_attacking(&self, index: usize) -> bool {
        self.self_attacking[index]
    }

    /// Returns `true` iff the two arguments attack each other.
    pub fn is_symmetric(&self, a: usize, b: usize) -> bool {
        self.symmetric.contains(&(a, b))
    }
}

/// An argumentation framework subject to structural changes.
///
/// Arguments are given by non-negative identifiers, mapped to dense internal indices.
/// In dynamic mode, the index range contains placeholder indices reserved for future arguments;
/// when they are exhausted, the next call to [`grow_buffer`](Self::grow_buffer) doubles the reserve.
///
/// # Example
///
/// ```
/// # use dynabri::dynamics::{DynamicFramework, FrameworkMode};
/// let mut af = DynamicFramework::new(FrameworkMode::Dynamic);
/// af.add_argument(1).unwrap();
/// af.add_argument(2).unwrap();
/// af.add_attack(1, 2).unwrap();
/// assert!(af.add_attack(1, 3).is_err());
/// assert_eq!(2, af.n_arguments());
/// ```
#[derive(Debug)]
pub struct DynamicFramework {
    id_to_index: HashMap<i32, usize>,
    index_to_id: Vec<Option<i32>>,
    attacks: BTreeSet<(usize, usize)>,
    n_placeholders: usize,
    buffer_capacity: usize,
    needs_growth: bool,
    dynamic_threshold: usize,
    mode: FrameworkMode,
    layout: VariableLayout,
    static_structure: OnceCell<StaticStructure>,
}

impl DynamicFramework {
    /// Builds an empty framework using the default buffer capacity and dynamic threshold.
    pub fn new(mode: FrameworkMode) -> Self {
        Self::new_with_parameters(mode, DEFAULT_BUFFER_CAPACITY, DEFAULT_DYNAMIC_THRESHOLD)
    }

    /// Builds an empty framework.
    ///
    /// # Arguments
    ///
    /// * `mode` - the initial mode
    /// * `buffer_capacity` - the number of placeholders reserved by the first buffer growth
    /// * `dynamic_threshold` - the live argument count above which the dynamic mode is abandoned
    pub fn new_with_parameters(
        mode: FrameworkMode,
        buffer_capacity: usize,
        dynamic_threshold: usize,
    ) -> Self {
        DynamicFramework {
            id_to_index: HashMap::new(),
            index_to_id: vec![],
            attacks: BTreeSet::new(),
            n_placeholders: 0,
            buffer_capacity: buffer_capacity.max(1),
            needs_growth: true,
            dynamic_threshold,
            mode,
            layout: VariableLayout::new(mode, 0, false, 0),
            static_structure: OnceCell::new(),
        }
    }

    /// Adds an argument.
    ///
    /// A placeholder index is claimed if one is available; otherwise the index range is extended.
    /// An error is returned if the identifier is negative or already in use.
    pub fn add_argument(&mut self, id: i32) -> Result<()> {
        if id < 0 {
            return Err(anyhow!("invalid argument identifier: {}", id));
        }
        if self.id_to_index.contains_key(&id) {
            return Err(anyhow!("argument {} already exists", id));
        }
        let index = if self.n_placeholders == 0 {
            self.needs_growth = true;
            self.index_to_id.push(Some(id));
            self.index_to_id.len() - 1
        } else {
            let index = self.index_to_id.len() - self.n_placeholders;
            self.n_placeholders -= 1;
            self.index_to_id[index] = Some(id);
            index
        };
        self.id_to_index.insert(id, index);
        self.static_structure.take();
        if self.mode == FrameworkMode::Dynamic && self.id_to_index.len() > self.dynamic_threshold {
            debug!(
                "{} arguments exceed the dynamic threshold; switching to static mode",
                self.id_to_index.len()
            );
            self.mode = FrameworkMode::Static;
        }
        Ok(())
    }

    /// Removes an argument and all the attacks it is involved in.
    pub fn del_argument(&mut self, id: i32) -> Result<()> {
        let index = self
            .id_to_index
            .remove(&id)
            .ok_or_else(|| anyhow!("no such argument: {}", id))?;
        self.index_to_id[index] = None;
        self.attacks
            .retain(|(source, target)| *source != index && *target != index);
        self.static_structure.take();
        Ok(())
    }

    /// Adds an attack between two existing arguments.
    pub fn add_attack(&mut self, source: i32, target: i32) -> Result<()> {
        let pair = self.index_pair(source, target)?;
        if !self.attacks.insert(pair) {
            return Err(anyhow!("attack ({}, {}) already exists", source, target));
        }
        self.static_structure.take();
        Ok(())
    }

    /// Removes an existing attack.
    pub fn del_attack(&mut self, source: i32, target: i32) -> Result<()> {
        let pair = self.index_pair(source, target)?;
        if !self.attacks.remove(&pair) {
            return Err(anyhow!("no such attack: ({}, {})", source, target));
        }
        self.static_structure.take();
        Ok(())
    }

    fn index_pair(&self, source: i32, target: i32) -> Result<(usize, usize)> {
        let index = |id| {
            self.index_of(id)
                .ok_or_else(|| anyhow!("no such argument: {}", id))
        };
        Ok((index(source)?, index(target)?))
    }

    /// Returns the index of the argument with the given identifier, if it exists.
    pub fn index_of(&self, id: i32) -> Option<usize> {
        self.id_to_index.get(&id).copied()
    }

    /// Returns the identifier of the argument at the given index, if there is one.
    pub fn id_of(&self, index: usize) -> Option<i32> {
        self.index_to_id.get(index).copied().flatten()
    }

    /// Returns `true` iff the index holds a (non-deleted, non-placeholder) argument.
    pub fn exists(&self, index: usize) -> bool {
        self.id_of(index).is_some()
    }

    /// Returns `true` iff the attack between the two indices exists.
    pub fn has_attack(&self, source: usize, target: usize) -> bool {
        self.attacks.contains(&(source, target))
    }

    /// Iterates over the indices of the existing arguments, in increasing order.
    pub fn iter_existing(&self) -> impl Iterator<Item = usize> + '_ {
        self.index_to_id
            .iter()
            .enumerate()
            .filter_map(|(i, id)| id.map(|_| i))
    }

    /// Returns the number of existing arguments.
    pub fn n_arguments(&self) -> usize {
        self.id_to_index.len()
    }

    /// Returns the number of attacks.
    pub fn n_attacks(&self) -> usize {
        self.attacks.len()
    }

    /// Returns the size of the index range, placeholders included.
    pub fn n_indices(&self) -> usize {
        self.index_to_id.len()
    }

    /// Returns the number of placeholder indices still available.
    pub fn n_placeholders(&self) -> usize {
        self.n_placeholders
    }

    /// Returns the number of placeholders the next buffer growth will reserve.
    pub fn buffer_capacity(&self) -> usize {
        self.buffer_capacity
    }

    /// Returns the current mode.
    pub fn mode(&self) -> FrameworkMode {
        self.mode
    }

    /// Switches to static mode for the remaining lifetime of the framework.
    pub fn set_static(&mut self) {
        self.mode = FrameworkMode::Static;
    }

    /// Returns `true` iff the index range was extended by new arguments since the last buffer growth.
    pub fn needs_growth(&self) -> bool {
        self.needs_growth
    }

    /// Reserves new placeholder indices and doubles the capacity for the next growth.
    pub fn grow_buffer(&mut self) {
        let n = self.buffer_capacity;
        debug!(
            "growing the argument buffer by {} placeholders ({} indices so far)",
            n,
            self.index_to_id.len()
        );
        self.index_to_id.resize(self.index_to_id.len() + n, None);
        self.n_placeholders += n;
        self.buffer_capacity <<= 1;
        self.needs_growth = false;
        self.static_structure.take();
    }

    /// Returns the current variable layout.
    pub fn layout(&self) -> &VariableLayout {
        &self.layout
    }

    /// Synchronizes the variable layout with the current index range and mode.
    ///
    /// Returns `true` iff the numbering of the variables has changed, i.e. a new layout version was created.
    pub fn refresh_layout(&mut self, with_range: bool) -> bool {
        let changed = self.layout.n_indices() != self.n_indices() || self.layout.mode() != self.mode;
        let version = self.layout.version() + usize::from(changed);
        self.layout = VariableLayout::new(self.mode, self.n_indices(), with_range, version);
        changed
    }

    /// Returns the attack data required by the static encodings.
    pub fn static_structure(&self) -> &StaticStructure {
        self.static_structure
            .get_or_init(|| StaticStructure::compute(self.n_indices(), &self.attacks))
    }

    /// Returns the assumptions describing the current structure to a dynamic encoding.
    ///
    /// In static mode, the structure is part of the clauses and no assumption is returned.
    pub fn structure_assumptions(&self) -> Vec<Literal> {
        if self.layout.mode() == FrameworkMode::Static {
            return vec![];
        }
        let n = self.layout.n_indices();
        let mut assumptions = Vec::with_capacity(n + n * n);
        for i in 0..n {
            assumptions.push(self.layout.arg_exists(i).with_polarity(self.exists(i)));
        }
        for i in 0..n {
            for j in 0..n {
                assumptions.push(self.layout.att_exists(i, j).with_polarity(self.has_attack(i, j)));
            }
        }
        assumptions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn framework(mode: FrameworkMode, n: i32, attacks: &[(i32, i32)]) -> DynamicFramework {
        let mut af = DynamicFramework::new(mode);
        (1..=n).for_each(|i| af.add_argument(i).unwrap());
        attacks
            .iter()
            .for_each(|(a, b)| af.add_attack(*a, *b).unwrap());
        af
    }

    #[test]
    fn test_add_argument_errors() {
        let mut af = DynamicFramework::new(FrameworkMode::Dynamic);
        assert!(af.add_argument(-1).is_err());
        af.add_argument(0).unwrap();
        assert!(af.add_argument(0).is_err());
        assert_eq!(1, af.n_arguments());
    }

    #[test]
    fn test_attack_errors() {
        let mut af = framework(FrameworkMode::Static, 2, &[(1, 2)]);
        assert!(af.add_attack(1, 2).is_err());
        assert!(af.add_attack(1, 3).is_err());
        assert!(af.del_attack(2, 1).is_err());
        assert!(af.del_attack(3, 1).is_err());
        af.del_attack(1, 2).unwrap();
        assert_eq!(0, af.n_attacks());
    }

    #[test]
    fn test_del_argument_removes_attacks() {
        let mut af = framework(FrameworkMode::Static, 3, &[(1, 2), (2, 3), (3, 1)]);
        af.del_argument(2).unwrap();
        assert_eq!(1, af.n_attacks());
        assert!(af.has_attack(2, 0));
        assert!(!af.exists(1));
        assert!(af.del_argument(2).is_err());
        assert!(af.add_attack(1, 2).is_err());
        af.add_argument(2).unwrap();
        assert_eq!(Some(3), af.index_of(2));
    }

    #[test]
    fn test_buffer_growth() {
        let mut af = DynamicFramework::new_with_parameters(FrameworkMode::Dynamic, 2, 100);
        af.add_argument(1).unwrap();
        assert!(af.needs_growth());
        af.grow_buffer();
        assert!(!af.needs_growth());
        assert_eq!(3, af.n_indices());
        assert_eq!(2, af.n_placeholders());
        assert_eq!(4, af.buffer_capacity());
        af.add_argument(2).unwrap();
        af.add_argument(3).unwrap();
        assert_eq!(Some(1), af.index_of(2));
        assert_eq!(Some(2), af.index_of(3));
        assert_eq!(3, af.n_indices());
        assert!(!af.needs_growth());
        af.add_argument(4).unwrap();
        assert!(af.needs_growth());
        assert_eq!(4, af.n_indices());
    }

    #[test]
    fn test_deleted_slot_not_reused() {
        let mut af = DynamicFramework::new_with_parameters(FrameworkMode::Dynamic, 4, 100);
        af.grow_buffer();
        af.add_argument(1).unwrap();
        af.del_argument(1).unwrap();
        af.add_argument(1).unwrap();
        assert_eq!(Some(1), af.index_of(1));
        assert_eq!(vec![1], af.iter_existing().collect::<Vec<usize>>());
    }

    #[test]
    fn test_threshold_switches_to_static() {
        let mut af = DynamicFramework::new_with_parameters(FrameworkMode::Dynamic, 16, 2);
        af.add_argument(1).unwrap();
        af.add_argument(2).unwrap();
        assert_eq!(FrameworkMode::Dynamic, af.mode());
        af.add_argument(3).unwrap();
        assert_eq!(FrameworkMode::Static, af.mode());
        af.del_argument(3).unwrap();
        af.del_argument(2).unwrap();
        assert_eq!(FrameworkMode::Static, af.mode());
    }

    #[test]
    fn test_layout_versions() {
        let mut af = DynamicFramework::new(FrameworkMode::Dynamic);
        af.add_argument(1).unwrap();
        af.grow_buffer();
        assert!(af.refresh_layout(false));
        let version = af.layout().version();
        af.add_argument(2).unwrap();
        assert!(!af.refresh_layout(false));
        assert_eq!(version, af.layout().version());
        af.set_static();
        assert!(af.refresh_layout(true));
        assert_eq!(version + 1, af.layout().version());
        assert!(af.layout().has_range());
    }

    #[test]
    fn test_static_structure() {
        let mut af = framework(FrameworkMode::Static, 3, &[(1, 1), (1, 2), (2, 1), (3, 2)]);
        assert!(af.static_structure().is_self_attacking(0));
        assert!(!af.static_structure().is_self_attacking(1));
        assert!(af.static_structure().is_symmetric(0, 1));
        assert!(af.static_structure().is_symmetric(1, 0));
        assert!(!af.static_structure().is_symmetric(2, 1));
        assert_eq!(&[0, 2], af.static_structure().attackers(1));
        af.del_attack(3, 2).unwrap();
        assert_eq!(&[0], af.static_structure().attackers(1));
    }

    #[test]
    fn test_structure_assumptions() {
        let mut af = DynamicFramework::new_with_parameters(FrameworkMode::Dynamic, 1, 100);
        af.add_argument(1).unwrap();
        af.add_attack(1, 1).unwrap();
        af.grow_buffer();
        af.refresh_layout(false);
        let layout = af.layout().clone();
        assert_eq!(
            vec![
                layout.arg_exists(0),
                layout.arg_exists(1).negate(),
                layout.att_exists(0, 0),
                layout.att_exists(0, 1).negate(),
                layout.att_exists(1, 0).negate(),
                layout.att_exists(1, 1).negate(),
            ],
            af.structure_assumptions()
        );
        af.set_static();
        af.refresh_layout(false);
        assert!(af.structure_assumptions().is_empty());
    }
}
