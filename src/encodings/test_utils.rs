use super::ConstraintsEncoder;
use crate::{
    aa::Semantics,
    dynamics::{DynamicFramework, FrameworkMode},
    sat::default_solver,
};

pub(crate) fn framework(mode: FrameworkMode, n: i32, attacks: &[(i32, i32)]) -> DynamicFramework {
    let mut af = DynamicFramework::new(mode);
    (1..=n).for_each(|i| af.add_argument(i).unwrap());
    attacks
        .iter()
        .for_each(|(a, b)| af.add_attack(*a, *b).unwrap());
    prepare(&mut af);
    af
}

pub(crate) fn prepare(af: &mut DynamicFramework) {
    if af.mode() == FrameworkMode::Dynamic && af.needs_growth() {
        af.grow_buffer();
    }
    af.refresh_layout(true);
}

/// Checks that the sets of existing arguments compatible with the encoding are exactly the expected ones.
pub(crate) fn assert_models_match<F>(
    af: &mut DynamicFramework,
    encoders: &[&dyn ConstraintsEncoder],
    expected: F,
) where
    F: Fn(&DynamicFramework, &[usize]) -> bool,
{
    prepare(af);
    let mut solver = default_solver();
    encoders
        .iter()
        .for_each(|e| e.encode_constraints(af, solver.as_mut()));
    let existing = af.iter_existing().collect::<Vec<usize>>();
    for set in subsets(af) {
        let mut assumptions = af.structure_assumptions();
        existing.iter().for_each(|i| {
            assumptions.push(af.layout().accepted(*i).with_polarity(set.contains(i)))
        });
        let sat = solver
            .solve_under_assumptions(&assumptions)
            .unwrap_model()
            .is_some();
        assert_eq!(
            expected(af, &set),
            sat,
            "mode {:?}, set {:?}",
            af.layout().mode(),
            set
        );
    }
}

pub(crate) fn subsets(af: &DynamicFramework) -> Vec<Vec<usize>> {
    let existing = af.iter_existing().collect::<Vec<usize>>();
    (0..1usize << existing.len())
        .map(|mask| {
            existing
                .iter()
                .enumerate()
                .filter(|(k, _)| mask & (1 << k) != 0)
                .map(|(_, i)| *i)
                .collect()
        })
        .collect()
}

fn attacked_by(af: &DynamicFramework, set: &[usize], target: usize) -> bool {
    set.iter().any(|i| af.has_attack(*i, target))
}

fn defended_by(af: &DynamicFramework, set: &[usize], arg: usize) -> bool {
    af.iter_existing()
        .filter(|a| af.has_attack(*a, arg))
        .all(|a| attacked_by(af, set, a))
}

pub(crate) fn is_conflict_free(af: &DynamicFramework, set: &[usize]) -> bool {
    set.iter().all(|i| !attacked_by(af, set, *i))
}

pub(crate) fn is_admissible(af: &DynamicFramework, set: &[usize]) -> bool {
    is_conflict_free(af, set) && set.iter().all(|i| defended_by(af, set, *i))
}

pub(crate) fn is_complete(af: &DynamicFramework, set: &[usize]) -> bool {
    is_admissible(af, set)
        && af
            .iter_existing()
            .all(|i| set.contains(&i) || !defended_by(af, set, i))
}

pub(crate) fn is_stable(af: &DynamicFramework, set: &[usize]) -> bool {
    is_conflict_free(af, set)
        && af
            .iter_existing()
            .all(|i| set.contains(&i) || attacked_by(af, set, i))
}

pub(crate) fn range_of(af: &DynamicFramework, set: &[usize]) -> Vec<usize> {
    af.iter_existing()
        .filter(|i| set.contains(i) || attacked_by(af, set, *i))
        .collect()
}

fn is_strict_subset(a: &[usize], b: &[usize]) -> bool {
    a.len() < b.len() && a.iter().all(|x| b.contains(x))
}

fn maximal_by<F>(candidates: Vec<Vec<usize>>, key: F) -> Vec<Vec<usize>>
where
    F: Fn(&[usize]) -> Vec<usize>,
{
    let keys = candidates.iter().map(|c| key(c)).collect::<Vec<Vec<usize>>>();
    candidates
        .iter()
        .zip(keys.iter())
        .filter(|(_, k)| !keys.iter().any(|other| is_strict_subset(k, other)))
        .map(|(c, _)| c.clone())
        .collect()
}

/// Computes the extensions of a semantics by enumerating all the sets of arguments.
pub(crate) fn extensions(af: &DynamicFramework, semantics: Semantics) -> Vec<Vec<usize>> {
    let filtered = |f: fn(&DynamicFramework, &[usize]) -> bool| {
        subsets(af)
            .into_iter()
            .filter(|s| f(af, s))
            .collect::<Vec<Vec<usize>>>()
    };
    match semantics {
        Semantics::AD => filtered(is_admissible),
        Semantics::CO => filtered(is_complete),
        Semantics::ST => filtered(is_stable),
        Semantics::PR => maximal_by(filtered(is_admissible), |s| s.to_vec()),
        Semantics::SST => maximal_by(filtered(is_complete), |s| range_of(af, s)),
        Semantics::STG => maximal_by(filtered(is_conflict_free), |s| range_of(af, s)),
        Semantics::ID => {
            let preferred = extensions(af, Semantics::PR);
            let intersection = af
                .iter_existing()
                .filter(|i| preferred.iter().all(|p| p.contains(i)))
                .collect::<Vec<usize>>();
            let ideal = filtered(is_admissible)
                .into_iter()
                .filter(|s| s.iter().all(|i| intersection.contains(i)))
                .max_by_key(|s| s.len())
                .unwrap_or_default();
            vec![ideal]
        }
    }
}
