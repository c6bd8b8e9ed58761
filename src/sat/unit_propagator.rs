use super::{Literal, PropagationResult};

/// A clause store able to apply unit propagation under assumptions.
///
/// The store is not a solver: no decision is taken.
/// It is used by SAT solvers with no public propagation interface.
#[derive(Default)]
pub(crate) struct UnitPropagator {
    clauses: Vec<Vec<Literal>>,
    watched_by: Vec<Vec<usize>>,
    n_vars: usize,
    has_empty_clause: bool,
}

fn literal_code(l: Literal) -> usize {
    let var_index = usize::from(l.var()) - 1;
    (var_index << 1) | usize::from(!l.is_positive())
}

impl UnitPropagator {
    pub(crate) fn add_clause(&mut self, cl: &[Literal]) {
        if cl.is_empty() {
            self.has_empty_clause = true;
            return;
        }
        let max_var = cl.iter().map(|l| usize::from(l.var())).max().unwrap_or(0);
        if max_var > self.n_vars {
            self.n_vars = max_var;
            self.watched_by.resize(max_var << 1, vec![]);
        }
        let clause_index = self.clauses.len();
        cl.iter()
            .for_each(|l| self.watched_by[literal_code(*l)].push(clause_index));
        self.clauses.push(cl.to_vec());
    }

    pub(crate) fn n_clauses(&self) -> usize {
        self.clauses.len() + usize::from(self.has_empty_clause)
    }

    pub(crate) fn propagate(&self, assumptions: &[Literal]) -> PropagationResult {
        if self.has_empty_clause {
            return PropagationResult::Conflict;
        }
        let n_vars = assumptions
            .iter()
            .map(|l| usize::from(l.var()))
            .max()
            .unwrap_or(0)
            .max(self.n_vars);
        let mut values: Vec<Option<bool>> = vec![None; n_vars];
        let mut queue = Vec::with_capacity(n_vars);
        fn enqueue(l: Literal, values: &mut [Option<bool>], queue: &mut Vec<Literal>) -> bool {
            let index = usize::from(l.var()) - 1;
            match values[index] {
                Some(v) => v == l.is_positive(),
                None => {
                    values[index] = Some(l.is_positive());
                    queue.push(l);
                    true
                }
            }
        }
        for l in assumptions {
            if !enqueue(*l, &mut values, &mut queue) {
                return PropagationResult::Conflict;
            }
        }
        for cl in self.clauses.iter().filter(|cl| cl.len() == 1) {
            if !enqueue(cl[0], &mut values, &mut queue) {
                return PropagationResult::Conflict;
            }
        }
        let mut next = 0;
        while next < queue.len() {
            let falsified = queue[next].negate();
            next += 1;
            let watchers = match self.watched_by.get(literal_code(falsified)) {
                Some(w) => w,
                None => continue,
            };
            for clause_index in watchers {
                let mut unassigned = None;
                let mut n_unassigned = 0;
                let mut satisfied = false;
                for l in self.clauses[*clause_index].iter() {
                    match values[usize::from(l.var()) - 1] {
                        Some(v) if v == l.is_positive() => {
                            satisfied = true;
                            break;
                        }
                        Some(_) => {}
                        None => {
                            n_unassigned += 1;
                            unassigned = Some(*l);
                        }
                    }
                }
                if satisfied {
                    continue;
                }
                match (n_unassigned, unassigned) {
                    (0, _) => return PropagationResult::Conflict,
                    (1, Some(l)) => {
                        enqueue(l, &mut values, &mut queue);
                    }
                    _ => {}
                }
            }
        }
        PropagationResult::Propagated(
            values
                .iter()
                .enumerate()
                .filter_map(|(i, v)| v.map(|b| Literal::from(i as isize + 1).with_polarity(b)))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause;

    #[test]
    fn test_propagate_chain() {
        let mut p = UnitPropagator::default();
        p.add_clause(&clause![-1, 2]);
        p.add_clause(&clause![-2, 3]);
        p.add_clause(&clause![4, 5]);
        assert_eq!(
            PropagationResult::Propagated(clause![1, 2, 3]),
            p.propagate(&clause![1])
        );
    }

    #[test]
    fn test_propagate_units() {
        let mut p = UnitPropagator::default();
        p.add_clause(&clause![-1]);
        p.add_clause(&clause![1, 2]);
        assert_eq!(
            PropagationResult::Propagated(clause![-1, 2]),
            p.propagate(&[])
        );
    }

    #[test]
    fn test_propagate_conflict() {
        let mut p = UnitPropagator::default();
        p.add_clause(&clause![-1, 2]);
        p.add_clause(&clause![-1, -2]);
        assert_eq!(PropagationResult::Conflict, p.propagate(&clause![1]));
    }

    #[test]
    fn test_contradictory_assumptions() {
        let p = UnitPropagator::default();
        assert_eq!(PropagationResult::Conflict, p.propagate(&clause![1, -1]));
    }

    #[test]
    fn test_empty_clause() {
        let mut p = UnitPropagator::default();
        p.add_clause(&[]);
        assert_eq!(1, p.n_clauses());
        assert_eq!(PropagationResult::Conflict, p.propagate(&[]));
    }

    #[test]
    fn test_assumption_beyond_clauses() {
        let mut p = UnitPropagator::default();
        p.add_clause(&clause![1, 2]);
        assert_eq!(
            PropagationResult::Propagated(clause![1, -2, 5]),
            p.propagate(&clause![-2, 5])
        );
    }
}
