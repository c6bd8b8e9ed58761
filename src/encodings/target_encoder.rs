use crate::sat::{Literal, SatSolver};

/// Encodes the conjunction of a set of literals and returns a literal standing for it.
///
/// No literal is returned for an empty set; a single literal is returned as is.
/// Otherwise, a fresh literal `t` is requested and set equivalent to the conjunction.
/// Assuming `t` requires all the literals to hold, while assuming its negation requires at least one of them to be falsified.
///
/// # Example
///
/// ```
/// # use dynabri::encodings::encode_conjunction;
/// # use dynabri::sat::{default_solver, Literal};
/// let mut solver = default_solver();
/// let lits = vec![Literal::from(1), Literal::from(2)];
/// let t = encode_conjunction(&lits, solver.as_mut(), || Literal::from(3)).unwrap();
/// assert_eq!(Literal::from(3), t);
/// let model = solver
///     .solve_under_assumptions(&[t.negate(), Literal::from(1)])
///     .unwrap_model()
///     .unwrap();
/// assert!(model.is_true(Literal::from(-2)));
/// ```
pub fn encode_conjunction<F>(
    lits: &[Literal],
    solver: &mut dyn SatSolver,
    fresh_var: F,
) -> Option<Literal>
where
    F: FnOnce() -> Literal,
{
    match lits {
        [] => None,
        [l] => Some(*l),
        _ => {
            let t = fresh_var();
            let mut full_cl = Vec::with_capacity(lits.len() + 1);
            full_cl.push(t);
            lits.iter().for_each(|l| {
                solver.add_clause(vec![t.negate(), *l]);
                full_cl.push(l.negate());
            });
            solver.add_clause(full_cl);
            Some(t)
        }
    }
}
