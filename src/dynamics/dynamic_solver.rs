use anyhow::Result;

/// A trait for argumentation solvers that are able to deal with dynamic argumentation frameworks.
///
/// Dynamic AF are frameworks that evolve during the time.
/// A solver may use some information gathered during previous computations in order to speedup further searches.
///
/// Arguments are given by non-negative integer identifiers.
/// Each failing operation returns an error and leaves the framework unchanged.
pub trait DynamicSolver {
    /// Adds a new argument to the underlying AF.
    fn add_argument(&mut self, id: i32) -> Result<()>;

    /// Removes an argument from the underlying AF, along with the attacks it is involved in.
    fn del_argument(&mut self, id: i32) -> Result<()>;

    /// Adds an attack to the underlying AF.
    fn add_attack(&mut self, source: i32, target: i32) -> Result<()>;

    /// Removes an attack from the underlying AF.
    fn del_attack(&mut self, source: i32, target: i32) -> Result<()>;
}
