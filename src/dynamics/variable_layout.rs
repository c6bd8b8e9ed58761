use crate::sat::Literal;

/// The way a framework is encoded into CNF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameworkMode {
    /// Clauses are built from the current attacks and must be rebuilt after each structural change.
    Static,
    /// Clauses are built over the whole index range and the structure is given by assumptions.
    Dynamic,
}

/// The numbering of the SAT variables used to encode a framework.
///
/// Variables are split into contiguous blocks, one per role.
/// With `N` the size of the index range, the blocks are the following:
///
/// | role | static mode | dynamic mode |
/// |---|---|---|
/// | `accepted(i)` | `1..=N` | `1..=N` |
/// | `rejected(i)` | `N+1..=2N` | `N+1..=2N` |
/// | `range(i)` | `2N+1..=3N` (if required) | `2N+1..=3N` |
/// | `arg_exists(i)` | | `3N+1..=4N` |
/// | `att_exists(i,j)` | | `4N+1..=4N+N²` |
/// | `source_accepted(i,j)` | | `4N+N²+1..=4N+2N²` |
/// | `source_rejected(i,j)` | | `4N+2N²+1..=4N+3N²` |
///
/// Each time the index range or the mode changes, a layout with a new version number is built.
/// Literals obtained from a layout must not be mixed with literals obtained from a layout with another version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableLayout {
    mode: FrameworkMode,
    n_indices: usize,
    with_range: bool,
    version: usize,
}

fn lit(v: usize) -> Literal {
    Literal::from(v as isize)
}

impl VariableLayout {
    pub(crate) fn new(mode: FrameworkMode, n_indices: usize, with_range: bool, version: usize) -> Self {
        Self {
            mode,
            n_indices,
            with_range,
            version,
        }
    }

    /// Returns the encoding mode this layout was built for.
    pub fn mode(&self) -> FrameworkMode {
        self.mode
    }

    /// Returns the size of the index range.
    pub fn n_indices(&self) -> usize {
        self.n_indices
    }

    /// Returns the version of this layout.
    pub fn version(&self) -> usize {
        self.version
    }

    /// Returns `true` iff the range variables are part of the layout.
    pub fn has_range(&self) -> bool {
        self.with_range || self.mode == FrameworkMode::Dynamic
    }

    /// Returns the number of variables reserved by this layout.
    ///
    /// Variables above this number are free for auxiliary use.
    pub fn n_vars(&self) -> usize {
        let n = self.n_indices;
        match self.mode {
            FrameworkMode::Static if self.with_range => 3 * n,
            FrameworkMode::Static => 2 * n,
            FrameworkMode::Dynamic => 4 * n + 3 * n * n,
        }
    }

    /// Returns the literal stating that the argument at index `i` is accepted.
    pub fn accepted(&self, i: usize) -> Literal {
        lit(i + 1)
    }

    /// Returns the literal stating that the argument at index `i` is attacked by an accepted argument.
    pub fn rejected(&self, i: usize) -> Literal {
        lit(self.n_indices + i + 1)
    }

    /// Returns the literal stating that the argument at index `i` belongs to the range.
    pub fn range(&self, i: usize) -> Literal {
        debug_assert!(self.has_range());
        lit(2 * self.n_indices + i + 1)
    }

    /// Returns the literal stating that the index `i` holds an existing argument (dynamic mode only).
    pub fn arg_exists(&self, i: usize) -> Literal {
        debug_assert_eq!(FrameworkMode::Dynamic, self.mode);
        lit(3 * self.n_indices + i + 1)
    }

    /// Returns the literal stating that the attack from index `i` to index `j` exists (dynamic mode only).
    pub fn att_exists(&self, i: usize, j: usize) -> Literal {
        debug_assert_eq!(FrameworkMode::Dynamic, self.mode);
        lit(4 * self.n_indices + self.pair_offset(i, j))
    }

    /// Returns the literal stating that `i` is accepted and attacks `j` (dynamic mode only).
    pub fn source_accepted(&self, i: usize, j: usize) -> Literal {
        debug_assert_eq!(FrameworkMode::Dynamic, self.mode);
        let n = self.n_indices;
        lit(4 * n + n * n + self.pair_offset(i, j))
    }

    /// Returns the literal stating that `i` is rejected or does not attack `j` (dynamic mode only).
    pub fn source_rejected(&self, i: usize, j: usize) -> Literal {
        debug_assert_eq!(FrameworkMode::Dynamic, self.mode);
        let n = self.n_indices;
        lit(4 * n + 2 * n * n + self.pair_offset(i, j))
    }

    fn pair_offset(&self, i: usize, j: usize) -> usize {
        i * self.n_indices + j + 1
    }
}
