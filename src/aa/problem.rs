use anyhow::{anyhow, Context, Result};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter};

/// The semantics associated with a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter)]
pub enum Semantics {
    /// The admissible semantics
    AD,
    /// The complete semantics
    CO,
    /// The preferred semantics
    PR,
    /// The stable semantics
    ST,
    /// The semi-stable semantics
    SST,
    /// The stage semantics
    STG,
    /// The ideal semantics
    ID,
}

impl Semantics {
    /// Returns `true` iff the semantics relies on range variables.
    pub fn uses_range(&self) -> bool {
        matches!(self, Semantics::SST | Semantics::STG)
    }

    /// Returns `true` iff the extensions of this semantics are obtained by a maximization process.
    pub fn is_maximal(&self) -> bool {
        matches!(
            self,
            Semantics::PR | Semantics::SST | Semantics::STG | Semantics::ID
        )
    }
}

impl TryFrom<&str> for Semantics {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Semantics::iter()
            .find(|s| s.as_ref().eq_ignore_ascii_case(value))
            .ok_or_else(|| anyhow!(r#"undefined semantics "{}""#, value))
    }
}

/// The query to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumIter)]
pub enum Query {
    /// Check credulous acceptance
    DC,
    /// Check skeptical acceptance
    DS,
    /// Compute a single extension
    SE,
}

impl TryFrom<&str> for Query {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Query::iter()
            .find(|q| q.as_ref().eq_ignore_ascii_case(value))
            .ok_or_else(|| anyhow!(r#"undefined query "{}""#, value))
    }
}

/// Reads a string depicting a problem with an XX-YY pattern.
///
/// This functions reads a problem string following the format in ICCMA competitions.
/// The string is split at the first hyphen found in it.
/// The substring before this hyphen is considered as the query, while the substring after it is considered as the semantics.
///
/// In case there is no hyphen, an error is returned.
///
/// # Example
///
/// ```
/// # use dynabri::aa::{read_problem_string, Query, Semantics};
/// assert_eq!((Query::DC, Semantics::SST), read_problem_string("DC-SST").unwrap());
/// ```
pub fn read_problem_string(problem: &str) -> Result<(Query, Semantics)> {
    let context = || format!(r#"while parsing problem string "{}""#, problem);
    match problem.find('-') {
        Some(n) => {
            let query = Query::try_from(&problem[0..n]).with_context(context)?;
            let semantics = Semantics::try_from(&problem[1 + n..]).with_context(context)?;
            Ok((query, semantics))
        }
        None => Err(anyhow!("no hyphen in problem string")).with_context(context),
    }
}

/// Iterates over all the problem strings handled by the solver, queries first.
pub fn iter_problem_strings() -> impl Iterator<Item = String> {
    Query::iter().flat_map(|q| Semantics::iter().map(move |s| format!("{}-{}", q.as_ref(), s.as_ref())))
}
