use anyhow::Result;
use clap::{App, ArgMatches};

/// A subcommand of the app.
///
/// Each command declares its own CLI arguments and has a unique name.
pub(crate) trait Command<'a> {
    fn name(&self) -> &str;

    /// Returns the clap subcommand describing the arguments of this command.
    fn clap_subcommand(&self) -> App<'a, 'a>;

    /// Executes the command; an error makes the app exit with a failure status.
    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()>;
}
