use super::{cli_manager::logging_level_cli_arg, command::Command, common};
use anyhow::{anyhow, Context, Result};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use dynabri::{
    aa::{read_problem_string, AAFramework, Argument, LabelType, Query, Semantics},
    io::{
        AspartixReader, Iccma23Reader, Iccma23Writer, InstanceReader, ResponseWriter, TgfReader,
    },
    solvers::{EngineOptions, EngineState, ReasoningEngine},
};
use log::{info, warn};

const CMD_NAME: &str = "solve";

const ARG_CERTIFICATE: &str = "CERTIFICATE";

pub(crate) struct SolveCommand;

impl SolveCommand {
    pub(crate) fn new() -> Self {
        SolveCommand
    }
}

impl<'a> Command<'a> for SolveCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Solves an argumentation framework problem")
            .setting(AppSettings::DisableVersion)
            .arg(common::input_args())
            .arg(common::reader_arg())
            .args(&common::problem_args())
            .arg(
                Arg::with_name(ARG_CERTIFICATE)
                    .short("c")
                    .long("with-certificate")
                    .takes_value(false)
                    .help("give a certificate for DC/DS problems when possible"),
            )
            .args(&common::engine_args())
            .arg(logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let file = arg_matches
            .value_of(common::ARG_INPUT)
            .ok_or_else(|| anyhow!("missing input file"))?;
        match arg_matches.value_of(common::ARG_READER) {
            Some("apx") => {
                let mut reader = AspartixReader::default();
                let af = common::read_file_path(file, &mut reader)?;
                execute_for_af(&af, &reader, arg_matches)
            }
            Some("tgf") => {
                let mut reader = TgfReader::default();
                let af = common::read_file_path(file, &mut reader)?;
                execute_for_af(&af, &reader, arg_matches)
            }
            _ => {
                let mut reader = Iccma23Reader::default();
                let af = common::read_file_path(file, &mut reader)?;
                execute_for_af(&af, &reader, arg_matches)
            }
        }
    }
}

fn execute_for_af<T>(
    af: &AAFramework<T>,
    reader: &dyn InstanceReader<T>,
    arg_matches: &ArgMatches<'_>,
) -> Result<()>
where
    T: LabelType,
{
    let (query, semantics) = read_problem_string(
        arg_matches
            .value_of(common::ARG_PROBLEM)
            .ok_or_else(|| anyhow!("missing problem"))?,
    )?;
    let arg = arg_matches
        .value_of(common::ARG_ARG)
        .map(|a| reader.read_arg_from_str(af, a))
        .transpose()
        .context("while parsing the argument passed to the command line")?;
    let arg = check_arg_definition(query, arg)?;
    let options = common::read_engine_options(arg_matches)?;
    let mut problem = Problem::new(af, semantics, options)?;
    let writer: &dyn ResponseWriter<T> = &Iccma23Writer;
    let mut out = std::io::stdout();
    let with_certificate = arg_matches.is_present(ARG_CERTIFICATE);
    match (query, arg) {
        (Query::SE, _) => match problem.solve(None, true)? {
            Some(ext) => writer.write_single_extension(&mut out, &ext),
            None => writer.write_no_extension(&mut out),
        },
        (Query::DC, Some(a)) => {
            let witness = problem.solve(Some(a), true)?;
            writer.write_acceptance_status(&mut out, witness.is_some())?;
            match witness {
                Some(ext) if with_certificate => writer.write_single_extension(&mut out, &ext),
                _ => Ok(()),
            }
        }
        (Query::DS, Some(a)) => {
            let counterexample = problem.solve(Some(a), false)?;
            writer.write_acceptance_status(&mut out, counterexample.is_none())?;
            match counterexample {
                Some(ext) if with_certificate => writer.write_single_extension(&mut out, &ext),
                _ => Ok(()),
            }
        }
        (_, None) => unreachable!(),
    }
}

fn check_arg_definition<T>(query: Query, arg: Option<&Argument<T>>) -> Result<Option<&Argument<T>>>
where
    T: LabelType,
{
    match query {
        Query::SE => {
            if arg.is_some() {
                warn!(
                    "unexpected argument on the command line (useless for query {})",
                    query.as_ref()
                );
            }
            Ok(None)
        }
        Query::DC | Query::DS => {
            if arg.is_none() {
                Err(anyhow!(
                    "missing argument on the command line (required for query {})",
                    query.as_ref()
                ))
            } else {
                Ok(arg)
            }
        }
    }
}

// A framework loaded into a reasoning engine, answering queries with labelled arguments.
struct Problem<'a, T>
where
    T: LabelType,
{
    af: &'a AAFramework<T>,
    engine: ReasoningEngine,
}

impl<'a, T> Problem<'a, T>
where
    T: LabelType,
{
    fn new(af: &'a AAFramework<T>, semantics: Semantics, options: EngineOptions) -> Result<Self> {
        let mut engine = ReasoningEngine::new_with_options_and_factory(
            options,
            Box::new(common::LoggingSatSolverFactory),
        );
        af.load_into(&mut engine)?;
        engine.set_semantics(semantics);
        Ok(Problem { af, engine })
    }

    // Returns the witness of a credulous query, or the counterexample of a skeptical one.
    fn solve(
        &mut self,
        arg: Option<&Argument<T>>,
        credulous: bool,
    ) -> Result<Option<Vec<&'a Argument<T>>>> {
        if let Some(a) = arg {
            self.engine.assume_in(a.id())?;
        }
        let state = self.engine.solve(credulous);
        info!("the engine answered {:?}", state);
        let has_witness = match state {
            EngineState::Accept => credulous,
            EngineState::Reject => !credulous,
            EngineState::Input | EngineState::Error => {
                return Err(anyhow!("the engine failed to answer the query"))
            }
        };
        if !has_witness {
            return Ok(None);
        }
        self.engine
            .extension()
            .iter()
            .map(|id| {
                self.af
                    .argument_set()
                    .get_argument_by_id(*id)
                    .ok_or_else(|| anyhow!("no argument with id {}", id))
            })
            .collect::<Result<Vec<&'a Argument<T>>>>()
            .map(Some)
    }
}
