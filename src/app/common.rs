use super::{
    app_helper::AppHelper, cli_manager::logging_level_cli_arg, command::Command, AuthorsCommand,
    CheckCommand, FormatsCommand, ProblemsCommand, SolveCommand,
};
use anyhow::{Context, Result};
use clap::{Arg, ArgMatches};
use dynabri::{
    aa::{AAFramework, LabelType},
    dynamics::FrameworkMode,
    encodings::{BaseConstraint, EncodingOptions},
    io::InstanceReader,
    sat::{default_solver, SatSolver, SatSolverFactory, SolvingListener, SolvingResult},
    solvers::EngineOptions,
};
use log::{debug, info, warn};
use std::{
    ffi::OsString,
    fs::{self, File},
    io::BufReader,
    path::PathBuf,
    str::FromStr,
};

pub(crate) fn create_app_helper() -> AppHelper<'static> {
    let app_name = option_env!("CARGO_PKG_NAME").unwrap_or("unknown app name");
    let app_version = option_env!("CARGO_PKG_VERSION").unwrap_or("unknown version");
    let authors = option_env!("CARGO_PKG_AUTHORS").unwrap_or("unknown authors");
    let mut app = AppHelper::new(
        app_name,
        app_version,
        authors,
        "Dynabri, an incremental abstract argumentation solver.",
    );
    let commands: Vec<Box<dyn Command>> = vec![
        Box::new(AuthorsCommand::new(app_name, app_version, authors)),
        Box::new(CheckCommand::new()),
        Box::new(FormatsCommand::new()),
        Box::new(ProblemsCommand::new()),
        Box::new(SolveCommand::new()),
    ];
    for c in commands {
        app.add_command(c);
    }
    app
}

pub(crate) const ARG_INPUT: &str = "INPUT";

pub(crate) fn input_args() -> Arg<'static, 'static> {
    Arg::with_name(ARG_INPUT)
        .short("f")
        .empty_values(false)
        .multiple(false)
        .help("the input file that contains the AF")
        .required(true)
}

pub(crate) const ARG_PROBLEM: &str = "PROBLEM";
pub(crate) const ARG_ARG: &str = "ARG";

pub(crate) fn problem_args() -> Vec<Arg<'static, 'static>> {
    vec![
        Arg::with_name(ARG_PROBLEM)
            .short("p")
            .empty_values(false)
            .multiple(false)
            .help("the problem to solve")
            .required(true),
        Arg::with_name(ARG_ARG)
            .short("a")
            .empty_values(false)
            .multiple(false)
            .help("the argument (for DC/DS queries)")
            .required(false),
    ]
}

pub(crate) const ARG_READER: &str = "READER";

pub(crate) const READER_NAMES: [&str; 3] = ["iccma23", "apx", "tgf"];

pub(crate) fn reader_arg() -> Arg<'static, 'static> {
    Arg::with_name(ARG_READER)
        .short("r")
        .long("reader")
        .empty_values(false)
        .multiple(false)
        .possible_values(&READER_NAMES)
        .default_value(READER_NAMES[0])
        .help("the input file format")
        .required(false)
}

const ARG_MODE: &str = "MODE";
const ARG_PREFERRED_BASE: &str = "PREFERRED_BASE";
const ARG_SEMI_STABLE_BASE: &str = "SEMI_STABLE_BASE";
const ARG_IDEAL_BASE: &str = "IDEAL_BASE";
const ARG_STABLE_BASE: &str = "STABLE_BASE";
const ARG_NO_GROUNDED_IN_STABLE: &str = "NO_GROUNDED_IN_STABLE";
const ARG_NO_STABLE_SHORTCUT: &str = "NO_STABLE_SHORTCUT";

pub(crate) fn engine_args() -> Vec<Arg<'static, 'static>> {
    let base_arg = |name: &'static str,
                    long: &'static str,
                    values: &'static [&'static str],
                    default: &'static str,
                    help: &'static str| {
        Arg::with_name(name)
            .long(long)
            .empty_values(false)
            .multiple(false)
            .possible_values(values)
            .default_value(default)
            .help(help)
            .required(false)
    };
    vec![
        Arg::with_name(ARG_MODE)
            .long("mode")
            .empty_values(false)
            .multiple(false)
            .possible_values(&["static", "dynamic"])
            .default_value("static")
            .help("the way the framework is encoded")
            .required(false),
        base_arg(
            ARG_PREFERRED_BASE,
            "preferred-base",
            &["ad", "co"],
            "ad",
            "the constraint maximized by the preferred semantics",
        ),
        base_arg(
            ARG_SEMI_STABLE_BASE,
            "semi-stable-base",
            &["ad", "co"],
            "co",
            "the constraint the range is maximized under by the semi-stable semantics",
        ),
        base_arg(
            ARG_IDEAL_BASE,
            "ideal-base",
            &["ad", "co"],
            "ad",
            "the constraint used to compute the ideal semantics",
        ),
        base_arg(
            ARG_STABLE_BASE,
            "stable-base",
            &["cf", "ad", "co"],
            "cf",
            "the constraint completed by totality for the stable semantics",
        ),
        Arg::with_name(ARG_NO_GROUNDED_IN_STABLE)
            .long("no-grounded-in-stable")
            .takes_value(false)
            .help("do not assume the grounded extension when searching stable extensions"),
        Arg::with_name(ARG_NO_STABLE_SHORTCUT)
            .long("no-stable-shortcut")
            .takes_value(false)
            .help("do not look for stable extensions before semi-stable or stage searches"),
    ]
}

pub(crate) fn read_engine_options(arg_matches: &ArgMatches<'_>) -> Result<EngineOptions> {
    let base = |name| -> Result<BaseConstraint> {
        let value = arg_matches.value_of(name).unwrap_or_default();
        BaseConstraint::from_str(value)
            .with_context(|| format!(r#"unknown base constraint "{}""#, value))
    };
    let encoding_options = EncodingOptions {
        preferred_base: base(ARG_PREFERRED_BASE)?,
        semi_stable_base: base(ARG_SEMI_STABLE_BASE)?,
        ideal_base: base(ARG_IDEAL_BASE)?,
        stable_base: base(ARG_STABLE_BASE)?,
        grounded_in_stable: !arg_matches.is_present(ARG_NO_GROUNDED_IN_STABLE),
        stable_shortcut: !arg_matches.is_present(ARG_NO_STABLE_SHORTCUT),
    };
    let start_mode = match arg_matches.value_of(ARG_MODE) {
        Some("dynamic") => FrameworkMode::Dynamic,
        _ => FrameworkMode::Static,
    };
    info!(
        "using {:?} mode with encoding options {:?}",
        start_mode, encoding_options
    );
    Ok(EngineOptions {
        encoding_options,
        start_mode,
        ..EngineOptions::default()
    })
}

pub(crate) fn read_file_path<T>(
    file_path: &str,
    reader: &mut dyn InstanceReader<T>,
) -> Result<AAFramework<T>>
where
    T: LabelType,
{
    reader.add_warning_handler(Box::new(|line, msg| warn!("at line {}: {}", line, msg)));
    let canonicalized = canonicalize_file_path(file_path)?;
    info!("reading input file {:?}", canonicalized);
    let mut file_reader = BufReader::new(
        File::open(&canonicalized)
            .with_context(|| format!("while opening file {:?}", canonicalized))?,
    );
    let af = reader.read(&mut file_reader)?;
    info!(
        "the argumentation framework has {} argument(s) and {} attack(s)",
        af.n_arguments(),
        af.n_attacks(),
    );
    Ok(af)
}

/// Canonicalize a path given by the user.
pub(crate) fn canonicalize_file_path(file_path: &str) -> Result<PathBuf> {
    fs::canonicalize(PathBuf::from(file_path))
        .with_context(|| format!(r#"while opening file "{}""#, file_path))
}

/// A factory of default SAT solvers logging their searches.
#[derive(Default)]
pub(crate) struct LoggingSatSolverFactory;

impl SatSolverFactory for LoggingSatSolverFactory {
    fn new_solver(&self) -> Box<dyn SatSolver> {
        let mut solver = default_solver();
        solver.add_listener(Box::<SatSolvingLogger>::default());
        solver
    }
}

#[derive(Default)]
struct SatSolvingLogger;

impl SolvingListener for SatSolvingLogger {
    fn solving_start(&self, n_vars: usize, n_clauses: usize) {
        debug!(
            "launching SAT solver on an instance with {} variables and {} clauses",
            n_vars, n_clauses
        );
    }

    fn solving_end(&self, result: &SolvingResult) {
        let r = match result {
            SolvingResult::Satisfiable(_) => "SAT",
            SolvingResult::Unsatisfiable => "UNSAT",
            SolvingResult::Unknown => "UNKNOWN",
        };
        debug!("SAT solver ended with result {}", r);
    }
}

/// Translates the arguments given by the competition environment into the ones of the subcommand CLI.
#[allow(dead_code)]
pub(crate) fn translate_args_for_iccma<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    const COMMON_ARGS: [&str; 2] = ["--logging-level", "off"];
    let mut args = args.into_iter();
    let app_name = args.next().unwrap_or_else(|| "dynabri_iccma".into());
    let real_args = args.collect::<Vec<OsString>>();
    let with_common_args = |command: &str| {
        [command]
            .iter()
            .chain(COMMON_ARGS.iter())
            .map(OsString::from)
            .collect::<Vec<OsString>>()
    };
    let new_args = if real_args.is_empty() {
        with_common_args("authors")
    } else if real_args == ["--problems"] {
        with_common_args("problems")
    } else if real_args == ["--formats"] {
        with_common_args("formats")
    } else {
        let mut new_args = ["solve", "--with-certificate"]
            .iter()
            .map(OsString::from)
            .collect::<Vec<OsString>>();
        let has_logging_level = real_args
            .iter()
            .any(|a| a.to_string_lossy().starts_with("--logging-level"));
        new_args.extend(real_args.into_iter().map(|a| {
            if a == "-fo" {
                OsString::from("--reader")
            } else {
                a
            }
        }));
        if !has_logging_level {
            new_args.extend(COMMON_ARGS.iter().map(OsString::from));
        }
        new_args
    };
    std::iter::once(app_name).chain(new_args).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translate(args: &[&str]) -> Vec<String> {
        translate_args_for_iccma(args.iter().map(OsString::from))
            .into_iter()
            .map(|a| a.to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_translate_no_args() {
        assert_eq!(
            vec!["app", "authors", "--logging-level", "off"],
            translate(&["app"])
        );
    }

    #[test]
    fn test_translate_problems_and_formats() {
        assert_eq!(
            vec!["app", "problems", "--logging-level", "off"],
            translate(&["app", "--problems"])
        );
        assert_eq!(
            vec!["app", "formats", "--logging-level", "off"],
            translate(&["app", "--formats"])
        );
    }

    #[test]
    fn test_translate_solve() {
        assert_eq!(
            vec![
                "app",
                "solve",
                "--with-certificate",
                "-p",
                "DC-ST",
                "-f",
                "af.apx",
                "--reader",
                "apx",
                "-a",
                "a",
                "--logging-level",
                "off"
            ],
            translate(&["app", "-p", "DC-ST", "-f", "af.apx", "-fo", "apx", "-a", "a"])
        );
    }

    #[test]
    fn test_translate_keeps_logging_level() {
        assert_eq!(
            vec![
                "app",
                "solve",
                "--with-certificate",
                "-p",
                "SE-PR",
                "-f",
                "af.af",
                "--logging-level=debug"
            ],
            translate(&["app", "-p", "SE-PR", "-f", "af.af", "--logging-level=debug"])
        );
    }

    #[test]
    fn test_sat_solver_factory() {
        let factory = LoggingSatSolverFactory;
        let mut solver = factory.new_solver();
        solver.add_clause(vec![dynabri::sat::Literal::from(1i32)]);
        assert!(solver.solve().unwrap_model().is_some());
    }
}
