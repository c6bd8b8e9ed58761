use super::{specs::emit_warning, InstanceReader, WarningHandler};
use crate::aa::{AAFramework, Argument, ArgumentSet};
use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::io::{BufRead, BufReader, Read};

const ARG_NAME_PATTERN: &str = r"\s*([^\s(),]+)\s*";

lazy_static! {
    static ref ARG_LINE_PATTERN: Regex =
        Regex::new(&format!(r"^\s*arg\({}\)\.\s*$", ARG_NAME_PATTERN)).unwrap();
    static ref ATT_LINE_PATTERN: Regex = Regex::new(&format!(
        r"^\s*att\({},{}\)\.\s*$",
        ARG_NAME_PATTERN, ARG_NAME_PATTERN,
    ))
    .unwrap();
}

enum AspartixLine {
    Argument(String),
    Attack(String, String),
    Ignored,
}

fn read_line(l: &str) -> Result<AspartixLine> {
    let trimmed = l.trim();
    if trimmed.is_empty() || trimmed.starts_with('%') || trimmed.starts_with('/') {
        return Ok(AspartixLine::Ignored);
    }
    if let Some(c) = ARG_LINE_PATTERN.captures(l) {
        return Ok(AspartixLine::Argument(c[1].to_string()));
    }
    if let Some(c) = ATT_LINE_PATTERN.captures(l) {
        return Ok(AspartixLine::Attack(c[1].to_string(), c[2].to_string()));
    }
    Err(anyhow!(r#"cannot parse line "{}""#, trimmed))
}

/// A reader for the Aspartix format.
///
/// This object is used to read an [`AAFramework`] encoded using the Aspartix input format, as defined on [the Aspartix website](https://www.dbai.tuwien.ac.at/research/argumentation/aspartix/dung.html).
/// The [LabelType](crate::aa::LabelType) of the returned argument frameworks is [String].
///
/// Arguments get their identifiers in declaration order.
/// Empty lines and lines beginning with `%` or `/` are ignored.
/// Lines that cannot be parsed, repeated arguments or attacks, and attacks involving undeclared arguments are skipped after raising a warning.
///
/// # Aspartix format
///
/// The following content defines an Argumentation Framework with three arguments labelled `a`, `b` and `c` and three attacks (`a` and `b` attack each other and `c` attacks `b`).
///
/// ```text
/// arg(a).
/// arg(b).
/// arg(c).
/// att(a,b).
/// att(b,a).
/// att(c,b).
/// ```
#[derive(Default)]
pub struct AspartixReader {
    warning_handlers: Vec<WarningHandler>,
}

impl InstanceReader<String> for AspartixReader {
    fn read(&self, reader: &mut dyn Read) -> Result<AAFramework<String>> {
        let mut af = AAFramework::new_with_argument_set(ArgumentSet::new_with_labels(&[]));
        let br = BufReader::new(reader);
        for (i, line) in br.lines().enumerate() {
            let context = || format!("while reading line with index {}", i);
            let l = line.with_context(context)?;
            let result = match read_line(&l) {
                Ok(AspartixLine::Argument(a)) => af.new_argument(a),
                Ok(AspartixLine::Attack(a, b)) => af.new_attack(&a, &b),
                Ok(AspartixLine::Ignored) => Ok(()),
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                emit_warning(&self.warning_handlers, i, format!("{:#}", e));
            }
        }
        Ok(af)
    }

    fn read_arg_from_str<'a>(
        &self,
        af: &'a AAFramework<String>,
        arg: &str,
    ) -> Result<&'a Argument<String>> {
        af.argument_set().get_argument(&arg.to_string())
    }

    fn add_warning_handler(&mut self, h: WarningHandler) {
        self.warning_handlers.push(h);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::specs::tests::collect_warnings;

    #[test]
    fn test_arg_line_pattern_ok() {
        let assert_arg_name = |expected: &str, actual| match read_line(actual).unwrap() {
            AspartixLine::Argument(a) => assert_eq!(expected, a),
            _ => panic!("not an argument line: {}", actual),
        };
        assert_arg_name("a", "arg(a).");
        assert_arg_name("a", "arg( a ).");
        assert_arg_name("a", "    arg(a).   ");
        assert_arg_name("_a", "arg(_a).");
        assert_arg_name("1a.", "arg(1a.).");
    }

    #[test]
    fn test_att_line_pattern_ok() {
        let assert_att_names = |expected0: &str, expected1: &str, actual| {
            match read_line(actual).unwrap() {
                AspartixLine::Attack(a, b) => {
                    assert_eq!((expected0, expected1), (a.as_str(), b.as_str()))
                }
                _ => panic!("not an attack line: {}", actual),
            }
        };
        assert_att_names("a", "b", "att(a,b).");
        assert_att_names("a", "b", "att( a , b ).");
        assert_att_names("a", "b", "    att(a,b).   ");
        assert_att_names("a1_", "b", "att(a1_,b).");
    }

    #[test]
    fn test_wrong_lines() {
        [
            "rg(a).",
            "arg(a)",
            "arg().",
            "arg(a b).",
            "arg(a).arg(b).",
            "att(a,b)",
            "att(a,).",
            "att(,b).",
            "att(a,b,c).",
            "att(a,b).att(c,d).",
        ]
        .iter()
        .for_each(|l| assert!(read_line(l).is_err(), "{}", l));
    }

    #[test]
    fn test_ignored_lines() {
        ["", "   ", "% comment", "/* comment */"]
            .iter()
            .for_each(|l| assert!(matches!(read_line(l).unwrap(), AspartixLine::Ignored)));
    }

    fn str_args(af: &AAFramework<String>) -> Vec<String> {
        af.argument_set().iter().map(|s| format!("{}", s)).collect()
    }

    fn str_attacks(af: &AAFramework<String>) -> Vec<String> {
        af.iter_attacks()
            .map(|a| format!("({},{})", a.attacker(), a.attacked()))
            .collect()
    }

    #[test]
    fn test_read_ok() {
        let instance = "arg(a).\narg(b).\natt(a,b).\n";
        let af = AspartixReader::default()
            .read(&mut instance.as_bytes())
            .unwrap();
        assert_eq!(vec!["a".to_string(), "b".to_string()], str_args(&af));
        assert_eq!(vec!["(a,b)".to_string()], str_attacks(&af));
        assert_eq!(2, af.argument_set().get_argument(&"b".to_string()).unwrap().id());
    }

    #[test]
    fn test_read_empty() {
        let instance = "\n";
        let af = AspartixReader::default()
            .read(&mut instance.as_bytes())
            .unwrap();
        assert!(str_args(&af).is_empty());
        assert!(str_attacks(&af).is_empty());
    }

    #[test]
    fn test_read_arg_after_att() {
        let instance = "arg(a).\narg(b).\natt(a,b).\narg(c).\natt(c,a).\n";
        let af = AspartixReader::default()
            .read(&mut instance.as_bytes())
            .unwrap();
        assert_eq!(3, af.n_arguments());
        assert_eq!(2, af.n_attacks());
    }

    #[test]
    fn test_read_skipped_lines() {
        let instance =
            "% header\narg(a).\nargument(b).\narg(b).\narg(a).\natt(a,c).\natt(a,b).\natt(a,b).\n";
        let mut reader = AspartixReader::default();
        let warnings = collect_warnings(&mut reader);
        let af = reader.read(&mut instance.as_bytes()).unwrap();
        assert_eq!(vec!["a".to_string(), "b".to_string()], str_args(&af));
        assert_eq!(vec!["(a,b)".to_string()], str_attacks(&af));
        let warnings = warnings.borrow();
        assert_eq!(
            vec![3, 5, 6, 8],
            warnings.iter().map(|(i, _)| *i).collect::<Vec<usize>>()
        );
        assert!(warnings[0].1.starts_with("cannot parse line"));
    }

    #[test]
    fn test_read_arg_from_str() {
        let instance = "arg(a).\natt(a,a).\n";
        let reader = AspartixReader::default();
        let af = reader.read(&mut instance.as_bytes()).unwrap();
        assert_eq!(1, af.n_arguments());
        assert!(reader.read_arg_from_str(&af, "a").is_ok());
        assert!(reader.read_arg_from_str(&af, "b").is_err());
    }
}
