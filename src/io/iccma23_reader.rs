use super::{specs::emit_warning, InstanceReader, WarningHandler};
use crate::aa::{AAFramework, Argument, ArgumentSet};
use anyhow::{anyhow, Context, Result};
use std::io::{BufRead, BufReader, Read};

/// A reader for the ICCMA 2023 format.
///
/// This object is used to read an [`AAFramework`] encoded using the ICCMA 2023 input format, as defined on [the competition website](https://iccma2023.github.io/rules.html).
/// The [LabelType](crate::aa::LabelType) of the returned argument frameworks is [usize].
///
/// A missing or invalid preamble is an error.
/// Attack lines that cannot be read are skipped after raising a warning.
///
/// # ICCMA 2023 format
///
/// The following content defines an Argumentation Framework with three arguments (given by the indexes `1`, `2` and `3`) and three attacks (`1` and `2` attack each other and `3` attacks `2`).
///
/// ```text
/// p af 3
/// 1 2
/// 2 1
/// 3 2
/// ```
#[derive(Default)]
pub struct Iccma23Reader {
    warning_handlers: Vec<WarningHandler>,
}

impl InstanceReader<usize> for Iccma23Reader {
    fn read(&self, reader: &mut dyn Read) -> Result<AAFramework<usize>> {
        let br = BufReader::new(reader);
        let mut af: Option<AAFramework<usize>> = None;
        for (i, line) in br.lines().enumerate() {
            let context = || format!("while reading line with index {}", i);
            let l = line.with_context(context)?;
            if l.starts_with('#') || l.trim().is_empty() {
                continue;
            }
            let words = l.split_whitespace().collect::<Vec<&str>>();
            match af.as_mut() {
                Some(framework) => {
                    if let Err(e) = read_attack(&words, framework) {
                        emit_warning(
                            &self.warning_handlers,
                            i,
                            format!(r#"ignoring line "{}": {}"#, l.trim(), e),
                        );
                    }
                }
                None => {
                    let n_args = read_preamble(&words).with_context(context)?;
                    let argument_set = ArgumentSet::new_with_labels(
                        (1..=n_args).collect::<Vec<usize>>().as_slice(),
                    );
                    af = Some(AAFramework::new_with_argument_set(argument_set));
                }
            }
        }
        af.ok_or_else(|| anyhow!("missing preamble"))
    }

    fn read_arg_from_str<'a>(
        &self,
        af: &'a AAFramework<usize>,
        arg: &str,
    ) -> Result<&'a Argument<usize>> {
        arg.parse::<usize>()
            .ok()
            .and_then(|n| af.argument_set().get_argument(&n).ok())
            .ok_or_else(|| anyhow!("unknown arg: {}", arg))
    }

    fn add_warning_handler(&mut self, h: WarningHandler) {
        self.warning_handlers.push(h);
    }
}

fn read_attack(words: &[&str], af: &mut AAFramework<usize>) -> Result<()> {
    if words.len() != 2 {
        return Err(anyhow!("expected 2 words, got {}", words.len()));
    }
    let read_arg = |word: &str, arg_type| match word.parse::<i32>() {
        Ok(n) if n >= 1 && (n as usize) <= af.n_arguments() => Ok(n),
        _ => Err(anyhow!("invalid argument index for {}", arg_type)),
    };
    let attacker = read_arg(words[0], "attacker")?;
    let attacked = read_arg(words[1], "attacked")?;
    af.new_attack_by_ids(attacker, attacked)
}

fn read_preamble(words: &[&str]) -> Result<usize> {
    if words.len() != 3 {
        return Err(anyhow!(
            r#"error in preamble; expected 3 words, got {}"#,
            words.len()
        ));
    }
    if words[0] != "p" {
        return Err(anyhow!(
            r#"error in first word of preamble; expected "p", got "{}""#,
            words[0]
        ));
    }
    if words[1] != "af" {
        return Err(anyhow!(
            r#"error in second word of preamble; expected "af", got "{}""#,
            words[1]
        ));
    }
    match words[2].parse::<i32>() {
        Ok(n) if n >= 0 => Ok(n as usize),
        _ => Err(anyhow!("error in preamble: invalid number of arguments")),
    }
}
