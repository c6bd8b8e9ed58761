use super::{specs::emit_warning, InstanceReader, WarningHandler};
use crate::aa::{AAFramework, Argument, ArgumentSet};
use anyhow::{anyhow, Context, Result};
use std::io::{BufRead, BufReader, Read};

/// A reader for the Trivial Graph Format.
///
/// The [LabelType](crate::aa::LabelType) of the returned argument frameworks is [String].
///
/// # Trivial Graph Format
///
/// Arguments are declared first, one per line (only the first word of the line is considered).
/// A line containing `#` ends the declarations.
/// Then come the attacks, one per line, given by the labels of the attacker and the attacked argument.
/// The attack section ends with the input or at the first empty line.
///
/// The following content defines an Argumentation Framework with three arguments labelled `a`, `b` and `c` and three attacks (`a` and `b` attack each other and `c` attacks `b`).
///
/// ```text
/// a
/// b
/// c
/// #
/// a b
/// b a
/// c b
/// ```
///
/// Repeated arguments or attacks and attack lines that cannot be read are skipped after raising a warning.
#[derive(Default)]
pub struct TgfReader {
    warning_handlers: Vec<WarningHandler>,
}

impl InstanceReader<String> for TgfReader {
    fn read(&self, reader: &mut dyn Read) -> Result<AAFramework<String>> {
        let mut af = AAFramework::new_with_argument_set(ArgumentSet::new_with_labels(&[]));
        let mut in_attacks = false;
        let br = BufReader::new(reader);
        for (i, line) in br.lines().enumerate() {
            let context = || format!("while reading line with index {}", i);
            let l = line.with_context(context)?;
            let words = l.split_whitespace().collect::<Vec<&str>>();
            let result = if in_attacks {
                match words.as_slice() {
                    [] => break,
                    [a, b] => af.new_attack(&a.to_string(), &b.to_string()),
                    _ => Err(anyhow!("expected 2 words, got {}", words.len())),
                }
            } else {
                match words.first() {
                    None => Ok(()),
                    Some(&"#") => {
                        in_attacks = true;
                        Ok(())
                    }
                    Some(a) => af.new_argument(a.to_string()),
                }
            };
            if let Err(e) = result {
                emit_warning(
                    &self.warning_handlers,
                    i,
                    format!(r#"ignoring line "{}": {:#}"#, l.trim(), e),
                );
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
