use std::{
    borrow::Cow,
    fmt,
    io::{self, BufRead},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use colored::Colorize;
use shell_words::split;

use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output;
use crate::config::CONFIG_KEYS;

/// Set to any value to read commands from stdin without prompts.
pub const SCRIPT_ENV: &str = "PROFIT_CORE_CLI_SCRIPT";

/// Second-word candidates for commands that take an action.
const ACTIONS: &[(&str, &[&str])] = &[
    ("revenue", &["add", "list", "remove"]),
    ("cost", &["add", "list", "remove"]),
    ("config", &["show", "set"]),
];

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<LedgerHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(LedgerHelper::from_context(context)));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
    output::info("Profit Core shell. Type `help` to list commands.");

    while context.running {
        let line = match editor.readline(&context.prompt()) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
                continue;
            }
            Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        editor.add_history_entry(trimmed).ok();
        if run_line(context, trimmed)? == LoopControl::Exit {
            break;
        }
    }
    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    for line in io::stdin().lock().lines() {
        let line = line?;
        if !context.running || run_line(context, &line)? == LoopControl::Exit {
            break;
        }
    }
    Ok(())
}

/// Executes one line, reporting command failures instead of returning them.
fn run_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CliError> {
    match handle_line(context, line) {
        Ok(control) => Ok(control),
        Err(err) => {
            context.report_error(err)?;
            Ok(LoopControl::Continue)
        }
    }
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(err);
            return Ok(LoopControl::Continue);
        }
    };
    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };
    // Comment lines let scripts annotate themselves.
    if raw.starts_with('#') {
        return Ok(LoopControl::Continue);
    }

    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    context.last_command = Some(line.trim().to_string());
    let control = context.dispatch(&raw.to_lowercase(), raw, &args)?;
    if control == LoopControl::Exit {
        context.running = false;
    }
    Ok(control)
}

/// Completion and usage hints for the interactive editor.
struct LedgerHelper {
    commands: Vec<(&'static str, &'static str)>,
}

impl LedgerHelper {
    fn from_context(context: &ShellContext) -> Self {
        let mut commands: Vec<_> = context
            .command_names()
            .into_iter()
            .filter_map(|name| context.command(name).map(|entry| (name, entry.usage)))
            .collect();
        commands.sort_unstable();
        Self { commands }
    }

    fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.iter().map(|(name, _)| *name)
    }

    /// Candidates for the next word, given the words already typed.
    fn candidates(&self, typed: &[&str]) -> Vec<&'static str> {
        match typed {
            [] => self.names().collect(),
            ["help"] => self.names().collect(),
            ["config", "set"] => CONFIG_KEYS.to_vec(),
            [command] => ACTIONS
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(command))
                .map(|(_, actions)| actions.to_vec())
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }
}

impl Helper for LedgerHelper {}

impl Completer for LedgerHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let head = &line[..pos];
        let start = head
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let typed: Vec<&str> = head[..start].split_whitespace().collect();
        let needle = head[start..].to_ascii_lowercase();
        let matches = self
            .candidates(&typed)
            .into_iter()
            .filter(|candidate| candidate.starts_with(&needle))
            .map(|candidate| Pair {
                display: candidate.to_string(),
                replacement: candidate.to_string(),
            })
            .collect();
        Ok((start, matches))
    }
}

impl Hinter for LedgerHelper {
    type Hint = String;

    /// Shows the rest of the usage line once a full command name and a
    /// trailing space have been typed.
    fn hint(&self, line: &str, pos: usize, _ctx: &ReadlineContext<'_>) -> Option<String> {
        if pos != line.len() {
            return None;
        }
        let command = line.strip_suffix(' ')?.trim_start();
        let (_, usage) = self
            .commands
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(command))?;
        usage
            .strip_prefix(command)
            .map(str::trim_start)
            .filter(|rest| !rest.is_empty())
            .map(str::to_string)
    }
}

impl Highlighter for LedgerHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(hint.dimmed().to_string())
    }
}

impl Validator for LedgerHelper {}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    split(input).map_err(|err| ParseError {
        message: err.to_string(),
    })
}

#[derive(Debug)]
pub(crate) struct ParseError {
    message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not parse command line: {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use chrono::NaiveDate;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn helper(temp: &TempDir) -> LedgerHelper {
        let context = ShellContext::with_base(
            CliMode::Script,
            temp.path().to_path_buf(),
            Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())),
        )
        .unwrap();
        LedgerHelper::from_context(&context)
    }

    #[test]
    fn quoted_arguments_stay_together() {
        let tokens = parse_command_line(r#"cost add "Office Rent" 1500 'March rent'"#).unwrap();
        assert_eq!(tokens, vec!["cost", "add", "Office Rent", "1500", "March rent"]);
    }

    #[test]
    fn unbalanced_quotes_are_reported() {
        let err = parse_command_line("revenue add 10 \"oops").unwrap_err();
        assert!(err.to_string().contains("could not parse"));
    }

    #[test]
    fn candidates_follow_the_typed_words() {
        let temp = TempDir::new().unwrap();
        let helper = helper(&temp);
        assert!(helper.candidates(&[]).contains(&"allocate"));
        assert_eq!(helper.candidates(&["revenue"]), vec!["add", "list", "remove"]);
        assert_eq!(helper.candidates(&["Config"]), vec!["show", "set"]);
        assert_eq!(helper.candidates(&["config", "set"]), CONFIG_KEYS.to_vec());
        assert!(helper.candidates(&["help"]).contains(&"dashboard"));
        assert!(helper.candidates(&["revenue", "add"]).is_empty());
    }
}
