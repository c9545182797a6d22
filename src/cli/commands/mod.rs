pub mod allocate;
pub mod auth;
pub mod config;
pub mod cost;
pub mod report;
pub mod revenue;
pub mod system;

use chrono::NaiveDate;

use crate::cli::core::CommandError;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::core::input;

const ROOT_COMMAND_ORDER: &[&str] = &[
    "register",
    "login",
    "logout",
    "whoami",
    "revenue",
    "cost",
    "allocate",
    "dashboard",
    "report",
    "history",
    "config",
    "help",
    "version",
    "exit",
];

pub(crate) fn all_entries() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(auth::definitions());
    commands.extend(revenue::definitions());
    commands.extend(cost::definitions());
    commands.extend(allocate::definitions());
    commands.extend(report::definitions());
    commands.extend(config::definitions());
    commands.extend(system::definitions());
    commands
}

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let mut entries = all_entries();
    entries.sort_by_key(|entry| {
        ROOT_COMMAND_ORDER
            .iter()
            .position(|name| entry.name.eq_ignore_ascii_case(name))
            .unwrap_or(ROOT_COMMAND_ORDER.len())
    });
    for entry in entries {
        registry.register(entry);
    }
}

/// Arguments split into positionals and the `--date`/`--sub` options.
#[derive(Debug, Default)]
pub(crate) struct ParsedArgs<'a> {
    pub positional: Vec<&'a str>,
    pub date: Option<&'a str>,
    pub subcategory: Option<&'a str>,
}

impl<'a> ParsedArgs<'a> {
    pub fn parse(args: &[&'a str]) -> Result<Self, CommandError> {
        let mut parsed = ParsedArgs::default();
        let mut iter = args.iter().copied();
        while let Some(arg) = iter.next() {
            let slot = match arg {
                "--date" => &mut parsed.date,
                "--sub" => &mut parsed.subcategory,
                flag if flag.starts_with("--") => {
                    return Err(CommandError::InvalidArguments(format!(
                        "unknown option `{flag}`"
                    )))
                }
                value => {
                    parsed.positional.push(value);
                    continue;
                }
            };
            let value = iter.next().ok_or_else(|| {
                CommandError::InvalidArguments(format!("option `{arg}` needs a value"))
            })?;
            *slot = Some(value);
        }
        Ok(parsed)
    }

    pub fn date(&self) -> Result<Option<NaiveDate>, CommandError> {
        self.date
            .map(input::parse_date)
            .transpose()
            .map_err(CommandError::from)
    }
}

/// Converts a 1-based index typed by the user into a 0-based one.
pub(crate) fn parse_position(raw: &str) -> Result<usize, CommandError> {
    match raw.trim().parse::<usize>() {
        Ok(position) if position >= 1 => Ok(position - 1),
        _ => Err(CommandError::InvalidArguments(format!(
            "`{raw}` is not a valid position (use 1, 2, ...)"
        ))),
    }
}

pub(crate) fn usage(text: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {text}"))
}
