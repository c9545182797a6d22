use crate::cli::commands::usage;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::config::CONFIG_KEYS;

const USAGE: &str = "config [show|set <currency_symbol|allowed_email_domain|recent_limit> <value>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change shell preferences",
        USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => show_config(context),
        [action] if action.eq_ignore_ascii_case("show") => show_config(context),
        [action, key, value @ ..] if action.eq_ignore_ascii_case("set") && !value.is_empty() => {
            set_config_value(context, key, &value.join(" "))
        }
        [action, ..] if action.eq_ignore_ascii_case("set") => Err(usage(USAGE)),
        [other, ..] => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{other}`"
        ))),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    output::section("Configuration");
    let config = &context.config;
    output::two_column(&[
        ("currency_symbol", config.currency_symbol.clone()),
        (
            "allowed_email_domain",
            config
                .allowed_email_domain
                .clone()
                .unwrap_or_else(|| "(any)".into()),
        ),
        ("recent_limit", config.recent_limit.to_string()),
        ("file", context.config_manager.path().display().to_string()),
    ]);
    Ok(())
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let key = key.to_ascii_lowercase();
    if !CONFIG_KEYS.contains(&key.as_str()) {
        return Err(CommandError::InvalidArguments(format!(
            "unknown setting `{key}` (expected one of: {})",
            CONFIG_KEYS.join(", ")
        )));
    }
    let mut updated = context.config.clone();
    updated.set(&key, value)?;
    context.config_manager.save(&updated)?;
    context.config = updated;
    output::success("Configuration updated.");
    Ok(())
}
