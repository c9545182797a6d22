use crate::cli::commands::{parse_position, usage, ParsedArgs};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::formatters::format_date;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::core::input::parse_amount;

const USAGE: &str = "revenue <add <amount> <description> [--date YYYY-MM-DD]|list|remove <n>>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new("revenue", "Record, list or remove revenues", USAGE, cmd_revenue)
        .signed_in()]
}

fn cmd_revenue(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(usage(USAGE));
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "add" => handle_add(context, rest),
        "list" => handle_list(context),
        "remove" => handle_remove(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown revenue subcommand `{other}`"
        ))),
    }
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args)?;
    let [amount, description @ ..] = parsed.positional.as_slice() else {
        return Err(usage("revenue add <amount> <description> [--date YYYY-MM-DD]"));
    };
    let value = parse_amount(amount)?;
    let description = description.join(" ");
    let date = parsed.date()?;
    let snapshot = context
        .manager_mut()?
        .add_revenue(value, &description, date)?;
    output::success(format!(
        "Revenue of {} recorded. Profit is now {}.",
        context.money(value),
        context.money(snapshot.profit())
    ));
    Ok(())
}

fn handle_list(context: &mut ShellContext) -> CommandResult {
    let ledger = context.manager()?.ledger();
    output::section("Revenues");
    if ledger.revenues().is_empty() {
        output::info("No revenues recorded yet.");
        return Ok(());
    }
    for (idx, record) in ledger.revenues().iter().enumerate() {
        output::info(format!(
            "  {:>3}. {}  {:>14}  {}",
            idx + 1,
            format_date(record.date),
            context.money(record.value),
            record.description
        ));
    }
    output::info(format!("  Total: {}", context.money(ledger.revenue_total()?)));
    Ok(())
}

fn handle_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [position] = args else {
        return Err(usage("revenue remove <n>"));
    };
    let index = parse_position(position)?;
    let removal = context.manager_mut()?.remove_revenue(index)?;
    match removal.removed() {
        Some(record) => output::success(format!(
            "Removed revenue `{}` ({}).",
            record.description,
            context.money(record.value)
        )),
        None => output::warning(format!("No revenue at position {position}.")),
    }
    Ok(())
}
