use crate::cli::commands::{parse_position, usage, ParsedArgs};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::formatters::format_date;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::core::input::parse_amount;
use crate::ledger::{CostCategory, CostRecord};

const USAGE: &str = "cost <add <category> <amount> <description> [--sub NAME] [--date YYYY-MM-DD]|list [category]|remove <category> <n> [--sub NAME]>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "cost",
        "Record, list or remove categorized costs",
        USAGE,
        cmd_cost,
    )
    .signed_in()]
}

fn cmd_cost(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(usage(USAGE));
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "add" => handle_add(context, rest),
        "list" => handle_list(context, rest),
        "remove" => handle_remove(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown cost subcommand `{other}`"
        ))),
    }
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args)?;
    let [category, amount, description @ ..] = parsed.positional.as_slice() else {
        return Err(usage(
            "cost add <category> <amount> <description> [--sub NAME] [--date YYYY-MM-DD]",
        ));
    };
    let value = parse_amount(amount)?;
    let description = description.join(" ");
    let date = parsed.date()?;
    let snapshot = context.manager_mut()?.add_cost(
        category,
        value,
        &description,
        date,
        parsed.subcategory,
    )?;
    let target = match parsed.subcategory {
        Some(sub) => format!("{category}/{sub}"),
        None => category.to_string(),
    };
    output::success(format!(
        "Cost of {} filed under {target}. Profit is now {}.",
        context.money(value),
        context.money(snapshot.profit())
    ));
    Ok(())
}

fn handle_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let filter = args.first().map(|name| name.trim());
    let costs = context.manager()?.ledger().costs();
    output::section("Costs");
    if costs.is_empty() {
        output::info("No costs recorded yet.");
        return Ok(());
    }
    let mut shown = 0;
    for (name, category) in costs.categories() {
        if filter.is_some_and(|wanted| wanted != name) {
            continue;
        }
        print_category(context, name, category)?;
        shown += 1;
    }
    if shown == 0 {
        let known: Vec<_> = costs.category_names().collect();
        output::warning(format!(
            "No category named `{}`. Known categories: {}.",
            filter.unwrap_or_default(),
            known.join(", ")
        ));
    } else if filter.is_none() {
        output::info(format!("  Grand total: {}", context.money(costs.grand_total()?)));
    }
    Ok(())
}

fn print_category(context: &ShellContext, name: &str, category: &CostCategory) -> CommandResult {
    output::info(format!("{name}  (total {})", context.money(category.total()?)));
    print_records(context, "    ", &category.direct);
    for (sub, records) in &category.subcategories {
        output::info(format!(
            "  {sub}  (subtotal {})",
            context.money(category.subcategory_total(sub)?)
        ));
        print_records(context, "      ", records);
    }
    Ok(())
}

fn print_records(context: &ShellContext, indent: &str, records: &[CostRecord]) {
    for (idx, record) in records.iter().enumerate() {
        output::info(format!(
            "{indent}{:>3}. {}  {:>14}  {}",
            idx + 1,
            format_date(record.date),
            context.money(record.value),
            record.description
        ));
    }
}

fn handle_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args)?;
    let [category, position] = parsed.positional.as_slice() else {
        return Err(usage("cost remove <category> <n> [--sub NAME]"));
    };
    let index = parse_position(position)?;
    let removal = context
        .manager_mut()?
        .remove_cost(category, index, parsed.subcategory)?;
    match removal.removed() {
        Some(record) => output::success(format!(
            "Removed cost `{}` ({}).",
            record.description,
            context.money(record.value)
        )),
        None => output::warning(format!(
            "Nothing to remove at position {position} in `{category}`."
        )),
    }
    Ok(())
}
