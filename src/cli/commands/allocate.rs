use crate::cli::commands::usage;
use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::formatters::format_percentage;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::core::input::parse_weight;

const USAGE: &str = "allocate <category> <subcategory=percent>...";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "allocate",
        "Split a category's current total across subcategories by percentage",
        USAGE,
        cmd_allocate,
    )
    .signed_in()]
}

fn cmd_allocate(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [category, weights @ ..] = args else {
        return Err(usage(USAGE));
    };
    if weights.is_empty() {
        return Err(usage(USAGE));
    }
    let weights = weights
        .iter()
        .map(|raw| parse_weight(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let plan = context.manager_mut()?.allocate(category, &weights)?;
    output::section(format!(
        "Allocated {} of {}",
        context.money(plan.base),
        plan.category
    ));
    for share in &plan.shares {
        output::info(format!(
            "  {:<20} {:>8}  {}",
            share.subcategory,
            format_percentage(share.percentage),
            context.money(share.amount)
        ));
    }
    let total = context.manager()?.ledger().category_total(&plan.category)?;
    output::success(format!(
        "{} allocation records added; {} now totals {}.",
        plan.shares.len(),
        plan.category,
        context.money(total)
    ));
    Ok(())
}
