use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::formatters::format_date;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::ledger::{ProfitSnapshot, Record};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "dashboard",
            "Latest totals with recent revenues and costs",
            "dashboard",
            cmd_dashboard,
        )
        .signed_in(),
        CommandEntry::new(
            "report",
            "Full listing of revenues, costs and profit history",
            "report",
            cmd_report,
        )
        .signed_in(),
        CommandEntry::new(
            "history",
            "Profit snapshots, newest first",
            "history",
            cmd_history,
        )
        .signed_in(),
    ]
}

fn cmd_dashboard(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let dashboard = context.manager()?.dashboard(context.config.recent_limit);

    output::section("Dashboard");
    match &dashboard.latest {
        Some(snapshot) => print_snapshot(context, snapshot),
        None => output::info("No profit computed yet. Add a revenue or cost to start."),
    }

    output::section("Recent revenues");
    if dashboard.recent_revenues.is_empty() {
        output::info("No revenues recorded yet.");
    }
    for record in &dashboard.recent_revenues {
        print_record(context, "  ", record);
    }

    output::section("Recent costs");
    if dashboard.recent_costs.is_empty() {
        output::info("No costs recorded yet.");
    }
    for line in &dashboard.recent_costs {
        let location = match &line.subcategory {
            Some(sub) => format!("{}/{sub}", line.category),
            None => line.category.clone(),
        };
        output::info(format!(
            "  {}  {:>14}  [{location}] {}",
            format_date(line.date),
            context.money(line.value),
            line.description
        ));
    }
    Ok(())
}

fn cmd_report(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let ledger = context.manager()?.ledger();
    let report = context.manager()?.report()?;

    if let Some((first, last)) = ledger.date_span() {
        output::info(format!(
            "Records from {} to {}",
            format_date(first),
            format_date(last)
        ));
    }
    output::section("Revenues");
    for record in &report.revenues {
        print_record(context, "  ", record);
    }
    output::info(format!("  Total revenue: {}", context.money(report.revenue_total)));

    output::section("Costs");
    for category in &report.categories {
        output::info(format!("{}  (total {})", category.name, context.money(category.total)));
        for record in &category.direct {
            print_record(context, "    ", record);
        }
        for sub in &category.subcategories {
            output::info(format!("  {}  (subtotal {})", sub.name, context.money(sub.total)));
            for record in &sub.records {
                print_record(context, "      ", record);
            }
        }
    }
    output::info(format!("  Total costs: {}", context.money(report.cost_total)));

    output::section("Profit");
    match &report.latest {
        Some(snapshot) => print_snapshot(context, snapshot),
        None => output::info("No profit computed yet."),
    }
    print_history(context, &report.history);
    Ok(())
}

fn cmd_history(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let history: Vec<ProfitSnapshot> = context
        .manager()?
        .ledger()
        .profit_history()
        .newest_first()
        .cloned()
        .collect();
    output::section("Profit history");
    print_history(context, &history);
    Ok(())
}

fn print_snapshot(context: &ShellContext, snapshot: &ProfitSnapshot) {
    let profit = context.money(snapshot.profit());
    output::two_column(&[
        ("As of", format_date(snapshot.date())),
        ("Revenue", context.money(snapshot.revenue_total())),
        ("Costs", context.money(snapshot.cost_total())),
        (
            "Profit",
            if snapshot.is_loss() {
                format!("{profit} (loss)")
            } else {
                profit
            },
        ),
    ]);
}

fn print_history(context: &ShellContext, history: &[ProfitSnapshot]) {
    if history.is_empty() {
        output::info("No snapshots recorded yet.");
        return;
    }
    for snapshot in history {
        output::info(format!(
            "  {}  revenue {:>14}  costs {:>14}  profit {:>14}",
            format_date(snapshot.date()),
            context.money(snapshot.revenue_total()),
            context.money(snapshot.cost_total()),
            context.money(snapshot.profit())
        ));
    }
}

fn print_record(context: &ShellContext, indent: &str, record: &Record) {
    output::info(format!(
        "{indent}{}  {:>14}  {}",
        format_date(record.date),
        context.money(record.value),
        record.description
    ));
}
