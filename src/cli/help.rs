use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    output::section("Available commands");
    for entry in registry.list() {
        let marker = if entry.requires_session { "*" } else { " " };
        output::info(format!("  {:<10}{marker} {}", entry.name, entry.description));
    }
    output::info("Commands marked * need a signed-in account.");
    output::info("Use `help <command>` for details.");
}

pub fn print_command(entry: &CommandEntry) {
    output::section(format!("Help: {}", entry.name));
    output::two_column(&[
        ("Description", entry.description.to_string()),
        ("Usage", entry.usage.to_string()),
        (
            "Session",
            if entry.requires_session { "required" } else { "not required" }.to_string(),
        ),
    ]);
}
