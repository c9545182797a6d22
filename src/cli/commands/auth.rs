use tracing::info;

use crate::cli::commands::usage;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::formatters::format_date;
use crate::cli::io as cli_io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::core::ledger_manager::LedgerManager;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "register",
            "Create an account",
            "register <email> [password confirmation]",
            cmd_register,
        ),
        CommandEntry::new(
            "login",
            "Sign in and open the account's ledger",
            "login <email> [password]",
            cmd_login,
        ),
        CommandEntry::new("logout", "Close the current session", "logout", cmd_logout)
            .signed_in(),
        CommandEntry::new("whoami", "Show the signed-in account", "whoami", cmd_whoami)
            .signed_in(),
    ]
}

fn cmd_register(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    const USAGE: &str = "register <email> [password confirmation]";
    let (password, confirmation) = match args {
        [_, password, confirmation] => (password.to_string(), confirmation.to_string()),
        [_] if context.can_prompt() => cli_io::prompt_new_password(&context.theme)?,
        _ => return Err(usage(USAGE)),
    };
    let identity = context
        .credentials()
        .register(args[0], &password, &confirmation)?;
    output::success(format!(
        "Account {identity} registered. Use `login {identity}` to sign in."
    ));
    Ok(())
}

fn cmd_login(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    const USAGE: &str = "login <email> [password]";
    let password = match args {
        [_, password] => password.to_string(),
        [_] if context.can_prompt() => cli_io::prompt_password(&context.theme, "Password")?,
        _ => return Err(usage(USAGE)),
    };
    let session = context.credentials().authenticate(args[0], &password)?;
    let storage = context.ledger_storage()?;
    let manager = LedgerManager::open(session, Box::new(storage), context.clock.clone())?;
    let identity = manager.session().identity().clone();
    let records = manager.ledger().record_count();
    context.ledger_manager = Some(manager);
    output::success(format!("Signed in as {identity} ({records} records)."));
    Ok(())
}

fn cmd_logout(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let manager = context
        .ledger_manager
        .take()
        .ok_or(CommandError::NotLoggedIn)?;
    info!(identity = %manager.session().identity(), "signed out");
    output::success(format!("Signed out {}.", manager.session().identity()));
    Ok(())
}

fn cmd_whoami(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let session = context.manager()?.session();
    output::two_column(&[
        ("Account", session.identity().to_string()),
        (
            "Since",
            format!(
                "{} {}",
                format_date(session.started_at().date_naive()),
                session.started_at().format("%H:%M UTC")
            ),
        ),
        ("Session", session.id().to_string()),
    ]);
    Ok(())
}
