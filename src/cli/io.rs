//! Interactive prompts. Only used when the shell runs attached to a user.

use dialoguer::{theme::ColorfulTheme, Confirm, Password};

use crate::cli::core::CommandError;

pub fn confirm_action(
    theme: &ColorfulTheme,
    prompt: &str,
    default: bool,
) -> Result<bool, CommandError> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(CommandError::from)
}

pub fn prompt_password(theme: &ColorfulTheme, prompt: &str) -> Result<String, CommandError> {
    Password::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()
        .map_err(CommandError::from)
}

/// Asks for a new password twice and returns both entries unchecked.
pub fn prompt_new_password(theme: &ColorfulTheme) -> Result<(String, String), CommandError> {
    let password = prompt_password(theme, "Password")?;
    let confirmation = prompt_password(theme, "Confirm password")?;
    Ok((password, confirmation))
}
