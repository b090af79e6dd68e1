//! Interactive prompts for CLI commands
//!
//! Uses dialoguer for terminal prompts. Callers check for a terminal first;
//! the IDE runs build actions without one.

use std::io::IsTerminal;

use dialoguer::Password;

use b4x_core::sync::ApiKey;

use crate::error::Result;

/// Whether a user can answer prompts.
pub fn can_prompt() -> bool {
    std::io::stdin().is_terminal() && std::io::stderr().is_terminal()
}

/// Ask for a GitHub API key. Returns `None` for an empty answer.
pub fn prompt_api_key() -> Result<Option<ApiKey>> {
    let answer: String = Password::new()
        .with_prompt("GitHub API key")
        .allow_empty_password(true)
        .interact()?;
    let answer = answer.trim();
    Ok((!answer.is_empty()).then(|| ApiKey::new(answer)))
}
