use color_eyre::Result;
use dialoguer::{Confirm, Password};

/// Prompt for yes/no, defaulting to no
pub fn confirm(prompt: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read confirmation (use --yes when not on a terminal): {}", e))
}

/// Prompt for a secret (masked input)
pub fn prompt_secret(prompt: &str) -> Result<String> {
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}
