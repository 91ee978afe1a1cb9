use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, Password, Select};

pub fn input(prompt: &str) -> Result<String> {
    Ok(Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact_text()?)
}

/// Prompts for an integer, re-prompting until the input parses.
pub fn input_amount(prompt: &str) -> Result<i64> {
    Ok(Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact_text()?)
}

/// Prompts for a PIN without echoing it. Returns None if the input
/// isn't a number; the value itself is validated by the service.
pub fn input_pin(prompt: &str) -> Result<Option<i64>> {
    let raw = Password::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact()?;
    Ok(raw.trim().parse().ok())
}

pub fn select(prompt: &str, items: &[&str]) -> Result<usize> {
    Ok(Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()?)
}
