use dialoguer::{Confirm, Input, Select};

use crate::error::Result;

/// Final yes/no gate before the commit runs. Defaults to yes; the draft has
/// already been reviewed at this point.
pub fn confirm_commit() -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt("Create commit with this message?")
        .default(true)
        .interact()?)
}

/// Single-choice menu; returns the selected index.
pub fn select(prompt: &str, items: &[&str]) -> Result<usize> {
    let choice = Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()?;

    Ok(choice)
}

/// Text input with optional pre-filled text.
pub fn input(prompt: &str, initial: Option<&str>) -> Result<String> {
    let mut builder = Input::<String>::new().with_prompt(prompt);
    if let Some(text) = initial {
        builder = builder.with_initial_text(text);
    }

    Ok(builder.interact_text()?)
}

/// Optional free-form input; an empty answer becomes `None`.
pub fn optional_input(prompt: &str) -> Result<Option<String>> {
    let text = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;

    let trimmed = text.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}
