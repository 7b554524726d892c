//
//  bitbucket-client
//  interactive/prompt.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use dialoguer::{Confirm, Input, Password};

/// Prompts for a line of text. Surrounding whitespace is trimmed.
pub fn prompt_input(message: &str) -> Result<String> {
    let input: String = Input::new().with_prompt(message).interact_text()?;
    Ok(input.trim().to_string())
}

/// Prompts for a secret without echoing it.
pub fn prompt_password(message: &str) -> Result<String> {
    let password = Password::new().with_prompt(message).interact()?;
    Ok(password)
}

pub fn prompt_confirm_with_default(message: &str, default: bool) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(default)
        .interact()?;
    Ok(confirmed)
}

/// Asks for confirmation unless `skip` is set.
pub fn confirm_or_skip(message: &str, skip: bool) -> Result<bool> {
    if skip {
        return Ok(true);
    }
    prompt_confirm_with_default(message, false)
}
