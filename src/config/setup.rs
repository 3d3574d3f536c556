//! Interactive setup wizard for first-time configuration
//!
//! This module handles the interactive prompts for creating an initial
//! configuration when vitrin is run for the first time.

use super::VitrinConfig;
use config::ConfigError;
use dialoguer::{Input, theme::ColorfulTheme};

/// Interactive first-time setup - prompts for the catalog API base URL
///
/// Guides the user through creating their configuration:
/// 1. Prompts for the API base URL the catalog lives at
/// 2. Prompts for the listing page size (default: 12)
/// 3. Creates and saves the configuration
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - User input cannot be read
/// - The configuration cannot be saved
pub fn first_time_setup() -> Result<VitrinConfig, ConfigError> {
    println!("Welcome to vitrin! Let's point it at your catalog.\n");

    let api_base_url: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Catalog API base URL")
        .default("http://localhost:8080".to_string())
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let page_size: u32 = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Products per page")
        .default(12)
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let mut config = VitrinConfig::default();
    config.api_base_url = api_base_url.trim_end_matches('/').to_string();
    config.page_size = page_size.max(1);

    config.save()?;

    println!("\nConfiguration saved successfully!");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_module_compiles() {
        // Ensures the module compiles and the function signature is correct
        let _: fn() -> Result<VitrinConfig, ConfigError> = first_time_setup;
    }
}
