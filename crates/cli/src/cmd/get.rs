use std::fs;
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use slatebook_core::config::load_boot_config;
use slatebook_core::script::CapabilityTable;

/// Print the JSON value at `path` in the page's boot configuration.
///
/// Falls back to `default` (parsed as JSON) when the path is absent, which
/// mirrors the typed-get-with-default accessor the application uses.
pub fn run(page: &Path, path: &str, default: &str) -> Result<()> {
    let text = fs::read_to_string(page)
        .wrap_err_with(|| format!("failed to read page {}", page.display()))?;

    let boot = load_boot_config(&text, &CapabilityTable::new())?;
    let value: serde_json::Value = match boot.value_at(path) {
        Some(found) => serde_json::to_value(found)?,
        None => serde_json::from_str(default)
            .wrap_err_with(|| format!("--default is not valid JSON: {default}"))?,
    };

    println!("{value}");
    Ok(())
}
