use std::fs;
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use slatebook_core::config::load_boot_config;
use slatebook_core::script::CapabilityTable;

/// Load the boot configuration from `page` and print it as pretty JSON.
///
/// A broken configuration script is not an error: the core recovers and the
/// warning lands on stderr, while stdout still gets a valid (possibly empty)
/// mapping. Only an unreadable page or a sandbox construction failure exits
/// non-zero.
pub fn run(page: &Path) -> Result<()> {
    let text = fs::read_to_string(page)
        .wrap_err_with(|| format!("failed to read page {}", page.display()))?;

    let boot = load_boot_config(&text, &CapabilityTable::new())?;
    println!("{}", serde_json::to_string_pretty(boot.values())?);
    Ok(())
}
