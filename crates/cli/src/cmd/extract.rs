use std::fs;
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use slatebook_core::page::extract_fenced_code;

/// Print the script text extracted from `page` for the given fence tag.
pub fn run(page: &Path, tag: &str) -> Result<()> {
    let text = fs::read_to_string(page)
        .wrap_err_with(|| format!("failed to read page {}", page.display()))?;

    let code = extract_fenced_code(&text, tag);
    if !code.is_empty() {
        println!("{code}");
    }
    Ok(())
}
