//! Boot configuration loading for slatebook.
//!
//! A slatebook notebook keeps its user configuration as Lua script blocks
//! embedded in an ordinary page. At startup the application hands that page's
//! raw text to [`config::load_boot_config`], which extracts the script blocks,
//! runs them inside a sandboxed Lua environment exposing the `config` API, and
//! folds every declaration into one immutable [`config::BootConfig`].
//!
//! Configuration scripts are full Lua programs, not declarative data: locals,
//! conditionals, and calls into unrelated notebook APIs are all legal. A
//! broken script must never stop the application from booting, so loading
//! absorbs every script failure and degrades to a partial or empty
//! configuration instead.
//!
//! # Example
//!
//! ````rust
//! use slatebook_core::config::load_boot_config;
//! use slatebook_core::script::CapabilityTable;
//!
//! let page = "# Setup\n\n```slate-lua\nconfig.set('editor.theme', 'dark')\n```\n";
//! let boot = load_boot_config(page, &CapabilityTable::new()).unwrap();
//! assert_eq!(boot.get_or("editor.theme", String::new()), "dark");
//! ````

pub mod config;
pub mod page;
pub mod script;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
