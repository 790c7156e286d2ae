//! Configuration model, merge semantics, and boot loading.

pub mod boot;
pub mod loader;
pub mod merge;
pub mod value;

pub use boot::{BootConfig, LoadOutcome};
pub use loader::{CONFIG_FENCE_TAG, load_boot_config};
pub use value::{ConfigObject, ConfigValue};
