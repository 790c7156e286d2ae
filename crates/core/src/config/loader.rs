//! Boot configuration loading: extraction, evaluation, recovery.
//!
//! [`load_boot_config`] is the resilience wrapper around the whole pipeline.
//! Whatever the configuration page contains (no script, a pristine script,
//! or a broken one), the caller gets a usable [`BootConfig`] back. The only
//! error it can return is a host-side failure to construct the sandbox
//! itself.

use tracing::{debug, warn};

use super::boot::{BootConfig, LoadOutcome};
use super::value::ConfigObject;
use crate::page::extract_fenced_code;
use crate::script::{CapabilityTable, EvalFailure, ScriptEngine, ScriptError};

/// Fence tag marking boot configuration script blocks in a page.
pub const CONFIG_FENCE_TAG: &str = "slate-lua";

/// Load the boot configuration embedded in `page_text`.
///
/// Extracts every ```` ```slate-lua ```` block, evaluates the concatenated
/// script inside a fresh sandbox carrying the `config` API plus `base`, and
/// returns the merged snapshot. The recovery policy:
///
/// - no script on the page: empty configuration, [`LoadOutcome::NoScript`];
/// - syntax failure: empty configuration (nothing executed), one warning,
///   [`LoadOutcome::Recovered`];
/// - runtime failure: everything set before the failing statement is kept,
///   one warning, [`LoadOutcome::Recovered`].
///
/// Each call owns a fresh evaluation context; concurrent loads share no
/// state and each produces an independent snapshot.
pub fn load_boot_config(
    page_text: &str,
    base: &CapabilityTable,
) -> Result<BootConfig, ScriptError> {
    let code = extract_fenced_code(page_text, CONFIG_FENCE_TAG);
    if code.trim().is_empty() {
        debug!("no configuration script present");
        return Ok(BootConfig::new(ConfigObject::new(), LoadOutcome::NoScript));
    }

    let engine = ScriptEngine::sandboxed()?;
    engine.install_surface(base)?;

    match engine.eval_config_script(&code) {
        Ok(()) => {
            let values = engine.take_config();
            debug!(options = values.len(), "configuration script evaluated");
            Ok(BootConfig::new(values, LoadOutcome::Loaded))
        }
        Err(failure @ EvalFailure::Syntax { .. }) => {
            warn!(line = failure.line(), "configuration script rejected: {failure}");
            Ok(BootConfig::new(
                ConfigObject::new(),
                LoadOutcome::Recovered(failure),
            ))
        }
        Err(failure @ EvalFailure::Runtime { .. }) => {
            warn!(line = failure.line(), "configuration script failed: {failure}");
            let partial = engine.take_config();
            Ok(BootConfig::new(partial, LoadOutcome::Recovered(failure)))
        }
    }
}
