//! Script evaluation types and errors.

use thiserror::Error;

/// Host-side failure while constructing the sandbox or its capability
/// surface.
///
/// This is the only failure that escapes configuration loading: it means the
/// process cannot offer a sandbox at all, which is a programming defect in
/// the host rather than bad user input. Script failures never surface here;
/// they are classified as [`EvalFailure`] and recovered.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The Lua VM or a capability binding could not be created.
    #[error("failed to construct script environment: {0}")]
    Environment(#[from] mlua::Error),
}

/// A failed script evaluation, classified at the evaluator boundary.
///
/// `line` is the source line inside the concatenated script text, when the
/// evaluator reported one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalFailure {
    /// The script was rejected before any statement executed.
    #[error("script syntax error: {message}")]
    Syntax { message: String, line: Option<u32> },

    /// The script raised partway through execution.
    #[error("script runtime error: {message}")]
    Runtime { message: String, line: Option<u32> },
}

impl EvalFailure {
    pub fn message(&self) -> &str {
        match self {
            EvalFailure::Syntax { message, .. } | EvalFailure::Runtime { message, .. } => {
                message
            }
        }
    }

    pub fn line(&self) -> Option<u32> {
        match self {
            EvalFailure::Syntax { line, .. } | EvalFailure::Runtime { line, .. } => *line,
        }
    }
}

/// Limits applied to one script evaluation.
///
/// Bounding runaway scripts is the evaluator's concern, not the loader's:
/// exceeding a limit surfaces as an ordinary recovered runtime failure.
#[derive(Debug, Clone)]
pub struct SandboxConfig {
    /// Maximum memory the Lua VM may allocate, in bytes. 0 = unlimited.
    pub memory_limit: usize,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self::restricted()
    }
}

impl SandboxConfig {
    /// A restrictive sandbox suitable for user configuration scripts.
    pub fn restricted() -> Self {
        Self { memory_limit: 10 * 1024 * 1024 }
    }

    /// An unrestricted configuration (use with caution).
    pub fn unrestricted() -> Self {
        Self { memory_limit: 0 }
    }
}
