//! Sandboxed Lua scripting for boot configuration.
//!
//! This module is the trust boundary of the crate: user-written, possibly
//! broken Lua runs here against a fixed capability surface, and nothing it
//! does may crash the host.
//!
//! # Overview
//!
//! [`ScriptEngine`] owns one sandboxed Lua state per configuration load. The
//! capability surface gives scripts exactly one real API, the `config`
//! global; every other global identifier resolves to an inert stub so that
//! calls into unrelated notebook APIs are harmless no-ops. Script failures
//! are classified at the boundary into [`EvalFailure::Syntax`] or
//! [`EvalFailure::Runtime`]; they never cross it as a panic or a raw Lua
//! error.
//!
//! # Security
//!
//! The Lua environment is restricted to the `table`, `string`, `utf8` and
//! `math` libraries, and the escape hatches are removed:
//!
//! - no filesystem access (`io`)
//! - no shell or clock access (`os`)
//! - no module loading (`require`, `package`)
//! - no arbitrary chunk loading (`load`, `loadfile`, `dofile`)
//! - no VM introspection (`debug`, `collectgarbage`)
//!
//! Scripts that mention the removed names get the inert stub instead, so a
//! stray `os.date()` in a config page degrades to a no-op rather than an
//! error or an escape.

pub mod convert;
pub mod engine;
pub mod surface;
pub mod types;

pub use engine::ScriptEngine;
pub use surface::{Capability, CapabilityTable};
pub use types::{EvalFailure, SandboxConfig, ScriptError};
