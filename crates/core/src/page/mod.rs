//! Page text utilities.
//!
//! Pages are opaque markdown text as far as this crate is concerned; the only
//! structure it cares about is fenced code blocks carrying configuration
//! scripts.

pub mod fence;

pub use fence::extract_fenced_code;
