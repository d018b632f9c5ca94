//! General utility code that didn't fit anywhere else
//!
//! Note that most of this module is not exported.
// (c) 2026 sbts contributors

pub(crate) mod cert;

mod tracing;
pub use tracing::is_initialised as tracing_is_initialised;
pub(crate) use tracing::setup as setup_tracing;
