//! Command Line Interface for sbts
// (c) 2026 sbts contributors
mod args;
mod cli_main;
pub mod styles;
pub use cli_main::cli;
