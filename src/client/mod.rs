//! Client-side exchange engine and supporting structures
// (c) 2026 sbts contributors

mod exchange;
mod locator;
mod main_loop;
mod options;

pub use exchange::{exchange, ExchangeError, FileBody};
pub use locator::Locator;
pub use main_loop::fetch;
pub(crate) use main_loop::client_main;
pub use options::Parameters;
