//! painel-wasm: browser bindings for the panel router
//!
//! Backs the router with `window.history` and exports it to the page's
//! bootstrap script. Without the `wasm` feature only the JSON bridge is
//! built.

pub mod bridge;
pub mod router;

#[cfg(feature = "wasm")]
mod history;

#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use history::BrowserHistory;

#[cfg(feature = "wasm")]
pub use wasm::*;

pub use router::{create_router, ResolvedRoute, Router, RouterConfig, View};
