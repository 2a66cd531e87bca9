//! Router - Re-exports from painel-core
//!
//! The route table and navigation logic live in `painel-core` so native
//! tests and the browser build share them.

pub use painel_core::{create_router, ResolvedRoute, Router, RouterConfig, View};
