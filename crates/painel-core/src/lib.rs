//! painel-core: client-side navigation for the ANS operators panel
//!
//! Declares the panel's route table and the router that resolves browser
//! locations against it:
//!
//! | Path | View |
//! |------|------|
//! | `/` | [`View::OperatorTable`] |
//! | `/dashboard` | [`View::Dashboard`] |
//! | `/operadora/:id` | [`View::OperatorDetail`] |
//!
//! ## Example
//! ```
//! use painel_core::{create_router, MemoryHistory, RouterConfig, View};
//!
//! let mut router = create_router(RouterConfig::default(), MemoryHistory::default()).unwrap();
//! let route = router.push("/operadora/42").unwrap().unwrap();
//! assert_eq!(route.view, View::OperatorDetail);
//! assert_eq!(route.param("id"), Some("42"));
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod history;
pub mod location;
pub mod logging;
pub mod router;
pub mod routes;
pub mod view;

// Re-exports
pub use config::RouterConfig;
pub use error::{Error, Result};
pub use history::{History, HistoryMode, MemoryHistory};
pub use location::Location;
pub use router::{ResolvedRoute, RouteEntry, RouteParams, Router};
pub use routes::{create_router, ROUTES};
pub use view::{OperatorId, View};
