//! The panel's route table
//!
//! Three entries, registered in this order. No catch-all is declared:
//! any other path leaves the router without an active route.

use crate::{History, Result, RouteEntry, Router, RouterConfig, View};

pub const OPERATOR_TABLE: &str = "operadoras";
pub const DASHBOARD: &str = "dashboard";
pub const OPERATOR_DETAIL: &str = "operadora";

pub const ROUTES: [RouteEntry; 3] = [
    RouteEntry {
        name: OPERATOR_TABLE,
        path: "/",
        view: View::OperatorTable,
    },
    RouteEntry {
        name: DASHBOARD,
        path: "/dashboard",
        view: View::Dashboard,
    },
    RouteEntry {
        name: OPERATOR_DETAIL,
        path: "/operadora/:id",
        view: View::OperatorDetail,
    },
];

/// Build the application router over `history`
pub fn create_router<H: History>(config: RouterConfig, history: H) -> Result<Router<H>> {
    Router::new(&ROUTES, config, history)
}
