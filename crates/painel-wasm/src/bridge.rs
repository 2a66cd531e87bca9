//! JSON bridge between the router and JavaScript
//!
//! Route snapshots and parameter maps cross the boundary as JSON strings.

use painel_core::{ResolvedRoute, RouteEntry};
use std::collections::BTreeMap;

/// Serialize the active route, `null` when nothing matched
pub fn route_json(route: Option<&ResolvedRoute>) -> String {
    serde_json::to_string(&route).unwrap_or_else(|_| "null".to_string())
}

/// Serialize the route table in registration order
pub fn routes_json(routes: &[RouteEntry]) -> String {
    serde_json::to_string(routes).unwrap_or_else(|_| "[]".to_string())
}

/// Parse `{"id": "42"}` into reverse-routing parameters
pub fn parse_params(json: &str) -> serde_json::Result<Vec<(String, String)>> {
    let map: BTreeMap<String, String> = serde_json::from_str(json)?;
    Ok(map.into_iter().collect())
}
