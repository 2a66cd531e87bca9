//! Error types for painel-core

use painel_router::RouteError;
use thiserror::Error;

/// Result type alias for navigation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for route registration and navigation
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or duplicate route pattern
    #[error(transparent)]
    Route(#[from] RouteError),

    /// Two table entries share a name
    #[error("Duplicate route name: {0}")]
    DuplicateName(String),

    /// No route registered under this name
    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    /// Reverse routing without a required parameter
    #[error("Missing parameter :{param} for route {route}")]
    MissingParam { route: String, param: String },

    /// Navigation target is not an absolute path
    #[error("Invalid navigation target: {0}")]
    InvalidTarget(String),

    /// The history backend refused the operation
    #[error("History error: {0}")]
    History(String),

    /// Invalid router configuration
    #[error("Invalid config: {0}")]
    Config(String),
}
