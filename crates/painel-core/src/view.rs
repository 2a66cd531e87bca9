//! View handles
//!
//! The three screens of the panel are rendered elsewhere; the router only
//! decides which one is active and with which parameters.

use serde::Serialize;
use std::fmt;

/// Screens the router can activate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum View {
    /// Paginated, searchable table of operators
    OperatorTable,
    /// Expense statistics dashboard
    Dashboard,
    /// Single operator with its expense history
    OperatorDetail,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::OperatorTable => "OperatorTable",
            View::Dashboard => "Dashboard",
            View::OperatorDetail => "OperatorDetail",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier taken from the `:id` segment of the detail route
///
/// Opaque: a Registro ANS or a CNPJ both come through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct OperatorId(String);

impl OperatorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OperatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OperatorId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}
