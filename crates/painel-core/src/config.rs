//! Router configuration

use crate::{Error, HistoryMode, Result};
use serde::Deserialize;

/// Router configuration
///
/// Deserializes from `{"history": "web", "base": "/"}`; both fields are
/// optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouterConfig {
    /// Address bar strategy
    pub history: HistoryMode,
    /// Path prefix the app is served under
    pub base: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            history: HistoryMode::Web,
            base: "/".to_string(),
        }
    }
}

impl RouterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(mut self, mode: HistoryMode) -> Self {
        self.history = mode;
        self
    }

    pub fn base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.base.starts_with('/') {
            return Err(Error::Config(format!(
                "base must start with '/': {:?}",
                self.base
            )));
        }
        if self.base.contains(['?', '#']) {
            return Err(Error::Config(format!(
                "base must be a bare path: {:?}",
                self.base
            )));
        }
        Ok(())
    }
}
