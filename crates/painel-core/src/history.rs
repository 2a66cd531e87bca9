//! History modes and backends
//!
//! A [`History`] stores raw URLs (what the address bar shows, minus origin).
//! [`HistoryMode`] translates between those URLs and in-app locations:
//!
//! | Mode | Location | URL (base `/app`) |
//! |------|----------|-------------------|
//! | Web  | `/operadora/42` | `/app/operadora/42` |
//! | Hash | `/operadora/42` | `/app/#/operadora/42` |

use crate::Result;
use serde::Deserialize;

/// How locations are reflected in the address bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryMode {
    /// Real paths through the History API; the server must serve the app
    /// for every route path
    #[default]
    Web,
    /// Paths after `#`; works with any static file server
    Hash,
}

impl HistoryMode {
    /// Build the URL stored in history for an in-app location
    pub fn to_url(&self, base: &str, location: &str) -> String {
        let base = base.trim_end_matches('/');
        match self {
            HistoryMode::Web => format!("{}{}", base, location),
            HistoryMode::Hash => format!("{}/#{}", base, location),
        }
    }

    /// Recover the in-app location from a URL read back from history
    pub fn from_url(&self, base: &str, url: &str) -> String {
        match self {
            HistoryMode::Web => {
                let base = base.trim_end_matches('/');
                match url.strip_prefix(base) {
                    Some(rest) if rest.is_empty() => "/".to_string(),
                    Some(rest) if rest.starts_with(['/', '?', '#']) => rest.to_string(),
                    _ => url.to_string(),
                }
            }
            HistoryMode::Hash => match url.split_once('#') {
                Some((_, rest)) if !rest.is_empty() => rest.to_string(),
                _ => "/".to_string(),
            },
        }
    }
}

/// Backend that owns the session history entries
pub trait History {
    /// URL of the active entry
    fn location(&self) -> String;

    /// Add an entry after the active one, dropping any forward entries
    fn push(&mut self, url: &str) -> Result<()>;

    /// Overwrite the active entry
    fn replace(&mut self, url: &str) -> Result<()>;

    /// Move through entries; out-of-range deltas are ignored
    fn go(&mut self, delta: i32) -> Result<()>;
}

/// In-process history stack for tests and non-browser hosts
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<String>,
    index: usize,
}

impl MemoryHistory {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            index: 0,
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl History for MemoryHistory {
    fn location(&self) -> String {
        self.entries[self.index].clone()
    }

    fn push(&mut self, url: &str) -> Result<()> {
        self.entries.truncate(self.index + 1);
        self.entries.push(url.to_string());
        self.index += 1;
        Ok(())
    }

    fn replace(&mut self, url: &str) -> Result<()> {
        self.entries[self.index] = url.to_string();
        Ok(())
    }

    fn go(&mut self, delta: i32) -> Result<()> {
        let target = self.index as i64 + delta as i64;
        if (0..self.entries.len() as i64).contains(&target) {
            self.index = target as usize;
        }
        Ok(())
    }
}
