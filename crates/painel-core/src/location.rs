//! In-app locations
//!
//! A location is the part of the URL the router cares about: the path
//! relative to the configured base, plus query and fragment.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Path, query and hash of a navigation target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Path, always starting with `/`
    pub path: String,
    /// Query string (without leading ?)
    pub query: Option<String>,
    /// Fragment (without leading #)
    pub hash: Option<String>,
}

impl Location {
    /// Split a target such as `/operadora/42?aba=despesas#topo`
    ///
    /// The result is normalized the way a browser reports `window.location`:
    /// path segments are percent-encoded, and query and hash have spaces,
    /// quotes and non-ASCII characters escaped. Encoded and raw spellings of
    /// the same target therefore parse to equal locations.
    pub fn parse(target: &str) -> Self {
        let (rest, hash) = match target.split_once('#') {
            Some((rest, hash)) => (rest, Some(hash)),
            None => (target, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (rest, None),
        };

        Self {
            path: normalize_path(path),
            query: query.filter(|q| !q.is_empty()).map(normalize_component),
            hash: hash.filter(|h| !h.is_empty()).map(normalize_component),
        }
    }

    /// Path with query and hash re-attached
    pub fn full_path(&self) -> String {
        let mut out = self.path.clone();
        if let Some(query) = &self.query {
            out.push('?');
            out.push_str(query);
        }
        if let Some(hash) = &self.hash {
            out.push('#');
            out.push_str(hash);
        }
        out
    }

    /// Parse query string into key-value pairs
    pub fn query_params(&self) -> HashMap<String, String> {
        let mut params = HashMap::new();
        if let Some(query) = &self.query {
            for pair in query.split('&').filter(|p| !p.is_empty()) {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                params.insert(
                    decode_component(&key.replace('+', " ")),
                    decode_component(&value.replace('+', " ")),
                );
            }
        }
        params
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_path())
    }
}

/// Percent-decode one path segment or query component
///
/// Invalid escapes are kept as-is; invalid UTF-8 is replaced.
pub fn decode_component(s: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(s.as_bytes())).into_owned()
}

/// Percent-encode a value so it fits in a single path segment
pub fn encode_segment(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

/// Absolute path with every segment in canonical encoded form
fn normalize_path(path: &str) -> String {
    let segments: Vec<String> = path
        .trim_start_matches('/')
        .split('/')
        .map(|segment| encode_segment(&decode_component(segment)))
        .collect();
    format!("/{}", segments.join("/"))
}

/// Escape what browsers escape in query and fragment, keep the rest
fn normalize_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_ascii_graphic() && !matches!(c, '"' | '<' | '>' | '`') {
            out.push(c);
        } else {
            let mut buf = [0; 4];
            out.push_str(&urlencoding::encode(c.encode_utf8(&mut buf)));
        }
    }
    out
}
