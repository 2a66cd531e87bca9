//! painel-router: segment trie path matcher
//!
//! Matches browser paths against the route patterns of the panel's
//! navigation table. The matcher is generic over the value bound to each
//! pattern so the table can carry typed view handles.
//!
//! ## Path Syntax
//! - `/` - Root
//! - `/dashboard` - Static segments
//! - `:name` - Named parameter (captures one segment)
//! - `*` or `*name` - Wildcard (captures remaining path, must be last)
//!
//! ## Priority
//! 1. Exact static match (highest)
//! 2. Parameter match
//! 3. Wildcard match (lowest)
//!
//! ## Example
//! ```
//! use painel_router::RouteTree;
//!
//! let mut tree = RouteTree::new();
//! tree.insert("/", "table").unwrap();
//! tree.insert("/operadora/:id", "detail").unwrap();
//!
//! let m = tree.find("/operadora/42").unwrap();
//! assert_eq!(*m.value, "detail");
//! assert_eq!(m.param("id"), Some("42"));
//! ```

use std::collections::HashMap;

use thiserror::Error;

/// Pattern errors reported when a route is registered
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// Patterns are absolute
    #[error("route pattern must start with '/': {0:?}")]
    MissingLeadingSlash(String),

    /// `:` without a name
    #[error("empty parameter name in route pattern {0:?}")]
    EmptyParamName(String),

    /// `*` followed by more segments
    #[error("wildcard must be the last segment of route pattern {0:?}")]
    WildcardNotLast(String),

    /// Same pattern registered twice
    #[error("duplicate route pattern {0:?}")]
    Duplicate(String),

    /// Two patterns name the same parameter position differently
    #[error("parameter :{found} in {pattern:?} conflicts with existing :{existing}")]
    ConflictingParam {
        pattern: String,
        existing: String,
        found: String,
    },
}

/// Route match result
#[derive(Debug, Clone, PartialEq)]
pub struct Match<'a, V> {
    /// Value bound to the matched pattern
    pub value: &'a V,
    /// The pattern as it was registered
    pub pattern: &'a str,
    /// Captured path parameters as (name, value) pairs
    pub params: Vec<(String, String)>,
}

impl<V> Match<'_, V> {
    /// Look up a captured parameter by name
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// One parsed pattern segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Static(&'a str),
    Param(&'a str),
    Wildcard(&'a str),
}

/// Split a pattern into segments, rejecting malformed ones
pub fn parse_pattern(pattern: &str) -> Result<Vec<Segment<'_>>, RouteError> {
    if !pattern.starts_with('/') {
        return Err(RouteError::MissingLeadingSlash(pattern.to_string()));
    }

    let raw: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let mut segments = Vec::with_capacity(raw.len());

    for (i, segment) in raw.iter().enumerate() {
        if let Some(name) = segment.strip_prefix(':') {
            if name.is_empty() {
                return Err(RouteError::EmptyParamName(pattern.to_string()));
            }
            segments.push(Segment::Param(name));
        } else if let Some(name) = segment.strip_prefix('*') {
            if i + 1 != raw.len() {
                return Err(RouteError::WildcardNotLast(pattern.to_string()));
            }
            segments.push(Segment::Wildcard(if name.is_empty() { "*" } else { name }));
        } else {
            segments.push(Segment::Static(segment));
        }
    }

    Ok(segments)
}

/// Trie node for path segment matching
#[derive(Debug, Default)]
struct Node {
    /// Static children (key = path segment)
    children: HashMap<String, Node>,
    /// Parameter child (:id)
    param_child: Option<Box<ParamNode>>,
    /// Wildcard child (*path)
    wildcard_child: Option<WildcardNode>,
    /// Index into `RouteTree::routes` if this is a terminal node
    route: Option<usize>,
}

#[derive(Debug)]
struct ParamNode {
    name: String,
    node: Node,
}

#[derive(Debug)]
struct WildcardNode {
    name: String,
    route: usize,
}

/// Segment trie over route patterns
///
/// Values are kept in insertion order next to their patterns; the trie
/// only stores indices into that list.
#[derive(Debug)]
pub struct RouteTree<V> {
    root: Node,
    routes: Vec<(String, V)>,
}

impl<V> Default for RouteTree<V> {
    fn default() -> Self {
        Self {
            root: Node::default(),
            routes: Vec::new(),
        }
    }
}

impl<V> RouteTree<V> {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pattern
    ///
    /// Fails without modifying the tree if the pattern is malformed or
    /// already registered.
    pub fn insert(&mut self, pattern: &str, value: V) -> Result<(), RouteError> {
        let segments = parse_pattern(pattern)?;
        let index = self.routes.len();
        Self::insert_node(&mut self.root, pattern, &segments, index)?;
        self.routes.push((pattern.to_string(), value));
        Ok(())
    }

    fn insert_node(
        node: &mut Node,
        pattern: &str,
        segments: &[Segment<'_>],
        index: usize,
    ) -> Result<(), RouteError> {
        let Some((segment, rest)) = segments.split_first() else {
            if node.route.is_some() {
                return Err(RouteError::Duplicate(pattern.to_string()));
            }
            node.route = Some(index);
            return Ok(());
        };

        match *segment {
            Segment::Param(name) => {
                let param = node.param_child.get_or_insert_with(|| {
                    Box::new(ParamNode {
                        name: name.to_string(),
                        node: Node::default(),
                    })
                });
                if param.name != name {
                    return Err(RouteError::ConflictingParam {
                        pattern: pattern.to_string(),
                        existing: param.name.clone(),
                        found: name.to_string(),
                    });
                }
                Self::insert_node(&mut param.node, pattern, rest, index)
            }
            Segment::Wildcard(name) => {
                if let Some(existing) = &node.wildcard_child {
                    if existing.name != name {
                        return Err(RouteError::ConflictingParam {
                            pattern: pattern.to_string(),
                            existing: existing.name.clone(),
                            found: name.to_string(),
                        });
                    }
                    return Err(RouteError::Duplicate(pattern.to_string()));
                }
                node.wildcard_child = Some(WildcardNode {
                    name: name.to_string(),
                    route: index,
                });
                Ok(())
            }
            Segment::Static(segment) => {
                let child = node.children.entry(segment.to_string()).or_default();
                Self::insert_node(child, pattern, rest, index)
            }
        }
    }

    /// Find the route matching `path`
    ///
    /// `path` must be a bare path; strip query and fragment first.
    pub fn find(&self, path: &str) -> Option<Match<'_, V>> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let mut params = Vec::new();
        let index = Self::find_node(&self.root, &segments, &mut params)?;
        let (pattern, value) = &self.routes[index];
        Some(Match {
            value,
            pattern,
            params,
        })
    }

    fn find_node(
        node: &Node,
        segments: &[&str],
        params: &mut Vec<(String, String)>,
    ) -> Option<usize> {
        let Some((segment, rest)) = segments.split_first() else {
            return node.route;
        };

        // Priority 1: exact static match
        if let Some(child) = node.children.get(*segment) {
            if let Some(index) = Self::find_node(child, rest, params) {
                return Some(index);
            }
        }

        // Priority 2: parameter match
        if let Some(ref param) = node.param_child {
            params.push((param.name.clone(), segment.to_string()));
            if let Some(index) = Self::find_node(&param.node, rest, params) {
                return Some(index);
            }
            params.pop();
        }

        // Priority 3: wildcard, captures everything left
        if let Some(ref wildcard) = node.wildcard_child {
            params.push((wildcard.name.clone(), segments.join("/")));
            return Some(wildcard.route);
        }

        None
    }

    /// Registered patterns and values, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.routes.iter().map(|(p, v)| (p.as_str(), v))
    }

    /// Registered patterns, in insertion order
    pub fn patterns(&self) -> Vec<&str> {
        self.routes.iter().map(|(p, _)| p.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_routes() {
        let mut tree = RouteTree::new();
        tree.insert("/", 0).unwrap();
        tree.insert("/dashboard", 1).unwrap();
        tree.insert("/dashboard/resumo", 2).unwrap();

        assert_eq!(*tree.find("/").unwrap().value, 0);
        assert_eq!(*tree.find("/dashboard").unwrap().value, 1);
        assert_eq!(*tree.find("/dashboard/resumo").unwrap().value, 2);
        assert!(tree.find("/unknown").is_none());
    }

    #[test]
    fn test_param_routes() {
        let mut tree = RouteTree::new();
        tree.insert("/operadora/:id", 1).unwrap();
        tree.insert("/operadora/:id/despesas/:ano", 2).unwrap();

        let m = tree.find("/operadora/42").unwrap();
        assert_eq!(*m.value, 1);
        assert_eq!(m.pattern, "/operadora/:id");
        assert_eq!(m.params, vec![("id".to_string(), "42".to_string())]);

        let m = tree.find("/operadora/42/despesas/2024").unwrap();
        assert_eq!(*m.value, 2);
        assert_eq!(
            m.params,
            vec![
                ("id".to_string(), "42".to_string()),
                ("ano".to_string(), "2024".to_string()),
            ]
        );
    }

    #[test]
    fn test_param_requires_segment() {
        let mut tree = RouteTree::new();
        tree.insert("/operadora/:id", 1).unwrap();

        assert!(tree.find("/operadora").is_none());
        assert!(tree.find("/operadora/").is_none());
        assert!(tree.find("/operadora/1/2").is_none());
    }

    #[test]
    fn test_wildcards() {
        let mut tree = RouteTree::new();
        tree.insert("/files/*path", 1).unwrap();
        tree.insert("/static/*", 2).unwrap();

        let m = tree.find("/files/docs/readme.md").unwrap();
        assert_eq!(m.param("path"), Some("docs/readme.md"));

        let m = tree.find("/static/js/app.js").unwrap();
        assert_eq!(*m.value, 2);
        assert_eq!(m.params, vec![("*".to_string(), "js/app.js".to_string())]);
    }

    #[test]
    fn test_priority() {
        let mut tree = RouteTree::new();
        tree.insert("/operadora/:id", 1).unwrap();
        tree.insert("/operadora/nova", 2).unwrap();
        tree.insert("/operadora/*rest", 3).unwrap();

        assert_eq!(*tree.find("/operadora/nova").unwrap().value, 2);
        assert_eq!(*tree.find("/operadora/123").unwrap().value, 1);
        assert_eq!(*tree.find("/operadora/123/x").unwrap().value, 3);
    }

    #[test]
    fn test_backtracks_from_static() {
        let mut tree = RouteTree::new();
        tree.insert("/a/b/c", 1).unwrap();
        tree.insert("/a/:x/d", 2).unwrap();

        let m = tree.find("/a/b/d").unwrap();
        assert_eq!(*m.value, 2);
        assert_eq!(m.params, vec![("x".to_string(), "b".to_string())]);
    }

    #[test]
    fn test_trailing_slash() {
        let mut tree = RouteTree::new();
        tree.insert("/dashboard/", 1).unwrap();

        assert_eq!(*tree.find("/dashboard").unwrap().value, 1);
        assert_eq!(*tree.find("/dashboard/").unwrap().value, 1);
    }

    #[test]
    fn test_insertion_order() {
        let mut tree = RouteTree::new();
        tree.insert("/", 'a').unwrap();
        tree.insert("/dashboard", 'b').unwrap();
        tree.insert("/operadora/:id", 'c').unwrap();

        assert_eq!(tree.patterns(), vec!["/", "/dashboard", "/operadora/:id"]);
        let values: Vec<char> = tree.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec!['a', 'b', 'c']);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_rejects_malformed_patterns() {
        let mut tree = RouteTree::new();
        assert_eq!(
            tree.insert("dashboard", 0),
            Err(RouteError::MissingLeadingSlash("dashboard".to_string()))
        );
        assert_eq!(
            tree.insert("/operadora/:", 0),
            Err(RouteError::EmptyParamName("/operadora/:".to_string()))
        );
        assert_eq!(
            tree.insert("/files/*path/x", 0),
            Err(RouteError::WildcardNotLast("/files/*path/x".to_string()))
        );
        assert!(tree.is_empty());
    }

    #[test]
    fn test_rejects_duplicates() {
        let mut tree = RouteTree::new();
        tree.insert("/dashboard", 0).unwrap();
        tree.insert("/operadora/:id", 1).unwrap();

        assert_eq!(
            tree.insert("/dashboard/", 2),
            Err(RouteError::Duplicate("/dashboard/".to_string()))
        );
        assert_eq!(
            tree.insert("/operadora/:id", 3),
            Err(RouteError::Duplicate("/operadora/:id".to_string()))
        );
        assert!(matches!(
            tree.insert("/operadora/:codigo", 4),
            Err(RouteError::ConflictingParam { .. })
        ));
        assert_eq!(tree.len(), 2);
    }
}
