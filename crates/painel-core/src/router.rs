//! Navigation router
//!
//! Owns the route tree, the history backend and the active route. The
//! router is built once at bootstrap and handed to the rendering layer;
//! there is no global instance.

use crate::location::{decode_component, encode_segment};
use crate::{Error, History, Location, OperatorId, Result, RouterConfig, View};
use painel_router::{parse_pattern, RouteTree, Segment};
use serde::Serialize;
use tracing::{debug, warn};

/// Binding from a path pattern to the view that renders it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    /// Name used for reverse routing
    pub name: &'static str,
    /// Path pattern, e.g. `/operadora/:id`
    pub path: &'static str,
    pub view: View,
}

/// Parameters captured from the path, decoded, in pattern order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteParams(Vec<(String, String)>);

impl RouteParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A location matched against the route table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRoute {
    pub name: &'static str,
    pub view: View,
    /// Pattern that matched
    pub pattern: &'static str,
    pub location: Location,
    pub params: RouteParams,
}

impl ResolvedRoute {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// The `id` parameter, if the route has one
    pub fn operator_id(&self) -> Option<OperatorId> {
        self.param("id").map(OperatorId::from)
    }

    pub fn path(&self) -> &str {
        &self.location.path
    }

    pub fn full_path(&self) -> String {
        self.location.full_path()
    }
}

type Listener = Box<dyn FnMut(Option<&ResolvedRoute>, Option<&ResolvedRoute>)>;

#[derive(Debug, Clone, Copy)]
enum Navigation {
    Push,
    Replace,
}

/// Client-side navigation controller
pub struct Router<H> {
    tree: RouteTree<RouteEntry>,
    config: RouterConfig,
    history: H,
    /// Last location committed; `None` until the first sync
    location: Option<Location>,
    current: Option<ResolvedRoute>,
    listeners: Vec<Listener>,
}

impl<H: History> Router<H> {
    /// Register `entries` in order and resolve the history's current URL
    pub fn new(entries: &[RouteEntry], config: RouterConfig, history: H) -> Result<Self> {
        config.validate()?;

        let mut tree: RouteTree<RouteEntry> = RouteTree::new();
        for entry in entries {
            if tree.iter().any(|(_, e)| e.name == entry.name) {
                return Err(Error::DuplicateName(entry.name.to_string()));
            }
            tree.insert(entry.path, *entry)?;
            debug!(name = entry.name, path = entry.path, view = %entry.view, "registered route");
        }

        let mut router = Self {
            tree,
            config,
            history,
            location: None,
            current: None,
            listeners: Vec::new(),
        };
        router.sync();
        Ok(router)
    }

    /// Match a target against the table without navigating
    pub fn resolve(&self, target: &str) -> Option<ResolvedRoute> {
        self.resolve_location(&Location::parse(target))
    }

    fn resolve_location(&self, location: &Location) -> Option<ResolvedRoute> {
        let m = self.tree.find(&location.path)?;
        let entry = *m.value;
        let params = m
            .params
            .into_iter()
            .map(|(k, v)| (k, decode_component(&v)))
            .collect();

        Some(ResolvedRoute {
            name: entry.name,
            view: entry.view,
            pattern: entry.path,
            location: location.clone(),
            params: RouteParams(params),
        })
    }

    /// Navigate to `target`, adding a history entry
    ///
    /// Returns the new route, or `None` when nothing matches. Unmatched
    /// targets still land in history.
    pub fn push(&mut self, target: &str) -> Result<Option<ResolvedRoute>> {
        self.navigate(target, Navigation::Push)
    }

    /// Navigate to `target`, overwriting the current history entry
    pub fn replace(&mut self, target: &str) -> Result<Option<ResolvedRoute>> {
        self.navigate(target, Navigation::Replace)
    }

    /// Navigate to a named route
    pub fn push_named(&mut self, name: &str, params: &[(&str, &str)]) -> Result<Option<ResolvedRoute>> {
        let path = self.path_for(name, params)?;
        self.push(&path)
    }

    fn navigate(&mut self, target: &str, kind: Navigation) -> Result<Option<ResolvedRoute>> {
        if !target.starts_with('/') {
            return Err(Error::InvalidTarget(target.to_string()));
        }

        let location = Location::parse(target);
        if self.location.as_ref() == Some(&location) {
            debug!(path = %location, "already at location");
            return Ok(self.current.clone());
        }

        let url = self
            .config
            .history
            .to_url(&self.config.base, &location.full_path());
        match kind {
            Navigation::Push => self.history.push(&url)?,
            Navigation::Replace => self.history.replace(&url)?,
        }

        Ok(self.commit(location))
    }

    pub fn back(&mut self) -> Result<Option<ResolvedRoute>> {
        self.go(-1)
    }

    pub fn forward(&mut self) -> Result<Option<ResolvedRoute>> {
        self.go(1)
    }

    /// Move through history
    ///
    /// Backends that pop asynchronously (the browser) leave the location
    /// unchanged here; their pop handler must call [`Router::sync`].
    pub fn go(&mut self, delta: i32) -> Result<Option<ResolvedRoute>> {
        self.history.go(delta)?;
        Ok(self.sync())
    }

    /// Re-read the history's URL and commit it if it changed
    pub fn sync(&mut self) -> Option<ResolvedRoute> {
        let url = self.history.location();
        let location = Location::parse(&self.config.history.from_url(&self.config.base, &url));
        if self.location.as_ref() == Some(&location) {
            return self.current.clone();
        }
        self.commit(location)
    }

    fn commit(&mut self, location: Location) -> Option<ResolvedRoute> {
        let to = self.resolve_location(&location);
        match &to {
            Some(route) => debug!(path = %location, route = route.name, view = %route.view, "navigated"),
            None => warn!(path = %location, "no route matches"),
        }

        let from = std::mem::replace(&mut self.current, to);
        self.location = Some(location);
        for listener in &mut self.listeners {
            listener(self.current.as_ref(), from.as_ref());
        }
        self.current.clone()
    }

    /// Register a callback invoked with `(to, from)` after every change
    pub fn on_change<F>(&mut self, listener: F)
    where
        F: FnMut(Option<&ResolvedRoute>, Option<&ResolvedRoute>) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// In-app path of a named route with its parameters filled in
    pub fn path_for(&self, name: &str, params: &[(&str, &str)]) -> Result<String> {
        let entry = self
            .tree
            .iter()
            .map(|(_, e)| e)
            .find(|e| e.name == name)
            .ok_or_else(|| Error::UnknownRoute(name.to_string()))?;

        let lookup = |param: &str| {
            params
                .iter()
                .find(|(k, _)| *k == param)
                .map(|(_, v)| *v)
                .ok_or_else(|| Error::MissingParam {
                    route: name.to_string(),
                    param: param.to_string(),
                })
        };

        let mut path = String::new();
        for segment in parse_pattern(entry.path)? {
            path.push('/');
            match segment {
                Segment::Static(s) => path.push_str(s),
                Segment::Param(p) => path.push_str(&encode_segment(lookup(p)?)),
                Segment::Wildcard(p) => {
                    let value = lookup(p)?;
                    let encoded: Vec<String> = value.split('/').map(encode_segment).collect();
                    path.push_str(&encoded.join("/"));
                }
            }
        }
        if path.is_empty() {
            path.push('/');
        }
        Ok(path)
    }

    /// URL for a named route as it should appear in a link's `href`
    pub fn href(&self, name: &str, params: &[(&str, &str)]) -> Result<String> {
        let path = self.path_for(name, params)?;
        Ok(self.config.history.to_url(&self.config.base, &path))
    }

    /// The active route, `None` when the location matches nothing
    pub fn current(&self) -> Option<&ResolvedRoute> {
        self.current.as_ref()
    }

    /// The active location, matched or not
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// Registered entries in insertion order
    pub fn routes(&self) -> Vec<RouteEntry> {
        self.tree.iter().map(|(_, e)| *e).collect()
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn history(&self) -> &H {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HistoryMode, MemoryHistory};
    use std::cell::RefCell;
    use std::rc::Rc;

    const TABLE: [RouteEntry; 3] = [
        RouteEntry { name: "home", path: "/", view: View::OperatorTable },
        RouteEntry { name: "stats", path: "/stats", view: View::Dashboard },
        RouteEntry { name: "item", path: "/item/:id", view: View::OperatorDetail },
    ];

    fn router() -> Router<MemoryHistory> {
        Router::new(&TABLE, RouterConfig::default(), MemoryHistory::default()).unwrap()
    }

    #[test]
    fn test_initial_sync() {
        crate::logging::init();

        let r = Router::new(&TABLE, RouterConfig::default(), MemoryHistory::new("/item/7")).unwrap();
        let current = r.current().unwrap();
        assert_eq!(current.view, View::OperatorDetail);
        assert_eq!(current.param("id"), Some("7"));
    }

    #[test]
    fn test_push_records_history() {
        let mut r = router();
        let route = r.push("/stats?periodo=2024#top").unwrap().unwrap();
        assert_eq!(route.view, View::Dashboard);
        assert_eq!(route.location.query.as_deref(), Some("periodo=2024"));
        assert_eq!(r.history().entries(), &["/", "/stats?periodo=2024#top"]);
    }

    #[test]
    fn test_push_same_location_is_noop() {
        let mut r = router();
        r.push("/stats").unwrap();
        r.push("/stats").unwrap();
        assert_eq!(r.history().entries().len(), 2);
    }

    #[test]
    fn test_replace() {
        let mut r = router();
        r.push("/stats").unwrap();
        r.replace("/item/1").unwrap();
        assert_eq!(r.history().entries(), &["/", "/item/1"]);
        assert_eq!(r.current().unwrap().view, View::OperatorDetail);
    }

    #[test]
    fn test_unmatched_push() {
        let mut r = router();
        assert_eq!(r.push("/nada").unwrap(), None);
        assert!(r.current().is_none());
        assert_eq!(r.location().unwrap().path, "/nada");
        assert_eq!(r.history().location(), "/nada");
    }

    #[test]
    fn test_relative_target_rejected() {
        let mut r = router();
        assert!(matches!(r.push("stats"), Err(Error::InvalidTarget(_))));
        assert_eq!(r.history().entries().len(), 1);
    }

    #[test]
    fn test_back_and_forward() {
        let mut r = router();
        r.push("/stats").unwrap();
        r.push("/item/3").unwrap();

        assert_eq!(r.back().unwrap().unwrap().view, View::Dashboard);
        assert_eq!(r.back().unwrap().unwrap().view, View::OperatorTable);
        assert_eq!(r.forward().unwrap().unwrap().view, View::Dashboard);
        assert_eq!(r.go(1).unwrap().unwrap().param("id"), Some("3"));
    }

    #[test]
    fn test_listeners_see_to_and_from() {
        let seen: Rc<RefCell<Vec<(Option<View>, Option<View>)>>> = Rc::default();
        let mut r = router();
        let log = seen.clone();
        r.on_change(move |to, from| {
            log.borrow_mut().push((to.map(|t| t.view), from.map(|f| f.view)));
        });

        r.push("/stats").unwrap();
        r.push("/nada").unwrap();
        r.push("/nada").unwrap();
        r.back().unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![
                (Some(View::Dashboard), Some(View::OperatorTable)),
                (None, Some(View::Dashboard)),
                (Some(View::Dashboard), None),
            ]
        );
    }

    #[test]
    fn test_params_are_decoded() {
        let r = router();
        let route = r.resolve("/item/12.345.678%2F0001-90").unwrap();
        assert_eq!(route.operator_id(), Some(OperatorId::new("12.345.678/0001-90")));
    }

    #[test]
    fn test_reverse_routing() {
        let r = router();
        assert_eq!(r.path_for("home", &[]).unwrap(), "/");
        assert_eq!(r.path_for("item", &[("id", "a b")]).unwrap(), "/item/a%20b");
        assert!(matches!(r.path_for("item", &[]), Err(Error::MissingParam { .. })));
        assert!(matches!(r.path_for("nope", &[]), Err(Error::UnknownRoute(_))));
    }

    #[test]
    fn test_push_named() {
        let mut r = router();
        let route = r.push_named("item", &[("id", "99")]).unwrap().unwrap();
        assert_eq!(route.param("id"), Some("99"));
    }

    #[test]
    fn test_hash_mode_with_base() {
        let config = RouterConfig::new().history(HistoryMode::Hash).base("/painel/");
        let mut r = Router::new(&TABLE, config, MemoryHistory::new("/painel/#/stats")).unwrap();
        assert_eq!(r.current().unwrap().view, View::Dashboard);

        r.push("/item/5").unwrap();
        assert_eq!(r.history().location(), "/painel/#/item/5");
        assert_eq!(r.href("home", &[]).unwrap(), "/painel/#/");
    }

    #[test]
    fn test_web_mode_with_base() {
        let config = RouterConfig::new().base("/painel");
        let mut r = Router::new(&TABLE, config, MemoryHistory::new("/painel")).unwrap();
        assert_eq!(r.current().unwrap().view, View::OperatorTable);

        r.push("/stats").unwrap();
        assert_eq!(r.history().location(), "/painel/stats");
        assert_eq!(r.href("item", &[("id", "1")]).unwrap(), "/painel/item/1");
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let table = [
            RouteEntry { name: "home", path: "/", view: View::OperatorTable },
            RouteEntry { name: "home", path: "/home", view: View::OperatorTable },
        ];
        let result = Router::new(&table, RouterConfig::default(), MemoryHistory::default());
        assert!(matches!(result, Err(Error::DuplicateName(_))));
    }

    #[test]
    fn test_rejects_duplicate_patterns() {
        let table = [
            RouteEntry { name: "a", path: "/stats", view: View::Dashboard },
            RouteEntry { name: "b", path: "/stats/", view: View::Dashboard },
        ];
        let result = Router::new(&table, RouterConfig::default(), MemoryHistory::default());
        assert!(matches!(result, Err(Error::Route(_))));
    }

    /// Reports URLs escaped, like `window.location` does
    struct EscapingHistory(MemoryHistory);

    impl History for EscapingHistory {
        fn location(&self) -> String {
            self.0.location().replace(' ', "%20")
        }

        fn push(&mut self, url: &str) -> Result<()> {
            self.0.push(url)
        }

        fn replace(&mut self, url: &str) -> Result<()> {
            self.0.replace(url)
        }

        fn go(&mut self, delta: i32) -> Result<()> {
            self.0.go(delta)
        }
    }

    #[test]
    fn test_unescaped_target_survives_escaped_read_back() {
        let history = EscapingHistory(MemoryHistory::default());
        let mut r = Router::new(&TABLE, RouterConfig::default(), history).unwrap();
        r.push("/item/a b").unwrap();

        let calls = Rc::new(RefCell::new(0));
        let counter = calls.clone();
        r.on_change(move |_, _| *counter.borrow_mut() += 1);

        assert_eq!(r.go(0).unwrap().unwrap().param("id"), Some("a b"));
        assert_eq!(r.sync().unwrap().param("id"), Some("a b"));
        assert_eq!(*calls.borrow(), 0);

        r.push("/item/a b").unwrap();
        r.push("/item/a%20b").unwrap();
        assert_eq!(r.history().0.entries(), &["/", "/item/a%20b"]);
        assert_eq!(*calls.borrow(), 0);
    }
}
