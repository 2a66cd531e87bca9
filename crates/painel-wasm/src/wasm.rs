//! WASM bindings for JavaScript interop

use crate::bridge;
use crate::history::BrowserHistory;
use painel_core::{create_router, Error, ResolvedRoute, Router, RouterConfig};
use std::cell::{Cell, RefCell, RefMut};
use std::collections::VecDeque;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

type SharedRouter = Rc<RefCell<Router<BrowserHistory>>>;
type SharedNotifier = Rc<Notifier>;

fn to_js(e: Error) -> JsValue {
    JsValue::from_str(&e.to_string())
}

// ============================================================================
// Routes
// ============================================================================

/// Route snapshot handed to JS
#[wasm_bindgen]
pub struct WasmRoute {
    route: ResolvedRoute,
}

#[wasm_bindgen]
impl WasmRoute {
    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.route.name.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn view(&self) -> String {
        self.route.view.as_str().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn path(&self) -> String {
        self.route.path().to_string()
    }

    #[wasm_bindgen(getter, js_name = fullPath)]
    pub fn full_path(&self) -> String {
        self.route.full_path()
    }

    /// Params flattened as `[name, value, name, value, ...]`
    #[wasm_bindgen(getter)]
    pub fn params(&self) -> Vec<String> {
        self.route
            .params
            .iter()
            .flat_map(|(k, v)| [k.to_string(), v.to_string()])
            .collect()
    }

    pub fn param(&self, name: &str) -> Option<String> {
        self.route.param(name).map(str::to_string)
    }

    #[wasm_bindgen(js_name = toJSON)]
    pub fn to_json(&self) -> String {
        bridge::route_json(Some(&self.route))
    }
}

impl From<ResolvedRoute> for WasmRoute {
    fn from(route: ResolvedRoute) -> Self {
        Self { route }
    }
}

fn route_value(route: Option<&ResolvedRoute>) -> JsValue {
    route
        .cloned()
        .map(|r| JsValue::from(WasmRoute::from(r)))
        .unwrap_or(JsValue::NULL)
}

// ============================================================================
// Change notifications
// ============================================================================

/// JS change callbacks and the `(to, from)` pairs waiting for them
///
/// The core router notifies while it is mutably borrowed, so changes are
/// queued there and delivered once the borrow has been released. A
/// callback may then read or navigate the router freely.
#[derive(Default)]
struct Notifier {
    callbacks: RefCell<Vec<js_sys::Function>>,
    pending: RefCell<VecDeque<(JsValue, JsValue)>>,
    flushing: Cell<bool>,
}

impl Notifier {
    fn enqueue(&self, to: JsValue, from: JsValue) {
        self.pending.borrow_mut().push_back((to, from));
    }

    fn subscribe(&self, callback: js_sys::Function) {
        self.callbacks.borrow_mut().push(callback);
    }

    /// Deliver queued changes in order
    ///
    /// Nested calls from inside a callback return at once; the outer loop
    /// picks up whatever the callback queued.
    fn flush(&self) {
        if self.flushing.replace(true) {
            return;
        }
        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some((to, from)) = next else { break };
            let callbacks = self.callbacks.borrow().clone();
            for callback in &callbacks {
                if let Err(e) = callback.call2(&JsValue::NULL, &to, &from) {
                    web_sys::console::error_1(&e);
                }
            }
        }
        self.flushing.set(false);
    }
}

// ============================================================================
// Router
// ============================================================================

/// Create the panel router over the browser's history
///
/// `config` is optional JSON, e.g. `{"history":"hash","base":"/painel"}`.
#[wasm_bindgen(js_name = createRouter)]
pub fn create_browser_router(config: Option<String>) -> Result<WasmRouter, JsValue> {
    console_error_panic_hook::set_once();

    let config = match config {
        Some(json) => RouterConfig::from_json(&json).map_err(to_js)?,
        None => RouterConfig::default(),
    };
    let history = BrowserHistory::new().map_err(to_js)?;
    let mut router = create_router(config, history).map_err(to_js)?;

    let notifier = SharedNotifier::default();
    let queue = Rc::clone(&notifier);
    router.on_change(move |to, from| queue.enqueue(route_value(to), route_value(from)));

    Ok(WasmRouter {
        inner: Rc::new(RefCell::new(router)),
        notifier,
        popstate: None,
    })
}

/// WASM-exposed router
#[wasm_bindgen]
pub struct WasmRouter {
    inner: SharedRouter,
    notifier: SharedNotifier,
    popstate: Option<Closure<dyn FnMut(web_sys::PopStateEvent)>>,
}

#[wasm_bindgen]
impl WasmRouter {
    /// Navigate to a path, adding a history entry
    pub fn push(&self, target: &str) -> Result<Option<WasmRoute>, JsValue> {
        let route = self.router()?.push(target).map_err(to_js)?;
        self.notifier.flush();
        Ok(route.map(WasmRoute::from))
    }

    /// Navigate to a path, replacing the current history entry
    pub fn replace(&self, target: &str) -> Result<Option<WasmRoute>, JsValue> {
        let route = self.router()?.replace(target).map_err(to_js)?;
        self.notifier.flush();
        Ok(route.map(WasmRoute::from))
    }

    /// Navigate to a named route; `params` is a JSON object
    #[wasm_bindgen(js_name = pushNamed)]
    pub fn push_named(&self, name: &str, params: Option<String>) -> Result<Option<WasmRoute>, JsValue> {
        let params = parse_params(params)?;
        let pairs: Vec<(&str, &str)> = params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        let route = self.router()?.push_named(name, &pairs).map_err(to_js)?;
        self.notifier.flush();
        Ok(route.map(WasmRoute::from))
    }

    /// Link target for a named route; `params` is a JSON object
    pub fn href(&self, name: &str, params: Option<String>) -> Result<String, JsValue> {
        let params = parse_params(params)?;
        let pairs: Vec<(&str, &str)> = params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        self.router()?.href(name, &pairs).map_err(to_js)
    }

    pub fn back(&self) -> Result<(), JsValue> {
        self.router()?.back().map_err(to_js)?;
        self.notifier.flush();
        Ok(())
    }

    pub fn forward(&self) -> Result<(), JsValue> {
        self.router()?.forward().map_err(to_js)?;
        self.notifier.flush();
        Ok(())
    }

    pub fn go(&self, delta: i32) -> Result<(), JsValue> {
        self.router()?.go(delta).map_err(to_js)?;
        self.notifier.flush();
        Ok(())
    }

    /// The active route, `undefined` when the location matches nothing
    pub fn current(&self) -> Result<Option<WasmRoute>, JsValue> {
        Ok(self.router()?.current().cloned().map(WasmRoute::from))
    }

    /// Match a path without navigating
    pub fn resolve(&self, target: &str) -> Result<Option<WasmRoute>, JsValue> {
        Ok(self.router()?.resolve(target).map(WasmRoute::from))
    }

    /// Route table as JSON, in registration order
    pub fn routes(&self) -> Result<String, JsValue> {
        Ok(bridge::routes_json(&self.router()?.routes()))
    }

    /// Call `callback(to, from)` after each route change
    ///
    /// Either argument is `null` when the location matched nothing.
    /// Callbacks run after the navigation has finished, so they may call
    /// `current()` or navigate again.
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&self, callback: js_sys::Function) {
        self.notifier.subscribe(callback);
    }

    /// Follow back/forward buttons by syncing on `popstate`
    pub fn listen(&mut self) -> Result<(), JsValue> {
        if self.popstate.is_some() {
            return Ok(());
        }

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global `window` exists"))?;
        let inner = Rc::clone(&self.inner);
        let notifier = Rc::clone(&self.notifier);
        let handler = Closure::wrap(Box::new(move |_: web_sys::PopStateEvent| {
            match inner.try_borrow_mut() {
                Ok(mut router) => {
                    web_sys::console::debug_1(&"popstate".into());
                    router.sync();
                }
                Err(_) => {
                    web_sys::console::warn_1(&"popstate during navigation ignored".into());
                    return;
                }
            }
            notifier.flush();
        }) as Box<dyn FnMut(_)>);

        window.add_event_listener_with_callback("popstate", handler.as_ref().unchecked_ref())?;
        self.popstate = Some(handler);
        Ok(())
    }

    /// Stop following `popstate`
    pub fn unlisten(&mut self) -> Result<(), JsValue> {
        if let Some(handler) = self.popstate.take() {
            if let Some(window) = web_sys::window() {
                window.remove_event_listener_with_callback("popstate", handler.as_ref().unchecked_ref())?;
            }
        }
        Ok(())
    }
}

impl WasmRouter {
    fn router(&self) -> Result<RefMut<'_, Router<BrowserHistory>>, JsValue> {
        self.inner
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("router is busy"))
    }
}

impl Drop for WasmRouter {
    fn drop(&mut self) {
        if let Err(e) = self.unlisten() {
            web_sys::console::warn_1(&e);
        }
    }
}

fn parse_params(json: Option<String>) -> Result<Vec<(String, String)>, JsValue> {
    match json {
        Some(json) => bridge::parse_params(&json)
            .map_err(|e| JsValue::from_str(&format!("Invalid params: {}", e))),
        None => Ok(Vec::new()),
    }
}
