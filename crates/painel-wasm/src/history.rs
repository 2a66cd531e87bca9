//! History backed by `window.history`

use painel_core::{Error, History, Result};
use wasm_bindgen::JsValue;
use web_sys::Window;

/// Session history of the current browser tab
pub struct BrowserHistory {
    window: Window,
}

impl BrowserHistory {
    pub fn new() -> Result<Self> {
        let window =
            web_sys::window().ok_or_else(|| Error::History("no global `window` exists".to_string()))?;
        Ok(Self { window })
    }

    fn history(&self) -> Result<web_sys::History> {
        self.window.history().map_err(js_error)
    }
}

pub(crate) fn js_error(e: JsValue) -> Error {
    Error::History(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

impl History for BrowserHistory {
    fn location(&self) -> String {
        let location = self.window.location();
        let path = location.pathname().unwrap_or_else(|_| "/".to_string());
        let search = location.search().unwrap_or_default();
        let hash = location.hash().unwrap_or_default();
        format!("{}{}{}", path, search, hash)
    }

    fn push(&mut self, url: &str) -> Result<()> {
        self.history()?
            .push_state_with_url(&JsValue::NULL, "", Some(url))
            .map_err(js_error)
    }

    fn replace(&mut self, url: &str) -> Result<()> {
        self.history()?
            .replace_state_with_url(&JsValue::NULL, "", Some(url))
            .map_err(js_error)
    }

    fn go(&mut self, delta: i32) -> Result<()> {
        self.history()?.go_with_delta(delta).map_err(js_error)
    }
}
