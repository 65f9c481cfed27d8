//! wry adapter: run the bridge against a real `wry::WebView`.
//!
//! The embedder keeps ownership of the view. Typical wiring:
//!
//! ```ignore
//! let bridge = Arc::new(Bridge::new());
//! let webview = attach(WebViewBuilder::new(), Arc::clone(&bridge))
//!     .with_url("https://app.example")
//!     .build_as_child(&window)?;
//! let host: Arc<dyn ScriptHost> = Arc::new(webview);
//! bridge.bind(&host);
//! ```

use std::sync::Arc;

use ::wry::{WebView, WebViewBuilder};

use gangway_common::HostError;

use crate::bridge::Bridge;
use crate::host::ScriptHost;
use crate::protocol::PAGE_BOOTSTRAP;

impl ScriptHost for WebView {
    fn evaluate_script(&self, js: &str) -> Result<Option<String>, HostError> {
        WebView::evaluate_script(self, js).map_err(|e| HostError(e.to_string()))?;
        // wry evaluates asynchronously, so there is no synchronous result
        Ok(None)
    }
}

/// Wire a builder to the bridge: inject the page bootstrap and route every
/// navigation request through `Bridge::intercept`, so reserved URLs are
/// consumed before the view loads them.
pub fn attach<'a>(builder: WebViewBuilder<'a>, bridge: Arc<Bridge>) -> WebViewBuilder<'a> {
    builder
        .with_initialization_script(PAGE_BOOTSTRAP)
        .with_navigation_handler(move |url| bridge.intercept(&url).allows())
}
