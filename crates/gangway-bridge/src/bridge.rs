//! The bridge itself: navigation interception, call dispatch, outbound
//! script execution, and the diagnostic event sink.

use std::sync::{Arc, Mutex, Weak};

use serde_json::Value;
use tracing::{debug, warn};

use gangway_common::{BridgeError, RegisterError, Result};

use crate::events::BridgeEvent;
use crate::host::ScriptHost;
use crate::protocol::{self, InboundCall, SELF_TAG};
use crate::registry::{CallListener, ListenerRegistry};
use crate::script;

/// What the view should do with a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    /// Not bridge traffic; let the view load it.
    Allow,
    /// Bridge traffic; the request must never reach an actual page load.
    Deny,
}

impl NavigationDecision {
    /// `true` when the view may proceed with the load. Matches the boolean
    /// contract of navigation callbacks like wry's.
    pub fn allows(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Bridge behavior knobs.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Record routing outcomes for `drain_events`.
    pub capture_events: bool,
    /// Echo unroutable calls to the page console via the `__self` channel.
    pub echo_unknown_to_page: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            capture_events: true,
            echo_unknown_to_page: true,
        }
    }
}

/// Mediates calls between native listeners and script code in a view.
///
/// The bridge owns its listener registry and an event sink. The view is
/// referenced weakly: the embedder owns it, binds it with [`Bridge::bind`],
/// and may drop it at any time.
pub struct Bridge {
    config: BridgeConfig,
    registry: Mutex<ListenerRegistry>,
    host: Mutex<Option<Weak<dyn ScriptHost>>>,
    events: Mutex<Vec<BridgeEvent>>,
}

impl Bridge {
    pub fn new() -> Self {
        Self::with_config(BridgeConfig::default())
    }

    pub fn with_config(config: BridgeConfig) -> Self {
        Self {
            config,
            registry: Mutex::new(ListenerRegistry::new()),
            host: Mutex::new(None),
            events: Mutex::new(Vec::new()),
        }
    }

    /// Bind the bridge to the view it talks through. Only a weak reference
    /// is kept; outbound calls fail with `TargetUnavailable` once the owner
    /// drops the view.
    pub fn bind(&self, host: &Arc<dyn ScriptHost>) {
        *self.host.lock().unwrap() = Some(Arc::downgrade(host));
        debug!("script host bound");
    }

    /// Drop the host binding without touching the registry.
    pub fn detach(&self) {
        *self.host.lock().unwrap() = None;
        debug!("script host detached");
    }

    /// Register `listener` under `tag`. Fails on an empty tag or a tag that
    /// is already taken; the prior listener stays registered either way.
    pub fn register_listener(
        &self,
        tag: impl Into<String>,
        listener: Arc<dyn CallListener>,
    ) -> std::result::Result<(), RegisterError> {
        let tag = tag.into();
        let result = self.registry.lock().unwrap().register(tag.clone(), listener);
        match &result {
            Ok(()) => debug!(tag = %tag, "listener registered"),
            Err(e) => warn!(tag = %tag, error = %e, "listener registration rejected"),
        }
        result
    }

    /// Remove the listener under `tag`. Returns whether one was present.
    pub fn unregister_listener(&self, tag: &str) -> bool {
        let removed = self.registry.lock().unwrap().unregister(tag);
        if removed {
            debug!(tag, "listener unregistered");
        }
        removed
    }

    /// How many listeners are registered.
    pub fn listener_count(&self) -> usize {
        self.registry.lock().unwrap().count()
    }

    /// Invoke `<object>.<method>(...)` in the page, arguments rendered as
    /// JSON literals. Fire-and-forget: whatever the expression evaluates to
    /// is discarded. Nothing executes if validation or serialization fails.
    pub fn call_script(&self, object: &str, method: &str, args: &[Value]) -> Result<()> {
        let js = script::call_expression(object, method, args).map_err(BridgeError::from)?;
        self.evaluate(&js)?;
        debug!(object, method, argc = args.len(), "script call dispatched");
        Ok(())
    }

    /// Deliver a call to a page object registered with the bootstrap's
    /// `register`, using the `raiseEvent` wire form.
    pub fn raise_event(&self, tag: &str, method: &str, args: &[Value]) -> Result<()> {
        let js = protocol::raise_event_script(tag, method, args).map_err(BridgeError::from)?;
        self.evaluate(&js)?;
        debug!(tag, method, argc = args.len(), "page event raised");
        Ok(())
    }

    /// Decide a navigation request. Everything outside the reserved prefix
    /// passes through untouched; everything inside is denied and handled as
    /// a call: delivered, or dropped whole on decode failure / unknown tag.
    pub fn intercept(&self, url: &str) -> NavigationDecision {
        let Some(parsed) = InboundCall::from_url(url) else {
            return NavigationDecision::Allow;
        };

        match parsed {
            Ok(call) => self.dispatch(call),
            Err(e) => {
                warn!(url, error = %e, "intercepted call dropped: decode failed");
                self.push_event(BridgeEvent::DecodeFailed {
                    url: url.to_string(),
                    reason: e.to_string(),
                });
            }
        }

        NavigationDecision::Deny
    }

    /// Drain all pending diagnostic events.
    pub fn drain_events(&self) -> Vec<BridgeEvent> {
        let mut events = self.events.lock().unwrap();
        std::mem::take(&mut *events)
    }

    fn dispatch(&self, call: InboundCall) {
        // clone the handle out and release the registry before invoking, so
        // a listener may re-enter the bridge from receive_call
        let listener = self.registry.lock().unwrap().lookup(&call.tag);

        match listener {
            Some(listener) => {
                debug!(
                    tag = %call.tag,
                    method = %call.method,
                    argc = call.args.len(),
                    "call delivered"
                );
                listener.receive_call(&call.method, &call.args);
                self.push_event(BridgeEvent::Delivered {
                    tag: call.tag,
                    method: call.method,
                });
            }
            None => {
                warn!(tag = %call.tag, method = %call.method, "call dropped: no listener under tag");
                if self.config.echo_unknown_to_page {
                    self.echo_unknown(&call.tag);
                }
                self.push_event(BridgeEvent::UnknownTag {
                    tag: call.tag,
                    method: call.method,
                });
            }
        }
    }

    /// Surface an unroutable call on the page console through the reserved
    /// `__self` logger. Best effort; without a bound host it is skipped.
    fn echo_unknown(&self, tag: &str) {
        let message = format!("WebViewCommunicator: no listener registered under tag '{tag}'");
        if let Err(e) = self.raise_event(SELF_TAG, "log", &[Value::String(message)]) {
            debug!(error = %e, "console echo skipped");
        }
    }

    fn evaluate(&self, js: &str) -> Result<()> {
        let host = self
            .host
            .lock()
            .unwrap()
            .as_ref()
            .and_then(Weak::upgrade)
            .ok_or(BridgeError::TargetUnavailable)?;

        host.evaluate_script(js)?;
        Ok(())
    }

    fn push_event(&self, event: BridgeEvent) {
        if !self.config.capture_events {
            return;
        }
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Default for Bridge {
    fn default() -> Self {
        Self::new()
    }
}
