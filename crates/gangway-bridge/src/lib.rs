//! Call bridge between native code and JavaScript in an embedded web view.
//!
//! Two symmetric channels:
//! - **JS -> native**: the page script encodes a call as a navigation to a
//!   URL under the reserved `js:WebViewCommunicator/` prefix; the bridge
//!   intercepts the navigation, denies the load, and dispatches the call to
//!   the native listener registered under the call's tag.
//! - **Native -> JS**: a call is rendered as a script expression and executed
//!   in the view's script context via [`ScriptHost`].
//!
//! The bridge never owns the view. It holds a weak back-reference and fails
//! outbound calls once the owner tears the view down.

pub mod bridge;
pub mod events;
pub mod host;
pub mod protocol;
pub mod registry;
pub mod script;

#[cfg(feature = "wry")]
pub mod wry;

pub use bridge::{Bridge, BridgeConfig, NavigationDecision};
pub use events::BridgeEvent;
pub use host::ScriptHost;
pub use protocol::{InboundCall, PAGE_BOOTSTRAP, RESERVED_PREFIX};
pub use registry::{CallListener, ListenerRegistry};
