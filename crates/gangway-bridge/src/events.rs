//! Bridge diagnostic events.

/// Routing outcomes recorded while handling intercepted calls. Drained by
/// the embedder via `Bridge::drain_events`; purely diagnostic, never part of
/// the delivery contract.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeEvent {
    /// A call was decoded and delivered to its listener.
    Delivered { tag: String, method: String },
    /// A call decoded cleanly but no listener holds its tag.
    UnknownTag { tag: String, method: String },
    /// An intercepted URL failed to decode; the call was dropped whole.
    DecodeFailed { url: String, reason: String },
}
