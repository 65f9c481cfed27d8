//! Wire protocol for calls crossing the view boundary.
//!
//! Messages flow in both directions:
//! - **JS -> native**: the page builds a URL under [`RESERVED_PREFIX`] and
//!   triggers it as a navigation. The URL carries
//!   `<tag>/<method>?<percent-encoded JSON array>`.
//! - **Native -> JS**: the host evaluates
//!   `WebViewCommunicator.raiseEvent('<tag>', '<method>', '<args>')` with
//!   percent-encoded components; the page bootstrap decodes and routes.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value;

use gangway_common::{DecodeError, EncodeError};

/// URLs having this prefix are intercepted by the bridge and never loaded.
pub const RESERVED_PREFIX: &str = "js:WebViewCommunicator/";

/// Page-side global installed by [`PAGE_BOOTSTRAP`].
pub const PAGE_OBJECT: &str = "WebViewCommunicator";

/// Tag reserved for bridge-internal messaging. The page bootstrap registers
/// a console logger under it; do not register listeners with this tag.
pub const SELF_TAG: &str = "__self";

/// Everything outside the RFC 3986 unreserved set gets percent-encoded.
/// Compatible with `decodeURIComponent` on the page side.
const URL_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// A decoded JS -> native call, parsed from a single intercepted URL.
/// Constructed transiently, dispatched once, then dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundCall {
    /// Identifies the registered listener.
    pub tag: String,
    /// Method name to deliver.
    pub method: String,
    /// Ordered call arguments.
    pub args: Vec<Value>,
}

impl InboundCall {
    /// Whether a URL is addressed to the bridge at all.
    pub fn matches(url: &str) -> bool {
        url.starts_with(RESERVED_PREFIX)
    }

    /// Decode a full URL. `None` for URLs outside the reserved prefix;
    /// `Some(Err(_))` when the URL is bridge traffic but malformed.
    pub fn from_url(url: &str) -> Option<Result<Self, DecodeError>> {
        let rest = url.strip_prefix(RESERVED_PREFIX)?;
        Some(Self::parse(rest))
    }

    /// Parse the remainder after the reserved prefix:
    /// `<tag>/<method>?<percent-encoded JSON array>`.
    ///
    /// Tag and method are percent-decoded after splitting, so a tag may
    /// itself contain `/` when encoded as `%2F`. A missing query decodes as
    /// zero arguments.
    pub fn parse(rest: &str) -> Result<Self, DecodeError> {
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, query),
            None => (rest, ""),
        };

        let (raw_tag, raw_method) = path.split_once('/').unwrap_or((path, ""));
        if raw_tag.is_empty() {
            return Err(DecodeError::MissingTag);
        }
        if raw_method.is_empty() {
            return Err(DecodeError::MissingMethod);
        }
        if let Some((_, trailing)) = raw_method.split_once('/') {
            return Err(DecodeError::TrailingSegment(trailing.to_string()));
        }

        Ok(Self {
            tag: decode_component(raw_tag)?,
            method: decode_component(raw_method)?,
            args: decode_args(query)?,
        })
    }
}

fn decode_component(raw: &str) -> Result<String, DecodeError> {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|_| DecodeError::NotUtf8)
}

fn decode_args(query: &str) -> Result<Vec<Value>, DecodeError> {
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let decoded = decode_component(query)?;
    match serde_json::from_str::<Value>(&decoded) {
        Ok(Value::Array(args)) => Ok(args),
        Ok(other) => Err(DecodeError::NotAnArray(json_kind(&other).to_string())),
        Err(e) => Err(DecodeError::BadArguments(e.to_string())),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Build the native -> page delivery script:
/// `WebViewCommunicator.raiseEvent('<tag>', '<method>', '<json args>')`.
///
/// Each component is percent-encoded, which both makes it safe inside a
/// single-quoted script literal and matches the `decodeURIComponent` calls
/// in the page bootstrap.
pub fn raise_event_script(tag: &str, method: &str, args: &[Value]) -> Result<String, EncodeError> {
    let json = serde_json::to_string(args)?;
    Ok(format!(
        "{PAGE_OBJECT}.raiseEvent('{}', '{}', '{}')",
        utf8_percent_encode(tag, URL_SAFE),
        utf8_percent_encode(method, URL_SAFE),
        utf8_percent_encode(&json, URL_SAFE),
    ))
}

/// Page-side half of the bridge, injected as an initialization script into
/// every view the bridge is attached to.
///
/// Installs the `WebViewCommunicator` global:
/// - `nativeCall(tag, method, ...args)`: encode a call as a reserved URL
///   and trigger it via navigation.
/// - `register(tag, object)`: page-side registry; throws `DuplicateTag` on
///   collision, same policy as the native side.
/// - `raiseEvent(tag, method, params)`: entry point for native calls.
///   Decodes, parses, and routes to the registered page object.
///
/// A console logger is pre-registered under the reserved `__self` tag.
pub const PAGE_BOOTSTRAP: &str = r#"
(function() {
    if (window.WebViewCommunicator) { return; }

    var registered = {};

    function nativeCall(tag, method) {
        var args = Array.prototype.slice.call(arguments, 2);
        window.location.href = "js:WebViewCommunicator/" +
            encodeURIComponent(tag) + "/" +
            encodeURIComponent(method) + "?" +
            encodeURIComponent(JSON.stringify(args));
    }

    function register(tag, object) {
        if (registered[tag]) {
            throw {
                name: "DuplicateTag",
                message: "Another object already registered with tag '" + tag + "'"
            };
        }
        registered[tag] = object;
    }

    function raiseEvent(tag, method, params) {
        tag = decodeURIComponent(tag);
        method = decodeURIComponent(method);
        params = JSON.parse(decodeURIComponent(params));

        var target = registered[tag];
        if (!target) {
            console.log("WebViewCommunicator: no object registered under '" + tag + "'");
            return;
        }

        var fn = target[method];
        if (!fn) {
            console.log("WebViewCommunicator: no method '" + method + "' on object '" + tag + "'");
            return;
        }
        fn.apply(target, params);
    }

    register("__self", {
        log: function(message) {
            console.log(message);
        }
    });

    window.WebViewCommunicator = {
        nativeCall: nativeCall,
        register: register,
        raiseEvent: raiseEvent
    };
})();
"#;
