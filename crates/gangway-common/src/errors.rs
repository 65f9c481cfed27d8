#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegisterError {
    #[error("listener tag must not be empty")]
    EmptyTag,

    #[error("a listener is already registered under tag '{0}'")]
    DuplicateTag(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("call url is missing a listener tag")]
    MissingTag,

    #[error("call url is missing a method name")]
    MissingMethod,

    #[error("unexpected path segment after method: '{0}'")]
    TrailingSegment(String),

    #[error("percent-decoded component is not valid utf-8")]
    NotUtf8,

    #[error("argument payload is not valid json: {0}")]
    BadArguments(String),

    #[error("argument payload must be a json array, got {0}")]
    NotAnArray(String),
}

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("invalid script identifier: '{0}'")]
    InvalidIdentifier(String),

    #[error("argument serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Script execution failure surfaced by whatever backs the view.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("script host error: {0}")]
pub struct HostError(pub String);

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error(transparent)]
    Register(#[from] RegisterError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error("script target is no longer available")]
    TargetUnavailable,
}
