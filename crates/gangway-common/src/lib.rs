pub mod errors;

pub use errors::{BridgeError, DecodeError, EncodeError, HostError, RegisterError};

pub type Result<T> = std::result::Result<T, BridgeError>;
