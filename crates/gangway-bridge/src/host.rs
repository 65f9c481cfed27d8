//! The seam between the bridge and whatever executes scripts.

use gangway_common::HostError;

/// Capability the bridge needs from a view: execute a script string in the
/// page context and, where the backing view supports it, hand back a
/// synchronous string result.
///
/// The bridge only ever holds hosts weakly. The embedder owns the view and
/// its lifetime; once the view is gone, bridge operations that need it fail
/// with `TargetUnavailable`.
pub trait ScriptHost {
    fn evaluate_script(&self, js: &str) -> Result<Option<String>, HostError>;
}
