//! Listener registry: tag -> native call receiver.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use gangway_common::RegisterError;

/// Receives script-originated calls. Anything registered with the bridge
/// implements this one method; no return value travels back through the
/// interception channel.
pub trait CallListener {
    fn receive_call(&self, method: &str, args: &[Value]);
}

/// Owned mapping from tags to listeners. A tag holds at most one listener;
/// registering an occupied tag is rejected and leaves the prior entry intact.
#[derive(Default)]
pub struct ListenerRegistry {
    entries: HashMap<String, Arc<dyn CallListener>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Insert `listener` under `tag`.
    pub fn register(
        &mut self,
        tag: impl Into<String>,
        listener: Arc<dyn CallListener>,
    ) -> Result<(), RegisterError> {
        let tag = tag.into();
        if tag.is_empty() {
            return Err(RegisterError::EmptyTag);
        }

        match self.entries.entry(tag) {
            Entry::Occupied(e) => Err(RegisterError::DuplicateTag(e.key().clone())),
            Entry::Vacant(v) => {
                v.insert(listener);
                Ok(())
            }
        }
    }

    /// Remove the listener under `tag`. Returns whether one was present.
    pub fn unregister(&mut self, tag: &str) -> bool {
        self.entries.remove(tag).is_some()
    }

    /// Look up a listener, cloning the handle out so callers can invoke it
    /// without holding the registry.
    pub fn lookup(&self, tag: &str) -> Option<Arc<dyn CallListener>> {
        self.entries.get(tag).cloned()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    /// All registered tags.
    pub fn tags(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// How many listeners are registered.
    pub fn count(&self) -> usize {
        self.entries.len()
    }
}
