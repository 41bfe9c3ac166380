//! Action message protocol.
//!
//! Decodes JSON text messages (for example from a diagram server) into
//! actions and fans them out to subscribed listeners. Listener tables are
//! lock-protected so messages may arrive on a transport thread; the
//! [`ActionInbox`] hands decoded actions over to the single-threaded
//! dispatcher, which drains it once per frame.

use std::collections::VecDeque;
use std::sync::Arc;

use diagramkit_core::{thread_safe_rw_map, CodecError, ThreadSafeRwMap};
use parking_lot::Mutex;
use uuid::Uuid;

use crate::action::Action;

/// Subscription handle for removing a listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

type ActionListener = Box<dyn Fn(&Action) + Send + Sync>;
type ErrorListener = Box<dyn Fn(&CodecError) + Send + Sync>;

/// Queue of decoded actions waiting to be dispatched.
#[derive(Clone, Default)]
pub struct ActionInbox {
    queue: Arc<Mutex<VecDeque<Action>>>,
}

impl ActionInbox {
    pub fn push(&self, action: Action) {
        self.queue.lock().push_back(action);
    }

    /// Removes and returns all queued actions in arrival order.
    pub fn drain(&self) -> Vec<Action> {
        self.queue.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }
}

#[derive(Default)]
pub struct ActionMessageHandler {
    action_listeners: ThreadSafeRwMap<SubscriptionId, ActionListener>,
    error_listeners: ThreadSafeRwMap<SubscriptionId, ErrorListener>,
}

impl ActionMessageHandler {
    pub fn new() -> Self {
        Self {
            action_listeners: thread_safe_rw_map(),
            error_listeners: thread_safe_rw_map(),
        }
    }

    pub fn add_action_listener<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&Action) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        self.action_listeners.write().insert(id, Box::new(listener));
        tracing::debug!("Action listener {} added", id);
        id
    }

    pub fn remove_action_listener(&self, id: SubscriptionId) -> bool {
        let removed = self.action_listeners.write().remove(&id).is_some();
        if removed {
            tracing::debug!("Action listener {} removed", id);
        }
        removed
    }

    pub fn add_error_listener<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&CodecError) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        self.error_listeners.write().insert(id, Box::new(listener));
        id
    }

    pub fn remove_error_listener(&self, id: SubscriptionId) -> bool {
        self.error_listeners.write().remove(&id).is_some()
    }

    /// Subscribes a new inbox that collects every decoded action.
    pub fn inbox(&self) -> (SubscriptionId, ActionInbox) {
        let inbox = ActionInbox::default();
        let sink = inbox.clone();
        let id = self.add_action_listener(move |action| sink.push(action.clone()));
        (id, inbox)
    }

    pub fn listener_count(&self) -> usize {
        self.action_listeners.read().len() + self.error_listeners.read().len()
    }

    /// Decodes one message and notifies listeners. Returns whether it decoded.
    pub fn on_message(&self, text: &str) -> bool {
        match Action::from_json(text) {
            Ok(action) => {
                tracing::trace!("Received action '{}'", action.kind());
                for listener in self.action_listeners.read().values() {
                    listener(&action);
                }
                true
            }
            Err(err) => {
                tracing::warn!("Dropping action message: {}", err);
                for listener in self.error_listeners.read().values() {
                    listener(&err);
                }
                false
            }
        }
    }

    /// Encodes an outbound action.
    pub fn encode(&self, action: &Action) -> Result<String, CodecError> {
        action.to_json()
    }
}
