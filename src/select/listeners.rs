//! Document-level listeners for dismiss-on-outside-interaction.
//!
//! A control subscribes when it mounts and holds the returned
//! [`Subscription`]; dropping the subscription deregisters it.
//! [`DocumentListeners::broadcast`] delivers an event to each live
//! subscription, so released controls stop hearing about the document.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};

/// An interaction that happened somewhere in the document, not necessarily
/// on any particular control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentEvent {
    /// A pointer button went down at a terminal cell.
    PointerDown { column: u16, row: u16 },

    /// Escape was pressed.
    Escape,
}

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    active: BTreeSet<u64>,
}

/// Registry of controls listening for [`DocumentEvent`]s.
///
/// Cloning gives another handle to the same registry.
#[derive(Debug, Clone, Default)]
pub struct DocumentListeners {
    registry: Rc<RefCell<Registry>>,
}

impl DocumentListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It stays registered until the guard is dropped.
    pub fn subscribe(&self) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.active.insert(id);
        tracing::trace!(id, "document listener subscribed");

        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.registry.borrow().active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hand `event` to `deliver` once per live subscription id, oldest first.
    ///
    /// The live set is captured before delivery, so subscriptions dropped
    /// by `deliver` do not disturb the walk.
    pub fn broadcast(&self, event: DocumentEvent, mut deliver: impl FnMut(u64, DocumentEvent)) {
        let ids: Vec<u64> = self.registry.borrow().active.iter().copied().collect();
        for id in ids {
            deliver(id, event);
        }
    }
}

/// A live registration. Deregisters itself on drop.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().active.remove(&self.id);
            tracing::trace!(id = self.id, "document listener released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropping_subscription_deregisters() {
        let listeners = DocumentListeners::new();
        let a = listeners.subscribe();
        let b = listeners.subscribe();
        assert_eq!(listeners.len(), 2);
        assert_ne!(a.id, b.id);

        drop(a);
        assert_eq!(listeners.len(), 1);
        assert!(listeners.registry.borrow().active.contains(&b.id));

        drop(b);
        assert!(listeners.is_empty());
    }

    #[test]
    fn broadcast_reaches_only_live_subscriptions() {
        let listeners = DocumentListeners::new();
        let a = listeners.subscribe();
        let b = listeners.subscribe();
        let c = listeners.subscribe();
        drop(b);

        let mut delivered = Vec::new();
        listeners.broadcast(DocumentEvent::Escape, |id, event| {
            assert_eq!(event, DocumentEvent::Escape);
            delivered.push(id);
        });
        assert_eq!(delivered, [a.id(), c.id()]);
    }

    #[test]
    fn subscription_outliving_registry_is_harmless() {
        let listeners = DocumentListeners::new();
        let sub = listeners.subscribe();
        drop(listeners);
        drop(sub);
    }
}
