//! In-process publish/subscribe used between dashboard components.
//!
//! Nothing here crosses the network. A bus is cheap to clone; clones share
//! one registry.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::JobSummary;

/// Published after the backend accepted a new crawl job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSubmitted {
    pub job: JobSummary,
}

/// Handle returned by [`NotificationBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler<E> = Arc<dyn Fn(&E) + Send + Sync>;

struct Registry<E> {
    next_id: u64,
    handlers: Vec<(SubscriptionId, Handler<E>)>,
}

pub struct NotificationBus<E> {
    registry: Arc<Mutex<Registry<E>>>,
}

impl<E> NotificationBus<E> {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                next_id: 1,
                handlers: Vec::new(),
            })),
        }
    }

    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let mut registry = self.lock();
        let id = SubscriptionId(registry.next_id);
        registry.next_id += 1;
        registry.handlers.push((id, Arc::new(handler)));
        id
    }

    /// Returns false if `id` was not (or no longer) subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut registry = self.lock();
        let before = registry.handlers.len();
        registry.handlers.retain(|(existing, _)| *existing != id);
        registry.handlers.len() != before
    }

    /// Delivers `event` to every current subscriber in subscription order and
    /// returns how many were called.
    ///
    /// Handlers run outside the registry lock, so they may subscribe or
    /// unsubscribe; such changes apply from the next publish on.
    pub fn publish(&self, event: &E) -> usize {
        let handlers: Vec<Handler<E>> = self
            .lock()
            .handlers
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();
        for handler in &handlers {
            handler(event);
        }
        handlers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().handlers.len()
    }

    fn lock(&self) -> MutexGuard<'_, Registry<E>> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<E> Default for NotificationBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for NotificationBus<E> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<E> fmt::Debug for NotificationBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
