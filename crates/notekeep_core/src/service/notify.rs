//! Change-notification registry.
//!
//! Observers register a payload-free callback and re-read state when it
//! fires. Callbacks run synchronously, in registration order.

use std::fmt::{Debug, Formatter};

/// Handle returned by [`ChangeNotifier::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut()>;

#[derive(Default)]
pub struct ChangeNotifier {
    next_id: u64,
    observers: Vec<(SubscriptionId, Callback)>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: impl FnMut() + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(callback)));
        id
    }

    /// Returns `false` when `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(current, _)| *current != id);
        self.observers.len() != before
    }

    pub fn notify(&mut self) {
        for (_, callback) in &mut self.observers {
            callback();
        }
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl Debug for ChangeNotifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::ChangeNotifier;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn unsubscribed_callbacks_stop_firing() {
        let hits = Rc::new(Cell::new(0));
        let mut notifier = ChangeNotifier::new();
        let counter = Rc::clone(&hits);
        let id = notifier.subscribe(move || counter.set(counter.get() + 1));

        notifier.notify();
        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));
        notifier.notify();

        assert_eq!(hits.get(), 1);
        assert_eq!(notifier.observer_count(), 0);
    }
}
