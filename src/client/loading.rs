//! Loading Indicator
//!
//! Reference-counted scoped guard over the host's single loading overlay.
//! The first concurrent holder shows it and the last one to drop hides it,
//! so overlapping requests never dismiss each other's overlay.
//!
//! The count lock is never held while the notifier runs, so a notifier may
//! read [`LoadingIndicator::active`] or take guards of its own.

use crate::platform::Notifier;
use parking_lot::{Mutex, ReentrantMutex};
use std::sync::Arc;

/// Shared handle to the loading overlay
#[derive(Clone)]
pub struct LoadingIndicator {
    notifier: Arc<dyn Notifier>,

    /// Number of live guards
    active: Arc<Mutex<usize>>,

    /// Orders show/hide calls with the count changes that caused them
    transitions: Arc<ReentrantMutex<()>>,
}

impl LoadingIndicator {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            notifier,
            active: Arc::new(Mutex::new(0)),
            transitions: Arc::new(ReentrantMutex::new(())),
        }
    }

    /// Take a hold on the overlay, showing it with `text` if nobody else holds it
    pub fn acquire(&self, text: &str) -> LoadingGuard {
        let _transition = self.transitions.lock();
        let first = {
            let mut active = self.active.lock();
            *active += 1;
            *active == 1
        };
        if first {
            self.notifier.show_loading(text);
        }

        LoadingGuard {
            notifier: Arc::clone(&self.notifier),
            active: Arc::clone(&self.active),
            transitions: Arc::clone(&self.transitions),
        }
    }

    /// Number of guards currently alive
    pub fn active(&self) -> usize {
        *self.active.lock()
    }
}

impl std::fmt::Debug for LoadingIndicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadingIndicator")
            .field("active", &self.active())
            .finish()
    }
}

/// Releases its hold on the overlay when dropped
#[must_use = "the loading overlay is released as soon as the guard is dropped"]
pub struct LoadingGuard {
    notifier: Arc<dyn Notifier>,
    active: Arc<Mutex<usize>>,
    transitions: Arc<ReentrantMutex<()>>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        let _transition = self.transitions.lock();
        let last = {
            let mut active = self.active.lock();
            *active = active.saturating_sub(1);
            *active == 0
        };
        if last {
            self.notifier.hide_loading();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Default)]
    struct CountingNotifier {
        events: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Notifier for CountingNotifier {
        fn toast(&self, _message: &str) {}

        fn show_loading(&self, text: &str) {
            self.events.lock().push(format!("show:{}", text));
        }

        fn hide_loading(&self) {
            self.events.lock().push("hide".to_string());
        }

        async fn modal(&self, _title: &str, _content: &str) -> bool {
            false
        }
    }

    #[test]
    fn test_single_guard() {
        let notifier = Arc::new(CountingNotifier::default());
        let indicator = LoadingIndicator::new(notifier.clone());

        {
            let _guard = indicator.acquire("loading...");
            assert_eq!(indicator.active(), 1);
        }

        assert_eq!(indicator.active(), 0);
        assert_eq!(*notifier.events.lock(), vec!["show:loading...", "hide"]);
    }

    #[test]
    fn test_nested_guards_share_one_overlay() {
        let notifier = Arc::new(CountingNotifier::default());
        let indicator = LoadingIndicator::new(notifier.clone());

        let outer = indicator.acquire("first");
        let inner = indicator.acquire("second");
        drop(outer);
        assert_eq!(*notifier.events.lock(), vec!["show:first"]);

        drop(inner);
        assert_eq!(*notifier.events.lock(), vec!["show:first", "hide"]);

        let _again = indicator.acquire("third");
        assert_eq!(notifier.events.lock().len(), 3);
    }

    /// Notifier that looks back at the indicator it belongs to
    #[derive(Default)]
    struct ObservingNotifier {
        indicator: Mutex<Option<LoadingIndicator>>,
        seen: Mutex<Vec<String>>,
    }

    impl ObservingNotifier {
        fn record(&self, event: &str) {
            let active = self.indicator.lock().as_ref().map(LoadingIndicator::active);
            self.seen.lock().push(format!("{}:{:?}", event, active));
        }
    }

    #[async_trait]
    impl Notifier for ObservingNotifier {
        fn toast(&self, _message: &str) {}

        fn show_loading(&self, _text: &str) {
            self.record("show");
        }

        fn hide_loading(&self) {
            self.record("hide");
            // Re-entrant hold from inside the callback
            let indicator = self.indicator.lock().clone();
            if let Some(indicator) = indicator {
                if self.seen.lock().len() == 2 {
                    drop(indicator.acquire("again"));
                }
            }
        }

        async fn modal(&self, _title: &str, _content: &str) -> bool {
            false
        }
    }

    #[test]
    fn test_notifier_may_call_back_into_indicator() {
        let notifier = Arc::new(ObservingNotifier::default());
        let indicator = LoadingIndicator::new(notifier.clone());
        *notifier.indicator.lock() = Some(indicator.clone());

        let guard = indicator.acquire("loading...");
        drop(guard);

        assert_eq!(indicator.active(), 0);
        assert_eq!(
            *notifier.seen.lock(),
            vec!["show:Some(1)", "hide:Some(0)", "show:Some(1)", "hide:Some(0)"]
        );

        // Break the notifier -> indicator -> notifier cycle
        notifier.indicator.lock().take();
    }
}
