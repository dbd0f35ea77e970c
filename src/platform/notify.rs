//! Notification port.

use async_trait::async_trait;

/// Host notification capability
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Transient, non-blocking message
    fn toast(&self, message: &str);

    /// Show the blocking loading overlay
    fn show_loading(&self, text: &str);

    /// Dismiss the loading overlay
    fn hide_loading(&self);

    /// Blocking modal; resolves `true` when the user confirms
    async fn modal(&self, title: &str, content: &str) -> bool;
}

/// Notifier for headless hosts. Toasts go to the log and modals are declined.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    fn toast(&self, message: &str) {
        tracing::info!(message, "toast");
    }

    fn show_loading(&self, text: &str) {
        tracing::trace!(text, "loading shown");
    }

    fn hide_loading(&self) {
        tracing::trace!("loading hidden");
    }

    async fn modal(&self, title: &str, content: &str) -> bool {
        tracing::info!(title, content, "modal declined (no interactive host)");
        false
    }
}
