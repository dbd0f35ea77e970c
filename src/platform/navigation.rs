//! Navigation port.

/// Host navigation capability
pub trait Navigator: Send + Sync {
    /// Replace the whole navigation stack with `route`
    fn relaunch(&self, route: &str);
}

/// Navigator for headless hosts; records the request in the log only
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn relaunch(&self, route: &str) {
        tracing::info!(route, "relaunch requested");
    }
}
