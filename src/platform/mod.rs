//! Platform Module
//!
//! Capability ports the host environment supplies: storage, navigation and
//! notification.

pub mod navigation;
pub mod notify;
pub mod storage;

pub use navigation::{Navigator, TracingNavigator};
pub use notify::{Notifier, TracingNotifier};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
