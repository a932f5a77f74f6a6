//! Transient toast notifications.

pub mod queue;

pub use queue::{Notification, NotificationId, NotificationQueue, Severity};
