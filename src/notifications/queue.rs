//! Bounded queue of timed notifications.
//!
//! At most `max_visible` entries are shown; showing another evicts the oldest.
//! Each entry carries its own expiry deadline, and a duration of zero makes it
//! sticky until dismissed or cleared.

use std::collections::VecDeque;

/// Unique, monotonically increasing notification handle.
pub type NotificationId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Glyph drawn before the message.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Success => "✔",
            Self::Error => "✖",
            Self::Warning => "⚠",
            Self::Info => "ℹ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    /// `None` for sticky notifications.
    pub expires_at: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct NotificationQueue {
    entries: VecDeque<Notification>,
    max_visible: usize,
    next_id: NotificationId,
}

impl NotificationQueue {
    /// Creates an empty queue. A `max_visible` of zero is treated as one.
    #[must_use]
    pub fn new(max_visible: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_visible: max_visible.max(1),
            next_id: 1,
        }
    }

    /// Shows a notification, evicting the oldest entries beyond capacity.
    ///
    /// # Example
    ///
    /// ```rust
    /// use companyplus::notifications::{NotificationQueue, Severity};
    ///
    /// let mut queue = NotificationQueue::new(3);
    /// let id = queue.show("Bienvenido", Severity::Success, 5000, 1_000);
    /// assert_eq!(queue.next_deadline(), Some(6_000));
    /// assert!(queue.dismiss(id));
    /// ```
    pub fn show(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        duration_ms: u64,
        now_ms: u64,
    ) -> NotificationId {
        let id = self.next_id;
        self.next_id += 1;

        let message = message.into();
        tracing::debug!(id, ?severity, message = %message, "showing notification");

        self.entries.push_back(Notification {
            id,
            message,
            severity,
            expires_at: (duration_ms > 0).then(|| now_ms.saturating_add(duration_ms)),
        });

        while self.entries.len() > self.max_visible {
            if let Some(evicted) = self.entries.pop_front() {
                tracing::trace!(id = evicted.id, "evicted oldest notification");
            }
        }

        id
    }

    /// Removes a notification. Returns `false` if it was already gone.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|n| n.id != id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drops every entry whose deadline has passed and returns their ids.
    pub fn expire(&mut self, now_ms: u64) -> Vec<NotificationId> {
        let mut expired = Vec::new();
        self.entries.retain(|n| match n.expires_at {
            Some(deadline) if deadline <= now_ms => {
                expired.push(n.id);
                false
            }
            _ => true,
        });
        expired
    }

    /// Earliest expiry among visible entries.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.iter().filter_map(|n| n.expires_at).min()
    }

    /// Most recently shown notification.
    #[must_use]
    pub fn latest(&self) -> Option<&Notification> {
        self.entries.back()
    }

    /// Visible entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oldest_is_evicted_beyond_capacity() {
        let mut queue = NotificationQueue::new(3);
        let first = queue.show("a", Severity::Info, 5000, 0);
        for msg in ["b", "c", "d"] {
            queue.show(msg, Severity::Info, 5000, 0);
        }

        assert_eq!(queue.len(), 3);
        assert!(queue.iter().all(|n| n.id != first));
        assert_eq!(queue.latest().map(|n| n.message.as_str()), Some("d"));
    }

    #[test]
    fn expiry_respects_individual_deadlines() {
        let mut queue = NotificationQueue::new(3);
        let short = queue.show("short", Severity::Success, 1000, 0);
        let long = queue.show("long", Severity::Error, 5000, 0);

        assert_eq!(queue.expire(999), Vec::<NotificationId>::new());
        assert_eq!(queue.expire(1000), vec![short]);
        assert_eq!(queue.next_deadline(), Some(5000));
        assert_eq!(queue.expire(5000), vec![long]);
        assert!(queue.is_empty());
    }

    #[test]
    fn zero_duration_is_sticky() {
        let mut queue = NotificationQueue::new(3);
        queue.show("sticky", Severity::Warning, 0, 0);

        assert_eq!(queue.next_deadline(), None);
        assert!(queue.expire(u64::MAX).is_empty());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn dismiss_twice_is_harmless() {
        let mut queue = NotificationQueue::new(3);
        let id = queue.show("x", Severity::Info, 5000, 0);
        assert!(queue.dismiss(id));
        assert!(!queue.dismiss(id));
    }

    #[test]
    fn ids_are_unique_across_clears() {
        let mut queue = NotificationQueue::new(1);
        let a = queue.show("a", Severity::Info, 0, 0);
        queue.clear();
        let b = queue.show("b", Severity::Info, 0, 0);
        assert!(b > a);
    }
}
