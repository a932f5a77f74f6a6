//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! host executes them in order. The library itself never talks to Zellij.
//!
//! # Example
//!
//! ```rust
//! use companyplus::Action;
//!
//! let actions = vec![
//!     Action::PushHistory { fragment: "#faq".into() },
//!     Action::SetTitle { title: "FAQ · COMPANY+".into() },
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Records a committed navigation on the host's back/forward stack.
    PushHistory {
        /// Fragment including the leading `#`, e.g. `#dashboard`.
        fragment: String,
    },

    /// Overwrites the host's current history entry.
    ///
    /// Sent when a back/forward step did not commit, so the entry the host
    /// already moved to points at the view that is still visible.
    ReplaceHistory {
        fragment: String,
    },

    /// Sets the pane title, the terminal stand-in for the document title.
    SetTitle {
        title: String,
    },

    /// Asks the host to deliver a [`Event::Tick`](crate::app::Event::Tick)
    /// after `after_ms` milliseconds.
    ///
    /// Only emitted when the new deadline is earlier than the wake already
    /// requested.
    ScheduleWake {
        after_ms: u64,
    },

    /// Hides the plugin pane.
    ///
    /// Sent when the user explicitly requests to exit the plugin (e.g., pressing 'q').
    CloseFocus,
}
