//! Input mode and overlay state types.
//!
//! The input mode decides how the host maps keys: in [`InputMode::Browse`]
//! letters are shortcuts, in the other modes they are text. Overlays sit on
//! top of the current view and are closed by every committed navigation.
//!
//! # Example
//!
//! ```rust
//! use companyplus::app::modes::{InputMode, Overlay};
//!
//! let mode = InputMode::Search;
//! assert!(mode.captures_text());
//! assert!(!Overlay::LanguageMenu.is_modal());
//! ```

use crate::forms::FormKind;

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Letters are shortcuts; `j`/`k` move the view cursor.
    #[default]
    Browse,

    /// Typing goes to the focused form field.
    Editing,

    /// Typing goes to the address bar; Enter navigates to its fragment.
    Address,

    /// Typing goes to the dashboard search query.
    Search,
}

impl InputMode {
    /// Whether printable keys are text rather than shortcuts.
    #[must_use]
    pub const fn captures_text(self) -> bool {
        !matches!(self, Self::Browse)
    }
}

/// Surface drawn over the current view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    /// Collapsed navigation for narrow panes.
    MobileMenu,
    LanguageMenu,
    /// Modal holding the add-profile form.
    AddProfile,
    /// The same modal, editing the name of an existing profile.
    RenameProfile,
}

impl Overlay {
    /// Modal overlays own the keyboard until closed.
    #[must_use]
    pub const fn is_modal(self) -> bool {
        self.form().is_some()
    }

    /// Form hosted by a modal overlay.
    #[must_use]
    pub const fn form(self) -> Option<FormKind> {
        match self {
            Self::AddProfile => Some(FormKind::AddProfile),
            Self::RenameProfile => Some(FormKind::RenameProfile),
            Self::MobileMenu | Self::LanguageMenu => None,
        }
    }
}
