//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the plugin runtime (main.rs) and the domain,
//! navigation, session and UI layers. It implements the event-driven
//! architecture that powers the interactive shell.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Keys / Timers → Events → Event Handler → State Mutations → Actions → Host
//!                               ↑                                  │
//!                               └────────── Tick { now_ms } ───────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Input mode and overlay types
//! - [`state`]: Central application state container
//! - `projection`: View model computation
//!
//! # Example
//!
//! ```rust
//! use companyplus::app::{handle_event, AppState, Event};
//! use companyplus::storage::Stores;
//! use companyplus::Config;
//!
//! let mut state = AppState::new(Config::default(), Stores::in_memory());
//! let (render, _actions) = handle_event(&mut state, &Event::ToggleMobileMenu)?;
//! assert!(render);
//! # Ok::<(), companyplus::CompanyPlusError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
mod projection;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{InputMode, Overlay};
pub use state::{AppState, NavSource};
