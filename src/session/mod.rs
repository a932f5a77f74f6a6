//! Simulated account backend, session persistence and profile management.

pub mod backend;
pub mod persist;
pub mod profiles;

pub use backend::{Latency, Outcome, PendingRequest, Request, SimulatedBackend};
pub use persist::{clear_session, persist_session, restore_session};
pub use profiles::ProfileManager;
