//! Domain layer for COMPANY+.
//!
//! Plain data types shared by the router, the session backend and the UI
//! projection. Nothing here touches storage or the host.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`route`]: View identifiers and route records
//! - [`session`]: Authenticated session and user
//! - [`profile`]: Viewer profiles and their preferences
//! - [`content`]: Static dashboard catalog

pub mod content;
pub mod error;
pub mod profile;
pub mod route;
pub mod session;

pub use content::{CatalogItem, CatalogRow, CATALOG};
pub use error::{CompanyPlusError, Result};
pub use profile::{Maturity, Profile, ProfilePreferences, MAX_PROFILES};
pub use route::{Route, ViewId};
pub use session::{Session, User};
