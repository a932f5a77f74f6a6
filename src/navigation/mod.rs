//! Hash-style navigation: route lookup, access guards, the transition-aware
//! router and the back/forward history stack.

pub mod guard;
pub mod history;
pub mod router;
pub mod table;

pub use guard::{evaluate, GuardPolicy, Redirect};
pub use history::History;
pub use router::{NavOutcome, NavigationState, Router};
pub use table::RouteTable;
