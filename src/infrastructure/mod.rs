//! Infrastructure layer for filesystem and environment interactions.
//!
//! Zellij mounts the host filesystem under `/host` inside the plugin sandbox;
//! everything that touches real paths goes through here.

pub mod paths;

pub use paths::{data_dir, expand_tilde, DATA_ROOT};
