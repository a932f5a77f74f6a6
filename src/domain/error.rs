//! Error types for the COMPANY+ shell.
//!
//! This module defines the centralized error type [`CompanyPlusError`] and a type
//! alias [`Result`] used throughout the crate. Nothing here is fatal to the
//! application: the event handler downgrades every error to a log line or a
//! notification and falls back to defaults.

use thiserror::Error;

/// The main error type for COMPANY+ operations.
///
/// Most variants carry a description string. I/O failures convert
/// automatically through `#[from]`.
///
/// # Examples
///
/// ```
/// use companyplus::CompanyPlusError;
///
/// let err = CompanyPlusError::Profile("profile limit reached".to_string());
/// assert_eq!(err.to_string(), "Profile error: profile limit reached");
/// ```
#[derive(Debug, Error)]
pub enum CompanyPlusError {
    /// Reading or writing a preference store failed.
    ///
    /// Covers malformed JSON in the backing file as well as serialization
    /// failures when persisting a value.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A colour palette could not be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// A translation catalog could not be parsed.
    #[error("Locale error: {0}")]
    Locale(String),

    /// A profile operation was rejected (unknown id, limit reached, last
    /// remaining profile).
    #[error("Profile error: {0}")]
    Profile(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for COMPANY+ operations.
pub type Result<T> = std::result::Result<T, CompanyPlusError>;
