//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → OtlpFileExporter → JSON lines
//! ```
//!
//! Traces land in `~/.local/share/zellij/companyplus/companyplus-otlp.json`
//! (seen as `/host/...` from the sandbox). The file rotates at 5 MB and keeps
//! three numbered backups.
//!
//! The filter comes from the `trace_level` plugin option and defaults to
//! `"info"`. Event handling runs inside `handle_event` spans, and navigation,
//! session and storage changes are logged as span events.
//!
//! # Usage
//!
//! ```rust
//! use companyplus::observability::init_tracing;
//! use companyplus::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("plugin initialized");
//! ```

mod exporter;
mod init;
mod rotating;

pub use exporter::{file_tracer_provider, OtlpFileExporter};
pub use init::{init_tracing, TRACE_FILE};
pub use rotating::RotatingFile;
