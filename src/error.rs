//! Error types for dockhand
//!
//! Library errors use `thiserror`; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for dockhand operations
pub type DockhandResult<T> = Result<T, DockhandError>;

/// Main error type for dockhand operations
#[derive(Error, Debug)]
pub enum DockhandError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file could not be parsed
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Service name not present in the configuration
    #[error("unknown service '{name}' (configured services: {available})")]
    UnknownService { name: String, available: String },

    /// External tool could not be spawned
    #[error("could not run '{tool}': {message} - is it installed and on PATH?")]
    ToolNotFound { tool: String, message: String },

    /// External tool ran but exited non-zero
    #[error("{tool} exited with code {}", .code.map(|c| c.to_string()).unwrap_or_else(|| "signal".to_string()))]
    CommandFailed { tool: String, code: Option<i32> },

    /// Staged archive missing before transfer
    #[error("staged archive not found: {path} (run 'dockhand build' first?)")]
    ArchiveMissing { path: PathBuf },
}
