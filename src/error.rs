//! Scan error type definitions

use thiserror::Error;

use crate::zbar::EngineError;

/// Errors returned by a scan session
#[derive(Error, Debug)]
pub enum ScanError {
    /// The engine failed to allocate or configure a native resource.
    /// There is no degraded mode; the session is never partially created.
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    /// Input rejected before any engine call was made
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The session was used after `close()`
    #[error("scanner is closed")]
    Closed,

    /// The engine reported a failed scan pass; it exposes no further
    /// diagnostics at this layer
    #[error("scan failed")]
    ScanFailed,
}

/// Scan result type alias
pub type ScanResult<T> = std::result::Result<T, ScanError>;
