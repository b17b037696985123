//! Error types for the RTAS engine
//!
//! This module defines the error types used throughout the engine:
//! backend failures, invalid descriptors, and illegal session transitions.

use std::fmt;

/// Result type for RTAS engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// RTAS engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (ray tracing API, lock poisoning, etc.)
    BackendError(String),

    /// Invalid resource (unknown mesh or material, empty AABB buffer, bad submesh, etc.)
    InvalidResource(String),

    /// Operation not allowed in the current session state
    InvalidState(String),

    /// Initialization failed (structure creation, activation)
    InitializationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an ERROR message and build an `Error::BackendError` with the same text
///
/// # Example
///
/// ```ignore
/// let err = engine_err!("rtas::SoftwareBackend", "Unknown structure {:?}", handle);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::rtas::Engine::log_detailed(
            $crate::rtas::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!()
        );
        $crate::rtas::Error::BackendError(message)
    }};
}

/// Log an ERROR message and return early with an `Error::BackendError`
///
/// # Example
///
/// ```ignore
/// engine_bail!("rtas::SoftwareBackend", "Structure {:?} was disposed", handle);
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
