//! Error types and error code constants for quacking.
//!
//! The inspection routines themselves cannot fail: once a typed node exists
//! its shape is already correct. Errors only arise at the host boundary,
//! where nodes and configuration arrive in an untyped form.
//!
//! ## Error Code Mapping
//!
//! - `2`: Invalid configuration (bad input from the host)
//! - `10`: Contract violation (host/checker version mismatch)

use std::fmt;

use thiserror::Error;

// ============================================================================
// Error Codes
// ============================================================================

/// Stable numeric codes for [`QuackingError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorCode {
    /// Malformed configuration value.
    InvalidConfig = 2,
    /// A node did not have the shape the checker requires.
    ContractViolation = 10,
}

impl ErrorCode {
    /// Get the numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// Unified error type for the checker and its host boundary.
#[derive(Debug, Error)]
pub enum QuackingError {
    /// A node handed over by the host is missing a field its kind requires.
    ///
    /// An absent slot field is a violation; a slot that is present but null
    /// is simply empty.
    #[error("contract violation in {node_kind} node: {detail}")]
    ContractViolation { node_kind: String, detail: String },

    /// The host handed over a node kind the dispatcher does not know.
    #[error("unknown node kind '{kind}'")]
    UnknownNodeKind { kind: String },

    /// A configuration value is malformed.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// JSON decoding failed outside of node decoding.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl QuackingError {
    /// Build a contract violation for the given node kind.
    pub fn contract_violation(node_kind: impl Into<String>, detail: impl Into<String>) -> Self {
        QuackingError::ContractViolation {
            node_kind: node_kind.into(),
            detail: detail.into(),
        }
    }

    /// Build an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        QuackingError::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Result type for quacking operations.
pub type QuackingResult<T> = Result<T, QuackingError>;

// ============================================================================
// Error Code Mapping
// ============================================================================

impl From<&QuackingError> for ErrorCode {
    fn from(err: &QuackingError) -> Self {
        match err {
            QuackingError::ContractViolation { .. } => ErrorCode::ContractViolation,
            QuackingError::UnknownNodeKind { .. } => ErrorCode::ContractViolation,
            QuackingError::InvalidConfig { .. } => ErrorCode::InvalidConfig,
            QuackingError::Json(_) => ErrorCode::InvalidConfig,
        }
    }
}

impl From<QuackingError> for ErrorCode {
    fn from(err: QuackingError) -> Self {
        ErrorCode::from(&err)
    }
}
