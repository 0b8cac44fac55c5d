//! Core infrastructure for quacking.
//!
//! This crate provides the language-agnostic pieces of the checker:
//! - Error types and stable error codes
//! - Source positions and locations
//! - Message definitions and checker registration metadata

pub mod error;
pub mod message;
pub mod types;
