//! Core types and utilities for BER to DER canonicalization
//!
//! This crate provides the error types and decode hardening limits
//! used throughout the dernorm workspace.

pub mod error;
pub mod limits;

pub use error::{DerNormError, DerNormResult};
pub use limits::{DecodeLimits, DEFAULT_MAX_DEPTH};
