//! Common types and utilities for the suspect analyzer.
//!
//! This crate provides foundational types used across all suspect crates:
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`, message templates)
//! - Source spans (`ByteSpan`)
//! - Analysis limits and thresholds

// Diagnostic types, codes and message templates
pub mod diagnostics;
pub use diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticMessage, diagnostic_codes, diagnostic_messages,
    format_message,
};

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::ByteSpan;

// Centralized limits and thresholds
pub mod limits;
