//! Shared types for the lambda toolchain.
//!
//! This crate defines the source metadata attached to compiled templates and
//! live graph nodes, and the user-facing diagnostics reported by the parser,
//! compiler and linker stages.

mod error;
mod meta;

pub use error::{Diagnostic, ErrorCategory, ErrorCode};
pub use meta::{FileInfo, MetaInfo, PLACEHOLDER};

/// Result type used by the user-facing stages.
pub type Result<T> = std::result::Result<T, Diagnostic>;
