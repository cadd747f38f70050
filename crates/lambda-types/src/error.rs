use crate::FileInfo;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error category, determined by error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Syntax,
    Definition,
    Scope,
}

/// Numeric error code (E100–E299).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Syntax errors (E100–E199) ──
    pub const SYNTAX: Self = Self(100);

    // ── Definition errors (E200) ──
    pub const DUPLICATE_DEFINITION: Self = Self(200);

    // ── Scope errors (E201–E299) ──
    pub const UNDEFINED_GLOBAL: Self = Self(201);
    pub const UNRESOLVED_NAME: Self = Self(202);

    /// Get the category for this error code.
    pub fn category(self) -> ErrorCategory {
        match self.0 {
            100..=199 => ErrorCategory::Syntax,
            200 => ErrorCategory::Definition,
            201..=299 => ErrorCategory::Scope,
            _ => ErrorCategory::Syntax, // fallback
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax => write!(f, "syntax"),
            Self::Definition => write!(f, "definition"),
            Self::Scope => write!(f, "scope"),
        }
    }
}

/// A user-facing error: something wrong with the program, not with the
/// machine.
///
/// Drivers print these as `file:line:column: message` and exit with a
/// non-zero status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<FileInfo>,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(code: ErrorCode, message: impl Into<String>, location: Option<FileInfo>) -> Self {
        Self {
            code,
            category: code.category(),
            message: message.into(),
            location,
        }
    }

    /// `'name' already defined`
    pub fn duplicate_definition(name: &str, location: Option<FileInfo>) -> Self {
        Self::new(
            ErrorCode::DUPLICATE_DEFINITION,
            format!("'{name}' already defined"),
            location,
        )
    }

    /// `'name' not defined`
    pub fn undefined_global(name: &str, location: Option<FileInfo>) -> Self {
        Self::new(
            ErrorCode::UNDEFINED_GLOBAL,
            format!("'{name}' not defined"),
            location,
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(fi) => write!(f, "{fi}: {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for Diagnostic {}
