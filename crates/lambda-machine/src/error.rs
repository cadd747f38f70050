//! Error types for the reduction machine.

use thiserror::Error;

/// Errors raised while materializing or reducing the live graph.
///
/// Most variants are faults: the upstream compiler or linker handed the
/// machine an inconsistent template, and the driver should report the
/// diagnostic and exit. The remaining variants are traps raised by strict
/// primitives on bad operands. Neither group is a user-facing program error;
/// those are [`lambda_types::Diagnostic`]s.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError {
    /// `drop` walked off the end of the environment chain.
    #[error("context drop: context too short (dropping {needed}, only {available} frames)")]
    ContextTooShort { needed: usize, available: usize },

    /// A variable occurrence was materialized against the empty environment.
    #[error("free var: no context values")]
    EmptyContext,

    /// A global reference was materialized against a non-empty environment.
    #[error("free ref: context not empty ({depth} frames)")]
    CapturedGlobal { depth: usize },

    /// The normal form in function position cannot be applied.
    #[error("reduce appl: attempt to apply a non-function ({found})")]
    NotApplicable { found: &'static str },

    /// A global was dereferenced before its definition was filled in.
    #[error("global '{name}' used before its definition was filled")]
    UnfilledSlot { name: String },

    /// A global slot was filled a second time.
    #[error("global '{name}' filled twice")]
    SlotRefilled { name: String },

    /// A slot was handed to a table that does not own it.
    #[error("global slot {id} does not belong to this table")]
    ForeignSlot { id: usize },

    /// A slot outlived the table that owns its cell.
    #[error("global slot dereferenced after its table was dropped")]
    DanglingSlot,

    /// Division by zero, overflow.
    #[error("arithmetic trap: {0}")]
    Arithmetic(String),

    /// A primitive received an operand of the wrong kind.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl MachineError {
    /// `true` for internal faults, `false` for primitive traps.
    pub fn is_fault(&self) -> bool {
        !matches!(self, Self::Arithmetic(_) | Self::TypeMismatch { .. })
    }
}

/// Result alias for machine operations.
pub type MachineResult<T> = Result<T, MachineError>;
