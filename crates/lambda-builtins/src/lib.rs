//! Strict integer primitives for the lambda machine.
//!
//! Each operator is a curried [`lambda_machine::Builtin`]: the first
//! application captures its operand lazily, the second forces both operands
//! to normal form and computes. Comparisons answer with Church booleans.

mod boolean;
mod int;
pub mod prelude;

pub use boolean::{church_bool, church_false, church_true};
pub use int::{IntBinOp, IntCmpOp};
