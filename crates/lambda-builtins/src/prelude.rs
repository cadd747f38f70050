//! Registers the integer operators as globals.

use crate::int::{IntBinOp, IntCmpOp};
use lambda_machine::{GlobalTable, LiveNode};
use lambda_types::Diagnostic;
use std::rc::Rc;
use tracing::debug;

/// Define every operator under its symbol (`+`, `==`, ...).
///
/// Fails if a symbol is already taken in `table`.
pub fn install(table: &Rc<GlobalTable>) -> Result<(), Diagnostic> {
    for op in IntBinOp::ALL {
        table.define_value(op.symbol(), LiveNode::builtin(op))?;
    }
    for op in IntCmpOp::ALL {
        table.define_value(op.symbol(), LiveNode::builtin(op))?;
    }
    debug!(count = IntBinOp::ALL.len() + IntCmpOp::ALL.len(), "installed prelude");
    Ok(())
}
