//! Normal-order reduction of the live graph.
//!
//! Callers drive a node with `while !node.is_normal() { node = node.reduce(s)? }`.
//! Each `reduce` returns the node to treat as the next state. Applications
//! collapse in place when they fire, so a shared application is computed at
//! most once.

use crate::error::{MachineError, MachineResult};
use crate::node::{ApplicationCell, LiveNode, NodeKind};
use crate::session::Session;
use tracing::trace;

impl LiveNode {
    /// Closures, literals and builtins are normal; indirections and
    /// applications (collapsed or not) are not.
    pub fn is_normal(&self) -> bool {
        match self.kind() {
            NodeKind::Indirection(_) | NodeKind::Application(_) => false,
            NodeKind::Closure(_) | NodeKind::Int(_) | NodeKind::Builtin(_) => true,
        }
    }

    /// One reduction step.
    pub fn reduce(&self, session: &Session) -> MachineResult<LiveNode> {
        match self.kind() {
            NodeKind::Indirection(slot) => slot.get(),
            NodeKind::Application(app) => self.reduce_application(app, session),
            NodeKind::Closure(_) | NodeKind::Int(_) | NodeKind::Builtin(_) => Ok(self.clone()),
        }
    }

    /// Reduce until normal.
    pub fn normalize(&self, session: &Session) -> MachineResult<LiveNode> {
        let mut node = self.clone();
        while !node.is_normal() {
            node = node.reduce(session)?;
        }
        Ok(node)
    }

    /// Apply a normal form to an argument.
    pub fn apply(&self, arg: LiveNode, session: &Session) -> MachineResult<LiveNode> {
        match self.kind() {
            NodeKind::Closure(closure) => closure.apply(arg),
            NodeKind::Builtin(builtin) => builtin.apply(arg, session),
            _ => Err(MachineError::NotApplicable {
                found: self.kind_name(),
            }),
        }
    }

    fn reduce_application(
        &self,
        app: &ApplicationCell,
        session: &Session,
    ) -> MachineResult<LiveNode> {
        let mut left = app.left();
        let Some(right) = app.right() else {
            // Already collapsed: keep flattening the cached value.
            let next = left.reduce(session)?;
            app.set_left(next.clone());
            return Ok(next);
        };

        if !left.is_normal() {
            if session.is_single_step() {
                app.set_left(left.reduce(session)?);
                return Ok(self.clone());
            }
            while !left.is_normal() {
                left = left.reduce(session)?;
            }
            app.set_left(left.clone());
        }

        if !left.is_applicable() {
            return Err(MachineError::NotApplicable {
                found: left.kind_name(),
            });
        }
        session.trace(&left, &right);
        trace!(function = left.kind_name(), argument = right.kind_name(), "apply");
        let result = left.apply(right, session)?;
        app.collapse(result.clone());
        trace!(result = result.kind_name(), "collapsed");
        Ok(result)
    }
}
