//! Extension point for host-supplied primitives.

use crate::error::MachineResult;
use crate::node::LiveNode;
use crate::session::Session;

/// An opaque value that can stand on the left of an application.
///
/// The machine never looks inside a builtin. `apply` may force its argument
/// (see [`LiveNode::normalize`]) to layer strict primitives over the lazy
/// engine, and must hand back a live node: a literal, a partially applied
/// builtin, or whatever encoding the primitive defines.
pub trait Builtin {
    /// Display name, e.g. `+`.
    fn name(&self) -> String;

    /// Arguments captured so far, for rendering partial applications.
    fn operands(&self) -> Vec<LiveNode> {
        Vec::new()
    }

    fn apply(&self, arg: LiveNode, session: &Session) -> MachineResult<LiveNode>;
}
