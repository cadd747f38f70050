//! Live graph nodes.

use crate::builtin::Builtin;
use crate::env::Env;
use crate::error::MachineResult;
use crate::globals::Slot;
use crate::template::Template;
use lambda_types::MetaInfo;
use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Opaque source metadata carried from templates onto live nodes.
pub type Meta = Option<Rc<dyn Any>>;

/// Shared handle to a node of the live graph.
///
/// Cloning the handle shares the node: when an application collapses, every
/// clone sees the result.
#[derive(Clone)]
pub struct LiveNode(Rc<Node>);

struct Node {
    kind: NodeKind,
    meta: Meta,
}

/// The fixed set of live node kinds, plus the [`Builtin`] extension point.
pub enum NodeKind {
    /// One dereference away from a global's current value.
    Indirection(Slot),
    /// A lambda paired with its captured environment.
    Closure(Closure),
    /// An application, pending or collapsed.
    Application(ApplicationCell),
    /// Integer literal.
    Int(i64),
    /// Host-supplied applicable value.
    Builtin(Rc<dyn Builtin>),
}

impl LiveNode {
    fn new(kind: NodeKind, meta: Meta) -> Self {
        Self(Rc::new(Node { kind, meta }))
    }

    pub fn int(value: i64) -> Self {
        Self::new(NodeKind::Int(value), None)
    }

    pub fn builtin(builtin: impl Builtin + 'static) -> Self {
        Self::new(NodeKind::Builtin(Rc::new(builtin)), None)
    }

    pub fn indirection(slot: Slot, meta: Meta) -> Self {
        Self::new(NodeKind::Indirection(slot), meta)
    }

    pub fn closure(env: Env, param_used: bool, body: Rc<Template>, meta: Meta) -> Self {
        Self::new(
            NodeKind::Closure(Closure {
                env,
                param_used,
                body,
            }),
            meta,
        )
    }

    pub fn application(left: LiveNode, right: LiveNode, meta: Meta) -> Self {
        Self::new(
            NodeKind::Application(ApplicationCell(RefCell::new(ApplicationState::Pending {
                left,
                right,
            }))),
            meta,
        )
    }

    pub fn kind(&self) -> &NodeKind {
        &self.0.kind
    }

    pub fn meta(&self) -> Option<&dyn Any> {
        self.0.meta.as_deref()
    }

    /// Short name of the node kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self.kind() {
            NodeKind::Indirection(_) => "indirection",
            NodeKind::Closure(_) => "closure",
            NodeKind::Application(_) => "application",
            NodeKind::Int(_) => "integer",
            NodeKind::Builtin(_) => "builtin",
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self.kind() {
            NodeKind::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_closure(&self) -> Option<&Closure> {
        match self.kind() {
            NodeKind::Closure(closure) => Some(closure),
            _ => None,
        }
    }

    pub fn as_application(&self) -> Option<&ApplicationCell> {
        match self.kind() {
            NodeKind::Application(app) => Some(app),
            _ => None,
        }
    }

    /// Closures and builtins can stand on the left of an application.
    pub fn is_applicable(&self) -> bool {
        matches!(self.kind(), NodeKind::Closure(_) | NodeKind::Builtin(_))
    }

    /// Identity comparison: both handles share one node.
    pub fn ptr_eq(&self, other: &LiveNode) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for LiveNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LiveNode")
            .field(&self.kind_name())
            .field(&crate::render(self, MetaInfo::name_of))
            .finish()
    }
}

/// A lambda in normal form: its captured environment and the template of its
/// body, materialized only when the closure is applied.
pub struct Closure {
    env: Env,
    param_used: bool,
    body: Rc<Template>,
}

impl Closure {
    pub fn env(&self) -> &Env {
        &self.env
    }

    pub fn param_used(&self) -> bool {
        self.param_used
    }

    pub fn body(&self) -> &Template {
        &self.body
    }

    /// Substitute `arg` for the parameter by extending the captured
    /// environment, then materialize the body against it.
    ///
    /// An unused parameter never reaches the environment.
    pub fn apply(&self, arg: LiveNode) -> MachineResult<LiveNode> {
        if self.param_used {
            self.body.materialize(&self.env.push(arg))
        } else {
            self.body.materialize(&self.env)
        }
    }
}

enum ApplicationState {
    Pending { left: LiveNode, right: LiveNode },
    Collapsed { value: LiveNode },
}

/// Interior of an application node.
///
/// Moves from pending to collapsed exactly once; only the reduction engine
/// can drive either transition.
pub struct ApplicationCell(RefCell<ApplicationState>);

impl ApplicationCell {
    /// The function side while pending, the collapsed value afterwards.
    pub fn left(&self) -> LiveNode {
        match &*self.0.borrow() {
            ApplicationState::Pending { left, .. } => left.clone(),
            ApplicationState::Collapsed { value } => value.clone(),
        }
    }

    /// The argument side; `None` once collapsed.
    pub fn right(&self) -> Option<LiveNode> {
        match &*self.0.borrow() {
            ApplicationState::Pending { right, .. } => Some(right.clone()),
            ApplicationState::Collapsed { .. } => None,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        matches!(&*self.0.borrow(), ApplicationState::Collapsed { .. })
    }

    /// Replace the left side (or the collapsed value) with its next state.
    pub(crate) fn set_left(&self, next: LiveNode) {
        match &mut *self.0.borrow_mut() {
            ApplicationState::Pending { left, .. } => *left = next,
            ApplicationState::Collapsed { value } => *value = next,
        }
    }

    pub(crate) fn collapse(&self, value: LiveNode) {
        let mut state = self.0.borrow_mut();
        debug_assert!(
            matches!(&*state, ApplicationState::Pending { .. }),
            "application collapsed twice"
        );
        *state = ApplicationState::Collapsed { value };
    }
}
