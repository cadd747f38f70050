//! Compiled templates and their materialization into live nodes.

use crate::env::Env;
use crate::error::{MachineError, MachineResult};
use crate::globals::Slot;
use crate::node::{LiveNode, Meta};
use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// An environment-agnostic compiled term.
///
/// Built once by the compiler and immutable afterwards. Variables have
/// already been resolved to positions: an occurrence always reads the top
/// frame, and applications say how many frames each side discards first.
pub struct Template {
    kind: TemplateKind,
    meta: Meta,
}

pub enum TemplateKind {
    /// Reads the innermost environment frame.
    Var,
    /// Reads a global through its shared slot. Captures nothing.
    Global(Slot),
    /// Body of a lambda, materialized only when the closure is applied.
    Abstraction { param_used: bool, body: Rc<Template> },
    /// Both sides are materialized eagerly, each after dropping its own
    /// number of frames.
    Application {
        left_drop: usize,
        right_drop: usize,
        left: Rc<Template>,
        right: Rc<Template>,
    },
    /// A literal or host value, independent of the environment.
    Constant(LiveNode),
}

impl Template {
    fn new(kind: TemplateKind) -> Self {
        Self { kind, meta: None }
    }

    pub fn var() -> Self {
        Self::new(TemplateKind::Var)
    }

    pub fn global(slot: Slot) -> Self {
        Self::new(TemplateKind::Global(slot))
    }

    pub fn abstraction(param_used: bool, body: Template) -> Self {
        Self::new(TemplateKind::Abstraction {
            param_used,
            body: Rc::new(body),
        })
    }

    pub fn application(
        left_drop: usize,
        right_drop: usize,
        left: Template,
        right: Template,
    ) -> Self {
        Self::new(TemplateKind::Application {
            left_drop,
            right_drop,
            left: Rc::new(left),
            right: Rc::new(right),
        })
    }

    pub fn constant(node: LiveNode) -> Self {
        Self::new(TemplateKind::Constant(node))
    }

    /// Attach source metadata; it is copied onto every node materialized
    /// from this template.
    pub fn with_meta(mut self, meta: impl Any) -> Self {
        self.meta = Some(Rc::new(meta));
        self
    }

    pub fn kind(&self) -> &TemplateKind {
        &self.kind
    }

    pub fn meta(&self) -> Option<&dyn Any> {
        self.meta.as_deref()
    }

    /// Build the live node this template denotes under `env`.
    pub fn materialize(&self, env: &Env) -> MachineResult<LiveNode> {
        match &self.kind {
            TemplateKind::Var => env.top().cloned().ok_or(MachineError::EmptyContext),
            TemplateKind::Global(slot) => {
                if !env.is_empty() {
                    return Err(MachineError::CapturedGlobal { depth: env.len() });
                }
                Ok(LiveNode::indirection(slot.clone(), self.meta.clone()))
            }
            TemplateKind::Abstraction { param_used, body } => Ok(LiveNode::closure(
                env.clone(),
                *param_used,
                Rc::clone(body),
                self.meta.clone(),
            )),
            TemplateKind::Application {
                left_drop,
                right_drop,
                left,
                right,
            } => {
                let lenv = env.drop_frames(*left_drop)?;
                let renv = env.drop_frames(*right_drop)?;
                let left = left.materialize(&lenv)?;
                let right = right.materialize(&renv)?;
                Ok(LiveNode::application(left, right, self.meta.clone()))
            }
            TemplateKind::Constant(node) => Ok(node.clone()),
        }
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TemplateKind::Var => write!(f, "Var"),
            TemplateKind::Global(slot) => write!(f, "Global({slot:?})"),
            TemplateKind::Abstraction { param_used, body } => f
                .debug_struct("Abstraction")
                .field("param_used", param_used)
                .field("body", body)
                .finish(),
            TemplateKind::Application {
                left_drop,
                right_drop,
                left,
                right,
            } => f
                .debug_struct("Application")
                .field("left_drop", left_drop)
                .field("right_drop", right_drop)
                .field("left", left)
                .field("right", right)
                .finish(),
            TemplateKind::Constant(node) => write!(f, "Constant({node:?})"),
        }
    }
}
