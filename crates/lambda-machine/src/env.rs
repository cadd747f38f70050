//! Persistent environment of captured values.

use crate::error::{MachineError, MachineResult};
use crate::node::LiveNode;
use std::rc::Rc;

struct Frame {
    value: LiveNode,
    rest: Env,
}

/// Immutable cons-stack of live nodes.
///
/// `push` is O(1) and never disturbs the original, so any number of closures
/// and applications share suffixes of the same chain.
#[derive(Clone, Default)]
pub struct Env(Option<Rc<Frame>>);

impl Env {
    /// The empty environment, as seen by globals.
    pub fn empty() -> Self {
        Self(None)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Number of frames. Walks the chain.
    pub fn len(&self) -> usize {
        let mut len = 0;
        let mut env = self;
        while let Some(frame) = &env.0 {
            len += 1;
            env = &frame.rest;
        }
        len
    }

    /// Prepend a value, returning the new head.
    pub fn push(&self, value: LiveNode) -> Env {
        Env(Some(Rc::new(Frame {
            value,
            rest: self.clone(),
        })))
    }

    /// The innermost captured value.
    pub fn top(&self) -> Option<&LiveNode> {
        self.0.as_ref().map(|frame| &frame.value)
    }

    /// The chain reached after skipping `n` links.
    pub fn drop_frames(&self, n: usize) -> MachineResult<Env> {
        let mut env = self;
        for dropped in 0..n {
            match &env.0 {
                Some(frame) => env = &frame.rest,
                None => {
                    return Err(MachineError::ContextTooShort {
                        needed: n,
                        available: dropped,
                    })
                }
            }
        }
        Ok(env.clone())
    }

    /// Whether both handles point at the same chain.
    pub fn ptr_eq(&self, other: &Env) -> bool {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl std::fmt::Debug for Env {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Env(len={})", self.len())
    }
}
