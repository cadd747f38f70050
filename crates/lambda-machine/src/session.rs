//! Evaluation session: the knobs the engine reads on every application step.

use crate::node::LiveNode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Called with `(function, argument)` just before each application.
pub type TraceFn = Box<dyn Fn(&LiveNode, &LiveNode)>;

/// Serializable part of a session's configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionOptions {
    /// Yield after every head step instead of normalizing the function side
    /// of an application in one go.
    pub single_step: bool,
}

/// Settings for one evaluation.
///
/// Built before evaluation starts and passed by shared reference into
/// [`LiveNode::reduce`]; nothing can change it mid-reduction.
#[derive(Default)]
pub struct Session {
    options: SessionOptions,
    on_apply: Option<TraceFn>,
}

impl Session {
    /// Bulk mode, no tracing.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_options(options: SessionOptions) -> Self {
        Self {
            options,
            on_apply: None,
        }
    }

    pub fn single_step(mut self, enabled: bool) -> Self {
        self.options.single_step = enabled;
        self
    }

    /// Install the post-application trace callback.
    pub fn on_apply(mut self, callback: impl Fn(&LiveNode, &LiveNode) + 'static) -> Self {
        self.on_apply = Some(Box::new(callback));
        self
    }

    pub fn options(&self) -> SessionOptions {
        self.options
    }

    pub fn is_single_step(&self) -> bool {
        self.options.single_step
    }

    pub(crate) fn trace(&self, left: &LiveNode, right: &LiveNode) {
        if let Some(callback) = &self.on_apply {
            callback(left, right);
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("options", &self.options)
            .field("on_apply", &self.on_apply.is_some())
            .finish()
    }
}
