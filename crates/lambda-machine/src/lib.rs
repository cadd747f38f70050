//! Lambda graph reduction machine.
//!
//! Compiled templates (closed terms whose variables are already resolved to
//! positional coordinates) are materialized into a live, sharing-aware graph
//! and driven to normal form one application at a time. Applications collapse
//! in place once resolved, so every holder of the same node observes the
//! memoized result.
//!
//! Strict primitives plug in through the [`Builtin`] trait; everything else
//! about the calculus is fixed here.

mod builtin;
mod env;
mod error;
mod globals;
mod node;
mod reduce;
mod render;
mod session;
mod template;

pub use builtin::Builtin;
pub use env::Env;
pub use error::{MachineError, MachineResult};
pub use globals::{GlobalTable, Slot, SlotId};
pub use node::{ApplicationCell, Closure, LiveNode, Meta, NodeKind};
pub use render::render;
pub use session::{Session, SessionOptions, TraceFn};
pub use template::{Template, TemplateKind};
