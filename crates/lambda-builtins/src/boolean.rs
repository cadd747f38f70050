//! Church encoding of booleans: a boolean selects one of two arguments.

use lambda_machine::{Env, LiveNode, MachineResult, Template};

/// `\t -> \f -> t`
pub fn church_true() -> Template {
    Template::abstraction(true, Template::abstraction(false, Template::var()))
}

/// `\t -> \f -> f`
pub fn church_false() -> Template {
    Template::abstraction(false, Template::abstraction(true, Template::var()))
}

/// The closure for `value`, ready to be applied to the two branches.
pub fn church_bool(value: bool) -> MachineResult<LiveNode> {
    let template = if value { church_true() } else { church_false() };
    template.materialize(&Env::empty())
}
