//! Integer arithmetic and comparison operators.

use crate::boolean::church_bool;
use lambda_machine::{Builtin, LiveNode, MachineError, MachineResult, Session};
use tracing::trace;

/// `+ - * / %` over `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntBinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

/// `== != < > <= >=` over `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntCmpOp {
    Eq,
    Neq,
    Less,
    More,
    LessEq,
    MoreEq,
}

impl IntBinOp {
    pub const ALL: [IntBinOp; 5] = [Self::Add, Self::Sub, Self::Mul, Self::Div, Self::Mod];

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
        }
    }

    /// Checked arithmetic; overflow and division by zero trap.
    pub fn eval(self, a: i64, b: i64) -> MachineResult<i64> {
        let result = match self {
            Self::Add => a.checked_add(b),
            Self::Sub => a.checked_sub(b),
            Self::Mul => a.checked_mul(b),
            Self::Div | Self::Mod if b == 0 => {
                return Err(MachineError::Arithmetic("division by zero".to_string()))
            }
            Self::Div => a.checked_div(b),
            Self::Mod => a.checked_rem(b),
        };
        result.ok_or_else(|| {
            MachineError::Arithmetic(format!("overflow in {a} {} {b}", self.symbol()))
        })
    }
}

impl IntCmpOp {
    pub const ALL: [IntCmpOp; 6] = [
        Self::Eq,
        Self::Neq,
        Self::Less,
        Self::More,
        Self::LessEq,
        Self::MoreEq,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Neq => "!=",
            Self::Less => "<",
            Self::More => ">",
            Self::LessEq => "<=",
            Self::MoreEq => ">=",
        }
    }

    pub fn test(self, a: i64, b: i64) -> bool {
        match self {
            Self::Eq => a == b,
            Self::Neq => a != b,
            Self::Less => a < b,
            Self::More => a > b,
            Self::LessEq => a <= b,
            Self::MoreEq => a >= b,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Operator {
    Arith(IntBinOp),
    Cmp(IntCmpOp),
}

impl Operator {
    fn symbol(self) -> &'static str {
        match self {
            Self::Arith(op) => op.symbol(),
            Self::Cmp(op) => op.symbol(),
        }
    }

    fn compute(self, a: i64, b: i64) -> MachineResult<LiveNode> {
        match self {
            Self::Arith(op) => op.eval(a, b).map(LiveNode::int),
            Self::Cmp(op) => church_bool(op.test(a, b)),
        }
    }
}

/// An operator still waiting for its second operand.
struct Partial {
    op: Operator,
    left: LiveNode,
}

fn force_int(node: &LiveNode, session: &Session) -> MachineResult<i64> {
    let value = node.normalize(session)?;
    value.as_int().ok_or(MachineError::TypeMismatch {
        expected: "integer",
        found: value.kind_name(),
    })
}

impl Builtin for IntBinOp {
    fn name(&self) -> String {
        self.symbol().to_string()
    }

    fn apply(&self, arg: LiveNode, _session: &Session) -> MachineResult<LiveNode> {
        Ok(LiveNode::builtin(Partial {
            op: Operator::Arith(*self),
            left: arg,
        }))
    }
}

impl Builtin for IntCmpOp {
    fn name(&self) -> String {
        self.symbol().to_string()
    }

    fn apply(&self, arg: LiveNode, _session: &Session) -> MachineResult<LiveNode> {
        Ok(LiveNode::builtin(Partial {
            op: Operator::Cmp(*self),
            left: arg,
        }))
    }
}

impl Builtin for Partial {
    fn name(&self) -> String {
        self.op.symbol().to_string()
    }

    fn operands(&self) -> Vec<LiveNode> {
        vec![self.left.clone()]
    }

    fn apply(&self, arg: LiveNode, session: &Session) -> MachineResult<LiveNode> {
        let a = force_int(&self.left, session)?;
        let b = force_int(&arg, session)?;
        trace!(op = self.op.symbol(), a, b, "primitive");
        self.op.compute(a, b)
    }
}
