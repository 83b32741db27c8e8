use std::fmt;

use super::builtin::{Constant, Func};

/// Parsed expression tree over the single free variable `x`.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Node {
    Num(f64),
    Const(Constant),
    Var,
    Neg(Box<Node>),
    Add(Box<Node>, Box<Node>),
    Sub(Box<Node>, Box<Node>),
    Mul(Box<Node>, Box<Node>),
    Div(Box<Node>, Box<Node>),
    Pow(Box<Node>, Box<Node>),
    Call(Func, Box<Node>),
    /// Logarithm of the first operand in the base given by the second.
    Log(Box<Node>, Box<Node>),
}

impl Node {
    /// Evaluates the tree with `x` bound to the given value.
    pub(super) fn eval(&self, x: f64) -> f64 {
        match self {
            Self::Num(v) => *v,
            Self::Const(c) => c.value(),
            Self::Var => x,
            Self::Neg(a) => -a.eval(x),
            Self::Add(a, b) => a.eval(x) + b.eval(x),
            Self::Sub(a, b) => a.eval(x) - b.eval(x),
            Self::Mul(a, b) => a.eval(x) * b.eval(x),
            Self::Div(a, b) => a.eval(x) / b.eval(x),
            Self::Pow(a, b) => a.eval(x).powf(b.eval(x)),
            Self::Call(func, a) => func.apply(a.eval(x)),
            Self::Log(a, base) => a.eval(x).ln() / base.eval(x).ln(),
        }
    }

    /// Returns true if `x` occurs anywhere in the tree.
    pub(super) fn contains_var(&self) -> bool {
        match self {
            Self::Num(_) | Self::Const(_) => false,
            Self::Var => true,
            Self::Neg(a) | Self::Call(_, a) => a.contains_var(),
            Self::Add(a, b)
            | Self::Sub(a, b)
            | Self::Mul(a, b)
            | Self::Div(a, b)
            | Self::Pow(a, b)
            | Self::Log(a, b) => a.contains_var() || b.contains_var(),
        }
    }

    /// Binding strength used to decide where parentheses are needed.
    fn precedence(&self) -> u8 {
        match self {
            Self::Add(..) | Self::Sub(..) => 1,
            Self::Mul(..) | Self::Div(..) => 2,
            Self::Neg(_) => 3,
            Self::Num(v) if v.is_sign_negative() => 3,
            Self::Pow(..) => 4,
            Self::Num(_) | Self::Const(_) | Self::Var | Self::Call(..) | Self::Log(..) => 5,
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, min: u8) -> fmt::Result {
        if self.precedence() < min {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }

    fn fmt_binary(
        f: &mut fmt::Formatter<'_>,
        lhs: &Node,
        op: &str,
        rhs: &Node,
        (lhs_min, rhs_min): (u8, u8),
    ) -> fmt::Result {
        lhs.fmt_operand(f, lhs_min)?;
        write!(f, " {op} ")?;
        rhs.fmt_operand(f, rhs_min)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(v) => write!(f, "{v}"),
            Self::Const(c) => f.write_str(c.name()),
            Self::Var => f.write_str("x"),
            Self::Neg(a) => {
                f.write_str("-")?;
                a.fmt_operand(f, 3)
            }
            Self::Add(a, b) => Self::fmt_binary(f, a, "+", b, (1, 1)),
            Self::Sub(a, b) => Self::fmt_binary(f, a, "-", b, (1, 2)),
            Self::Mul(a, b) => Self::fmt_binary(f, a, "*", b, (2, 2)),
            Self::Div(a, b) => Self::fmt_binary(f, a, "/", b, (2, 3)),
            Self::Pow(a, b) => {
                a.fmt_operand(f, 5)?;
                f.write_str("^")?;
                b.fmt_operand(f, 4)
            }
            Self::Call(func, a) => write!(f, "{}({a})", func.name()),
            Self::Log(a, base) => write!(f, "log({a}, {base})"),
        }
    }
}
