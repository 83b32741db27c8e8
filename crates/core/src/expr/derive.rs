//! Symbolic first derivative with light simplification.
//!
//! The constructors at the bottom of this file fold numeric constants and
//! drop additive zeros and multiplicative ones, which keeps derivatives of
//! typical inputs readable (`x^2 - 4` differentiates to `2 * x`).

use super::{ExprError, builtin::Func, node::Node};

/// Differentiates the tree with respect to `x`.
pub(super) fn differentiate(node: &Node) -> Result<Node, ExprError> {
    if !node.contains_var() {
        return Ok(num(0.0));
    }

    let derivative = match node {
        Node::Num(_) | Node::Const(_) => num(0.0),
        Node::Var => num(1.0),
        Node::Neg(a) => neg(differentiate(a)?),
        Node::Add(a, b) => add(differentiate(a)?, differentiate(b)?),
        Node::Sub(a, b) => sub(differentiate(a)?, differentiate(b)?),
        Node::Mul(a, b) => {
            let da = differentiate(a)?;
            let db = differentiate(b)?;
            add(mul(da, b.as_ref().clone()), mul(a.as_ref().clone(), db))
        }
        Node::Div(a, b) => {
            let da = differentiate(a)?;
            let db = differentiate(b)?;
            let numerator = sub(mul(da, b.as_ref().clone()), mul(a.as_ref().clone(), db));
            div(numerator, pow(b.as_ref().clone(), num(2.0)))
        }
        Node::Pow(base, exp) => power_rule(node, base, exp)?,
        Node::Call(func, arg) => mul(outer(*func, arg)?, differentiate(arg)?),
        Node::Log(value, base) => {
            let ratio = Node::Div(
                Box::new(call(Func::Ln, value.as_ref().clone())),
                Box::new(call(Func::Ln, base.as_ref().clone())),
            );
            differentiate(&ratio)?
        }
    };

    Ok(derivative)
}

fn power_rule(node: &Node, base: &Node, exp: &Node) -> Result<Node, ExprError> {
    let derivative = match (base.contains_var(), exp.contains_var()) {
        // d(u^n) = n u^(n-1) u'
        (true, false) => {
            let reduced = pow(base.clone(), sub(exp.clone(), num(1.0)));
            mul(mul(exp.clone(), reduced), differentiate(base)?)
        }
        // d(a^v) = a^v ln(a) v'
        (false, _) => mul(
            mul(node.clone(), call(Func::Ln, base.clone())),
            differentiate(exp)?,
        ),
        // d(u^v) = u^v (v' ln(u) + v u' / u)
        (true, true) => {
            let log_term = mul(differentiate(exp)?, call(Func::Ln, base.clone()));
            let ratio_term = div(mul(exp.clone(), differentiate(base)?), base.clone());
            mul(node.clone(), add(log_term, ratio_term))
        }
    };
    Ok(derivative)
}

/// Derivative of `func` evaluated at `u`, before the chain-rule factor.
fn outer(func: Func, u: &Node) -> Result<Node, ExprError> {
    let u = u.clone();
    let d = match func {
        Func::Sin => call(Func::Cos, u),
        Func::Cos => neg(call(Func::Sin, u)),
        Func::Tan => div(num(1.0), pow(call(Func::Cos, u), num(2.0))),
        Func::Asin => div(num(1.0), call(Func::Sqrt, sub(num(1.0), pow(u, num(2.0))))),
        Func::Acos => neg(div(
            num(1.0),
            call(Func::Sqrt, sub(num(1.0), pow(u, num(2.0)))),
        )),
        Func::Atan => div(num(1.0), add(pow(u, num(2.0)), num(1.0))),
        Func::Sinh => call(Func::Cosh, u),
        Func::Cosh => call(Func::Sinh, u),
        Func::Tanh => div(num(1.0), pow(call(Func::Cosh, u), num(2.0))),
        Func::Exp => call(Func::Exp, u),
        Func::Ln => div(num(1.0), u),
        Func::Log10 => div(num(1.0), mul(u, call(Func::Ln, num(10.0)))),
        Func::Log2 => div(num(1.0), mul(u, call(Func::Ln, num(2.0)))),
        Func::Sqrt => div(num(1.0), mul(num(2.0), call(Func::Sqrt, u))),
        Func::Cbrt => div(num(1.0), mul(num(3.0), pow(call(Func::Cbrt, u), num(2.0)))),
        Func::Abs => div(call(Func::Abs, u.clone()), u),
        Func::Factorial => {
            return Err(ExprError::UnsupportedDerivative {
                name: Func::Factorial.name(),
            });
        }
    };
    Ok(d)
}

fn num(value: f64) -> Node {
    Node::Num(value)
}

fn as_num(node: &Node) -> Option<f64> {
    match node {
        Node::Num(v) => Some(*v),
        _ => None,
    }
}

#[allow(clippy::float_cmp)]
fn is(node: &Node, value: f64) -> bool {
    as_num(node) == Some(value)
}

fn call(func: Func, arg: Node) -> Node {
    Node::Call(func, Box::new(arg))
}

fn neg(a: Node) -> Node {
    match a {
        Node::Num(v) => num(-v),
        Node::Neg(inner) => *inner,
        a => Node::Neg(Box::new(a)),
    }
}

fn add(a: Node, b: Node) -> Node {
    match (as_num(&a), as_num(&b)) {
        (Some(x), Some(y)) => num(x + y),
        _ if is(&a, 0.0) => b,
        _ if is(&b, 0.0) => a,
        _ => Node::Add(Box::new(a), Box::new(b)),
    }
}

fn sub(a: Node, b: Node) -> Node {
    match (as_num(&a), as_num(&b)) {
        (Some(x), Some(y)) => num(x - y),
        _ if is(&b, 0.0) => a,
        _ if is(&a, 0.0) => neg(b),
        _ => Node::Sub(Box::new(a), Box::new(b)),
    }
}

fn mul(a: Node, b: Node) -> Node {
    match (as_num(&a), as_num(&b)) {
        (Some(x), Some(y)) => num(x * y),
        _ if is(&a, 0.0) || is(&b, 0.0) => num(0.0),
        _ if is(&a, 1.0) => b,
        _ if is(&b, 1.0) => a,
        _ if is(&a, -1.0) => neg(b),
        _ => Node::Mul(Box::new(a), Box::new(b)),
    }
}

fn div(a: Node, b: Node) -> Node {
    match (as_num(&a), as_num(&b)) {
        (Some(x), Some(y)) if y != 0.0 => num(x / y),
        _ if is(&a, 0.0) => num(0.0),
        _ if is(&b, 1.0) => a,
        _ => Node::Div(Box::new(a), Box::new(b)),
    }
}

fn pow(a: Node, b: Node) -> Node {
    match (as_num(&a), as_num(&b)) {
        (Some(x), Some(y)) => num(x.powf(y)),
        _ if is(&b, 0.0) => num(1.0),
        _ if is(&b, 1.0) => a,
        _ => Node::Pow(Box::new(a), Box::new(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::expr::{lexer::tokenize, parser::parse};

    fn derive(src: &str) -> Result<Node, ExprError> {
        differentiate(&parse(&tokenize(src)?)?)
    }

    fn derive_at(src: &str, x: f64) -> f64 {
        derive(src).expect("should differentiate").eval(x)
    }

    /// Centered difference used as an independent check.
    fn numeric(src: &str, x: f64) -> f64 {
        let node = parse(&tokenize(src).unwrap()).unwrap();
        let h = 1e-6;
        (node.eval(x + h) - node.eval(x - h)) / (2.0 * h)
    }

    #[test]
    fn polynomial_simplifies() {
        assert_eq!(derive("x^2 - 4").unwrap().to_string(), "2 * x");
        assert_eq!(derive("3x + 1").unwrap().to_string(), "3");
        assert_eq!(derive("7").unwrap().to_string(), "0");
    }

    #[test]
    fn matches_known_derivatives() {
        assert_relative_eq!(derive_at("x^3 - x - 2", 2.0), 11.0);
        assert_relative_eq!(derive_at("sin(x) - x/2", 0.0), 0.5);
        assert_relative_eq!(derive_at("exp(2x)", 0.0), 2.0);
        assert_relative_eq!(derive_at("log(x, 2)", 1.0), 1.0 / 2f64.ln(), epsilon = 1e-12);
        assert_relative_eq!(
            derive_at("x^x", 2.0),
            4.0 * (2f64.ln() + 1.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn agrees_with_finite_differences() {
        let cases = [
            "tan(x) * cos(x)",
            "asin(x / 2) + acos(x / 3)",
            "atan(x^2)",
            "sinh(x) / cosh(x) - tanh(x)",
            "log10(x) + log2(x) + ln(x)",
            "sqrt(x) * cbrt(x)",
            "abs(x - 2)",
            "2^x / x",
            "(x + 1)(x - 1) / (x^2 + 1)",
        ];
        for src in cases {
            assert_relative_eq!(derive_at(src, 0.7), numeric(src, 0.7), epsilon = 1e-6);
        }
    }

    #[test]
    fn constant_subtrees_do_not_need_rules() {
        assert_relative_eq!(derive_at("factorial(3) * x", 5.0), 6.0);
    }

    #[test]
    fn factorial_of_x_is_unsupported() {
        assert_eq!(
            derive("factorial(x) - 2"),
            Err(ExprError::UnsupportedDerivative { name: "factorial" })
        );
        assert!(derive("x! + 1").is_err());
    }
}
