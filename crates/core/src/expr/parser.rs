//! Recursive-descent parser.
//!
//! Precedence, lowest to highest:
//!
//! | level   | forms                                              |
//! |---------|----------------------------------------------------|
//! | sum     | `a + b`, `a - b`                                   |
//! | product | `a * b`, `a / b`, implicit `(a)(b)`, `a sin(x)`     |
//! | unary   | `-a`, `+a`                                         |
//! | power   | `a ^ b` (right-associative, exponent may be signed)|
//! | postfix | `a!`                                               |
//! | primary | number, constant, `x`, call, `( ... )`             |
//!
//! A number immediately followed by an identifier or `(` binds tighter than
//! any binary operator: `2x^2` is `2 * (x^2)` and `1/2x` is `1 / (2 * x)`.

use super::{
    ExprError,
    builtin::{Constant, Func},
    lexer::{Token, TokenKind},
    node::Node,
};

/// Deepest allowed nesting of signs, exponents, parentheses, and calls.
pub(super) const MAX_DEPTH: usize = 256;

pub(super) fn parse(tokens: &[Token]) -> Result<Node, ExprError> {
    if tokens.is_empty() {
        return Err(ExprError::Empty);
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let node = parser.sum()?;

    match parser.peek() {
        None => Ok(node),
        Some(token) => Err(unexpected(token)),
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<&'a TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    fn next(&mut self, expected: &'static str) -> Result<&'a Token, ExprError> {
        let token = self
            .tokens
            .get(self.pos)
            .ok_or(ExprError::UnexpectedEnd { expected })?;
        self.pos += 1;
        Ok(token)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek_kind() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// True if the next token can start an implicitly multiplied factor.
    fn starts_implicit_factor(&self) -> bool {
        matches!(
            self.peek_kind(),
            Some(TokenKind::Ident(_) | TokenKind::LParen)
        )
    }

    fn sum(&mut self) -> Result<Node, ExprError> {
        let mut lhs = self.product()?;
        loop {
            if self.eat(&TokenKind::Plus) {
                lhs = Node::Add(Box::new(lhs), Box::new(self.product()?));
            } else if self.eat(&TokenKind::Minus) {
                lhs = Node::Sub(Box::new(lhs), Box::new(self.product()?));
            } else {
                return Ok(lhs);
            }
        }
    }

    fn product(&mut self) -> Result<Node, ExprError> {
        let mut lhs = self.unary()?;
        loop {
            if self.eat(&TokenKind::Star) {
                lhs = Node::Mul(Box::new(lhs), Box::new(self.unary()?));
            } else if self.eat(&TokenKind::Slash) {
                lhs = Node::Div(Box::new(lhs), Box::new(self.unary()?));
            } else if self.starts_implicit_factor() {
                lhs = Node::Mul(Box::new(lhs), Box::new(self.unary()?));
            } else {
                return Ok(lhs);
            }
        }
    }

    // Every nested construct recurses through here, so the depth check
    // bounds both the parser's stack and the depth of the resulting tree.
    fn unary(&mut self) -> Result<Node, ExprError> {
        if self.depth == MAX_DEPTH {
            let pos = self.peek().or(self.tokens.last()).map_or(0, |t| t.pos);
            return Err(ExprError::TooDeep { pos });
        }
        self.depth += 1;
        let node = self.signed();
        self.depth -= 1;
        node
    }

    fn signed(&mut self) -> Result<Node, ExprError> {
        if self.eat(&TokenKind::Minus) {
            return Ok(Node::Neg(Box::new(self.unary()?)));
        }
        if self.eat(&TokenKind::Plus) {
            return self.unary();
        }
        self.power()
    }

    fn power(&mut self) -> Result<Node, ExprError> {
        let base = self.postfix()?;
        if self.eat(&TokenKind::Caret) {
            let exponent = self.unary()?;
            return Ok(Node::Pow(Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    fn postfix(&mut self) -> Result<Node, ExprError> {
        let mut node = self.primary()?;
        while self.eat(&TokenKind::Bang) {
            node = Node::Call(Func::Factorial, Box::new(node));
        }
        Ok(node)
    }

    fn primary(&mut self) -> Result<Node, ExprError> {
        let token = self.next("a number, symbol, or '('")?;
        let pos = token.pos;

        match &token.kind {
            TokenKind::Number(value) => {
                let value = *value;
                if self.starts_implicit_factor() {
                    let factor = self.power()?;
                    return Ok(Node::Mul(Box::new(Node::Num(value)), Box::new(factor)));
                }
                Ok(Node::Num(value))
            }
            TokenKind::Ident(name) => {
                let name = name.clone();
                if self.eat(&TokenKind::LParen) {
                    return self.call(name, pos);
                }
                if name == "x" {
                    return Ok(Node::Var);
                }
                Constant::lookup(&name)
                    .map(Node::Const)
                    .ok_or(ExprError::UnknownSymbol { pos, name })
            }
            TokenKind::LParen => {
                let inner = self.sum()?;
                self.close_paren()?;
                Ok(inner)
            }
            _ => Err(unexpected(token)),
        }
    }

    /// Parses the argument list of `name(`, the opening parenthesis consumed.
    fn call(&mut self, name: String, pos: usize) -> Result<Node, ExprError> {
        let mut args = vec![self.sum()?];
        while self.eat(&TokenKind::Comma) {
            args.push(self.sum()?);
        }
        self.close_paren()?;

        let func = Func::lookup(&name).ok_or_else(|| ExprError::UnknownFunction {
            pos,
            name: name.clone(),
        })?;

        let found = args.len();
        let mut args = args.into_iter();
        match (func, args.next(), args.next(), args.next()) {
            (_, Some(arg), None, None) => Ok(Node::Call(func, Box::new(arg))),
            (Func::Ln, Some(value), Some(base), None) => {
                Ok(Node::Log(Box::new(value), Box::new(base)))
            }
            (Func::Ln, ..) => Err(ExprError::Arity {
                name,
                expected: "1 or 2",
                found,
            }),
            _ => Err(ExprError::Arity {
                name,
                expected: "1",
                found,
            }),
        }
    }

    fn close_paren(&mut self) -> Result<(), ExprError> {
        let token = self.next("')'")?;
        if token.kind == TokenKind::RParen {
            Ok(())
        } else {
            Err(unexpected(token))
        }
    }
}

fn unexpected(token: &Token) -> ExprError {
    ExprError::UnexpectedToken {
        pos: token.pos,
        found: token.kind.describe(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::expr::lexer::tokenize;

    fn parse_str(src: &str) -> Result<Node, ExprError> {
        parse(&tokenize(src)?)
    }

    fn eval(src: &str, x: f64) -> f64 {
        parse_str(src).expect("should parse").eval(x)
    }

    #[test]
    fn respects_precedence() {
        assert_relative_eq!(eval("1 + 2 * 3", 0.0), 7.0);
        assert_relative_eq!(eval("(1 + 2) * 3", 0.0), 9.0);
        assert_relative_eq!(eval("8 / 4 / 2", 0.0), 1.0);
        assert_relative_eq!(eval("10 - 4 - 3", 0.0), 3.0);
    }

    #[test]
    fn power_is_right_associative_and_above_negation() {
        assert_relative_eq!(eval("2^3^2", 0.0), 512.0);
        assert_relative_eq!(eval("-x^2", 3.0), -9.0);
        assert_relative_eq!(eval("2^-1", 0.0), 0.5);
    }

    #[test]
    fn factorial_binds_tighter_than_power() {
        assert_relative_eq!(eval("2^3!", 0.0), 64.0);
        assert_relative_eq!(eval("x!", 4.0), 24.0);
        assert_relative_eq!(eval("-3!", 0.0), -6.0);
    }

    #[test]
    fn implicit_multiplication() {
        assert_relative_eq!(eval("2x", 3.0), 6.0);
        assert_relative_eq!(eval("2x^2", 3.0), 18.0);
        assert_relative_eq!(eval("1/2x", 4.0), 0.125);
        assert_relative_eq!(eval("(x + 1)(x - 1)", 3.0), 8.0);
        assert_relative_eq!(eval("3 sin(x)", 0.0), 0.0);
    }

    #[test]
    fn calls_and_constants() {
        assert_relative_eq!(eval("sin(pi / 2)", 0.0), 1.0);
        assert_relative_eq!(eval("log(e)", 0.0), 1.0);
        assert_relative_eq!(eval("ln(x)", 1.0), 0.0);
        assert_relative_eq!(eval("log(8, 2)", 0.0), 3.0, epsilon = 1e-12);
        assert_relative_eq!(eval("log10(1000)", 0.0), 3.0, epsilon = 1e-12);
        assert_relative_eq!(eval("cbrt(-27)", 0.0), -3.0);
        assert_relative_eq!(eval("factorial(5)", 0.0), 120.0);
    }

    #[test]
    fn rejects_unknown_symbol() {
        assert_eq!(
            parse_str("x + y"),
            Err(ExprError::UnknownSymbol {
                pos: 4,
                name: "y".into()
            })
        );
    }

    #[test]
    fn rejects_unknown_function() {
        assert!(matches!(
            parse_str("foo(x)"),
            Err(ExprError::UnknownFunction { pos: 0, .. })
        ));
    }

    #[test]
    fn rejects_wrong_arity() {
        assert!(matches!(
            parse_str("sin(x, 2)"),
            Err(ExprError::Arity { found: 2, .. })
        ));
        assert!(matches!(
            parse_str("log(x, 2, 3)"),
            Err(ExprError::Arity { found: 3, .. })
        ));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(parse_str(""), Err(ExprError::Empty));
        assert!(matches!(
            parse_str("x +"),
            Err(ExprError::UnexpectedEnd { .. })
        ));
        assert!(matches!(
            parse_str("(x + 1"),
            Err(ExprError::UnexpectedEnd { .. })
        ));
        assert!(matches!(
            parse_str("x 2"),
            Err(ExprError::UnexpectedToken { pos: 2, .. })
        ));
        assert!(matches!(
            parse_str("* x"),
            Err(ExprError::UnexpectedToken { pos: 0, .. })
        ));
    }

    #[test]
    fn rejects_excessive_nesting() {
        let signs = format!("{}x", "-".repeat(10_000));
        assert!(matches!(
            parse_str(&signs),
            Err(ExprError::TooDeep { pos: MAX_DEPTH })
        ));

        let parens = format!("{}x{}", "(".repeat(20_000), ")".repeat(20_000));
        assert!(matches!(parse_str(&parens), Err(ExprError::TooDeep { .. })));

        let exponents = vec!["x"; 10_000].join("^");
        assert!(matches!(parse_str(&exponents), Err(ExprError::TooDeep { .. })));

        let calls = format!("{}x{}", "sin(".repeat(10_000), ")".repeat(10_000));
        assert!(matches!(parse_str(&calls), Err(ExprError::TooDeep { .. })));
    }

    #[test]
    fn accepts_nesting_within_limit() {
        let depth = MAX_DEPTH - 2;
        let parens = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
        assert_relative_eq!(eval(&parens, 2.0), 2.0);

        let signs = format!("{}x", "--".repeat(depth / 2));
        assert_relative_eq!(eval(&signs, 2.0), 2.0);
    }
}
