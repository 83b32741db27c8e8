use thiserror::Error;

/// Errors raised while parsing or differentiating an expression.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExprError {
    #[error("empty expression")]
    Empty,

    #[error("unexpected character '{found}' at position {pos}")]
    UnexpectedChar { pos: usize, found: char },

    #[error("malformed number '{text}' at position {pos}")]
    MalformedNumber { pos: usize, text: String },

    #[error("unexpected {found} at position {pos}")]
    UnexpectedToken { pos: usize, found: String },

    #[error("unexpected end of expression, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("undefined symbol '{name}' at position {pos}")]
    UnknownSymbol { pos: usize, name: String },

    #[error("undefined function '{name}' at position {pos}")]
    UnknownFunction { pos: usize, name: String },

    #[error("function '{name}' expects {expected} argument(s), found {found}")]
    Arity {
        name: String,
        expected: &'static str,
        found: usize,
    },

    #[error("expression nested too deeply at position {pos}")]
    TooDeep { pos: usize },

    #[error("function '{name}' has no derivative")]
    UnsupportedDerivative { name: &'static str },
}
