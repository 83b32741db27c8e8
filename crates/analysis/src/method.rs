use std::{fmt, slice, str::FromStr};

use thiserror::Error;

/// One of the five root-finding methods.
///
/// The declaration order is the canonical order: methods run in it, results
/// iterate in it, and ties for the best method go to the earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum Method {
    Bisection,
    FalsePosition,
    NewtonRaphson,
    Secant,
    FixedPoint,
}

impl Method {
    /// Every method, in canonical order.
    pub const ALL: [Method; 5] = [
        Method::Bisection,
        Method::FalsePosition,
        Method::NewtonRaphson,
        Method::Secant,
        Method::FixedPoint,
    ];

    /// The identifier used in requests, e.g. `"newtonRaphson"`.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Method::Bisection => "bisection",
            Method::FalsePosition => "falsePosition",
            Method::NewtonRaphson => "newtonRaphson",
            Method::Secant => "secant",
            Method::FixedPoint => "fixedPoint",
        }
    }

    /// Human-readable name, e.g. `"Newton-Raphson"`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Method::Bisection => "Bisection",
            Method::FalsePosition => "False Position",
            Method::NewtonRaphson => "Newton-Raphson",
            Method::Secant => "Secant",
            Method::FixedPoint => "Fixed Point",
        }
    }

    /// Returns true for methods that need a sign-changing bracket.
    #[must_use]
    pub fn is_bracketing(self) -> bool {
        matches!(self, Method::Bisection | Method::FalsePosition)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A method key that names none of the five methods.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown method `{0}`")]
pub struct UnknownMethod(pub String);

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|method| method.key() == key)
            .ok_or_else(|| UnknownMethod(key.to_owned()))
    }
}

/// Which methods an analysis runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// All five methods, in canonical order.
    #[default]
    All,

    /// Exactly one method.
    One(Method),
}

impl Selection {
    /// The selected methods, in canonical order.
    #[must_use]
    pub fn methods(&self) -> &[Method] {
        match self {
            Selection::All => &Method::ALL,
            Selection::One(method) => slice::from_ref(method),
        }
    }
}

impl From<Method> for Selection {
    fn from(method: Method) -> Self {
        Selection::One(method)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str("all"),
            Selection::One(method) => f.write_str(method.key()),
        }
    }
}

impl FromStr for Selection {
    type Err = UnknownMethod;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        if key == "all" {
            Ok(Selection::All)
        } else {
            key.parse().map(Selection::One)
        }
    }
}
