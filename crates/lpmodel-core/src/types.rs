use serde::{Deserialize, Serialize};

/// Direction of the objective. Models minimize unless told otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sense {
    #[default]
    Minimize,
    Maximize,
}

impl Sense {
    pub fn as_str(self) -> &'static str {
        match self {
            Sense::Minimize => "minimize",
            Sense::Maximize => "maximize",
        }
    }
}

/// Closed interval `[lower, upper]`; either end may be infinite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// `[0, +inf)`, the default domain of a continuous variable.
    pub fn non_negative() -> Self {
        Self::new(0.0, f64::INFINITY)
    }
}

/// A decision variable definition: bounds and integrality.
///
/// Bounds are not checked against each other; an inverted pair reaches the
/// solver as given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variable {
    pub bounds: Bounds,
    pub is_integer: bool,
}

impl Variable {
    /// Integer on `[0, 1]`.
    pub fn binary() -> Self {
        Self {
            bounds: Bounds::new(0.0, 1.0),
            is_integer: true,
        }
    }

    pub fn continuous(bounds: Bounds) -> Self {
        Self {
            bounds,
            is_integer: false,
        }
    }

    pub fn integer(bounds: Bounds) -> Self {
        Self {
            bounds,
            is_integer: true,
        }
    }
}
