//! Numeric scalar with additive promotion semantics.
//!
//! Integer totals stay integer until a float operand arrives or an i64
//! addition overflows; both cases promote to float instead of failing, so
//! aggregation never errors.

use std::fmt::{Display, Formatter};
use std::ops::{Add, Sub};

/// Numeric scalar used by aggregating snippet functions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Additive identity; integer so an all-integer stream stays integer.
    pub const ZERO: Number = Number::Int(0);

    /// Returns the float rendition of this scalar.
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(value) => value as f64,
            Self::Float(value) => value,
        }
    }
}

impl Default for Number {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
        }
    }
}

impl Add for Number {
    type Output = Number;

    fn add(self, rhs: Number) -> Number {
        match (self, rhs) {
            (Self::Int(lhs), Self::Int(rhs)) => lhs
                .checked_add(rhs)
                .map(Self::Int)
                .unwrap_or_else(|| Self::Float(lhs as f64 + rhs as f64)),
            (lhs, rhs) => Self::Float(lhs.as_f64() + rhs.as_f64()),
        }
    }
}

impl Sub for Number {
    type Output = Number;

    fn sub(self, rhs: Number) -> Number {
        match (self, rhs) {
            (Self::Int(lhs), Self::Int(rhs)) => lhs
                .checked_sub(rhs)
                .map(Self::Int)
                .unwrap_or_else(|| Self::Float(lhs as f64 - rhs as f64)),
            (lhs, rhs) => Self::Float(lhs.as_f64() - rhs.as_f64()),
        }
    }
}
