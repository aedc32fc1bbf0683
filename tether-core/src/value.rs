use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How precisely a quantity's value is known.
///
/// Levels are ordered from least to most precise, so the derived `Ord`
/// can be used directly when selecting the least-known member of an equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Precision {
    /// The value spans the full range [-∞, +∞].
    Unconstrained,
    /// The value is a bounded interval [lo, hi].
    ConstrainedRange,
    /// The value is a single exact number.
    Finite,
}

/// Errors that can occur when constructing an [`Interval`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ValueError {
    #[error("interval bound is NaN")]
    NanBound,

    #[error("interval is inverted: lo = {lo} > hi = {hi}")]
    Inverted { lo: f64, hi: f64 },
}

/// A closed interval `[lo, hi]` with `lo <= hi`.
///
/// Either bound may be infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "[f64; 2]", into = "[f64; 2]"))]
pub struct Interval {
    lo: f64,
    hi: f64,
}

impl Interval {
    /// The interval [-∞, +∞].
    pub const UNBOUNDED: Self = Self {
        lo: f64::NEG_INFINITY,
        hi: f64::INFINITY,
    };

    /// Creates a new interval.
    ///
    /// # Errors
    ///
    /// Returns an error if either bound is NaN or if `lo > hi`.
    pub fn new(lo: f64, hi: f64) -> Result<Self, ValueError> {
        if lo.is_nan() || hi.is_nan() {
            return Err(ValueError::NanBound);
        }
        if lo > hi {
            return Err(ValueError::Inverted { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    #[must_use]
    pub fn lo(&self) -> f64 {
        self.lo
    }

    #[must_use]
    pub fn hi(&self) -> f64 {
        self.hi
    }

    /// Returns `|hi - lo|`, which is infinite for unbounded intervals.
    #[must_use]
    pub fn width(&self) -> f64 {
        (self.hi - self.lo).abs()
    }

    /// Returns `true` if this is exactly [-∞, +∞].
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.lo == f64::NEG_INFINITY && self.hi == f64::INFINITY
    }

    /// Returns `true` if `x` lies within the closed interval.
    #[must_use]
    pub fn contains(&self, x: f64) -> bool {
        self.lo <= x && x <= self.hi
    }

    /// Returns the overlap of two intervals, or `None` if they are disjoint.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        Self::new(self.lo.max(other.lo), self.hi.min(other.hi)).ok()
    }
}

impl TryFrom<[f64; 2]> for Interval {
    type Error = ValueError;

    fn try_from([lo, hi]: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(lo, hi)
    }
}

impl From<Interval> for [f64; 2] {
    fn from(interval: Interval) -> Self {
        [interval.lo, interval.hi]
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}

/// The current value of a quantity: an exact number or an interval.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    Scalar(f64),
    Interval(Interval),
}

impl Value {
    /// The unconstrained value [-∞, +∞].
    pub const UNCONSTRAINED: Self = Self::Interval(Interval::UNBOUNDED);

    /// Creates an interval value.
    ///
    /// # Errors
    ///
    /// Returns an error if the bounds do not form a valid [`Interval`].
    pub fn range(lo: f64, hi: f64) -> Result<Self, ValueError> {
        Interval::new(lo, hi).map(Self::Interval)
    }

    /// Classifies this value.
    ///
    /// A scalar is always `Finite`, the unbounded interval is
    /// `Unconstrained`, and every other interval is `ConstrainedRange`.
    #[must_use]
    pub fn precision(&self) -> Precision {
        match self {
            Self::Scalar(_) => Precision::Finite,
            Self::Interval(interval) if interval.is_unbounded() => Precision::Unconstrained,
            Self::Interval(_) => Precision::ConstrainedRange,
        }
    }

    /// Returns the width of the represented set (zero for a scalar).
    #[must_use]
    pub fn width(&self) -> f64 {
        match self {
            Self::Scalar(_) => 0.0,
            Self::Interval(interval) => interval.width(),
        }
    }

    /// Returns the value as an interval, treating a scalar as `[x, x]`.
    #[must_use]
    pub fn bounds(&self) -> Interval {
        match *self {
            Self::Scalar(x) => Interval { lo: x, hi: x },
            Self::Interval(interval) => interval,
        }
    }

    #[must_use]
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(x) => Some(*x),
            Self::Interval(_) => None,
        }
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Scalar(x)
    }
}

impl From<Interval> for Value {
    fn from(interval: Interval) -> Self {
        Self::Interval(interval)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(x) => write!(f, "{x}"),
            Self::Interval(interval) => write!(f, "{interval}"),
        }
    }
}
