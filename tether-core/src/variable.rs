#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value::{Interval, Precision, Value};

/// Where a variable's value came from.
///
/// Provenance is carried for traceability only and never affects solving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Provenance {
    /// Supplied by the caller as a known quantity.
    Given,
    /// Produced by the solver from an equation.
    Derived,
    /// Supplied by the caller as an assumption.
    Assumed,
    /// Declared by the caller without any known value.
    DeclaredUnknown,
}

/// Errors that can occur when narrowing a variable.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum VariableError {
    #[error("variable `{name}` is already finite and cannot be updated")]
    AlreadyFinite { name: String },

    #[error("variable `{name}` cannot be updated with an unconstrained value")]
    Unconstrained { name: String },

    #[error("variable `{name}` cannot take the non-finite value {value}")]
    NonFinite { name: String, value: f64 },

    #[error("variable `{name}` has range {current} which does not overlap {proposed}")]
    Disjoint {
        name: String,
        current: Interval,
        proposed: Interval,
    },
}

/// A named quantity whose value can only ever become more precise.
///
/// The precision is always derived from the stored [`Value`], so the two can
/// never disagree. [`Variable::update`] is the only way to change the value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Variable {
    name: String,
    provenance: Provenance,
    unit: String,
    value: Value,
}

impl Variable {
    /// Creates an unconstrained variable.
    pub fn new(provenance: Provenance, unit: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            provenance,
            unit: unit.into(),
            value: Value::UNCONSTRAINED,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// Returns the unit label, which is never interpreted.
    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    #[must_use]
    pub fn value(&self) -> Value {
        self.value
    }

    #[must_use]
    pub fn precision(&self) -> Precision {
        self.value.precision()
    }

    /// Narrows the variable toward `proposed` and reports whether it changed.
    ///
    /// - A scalar replaces the current value and always counts as a change.
    /// - An interval is intersected with the current value; the result is a
    ///   change only if either bound moved.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is already finite, if `proposed` is
    /// unconstrained or a NaN or infinite scalar, or if the intersection would
    /// be empty.
    pub fn update(&mut self, proposed: Value) -> Result<bool, VariableError> {
        if self.precision() == Precision::Finite {
            return Err(VariableError::AlreadyFinite {
                name: self.name.clone(),
            });
        }

        match proposed {
            Value::Interval(range) if range.is_unbounded() => Err(VariableError::Unconstrained {
                name: self.name.clone(),
            }),
            Value::Scalar(value) if !value.is_finite() => Err(VariableError::NonFinite {
                name: self.name.clone(),
                value,
            }),
            Value::Scalar(_) => {
                self.value = proposed;
                Ok(true)
            }
            Value::Interval(range) => {
                let current = self.value.bounds();
                let narrowed = current
                    .intersect(&range)
                    .ok_or_else(|| VariableError::Disjoint {
                        name: self.name.clone(),
                        current,
                        proposed: range,
                    })?;
                self.value = Value::Interval(narrowed);
                Ok(narrowed != current)
            }
        }
    }
}
