use std::{collections::BTreeMap, fmt};

use thiserror::Error;

/// A form read an input name that was not bound.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("input `{name}` is not bound")]
pub struct UnboundInput {
    pub name: String,
}

/// The scalar values a form is evaluated against.
///
/// Holds one binding per non-target member of the equation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inputs<'a> {
    bindings: BTreeMap<&'a str, f64>,
}

impl<'a> Inputs<'a> {
    /// Returns the value bound to `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is not bound.
    pub fn get(&self, name: &str) -> Result<f64, UnboundInput> {
        self.bindings
            .get(name)
            .copied()
            .ok_or_else(|| UnboundInput {
                name: name.to_owned(),
            })
    }

    pub(crate) fn bind(&mut self, name: &'a str, value: f64) {
        self.bindings.insert(name, value);
    }
}

impl<'a> FromIterator<(&'a str, f64)> for Inputs<'a> {
    fn from_iter<T: IntoIterator<Item = (&'a str, f64)>>(iter: T) -> Self {
        Self {
            bindings: iter.into_iter().collect(),
        }
    }
}

/// A closed-form function computing one member from the others.
pub(crate) type FormFn = dyn Fn(&Inputs<'_>) -> Result<f64, UnboundInput>;

/// The form chosen to solve for a particular member of an equation.
#[derive(Clone, Copy)]
pub struct Form<'a> {
    pub(crate) target: &'a str,
    pub(crate) func: &'a FormFn,
}

impl Form<'_> {
    /// Returns the name of the member this form computes.
    #[must_use]
    pub fn target(&self) -> &str {
        self.target
    }

    /// Calls the form directly on a set of inputs.
    ///
    /// # Errors
    ///
    /// Returns an error if the form reads an input that is not bound.
    pub fn call(&self, inputs: &Inputs<'_>) -> Result<f64, UnboundInput> {
        (self.func)(inputs)
    }
}

impl fmt::Debug for Form<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}
