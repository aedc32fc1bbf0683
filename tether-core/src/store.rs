use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    value::Value,
    variable::{Provenance, Variable, VariableError},
};

/// Errors that can occur when accessing or seeding a [`Store`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    #[error("variable `{name}` already exists")]
    Duplicate { name: String },

    #[error("variable `{name}` not found")]
    NotFound { name: String },

    #[error("invalid seed value")]
    Seed(#[from] VariableError),
}

/// One entry of the initial variable set.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Seed {
    pub name: String,
    pub provenance: Provenance,
    #[cfg_attr(feature = "serde", serde(default))]
    pub unit: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: Option<Value>,
}

impl Seed {
    /// Creates a seed with no initial value.
    pub fn new(name: impl Into<String>, provenance: Provenance, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            provenance,
            unit: unit.into(),
            value: None,
        }
    }

    /// Sets the initial value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// The owning registry of variables, keyed by unique name.
///
/// Variables are never overwritten or removed once added.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Store {
    variables: BTreeMap<String, Variable>,
}

impl Store {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from an initial variable set.
    ///
    /// Each seed becomes an unconstrained variable that is then narrowed to
    /// its initial value, if one is given. A seed whose value is unbounded is
    /// left unconstrained.
    ///
    /// # Errors
    ///
    /// Returns an error if two seeds share a name or a seed's value is not a
    /// valid narrowing, such as a NaN or infinite scalar.
    pub fn seeded(seeds: impl IntoIterator<Item = Seed>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for seed in seeds {
            let mut variable = Variable::new(seed.provenance, seed.unit, seed.name);
            if let Some(value) = seed.value.filter(|v| *v != Value::UNCONSTRAINED) {
                variable.update(value)?;
            }
            store.add(variable)?;
        }
        Ok(store)
    }

    /// Adds a variable.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable with the same name already exists.
    pub fn add(&mut self, variable: Variable) -> Result<(), StoreError> {
        if self.variables.contains_key(variable.name()) {
            return Err(StoreError::Duplicate {
                name: variable.name().to_owned(),
            });
        }
        self.variables.insert(variable.name().to_owned(), variable);
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Returns the named variable.
    ///
    /// # Errors
    ///
    /// Returns an error if no variable has that name.
    pub fn get(&self, name: &str) -> Result<&Variable, StoreError> {
        self.variables.get(name).ok_or_else(|| StoreError::NotFound {
            name: name.to_owned(),
        })
    }

    /// Returns the named variable for narrowing.
    ///
    /// # Errors
    ///
    /// Returns an error if no variable has that name.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut Variable, StoreError> {
        self.variables
            .get_mut(name)
            .ok_or_else(|| StoreError::NotFound {
                name: name.to_owned(),
            })
    }

    /// Returns the named variable if present.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    /// Iterates over all variables in name order.
    pub fn all(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
