use std::collections::BTreeMap;

use thiserror::Error;

use crate::equation::{Equation, EquationError};

/// Errors that can occur when building a [`Catalog`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CatalogError {
    #[error("equation `{name}` is already in the catalog")]
    Duplicate { name: String },

    #[error(transparent)]
    Invalid(#[from] EquationError),
}

/// The set of equations available to a solve, keyed and ordered by name.
///
/// A catalog is built once and then only read. Iteration is in name order,
/// which fixes the order updates are applied within a solver cycle.
#[derive(Debug, Default)]
pub struct Catalog {
    equations: BTreeMap<String, Equation>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from a list of equations.
    ///
    /// # Errors
    ///
    /// Returns an error if any equation is invalid or two share a name.
    pub fn from_equations(
        equations: impl IntoIterator<Item = Equation>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for equation in equations {
            catalog.insert(equation)?;
        }
        Ok(catalog)
    }

    /// Validates and adds an equation.
    ///
    /// # Errors
    ///
    /// Returns an error if the equation is invalid or its name is taken.
    pub fn insert(&mut self, equation: Equation) -> Result<(), CatalogError> {
        equation.validate()?;
        if self.equations.contains_key(equation.name()) {
            return Err(CatalogError::Duplicate {
                name: equation.name().to_owned(),
            });
        }
        self.equations.insert(equation.name().to_owned(), equation);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Equation> {
        self.equations.get(name)
    }

    /// Iterates over the equations in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Equation> {
        self.equations.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.equations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.equations.is_empty()
    }
}
