//! Core types for Tether, a constraint-propagation solver for small systems of
//! physical equations.
//!
//! - [`Value`] and [`Precision`]: what is known about a quantity, from
//!   unconstrained through a bounded range to an exact number
//! - [`Variable`]: a named quantity that can only ever be narrowed
//! - [`Store`]: the owning registry of variables for one solve
//! - [`Equation`]: a relation with one closed-form [`Form`] per member, able
//!   to evaluate itself against ranged inputs by corner-point sampling
//! - [`Catalog`]: the read-only set of equations a solve draws from
//! - [`Observer`]: receives solver events and optionally returns actions
//!
//! Units are carried as opaque labels and are never converted.

mod catalog;
mod equation;
mod observer;
mod store;
mod value;
mod variable;

pub use catalog::{Catalog, CatalogError};
pub use equation::{Equation, EquationError, Evaluation, Form, Inputs, UnboundInput};
pub use observer::Observer;
pub use store::{Seed, Store, StoreError};
pub use value::{Interval, Precision, Value, ValueError};
pub use variable::{Provenance, Variable, VariableError};
