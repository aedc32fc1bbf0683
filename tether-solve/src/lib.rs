//! Solvers for the Tether framework.
//!
//! - [`fixed_point`]: repeated constraint propagation over an equation
//!   catalog until nothing more can be learned
//!
//! The most common entry points are re-exported at the crate root.

pub mod fixed_point;

pub use fixed_point::{Config, Solution, Status, solve, solve_unobserved};
