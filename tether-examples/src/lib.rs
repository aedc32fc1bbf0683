//! Example equation catalogs and inputs for Tether.
//!
//! The engine only ever sees raw numbers and opaque unit labels. Everything in
//! this crate is the configuration layer that sits in front of it: physical
//! constants, unit conversion, and the equations themselves.

pub mod planetary;
pub mod seeds;
