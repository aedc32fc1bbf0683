//! Bulk properties of a spherical body.
//!
//! Two equations relate a body's radius, mass, mean density, and surface
//! gravity (in multiples of standard gravity). Values handed to the solver are
//! in SI base units; the seed file may use kilometers for the radius.

use std::f64::consts::PI;

use uom::si::{
    acceleration::{meter_per_second_squared, standard_gravity},
    f64::{Acceleration, Length},
    length::{kilometer, meter},
};

use tether_core::{Catalog, CatalogError, Equation, Seed};

use crate::seeds::{self, LoadError};

/// Physical constants used by the planetary equations, in SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constants {
    /// Newtonian constant of gravitation, m³/(kg·s²).
    pub gravitational: f64,
    /// Standard gravity, m/s².
    pub standard_gravity: f64,
}

impl Default for Constants {
    fn default() -> Self {
        Self {
            gravitational: 6.674_08e-11,
            standard_gravity: Acceleration::new::<standard_gravity>(1.0)
                .get::<meter_per_second_squared>(),
        }
    }
}

/// Relates `density`, `mass`, and `radius` of a uniform sphere.
#[must_use]
pub fn spherical_density() -> Equation {
    Equation::new("sphericalDensity", ["radius", "mass", "density"])
        .with_form("density", |v| {
            Ok(v.get("mass")? / (4.0 / 3.0 * PI * v.get("radius")?.powi(3)))
        })
        .with_form("radius", |v| {
            Ok((v.get("mass")? / v.get("density")? * 3.0 / 4.0 / PI).cbrt())
        })
        .with_form("mass", |v| {
            Ok(v.get("density")? * 4.0 / 3.0 * PI * v.get("radius")?.powi(3))
        })
}

/// Relates surface gravity `acc_g` (in g) to `mass` and `radius`.
#[must_use]
pub fn surface_gravity(constants: Constants) -> Equation {
    let Constants {
        gravitational: big_g,
        standard_gravity: g0,
    } = constants;

    Equation::new("accelerationGsAtSurface", ["acc_g", "mass", "radius"])
        .with_form("acc_g", move |v| {
            Ok(big_g * v.get("mass")? / v.get("radius")?.powi(2) / g0)
        })
        .with_form("mass", move |v| {
            Ok(g0 * v.get("acc_g")? * v.get("radius")?.powi(2) / big_g)
        })
        .with_form("radius", move |v| {
            Ok((big_g * v.get("mass")? / (v.get("acc_g")? * g0)).sqrt())
        })
}

/// Builds the planetary catalog.
///
/// # Errors
///
/// Returns an error if an equation is misconfigured.
pub fn catalog(constants: Constants) -> Result<Catalog, CatalogError> {
    Catalog::from_equations([spherical_density(), surface_gravity(constants)])
}

/// Loads planetary seeds, converting a radius given in kilometers to meters.
///
/// # Errors
///
/// Returns an error if the text is not a valid seed file.
pub fn load_seeds(text: &str) -> Result<Vec<Seed>, LoadError> {
    let km = Length::new::<kilometer>(1.0).get::<meter>();

    seeds::from_toml(text)?
        .into_iter()
        .map(|seed| {
            if seed.name == "radius" && seed.unit == "km" {
                seeds::rescale(seed, km, "m")
            } else {
                Ok(seed)
            }
        })
        .collect()
}
