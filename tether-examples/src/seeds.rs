//! Loading initial variable sets from TOML.
//!
//! A seed file is a list of `[[variable]]` tables:
//!
//! ```toml
//! [[variable]]
//! name = "radius"
//! provenance = "given"
//! unit = "m"
//! value = [1.0, 200.0]   # or a single number, or omitted
//! ```

use serde::Deserialize;
use thiserror::Error;

use tether_core::{Interval, Seed, Value, ValueError};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to parse seed file")]
    Parse(#[from] toml::de::Error),

    #[error("seed `{name}` has an invalid value after unit conversion")]
    Convert {
        name: String,
        #[source]
        source: ValueError,
    },
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default, rename = "variable")]
    variables: Vec<Seed>,
}

/// Parses seeds from TOML text.
///
/// # Errors
///
/// Returns an error if the text is not a valid seed file.
pub fn from_toml(text: &str) -> Result<Vec<Seed>, LoadError> {
    let file: SeedFile = toml::from_str(text)?;
    Ok(file.variables)
}

/// Rescales a seed's value into another unit.
///
/// `factor` multiplies the value; the unit label is replaced with `unit`.
///
/// # Errors
///
/// Returns an error if the scaled bounds are no longer a valid interval,
/// which happens for a negative or NaN factor.
pub fn rescale(mut seed: Seed, factor: f64, unit: &str) -> Result<Seed, LoadError> {
    seed.value = seed
        .value
        .map(|value| match value {
            Value::Scalar(x) => Ok(Value::Scalar(x * factor)),
            Value::Interval(range) => {
                Interval::new(range.lo() * factor, range.hi() * factor).map(Value::Interval)
            }
        })
        .transpose()
        .map_err(|source| LoadError::Convert {
            name: seed.name.clone(),
            source,
        })?;
    seed.unit = unit.to_owned();
    Ok(seed)
}
