use thiserror::Error;

/// Configuration for the fixed-point solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    max_cycles: usize,
}

/// Errors that can occur when validating a fixed-point solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_cycles must be at least 1")]
    ZeroCycles,
}

impl Default for Config {
    fn default() -> Self {
        Self { max_cycles: 10 }
    }
}

impl Config {
    /// Creates a new config with a validated cycle cap.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_cycles` is zero.
    pub fn new(max_cycles: usize) -> Result<Self, ConfigError> {
        if max_cycles == 0 {
            return Err(ConfigError::ZeroCycles);
        }
        Ok(Self { max_cycles })
    }

    /// Returns the maximum number of cycles before the run gives up.
    #[must_use]
    pub fn max_cycles(&self) -> usize {
        self.max_cycles
    }
}
