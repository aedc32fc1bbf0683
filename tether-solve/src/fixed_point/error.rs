use thiserror::Error;

use tether_core::{EquationError, StoreError, VariableError};

/// Errors that abort a fixed-point solve.
///
/// Running out of applicable equations or cycles is not an error; see
/// [`Status`](super::Status).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Equation(#[from] EquationError),

    #[error("equation `{equation}` failed to update `{target}`")]
    Update {
        equation: String,
        target: String,
        #[source]
        source: VariableError,
    },

    #[error("equation `{equation}` failed to create `{target}`")]
    Store {
        equation: String,
        target: String,
        #[source]
        source: StoreError,
    },
}
