use thiserror::Error;

use crate::store::StoreError;

use super::UnboundInput;

/// Errors raised by equation configuration, form selection, or evaluation.
///
/// Every variant names the equation involved.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EquationError {
    #[error("equation `{equation}` has no members")]
    NoMembers { equation: String },

    #[error("equation `{equation}` lists member `{member}` more than once")]
    DuplicateMember { equation: String, member: String },

    #[error("equation `{equation}` has no form for member `{member}`")]
    MissingForm { equation: String, member: String },

    #[error("equation `{equation}` has a form for `{member}`, which is not a member")]
    StrayForm { equation: String, member: String },

    #[error("equation `{equation}` has more than one unknown member: {unknowns:?}")]
    TooManyUnknown {
        equation: String,
        unknowns: Vec<String>,
    },

    #[error("equation `{equation}` selected `{member}` as its target, but it is already finite")]
    TargetFinite { equation: String, member: String },

    #[error("equation `{equation}` cannot evaluate with unconstrained input `{member}`")]
    UnconstrainedInput { equation: String, member: String },

    #[error("equation `{equation}` failed to evaluate its form for `{target}`")]
    Unbound {
        equation: String,
        target: String,
        #[source]
        source: UnboundInput,
    },

    #[error("equation `{equation}` produced a non-finite value for `{target}`")]
    NonFinite { equation: String, target: String },

    #[error("equation `{equation}` failed to read the store")]
    Store {
        equation: String,
        #[source]
        source: StoreError,
    },
}
