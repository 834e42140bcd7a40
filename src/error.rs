//! Error types for fluidstep.

use thiserror::Error;

/// Errors surfaced at construction or configuration time.
///
/// Nothing inside a step returns an error; numerical blow-up shows up as
/// non-finite field values (see `solver::diagnostics::first_non_finite`).
#[derive(Debug, Error)]
pub enum FluidError {
    /// A solver parameter is outside the range the solver can integrate.
    #[error("invalid configuration: {field}: {reason}")]
    InvalidConfiguration {
        /// Name of the offending parameter.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The YAML configuration could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Config(#[from] serde_yaml::Error),
}

impl FluidError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }
}
