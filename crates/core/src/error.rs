use thiserror::Error;

/// Errors raised while constructing or assembling settings descriptors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("{quantity} must be strictly positive (got {value})")]
    NonPositive { quantity: &'static str, value: f64 },
    #[error("{quantity} must not be negative (got {value})")]
    Negative { quantity: &'static str, value: f64 },
    #[error("{quantity} must be finite")]
    NonFinite { quantity: &'static str },
    #[error("{quantity} = {value} lies outside [{min}, {max}]")]
    OutOfRange {
        quantity: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: String,
        found: String,
    },
    #[error(
        "degree/order {requested_degree}/{requested_order} requested for `{body}` exceeds \
         available coefficients {available_degree}/{available_order}"
    )]
    DegreeOrderExceeded {
        body: String,
        requested_degree: usize,
        requested_order: usize,
        available_degree: usize,
        available_order: usize,
    },
    #[error("{what} must not be empty")]
    EmptyList { what: String },
    #[error("{what} must not be blank")]
    EmptyName { what: &'static str },
    #[error("unknown body `{name}` referenced by {context}")]
    UnknownBody { name: String, context: String },
    #[error("body `{body}` has no {model} model, required by {context}")]
    MissingModel {
        body: String,
        model: &'static str,
        context: String,
    },
    #[error("{reason}")]
    Invalid { reason: String },
}

impl ConfigurationError {
    /// Shorthand for a free-form validation failure.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid {
            reason: reason.into(),
        }
    }
}
