//! Error types for cadena operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for cadena operations.
///
/// Distinguishes caller mistakes (bad parameters, too little data) from
/// serialization failures. Degenerate numeric situations (constant returns,
/// unobserved transition rows) are resolved internally by documented
/// fallbacks and never surface through this type.
///
/// # Examples
///
/// ```
/// use cadena::error::CadenaError;
///
/// let err = CadenaError::InsufficientData { required: 5, actual: 3 };
/// assert!(err.to_string().contains("at least 5"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CadenaError {
    /// Out-of-range or malformed parameter value.
    InvalidParameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Price series too short to estimate a meaningful model.
    InsufficientData {
        /// Minimum number of observations required
        required: usize,
        /// Number of observations provided
        actual: usize,
    },

    /// A value leaving the core was NaN or infinite.
    NonFiniteOutput {
        /// Where the value was found
        context: String,
    },

    /// Serialization/deserialization error.
    Serialization(String),
}

impl fmt::Display for CadenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CadenaError::InvalidParameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid parameter: {param} = {value}, expected {constraint}"
                )
            }
            CadenaError::InsufficientData { required, actual } => {
                write!(
                    f,
                    "Insufficient data: need at least {required} observations, got {actual}"
                )
            }
            CadenaError::NonFiniteOutput { context } => {
                write!(f, "Non-finite value in output: {context}")
            }
            CadenaError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for CadenaError {}

impl CadenaError {
    /// Create an invalid parameter error with descriptive context.
    #[must_use]
    pub fn invalid_parameter(param: &str, value: impl fmt::Display, constraint: &str) -> Self {
        Self::InvalidParameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, CadenaError>;
