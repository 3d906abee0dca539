//! Core error types for the Quantfolio engine.
//!
//! Every engine operation is a pure function, so errors are local to a single
//! call and reported synchronously. None of them are worth retrying.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Malformed or degenerate numeric input (zero total allocation, zero risk,
    /// discount rate not above growth rate, ...).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing fundamentals: {0}")]
    MissingFundamentals(#[from] MissingFundamentalsError),

    /// A scenario type, asset category or valuation model name that is not part
    /// of the closed enumeration.
    #[error("Unknown {kind}: '{value}'")]
    UnknownCategory { kind: &'static str, value: String },

    /// A collaborator (market-data provider, cache) failed.
    #[error("Provider error: {0}")]
    Provider(String),
}

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error::InvalidInput(message.into())
    }

    pub fn unknown(kind: &'static str, value: impl Into<String>) -> Self {
        Error::UnknownCategory {
            kind,
            value: value.into(),
        }
    }
}

/// A valuation model was asked to run without one of its required figures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{model} requires '{field}'")]
pub struct MissingFundamentalsError {
    /// Display name of the model that rejected the input.
    pub model: &'static str,
    /// camelCase name of the absent field, as it appears on the wire.
    pub field: &'static str,
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fundamentals_message_names_field() {
        let err: Error = MissingFundamentalsError {
            model: "DCF",
            field: "freeCashFlow",
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Missing fundamentals: DCF requires 'freeCashFlow'"
        );
    }

    #[test]
    fn test_unknown_category_message() {
        let err = Error::unknown("scenario type", "MOON_LANDING");
        assert_eq!(err.to_string(), "Unknown scenario type: 'MOON_LANDING'");
    }
}
