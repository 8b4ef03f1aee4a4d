use rust_decimal::Decimal;
use thiserror::Error;

use super::types::Rate;

/// Message carried by [`AssessmentError::Unavailable`].
pub const TEMPORARY_ERROR: &str = "temporary error in VAT assessment";

/// Returned when constructing a [`Rate`] outside `0..=1`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("VAT rate must be between 0 and 1, got {0}")]
pub struct RateRangeError(pub Decimal);

/// Why a VAT assessment was rejected.
///
/// These are business-rule failures the customer can fix by correcting
/// their address, phone number or VATIN.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FailureReason {
    /// The registry does not know the VATIN or its format is wrong.
    #[error("invalid VAT Identification Number (VATIN) {vatin}: {reason}")]
    InvalidVatin {
        vatin: String,
        company: String,
        reason: String,
    },

    /// The VATIN is registered in another country than the one given.
    #[error("VATIN {vatin} is registered in {registered_country}, not in {country}")]
    CountryMismatch {
        vatin: String,
        registered_country: String,
        country: String,
        company: String,
    },

    /// Fewer definitive rate signals than required.
    #[error(
        "insufficient information for VAT assessment ({verifications} of {required} verifications)"
    )]
    InsufficientInformation { verifications: u32, required: u32 },

    /// Address and phone number point to different rates.
    #[error("conflicting rates: address indicates {address}, phone number indicates {phone}")]
    ConflictingRates { address: Rate, phone: Rate },

    /// A rate service rejected its input outright (e.g. unknown country code).
    #[error("invalid input for VAT assessment: {0}")]
    InvalidInput(String),

    /// No address to assess.
    #[error("no address available for VAT assessment")]
    NoAddress,
}

/// Error returned by the public assessment entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum AssessmentError {
    /// The data given cannot be assessed; the customer must correct it.
    #[error("VAT assessment failed: {0}")]
    Failed(FailureReason),

    /// A lookup service could not be reached or answered garbage; try again later.
    #[error("{0}")]
    Unavailable(String),
}

impl AssessmentError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }

    /// The business-rule failure, if this is one.
    pub fn reason(&self) -> Option<&FailureReason> {
        match self {
            Self::Failed(reason) => Some(reason),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<FailureReason> for AssessmentError {
    fn from(reason: FailureReason) -> Self {
        Self::Failed(reason)
    }
}

/// Builder encountered invalid input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("builder error: {0}")]
pub struct BuilderError(pub String);

/// Errors loading the store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A required setting is absent.
    #[error("configuration error: {0} not set")]
    Missing(String),

    /// The store country is not an ISO 3166-1 alpha-2 code.
    #[error("configuration error: unknown store country code '{0}'")]
    InvalidCountry(String),
}
