//! Interfaces of the lookup services the assessment depends on.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{FailureReason, Rate};

/// Transient failure of a lookup service.
///
/// Never shown to customers as-is: the assessment entry points turn it into
/// [`AssessmentError::Unavailable`](crate::core::AssessmentError::Unavailable).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ServiceError {
    /// Connection failure or timeout.
    #[error("network error: {0}")]
    Network(String),
    /// The service answered with an error (e.g. member state unavailable).
    #[error("service error: {0}")]
    Api(String),
    /// The response could not be parsed.
    #[error("malformed response: {0}")]
    Parse(String),
}

/// A VATIN as confirmed by a registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatinRecord {
    /// ISO 3166-1 alpha-2 country the VATIN is registered in.
    pub country: String,
    /// Normalised VATIN (uppercase, no separators, with prefix).
    pub normalized: String,
    /// Registered company name, when the registry provides one.
    pub name: Option<String>,
}

/// Error from a [`VatinRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// Malformed or unregistered VATIN.
    #[error("invalid VATIN '{vatin}': {reason}")]
    Invalid { vatin: String, reason: String },
    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Validates and normalises VAT identification numbers.
pub trait VatinRegistry {
    fn validate(&self, vatin: &str) -> Result<VatinRecord, RegistryError>;
}

/// A rate proposed by an address or phone lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateQuote {
    pub rate: Rate,
    /// Country whose rate applies (may differ from the input for special territories).
    pub country: String,
    /// Name of the statutory VAT exception that applied, if any.
    pub exception: Option<String>,
}

/// Error from an [`AddressRateService`] or [`PhoneRateService`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RateError {
    /// The input does not determine a rate.
    #[error("indefinite rate: {0}")]
    Indefinite(String),
    /// The input is unusable (e.g. unknown country code).
    #[error("invalid rate lookup input: {0}")]
    Invalid(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Maps a billing address to a VAT rate.
pub trait AddressRateService {
    fn calculate_rate(
        &self,
        country_code: &str,
        postcode: &str,
        city: &str,
    ) -> Result<RateQuote, RateError>;
}

/// Maps a phone number to a VAT rate.
pub trait PhoneRateService {
    fn calculate_rate(&self, phone_number: &str, country_code: &str)
    -> Result<RateQuote, RateError>;
}

impl<T: VatinRegistry + ?Sized> VatinRegistry for &T {
    fn validate(&self, vatin: &str) -> Result<VatinRecord, RegistryError> {
        (**self).validate(vatin)
    }
}

impl<T: AddressRateService + ?Sized> AddressRateService for &T {
    fn calculate_rate(
        &self,
        country_code: &str,
        postcode: &str,
        city: &str,
    ) -> Result<RateQuote, RateError> {
        (**self).calculate_rate(country_code, postcode, city)
    }
}

impl<T: PhoneRateService + ?Sized> PhoneRateService for &T {
    fn calculate_rate(
        &self,
        phone_number: &str,
        country_code: &str,
    ) -> Result<RateQuote, RateError> {
        (**self).calculate_rate(phone_number, country_code)
    }
}

/// Error inside the assessment, before it reaches a public entry point.
///
/// `Service` is absorbed into
/// [`AssessmentError::Unavailable`](crate::core::AssessmentError::Unavailable)
/// by the address, user and submission resolvers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum LookupError {
    #[error(transparent)]
    Failed(#[from] FailureReason),
    #[error(transparent)]
    Service(#[from] ServiceError),
}
