//! VAT assessment: reverse charge or corroborated address/phone rate.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::{
    AssessmentError, FailureReason, Rate, StoreConfig, Submission, TEMPORARY_ERROR, TaxAddress,
    User, apply_rate,
};

use super::service::{AddressRateService, LookupError, PhoneRateService, VatinRegistry};
use super::strategy::{RateLookup, lookup_vat_by_city, lookup_vat_by_phone_number};
use super::vatin::{VatinOutcome, lookup_vat_by_vatin};

/// Number of agreeing rate signals required without reverse charge.
pub const VERIFICATIONS_NEEDED: u32 = 2;

/// Customer data an assessment is based on. Empty strings mean "not given".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatQuery<'a> {
    pub company: &'a str,
    pub city: &'a str,
    pub country_code: &'a str,
    pub postcode: &'a str,
    pub phone_number: &'a str,
    pub vatin: &'a str,
}

impl<'a> VatQuery<'a> {
    /// Read the query fields from an address, defaulting absent ones to `""`.
    pub fn from_address<A: TaxAddress + ?Sized>(address: &'a A) -> Self {
        Self {
            company: address.organisation().unwrap_or_default(),
            city: address.city().unwrap_or_default(),
            country_code: address.country_code().unwrap_or_default(),
            postcode: address.postcode().unwrap_or_default(),
            phone_number: address.phone_number().unwrap_or_default(),
            vatin: address.vatin().unwrap_or_default(),
        }
    }
}

/// Assesses the VAT rate for customers of one store.
///
/// Holds the store configuration and the three lookup services. All
/// lookups are blocking; the resolver keeps no state between calls.
///
/// ```
/// use vatmoss::core::*;
/// use vatmoss::vat::VatResolver;
/// use rust_decimal_macros::dec;
///
/// let resolver = VatResolver::with_rate_tables(StoreConfig::new("DE").unwrap());
/// let address = AddressBuilder::new("FR")
///     .city("Paris")
///     .postcode("75001")
///     .phone_number("+33 1 42 00 00 00")
///     .build();
/// assert_eq!(resolver.lookup_vat_for_address(&address).unwrap().as_decimal(), dec!(0.20));
/// ```
#[derive(Debug, Clone)]
pub struct VatResolver<R, A, P> {
    config: StoreConfig,
    registry: R,
    address_rates: A,
    phone_rates: P,
}

impl<R, A, P> VatResolver<R, A, P>
where
    R: VatinRegistry,
    A: AddressRateService,
    P: PhoneRateService,
{
    pub fn new(config: StoreConfig, registry: R, address_rates: A, phone_rates: P) -> Self {
        Self {
            config,
            registry,
            address_rates,
            phone_rates,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Resolve the rate for `query`.
    ///
    /// A valid foreign VATIN short-circuits to zero. Otherwise the address
    /// and phone strategies both have to produce a rate and the rates have
    /// to agree.
    pub fn lookup_vat(&self, query: &VatQuery<'_>) -> Result<Rate, LookupError> {
        if !query.vatin.is_empty() {
            match lookup_vat_by_vatin(
                &self.registry,
                &self.config,
                query.country_code,
                query.vatin,
                query.company,
            )? {
                VatinOutcome::ReverseCharge { rate, .. } => return Ok(rate),
                VatinOutcome::Invalid { vatin, reason } => {
                    return Err(FailureReason::InvalidVatin {
                        vatin,
                        company: query.company.to_string(),
                        reason,
                    }
                    .into());
                }
                VatinOutcome::SameCountryAsStore { .. } => {}
            }
        }

        let mut verifications = 0;
        let mut address_rate = None;
        let mut phone_rate = None;

        if !query.city.is_empty() && !query.country_code.is_empty() {
            if let RateLookup::Found(quote) = lookup_vat_by_city(
                &self.address_rates,
                query.country_code,
                query.postcode,
                query.city,
            )? {
                verifications += 1;
                address_rate = Some(quote.rate);
            }
        }

        if !query.phone_number.is_empty() {
            if let RateLookup::Found(quote) = lookup_vat_by_phone_number(
                &self.phone_rates,
                query.phone_number,
                query.country_code,
            )? {
                verifications += 1;
                phone_rate = Some(quote.rate);
            }
        }

        if verifications < VERIFICATIONS_NEEDED {
            return Err(FailureReason::InsufficientInformation {
                verifications,
                required: VERIFICATIONS_NEEDED,
            }
            .into());
        }

        match (address_rate, phone_rate) {
            (Some(address), Some(phone)) if address == phone => Ok(address),
            (Some(address), Some(phone)) => {
                Err(FailureReason::ConflictingRates { address, phone }.into())
            }
            _ => Err(FailureReason::InsufficientInformation {
                verifications,
                required: VERIFICATIONS_NEEDED,
            }
            .into()),
        }
    }

    /// Resolve the rate for an address.
    ///
    /// Service outages come back as [`AssessmentError::Unavailable`]; their
    /// cause is logged, not returned.
    pub fn lookup_vat_for_address<T>(&self, address: &T) -> Result<Rate, AssessmentError>
    where
        T: TaxAddress + ?Sized,
    {
        let query = VatQuery::from_address(address);
        match self.lookup_vat(&query) {
            Ok(rate) => {
                info!(country = %query.country_code, %rate, "VAT rate assessed");
                Ok(rate)
            }
            Err(LookupError::Failed(reason)) => {
                warn!(country = %query.country_code, %reason, "VAT assessment failed");
                Err(AssessmentError::Failed(reason))
            }
            Err(LookupError::Service(cause)) => {
                warn!(country = %query.country_code, error = %cause, "VAT assessment unavailable");
                Err(AssessmentError::Unavailable(TEMPORARY_ERROR.to_string()))
            }
        }
    }

    /// Resolve the rate for a customer account: the default shipping
    /// address if one is flagged, otherwise the first saved address.
    pub fn lookup_vat_for_user(&self, user: &User) -> Result<Rate, AssessmentError> {
        let address = user.tax_address().ok_or(FailureReason::NoAddress)?;
        self.lookup_vat_for_address(address)
    }

    /// Resolve the rate for the shipping address of a submission.
    pub fn lookup_vat_for_submission(
        &self,
        submission: &Submission,
    ) -> Result<Rate, AssessmentError> {
        let address = submission
            .shipping_address
            .as_ref()
            .ok_or(FailureReason::NoAddress)?;
        self.lookup_vat_for_address(address)
    }

    /// Resolve the rate for a submission and apply it to its lines and
    /// shipping charge. On error the submission is left untouched.
    pub fn apply_to(&self, submission: &mut Submission) -> Result<(), AssessmentError> {
        let rate = self.lookup_vat_for_submission(submission)?;
        apply_rate(submission, rate);
        debug!(total_tax = ?submission.total_tax(), "submission taxed");
        Ok(())
    }
}

#[cfg(feature = "tables")]
impl
    VatResolver<
        super::format::FormatRegistry,
        crate::tables::AddressRateTable,
        crate::tables::PhoneRateTable,
    >
{
    /// Resolver using the offline VATIN format registry and the built-in
    /// EU rate tables.
    pub fn with_rate_tables(config: StoreConfig) -> Self {
        Self::new(
            config,
            super::format::FormatRegistry,
            crate::tables::AddressRateTable::default(),
            crate::tables::PhoneRateTable::default(),
        )
    }
}
