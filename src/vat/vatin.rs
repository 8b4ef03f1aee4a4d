//! Reverse-charge decision from a VATIN.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{FailureReason, Rate, StoreConfig};

use super::service::{LookupError, RegistryError, VatinRecord, VatinRegistry};

/// Outcome of checking a VATIN for reverse charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VatinOutcome {
    /// Valid foreign VATIN: the sale is zero-rated.
    ReverseCharge { rate: Rate, record: VatinRecord },
    /// Valid VATIN from the store's own country. Reverse charge does not
    /// apply; the rate has to be assessed the standard way.
    SameCountryAsStore { vatin: String, country: String },
    /// The registry rejected the VATIN.
    Invalid { vatin: String, reason: String },
}

/// Decide whether a VATIN grants reverse charge.
///
/// A VATIN registered in another country than `country_code` is a
/// [`FailureReason::CountryMismatch`]. Registry outages come back as
/// [`LookupError::Service`].
pub fn lookup_vat_by_vatin<R>(
    registry: &R,
    config: &StoreConfig,
    country_code: &str,
    vatin: &str,
    company: &str,
) -> Result<VatinOutcome, LookupError>
where
    R: VatinRegistry + ?Sized,
{
    let record = match registry.validate(vatin) {
        Ok(record) => record,
        Err(RegistryError::Invalid { vatin, reason }) => {
            debug!(%vatin, %reason, "VATIN rejected by registry");
            return Ok(VatinOutcome::Invalid { vatin, reason });
        }
        Err(RegistryError::Service(err)) => return Err(err.into()),
    };

    if !record.country.eq_ignore_ascii_case(country_code.trim()) {
        return Err(FailureReason::CountryMismatch {
            vatin: vatin.to_string(),
            registered_country: record.country,
            country: country_code.to_string(),
            company: company.to_string(),
        }
        .into());
    }

    if config.is_store_country(&record.country) {
        debug!(vatin = %record.normalized, "VATIN from store country, no reverse charge");
        return Ok(VatinOutcome::SameCountryAsStore {
            vatin: record.normalized,
            country: record.country,
        });
    }

    debug!(vatin = %record.normalized, country = %record.country, "reverse charge applies");
    Ok(VatinOutcome::ReverseCharge {
        rate: Rate::ZERO,
        record,
    })
}
