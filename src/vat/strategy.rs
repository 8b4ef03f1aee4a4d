//! Address- and phone-based rate strategies.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{FailureReason, Rate};

use super::service::{
    AddressRateService, LookupError, PhoneRateService, RateError, RateQuote,
};

/// Outcome of one rate strategy.
///
/// `Indefinite` means the strategy ran and could not decide, which is
/// different from a strategy that was skipped for lack of input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateLookup {
    Found(RateQuote),
    Indefinite(String),
}

impl RateLookup {
    pub fn rate(&self) -> Option<Rate> {
        match self {
            Self::Found(quote) => Some(quote.rate),
            Self::Indefinite(_) => None,
        }
    }
}

fn into_lookup(result: Result<RateQuote, RateError>) -> Result<RateLookup, LookupError> {
    match result {
        Ok(quote) => Ok(RateLookup::Found(quote)),
        Err(RateError::Indefinite(why)) => Ok(RateLookup::Indefinite(why)),
        Err(RateError::Invalid(msg)) => Err(FailureReason::InvalidInput(msg).into()),
        Err(RateError::Service(err)) => Err(err.into()),
    }
}

/// Rate from the billing address.
pub fn lookup_vat_by_city<S>(
    service: &S,
    country_code: &str,
    postcode: &str,
    city: &str,
) -> Result<RateLookup, LookupError>
where
    S: AddressRateService + ?Sized,
{
    let lookup = into_lookup(service.calculate_rate(country_code, postcode, city))?;
    debug!(%country_code, %postcode, %city, ?lookup, "address rate lookup");
    Ok(lookup)
}

/// Rate from the phone number.
pub fn lookup_vat_by_phone_number<S>(
    service: &S,
    phone_number: &str,
    country_code: &str,
) -> Result<RateLookup, LookupError>
where
    S: PhoneRateService + ?Sized,
{
    let lookup = into_lookup(service.calculate_rate(phone_number, country_code))?;
    debug!(%country_code, ?lookup, "phone rate lookup");
    Ok(lookup)
}
