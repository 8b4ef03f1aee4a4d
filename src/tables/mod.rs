//! Built-in EU rate tables for address and phone lookups.
//!
//! These implement [`AddressRateService`](crate::vat::AddressRateService)
//! and [`PhoneRateService`](crate::vat::PhoneRateService) offline. Rates are
//! consumer rates: the member state's standard rate inside the EU VAT area,
//! zero outside it.

mod address;
mod phone;
mod rates;

pub use address::{AddressRateTable, TERRITORY_EXCEPTIONS, TerritoryException};
pub use phone::{
    AREA_CODE_EXCEPTIONS, AreaCodeException, ParsedPhoneNumber, PhoneRateTable,
    parse_phone_number,
};
pub use rates::{EU_STANDARD_RATES, consumer_rate, standard_rate, vat_area_country};
