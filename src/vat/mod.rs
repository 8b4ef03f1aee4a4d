//! VAT rate assessment for a checkout.
//!
//! A valid foreign VATIN grants reverse charge (zero rate). Without one, the
//! billing address and the phone number are looked up independently and
//! must agree on the rate.
//!
//! # Example
//!
//! ```ignore
//! use vatmoss::core::*;
//! use vatmoss::vat::*;
//!
//! let resolver = VatResolver::new(
//!     StoreConfig::from_env()?,
//!     ViesRegistry::new()?,
//!     my_address_service,
//!     my_phone_service,
//! );
//! let mut submission = checkout.submission();
//! resolver.apply_to(&mut submission)?;
//! ```

mod format;
mod resolver;
mod service;
mod strategy;
mod vatin;
#[cfg(feature = "vies")]
mod vies;

pub use format::{
    FormatRegistry, ParsedVatin, VATIN_PREFIXES, VatinFormatError, normalize_vatin, parse_vatin,
};
pub use resolver::{VERIFICATIONS_NEEDED, VatQuery, VatResolver};
pub use service::{
    AddressRateService, LookupError, PhoneRateService, RateError, RateQuote, RegistryError,
    ServiceError, VatinRecord, VatinRegistry,
};
pub use strategy::{RateLookup, lookup_vat_by_city, lookup_vat_by_phone_number};
pub use vatin::{VatinOutcome, lookup_vat_by_vatin};
#[cfg(feature = "vies")]
pub use vies::{VIES_URL, ViesRegistry, ViesResult};
