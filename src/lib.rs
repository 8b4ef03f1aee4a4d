//! # vatmoss
//!
//! EU VAT assessment for e-commerce checkouts: decide whether reverse charge
//! applies, otherwise corroborate the rate from the billing address and the
//! phone number, then apply it to the basket and the shipping charge.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! Tax amounts are rounded per line to two digits with round-half-even.
//!
//! ## Quick Start
//!
//! ```rust
//! use vatmoss::core::*;
//! use vatmoss::vat::VatResolver;
//! use rust_decimal_macros::dec;
//!
//! let resolver = VatResolver::with_rate_tables(StoreConfig::new("DE").unwrap());
//!
//! let mut submission = SubmissionBuilder::new()
//!     .add_line(LineBuilder::new("ebook", dec!(10.00), 3).build())
//!     .shipping(dec!(5.00))
//!     .shipping_address(
//!         AddressBuilder::new("AT")
//!             .city("Wien")
//!             .postcode("1010")
//!             .phone_number("+43 1 5123456")
//!             .build(),
//!     )
//!     .build()
//!     .unwrap();
//!
//! resolver.apply_to(&mut submission).unwrap();
//! assert_eq!(submission.basket[0].unit_tax, Some(dec!(2.00)));
//! assert_eq!(submission.shipping_charge.tax, Some(dec!(1.00)));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `tables` (default) | Offline EU rate tables for address and phone lookups |
//! | `vies` | VATIN registry backed by the EU VIES API (blocking) |
//! | `all` | Everything |

pub mod core;

pub mod vat;

#[cfg(feature = "tables")]
pub mod tables;

// Re-export core types at crate root for convenience
pub use crate::core::*;
