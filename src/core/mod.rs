//! Core checkout types, configuration, errors, and tax arithmetic.
//!
//! Money amounts are [`rust_decimal::Decimal`] values; every computed tax
//! amount is quantized to the minor unit with round-half-even.

mod builder;
mod config;
pub mod countries;
mod error;
mod money;
mod types;

pub use builder::*;
pub use config::*;
pub use countries::{is_eu_member, is_known_country_code};
pub use error::*;
pub use money::*;
pub use types::*;
