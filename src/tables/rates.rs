//! Standard VAT rates of the EU member states.

use rust_decimal_macros::dec;

use crate::core::{Rate, is_eu_member};

/// Standard VAT rate per EU member state, sorted by country code.
///
/// Rates in force from 1 January 2025 (Finland 25.5 %, Slovakia 23 %,
/// Estonia 24 %) and Romania's increase to 21 % from 1 August 2025.
pub static EU_STANDARD_RATES: &[(&str, Rate)] = &[
    ("AT", Rate(dec!(0.20))),
    ("BE", Rate(dec!(0.21))),
    ("BG", Rate(dec!(0.20))),
    ("CY", Rate(dec!(0.19))),
    ("CZ", Rate(dec!(0.21))),
    ("DE", Rate(dec!(0.19))),
    ("DK", Rate(dec!(0.25))),
    ("EE", Rate(dec!(0.24))),
    ("ES", Rate(dec!(0.21))),
    ("FI", Rate(dec!(0.255))),
    ("FR", Rate(dec!(0.20))),
    ("GR", Rate(dec!(0.24))),
    ("HR", Rate(dec!(0.25))),
    ("HU", Rate(dec!(0.27))),
    ("IE", Rate(dec!(0.23))),
    ("IT", Rate(dec!(0.22))),
    ("LT", Rate(dec!(0.21))),
    ("LU", Rate(dec!(0.17))),
    ("LV", Rate(dec!(0.21))),
    ("MT", Rate(dec!(0.18))),
    ("NL", Rate(dec!(0.21))),
    ("PL", Rate(dec!(0.23))),
    ("PT", Rate(dec!(0.23))),
    ("RO", Rate(dec!(0.21))),
    ("SE", Rate(dec!(0.25))),
    ("SI", Rate(dec!(0.22))),
    ("SK", Rate(dec!(0.23))),
];

/// Territories outside the EU that belong to a member state's VAT area.
static VAT_AREA_TERRITORIES: &[(&str, &str)] = &[("MC", "FR")];

/// The country whose VAT rules apply to `country_code`.
pub fn vat_area_country(country_code: &str) -> &str {
    VAT_AREA_TERRITORIES
        .iter()
        .find(|(territory, _)| *territory == country_code)
        .map_or(country_code, |(_, country)| *country)
}

/// Standard rate of an EU member state, `None` for any other country.
pub fn standard_rate(country_code: &str) -> Option<Rate> {
    EU_STANDARD_RATES
        .binary_search_by(|(code, _)| code.cmp(&country_code))
        .ok()
        .map(|idx| EU_STANDARD_RATES[idx].1)
}

/// Rate charged to a consumer in `country_code`: the standard rate inside
/// the EU VAT area, zero outside it.
pub fn consumer_rate(country_code: &str) -> Rate {
    let country = vat_area_country(country_code);
    if !is_eu_member(country) {
        return Rate::ZERO;
    }
    standard_rate(country).unwrap_or(Rate::ZERO)
}
