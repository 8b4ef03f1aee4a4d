//! Address-based rate lookup with special-territory exceptions.

use crate::core::Rate;
use crate::core::countries::{is_known_country_code, normalize_country_code};
use crate::vat::{AddressRateService, RateError, RateQuote};

use super::rates::consumer_rate;

/// An area that is taxed differently from the rest of its country.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerritoryException {
    /// Country the area belongs to.
    pub country: &'static str,
    /// Postcode prefixes of the area.
    pub postcodes: &'static [&'static str],
    /// Lowercase city names of the area. Empty when the postcode alone
    /// identifies the area.
    pub cities: &'static [&'static str],
    pub name: &'static str,
    /// Country whose rate applies, `None` when the area is outside the EU VAT area.
    pub rate_country: Option<&'static str>,
}

/// Statutory exceptions to the country rate.
pub static TERRITORY_EXCEPTIONS: &[TerritoryException] = &[
    TerritoryException {
        country: "AT",
        postcodes: &["6691"],
        cities: &["jungholz"],
        name: "Jungholz",
        rate_country: Some("DE"),
    },
    TerritoryException {
        country: "AT",
        postcodes: &["6991", "6992", "6993"],
        cities: &["mittelberg", "hirschegg", "riezlern"],
        name: "Mittelberg",
        rate_country: Some("DE"),
    },
    TerritoryException {
        country: "DE",
        postcodes: &["27498"],
        cities: &["helgoland", "heligoland"],
        name: "Heligoland",
        rate_country: None,
    },
    TerritoryException {
        country: "DE",
        postcodes: &["78266"],
        cities: &["büsingen am hochrhein", "busingen am hochrhein", "büsingen", "busingen"],
        name: "Büsingen am Hochrhein",
        rate_country: None,
    },
    TerritoryException {
        country: "ES",
        postcodes: &["35", "38"],
        cities: &[],
        name: "Canary Islands",
        rate_country: None,
    },
    TerritoryException {
        country: "ES",
        postcodes: &["51"],
        cities: &[],
        name: "Ceuta",
        rate_country: None,
    },
    TerritoryException {
        country: "ES",
        postcodes: &["52"],
        cities: &[],
        name: "Melilla",
        rate_country: None,
    },
    TerritoryException {
        country: "FI",
        postcodes: &["22"],
        cities: &[],
        name: "Åland Islands",
        rate_country: None,
    },
    TerritoryException {
        country: "GR",
        postcodes: &["63086", "63087"],
        cities: &["mount athos", "agion oros", "athos"],
        name: "Mount Athos",
        rate_country: None,
    },
    TerritoryException {
        country: "IT",
        postcodes: &["22060", "22061"],
        cities: &["campione d'italia", "campione"],
        name: "Campione d'Italia",
        rate_country: None,
    },
    TerritoryException {
        country: "IT",
        postcodes: &["23030", "23041"],
        cities: &["livigno"],
        name: "Livigno",
        rate_country: None,
    },
];

enum Match {
    Hit,
    Miss,
    Ambiguous,
}

impl TerritoryException {
    /// Compare a normalised postcode and city against this exception.
    fn matches(&self, postcode: &str, city: &str) -> Match {
        let postcode_hit =
            !postcode.is_empty() && self.postcodes.iter().any(|p| postcode.starts_with(p));

        if self.cities.is_empty() {
            return match (postcode.is_empty(), postcode_hit) {
                (true, _) => Match::Ambiguous,
                (false, true) => Match::Hit,
                (false, false) => Match::Miss,
            };
        }

        let city_hit = self.cities.iter().any(|c| *c == city);
        match (postcode_hit, city_hit) {
            (true, true) => Match::Hit,
            (false, false) => Match::Miss,
            _ => Match::Ambiguous,
        }
    }
}

/// [`AddressRateService`] backed by [`TERRITORY_EXCEPTIONS`] and the EU
/// standard rates.
///
/// An address that matches an exception only partly (postcode of the area
/// but another city, or the area's city without a postcode) is indefinite.
#[derive(Debug, Clone, Copy)]
pub struct AddressRateTable {
    exceptions: &'static [TerritoryException],
}

impl Default for AddressRateTable {
    fn default() -> Self {
        Self {
            exceptions: TERRITORY_EXCEPTIONS,
        }
    }
}

impl AddressRateTable {
    /// Table with a custom exception list.
    pub fn with_exceptions(exceptions: &'static [TerritoryException]) -> Self {
        Self { exceptions }
    }
}

impl AddressRateService for AddressRateTable {
    fn calculate_rate(
        &self,
        country_code: &str,
        postcode: &str,
        city: &str,
    ) -> Result<RateQuote, RateError> {
        let country = normalize_country_code(country_code);
        if !is_known_country_code(&country) {
            return Err(RateError::Invalid(format!(
                "unknown country code '{country_code}'"
            )));
        }

        let postcode: String = postcode
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_uppercase)
            .collect();
        let city = city.trim().to_lowercase();

        for exception in self.exceptions.iter().filter(|e| e.country == country) {
            match exception.matches(&postcode, &city) {
                Match::Miss => continue,
                Match::Ambiguous => {
                    return Err(RateError::Indefinite(format!(
                        "address may lie in {}; postcode and city do not agree",
                        exception.name
                    )));
                }
                Match::Hit => {
                    let rate = exception.rate_country.map_or(Rate::ZERO, consumer_rate);
                    let country = exception.rate_country.unwrap_or(exception.country);
                    return Ok(RateQuote {
                        rate,
                        country: country.to_string(),
                        exception: Some(exception.name.to_string()),
                    });
                }
            }
        }

        Ok(RateQuote {
            rate: consumer_rate(&country),
            country,
            exception: None,
        })
    }
}
