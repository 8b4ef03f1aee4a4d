//! Phone-number-based rate lookup.

use crate::core::Rate;
use crate::core::countries::normalize_country_code;
use crate::vat::{PhoneRateService, RateError, RateQuote};

use super::rates::consumer_rate;

/// International calling codes and the countries sharing them.
static CALLING_CODES: &[(&str, &[&str])] = &[
    ("1", &["US", "CA", "PR", "VI", "GU", "AS", "MP"]),
    ("7", &["RU", "KZ"]),
    ("20", &["EG"]),
    ("27", &["ZA"]),
    ("30", &["GR"]),
    ("31", &["NL"]),
    ("32", &["BE"]),
    ("33", &["FR"]),
    ("34", &["ES"]),
    ("36", &["HU"]),
    ("39", &["IT", "VA"]),
    ("40", &["RO"]),
    ("41", &["CH"]),
    ("43", &["AT"]),
    ("44", &["GB", "GG", "JE", "IM"]),
    ("45", &["DK"]),
    ("46", &["SE"]),
    ("47", &["NO", "SJ"]),
    ("48", &["PL"]),
    ("49", &["DE"]),
    ("52", &["MX"]),
    ("55", &["BR"]),
    ("61", &["AU"]),
    ("64", &["NZ"]),
    ("65", &["SG"]),
    ("81", &["JP"]),
    ("82", &["KR"]),
    ("86", &["CN"]),
    ("90", &["TR"]),
    ("91", &["IN"]),
    ("350", &["GI"]),
    ("351", &["PT"]),
    ("352", &["LU"]),
    ("353", &["IE"]),
    ("354", &["IS"]),
    ("356", &["MT"]),
    ("357", &["CY"]),
    ("358", &["FI", "AX"]),
    ("359", &["BG"]),
    ("370", &["LT"]),
    ("371", &["LV"]),
    ("372", &["EE"]),
    ("377", &["MC"]),
    ("378", &["SM"]),
    ("380", &["UA"]),
    ("381", &["RS"]),
    ("385", &["HR"]),
    ("386", &["SI"]),
    ("420", &["CZ"]),
    ("421", &["SK"]),
    ("423", &["LI"]),
    ("971", &["AE"]),
    ("972", &["IL"]),
];

/// Area codes (national significant number prefixes) with their own rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaCodeException {
    pub country: &'static str,
    pub prefix: &'static str,
    pub name: &'static str,
    /// Country whose rate applies, `None` when outside the EU VAT area.
    pub rate_country: Option<&'static str>,
    /// The area code also covers places outside the territory.
    pub shared: bool,
}

pub static AREA_CODE_EXCEPTIONS: &[AreaCodeException] = &[
    AreaCodeException {
        country: "DE",
        prefix: "4725",
        name: "Heligoland",
        rate_country: None,
        shared: false,
    },
    AreaCodeException {
        country: "DE",
        prefix: "7734",
        name: "Büsingen am Hochrhein",
        rate_country: None,
        shared: true,
    },
    AreaCodeException {
        country: "ES",
        prefix: "928",
        name: "Canary Islands",
        rate_country: None,
        shared: false,
    },
    AreaCodeException {
        country: "ES",
        prefix: "922",
        name: "Canary Islands",
        rate_country: None,
        shared: false,
    },
    AreaCodeException {
        country: "FI",
        prefix: "18",
        name: "Åland Islands",
        rate_country: None,
        shared: false,
    },
    AreaCodeException {
        country: "IT",
        prefix: "0342",
        name: "Livigno",
        rate_country: None,
        shared: true,
    },
];

/// A phone number split into calling code and national number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPhoneNumber {
    pub calling_code: &'static str,
    pub countries: &'static [&'static str],
    /// Digits after the calling code. A `(0)` is dropped only where it is a
    /// trunk prefix.
    pub national: String,
}

/// Calling codes whose national numbers keep their leading `0` after the
/// country code. A `(0)` in these numbers is a digit, not a trunk prefix.
static LEADING_ZERO_CODES: &[&str] = &["39", "378"];

/// Drop separators. `(0)` is removed as a trunk prefix or kept as `0`.
fn compact(raw: &str, keep_zero: bool) -> String {
    raw.replace("(0)", if keep_zero { "0" } else { "" })
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '.' | '/' | '(' | ')'))
        .collect()
}

fn strip_international_prefix(compact: &str) -> Option<&str> {
    compact
        .strip_prefix('+')
        .or_else(|| compact.strip_prefix("00"))
}

/// Parse a number in international format (`+` or `00` prefix).
///
/// Spaces, dashes, dots, slashes and parentheses are ignored. A `(0)` trunk
/// prefix is dropped, except after calling codes where the leading zero
/// belongs to the number (Italy, San Marino). Returns `Ok(None)` for numbers
/// without an international prefix or with an unknown calling code; `Err`
/// for numbers with other characters.
pub fn parse_phone_number(raw: &str) -> Result<Option<ParsedPhoneNumber>, RateError> {
    let stripped = compact(raw, false);
    let Some(digits) = strip_international_prefix(&stripped) else {
        return Ok(None);
    };

    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RateError::Invalid(format!(
            "phone number '{}' contains characters other than digits",
            raw.trim()
        )));
    }

    // Calling codes are prefix-free, so the first match is the only one.
    let found = (1..=3)
        .filter(|&len| len < digits.len())
        .find_map(|len| {
            CALLING_CODES
                .iter()
                .find(|(code, _)| *code == &digits[..len])
        });
    let Some(&(code, countries)) = found else {
        return Ok(None);
    };

    let national = if LEADING_ZERO_CODES.contains(&code) {
        let kept = compact(raw, true);
        strip_international_prefix(&kept)
            .and_then(|d| d.get(code.len()..))
            .unwrap_or_default()
            .to_string()
    } else {
        digits[code.len()..].to_string()
    };

    Ok(Some(ParsedPhoneNumber {
        calling_code: code,
        countries,
        national,
    }))
}

/// [`PhoneRateService`] that derives the country from the calling code.
///
/// The supplied country settles calling codes shared by several countries.
/// Numbers without an international prefix, with an unknown calling code,
/// or in an area code shared with a special territory are indefinite.
#[derive(Debug, Clone, Copy)]
pub struct PhoneRateTable {
    exceptions: &'static [AreaCodeException],
}

impl Default for PhoneRateTable {
    fn default() -> Self {
        Self {
            exceptions: AREA_CODE_EXCEPTIONS,
        }
    }
}

impl PhoneRateTable {
    pub fn with_exceptions(exceptions: &'static [AreaCodeException]) -> Self {
        Self { exceptions }
    }
}

impl PhoneRateService for PhoneRateTable {
    fn calculate_rate(
        &self,
        phone_number: &str,
        country_code: &str,
    ) -> Result<RateQuote, RateError> {
        let Some(parsed) = parse_phone_number(phone_number)? else {
            return Err(RateError::Indefinite(format!(
                "phone number '{}' is not in international format or has an unknown calling code",
                phone_number.trim()
            )));
        };

        let supplied = normalize_country_code(country_code);
        let country = match parsed.countries {
            [only] => *only,
            shared => *shared.iter().find(|c| **c == supplied).ok_or_else(|| {
                RateError::Indefinite(format!(
                    "calling code +{} is shared by {}",
                    parsed.calling_code,
                    shared.join(", ")
                ))
            })?,
        };

        let exception = self
            .exceptions
            .iter()
            .find(|e| e.country == country && parsed.national.starts_with(e.prefix));

        match exception {
            Some(e) if e.shared => Err(RateError::Indefinite(format!(
                "area code {} covers {} and other places",
                e.prefix, e.name
            ))),
            Some(e) => Ok(RateQuote {
                rate: e.rate_country.map_or(Rate::ZERO, consumer_rate),
                country: e.rate_country.unwrap_or(country).to_string(),
                exception: Some(e.name.to_string()),
            }),
            None => Ok(RateQuote {
                rate: consumer_rate(country),
                country: country.to_string(),
                exception: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rate(phone: &str, country: &str) -> Result<Rate, RateError> {
        PhoneRateTable::default()
            .calculate_rate(phone, country)
            .map(|q| q.rate)
    }

    #[test]
    fn calling_codes_are_prefix_free() {
        for (a, _) in CALLING_CODES {
            for (b, _) in CALLING_CODES {
                if a != b {
                    assert!(!b.starts_with(a), "+{a} is a prefix of +{b}");
                }
            }
        }
    }

    #[test]
    fn parses_common_formats() {
        let parsed = parse_phone_number("+49 (0)30 123-456").unwrap().unwrap();
        assert_eq!(parsed.calling_code, "49");
        assert_eq!(parsed.national, "30123456");

        let parsed = parse_phone_number("0043 1 5123456").unwrap().unwrap();
        assert_eq!(parsed.calling_code, "43");

        let parsed = parse_phone_number("+358 18 12345").unwrap().unwrap();
        assert_eq!(parsed.calling_code, "358");
        assert_eq!(parsed.national, "1812345");
    }

    #[test]
    fn national_format_is_not_parsed() {
        assert_eq!(parse_phone_number("030 1234567").unwrap(), None);
        assert!(matches!(rate("030 1234567", "DE"), Err(RateError::Indefinite(_))));
    }

    #[test]
    fn letters_are_invalid() {
        assert!(matches!(
            parse_phone_number("+49 30 CALLME"),
            Err(RateError::Invalid(_))
        ));
    }

    #[test]
    fn rate_follows_calling_code() {
        assert_eq!(rate("+49 30 1234567", "DE").unwrap(), Rate(dec!(0.19)));
        assert_eq!(rate("+33 1 42 00 00 00", "FR").unwrap(), Rate(dec!(0.20)));
        // the phone signal is independent of the supplied country
        assert_eq!(rate("+43 1 5123456", "DE").unwrap(), Rate(dec!(0.20)));
    }

    #[test]
    fn non_eu_number_is_zero() {
        assert_eq!(rate("+41 44 123 45 67", "CH").unwrap(), Rate::ZERO);
    }

    #[test]
    fn shared_code_uses_supplied_country() {
        assert_eq!(rate("+1 212 555 0100", "US").unwrap(), Rate::ZERO);
        assert_eq!(rate("+39 06 1234567", "IT").unwrap(), Rate(dec!(0.22)));
        assert!(matches!(rate("+39 06 1234567", "DE"), Err(RateError::Indefinite(_))));
    }

    #[test]
    fn heligoland_area_code() {
        let quote = PhoneRateTable::default()
            .calculate_rate("+49 4725 1234", "DE")
            .unwrap();
        assert_eq!(quote.rate, Rate::ZERO);
        assert_eq!(quote.exception.as_deref(), Some("Heligoland"));
    }

    #[test]
    fn aland_area_code() {
        assert_eq!(rate("+358 18 12345", "FI").unwrap(), Rate::ZERO);
        assert_eq!(rate("+358 9 1234567", "FI").unwrap(), Rate(dec!(0.255)));
    }

    #[test]
    fn italian_leading_zero_is_kept() {
        let parsed = parse_phone_number("+39 (0)342 123456").unwrap().unwrap();
        assert_eq!(parsed.calling_code, "39");
        assert_eq!(parsed.national, "0342123456");
        assert!(matches!(rate("+39 (0)342 123456", "IT"), Err(RateError::Indefinite(_))));

        let parsed = parse_phone_number("+378 (0)549 123456").unwrap().unwrap();
        assert_eq!(parsed.national, "0549123456");
    }

    #[test]
    fn trunk_zero_still_dropped_elsewhere() {
        let parsed = parse_phone_number("+44 (0)20 7946 0000").unwrap().unwrap();
        assert_eq!(parsed.national, "2079460000");
    }

    #[test]
    fn shared_area_code_is_indefinite() {
        assert!(matches!(rate("+49 7734 1234", "DE"), Err(RateError::Indefinite(_))));
    }

    #[test]
    fn unknown_calling_code_is_indefinite() {
        assert!(matches!(rate("+999 1234567", "DE"), Err(RateError::Indefinite(_))));
    }
}
