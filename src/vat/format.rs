//! VATIN format rules and an offline registry built on them.

use std::fmt;

use super::service::{RegistryError, VatinRecord, VatinRegistry};

/// Error returned when a VATIN fails format validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VatinFormatError {
    /// The invalid input value.
    pub value: String,
    /// Why the value failed validation.
    pub reason: String,
}

impl fmt::Display for VatinFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid VATIN '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for VatinFormatError {}

impl From<VatinFormatError> for RegistryError {
    fn from(err: VatinFormatError) -> Self {
        Self::Invalid {
            vatin: err.value,
            reason: err.reason,
        }
    }
}

/// VAT prefixes accepted by the EU VIES system. Greece uses `EL`,
/// Northern Ireland `XI`.
pub const VATIN_PREFIXES: &[&str] = &[
    "AT", "BE", "BG", "CY", "CZ", "DE", "DK", "EE", "EL", "ES", "FI", "FR", "HR", "HU", "IE", "IT",
    "LT", "LU", "LV", "MT", "NL", "PL", "PT", "RO", "SE", "SI", "SK", "XI",
];

/// A syntactically valid VATIN split into prefix and number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedVatin {
    /// VAT prefix as written (`EL` for Greece).
    pub prefix: String,
    /// National part after the prefix.
    pub number: String,
}

impl ParsedVatin {
    /// ISO 3166-1 country of the VATIN.
    pub fn country(&self) -> &str {
        match self.prefix.as_str() {
            "EL" => "GR",
            "XI" => "GB",
            prefix => prefix,
        }
    }

    pub fn normalized(&self) -> String {
        format!("{}{}", self.prefix, self.number)
    }
}

/// Uppercase ASCII letters and drop whitespace, dots and dashes. Other
/// characters are kept so that validation rejects them.
pub fn normalize_vatin(vatin: &str) -> String {
    vatin
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '.' | '-'))
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Validate a VATIN by format (no network call).
///
/// The input must include the 2-letter prefix (e.g. "DE123456789").
/// Separators and case are ignored.
pub fn parse_vatin(vatin: &str) -> Result<ParsedVatin, VatinFormatError> {
    let normalized = normalize_vatin(vatin);
    let invalid = |reason: String| VatinFormatError {
        value: vatin.trim().to_string(),
        reason,
    };

    if !normalized.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(invalid("contains characters other than letters and digits".into()));
    }
    if normalized.len() < 4 {
        return Err(invalid("too short, must be at least 4 characters".into()));
    }

    let (prefix, number) = normalized.split_at(2);
    if !VATIN_PREFIXES.contains(&prefix) {
        return Err(invalid(format!("unknown country prefix '{prefix}'")));
    }
    if !number_matches(prefix, number) {
        return Err(invalid(format!("invalid format for country {prefix}")));
    }

    Ok(ParsedVatin {
        prefix: prefix.to_string(),
        number: number.to_string(),
    })
}

fn digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Per-country shape of the national part. Input is uppercase ASCII.
fn number_matches(prefix: &str, n: &str) -> bool {
    let len = n.len();
    match prefix {
        "AT" => len == 9 && n.starts_with('U') && digits(&n[1..]),
        "BE" => len == 10 && digits(n),
        "BG" => (9..=10).contains(&len) && digits(n),
        "CY" => len == 9 && digits(&n[..8]) && n.as_bytes()[8].is_ascii_alphabetic(),
        "CZ" => (8..=10).contains(&len) && digits(n),
        "DE" => len == 9 && digits(n) && !n.starts_with('0'),
        "DK" | "FI" | "HU" | "LU" | "MT" | "SI" => len == 8 && digits(n),
        "EE" | "EL" | "PT" | "XI" => len == 9 && digits(n),
        "ES" => len == 9,
        "FR" => len == 11 && digits(&n[2..]),
        "HR" | "IT" | "LV" => len == 11 && digits(n),
        "IE" => (8..=9).contains(&len),
        "LT" => (len == 9 || len == 12) && digits(n),
        "NL" => len == 12 && digits(&n[..9]) && n.as_bytes()[9] == b'B' && digits(&n[10..]),
        "PL" | "SK" => len == 10 && digits(n),
        "RO" => (2..=10).contains(&len) && digits(n),
        "SE" => len == 12 && digits(n),
        _ => false,
    }
}

/// Offline [`VatinRegistry`] that accepts every VATIN with a valid format.
///
/// It cannot tell whether a number is actually registered and never
/// returns a company name. Use the VIES registry for that.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatRegistry;

impl VatinRegistry for FormatRegistry {
    fn validate(&self, vatin: &str) -> Result<VatinRecord, RegistryError> {
        let parsed = parse_vatin(vatin)?;
        Ok(VatinRecord {
            country: parsed.country().to_string(),
            normalized: parsed.normalized(),
            name: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_de_vatin() {
        let parsed = parse_vatin("DE123456789").unwrap();
        assert_eq!(parsed.prefix, "DE");
        assert_eq!(parsed.number, "123456789");
        assert_eq!(parsed.country(), "DE");
    }

    #[test]
    fn separators_and_case_ignored() {
        let parsed = parse_vatin(" atu-1234.5678 ").unwrap();
        assert_eq!(parsed.normalized(), "ATU12345678");
    }

    #[test]
    fn greek_prefix_maps_to_iso() {
        let parsed = parse_vatin("EL123456789").unwrap();
        assert_eq!(parsed.country(), "GR");
        assert_eq!(parsed.normalized(), "EL123456789");
        assert!(parse_vatin("GR123456789").is_err());
    }

    #[test]
    fn northern_ireland_maps_to_gb() {
        assert_eq!(parse_vatin("XI123456789").unwrap().country(), "GB");
    }

    #[test]
    fn de_leading_zero_rejected() {
        assert!(parse_vatin("DE012345678").is_err());
    }

    #[test]
    fn nl_requires_b() {
        assert!(parse_vatin("NL123456789B01").is_ok());
        assert!(parse_vatin("NL123456789A01").is_err());
    }

    #[test]
    fn cy_requires_trailing_letter() {
        assert!(parse_vatin("CY12345678L").is_ok());
        assert!(parse_vatin("CY123456789").is_err());
    }

    #[test]
    fn non_ascii_rejected() {
        let err = parse_vatin("DE12345678é").unwrap_err();
        assert!(err.reason.contains("letters and digits"));
    }

    #[test]
    fn non_ascii_letter_with_ascii_uppercase_rejected() {
        // U+017F LATIN SMALL LETTER LONG S uppercases to 'S'
        assert_eq!(normalize_vatin("\u{17f}e123456789012"), "\u{17f}E123456789012");
        let err = parse_vatin("\u{17f}e123456789012").unwrap_err();
        assert!(err.reason.contains("letters and digits"));
        assert!(FormatRegistry.validate("\u{17f}e123456789012").is_err());
    }

    #[test]
    fn too_short_input() {
        assert!(parse_vatin("DE").is_err());
        assert!(parse_vatin("").is_err());
    }

    #[test]
    fn unknown_prefix() {
        let err = parse_vatin("XX12345678").unwrap_err();
        assert!(err.to_string().contains("unknown country prefix"));
    }

    #[test]
    fn registry_returns_record() {
        let record = FormatRegistry.validate("fr 12 345678901").unwrap();
        assert_eq!(record.country, "FR");
        assert_eq!(record.normalized, "FR12345678901");
        assert!(record.name.is_none());
    }

    #[test]
    fn registry_reports_invalid() {
        match FormatRegistry.validate("DE12345") {
            Err(RegistryError::Invalid { vatin, reason }) => {
                assert_eq!(vatin, "DE12345");
                assert!(reason.contains("DE"));
            }
            other => panic!("expected invalid, got {other:?}"),
        }
    }
}
