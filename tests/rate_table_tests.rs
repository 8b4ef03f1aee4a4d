#![cfg(feature = "tables")]

use rust_decimal_macros::dec;
use vatmoss::core::Rate;
use vatmoss::tables::*;
use vatmoss::vat::{AddressRateService, PhoneRateService, RateError};

fn rate(value: rust_decimal::Decimal) -> Rate {
    Rate::new(value).unwrap()
}

// ---------------------------------------------------------------------------
// Standard rates
// ---------------------------------------------------------------------------

#[test]
fn every_eu_rate_is_between_15_and_27_percent() {
    for (code, r) in EU_STANDARD_RATES {
        let d = r.as_decimal();
        assert!(d >= dec!(0.15) && d <= dec!(0.27), "{code}: {d}");
    }
}

#[test]
fn consumer_rate_outside_vat_area() {
    for code in ["US", "CH", "NO", "GB", "JP"] {
        assert_eq!(consumer_rate(code), Rate::ZERO, "{code}");
    }
}

#[test]
fn monaco_belongs_to_french_vat_area() {
    assert_eq!(vat_area_country("MC"), "FR");
    assert_eq!(vat_area_country("DE"), "DE");
    assert_eq!(consumer_rate("MC"), rate(dec!(0.20)));
}

// ---------------------------------------------------------------------------
// Address table
// ---------------------------------------------------------------------------

#[test]
fn address_lookup_normalises_input() {
    let quote = AddressRateTable::default()
        .calculate_rate(" nl ", "1012 AB", "  Amsterdam ")
        .unwrap();
    assert_eq!(quote.rate, rate(dec!(0.21)));
    assert_eq!(quote.country, "NL");
    assert_eq!(quote.exception, None);
}

#[test]
fn mittelberg_by_postcode_and_city() {
    let quote = AddressRateTable::default()
        .calculate_rate("AT", "6991", "Riezlern")
        .unwrap();
    assert_eq!(quote.rate, rate(dec!(0.19)));
    assert_eq!(quote.exception.as_deref(), Some("Mittelberg"));
}

#[test]
fn aland_by_postcode() {
    let table = AddressRateTable::default();
    assert_eq!(
        table.calculate_rate("FI", "22100", "Mariehamn").unwrap().rate,
        Rate::ZERO
    );
    assert_eq!(
        table.calculate_rate("FI", "00100", "Helsinki").unwrap().rate,
        rate(dec!(0.255))
    );
}

#[test]
fn ceuta_and_melilla() {
    let table = AddressRateTable::default();
    assert_eq!(table.calculate_rate("ES", "51001", "Ceuta").unwrap().rate, Rate::ZERO);
    assert_eq!(table.calculate_rate("ES", "52001", "Melilla").unwrap().rate, Rate::ZERO);
}

#[test]
fn campione_with_other_city_is_indefinite() {
    let err = AddressRateTable::default()
        .calculate_rate("IT", "22061", "Como")
        .unwrap_err();
    assert!(matches!(err, RateError::Indefinite(_)));
}

#[test]
fn every_exception_matches_itself() {
    let table = AddressRateTable::default();
    for e in TERRITORY_EXCEPTIONS {
        let postcode = format!("{}000", e.postcodes[0]);
        let postcode = &postcode[..postcode.len().min(5)];
        let city = e.cities.first().copied().unwrap_or("somewhere");
        let quote = table.calculate_rate(e.country, postcode, city).unwrap();
        assert_eq!(quote.exception.as_deref(), Some(e.name), "{}", e.name);
    }
}

// ---------------------------------------------------------------------------
// Phone table
// ---------------------------------------------------------------------------

#[test]
fn phone_prefix_formats() {
    let table = PhoneRateTable::default();
    for number in ["+43 1 5123456", "0043 1 5123456", "+43 (0)1 512-34-56", "+43/1/5123456"] {
        assert_eq!(
            table.calculate_rate(number, "AT").unwrap().rate,
            rate(dec!(0.20)),
            "{number}"
        );
    }
}

#[test]
fn canary_islands_area_codes() {
    let table = PhoneRateTable::default();
    assert_eq!(table.calculate_rate("+34 928 123 456", "ES").unwrap().rate, Rate::ZERO);
    assert_eq!(table.calculate_rate("+34 922 123 456", "ES").unwrap().rate, Rate::ZERO);
    assert_eq!(
        table.calculate_rate("+34 91 123 45 67", "ES").unwrap().rate,
        rate(dec!(0.21))
    );
}

#[test]
fn uk_number_is_zero_rated() {
    let quote = PhoneRateTable::default()
        .calculate_rate("+44 20 7946 0000", "GB")
        .unwrap();
    assert_eq!(quote.rate, Rate::ZERO);
    assert_eq!(quote.country, "GB");
}

#[test]
fn shared_uk_code_needs_supplied_country() {
    let err = PhoneRateTable::default()
        .calculate_rate("+44 20 7946 0000", "FR")
        .unwrap_err();
    assert!(matches!(err, RateError::Indefinite(_)));
}

#[test]
fn parse_rejects_bare_prefix() {
    assert_eq!(parse_phone_number("+").unwrap(), None);
    assert_eq!(parse_phone_number("+49").unwrap(), None);
}

#[test]
fn custom_area_code_exceptions() {
    static NONE: &[AreaCodeException] = &[];
    let quote = PhoneRateTable::with_exceptions(NONE)
        .calculate_rate("+49 4725 1234", "DE")
        .unwrap();
    assert_eq!(quote.rate, rate(dec!(0.19)));
}
