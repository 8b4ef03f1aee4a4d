//! Property-based tests for tax application and rate corroboration.
//!
//! Run with: `cargo test --test proptest_tests`

use proptest::prelude::*;
use rust_decimal::Decimal;
use vatmoss::core::*;
use vatmoss::vat::*;

/// Net amount between 0.00 and 10,000.00.
fn money() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Rate between 0.000 and 0.300.
fn rate() -> impl Strategy<Value = Rate> {
    (0i64..=300).prop_map(|permille| Rate::new(Decimal::new(permille, 3)).unwrap())
}

struct Fixed(Rate);

impl AddressRateService for Fixed {
    fn calculate_rate(&self, _: &str, _: &str, _: &str) -> Result<RateQuote, RateError> {
        Ok(RateQuote {
            rate: self.0,
            country: "AT".into(),
            exception: None,
        })
    }
}

impl PhoneRateService for Fixed {
    fn calculate_rate(&self, _: &str, _: &str) -> Result<RateQuote, RateError> {
        Ok(RateQuote {
            rate: self.0,
            country: "AT".into(),
            exception: None,
        })
    }
}

fn query<'a>() -> VatQuery<'a> {
    VatQuery {
        city: "Wien",
        country_code: "AT",
        postcode: "1010",
        phone_number: "+43 1 5123456",
        ..VatQuery::default()
    }
}

proptest! {
    #[test]
    fn unit_tax_is_rounded_line_tax_per_unit(
        price in money(),
        quantity in 1u32..50,
        r in rate(),
    ) {
        let mut sub = SubmissionBuilder::new()
            .add_line(LineBuilder::new("p", price, quantity).build())
            .build()
            .unwrap();
        apply_rate(&mut sub, r);

        let line_tax = round2(r.as_decimal() * price * Decimal::from(quantity));
        let expected = round2(line_tax / Decimal::from(quantity));
        let unit_tax = sub.basket[0].unit_tax.unwrap();
        prop_assert_eq!(unit_tax, expected);
        prop_assert_eq!(unit_tax.scale(), 2);
        prop_assert!(unit_tax >= Decimal::ZERO);
    }

    #[test]
    fn charged_tax_is_within_half_cent_per_unit(
        price in money(),
        quantity in 1u32..50,
        r in rate(),
    ) {
        let mut sub = SubmissionBuilder::new()
            .add_line(LineBuilder::new("p", price, quantity).build())
            .build()
            .unwrap();
        apply_rate(&mut sub, r);

        let exact = r.as_decimal() * price * Decimal::from(quantity);
        let charged = sub.basket[0].line_tax().unwrap();
        let tolerance = Decimal::new(5, 3) * Decimal::from(quantity + 1);
        prop_assert!((charged - exact).abs() <= tolerance);
    }

    #[test]
    fn agreeing_rates_are_returned(r in rate()) {
        let resolver = VatResolver::new(
            StoreConfig::new("DE").unwrap(),
            FormatRegistry,
            Fixed(r),
            Fixed(r),
        );
        prop_assert_eq!(resolver.lookup_vat(&query()).unwrap(), r);
    }

    #[test]
    fn different_rates_always_conflict(a in rate(), b in rate()) {
        prop_assume!(a != b);
        let resolver = VatResolver::new(
            StoreConfig::new("DE").unwrap(),
            FormatRegistry,
            Fixed(a),
            Fixed(b),
        );
        let err = resolver.lookup_vat_for_address(
            &AddressBuilder::new("AT")
                .city("Wien")
                .phone_number("+43 1 5123456")
                .build(),
        );
        prop_assert_eq!(
            err,
            Err(AssessmentError::Failed(FailureReason::ConflictingRates { address: a, phone: b }))
        );
    }

    #[test]
    fn vatin_normalisation_is_idempotent(s in "[ -~]{0,20}") {
        let once = normalize_vatin(&s);
        prop_assert_eq!(normalize_vatin(&once), once.clone());
    }

    #[test]
    fn vatin_parser_never_panics(s in "\\PC{0,20}") {
        let _ = parse_vatin(&s);
    }
}

#[cfg(feature = "tables")]
proptest! {
    #[test]
    fn phone_parser_never_panics(s in "[+0-9 ()./-]{0,24}") {
        let _ = vatmoss::tables::parse_phone_number(&s);
    }

    #[test]
    fn eu_numbers_resolve_to_their_country(national in "[1-9][0-9]{6,9}") {
        use vatmoss::tables::{PhoneRateTable, consumer_rate};

        let number = format!("+43 {national}");
        let quote = PhoneRateTable::default().calculate_rate(&number, "AT").unwrap();
        prop_assert_eq!(quote.rate, consumer_rate("AT"));
    }
}
