//! Fixed-point tax arithmetic and tax application to a submission.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use super::types::{Rate, Submission};

/// Fractional digits of a money amount (currency minor unit).
pub const MONEY_DP: u32 = 2;

/// Quantize to two fractional digits with round-half-even.
///
/// The result always carries exactly two digits, so `1` becomes `1.00`.
pub fn round2(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(MONEY_DP);
    rounded
}

/// Tax on a net amount, rounded to the minor unit.
pub fn calculate_tax(price: Decimal, rate: Rate) -> Decimal {
    round2(rate * price)
}

/// Apply `rate` to every line and to the shipping charge of `submission`.
///
/// Per line, the tax on the discounted line price is rounded first and the
/// per-unit tax is then rounded again from that line tax. Rounding happens per
/// line, never on the basket total, so `unit_tax × quantity` may differ from
/// the line tax by a cent. Lines with quantity 0 get a unit tax of 0.
pub fn apply_rate(submission: &mut Submission, rate: Rate) {
    for line in &mut submission.basket {
        let line_tax = calculate_tax(line.line_price_excl_tax_incl_discounts(), rate);
        let unit_tax = if line.quantity == 0 {
            round2(Decimal::ZERO)
        } else {
            round2(line_tax / Decimal::from(line.quantity))
        };
        line.unit_tax = Some(unit_tax);
    }

    let shipping = &mut submission.shipping_charge;
    shipping.tax = Some(calculate_tax(shipping.excl_tax, rate));

    debug!(
        %rate,
        lines = submission.basket.len(),
        "applied VAT rate to submission"
    );
}
