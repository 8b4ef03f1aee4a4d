use rust_decimal::Decimal;

use super::error::BuilderError;
use super::types::*;

/// Builder for checkout addresses.
///
/// ```
/// use vatmoss::core::*;
///
/// let address = AddressBuilder::new("AT")
///     .organisation("Beispiel GmbH")
///     .city("Wien")
///     .postcode("1010")
///     .phone_number("+43 1 5123456")
///     .vatin("ATU12345678")
///     .build();
/// assert_eq!(address.city.as_deref(), Some("Wien"));
/// ```
pub struct AddressBuilder {
    address: Address,
}

impl AddressBuilder {
    pub fn new(country_code: impl Into<String>) -> Self {
        Self {
            address: Address {
                organisation: None,
                street: None,
                city: None,
                postcode: None,
                country_code: country_code.into(),
                phone_number: None,
                vatin: None,
            },
        }
    }

    pub fn organisation(mut self, name: impl Into<String>) -> Self {
        self.address.organisation = Some(name.into());
        self
    }

    pub fn street(mut self, street: impl Into<String>) -> Self {
        self.address.street = Some(street.into());
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.address.city = Some(city.into());
        self
    }

    pub fn postcode(mut self, postcode: impl Into<String>) -> Self {
        self.address.postcode = Some(postcode.into());
        self
    }

    pub fn phone_number(mut self, number: impl Into<String>) -> Self {
        self.address.phone_number = Some(number.into());
        self
    }

    pub fn vatin(mut self, vatin: impl Into<String>) -> Self {
        self.address.vatin = Some(vatin.into());
        self
    }

    pub fn build(self) -> Address {
        self.address
    }
}

/// Builder for basket lines.
pub struct LineBuilder {
    line: Line,
}

impl LineBuilder {
    pub fn new(id: impl Into<String>, unit_price_excl_tax: Decimal, quantity: u32) -> Self {
        Self {
            line: Line {
                id: id.into(),
                quantity,
                unit_price_excl_tax,
                discount: Decimal::ZERO,
                unit_tax: None,
            },
        }
    }

    /// Net discount on the whole line.
    pub fn discount(mut self, amount: Decimal) -> Self {
        self.line.discount = amount;
        self
    }

    pub fn build(self) -> Line {
        self.line
    }
}

/// Builder for submissions.
///
/// ```
/// use vatmoss::core::*;
/// use rust_decimal_macros::dec;
///
/// let submission = SubmissionBuilder::new()
///     .add_line(LineBuilder::new("book", dec!(10.00), 3).build())
///     .shipping(dec!(5.00))
///     .shipping_address(AddressBuilder::new("FR").city("Paris").build())
///     .build()
///     .unwrap();
/// assert_eq!(submission.total_excl_tax(), dec!(35.00));
/// ```
#[derive(Default)]
pub struct SubmissionBuilder {
    lines: Vec<Line>,
    shipping_excl_tax: Decimal,
    shipping_method: Option<String>,
    shipping_address: Option<Address>,
}

impl SubmissionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_line(mut self, line: Line) -> Self {
        self.lines.push(line);
        self
    }

    /// Net shipping charge.
    pub fn shipping(mut self, excl_tax: Decimal) -> Self {
        self.shipping_excl_tax = excl_tax;
        self
    }

    pub fn shipping_method(mut self, method: impl Into<String>) -> Self {
        self.shipping_method = Some(method.into());
        self
    }

    pub fn shipping_address(mut self, address: Address) -> Self {
        self.shipping_address = Some(address);
        self
    }

    /// Build the submission, rejecting negative amounts and amounts whose
    /// line or grand total does not fit a `Decimal`.
    pub fn build(self) -> Result<Submission, BuilderError> {
        if self.lines.len() > 10_000 {
            return Err(BuilderError(
                "basket cannot have more than 10,000 lines".into(),
            ));
        }

        let mut total = Decimal::ZERO;
        for line in &self.lines {
            if line.unit_price_excl_tax.is_sign_negative() && !line.unit_price_excl_tax.is_zero()
            {
                return Err(BuilderError(format!(
                    "line {}: unit price must not be negative",
                    line.id
                )));
            }
            if line.discount.is_sign_negative() && !line.discount.is_zero() {
                return Err(BuilderError(format!(
                    "line {}: discount must not be negative",
                    line.id
                )));
            }
            let line_price = line
                .unit_price_excl_tax
                .checked_mul(Decimal::from(line.quantity))
                .and_then(|gross| gross.checked_sub(line.discount))
                .ok_or_else(|| BuilderError(format!("line {}: amount overflows", line.id)))?;
            if line_price < Decimal::ZERO {
                return Err(BuilderError(format!(
                    "line {}: discount exceeds line price",
                    line.id
                )));
            }
            total = total
                .checked_add(line_price)
                .ok_or_else(|| BuilderError("basket total overflows".into()))?;
        }

        if self.shipping_excl_tax < Decimal::ZERO {
            return Err(BuilderError("shipping charge must not be negative".into()));
        }
        total
            .checked_add(self.shipping_excl_tax)
            .ok_or_else(|| BuilderError("submission total overflows".into()))?;

        Ok(Submission {
            basket: self.lines,
            shipping_charge: ShippingCharge {
                method: self.shipping_method,
                excl_tax: self.shipping_excl_tax,
                tax: None,
            },
            shipping_address: self.shipping_address,
        })
    }
}
