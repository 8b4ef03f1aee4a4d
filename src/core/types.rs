use std::fmt;
use std::ops::Mul;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::RateRangeError;

/// A VAT rate as a decimal fraction (`0.20` is 20 %).
///
/// Rates lie between 0 and 1 inclusive. Two rates are equal when their
/// numeric values are equal, so `0.2` and `0.20` compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Rate(pub(crate) Decimal);

impl Rate {
    /// Zero rate, used for reverse charge and for sales outside the EU VAT area.
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    /// Create a rate from a decimal fraction.
    pub fn new(value: Decimal) -> Result<Self, RateRangeError> {
        if value < Decimal::ZERO || value > Decimal::ONE {
            return Err(RateRangeError(value));
        }
        Ok(Self(value))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl TryFrom<Decimal> for Rate {
    type Error = RateRangeError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rate> for Decimal {
    fn from(rate: Rate) -> Self {
        rate.0
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Mul<Decimal> for Rate {
    type Output = Decimal;

    fn mul(self, amount: Decimal) -> Decimal {
        self.0 * amount
    }
}

/// Read access to the fields of an address that matter for VAT assessment.
///
/// Every accessor except [`country_code`](TaxAddress::country_code) has a
/// default returning `None`, so address types that lack a field (no phone
/// number, no VATIN) only implement what they have.
pub trait TaxAddress {
    /// Company name.
    fn organisation(&self) -> Option<&str> {
        None
    }
    /// City (`line4` in the checkout address form).
    fn city(&self) -> Option<&str> {
        None
    }
    /// ISO 3166-1 alpha-2 country code.
    fn country_code(&self) -> Option<&str>;
    fn postcode(&self) -> Option<&str> {
        None
    }
    fn phone_number(&self) -> Option<&str> {
        None
    }
    /// VAT Identification Number, including its country prefix.
    fn vatin(&self) -> Option<&str> {
        None
    }
}

impl<T: TaxAddress + ?Sized> TaxAddress for &T {
    fn organisation(&self) -> Option<&str> {
        (**self).organisation()
    }
    fn city(&self) -> Option<&str> {
        (**self).city()
    }
    fn country_code(&self) -> Option<&str> {
        (**self).country_code()
    }
    fn postcode(&self) -> Option<&str> {
        (**self).postcode()
    }
    fn phone_number(&self) -> Option<&str> {
        (**self).phone_number()
    }
    fn vatin(&self) -> Option<&str> {
        (**self).vatin()
    }
}

/// Shipping or billing address captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Company name, required when a VATIN is given.
    pub organisation: Option<String>,
    /// Street + house number.
    pub street: Option<String>,
    /// City (`line4` in the checkout form).
    pub city: Option<String>,
    pub postcode: Option<String>,
    /// Country code (ISO 3166-1 alpha-2).
    pub country_code: String,
    /// Phone number, preferably in international format (`+49 30 1234567`).
    pub phone_number: Option<String>,
    /// VAT Identification Number (e.g. "ATU12345678").
    pub vatin: Option<String>,
}

impl TaxAddress for Address {
    fn organisation(&self) -> Option<&str> {
        self.organisation.as_deref()
    }
    fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }
    fn country_code(&self) -> Option<&str> {
        Some(&self.country_code)
    }
    fn postcode(&self) -> Option<&str> {
        self.postcode.as_deref()
    }
    fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }
    fn vatin(&self) -> Option<&str> {
        self.vatin.as_deref()
    }
}

/// One basket line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Line identifier (product reference or basket line id).
    pub id: String,
    pub quantity: u32,
    /// Net price per unit, before discounts.
    pub unit_price_excl_tax: Decimal,
    /// Discount applied to the whole line (net).
    pub discount: Decimal,
    /// Tax per unit, set by [`apply_rate`](super::apply_rate).
    pub unit_tax: Option<Decimal>,
}

impl Line {
    /// Net line price after discounts.
    pub fn line_price_excl_tax_incl_discounts(&self) -> Decimal {
        self.unit_price_excl_tax * Decimal::from(self.quantity) - self.discount
    }

    /// Tax for the whole line as charged: unit tax × quantity.
    pub fn line_tax(&self) -> Option<Decimal> {
        self.unit_tax.map(|tax| tax * Decimal::from(self.quantity))
    }

    pub fn unit_price_incl_tax(&self) -> Option<Decimal> {
        self.unit_tax.map(|tax| self.unit_price_excl_tax + tax)
    }
}

/// Shipping charge of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingCharge {
    /// Shipping method name, informational only.
    pub method: Option<String>,
    pub excl_tax: Decimal,
    /// Set by [`apply_rate`](super::apply_rate).
    pub tax: Option<Decimal>,
}

impl ShippingCharge {
    pub fn incl_tax(&self) -> Option<Decimal> {
        self.tax.map(|tax| self.excl_tax + tax)
    }
}

/// An order in progress: basket, shipping charge and shipping address.
///
/// Tax application mutates the lines and the shipping charge in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub basket: Vec<Line>,
    pub shipping_charge: ShippingCharge,
    pub shipping_address: Option<Address>,
}

impl Submission {
    /// Net total of all lines plus shipping.
    pub fn total_excl_tax(&self) -> Decimal {
        self.basket
            .iter()
            .map(Line::line_price_excl_tax_incl_discounts)
            .sum::<Decimal>()
            + self.shipping_charge.excl_tax
    }

    /// Total tax as charged, or `None` while any line or the shipping
    /// charge has no tax assigned yet.
    pub fn total_tax(&self) -> Option<Decimal> {
        let lines = self
            .basket
            .iter()
            .map(Line::line_tax)
            .sum::<Option<Decimal>>()?;
        Some(lines + self.shipping_charge.tax?)
    }

    /// Whether tax has been applied to every line and to shipping.
    pub fn is_taxed(&self) -> bool {
        self.total_tax().is_some()
    }
}

/// A saved address of a customer account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAddress {
    pub address: Address,
    pub is_default_for_shipping: bool,
}

/// Customer account with its saved addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub addresses: Vec<UserAddress>,
}

impl User {
    /// The address used for tax purposes: the default shipping address if
    /// one is flagged, otherwise the first saved address.
    pub fn tax_address(&self) -> Option<&Address> {
        self.addresses
            .iter()
            .find(|a| a.is_default_for_shipping)
            .or_else(|| self.addresses.first())
            .map(|a| &a.address)
    }
}
