use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use std::str::FromStr;

/// Money type with 8 decimal places precision
///
/// the operators saturate at the edges of `Decimal`'s range; use the
/// `checked_*` methods where overflow must surface as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d.round_dp(8))
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Money(Decimal::from_str(s)?.round_dp(8)))
    }

    /// create from integer amount (rupees, dollars, etc)
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// `None` when the sum leaves the representable range
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money::from_decimal)
    }

    pub fn checked_mul(self, factor: Decimal) -> Option<Money> {
        self.0.checked_mul(factor).map(Money::from_decimal)
    }

    /// fixed-point text with `dp` places, halves rounded away from zero
    pub fn to_fixed(&self, dp: u32) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
        format!("{:.*}", dp as usize, rounded)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0).round_dp(8))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 = self.0.saturating_add(other.0).round_dp(8);
    }
}

impl Mul<Decimal> for Money {
    type Output = Money;

    fn mul(self, other: Decimal) -> Money {
        Money(self.0.saturating_mul(other).round_dp(8))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

/// rate type for monthly interest rates, stored as a fraction (0.02 for 2%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    /// create from a percentage figure (e.g., 1.75 for 1.75%)
    pub fn from_percent(p: Decimal) -> Self {
        Rate(p / Decimal::ONE_HUNDRED)
    }

    /// create from basis points (e.g., 175 for 1.75%)
    pub fn from_bps(bps: u32) -> Self {
        Rate(Decimal::from(bps) / Decimal::from(10000))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// get as percentage, without trailing zeros
    pub fn as_percentage(&self) -> Decimal {
        (self.0 * Decimal::ONE_HUNDRED).normalize()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage())
    }
}

/// serde adapter writing `Money` as a plain JSON number, the way store documents hold amounts
pub mod money_number {
    use super::Money;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&value.as_decimal(), serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        rust_decimal::serde::float::deserialize(deserializer).map(Money::from_decimal)
    }
}

/// serde adapter writing `Rate` as its percent figure (`1.75`, `2`)
pub mod rate_percent {
    use super::Rate;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Rate, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&value.as_percentage(), serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Rate, D::Error> {
        rust_decimal::serde::float::deserialize(deserializer).map(Rate::from_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_precision() {
        let m = Money::from_str_exact("100.123456789").unwrap();
        assert_eq!(m.to_string(), "100.12345679"); // rounded to 8 places
    }

    #[test]
    fn test_to_fixed_rounds_half_away_from_zero() {
        assert_eq!(Money::from_decimal(dec!(988.166666)).to_fixed(2), "988.17");
        assert_eq!(Money::from_decimal(dec!(0.125)).to_fixed(2), "0.13");
        assert_eq!(Money::from_decimal(dec!(-0.125)).to_fixed(2), "-0.13");
        assert_eq!(Money::from_major(800).to_fixed(2), "800.00");
    }

    #[test]
    fn test_rate_constructors_agree() {
        assert_eq!(Rate::from_bps(175), Rate::from_percent(dec!(1.75)));
        assert_eq!(Rate::from_bps(200).as_decimal(), dec!(0.02));
        assert_eq!(Rate::from_bps(175).as_percentage(), dec!(1.75));
        assert_eq!(Rate::from_bps(200).to_string(), "2%");
    }

    #[test]
    fn test_checked_ops_detect_overflow() {
        let huge = Money::from_decimal(Decimal::MAX);
        assert_eq!(huge.checked_add(Money::from_major(1)), None);
        assert_eq!(huge.checked_mul(dec!(2)), None);
        assert_eq!(
            Money::from_major(2).checked_mul(dec!(1.5)),
            Some(Money::from_major(3))
        );
    }

    #[test]
    fn test_operators_saturate() {
        let huge = Money::from_decimal(Decimal::MAX);
        assert_eq!(huge + huge, huge);
        assert_eq!(huge * dec!(3), huge);
    }

    #[test]
    fn test_money_sum() {
        let total: Money = [Money::from_major(1), Money::from_decimal(dec!(2.5))]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_decimal(dec!(3.5)));
    }

    #[test]
    fn test_number_adapters() {
        #[derive(Serialize, Deserialize)]
        struct Doc {
            #[serde(with = "money_number")]
            amount: Money,
            #[serde(with = "rate_percent")]
            rate: Rate,
        }

        let doc: Doc = serde_json::from_str(r#"{"amount": 40000, "rate": 2}"#).unwrap();
        assert_eq!(doc.amount, Money::from_major(40000));
        assert_eq!(doc.rate, Rate::from_bps(200));

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["amount"].as_f64(), Some(40000.0));
        assert_eq!(value["rate"].as_f64(), Some(2.0));
    }
}
