use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ContextError;

/// An amount of currency held as an integer number of cents.
///
/// The totals of the itemized documents are sums of `quantity × unit price` and they
/// have to come out exact, so the amounts are never kept as floating point numbers
/// internally. They are only converted at the serialization boundary, because the
/// stored payloads represent prices as plain JSON numbers of currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Money {
    cents: i64,
}

impl Money {
    pub const ZERO: Money = Money { cents: 0 };

    pub const fn from_cents(cents: i64) -> Money {
        Money { cents }
    }

    pub const fn cents(&self) -> i64 {
        self.cents
    }

    /// Parse an amount from the text of a numeric input field, such as `"9.99"` or `"100"`.
    /// At most two fraction digits are accepted and the amount cannot be negative,
    /// anything else is rejected so that no malformed input ever reaches the totals.
    pub fn parse(input: &str) -> Result<Money, ContextError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ContextError::with_context("The amount is empty"));
        }

        let (whole_part, fraction_part) = match input.split_once('.') {
            Some((whole_part, fraction_part)) => (whole_part, fraction_part),
            None => (input, ""),
        };
        if whole_part.is_empty() || !whole_part.chars().all(|character| character.is_ascii_digit())
        {
            return Err(ContextError::with_context(format!(
                "The amount {:?} is not a number",
                input
            )));
        }
        if fraction_part.len() > 2
            || !fraction_part.chars().all(|character| character.is_ascii_digit())
        {
            return Err(ContextError::with_context(format!(
                "The amount {:?} has more than two decimal places",
                input
            )));
        }

        let whole: i64 = whole_part.parse().map_err(|error| {
            ContextError::with_error(format!("The amount {:?} is out of range", input), &error)
        })?;
        let fraction: i64 = match fraction_part.len() {
            0 => 0,
            1 => {
                #[allow(clippy::unwrap_used)] // All the digits have been checked above
                let digit: i64 = fraction_part.parse().unwrap();
                digit * 10
            }
            _ => {
                #[allow(clippy::unwrap_used)]
                let digits: i64 = fraction_part.parse().unwrap();
                digits
            }
        };

        whole
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(fraction))
            .map(Money::from_cents)
            .ok_or(ContextError::with_context(format!(
                "The amount {:?} is out of range",
                input
            )))
    }

    /// The line total of an itemized row, `quantity × unit price`. Saturates at
    /// the representable extremes, the totals can never overflow and panic.
    pub fn times(&self, quantity: u32) -> Money {
        Money {
            cents: self.cents.saturating_mul(quantity as i64),
        }
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money {
            cents: self.cents.saturating_add(other.cents),
        }
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iterator: I) -> Money {
        iterator.fold(Money::ZERO, |total, amount| total + amount)
    }
}

/// Formats the amount with two fraction digits and no currency glyph, such as `300.00`.
impl std::fmt::Display for Money {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let cents = self.cents.abs();
        write!(formatter, "{}{}.{:02}", sign, cents / 100, cents % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.cents as f64 / 100.0)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let units = f64::deserialize(deserializer)?;
        if !units.is_finite() {
            return Err(serde::de::Error::custom("the amount is not a finite number"));
        }
        // The wire is an untrusted boundary like the input fields, an amount
        // whose cents do not fit the representation is rejected rather than
        // clamped into a wrong value
        let cents = (units * 100.0).round();
        if cents.abs() >= i64::MAX as f64 {
            return Err(serde::de::Error::custom("the amount is out of range"));
        }
        Ok(Money { cents: cents as i64 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_and_fractional_amounts() {
        assert_eq!(Money::parse("100").unwrap().cents(), 10000);
        assert_eq!(Money::parse("9.99").unwrap().cents(), 999);
        assert_eq!(Money::parse("0.5").unwrap().cents(), 50);
        assert_eq!(Money::parse(" 5 ").unwrap().cents(), 500);
    }

    #[test]
    fn rejects_malformed_amounts() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("-3").is_err());
        assert!(Money::parse("1.999").is_err());
        assert!(Money::parse("1,50").is_err());
        assert!(Money::parse(".5").is_err());
    }

    #[test]
    fn line_totals_come_out_exact() {
        let subtotal: Money = [
            Money::parse("9.99").unwrap().times(2),
            Money::parse("5").unwrap().times(1),
        ]
        .into_iter()
        .sum();
        assert_eq!(subtotal, Money::from_cents(2498));
        assert_eq!(subtotal.to_string(), "24.98");
    }

    #[test]
    fn out_of_range_wire_amounts_are_rejected() {
        assert!(serde_json::from_str::<Money>("1e17").is_err());
        assert!(serde_json::from_str::<Money>("-1e17").is_err());
        assert_eq!(
            serde_json::from_str::<Money>("1000000.5").unwrap(),
            Money::from_cents(100000050)
        );
    }

    #[test]
    fn totals_saturate_instead_of_overflowing() {
        let huge = Money::from_cents(i64::MAX / 2);
        assert_eq!(huge.times(4), Money::from_cents(i64::MAX));
        let sum: Money = [huge, huge, huge].into_iter().sum();
        assert_eq!(sum, Money::from_cents(i64::MAX));
    }

    #[test]
    fn serializes_as_a_plain_number_of_units() {
        let amount = Money::parse("9.99").unwrap();
        assert_eq!(serde_json::to_string(&amount).unwrap(), "9.99");
        let parsed: Money = serde_json::from_str("9.99").unwrap();
        assert_eq!(parsed, amount);
        let whole: Money = serde_json::from_str("100").unwrap();
        assert_eq!(whole.cents(), 10000);
    }
}
