use time::macros::format_description;
use time::Date;

use crate::money::Money;

/// The currency glyph prefixed to every amount. Formatting is deliberately not
/// locale-aware, the same symbol is shown regardless of the viewer locale.
pub const CURRENCY_SYMBOL: &str = "€";

/// Formats a `YYYY-MM-DD` date as a fixed long-form English string, such as
/// `"January 5, 2025"`. Returns `None` when the field is empty or not a date,
/// the callers substitute their own placeholder in that case.
pub fn format_long_date(input: &str) -> Option<String> {
    let date = parse_date(input)?;
    Some(format!(
        "{} {}, {}",
        date.month(),
        date.day(),
        date.year()
    ))
}

/// Formats a `YYYY-MM-DD` date as an abbreviated month and year, such as `"Jan 2025"`.
/// This is the form used by the date ranges of the CV entries.
pub fn format_month_year(input: &str) -> Option<String> {
    let date = parse_date(input)?;
    let month_name = date.month().to_string();
    Some(format!("{} {}", &month_name[..3], date.year()))
}

/// Formats an amount with the fixed currency glyph and two fraction digits, such as `€300.00`.
pub fn currency(amount: Money) -> String {
    format!("{}{}", CURRENCY_SYMBOL, amount)
}

/// Substitutes a fixed placeholder for a missing or blank field value.
pub fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}

fn parse_date(input: &str) -> Option<Date> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    let format = format_description!("[year]-[month]-[day]");
    match Date::parse(input, &format) {
        Ok(date) => Some(date),
        Err(error) => {
            log::warn!("Unable to parse the date {:?}: {}", input, error);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_dates_are_deterministic_and_locale_fixed() {
        assert_eq!(
            format_long_date("2025-01-05").as_deref(),
            Some("January 5, 2025")
        );
        assert_eq!(
            format_long_date("2024-12-31").as_deref(),
            Some("December 31, 2024")
        );
        assert_eq!(format_long_date(""), None);
        assert_eq!(format_long_date("not-a-date"), None);
    }

    #[test]
    fn month_year_dates_use_the_abbreviated_month() {
        assert_eq!(format_month_year("2025-01-05").as_deref(), Some("Jan 2025"));
        assert_eq!(format_month_year("2021-09-01").as_deref(), Some("Sep 2021"));
        assert_eq!(format_month_year("2025-13-01"), None);
    }

    #[test]
    fn currency_uses_the_fixed_glyph() {
        assert_eq!(currency(Money::from_cents(30000)), "€300.00");
        assert_eq!(currency(Money::ZERO), "€0.00");
    }

    #[test]
    fn blank_values_fall_back_to_the_placeholder() {
        assert_eq!(or_placeholder("", "[Your Name]"), "[Your Name]");
        assert_eq!(or_placeholder("   ", "[Your Name]"), "[Your Name]");
        assert_eq!(or_placeholder("Ada", "[Your Name]"), "Ada");
    }
}
