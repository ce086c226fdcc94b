//! Custom Askama template filters.

use std::fmt::Display;

/// Formats a decimal amount as a price string.
///
/// Usage in templates: `{{ cart.total|money }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn money(amount: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_money(&amount))
}

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Render an amount as `$x.yz`.
///
/// `Decimal` honors format precision, rounding to two places on display.
pub fn format_money(amount: &impl Display) -> String {
    format!("${amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_money_renders_two_decimal_places() {
        assert_eq!(format_money(&Decimal::new(105, 1)), "$10.50");
        assert_eq!(format_money(&Decimal::ZERO), "$0.00");
        assert_eq!(format_money(&Decimal::from(15)), "$15.00");
    }
}
