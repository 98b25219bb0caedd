use rust_decimal::Decimal;

/// Renders a fractional rate as a percentage rounded to two decimals
/// (0.065 becomes 6.5). Used wherever a rate is shown to a reader:
/// report tables and negotiation talking points.
pub fn as_percent(rate: Decimal) -> Decimal {
    (rate * Decimal::ONE_HUNDRED).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn fractions_render_as_percentages() {
        assert_eq!(as_percent(dec!(0.065)), dec!(6.5));
        assert_eq!(as_percent(dec!(0.084)), dec!(8.4));
        assert_eq!(as_percent(dec!(0)), dec!(0));
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(as_percent(dec!(0.061234)), dec!(6.12));
        assert_eq!(as_percent(dec!(0.061250)), dec!(6.12)); // banker's rounding
    }
}
