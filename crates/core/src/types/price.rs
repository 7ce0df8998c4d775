//! Type-safe price representation using decimal arithmetic.
//!
//! Amounts are [`Decimal`] everywhere so cart totals never pick up binary
//! floating point drift. [`Price`] formats an amount for display.

use std::fmt;

use rust_decimal::Decimal;

/// A US dollar amount, displayed as `$1250.00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price {
    /// Amount in dollars, not cents.
    pub amount: Decimal,
}

impl Price {
    /// Create a price in the storefront's currency.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self { amount }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.amount.round_dp(2);
        if rounded.is_sign_negative() && !rounded.is_zero() {
            write!(f, "-${:.2}", rounded.abs())
        } else {
            write!(f, "${:.2}", rounded.abs())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_to_cents() {
        assert_eq!(Price::usd(Decimal::from(132)).to_string(), "$132.00");
        assert_eq!(Price::usd(Decimal::new(125, 1)).to_string(), "$12.50");
    }

    #[test]
    fn test_display_rounds_fractional_cents() {
        // 19.99 * 0.10 tax
        assert_eq!(Price::usd(Decimal::new(1999, 3)).to_string(), "$2.00");
    }

    #[test]
    fn test_display_negative() {
        assert_eq!(Price::usd(Decimal::from(-5)).to_string(), "-$5.00");
        assert_eq!(Price::usd(Decimal::new(-1, 3)).to_string(), "$0.00");
    }
}
