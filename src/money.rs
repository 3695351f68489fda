use num_format::{Locale, ToFormattedString};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Locale and currency used when printing amounts
#[derive(Debug, Clone)]
pub struct CurrencyFormat {
    pub locale: Locale,
    pub symbol: String,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat {
            locale: Locale::en,
            symbol: "£".to_string(),
        }
    }
}

impl CurrencyFormat {
    pub fn new(locale: Locale, symbol: impl Into<String>) -> Self {
        CurrencyFormat {
            locale,
            symbol: symbol.into(),
        }
    }

    /// Format with the currency symbol, thousands grouping and two decimal places
    /// (e.g. "£30,000.00")
    pub fn format(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let abs = rounded.abs();
        let whole = abs.trunc();
        let pence = ((abs - whole) * Decimal::ONE_HUNDRED).to_u64().unwrap_or(0);
        let whole = whole.to_u64().unwrap_or(0).to_formatted_string(&self.locale);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            self.locale.minus_sign()
        } else {
            ""
        };
        format!(
            "{}{}{}{}{:02}",
            sign,
            self.symbol,
            whole,
            self.locale.decimal(),
            pence
        )
    }
}

/// Rate as a plain percentage without trailing zeros ("20", "19.5")
pub fn format_rate(rate: Decimal) -> String {
    rate.normalize().to_string()
}
