//! Display-only currency conversion and formatting.
//!
//! The engine keeps all amounts in the configured auction currency; this
//! module exists purely so presentation layers can show amounts in another
//! currency. No state, no side effects.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Currencies supported for display conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    Usd,
    Eur,
    Ngn,
}

/// All supported currencies, in display order.
pub const CURRENCIES: [Currency; 3] = [Currency::Usd, Currency::Eur, Currency::Ngn];

impl Currency {
    /// Conversion rate relative to USD.
    const fn rate(self) -> f64 {
        match self {
            Currency::Usd => 1.0,
            Currency::Eur => 0.93,
            Currency::Ngn => 1500.0,
        }
    }

    /// ISO 4217 code.
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Ngn => "NGN",
        }
    }

    const fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "\u{20ac}",
            Currency::Ngn => "\u{20a6}",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "NGN" => Ok(Currency::Ngn),
            other => Err(format!("Unknown currency code: {other}")),
        }
    }
}

/// Convert an amount between display currencies via USD.
pub fn convert(amount: u64, from: Currency, to: Currency) -> f64 {
    let amount_in_usd = amount as f64 / from.rate();
    amount_in_usd * to.rate()
}

/// Format an amount as a currency string with thousands separators,
/// e.g. `$25,000.00`.
pub fn format_amount(amount: f64, currency: Currency) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{}{grouped}.{frac:02}", currency.symbol())
}
