//! Locale-aware currency text.
//!
//! Parsing is deliberately lenient: anything that does not read as a number
//! becomes `0` so the form stays usable while the user is typing.

use rust_decimal::{Decimal, RoundingStrategy};

use super::fields::digits_only;

/// Formatting rules for one currency locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyLocale {
    /// BCP 47 tag (e.g. "pt-BR")
    pub tag: &'static str,
    /// Currency symbol
    pub symbol: &'static str,
    /// Text between symbol and amount
    pub symbol_separator: &'static str,
    pub thousands_separator: char,
    pub decimal_separator: char,
    /// Digits after the decimal separator
    pub fraction_digits: usize,
}

impl CurrencyLocale {
    /// Brazilian Real, as rendered by `Intl.NumberFormat("pt-BR")`.
    ///
    /// The symbol is followed by a non-breaking space.
    pub const PT_BR: CurrencyLocale = CurrencyLocale {
        tag: "pt-BR",
        symbol: "R$",
        symbol_separator: "\u{a0}",
        thousands_separator: '.',
        decimal_separator: ',',
        fraction_digits: 2,
    };

    /// US Dollar.
    pub const EN_US: CurrencyLocale = CurrencyLocale {
        tag: "en-US",
        symbol: "$",
        symbol_separator: "",
        thousands_separator: ',',
        decimal_separator: '.',
        fraction_digits: 2,
    };

    /// Look up a known locale by tag (case-insensitive).
    pub fn from_tag(tag: &str) -> Option<Self> {
        [Self::PT_BR, Self::EN_US]
            .into_iter()
            .find(|locale| locale.tag.eq_ignore_ascii_case(tag.trim()))
    }

    /// Parse currency text into an amount.
    ///
    /// Every character other than digits and the decimal separator is
    /// dropped; the first decimal separator becomes the decimal point. Empty
    /// or unparseable text (e.g. two decimal separators) yields `0`. Signs
    /// are dropped along with the rest of the symbols.
    pub fn parse(&self, formatted: &str) -> f64 {
        let kept: String = formatted
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == self.decimal_separator)
            .collect();
        if kept.is_empty() {
            return 0.0;
        }

        let mut decimal = [0u8; 4];
        let separator: &str = self.decimal_separator.encode_utf8(&mut decimal);
        kept.replacen(separator, ".", 1)
            .parse::<f64>()
            .ok()
            .filter(|amount| amount.is_finite())
            .unwrap_or(0.0)
    }

    /// Render an amount as currency text.
    ///
    /// Rounds to `fraction_digits`, ties away from zero. Negative amounts
    /// (including `-0.0`) get a leading `-`; non-finite amounts render as zero.
    pub fn format(&self, amount: f64) -> String {
        let amount = if amount.is_finite() { amount } else { 0.0 };
        let rendered = round_half_expand(amount.abs(), self.fraction_digits);
        let (integer, fraction) = match rendered.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (rendered.as_str(), None),
        };

        let mut out = String::with_capacity(rendered.len() + 8);
        if amount.is_sign_negative() {
            out.push('-');
        }
        out.push_str(self.symbol);
        out.push_str(self.symbol_separator);
        out.push_str(&group_thousands(integer, self.thousands_separator));
        if let Some(fraction) = fraction {
            out.push(self.decimal_separator);
            out.push_str(fraction);
        }
        out
    }

    /// Per-keystroke mask for currency inputs.
    ///
    /// Typed digits are read as minor units (cents), so typing `1`, `2`, `3`
    /// shows `0,01`, `0,12`, `1,23`. Input without digits clears the field.
    pub fn mask_input(&self, raw: &str) -> String {
        let digits = digits_only(raw);
        if digits.is_empty() {
            return String::new();
        }
        let minor: f64 = digits.parse().unwrap_or(0.0);
        let scale = 10f64.powi(self.fraction_digits as i32);
        self.format(minor / scale)
    }
}

impl Default for CurrencyLocale {
    fn default() -> Self {
        Self::PT_BR
    }
}

/// Parse currency text using Brazilian Real rules.
pub fn parse_currency(formatted: &str) -> f64 {
    CurrencyLocale::PT_BR.parse(formatted)
}

/// Parse currency text using the given locale.
pub fn parse_currency_with(locale: &CurrencyLocale, formatted: &str) -> f64 {
    locale.parse(formatted)
}

/// Format an amount as Brazilian Real.
pub fn format_currency(amount: f64) -> String {
    CurrencyLocale::PT_BR.format(amount)
}

/// Format an amount using the given locale.
pub fn format_currency_with(locale: &CurrencyLocale, amount: f64) -> String {
    locale.format(amount)
}

/// Brazilian Real input mask.
pub fn mask_currency_input(raw: &str) -> String {
    CurrencyLocale::PT_BR.mask_input(raw)
}

/// Fixed-point rendering of a non-negative amount, ties rounded up.
///
/// Works on the exact binary value, so `0.125` rounds to `0.13` while `1.005`
/// (stored as `1.00499…`) stays `1.00`.
fn round_half_expand(value: f64, fraction_digits: usize) -> String {
    match Decimal::from_f64_retain(value) {
        Some(exact) => {
            let rounded = exact
                .round_dp_with_strategy(fraction_digits as u32, RoundingStrategy::MidpointAwayFromZero);
            format!("{:.*}", fraction_digits, rounded)
        }
        // Beyond Decimal range every f64 is an integer, so there is no tie
        None => format!("{:.*}", fraction_digits, value),
    }
}

fn group_thousands(integer: &str, separator: char) -> String {
    let len = integer.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    grouped
}
