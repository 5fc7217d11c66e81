//! Input normalizer for the procedure form.
//!
//! Handles:
//! - Procedure code masking and validation (`NN.NN.NN.NNN-N`)
//! - Currency text parsing/formatting with an explicit locale
//! - Digit-only integer fields (points, increment, assistants)
//!
//! Everything here is pure. Validation problems are returned as values;
//! parse problems are coerced to zero.

mod currency;
mod fields;
mod procedure_code;

pub use currency::*;
pub use fields::*;
pub use procedure_code::*;

use crate::models::{NormalizedProcedure, ProcedureInput};

/// Normalizer bound to a currency locale.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    locale: CurrencyLocale,
}

impl Normalizer {
    /// Create a normalizer with the default (pt-BR) locale.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a normalizer for a specific locale.
    pub fn with_locale(locale: CurrencyLocale) -> Self {
        Self { locale }
    }

    /// Locale in use.
    pub fn locale(&self) -> &CurrencyLocale {
        &self.locale
    }

    /// Convert every raw form field to its numeric value.
    ///
    /// Does not validate the procedure code; see [`validate_procedure_code`].
    pub fn normalize(&self, input: &ProcedureInput) -> NormalizedProcedure {
        NormalizedProcedure {
            codigo: input.codigo.clone(),
            quantidade_pontos: parse_int_field(&input.quantidade_pontos),
            valor_sp: self.locale.parse(&input.valor_sp),
            valor_sh: self.locale.parse(&input.valor_sh),
            valor_tsp: self.locale.parse(&input.valor_tsp),
            incremento: parse_int_field(&input.incremento),
            quantidade_auxiliares: parse_int_field(&input.quantidade_auxiliares),
            anestesista_enabled: input.anestesista_enabled,
        }
    }

    /// Parse currency text.
    pub fn parse_currency(&self, formatted: &str) -> f64 {
        self.locale.parse(formatted)
    }

    /// Format an amount as currency text.
    pub fn format_currency(&self, amount: f64) -> String {
        self.locale.format(amount)
    }

    /// Mask a currency field on input.
    pub fn mask_currency_input(&self, raw: &str) -> String {
        self.locale.mask_input(raw)
    }
}

/// Normalize with the default (pt-BR) locale.
pub fn normalize(input: &ProcedureInput) -> NormalizedProcedure {
    Normalizer::new().normalize(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_input() -> ProcedureInput {
        ProcedureInput {
            codigo: "04.08.01.005-5".into(),
            quantidade_pontos: "100".into(),
            valor_sp: "R$ 1.000,00".into(),
            valor_sh: "R$ 500,00".into(),
            valor_tsp: "R$ 12,34".into(),
            incremento: "10".into(),
            quantidade_auxiliares: "2".into(),
            anestesista_enabled: true,
        }
    }

    #[test]
    fn test_normalize() {
        let normalized = normalize(&make_input());

        assert_eq!(normalized.codigo, "04.08.01.005-5");
        assert_eq!(normalized.quantidade_pontos, 100);
        assert_eq!(normalized.valor_sp, 1000.0);
        assert_eq!(normalized.valor_sh, 500.0);
        assert_eq!(normalized.valor_tsp, 12.34);
        assert_eq!(normalized.incremento, 10);
        assert_eq!(normalized.quantidade_auxiliares, 2);
        assert!(normalized.anestesista_enabled);
    }

    #[test]
    fn test_normalize_empty_fields_are_zero() {
        let normalized = normalize(&ProcedureInput::new("04.08.01.005-5"));

        assert_eq!(normalized.quantidade_pontos, 0);
        assert_eq!(normalized.valor_sp, 0.0);
        assert_eq!(normalized.valor_sh, 0.0);
        assert_eq!(normalized.valor_tsp, 0.0);
        assert_eq!(normalized.incremento, 0);
        assert_eq!(normalized.quantidade_auxiliares, 0);
    }

    #[test]
    fn test_normalize_with_locale() {
        let normalizer = Normalizer::with_locale(CurrencyLocale::EN_US);
        let mut input = make_input();
        input.valor_sp = "$1,000.50".into();

        let normalized = normalizer.normalize(&input);
        assert_eq!(normalized.valor_sp, 1000.5);
        assert_eq!(normalizer.format_currency(1000.5), "$1,000.50");
        assert_eq!(normalizer.locale().tag, "en-US");
    }

    #[test]
    fn test_normalizer_default_is_brazilian() {
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.parse_currency("R$ 2.500,75"), 2500.75);
        assert_eq!(normalizer.mask_currency_input("250075"), "R$\u{a0}2.500,75");
    }
}
