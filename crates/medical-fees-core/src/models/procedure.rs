//! Procedure input models.

use serde::{Deserialize, Serialize};

/// Raw procedure form input, exactly as typed by the user.
///
/// Every field except the anesthesiologist flag is a string: the form masks
/// values while typing, and conversion happens in the normalizer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProcedureInput {
    /// Masked procedure code (`NN.NN.NN.NNN-N`)
    pub codigo: String,
    /// Digit string, number of procedure points
    #[serde(rename = "quantidadePontos")]
    pub quantidade_pontos: String,
    /// Professional service value, currency-formatted
    #[serde(rename = "valorSP")]
    pub valor_sp: String,
    /// Hospital service value, currency-formatted
    #[serde(rename = "valorSH")]
    pub valor_sh: String,
    /// TSP value, currency-formatted
    #[serde(rename = "valorTSP")]
    pub valor_tsp: String,
    /// Digit string, percentage increment (empty when disabled)
    pub incremento: String,
    /// Digit string, number of assistants (0-5)
    #[serde(rename = "quantidadeAuxiliares")]
    pub quantidade_auxiliares: String,
    /// Whether the anesthesiologist share is deducted
    #[serde(rename = "anestesistaEnabled", default)]
    pub anestesista_enabled: bool,
}

impl ProcedureInput {
    /// Create an input with the given code and the form's initial values.
    pub fn new(codigo: impl Into<String>) -> Self {
        Self {
            codigo: codigo.into(),
            quantidade_auxiliares: "0".into(),
            ..Default::default()
        }
    }
}

/// Numeric view of a [`ProcedureInput`].
///
/// Produced by [`crate::normalizer::normalize`]; the calculator only sees
/// these values. No range checks are applied here.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedProcedure {
    pub codigo: String,
    pub quantidade_pontos: i64,
    pub valor_sp: f64,
    pub valor_sh: f64,
    pub valor_tsp: f64,
    /// Percentage, 0 when disabled
    pub incremento: i64,
    pub quantidade_auxiliares: i64,
    pub anestesista_enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_form_defaults() {
        let input = ProcedureInput::new("04.08.01.005-5");
        assert_eq!(input.codigo, "04.08.01.005-5");
        assert_eq!(input.quantidade_auxiliares, "0");
        assert!(input.incremento.is_empty());
        assert!(!input.anestesista_enabled);
    }

    #[test]
    fn test_deserialize_form_json() {
        let json = r#"{
            "codigo": "04.08.01.005-5",
            "quantidadePontos": "100",
            "valorSP": "R$ 1.000,00",
            "valorSH": "R$ 500,00",
            "valorTSP": "",
            "incremento": "",
            "quantidadeAuxiliares": "2"
        }"#;

        let input: ProcedureInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.quantidade_pontos, "100");
        assert_eq!(input.valor_sp, "R$ 1.000,00");
        assert_eq!(input.quantidade_auxiliares, "2");
        // Flag is optional in stored form state
        assert!(!input.anestesista_enabled);
    }
}
