//! Fee breakdown model (calculator output and history entry).

use serde::{Deserialize, Serialize};

/// Complete monetary breakdown of one procedure.
///
/// Immutable once created. The serialized shape is the one kept under the
/// history key, so field names follow the stored JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeeBreakdown {
    /// Procedure code, echoed as entered
    pub codigo: String,
    #[serde(rename = "quantidadePontos")]
    pub quantidade_pontos: i64,
    /// SP after increment
    #[serde(rename = "valorSP")]
    pub valor_sp: f64,
    /// SH after increment
    #[serde(rename = "valorSH")]
    pub valor_sh: f64,
    /// TSP, never incremented
    #[serde(rename = "valorTSP")]
    pub valor_tsp: f64,
    /// Increment percentage
    pub incremento: i64,
    #[serde(rename = "quantidadeAuxiliares")]
    pub quantidade_auxiliares: i64,
    /// Anesthesiologist deduction, zero when disabled
    #[serde(rename = "valorAnestesista")]
    pub valor_anestesista: f64,
    /// Pool divided among points
    #[serde(rename = "valorRateio")]
    pub valor_rateio: f64,
    /// Value of a single point
    #[serde(rename = "valorPonto")]
    pub valor_ponto: f64,
    #[serde(rename = "valorCirurgiao")]
    pub valor_cirurgiao: f64,
    #[serde(rename = "valorPrimeiroAuxiliar")]
    pub valor_primeiro_auxiliar: f64,
    #[serde(rename = "valorSegundoAuxiliar")]
    pub valor_segundo_auxiliar: f64,
    #[serde(rename = "valorTerceiroAuxiliar")]
    pub valor_terceiro_auxiliar: f64,
    #[serde(rename = "valorQuartoAuxiliar")]
    pub valor_quarto_auxiliar: f64,
    #[serde(rename = "valorQuintoAuxiliar")]
    pub valor_quinto_auxiliar: f64,
    /// Weighted points of every participating professional
    #[serde(rename = "totalPontos")]
    pub total_pontos: f64,
    /// SH' + TSP + SP'
    #[serde(rename = "valorTotalProcedimento")]
    pub valor_total_procedimento: f64,
    #[serde(rename = "anestesistaEnabled")]
    pub anestesista_enabled: bool,
    /// Creation instant, epoch milliseconds
    pub timestamp: i64,
}

impl FeeBreakdown {
    /// Shares in tier order: surgeon, then 1st..5th assistant.
    pub fn professional_shares(&self) -> [f64; 6] {
        [
            self.valor_cirurgiao,
            self.valor_primeiro_auxiliar,
            self.valor_segundo_auxiliar,
            self.valor_terceiro_auxiliar,
            self.valor_quarto_auxiliar,
            self.valor_quinto_auxiliar,
        ]
    }

    /// Combined share of the 2nd to 5th assistants.
    pub fn valor_segundo_ao_quinto_auxiliar(&self) -> f64 {
        self.valor_segundo_auxiliar
            + self.valor_terceiro_auxiliar
            + self.valor_quarto_auxiliar
            + self.valor_quinto_auxiliar
    }

    /// Creation instant as a UTC datetime.
    pub fn created_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::from_timestamp_millis(self.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Entry as written by the browser dashboard.
    const STORED_ENTRY: &str = r#"{
        "codigo": "04.08.01.005-5",
        "quantidadePontos": 100,
        "valorSP": 1000,
        "valorSH": 500,
        "valorTSP": 0,
        "incremento": 0,
        "quantidadeAuxiliares": 2,
        "valorAnestesista": 0,
        "valorRateio": 1000,
        "valorPonto": 6.666666666666667,
        "valorCirurgiao": 666.6666666666667,
        "valorPrimeiroAuxiliar": 200,
        "valorSegundoAuxiliar": 133.33333333333334,
        "valorTerceiroAuxiliar": 0,
        "valorQuartoAuxiliar": 0,
        "valorQuintoAuxiliar": 0,
        "totalPontos": 150,
        "valorTotalProcedimento": 1500,
        "anestesistaEnabled": false,
        "timestamp": 1718900000000
    }"#;

    #[test]
    fn test_reads_stored_entry() {
        let entry: FeeBreakdown = serde_json::from_str(STORED_ENTRY).unwrap();

        assert_eq!(entry.codigo, "04.08.01.005-5");
        assert_eq!(entry.quantidade_pontos, 100);
        assert_eq!(entry.quantidade_auxiliares, 2);
        assert_eq!(entry.total_pontos, 150.0);
        assert_eq!(entry.timestamp, 1718900000000);
    }

    #[test]
    fn test_serializes_stored_field_names() {
        let entry: FeeBreakdown = serde_json::from_str(STORED_ENTRY).unwrap();
        let json = serde_json::to_string(&entry).unwrap();

        assert!(json.contains("\"valorSP\":1000.0"));
        assert!(json.contains("\"valorTotalProcedimento\""));
        assert!(json.contains("\"anestesistaEnabled\":false"));
        assert!(!json.contains("valor_sp"));
    }

    #[test]
    fn test_second_to_fifth_assistant_sum() {
        let mut entry: FeeBreakdown = serde_json::from_str(STORED_ENTRY).unwrap();
        entry.valor_terceiro_auxiliar = 10.0;
        entry.valor_quinto_auxiliar = 5.0;

        let sum = entry.valor_segundo_ao_quinto_auxiliar();
        assert!((sum - 148.33333333333334).abs() < 1e-9);
        assert_eq!(entry.professional_shares()[4], 0.0);
    }

    #[test]
    fn test_created_at() {
        let entry: FeeBreakdown = serde_json::from_str(STORED_ENTRY).unwrap();
        let created = entry.created_at().unwrap();
        assert_eq!(created.format("%Y-%m-%d").to_string(), "2024-06-20");
    }
}
