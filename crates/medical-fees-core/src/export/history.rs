//! History export (JSON / CSV) for reports.

use serde::{Deserialize, Serialize};

use crate::ledger::HistoryLedger;
use crate::models::FeeBreakdown;
use crate::store::KeyValueStore;

const CSV_HEADER: &str = "codigo,created_at,quantidade_pontos,quantidade_auxiliares,incremento,\
anestesista,valor_sp,valor_sh,valor_tsp,valor_anestesista,valor_rateio,valor_ponto,\
valor_cirurgiao,valor_primeiro_auxiliar,valor_segundo_auxiliar,valor_terceiro_auxiliar,\
valor_quarto_auxiliar,valor_quinto_auxiliar,total_pontos,valor_total_procedimento\n";

/// Snapshot of history entries for export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryExport {
    /// Export timestamp
    pub exported_at: String,
    /// Entries, newest first
    pub entries: Vec<FeeBreakdown>,
    /// Entry count
    pub total_entries: usize,
    /// Sum of every entry's procedure total
    pub total_procedimentos: f64,
}

impl HistoryExport {
    /// Build an export from history entries.
    pub fn from_entries(entries: &[FeeBreakdown]) -> Self {
        Self {
            exported_at: chrono::Utc::now().to_rfc3339(),
            entries: entries.to_vec(),
            total_entries: entries.len(),
            total_procedimentos: entries.iter().map(|e| e.valor_total_procedimento).sum(),
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format, one line per entry.
    pub fn to_csv(&self) -> String {
        let mut csv = String::from(CSV_HEADER);

        for entry in &self.entries {
            let created_at = entry
                .created_at()
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| entry.timestamp.to_string());

            csv.push_str(&format!(
                "{},{},{},{},{},{},{:.2},{:.2},{:.2},{:.2},{:.2},{:.4},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{},{:.2}\n",
                escape_csv(&entry.codigo),
                created_at,
                entry.quantidade_pontos,
                entry.quantidade_auxiliares,
                entry.incremento,
                entry.anestesista_enabled,
                entry.valor_sp,
                entry.valor_sh,
                entry.valor_tsp,
                entry.valor_anestesista,
                entry.valor_rateio,
                entry.valor_ponto,
                entry.valor_cirurgiao,
                entry.valor_primeiro_auxiliar,
                entry.valor_segundo_auxiliar,
                entry.valor_terceiro_auxiliar,
                entry.valor_quarto_auxiliar,
                entry.valor_quinto_auxiliar,
                entry.total_pontos,
                entry.valor_total_procedimento,
            ));
        }

        csv
    }
}

/// History exporter.
pub struct HistoryExporter<'a, S: KeyValueStore> {
    ledger: &'a HistoryLedger<S>,
}

impl<'a, S: KeyValueStore> HistoryExporter<'a, S> {
    /// Create a new history exporter.
    pub fn new(ledger: &'a HistoryLedger<S>) -> Self {
        Self { ledger }
    }

    /// Export the whole history.
    pub fn export_all(&self) -> HistoryExport {
        HistoryExport::from_entries(&self.ledger.list())
    }

    /// Export entries created at or after `since` (epoch milliseconds).
    pub fn export_since(&self, since: i64) -> HistoryExport {
        let entries: Vec<FeeBreakdown> = self
            .ledger
            .list()
            .into_iter()
            .filter(|e| e.timestamp >= since)
            .collect();
        HistoryExport::from_entries(&entries)
    }
}

/// File name for a single-entry printable report.
///
/// `relatorio-honorarios-<code with dots as dashes>-<YYYY-MM-DD>.html`, dated
/// from the entry's timestamp in UTC.
pub fn report_file_name(entry: &FeeBreakdown) -> String {
    let date = entry.created_at().unwrap_or_default().format("%Y-%m-%d");
    format!(
        "relatorio-honorarios-{}-{}.html",
        entry.codigo.replace('.', "-"),
        date
    )
}

/// Escape a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator;
    use crate::models::ProcedureInput;
    use crate::store::MemoryStore;

    // 2024-06-20T16:13:20Z
    const JUNE_20: i64 = 1_718_900_000_000;

    fn make_entry(codigo: &str, timestamp: i64) -> FeeBreakdown {
        let mut input = ProcedureInput::new(codigo);
        input.quantidade_pontos = "100".into();
        input.valor_sp = "R$ 1.000,00".into();
        input.valor_sh = "R$ 500,00".into();
        input.quantidade_auxiliares = "1".into();
        calculator::calculate_at(&input, timestamp)
    }

    #[test]
    fn test_export_from_entries() {
        let entries = vec![make_entry("04.08.01.005-5", 2), make_entry("04.08.01.006-3", 1)];
        let export = HistoryExport::from_entries(&entries);

        assert_eq!(export.total_entries, 2);
        assert!((export.total_procedimentos - 3000.0).abs() < 1e-9);
        assert_eq!(export.entries[0].codigo, "04.08.01.005-5");
    }

    #[test]
    fn test_export_json() {
        let export = HistoryExport::from_entries(&[make_entry("04.08.01.005-5", JUNE_20)]);

        let json = export.to_json().unwrap();
        assert!(json.contains("04.08.01.005-5"));
        assert!(json.contains("\"valorCirurgiao\""));
        assert!(json.contains("\"total_procedimentos\""));
    }

    #[test]
    fn test_export_csv() {
        let export = HistoryExport::from_entries(&[
            make_entry("04.08.01.005-5", JUNE_20),
            make_entry("04.08.01.006-3", JUNE_20),
        ]);

        let csv = export.to_csv();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3); // Header + 2 entries
        assert!(lines[0].starts_with("codigo,created_at,"));
        assert!(lines[1].starts_with("04.08.01.005-5,2024-06-20T16:13:20+00:00,100,1,0,false,"));
        assert!(lines[1].ends_with(",130,1500.00"));
        assert_eq!(
            lines[0].split(',').count(),
            lines[1].split(',').count()
        );
    }

    #[test]
    fn test_csv_escaping() {
        assert_eq!(escape_csv("simple"), "simple");
        assert_eq!(escape_csv("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv("with\"quote"), "\"with\"\"quote\"");
    }

    #[test]
    fn test_exporter_since() {
        let ledger = HistoryLedger::new(MemoryStore::new());
        ledger.append(make_entry("04.08.01.005-5", 100));
        ledger.append(make_entry("04.08.01.006-3", 200));
        ledger.append(make_entry("04.08.01.007-1", 300));

        let exporter = HistoryExporter::new(&ledger);
        assert_eq!(exporter.export_all().total_entries, 3);

        let recent = exporter.export_since(200);
        assert_eq!(recent.total_entries, 2);
        assert_eq!(recent.entries[0].codigo, "04.08.01.007-1");
        assert_eq!(recent.entries[1].codigo, "04.08.01.006-3");
    }

    #[test]
    fn test_report_file_name() {
        let entry = make_entry("04.08.01.005-5", JUNE_20);
        assert_eq!(
            report_file_name(&entry),
            "relatorio-honorarios-04-08-01-005-5-2024-06-20.html"
        );
    }
}
