//! Medical Fees Core Library
//!
//! Hospital procedure fee apportionment with a persistent calculation history.
//!
//! # Architecture
//!
//! ```text
//! Form input (masked strings)
//!         │
//!         ▼
//!   Normalizer ── validate code ──✗──▶ ValidationError (never reaches calculator)
//!         │
//!         ▼
//!   Calculator (pure)
//!         │
//!         ▼
//!   FeeBreakdown ──────────────┬──────────────────────┐
//!         │                    │                      │
//!         ▼                    ▼                      ▼
//!      Display          History Ledger            Export
//!                     (KeyValueStore: SQLite     (JSON / CSV)
//!                      or in-memory)
//! ```
//!
//! # Core Principle
//!
//! **Nothing after validation fails.** Unparseable numbers become zero, zero
//! points yield zero shares, and storage failures are logged and masked.
//!
//! # Modules
//!
//! - [`models`]: Domain types (ProcedureInput, FeeBreakdown)
//! - [`normalizer`]: Procedure code mask/validation, currency locale handling
//! - [`calculator`]: Point-weight schedule and fee computation
//! - [`store`]: Key-value store trait with SQLite and in-memory backends
//! - [`ledger`]: Newest-first calculation history
//! - [`export`]: JSON and CSV history export
//! - [`config`]: Runtime configuration
//! - [`logging`]: tracing subscriber setup

pub mod calculator;
pub mod config;
pub mod export;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod normalizer;
pub mod store;

// Re-export commonly used types
pub use config::Config;
pub use export::{HistoryExport, HistoryExporter};
pub use ledger::HistoryLedger;
pub use models::{FeeBreakdown, NormalizedProcedure, ProcedureInput};
pub use normalizer::{CurrencyLocale, Normalizer, ValidationError};
pub use store::{Database, KeyValueStore, MemoryStore, StoreError};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use tracing::info;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum MedicalFeesError {
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<StoreError> for MedicalFeesError {
    fn from(e: StoreError) -> Self {
        MedicalFeesError::StorageError(e.to_string())
    }
}

impl From<ValidationError> for MedicalFeesError {
    fn from(e: ValidationError) -> Self {
        MedicalFeesError::InvalidInput(e.to_string())
    }
}

impl From<serde_json::Error> for MedicalFeesError {
    fn from(e: serde_json::Error) -> Self {
        MedicalFeesError::SerializationError(e.to_string())
    }
}

impl From<std::io::Error> for MedicalFeesError {
    fn from(e: std::io::Error) -> Self {
        MedicalFeesError::StorageError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for MedicalFeesError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        MedicalFeesError::StorageError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Stateless Functions (exported to FFI)
// =========================================================================

/// Install the default log subscriber.
#[uniffi::export]
pub fn init_logging() {
    logging::init();
}

/// Mask a procedure code as typed.
#[uniffi::export]
pub fn format_procedure_code(raw: String) -> String {
    normalizer::format_procedure_code(&raw)
}

/// Validate a procedure code; returns the rejection message, if any.
#[uniffi::export]
pub fn validate_procedure_code(masked: String) -> Option<String> {
    normalizer::validate_procedure_code(&masked)
        .err()
        .map(|e| e.to_string())
}

/// Parse Brazilian Real text.
#[uniffi::export]
pub fn parse_currency(formatted: String) -> f64 {
    normalizer::parse_currency(&formatted)
}

/// Format an amount as Brazilian Real.
#[uniffi::export]
pub fn format_currency(amount: f64) -> String {
    normalizer::format_currency(amount)
}

/// Brazilian Real input mask (digits read as cents).
#[uniffi::export]
pub fn mask_currency_input(raw: String) -> String {
    normalizer::mask_currency_input(&raw)
}

/// Compute a breakdown without validating or recording it.
#[uniffi::export]
pub fn calculate_medical_fees(input: FfiProcedureInput) -> FfiFeeBreakdown {
    let input: ProcedureInput = input.into();
    calculator::calculate_medical_fees(&input).into()
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a database at the given path.
#[uniffi::export]
pub fn open_database(path: String) -> Result<Arc<MedicalFeesCore>, MedicalFeesError> {
    let db = Database::open(&path)?;
    Ok(Arc::new(MedicalFeesCore::new(
        HistoryLedger::new(db),
        Normalizer::new(),
    )))
}

/// Create an in-memory database (for testing).
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<MedicalFeesCore>, MedicalFeesError> {
    let db = Database::open_in_memory()?;
    Ok(Arc::new(MedicalFeesCore::new(
        HistoryLedger::new(db),
        Normalizer::new(),
    )))
}

/// Open using configuration from the environment.
#[uniffi::export]
pub fn open_from_env() -> Result<Arc<MedicalFeesCore>, MedicalFeesError> {
    Ok(Arc::new(MedicalFeesCore::from_config(&Config::from_env())?))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe calculator + history wrapper for FFI.
#[derive(uniffi::Object)]
pub struct MedicalFeesCore {
    ledger: Arc<Mutex<HistoryLedger<Database>>>,
    normalizer: Normalizer,
}

impl MedicalFeesCore {
    fn new(ledger: HistoryLedger<Database>, normalizer: Normalizer) -> Self {
        Self {
            ledger: Arc::new(Mutex::new(ledger)),
            normalizer,
        }
    }

    /// Open the configured database, creating its directory if needed.
    pub fn from_config(config: &Config) -> Result<Self, MedicalFeesError> {
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::open(&config.database_path)?;
        info!(
            path = %config.database_path.display(),
            locale = config.locale.tag,
            "opened medical fees database"
        );
        Ok(Self::new(
            HistoryLedger::with_key(db, config.history_key.clone()),
            Normalizer::with_locale(config.locale),
        ))
    }
}

#[uniffi::export]
impl MedicalFeesCore {
    // =========================================================================
    // Calculation
    // =========================================================================

    /// Validate, compute and record a calculation.
    pub fn submit(&self, input: FfiProcedureInput) -> Result<FfiFeeBreakdown, MedicalFeesError> {
        let input: ProcedureInput = input.into();
        normalizer::validate_procedure_code(&input.codigo)?;

        let procedure = self.normalizer.normalize(&input);
        let result = calculator::compute(&procedure, chrono::Utc::now().timestamp_millis());

        let ledger = self.ledger.lock()?;
        ledger.append(result.clone());
        info!(codigo = %result.codigo, "calculation recorded");

        Ok(result.into())
    }

    /// Format an amount with the configured locale.
    pub fn format_amount(&self, amount: f64) -> String {
        self.normalizer.format_currency(amount)
    }

    /// Parse currency text with the configured locale.
    pub fn parse_amount(&self, formatted: String) -> f64 {
        self.normalizer.parse_currency(&formatted)
    }

    // =========================================================================
    // History
    // =========================================================================

    /// Calculation history, newest first.
    pub fn history(&self) -> Result<Vec<FfiFeeBreakdown>, MedicalFeesError> {
        let ledger = self.ledger.lock()?;
        Ok(ledger.list().into_iter().map(|r| r.into()).collect())
    }

    /// Number of recorded calculations.
    pub fn history_count(&self) -> Result<u32, MedicalFeesError> {
        let ledger = self.ledger.lock()?;
        Ok(saturating_count(ledger.len()))
    }

    /// Remove every recorded calculation.
    pub fn clear_history(&self) -> Result<(), MedicalFeesError> {
        let ledger = self.ledger.lock()?;
        ledger.clear();
        info!("calculation history cleared");
        Ok(())
    }

    // =========================================================================
    // Export Operations
    // =========================================================================

    /// Export history as JSON.
    pub fn export_history_json(&self) -> Result<String, MedicalFeesError> {
        let ledger = self.ledger.lock()?;
        let export = HistoryExporter::new(&ledger).export_all();
        Ok(export.to_json()?)
    }

    /// Export history as CSV.
    pub fn export_history_csv(&self) -> Result<String, MedicalFeesError> {
        let ledger = self.ledger.lock()?;
        Ok(HistoryExporter::new(&ledger).export_all().to_csv())
    }
}

/// Entry count as exposed over FFI, capped at `u32::MAX`.
fn saturating_count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe procedure form input.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiProcedureInput {
    pub codigo: String,
    pub quantidade_pontos: String,
    pub valor_sp: String,
    pub valor_sh: String,
    pub valor_tsp: String,
    pub incremento: String,
    pub quantidade_auxiliares: String,
    pub anestesista_enabled: bool,
}

impl From<FfiProcedureInput> for ProcedureInput {
    fn from(input: FfiProcedureInput) -> Self {
        ProcedureInput {
            codigo: input.codigo,
            quantidade_pontos: input.quantidade_pontos,
            valor_sp: input.valor_sp,
            valor_sh: input.valor_sh,
            valor_tsp: input.valor_tsp,
            incremento: input.incremento,
            quantidade_auxiliares: input.quantidade_auxiliares,
            anestesista_enabled: input.anestesista_enabled,
        }
    }
}

/// FFI-safe fee breakdown.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFeeBreakdown {
    pub codigo: String,
    pub quantidade_pontos: i64,
    pub valor_sp: f64,
    pub valor_sh: f64,
    pub valor_tsp: f64,
    pub incremento: i64,
    pub quantidade_auxiliares: i64,
    pub valor_anestesista: f64,
    pub valor_rateio: f64,
    pub valor_ponto: f64,
    pub valor_cirurgiao: f64,
    pub valor_primeiro_auxiliar: f64,
    pub valor_segundo_auxiliar: f64,
    pub valor_terceiro_auxiliar: f64,
    pub valor_quarto_auxiliar: f64,
    pub valor_quinto_auxiliar: f64,
    /// 2nd..5th assistants combined (single line in the result card)
    pub valor_segundo_ao_quinto_auxiliar: f64,
    pub total_pontos: f64,
    pub valor_total_procedimento: f64,
    pub anestesista_enabled: bool,
    pub timestamp: i64,
}

impl From<FeeBreakdown> for FfiFeeBreakdown {
    fn from(result: FeeBreakdown) -> Self {
        Self {
            valor_segundo_ao_quinto_auxiliar: result.valor_segundo_ao_quinto_auxiliar(),
            codigo: result.codigo,
            quantidade_pontos: result.quantidade_pontos,
            valor_sp: result.valor_sp,
            valor_sh: result.valor_sh,
            valor_tsp: result.valor_tsp,
            incremento: result.incremento,
            quantidade_auxiliares: result.quantidade_auxiliares,
            valor_anestesista: result.valor_anestesista,
            valor_rateio: result.valor_rateio,
            valor_ponto: result.valor_ponto,
            valor_cirurgiao: result.valor_cirurgiao,
            valor_primeiro_auxiliar: result.valor_primeiro_auxiliar,
            valor_segundo_auxiliar: result.valor_segundo_auxiliar,
            valor_terceiro_auxiliar: result.valor_terceiro_auxiliar,
            valor_quarto_auxiliar: result.valor_quarto_auxiliar,
            valor_quinto_auxiliar: result.valor_quinto_auxiliar,
            total_pontos: result.total_pontos,
            valor_total_procedimento: result.valor_total_procedimento,
            anestesista_enabled: result.anestesista_enabled,
            timestamp: result.timestamp,
        }
    }
}
