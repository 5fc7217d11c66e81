//! Medical fee apportionment.
//!
//! Pipeline: Validation → Normalization → Computation
//!
//! Computation, given P points, A assistants, I% increment:
//!
//! ```text
//! SP' = SP * (1 + I/100)          SH' = SH * (1 + I/100)    (only when I > 0)
//! anestesista = SP' * 0.30        (when enabled)
//! rateio      = SP' - anestesista
//! totalPontos = P + Σ unlocked assistant tiers
//! valorPonto  = rateio / totalPontos   (0 when totalPontos <= 0)
//! share       = tier points * valorPonto
//! total       = SH' + TSP + SP'
//! ```

mod schedule;

pub use schedule::*;

use tracing::debug;

use crate::models::{FeeBreakdown, NormalizedProcedure, ProcedureInput};
use crate::normalizer::{self, ValidationError};

/// Compute a breakdown from raw form input, stamped with the current time.
///
/// Does not validate the procedure code; callers that accept user input
/// should go through [`calculate_validated`].
pub fn calculate_medical_fees(input: &ProcedureInput) -> FeeBreakdown {
    calculate_at(input, chrono::Utc::now().timestamp_millis())
}

/// Compute a breakdown from raw form input with an explicit timestamp.
pub fn calculate_at(input: &ProcedureInput, timestamp: i64) -> FeeBreakdown {
    compute(&normalizer::normalize(input), timestamp)
}

/// Validate the procedure code, then compute.
pub fn calculate_validated(input: &ProcedureInput) -> Result<FeeBreakdown, ValidationError> {
    normalizer::validate_procedure_code(&input.codigo)?;
    Ok(calculate_medical_fees(input))
}

/// Compute a breakdown from normalized values.
///
/// Never fails: out-of-range values produce zeroed or unusual amounts
/// rather than errors.
pub fn compute(procedure: &NormalizedProcedure, timestamp: i64) -> FeeBreakdown {
    let valor_sp = apply_increment(procedure.valor_sp, procedure.incremento);
    let valor_sh = apply_increment(procedure.valor_sh, procedure.incremento);

    let valor_anestesista = if procedure.anestesista_enabled {
        valor_sp * ANESTHESIOLOGIST_SHARE
    } else {
        0.0
    };
    let valor_rateio = valor_sp - valor_anestesista;

    let points = points_for_tier(
        procedure.quantidade_pontos,
        procedure.quantidade_auxiliares,
    );
    let total_pontos = points.total();
    let valor_ponto = if total_pontos > 0.0 {
        valor_rateio / total_pontos
    } else {
        0.0
    };

    let [primeiro, segundo, terceiro, quarto, quinto] = points.auxiliares;
    let valor_total_procedimento = valor_sh + procedure.valor_tsp + valor_sp;

    debug!(
        codigo = %procedure.codigo,
        total_pontos,
        valor_ponto,
        valor_total_procedimento,
        "computed medical fees"
    );

    FeeBreakdown {
        codigo: procedure.codigo.clone(),
        quantidade_pontos: procedure.quantidade_pontos,
        valor_sp,
        valor_sh,
        valor_tsp: procedure.valor_tsp,
        incremento: procedure.incremento,
        quantidade_auxiliares: procedure.quantidade_auxiliares,
        valor_anestesista,
        valor_rateio,
        valor_ponto,
        valor_cirurgiao: points.cirurgiao * valor_ponto,
        valor_primeiro_auxiliar: primeiro * valor_ponto,
        valor_segundo_auxiliar: segundo * valor_ponto,
        valor_terceiro_auxiliar: terceiro * valor_ponto,
        valor_quarto_auxiliar: quarto * valor_ponto,
        valor_quinto_auxiliar: quinto * valor_ponto,
        total_pontos,
        valor_total_procedimento,
        anestesista_enabled: procedure.anestesista_enabled,
        timestamp,
    }
}

/// Apply a percentage increment; zero or negative percentages leave the value as is.
fn apply_increment(value: f64, incremento: i64) -> f64 {
    if incremento > 0 {
        value * (1.0 + incremento as f64 / 100.0)
    } else {
        value
    }
}
