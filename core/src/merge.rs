//! Non-destructive merge of a partial record into the store.
//!
//! Layering per sub-category, FIELD BY FIELD:
//!
//!   defaults  <  stored  <  incoming
//!
//! The later source wins per field, never per category — a partial record
//! that only carries `ligacoes` leaves the stored `tma` untouched. After a
//! merge every field of every sub-record is concrete: absent stored fields
//! already landed on their defaults at deserialization time, and absent
//! incoming fields fall back to the stored value here.
//!
//! The default layer comes from fresh `Default` values each time, never
//! from a shared template object that could be mutated in place.

use crate::error::{SyncError, SyncResult};
use crate::record::{
    AttendanceMetrics, CallMetrics, PartialAttendance, PartialCalls, PartialQuality,
    PartialRecord, PartialTickets, PeriodData, QualityMetrics, TicketMetrics,
};
use crate::store::{normalize_email, MetricsStore};
use crate::types::Period;

/// Day-first local timestamp, the format the reporting side displays.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Merge `incoming` into `email`'s data for `period`.
///
/// The identity must already exist in the store — merging never creates
/// operators. The caller persists the store afterwards. Merging an empty
/// partial changes nothing but the timestamp; merging the same partial
/// twice is idempotent (timestamp aside).
pub fn merge_period(
    store: &mut MetricsStore,
    email: &str,
    period: Period,
    incoming: &PartialRecord,
) -> SyncResult<()> {
    let key = normalize_email(email);
    let operator = store
        .operators
        .get_mut(&key)
        .ok_or_else(|| SyncError::UnknownIdentity { name: email.to_string() })?;

    let stored = operator
        .login
        .meses
        .get(&period)
        .cloned()
        .unwrap_or_default();

    let merged = PeriodData {
        chamadas: merged_calls(&stored.chamadas, &incoming.chamadas),
        tickets: merged_tickets(&stored.tickets, &incoming.tickets),
        qualidade: merged_quality(&stored.qualidade, &incoming.qualidade),
        pausas: merged_attendance(&stored.pausas, &incoming.pausas),
        ultima_atualizacao: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
    };
    operator.login.meses.insert(period, merged);

    log::info!("merged {} for {key}", period.label());
    Ok(())
}

fn pick<T: Clone>(incoming: &Option<T>, stored: &T) -> T {
    incoming.clone().unwrap_or_else(|| stored.clone())
}

fn merged_calls(stored: &CallMetrics, incoming: &PartialCalls) -> CallMetrics {
    CallMetrics {
        ligacoes: incoming.ligacoes.unwrap_or(stored.ligacoes),
        tma: pick(&incoming.tma, &stored.tma),
        nota_telefone: pick(&incoming.nota_telefone, &stored.nota_telefone),
        avaliacoes_telefone: incoming.avaliacoes_telefone.unwrap_or(stored.avaliacoes_telefone),
    }
}

fn merged_tickets(stored: &TicketMetrics, incoming: &PartialTickets) -> TicketMetrics {
    TicketMetrics {
        tickets: incoming.tickets.unwrap_or(stored.tickets),
        tmt: pick(&incoming.tmt, &stored.tmt),
        nota_ticket: pick(&incoming.nota_ticket, &stored.nota_ticket),
        avaliacoes_ticket: incoming.avaliacoes_ticket.unwrap_or(stored.avaliacoes_ticket),
    }
}

fn merged_quality(stored: &QualityMetrics, incoming: &PartialQuality) -> QualityMetrics {
    QualityMetrics {
        nota_qualidade: pick(&incoming.nota_qualidade, &stored.nota_qualidade),
        avaliacoes_qualidade: incoming
            .avaliacoes_qualidade
            .unwrap_or(stored.avaliacoes_qualidade),
    }
}

fn merged_attendance(stored: &AttendanceMetrics, incoming: &PartialAttendance) -> AttendanceMetrics {
    AttendanceMetrics {
        total_escalado: pick(&incoming.total_escalado, &stored.total_escalado),
        total_realizado: pick(&incoming.total_realizado, &stored.total_realizado),
        absenteismo: pick(&incoming.absenteismo, &stored.absenteismo),
        atrasos: incoming.atrasos.unwrap_or(stored.atrasos),
        pausa_10_escalado: pick(&incoming.pausa_10_escalado, &stored.pausa_10_escalado),
        pausa_10_realizado: pick(&incoming.pausa_10_realizado, &stored.pausa_10_realizado),
        pausa_20_escalado: pick(&incoming.pausa_20_escalado, &stored.pausa_20_escalado),
        pausa_20_realizado: pick(&incoming.pausa_20_realizado, &stored.pausa_20_realizado),
        pausa_banheiro_escalado: pick(
            &incoming.pausa_banheiro_escalado,
            &stored.pausa_banheiro_escalado,
        ),
        pausa_banheiro_realizado: pick(
            &incoming.pausa_banheiro_realizado,
            &stored.pausa_banheiro_realizado,
        ),
        pausa_feedback_escalado: pick(
            &incoming.pausa_feedback_escalado,
            &stored.pausa_feedback_escalado,
        ),
        pausa_feedback_realizado: pick(
            &incoming.pausa_feedback_realizado,
            &stored.pausa_feedback_realizado,
        ),
        pausa_treinamento_escalado: pick(
            &incoming.pausa_treinamento_escalado,
            &stored.pausa_treinamento_escalado,
        ),
        pausa_treinamento_realizado: pick(
            &incoming.pausa_treinamento_realizado,
            &stored.pausa_treinamento_realizado,
        ),
        pausa_lanche_escalado: pick(&incoming.pausa_lanche_escalado, &stored.pausa_lanche_escalado),
        pausa_lanche_realizado: pick(
            &incoming.pausa_lanche_realizado,
            &stored.pausa_lanche_realizado,
        ),
        pausa_particular_escalado: pick(
            &incoming.pausa_particular_escalado,
            &stored.pausa_particular_escalado,
        ),
        pausa_particular_realizado: pick(
            &incoming.pausa_particular_realizado,
            &stored.pausa_particular_realizado,
        ),
        pausa_outros_escalado: pick(&incoming.pausa_outros_escalado, &stored.pausa_outros_escalado),
        pausa_outros_realizado: pick(
            &incoming.pausa_outros_realizado,
            &stored.pausa_outros_realizado,
        ),
    }
}
