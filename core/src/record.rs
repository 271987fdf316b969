//! Canonical per-operator metrics schema.
//!
//! The store is a JSON object keyed by normalized email; each value wraps a
//! `login` object whose `meses` map files one [`PeriodData`] per period.
//! Field names here ARE the wire format — they match the JSON the reporting
//! tooling reads, so renames are schema changes.
//!
//! RULES:
//!   - Stored structs are always complete: every field deserializes to a
//!     fixed default when absent (`#[serde(default)]` throughout).
//!   - Partial structs are decoder output only. They are never serialized;
//!     `None` means "this source said nothing about the field".

use crate::types::{Period, Score};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn zero_duration() -> String {
    "00:00:00".to_string()
}

// ── Stored sub-records ─────────────────────────────────────────

/// Telephone channel metrics (`chamadas`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallMetrics {
    pub ligacoes: u32,
    pub tma: String,
    pub nota_telefone: Score,
    pub avaliacoes_telefone: u32,
}

impl Default for CallMetrics {
    fn default() -> Self {
        Self {
            ligacoes: 0,
            tma: zero_duration(),
            nota_telefone: Score::default(),
            avaliacoes_telefone: 0,
        }
    }
}

/// Ticket channel metrics (`tickets`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketMetrics {
    pub tickets: u32,
    pub tmt: String,
    pub nota_ticket: Score,
    pub avaliacoes_ticket: u32,
}

impl Default for TicketMetrics {
    fn default() -> Self {
        Self {
            tickets: 0,
            tmt: zero_duration(),
            nota_ticket: Score::default(),
            avaliacoes_ticket: 0,
        }
    }
}

/// Monitoring/quality metrics (`qualidade`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityMetrics {
    pub nota_qualidade: Score,
    pub avaliacoes_qualidade: u32,
}

/// Attendance and pause metrics (`pausas`).
///
/// Scheduled (`*_escalado`) vs. actual (`*_realizado`) duration pairs for
/// the worked total and each of the eight pause categories the workforce
/// sheet tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendanceMetrics {
    pub total_escalado: String,
    pub total_realizado: String,
    pub absenteismo: Score,
    pub atrasos: u32,
    pub pausa_10_escalado: String,
    pub pausa_10_realizado: String,
    pub pausa_20_escalado: String,
    pub pausa_20_realizado: String,
    pub pausa_banheiro_escalado: String,
    pub pausa_banheiro_realizado: String,
    pub pausa_feedback_escalado: String,
    pub pausa_feedback_realizado: String,
    pub pausa_treinamento_escalado: String,
    pub pausa_treinamento_realizado: String,
    pub pausa_lanche_escalado: String,
    pub pausa_lanche_realizado: String,
    pub pausa_particular_escalado: String,
    pub pausa_particular_realizado: String,
    pub pausa_outros_escalado: String,
    pub pausa_outros_realizado: String,
}

impl Default for AttendanceMetrics {
    fn default() -> Self {
        Self {
            total_escalado: zero_duration(),
            total_realizado: zero_duration(),
            absenteismo: Score::default(),
            atrasos: 0,
            pausa_10_escalado: zero_duration(),
            pausa_10_realizado: zero_duration(),
            pausa_20_escalado: zero_duration(),
            pausa_20_realizado: zero_duration(),
            pausa_banheiro_escalado: zero_duration(),
            pausa_banheiro_realizado: zero_duration(),
            pausa_feedback_escalado: zero_duration(),
            pausa_feedback_realizado: zero_duration(),
            pausa_treinamento_escalado: zero_duration(),
            pausa_treinamento_realizado: zero_duration(),
            pausa_lanche_escalado: zero_duration(),
            pausa_lanche_realizado: zero_duration(),
            pausa_particular_escalado: zero_duration(),
            pausa_particular_realizado: zero_duration(),
            pausa_outros_escalado: zero_duration(),
            pausa_outros_realizado: zero_duration(),
        }
    }
}

/// One period's worth of metrics: exactly four sub-records plus the stamp
/// of the last merge that touched it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodData {
    pub chamadas: CallMetrics,
    pub tickets: TicketMetrics,
    pub qualidade: QualityMetrics,
    pub pausas: AttendanceMetrics,
    pub ultima_atualizacao: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginData {
    pub meses: BTreeMap<Period, PeriodData>,
}

/// Store value for one operator identity.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorRecord {
    pub login: LoginData,
}

// ── Decoder output (transient, never persisted) ────────────────

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PartialCalls {
    pub ligacoes: Option<u32>,
    pub tma: Option<String>,
    pub nota_telefone: Option<Score>,
    pub avaliacoes_telefone: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PartialTickets {
    pub tickets: Option<u32>,
    pub tmt: Option<String>,
    pub nota_ticket: Option<Score>,
    pub avaliacoes_ticket: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PartialQuality {
    pub nota_qualidade: Option<Score>,
    pub avaliacoes_qualidade: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PartialAttendance {
    pub total_escalado: Option<String>,
    pub total_realizado: Option<String>,
    pub absenteismo: Option<Score>,
    pub atrasos: Option<u32>,
    pub pausa_10_escalado: Option<String>,
    pub pausa_10_realizado: Option<String>,
    pub pausa_20_escalado: Option<String>,
    pub pausa_20_realizado: Option<String>,
    pub pausa_banheiro_escalado: Option<String>,
    pub pausa_banheiro_realizado: Option<String>,
    pub pausa_feedback_escalado: Option<String>,
    pub pausa_feedback_realizado: Option<String>,
    pub pausa_treinamento_escalado: Option<String>,
    pub pausa_treinamento_realizado: Option<String>,
    pub pausa_lanche_escalado: Option<String>,
    pub pausa_lanche_realizado: Option<String>,
    pub pausa_particular_escalado: Option<String>,
    pub pausa_particular_realizado: Option<String>,
    pub pausa_outros_escalado: Option<String>,
    pub pausa_outros_realizado: Option<String>,
}

/// Partial record produced by either decoder. All four sub-category
/// buckets exist up front (possibly with every field `None`) so the merge
/// can always address all of them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PartialRecord {
    pub chamadas: PartialCalls,
    pub tickets: PartialTickets,
    pub qualidade: PartialQuality,
    pub pausas: PartialAttendance,
}

impl PartialRecord {
    /// True when no source field matched at all.
    pub fn is_empty(&self) -> bool {
        self == &PartialRecord::default()
    }
}
