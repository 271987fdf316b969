//! Column-positional decoder for the workforce performance sheet.
//!
//! The sheet has one fixed 31-column layout. Column positions live ONLY in
//! the [`Column`] enum's discriminants — nothing else in the crate indexes
//! a row by number, so a reordered sheet is a one-place edit here.
//!
//! RULES:
//!   - Row 0 is the header. Never data.
//!   - A cell is coerced by the column's semantic kind, and a fixed set of
//!     placeholder/error sentinels means "no data", never a value. A real
//!     zero typed into a count column still counts; a `0,00%` in a percent
//!     column does not — the sheet renders "not computed yet" that way.

use crate::error::{SyncError, SyncResult};
use crate::record::PartialRecord;
use crate::types::Score;

/// Named column roles, discriminant = 0-based sheet position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum Column {
    OperatorName = 0,
    Ligacoes = 1,
    Tma = 2,
    NotaTelefone = 3,
    AvaliacoesTelefone = 4,
    Tickets = 5,
    Tmt = 6,
    NotaTicket = 7,
    AvaliacoesTicket = 8,
    NotaQualidade = 9,
    AvaliacoesQualidade = 10,
    Absenteismo = 11,
    Atrasos = 12,
    TotalEscalado = 13,
    TotalRealizado = 14,
    Pausa10Escalado = 15,
    Pausa10Realizado = 16,
    Pausa20Escalado = 17,
    Pausa20Realizado = 18,
    PausaBanheiroEscalado = 19,
    PausaBanheiroRealizado = 20,
    PausaFeedbackEscalado = 21,
    PausaFeedbackRealizado = 22,
    PausaTreinamentoEscalado = 23,
    PausaTreinamentoRealizado = 24,
    PausaLancheEscalado = 25,
    PausaLancheRealizado = 26,
    PausaParticularEscalado = 27,
    PausaParticularRealizado = 28,
    PausaOutrosEscalado = 29,
    PausaOutrosRealizado = 30,
}

impl Column {
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A structurally valid sheet carries the full layout.
pub const MIN_COLUMNS: usize = 31;

/// Placeholders the sheet uses where a value was never computed.
const PLACEHOLDERS: &[&str] = &["", "-", "0", "0%", "0,00%", "##"];

/// Standard spreadsheet error codes, matched case-insensitively.
const SHEET_ERRORS: &[&str] = &[
    "#N/A", "#VALUE!", "#REF!", "#DIV/0!", "#NAME?", "#NULL!", "#NUM!",
];

fn is_sentinel(trimmed: &str) -> bool {
    PLACEHOLDERS.contains(&trimmed)
        || SHEET_ERRORS.iter().any(|e| e.eq_ignore_ascii_case(trimmed))
}

// ── Cell coercions, one per semantic column kind ───────────────

/// Count cell: decimal comma tolerated. Empty or unparseable is `None` —
/// distinct from a genuine zero.
pub fn int_cell(raw: &str) -> Option<u32> {
    let cleaned = raw.trim().replace(',', ".");
    if cleaned.is_empty() {
        return None;
    }
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| *v >= 0.0)
        .map(|v| v as u32)
}

/// Decimal cell with the same locale normalization and `None` fallback.
pub fn decimal_cell(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace(',', ".");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// Percent cell: the displayed string round-trips verbatim, so reports
/// show exactly what the sheet showed — unless it is a sentinel.
pub fn percent_cell(raw: &str) -> Option<String> {
    if is_sentinel(raw.trim()) {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Duration cell (`hh:mm:ss` as text): verbatim unless empty or `-`.
pub fn time_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" {
        None
    } else {
        Some(raw.to_string())
    }
}

fn cell(row: &[String], column: Column) -> &str {
    row.get(column.index()).map(String::as_str).unwrap_or("")
}

fn percent_score(row: &[String], column: Column) -> Option<Score> {
    percent_cell(cell(row, column)).map(Score::Raw)
}

fn time_text(row: &[String], column: Column) -> Option<String> {
    time_cell(cell(row, column))
}

/// Decode one data row into a partial record. Short rows read as all-empty
/// cells past their end; missing data stays `None`, never zero.
pub fn decode_row(row: &[String]) -> PartialRecord {
    let mut record = PartialRecord::default();

    record.chamadas.ligacoes = int_cell(cell(row, Column::Ligacoes));
    record.chamadas.tma = time_text(row, Column::Tma);
    record.chamadas.nota_telefone = percent_score(row, Column::NotaTelefone);
    record.chamadas.avaliacoes_telefone = int_cell(cell(row, Column::AvaliacoesTelefone));

    record.tickets.tickets = int_cell(cell(row, Column::Tickets));
    record.tickets.tmt = time_text(row, Column::Tmt);
    record.tickets.nota_ticket = percent_score(row, Column::NotaTicket);
    record.tickets.avaliacoes_ticket = int_cell(cell(row, Column::AvaliacoesTicket));

    // The monitoring grade is a plain decimal in the sheet, unlike the
    // channel scores which render as percents.
    record.qualidade.nota_qualidade =
        decimal_cell(cell(row, Column::NotaQualidade)).map(Score::Num);
    record.qualidade.avaliacoes_qualidade = int_cell(cell(row, Column::AvaliacoesQualidade));

    let pausas = &mut record.pausas;
    pausas.absenteismo = percent_score(row, Column::Absenteismo);
    pausas.atrasos = int_cell(cell(row, Column::Atrasos));
    pausas.total_escalado = time_text(row, Column::TotalEscalado);
    pausas.total_realizado = time_text(row, Column::TotalRealizado);
    pausas.pausa_10_escalado = time_text(row, Column::Pausa10Escalado);
    pausas.pausa_10_realizado = time_text(row, Column::Pausa10Realizado);
    pausas.pausa_20_escalado = time_text(row, Column::Pausa20Escalado);
    pausas.pausa_20_realizado = time_text(row, Column::Pausa20Realizado);
    pausas.pausa_banheiro_escalado = time_text(row, Column::PausaBanheiroEscalado);
    pausas.pausa_banheiro_realizado = time_text(row, Column::PausaBanheiroRealizado);
    pausas.pausa_feedback_escalado = time_text(row, Column::PausaFeedbackEscalado);
    pausas.pausa_feedback_realizado = time_text(row, Column::PausaFeedbackRealizado);
    pausas.pausa_treinamento_escalado = time_text(row, Column::PausaTreinamentoEscalado);
    pausas.pausa_treinamento_realizado = time_text(row, Column::PausaTreinamentoRealizado);
    pausas.pausa_lanche_escalado = time_text(row, Column::PausaLancheEscalado);
    pausas.pausa_lanche_realizado = time_text(row, Column::PausaLancheRealizado);
    pausas.pausa_particular_escalado = time_text(row, Column::PausaParticularEscalado);
    pausas.pausa_particular_realizado = time_text(row, Column::PausaParticularRealizado);
    pausas.pausa_outros_escalado = time_text(row, Column::PausaOutrosEscalado);
    pausas.pausa_outros_realizado = time_text(row, Column::PausaOutrosRealizado);

    record
}

/// Scan the grid for an operator by display name (case-insensitive,
/// trimmed; first match wins) and decode that row.
///
/// A header narrower than the layout is a structural error — the sheet
/// changed shape and nothing downstream can be trusted. An operator absent
/// from every row is `NotFound`, a different condition from a row found
/// with all-sentinel cells (which decodes to an all-`None` record).
pub fn find_operator(grid: &[Vec<String>], operator: &str) -> SyncResult<PartialRecord> {
    let header = grid.first().ok_or(SyncError::StructuralMismatch {
        expected: MIN_COLUMNS,
        got: 0,
    })?;
    if header.len() < MIN_COLUMNS {
        return Err(SyncError::StructuralMismatch {
            expected: MIN_COLUMNS,
            got: header.len(),
        });
    }

    let wanted = operator.trim().to_lowercase();
    for row in &grid[1..] {
        let name = cell(row, Column::OperatorName).trim().to_lowercase();
        if !name.is_empty() && name == wanted {
            return Ok(decode_row(row));
        }
    }
    Err(SyncError::NotFound {
        operator: operator.trim().to_string(),
    })
}
