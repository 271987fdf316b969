//! Tolerant key-value parser for free-text performance entries.
//!
//! An entry line looks like:
//!
//!   Gabriel Araujo|Novembro|ligacoes:150|tma:00:05:30|nota_telefone:4.8
//!
//! Supervisors type these by hand, so the parser accepts many spellings per
//! field (Portuguese with and without diacritics, plus English) and never
//! fails on a bad number — a malformed value coerces to zero, an unknown
//! key is skipped. Only the envelope (too few `|` segments) is an error.
//!
//! The synonym table is data, not control flow: one static slice mapping a
//! lower-cased key to its canonical field. Adding a spelling is one line.

use crate::error::{SyncError, SyncResult};
use crate::record::PartialRecord;
use crate::types::Score;

/// Canonical destination of a recognized key: one field in one of the four
/// sub-category buckets, with its coercion implied by the field itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    // chamadas
    Ligacoes,
    Tma,
    NotaTelefone,
    AvaliacoesTelefone,
    // tickets
    Tickets,
    Tmt,
    NotaTicket,
    AvaliacoesTicket,
    // qualidade
    NotaQualidade,
    AvaliacoesQualidade,
    // pausas
    TotalEscalado,
    TotalRealizado,
    Absenteismo,
    Atrasos,
}

/// Key synonyms, all lower-cased. Later table entries never shadow earlier
/// ones — every spelling maps to exactly one canonical field.
pub static SYNONYMS: &[(&str, Field)] = &[
    ("ligacoes", Field::Ligacoes),
    ("ligações", Field::Ligacoes),
    ("chamadas", Field::Ligacoes),
    ("calls", Field::Ligacoes),
    ("tma", Field::Tma),
    ("tempo_medio_atendimento", Field::Tma),
    ("tempo médio de atendimento", Field::Tma),
    ("aht", Field::Tma),
    ("nota_telefone", Field::NotaTelefone),
    ("nota telefone", Field::NotaTelefone),
    ("nota_tel", Field::NotaTelefone),
    ("phone_score", Field::NotaTelefone),
    ("avaliacoes_telefone", Field::AvaliacoesTelefone),
    ("avaliações_telefone", Field::AvaliacoesTelefone),
    ("pesquisas_telefone", Field::AvaliacoesTelefone),
    ("phone_surveys", Field::AvaliacoesTelefone),
    ("tickets", Field::Tickets),
    ("ticket", Field::Tickets),
    ("chamados", Field::Tickets),
    ("tmt", Field::Tmt),
    ("tempo_medio_ticket", Field::Tmt),
    ("tempo médio de ticket", Field::Tmt),
    ("nota_ticket", Field::NotaTicket),
    ("nota ticket", Field::NotaTicket),
    ("ticket_score", Field::NotaTicket),
    ("avaliacoes_ticket", Field::AvaliacoesTicket),
    ("avaliações_ticket", Field::AvaliacoesTicket),
    ("pesquisas_ticket", Field::AvaliacoesTicket),
    ("ticket_surveys", Field::AvaliacoesTicket),
    ("nota_qualidade", Field::NotaQualidade),
    ("qualidade", Field::NotaQualidade),
    ("monitoria", Field::NotaQualidade),
    ("quality", Field::NotaQualidade),
    ("avaliacoes_qualidade", Field::AvaliacoesQualidade),
    ("avaliações_qualidade", Field::AvaliacoesQualidade),
    ("monitorias", Field::AvaliacoesQualidade),
    ("evaluations", Field::AvaliacoesQualidade),
    ("total_escalado", Field::TotalEscalado),
    ("escalado", Field::TotalEscalado),
    ("scheduled", Field::TotalEscalado),
    ("total_realizado", Field::TotalRealizado),
    ("realizado", Field::TotalRealizado),
    ("trabalhado", Field::TotalRealizado),
    ("worked", Field::TotalRealizado),
    ("absenteismo", Field::Absenteismo),
    ("absenteísmo", Field::Absenteismo),
    ("abs", Field::Absenteismo),
    ("absenteeism", Field::Absenteismo),
    ("atrasos", Field::Atrasos),
    ("atraso", Field::Atrasos),
    ("tardiness", Field::Atrasos),
];

pub fn canonical_field(key: &str) -> Option<Field> {
    SYNONYMS
        .iter()
        .find(|(synonym, _)| *synonym == key)
        .map(|(_, field)| *field)
}

/// A fully split text entry, ready for identity resolution and merge.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEntry {
    pub operator: String,
    pub period: String,
    pub record: PartialRecord,
}

/// Split a full entry line into operator, period label and parsed fields.
/// Fewer than 3 pipe-delimited segments is the one hard error here.
pub fn parse_entry(line: &str) -> SyncResult<TextEntry> {
    let segments: Vec<&str> = line.split('|').collect();
    if segments.len() < 3 {
        return Err(SyncError::MalformedEntry {
            reason: format!(
                "expected 'nome|mes|campo:valor|...', got {} segment(s)",
                segments.len()
            ),
        });
    }
    Ok(TextEntry {
        operator: segments[0].trim().to_string(),
        period: segments[1].trim().to_string(),
        record: parse_fields(&segments[2..].join("|")),
    })
}

/// Parse the `campo:valor|campo:valor` tail of an entry.
///
/// Each token splits at its FIRST colon only — duration values like
/// `00:05:30` keep their inner colons. A key appearing twice keeps the
/// last occurrence. Unrecognized keys are skipped silently.
pub fn parse_fields(text: &str) -> PartialRecord {
    let mut record = PartialRecord::default();
    for token in text.split('|') {
        let Some((key, value)) = token.split_once(':') else {
            continue;
        };
        let key = key.trim().to_lowercase();
        let value = value.trim();
        match canonical_field(&key) {
            Some(field) => apply(&mut record, field, value),
            None => log::debug!("ignoring unrecognized field key '{key}'"),
        }
    }
    record
}

fn apply(record: &mut PartialRecord, field: Field, raw: &str) {
    match field {
        Field::Ligacoes => record.chamadas.ligacoes = Some(parse_count(raw)),
        Field::Tma => record.chamadas.tma = Some(raw.to_string()),
        Field::NotaTelefone => record.chamadas.nota_telefone = Some(parse_score(raw)),
        Field::AvaliacoesTelefone => {
            record.chamadas.avaliacoes_telefone = Some(parse_count(raw));
        }
        Field::Tickets => record.tickets.tickets = Some(parse_count(raw)),
        Field::Tmt => record.tickets.tmt = Some(raw.to_string()),
        Field::NotaTicket => record.tickets.nota_ticket = Some(parse_score(raw)),
        Field::AvaliacoesTicket => record.tickets.avaliacoes_ticket = Some(parse_count(raw)),
        Field::NotaQualidade => record.qualidade.nota_qualidade = Some(parse_score(raw)),
        Field::AvaliacoesQualidade => {
            record.qualidade.avaliacoes_qualidade = Some(parse_count(raw));
        }
        Field::TotalEscalado => record.pausas.total_escalado = Some(raw.to_string()),
        Field::TotalRealizado => record.pausas.total_realizado = Some(raw.to_string()),
        Field::Absenteismo => record.pausas.absenteismo = Some(parse_score(raw)),
        Field::Atrasos => record.pausas.atrasos = Some(parse_count(raw)),
    }
}

/// Integer coercion: decimal comma tolerated, anything unparseable is 0.
/// "Never block on a malformed number" — a typo'd count must not kill a
/// whole batch entry.
fn parse_count(raw: &str) -> u32 {
    let cleaned = raw.trim().replace(',', ".");
    match cleaned.parse::<u32>() {
        Ok(n) => n,
        Err(_) => cleaned.parse::<f64>().map(|v| v.max(0.0) as u32).unwrap_or(0),
    }
}

/// Decimal coercion with the same zero fallback.
fn parse_score(raw: &str) -> Score {
    Score::Num(raw.trim().replace(',', ".").parse().unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every synonym must hit the table with its exact lower-cased form —
    /// `parse_fields` lower-cases the key before lookup, so an upper-cased
    /// table entry would be unreachable.
    #[test]
    fn synonym_keys_are_lowercase() {
        for (key, _) in SYNONYMS {
            assert_eq!(
                *key,
                key.to_lowercase().as_str(),
                "synonym '{key}' is not stored lower-cased"
            );
        }
    }

    /// No spelling may route to two different canonical fields.
    #[test]
    fn synonym_keys_are_unambiguous() {
        for (i, (key, field)) in SYNONYMS.iter().enumerate() {
            for (other_key, other_field) in &SYNONYMS[i + 1..] {
                assert!(
                    key != other_key || field == other_field,
                    "synonym '{key}' maps to both {field:?} and {other_field:?}"
                );
            }
        }
    }
}
