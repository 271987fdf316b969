//! Shared primitive types used across the sync pipeline.

use serde::{Deserialize, Serialize};

/// A reporting period. The store files metrics under exactly these three
/// month labels; anything else is rejected before it reaches the merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Period {
    Outubro,
    Novembro,
    Dezembro,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Outubro, Period::Novembro, Period::Dezembro];

    pub fn label(self) -> &'static str {
        match self {
            Period::Outubro => "Outubro",
            Period::Novembro => "Novembro",
            Period::Dezembro => "Dezembro",
        }
    }

    /// Parse a human-entered period label, case-insensitively and trimmed.
    pub fn parse(raw: &str) -> Option<Period> {
        let wanted = raw.trim();
        Period::ALL
            .iter()
            .copied()
            .find(|p| p.label().eq_ignore_ascii_case(wanted))
    }
}

/// A quality/percentage metric as it lives in the store.
///
/// The free-text path parses scores into numbers (`nota_telefone:4.8`), but
/// the spreadsheet path preserves the displayed cell verbatim (`"87,5%"`)
/// so a report renders exactly what the sheet showed. Both shapes occur in
/// existing store files, hence the untagged enum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Score {
    Num(f64),
    Raw(String),
}

impl Default for Score {
    fn default() -> Self {
        Score::Num(0.0)
    }
}

impl Score {
    /// Numeric view of the score. `Raw` values go through the locale rules
    /// (decimal comma, trailing `%`); returns `None` when unparseable.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Score::Num(n) => Some(*n),
            Score::Raw(s) => {
                let cleaned = s.trim().trim_end_matches('%').trim().replace(',', ".");
                cleaned.parse().ok()
            }
        }
    }
}
