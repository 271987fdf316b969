//! Pipeline orchestration: text entries and sheet lookups into the store.
//!
//! Batch processing is strictly sequential and keeps going: one bad entry
//! is logged and counted, never aborts the rest. Spreadsheet failures are
//! different — they mean the whole source is unusable, so they propagate.

use crate::directory::Directory;
use crate::error::{SyncError, SyncResult};
use crate::field_parser::parse_entry;
use crate::merge::merge_period;
use crate::sheet_decoder::{find_operator, MIN_COLUMNS};
use crate::sheets::SheetSource;
use crate::store::MetricsStore;
use crate::types::Period;

/// Tally of one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub ok: usize,
    pub failed: usize,
}

/// Process one free-text entry end to end: parse, resolve the identity,
/// validate the period, merge. A failure at any step leaves the store
/// untouched. Returns the resolved email on success.
pub fn process_entry(
    line: &str,
    directory: &Directory,
    store: &mut MetricsStore,
) -> SyncResult<String> {
    let entry = parse_entry(line)?;
    let email = directory
        .resolve(&entry.operator)
        .ok_or_else(|| SyncError::UnknownIdentity {
            name: entry.operator.clone(),
        })?
        .to_string();
    let period = Period::parse(&entry.period).ok_or_else(|| SyncError::InvalidPeriod {
        period: entry.period.clone(),
    })?;
    merge_period(store, &email, period, &entry.record)?;
    Ok(email)
}

/// Process many entry lines sequentially, blank lines skipped. Failures
/// are logged at `warn` with their line number and tallied.
pub fn process_entries<'a, I>(
    lines: I,
    directory: &Directory,
    store: &mut MetricsStore,
) -> BatchOutcome
where
    I: IntoIterator<Item = &'a str>,
{
    let mut outcome = BatchOutcome::default();
    for (number, line) in lines.into_iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match process_entry(line, directory, store) {
            Ok(email) => {
                outcome.ok += 1;
                log::debug!("entry {}: merged into {email}", number + 1);
            }
            Err(e) => {
                outcome.failed += 1;
                log::warn!("entry {}: {e}", number + 1);
            }
        }
    }
    log::info!("batch done: {} ok, {} failed", outcome.ok, outcome.failed);
    outcome
}

/// Pull one operator's row from the sheet and merge it. Upstream and
/// structural errors propagate — the caller must stop and report them.
pub fn sync_operator(
    source: &dyn SheetSource,
    sheet_id: &str,
    tab: &str,
    operator: &str,
    period: Period,
    directory: &Directory,
    store: &mut MetricsStore,
) -> SyncResult<String> {
    let grid = source.fetch_grid(sheet_id, tab)?;
    if grid.is_empty() {
        return Err(SyncError::StructuralMismatch {
            expected: MIN_COLUMNS,
            got: 0,
        });
    }
    let record = find_operator(&grid, operator)?;
    let email = directory
        .resolve(operator)
        .ok_or_else(|| SyncError::UnknownIdentity {
            name: operator.to_string(),
        })?
        .to_string();
    merge_period(store, &email, period, &record)?;
    Ok(email)
}
