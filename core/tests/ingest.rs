//! End-to-end pipeline tests: text entries and sheet lookups into a store.

use opsync_core::sheet_decoder::{Column, MIN_COLUMNS};
use opsync_core::sheets::SheetSource;
use opsync_core::{
    process_entries, process_entry, sync_operator, Directory, MetricsStore, Period, Score,
    SyncError, SyncResult,
};

fn setup() -> (Directory, MetricsStore) {
    let directory = Directory::from_pairs(vec![(
        "Gabriel Araujo".to_string(),
        "gabriel@x.com".to_string(),
    )]);
    let mut store = MetricsStore::default();
    store.insert_operator("gabriel@x.com");
    (directory, store)
}

/// The canonical happy path: one text entry resolves, parses and merges.
#[test]
fn text_entry_end_to_end() {
    let (directory, mut store) = setup();
    let email = process_entry(
        "Gabriel Araujo|Novembro|ligacoes:150|tma:00:05:30|nota_telefone:4.8",
        &directory,
        &mut store,
    )
    .unwrap();
    assert_eq!(email, "gabriel@x.com");

    let data = &store.get("gabriel@x.com").unwrap().login.meses[&Period::Novembro];
    assert_eq!(data.chamadas.ligacoes, 150);
    assert_eq!(data.chamadas.tma, "00:05:30");
    assert_eq!(data.chamadas.nota_telefone, Score::Num(4.8));
    // Fields the entry never mentioned sit on their defaults.
    assert_eq!(data.chamadas.avaliacoes_telefone, 0);
    assert_eq!(data.tickets.tmt, "00:00:00");
}

/// A display name with different case and padding still resolves.
#[test]
fn name_resolution_is_case_and_space_insensitive() {
    let (directory, mut store) = setup();
    let email = process_entry(
        "  gabriel ARAUJO |Novembro|ligacoes:1",
        &directory,
        &mut store,
    )
    .unwrap();
    assert_eq!(email, "gabriel@x.com");
}

/// A name absent from the directory is UnknownIdentity and the store is
/// left untouched.
#[test]
fn unknown_person_leaves_store_untouched() {
    let (directory, mut store) = setup();
    let before = store.clone();
    let err = process_entry("Unknown Person|Novembro|ligacoes:1", &directory, &mut store)
        .unwrap_err();
    assert!(matches!(err, SyncError::UnknownIdentity { .. }), "got {err:?}");
    assert_eq!(store, before);
}

/// A period outside the fixed enum is InvalidPeriod and the store is left
/// untouched.
#[test]
fn invalid_period_leaves_store_untouched() {
    let (directory, mut store) = setup();
    let before = store.clone();
    let err = process_entry("Gabriel Araujo|Janeiro|ligacoes:1", &directory, &mut store)
        .unwrap_err();
    assert!(matches!(err, SyncError::InvalidPeriod { .. }), "got {err:?}");
    assert_eq!(store, before);
}

/// Batch processing is sequential and keeps going past failures,
/// tallying both sides. Blank lines don't count either way.
#[test]
fn batch_continues_past_failures() {
    let (directory, mut store) = setup();
    let lines = [
        "Gabriel Araujo|Novembro|ligacoes:150",
        "Unknown Person|Novembro|ligacoes:1",
        "",
        "Gabriel Araujo|Janeiro|ligacoes:1",
        "Gabriel Araujo|Dezembro|tickets:40",
    ];
    let outcome = process_entries(lines, &directory, &mut store);
    assert_eq!(outcome.ok, 2);
    assert_eq!(outcome.failed, 2);

    let meses = &store.get("gabriel@x.com").unwrap().login.meses;
    assert_eq!(meses[&Period::Novembro].chamadas.ligacoes, 150);
    assert_eq!(meses[&Period::Dezembro].tickets.tickets, 40);
}

// ── Sheet path ─────────────────────────────────────────────────

struct FakeSheet {
    grid: Vec<Vec<String>>,
}

impl SheetSource for FakeSheet {
    fn fetch_grid(&self, _sheet_id: &str, _tab: &str) -> SyncResult<Vec<Vec<String>>> {
        Ok(self.grid.clone())
    }
}

fn sheet_row(name: &str, cells: &[(Column, &str)]) -> Vec<String> {
    let mut row = vec![String::new(); MIN_COLUMNS];
    row[0] = name.to_string();
    for (column, value) in cells {
        row[column.index()] = value.to_string();
    }
    row
}

fn sheet_with(rows: Vec<Vec<String>>) -> FakeSheet {
    let mut grid = vec![vec!["Operador".to_string(); MIN_COLUMNS]];
    grid.extend(rows);
    FakeSheet { grid }
}

/// Sheet lookup end to end: fetch, scan, decode, resolve, merge. Sentinel
/// cells never overwrite stored data.
#[test]
fn sheet_sync_end_to_end() {
    let (directory, mut store) = setup();
    // Prior text entry put a score in place; the sheet has #N/A there.
    process_entry("Gabriel Araujo|Novembro|nota_telefone:4.8", &directory, &mut store).unwrap();

    let sheet = sheet_with(vec![sheet_row(
        "Gabriel Araujo",
        &[
            (Column::Ligacoes, "200"),
            (Column::NotaTelefone, "#N/A"),
            (Column::Absenteismo, "1,2%"),
        ],
    )]);
    let email = sync_operator(
        &sheet,
        "sheet-1",
        "Novembro",
        "Gabriel Araujo",
        Period::Novembro,
        &directory,
        &mut store,
    )
    .unwrap();
    assert_eq!(email, "gabriel@x.com");

    let data = &store.get("gabriel@x.com").unwrap().login.meses[&Period::Novembro];
    assert_eq!(data.chamadas.ligacoes, 200);
    assert_eq!(
        data.chamadas.nota_telefone,
        Score::Num(4.8),
        "#N/A must not clobber the stored score"
    );
    assert_eq!(data.pausas.absenteismo, Score::Raw("1,2%".to_string()));
}

/// An operator missing from every sheet row is NotFound and nothing is
/// merged.
#[test]
fn sheet_operator_not_found() {
    let (directory, mut store) = setup();
    let before = store.clone();
    let sheet = sheet_with(vec![sheet_row("Maria Silva", &[])]);
    let err = sync_operator(
        &sheet,
        "sheet-1",
        "Novembro",
        "Gabriel Araujo",
        Period::Novembro,
        &directory,
        &mut store,
    )
    .unwrap_err();
    assert!(matches!(err, SyncError::NotFound { .. }), "got {err:?}");
    assert_eq!(store, before);
}

/// An empty grid (no header at all) is a structural error, not NotFound.
#[test]
fn empty_grid_is_structural() {
    let (directory, mut store) = setup();
    let sheet = FakeSheet { grid: Vec::new() };
    let err = sync_operator(
        &sheet,
        "sheet-1",
        "Novembro",
        "Gabriel Araujo",
        Period::Novembro,
        &directory,
        &mut store,
    )
    .unwrap_err();
    assert!(matches!(err, SyncError::StructuralMismatch { .. }), "got {err:?}");
}
