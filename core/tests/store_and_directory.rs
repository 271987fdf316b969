//! Store persistence and identity directory tests.

use opsync_core::field_parser::parse_fields;
use opsync_core::merge::merge_period;
use opsync_core::store::normalize_email;
use opsync_core::{Directory, MetricsStore, Period, SyncError};
use std::fs;

/// Full load-modify-save cycle against a real file.
#[test]
fn store_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("operadores.json");

    let mut store = MetricsStore::default();
    store.insert_operator("Gabriel@X.com ");
    merge_period(
        &mut store,
        "gabriel@x.com",
        Period::Novembro,
        &parse_fields("ligacoes:150|tma:00:05:30"),
    )
    .unwrap();
    store.save(&path).unwrap();

    let reloaded = MetricsStore::load(&path).unwrap();
    assert_eq!(reloaded, store);
    assert!(
        reloaded.contains("gabriel@x.com"),
        "keys are stored normalized"
    );

    // Wholesale pretty-printed write.
    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.contains('\n'), "store file should be pretty-printed");
    assert!(raw.contains("\"meses\""));
    assert!(raw.contains("\"Novembro\""));
}

/// A missing store file is fatal — never silently an empty store.
#[test]
fn missing_store_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = MetricsStore::load(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, SyncError::SourceUnavailable { .. }), "got {err:?}");
}

/// A store written by an older schema still loads: absent fields land on
/// their fixed defaults, nothing is ever half-present.
#[test]
fn legacy_store_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("operadores.json");
    fs::write(
        &path,
        r#"{ "gabriel@x.com": { "login": { "meses": {
            "Novembro": { "chamadas": { "ligacoes": 7 } }
        } } } }"#,
    )
    .unwrap();

    let store = MetricsStore::load(&path).unwrap();
    let data = &store.get("gabriel@x.com").unwrap().login.meses[&Period::Novembro];
    assert_eq!(data.chamadas.ligacoes, 7);
    assert_eq!(data.chamadas.tma, "00:00:00");
    assert_eq!(data.pausas.pausa_lanche_escalado, "00:00:00");
    assert_eq!(data.ultima_atualizacao, "");
}

#[test]
fn email_normalization() {
    assert_eq!(normalize_email("  Gabriel@X.COM  "), "gabriel@x.com");
}

/// A missing directory file degrades to an empty directory — unlike the
/// store, this is not fatal.
#[test]
fn missing_directory_degrades_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let directory = Directory::load(&dir.path().join("nope.json")).unwrap();
    assert!(directory.is_empty());
    assert_eq!(directory.resolve("Gabriel Araujo"), None);
}

/// A directory file that exists but is not valid JSON is an error.
#[test]
fn corrupt_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diretorio.json");
    fs::write(&path, "{ not json").unwrap();
    let err = Directory::load(&path).unwrap_err();
    assert!(matches!(err, SyncError::SourceUnavailable { .. }), "got {err:?}");
}

/// Resolution is case-insensitive and trimmed.
#[test]
fn directory_resolves_loosely() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diretorio.json");
    fs::write(&path, r#"{ "Gabriel Araujo": "gabriel@x.com" }"#).unwrap();
    let directory = Directory::load(&path).unwrap();

    assert_eq!(directory.resolve("  gabriel araujo "), Some("gabriel@x.com"));
    assert_eq!(directory.resolve("GABRIEL ARAUJO"), Some("gabriel@x.com"));
    assert_eq!(directory.resolve("Gabriela Araujo"), None);
}

/// Two entries differing only by case resolve to the FIRST one in file
/// order — the loader must preserve JSON document order for "first" to
/// mean anything.
#[test]
fn duplicate_names_resolve_to_first_in_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diretorio.json");
    // "gabriel araujo" and "Gabriel Araujo" compare differently in a
    // sorted map; the file order is what must win here.
    fs::write(
        &path,
        r#"{ "gabriel araujo": "primeiro@x.com", "Gabriel Araujo": "segundo@x.com" }"#,
    )
    .unwrap();
    let directory = Directory::load(&path).unwrap();
    assert_eq!(directory.resolve("Gabriel Araujo"), Some("primeiro@x.com"));
}
