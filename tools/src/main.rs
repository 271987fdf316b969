//! opsync-runner: command-line front end for the operator metrics sync.
//!
//! Usage:
//!   opsync-runner --entry "Gabriel Araujo|Novembro|ligacoes:150|tma:00:05:30"
//!   opsync-runner --entries lancamentos.txt
//!   opsync-runner --sheet-id <ID> --tab Novembro --operator "Gabriel Araujo" \
//!                 --period Novembro --token <OAUTH_TOKEN>
//!
//! Common flags:
//!   --store PATH       metrics store JSON   (default ./data/operadores.json)
//!   --directory PATH   name→email directory (default ./data/diretorio.json)

use anyhow::{bail, Context, Result};
use opsync_core::sheets::HttpSheetSource;
use opsync_core::{
    process_entries, process_entry, sync_operator, BatchOutcome, Directory, MetricsStore, Period,
};
use std::env;
use std::fs;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let store_path = arg_value(&args, "--store").unwrap_or_else(|| "./data/operadores.json".into());
    let directory_path =
        arg_value(&args, "--directory").unwrap_or_else(|| "./data/diretorio.json".into());

    let mut store = MetricsStore::load(Path::new(&store_path))
        .with_context(|| format!("cannot load metrics store {store_path}"))?;
    let directory = Directory::load(Path::new(&directory_path))?;
    log::info!(
        "loaded {} operators, {} directory names",
        store.operators.len(),
        directory.len()
    );

    let outcome = if let Some(file) = arg_value(&args, "--entries") {
        let content =
            fs::read_to_string(&file).with_context(|| format!("cannot read entries file {file}"))?;
        process_entries(content.lines(), &directory, &mut store)
    } else if let Some(line) = arg_value(&args, "--entry") {
        match process_entry(&line, &directory, &mut store) {
            Ok(email) => {
                println!("merged entry into {email}");
                BatchOutcome { ok: 1, failed: 0 }
            }
            Err(e) => bail!("entry rejected: {e}"),
        }
    } else if let Some(sheet_id) = arg_value(&args, "--sheet-id") {
        run_sheet_sync(&args, &sheet_id, &directory, &mut store)?
    } else {
        bail!("nothing to do: pass --entry, --entries or --sheet-id (see --help in the header)");
    };

    if outcome.ok > 0 {
        store
            .save(Path::new(&store_path))
            .with_context(|| format!("cannot save metrics store {store_path}"))?;
    }

    println!("=== SYNC SUMMARY ===");
    println!("  store:     {store_path}");
    println!("  directory: {directory_path} ({} names)", directory.len());
    println!("  merged:    {}", outcome.ok);
    println!("  failed:    {}", outcome.failed);
    Ok(())
}

fn run_sheet_sync(
    args: &[String],
    sheet_id: &str,
    directory: &Directory,
    store: &mut MetricsStore,
) -> Result<BatchOutcome> {
    let tab = required_arg(args, "--tab")?;
    let operator = required_arg(args, "--operator")?;
    let period_label = required_arg(args, "--period")?;
    let token = required_arg(args, "--token")?;

    let period = Period::parse(&period_label)
        .with_context(|| format!("invalid period '{period_label}'"))?;

    let source = HttpSheetSource::new(token);
    let email = sync_operator(&source, sheet_id, &tab, &operator, period, directory, store)?;
    println!("merged sheet row for '{operator}' into {email}");
    Ok(BatchOutcome { ok: 1, failed: 0 })
}

fn arg_value(args: &[String], flag: &str) -> Option<String> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].clone())
}

fn required_arg(args: &[String], flag: &str) -> Result<String> {
    arg_value(args, flag).with_context(|| format!("missing required flag {flag}"))
}
