//! relstore Demo
//!
//! Replays a fixed sequence of inserts and deletes against a fresh store
//! and prints both views of the file after each step.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use relstore::{Config, DeleteOutcome, InsertOutcome, Store};
use tracing_subscriber::{fmt, EnvFilter};

/// relstore Demo
#[derive(Parser, Debug)]
#[command(name = "relstore-demo")]
#[command(about = "Demonstrate a sorted linked list in a relative organization file")]
#[command(version)]
struct Args {
    /// Backing file (created or truncated)
    #[arg(short, long, default_value = "names.bin")]
    file: PathBuf,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,relstore=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("relstore demo v{}", relstore::VERSION);

    let config = Config::builder().path(&args.file).build();
    let mut store = match Store::create(config) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Cannot open {} - exiting: {}", args.file.display(), e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&mut store) {
        tracing::error!("Demo failed: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = store.close() {
        tracing::error!("Failed to close store: {}", e);
        std::process::exit(1);
    }
}

fn run(store: &mut Store) -> relstore::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for name in [
        "appleby's",
        "pei wei",
        "double dave's",
        "cracker barrel",
        "brannigan's",
    ] {
        insert(store, &mut out, name)?;
        store.print_file(&mut out)?;
    }
    insert(store, &mut out, "pei wei")?;

    writeln!(out, "\nAfter 5 Insertions - Print the Linked List")?;
    store.print_list(&mut out)?;

    for name in ["appleby's", "double dave's"] {
        delete(store, &mut out, name)?;
        store.print_file(&mut out)?;
    }
    delete(store, &mut out, "appleby's")?;

    writeln!(out, "\nAfter 2 Deletions - Print the Linked List")?;
    store.print_list(&mut out)?;

    insert(store, &mut out, "abuelo's")?;
    store.print_file(&mut out)?;

    writeln!(out, "\nAfter 1 Insertion - Print the Linked List")?;
    store.print_list(&mut out)?;

    Ok(())
}

fn insert<W: Write>(store: &mut Store, out: &mut W, name: &str) -> relstore::Result<()> {
    writeln!(out, "\nInserting {}...", name)?;
    if store.insert(name)? == InsertOutcome::Duplicate {
        writeln!(out, "DUPLICATE - {} not inserted", name)?;
    }
    Ok(())
}

fn delete<W: Write>(store: &mut Store, out: &mut W, name: &str) -> relstore::Result<()> {
    writeln!(out, "\nDeleting {}...", name)?;
    if store.delete(name)? == DeleteOutcome::NotFound {
        writeln!(out, "MISSING FROM LIST - {} not deleted", name)?;
    }
    Ok(())
}
