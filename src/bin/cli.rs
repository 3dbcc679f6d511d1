//! relstore CLI
//!
//! One-shot operations against a relative file store.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use relstore::{Config, DeleteOutcome, InsertOutcome, Store};
use tracing_subscriber::{fmt, EnvFilter};

/// relstore CLI
#[derive(Parser, Debug)]
#[command(name = "relstore-cli")]
#[command(about = "CLI for the relstore relative file store")]
#[command(version)]
struct Args {
    /// Backing file
    #[arg(short, long, default_value = "names.bin")]
    file: PathBuf,

    /// fsync after every mutation
    #[arg(long)]
    sync: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create or truncate the file with an empty header
    Init,

    /// Insert a key in sorted position
    Insert {
        /// The key to insert
        key: String,
    },

    /// Delete a key
    Delete {
        /// The key to delete
        key: String,
    },

    /// Check whether a key is present
    Contains {
        /// The key to look up
        key: String,
    },

    /// Print the live list in key order
    List,

    /// Print the header and every slot in physical order
    Dump,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,relstore=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> relstore::Result<()> {
    let config = Config::builder()
        .path(&args.file)
        .sync_writes(args.sync)
        .build();

    let mut store = match args.command {
        Commands::Init => Store::create(config)?,
        _ => Store::open(config)?,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Commands::Init => writeln!(out, "initialized {}", store.path().display())?,
        Commands::Insert { key } => match store.insert(&key)? {
            InsertOutcome::Inserted(slot) => writeln!(out, "inserted {} at slot {}", key, slot)?,
            InsertOutcome::Duplicate => writeln!(out, "DUPLICATE - {} not inserted", key)?,
        },
        Commands::Delete { key } => match store.delete(&key)? {
            DeleteOutcome::Deleted(slot) => writeln!(out, "deleted {} from slot {}", key, slot)?,
            DeleteOutcome::NotFound => writeln!(out, "MISSING FROM LIST - {} not deleted", key)?,
        },
        Commands::Contains { key } => {
            let found = store.contains(&key)?;
            writeln!(out, "{}", if found { "found" } else { "not found" })?;
        }
        Commands::List => store.print_list(&mut out)?,
        Commands::Dump => store.print_file(&mut out)?,
    }

    store.close()
}
