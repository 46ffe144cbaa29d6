//! formrel: evaluate form field relations offline.
//!
//! Loads a relation file (JSON or TOML) and a form snapshot, binds the
//! relations, applies the requested changes in order and prints the resulting
//! field states as JSON.
//!
//! Usage:
//!   formrel --relations relations.toml --form form.json --set country=US

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use formrel_cli::{Change, simulate};
use formrel_engine::RelationSet;
use formrel_form::FormSnapshot;
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "formrel")]
#[command(about = "Evaluate form field relations against a form snapshot")]
struct Args {
    /// Relation file (.toml, otherwise JSON)
    #[arg(short, long)]
    relations: PathBuf,

    /// Form snapshot: {"fields": [{"id", "name", "value", "input"}]}
    #[arg(short, long)]
    form: PathBuf,

    /// Field change to apply, in order (ID=VALUE, VALUE parsed as JSON when valid)
    #[arg(short, long = "set", value_name = "ID=VALUE")]
    set: Vec<Change>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let relations = RelationSet::load_from(&args.relations)
        .with_context(|| format!("loading relations from {}", args.relations.display()))?;
    let snapshot_json = fs::read_to_string(&args.form)
        .with_context(|| format!("reading form snapshot {}", args.form.display()))?;
    let snapshot = FormSnapshot::from_json(&snapshot_json).context("parsing form snapshot")?;
    debug!(fields = snapshot.fields.len(), changes = args.set.len(), "Inputs loaded");

    let report = simulate(relations, snapshot, &args.set)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
