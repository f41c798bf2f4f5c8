//! medview command-line host.
//!
//! Thin shell around the engine crates: load a bundle file, build the view
//! tree, print either the interactive section listing or the export
//! document's block tree. Everything interesting happens in `medview-model`
//! and `medview-render`; this binary only does I/O and formatting.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fhir::Bundle;
use medview_model::{compare_by_sort_key, composition_sections, standard_table, CompareFn};
use medview_render::{document, list};

#[derive(Parser)]
#[command(name = "medview")]
#[command(about = "Clinical examination booklet viewer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise a bundle file
    Inspect {
        /// Path to the bundle JSON file
        bundle: PathBuf,
    },
    /// Print the interactive section listing
    List {
        /// Path to the bundle JSON file
        bundle: PathBuf,
        /// Sort section entries by date instead of document order
        #[arg(long)]
        sort: bool,
    },
    /// Emit the export document block tree as JSON
    Document {
        /// Path to the bundle JSON file
        bundle: PathBuf,
        /// Sort section entries by date instead of document order
        #[arg(long)]
        sort: bool,
    },
}

fn load_bundle(path: &PathBuf) -> anyhow::Result<Bundle> {
    let text = fs::read_to_string(path)?;
    Ok(Bundle::from_json_str(&text)?)
}

fn compare_for(sort: bool) -> Option<CompareFn> {
    sort.then_some(compare_by_sort_key as CompareFn)
}

fn inspect(path: &PathBuf) -> anyhow::Result<()> {
    let bundle = load_bundle(path)?;
    println!("identifier: {}", bundle.identifier().unwrap_or("-"));
    println!("entries:    {}", bundle.len());
    for entry in bundle.entries() {
        println!(
            "  {}  ({})",
            entry.full_url,
            entry.resource.resource_type().unwrap_or("?")
        );
    }
    Ok(())
}

fn print_list(path: &PathBuf, sort: bool) -> anyhow::Result<()> {
    let bundle = load_bundle(path)?;
    let table = standard_table();
    let sections = composition_sections(&bundle, &table, compare_for(sort));
    for section in list::project_sections(&sections) {
        println!("== {} ==", section.title);
        if let Some(hint) = &section.hint {
            println!("   ({hint})");
        }
        if section.items.is_empty() && section.notices.is_empty() {
            println!("   {}", document::NO_ENTRIES);
        }
        for item in &section.items {
            println!("   {}: {}", item.summary.label, item.summary.value);
            for value in &item.values {
                println!("      {}: {}", value.label, value.value);
            }
        }
        for notice in &section.notices {
            println!("   ! {notice}");
        }
    }
    Ok(())
}

fn print_document(path: &PathBuf, sort: bool) -> anyhow::Result<()> {
    let bundle = load_bundle(path)?;
    let table = standard_table();
    let sections = composition_sections(&bundle, &table, compare_for(sort));
    let nodes = document::project_sections(&bundle, &sections);
    println!("{}", serde_json::to_string_pretty(&nodes)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Inspect { bundle } => inspect(&bundle),
        Commands::List { bundle, sort } => print_list(&bundle, sort),
        Commands::Document { bundle, sort } => print_document(&bundle, sort),
    }
}
