//! crucible-infer: Infer canonical JSON Schemas from examples
//!
//! Feeds JSON documents (and optionally schema fragments) into one
//! schema builder and prints the canonical schema: structural `$id`s
//! assigned, keys in deterministic order.
//!
//! Usage:
//!   # Read from file, output to stdout
//!   crucible-infer data.json
//!
//!   # Read from stdin, output to stdout
//!   echo '{"id": 1, "email": "alice@example.com"}' | crucible-infer
//!
//!   # Process NDJSON, merge a seed schema fragment, add titles
//!   crucible-infer --ndjson events.jsonl --schema seed.json --catalog titles.json

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;
use crucible::{EmptyCatalog, MapCatalog, SchemaBuilder, DEFAULT_SCHEMA_URI};
use serde_json::Value;
use std::fs::File;
use std::io::{stdin, BufRead, BufReader};

#[derive(Parser, Debug)]
#[command(name = "crucible-infer")]
#[command(about = "Infer canonical JSON Schemas from examples", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Process newline-delimited JSON (one JSON document per line)
    #[arg(long)]
    ndjson: bool,

    /// Schema fragment file(s) to merge before the examples
    #[arg(long, value_name = "FILE")]
    schema: Vec<String>,

    /// Property catalog file (JSON mapping of name -> {title, description})
    #[arg(long, value_name = "FILE")]
    catalog: Option<String>,

    /// `$schema` URI for the emitted document
    #[arg(long, default_value = DEFAULT_SCHEMA_URI)]
    schema_uri: String,

    /// Emit the raw inferred schema, skipping canonicalization
    #[arg(long)]
    raw: bool,

    /// Compact output (no pretty-printing)
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut builder = SchemaBuilder::new(&args.schema_uri);

    for path in &args.schema {
        let file = File::open(path).with_context(|| format!("Failed to open {path}"))?;
        let fragment: Value = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse schema fragment {path}"))?;
        builder
            .add_schema(&fragment)
            .with_context(|| format!("Failed to merge schema fragment {path}"))?;
    }

    let reader: Box<dyn BufRead> = if let Some(path) = &args.input {
        let file = File::open(path).with_context(|| format!("Failed to open {path}"))?;
        Box::new(BufReader::new(file))
    } else {
        Box::new(BufReader::new(stdin()))
    };

    let mut count = 0;
    if args.ndjson {
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let value: Value = serde_json::from_str(line).context("Failed to parse JSON")?;
            builder.add_object(&value);
            count += 1;
        }
    } else {
        let mut body = String::new();
        for line in reader.lines() {
            body.push_str(&line?);
            body.push('\n');
        }
        if !body.trim().is_empty() {
            let value: Value = serde_json::from_str(&body).context("Failed to parse JSON")?;
            builder.add_object(&value);
            count += 1;
        }
    }

    if count == 0 && args.schema.is_empty() {
        eprintln!("Warning: No JSON documents found in input");
    }

    let schema = if args.raw {
        builder.to_schema()
    } else if let Some(path) = &args.catalog {
        let file = File::open(path).with_context(|| format!("Failed to open {path}"))?;
        let catalog: MapCatalog = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse catalog {path}"))?;
        builder.to_canonical_schema_with(&catalog)?
    } else {
        builder.to_canonical_schema_with(&EmptyCatalog)?
    };

    let output = if args.compact {
        serde_json::to_string(&schema)?
    } else {
        serde_json::to_string_pretty(&schema)?
    };

    println!("{}", output);

    Ok(())
}
