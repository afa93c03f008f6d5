// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! idres CLI
//!
//! Command-line interface for resolving gene/transcript/locus identifier
//! lists against the central store and id-map services.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use ferro_idres::annotate::build_feature_set;
use ferro_idres::cli::{
    format_feature_set, format_locus_map, format_resolution, parse_gene_list, read_id_lines,
    OutputFormat,
};
use ferro_idres::config::IdResConfig;
use ferro_idres::resolve::{resolve_cds_to_locus, resolve_to_cds};
use ferro_idres::store::CentralStoreClient;
use ferro_idres::IdResError;

#[derive(Parser)]
#[command(name = "idres")]
#[command(author, version, about = "Genomic feature identifier resolver")]
#[command(
    long_about = "Resolve mixed gene/transcript/locus identifier lists to canonical \
CDS identifiers and back to enclosing loci.

Examples:
  idres to-cds 'kb|g.3899.locus.2,AT1G01010'
  idres to-cds -i genes.txt --format json
  idres to-locus 'kb|g.3899.CDS.35'
  idres annotate 'kb|g.3899.locus.2' --description 'drought panel'"
)]
struct Cli {
    /// Central store (CDMI) URL; overrides config file
    #[arg(long, global = true)]
    cdmi_url: Option<String>,

    /// Id-map service URL; overrides config file
    #[arg(long, global = true)]
    idmap_url: Option<String>,

    /// Output format
    #[arg(short = 'f', long, global = true, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a mixed identifier list to CDS identifiers
    ToCds {
        /// Comma separated identifiers
        ids: Option<String>,

        /// Input file, one id or comma separated list per line (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Map CDS identifiers to their enclosing loci
    ToLocus {
        /// Comma separated CDS identifiers
        ids: Option<String>,

        /// Input file, one id or comma separated list per line (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Resolve an identifier list and assemble an annotated feature set
    Annotate {
        /// Comma separated identifiers
        ids: Option<String>,

        /// Input file, one id or comma separated list per line (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Feature set description
        #[arg(long, default_value = "User generated feature set")]
        description: String,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), IdResError> {
    let format = OutputFormat::parse(&cli.format).unwrap_or(OutputFormat::Text);

    let config = IdResConfig::load().unwrap_or_default();
    let endpoints = config.merge_with_cli(cli.cdmi_url.as_deref(), cli.idmap_url.as_deref());
    let client = CentralStoreClient::new(&endpoints.cdmi, &endpoints.idmap)?;

    match cli.command {
        Commands::ToCds { ids, input } => {
            let query_ids = gather_ids(ids.as_deref(), input.as_ref())?;
            let resolution = resolve_to_cds(&client, &query_ids)?;
            print!("{}", format_resolution(&resolution, format));
        }
        Commands::ToLocus { ids, input } => {
            let cds_ids = gather_ids(ids.as_deref(), input.as_ref())?;
            let loci: BTreeMap<String, String> = resolve_cds_to_locus(&client, &cds_ids)?;
            print!("{}", format_locus_map(&loci, format));
        }
        Commands::Annotate {
            ids,
            input,
            description,
        } => {
            let query_ids = gather_ids(ids.as_deref(), input.as_ref())?;
            let resolution = resolve_to_cds(&client, &query_ids)?;
            let set = build_feature_set(&client, &client, &resolution, description)?;
            print!("{}", format_feature_set(&set, format));
        }
    }

    Ok(())
}

/// Collect identifiers from the positional list and/or input file.
fn gather_ids(ids: Option<&str>, input: Option<&PathBuf>) -> Result<Vec<String>, IdResError> {
    let mut out = Vec::new();

    if let Some(raw) = ids {
        out.extend(parse_gene_list(raw));
    }

    if let Some(path) = input {
        let from_file = if path.to_str() == Some("-") {
            read_id_lines(io::stdin().lock())?
        } else {
            read_id_lines(BufReader::new(File::open(path)?))?
        };
        out.extend(from_file);
    }

    if out.is_empty() {
        return Err(IdResError::Config {
            msg: "no identifiers given; pass a list or --input".to_string(),
        });
    }

    Ok(out)
}
