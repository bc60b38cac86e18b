//! `cpop prove`

use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use cpop_merkle::{load_allowlist, AllowlistTree};
use tracing::info;

use crate::{config::Config, output::write_json};

#[derive(clap::Args, Debug)]
pub(crate) struct Args {
    /// Allow-list file the published root was built from
    #[arg(short, long)]
    input: PathBuf,

    /// Address to issue the ticket for
    #[arg(short = 'a', long)]
    identifier: String,

    /// Output file for the claim ticket JSON [default: <output-dir>/ticket.json]
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(config: &Config, args: Args) -> Result<ExitCode> {
    let identifiers = load_allowlist(&args.input)?;
    let tree = AllowlistTree::build(identifiers).context("Failed to build allow-list tree")?;

    let ticket = tree
        .claim_ticket(&args.identifier)
        .with_context(|| format!("{} is not eligible for this event", args.identifier.trim()))?;
    info!(
        identifier = %ticket.identifier,
        leaf_index = ticket.leaf_index,
        proof_len = ticket.proof.len(),
        root = %ticket.root,
        "Issued claim ticket"
    );

    let output = config.output_path(args.output, "ticket.json");
    write_json(&output, &ticket, config.pretty_json)?;

    println!("{}", output.display());
    Ok(ExitCode::SUCCESS)
}
