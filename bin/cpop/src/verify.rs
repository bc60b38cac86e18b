//! `cpop verify`

use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use cpop_merkle::{ClaimTicket, RootCommitment};
use serde::de::DeserializeOwned;
use tracing::{info, warn};

#[derive(clap::Args, Debug)]
pub(crate) struct Args {
    /// Claim ticket JSON file
    #[arg(short, long)]
    ticket: PathBuf,

    /// Published root to check the ticket against
    #[arg(short, long, env = "CPOP_ROOT", required_unless_present = "commitment")]
    root: Option<String>,

    /// Published root commitment JSON to check the ticket against
    #[arg(short, long, conflicts_with = "root")]
    commitment: Option<PathBuf>,
}

pub(crate) fn run(args: &Args) -> Result<ExitCode> {
    if check(args)? {
        println!("valid");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("invalid");
        Ok(ExitCode::FAILURE)
    }
}

/// Load the ticket and trusted root, then verify. I/O and parse failures are
/// errors; a ticket that does not verify is `Ok(false)`, and so is any ticket
/// when no published root was given.
fn check(args: &Args) -> Result<bool> {
    let ticket: ClaimTicket = read_json(&args.ticket)?;

    let trusted_root = match &args.commitment {
        Some(path) => Some(read_json::<RootCommitment>(path)?.root),
        None => args.root.clone(),
    };

    let Some(trusted_root) = trusted_root else {
        warn!(identifier = %ticket.identifier, "No published root given; rejecting ticket");
        return Ok(false);
    };

    let valid = ticket.verify_against(&trusted_root);

    if valid {
        info!(identifier = %ticket.identifier, root = %ticket.root, "Claim ticket is valid");
    } else {
        warn!(identifier = %ticket.identifier, root = %ticket.root, "Claim ticket is invalid");
    }
    Ok(valid)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}
