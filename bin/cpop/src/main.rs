//! cPOP allow-list CLI
//!
//! - `build`: hash an allow-list file into a publishable root
//! - `prove`: issue a claim ticket for one address
//! - `verify`: check a claim ticket against the published root

use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod build;
mod config;
mod output;
mod prove;
mod verify;

#[derive(Parser, Debug)]
#[command(name = "cpop")]
#[command(about = "Proof-of-participation allow-list tools", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    config: config::Config,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the Merkle root for an allow-list
    Build(build::Args),
    /// Issue a claim ticket for an address on the allow-list
    Prove(prove::Args),
    /// Check a claim ticket
    Verify(verify::Args),
}

fn main() -> anyhow::Result<ExitCode> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    cli.config.init_tracing();

    match cli.command {
        Commands::Build(args) => build::run(&cli.config, args),
        Commands::Prove(args) => prove::run(&cli.config, args),
        Commands::Verify(args) => verify::run(&args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build_with_globals() {
        let cli = Cli::try_parse_from([
            "cpop",
            "build",
            "--input",
            "list.csv",
            "--pretty-json",
            "false",
            "--output-dir",
            "/tmp/out",
        ])
        .unwrap();

        assert!(!cli.config.pretty_json);
        assert_eq!(cli.config.output_dir.to_str(), Some("/tmp/out"));
        assert!(matches!(cli.command, Commands::Build(_)));
    }

    #[test]
    fn test_verify_root_conflicts_with_commitment() {
        let result = Cli::try_parse_from([
            "cpop",
            "verify",
            "--ticket",
            "t.json",
            "--root",
            "0x00",
            "--commitment",
            "root.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verify_requires_published_root() {
        if std::env::var_os("CPOP_ROOT").is_some() {
            return;
        }
        let result = Cli::try_parse_from(["cpop", "verify", "--ticket", "t.json"]);
        assert!(result.is_err());

        let cli =
            Cli::try_parse_from(["cpop", "verify", "--ticket", "t.json", "--commitment", "root.json"])
                .unwrap();
        assert!(matches!(cli.command, Commands::Verify(_)));
    }
}
