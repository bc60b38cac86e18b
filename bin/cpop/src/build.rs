//! `cpop build`

use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use cpop_merkle::{encode_hash, load_allowlist, AllowlistTree};
use tracing::info;

use crate::{
    config::Config,
    output::{write_file_atomic, write_json},
};

#[derive(clap::Args, Debug)]
pub(crate) struct Args {
    /// Allow-list file; the first column of each row is an address
    #[arg(short, long)]
    input: PathBuf,

    /// Output file for the root commitment JSON [default: <output-dir>/root.json]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output file for every tree node, one `level:index:hash` line each
    #[arg(short, long)]
    tree_output: Option<PathBuf>,
}

pub(crate) fn run(config: &Config, args: Args) -> Result<ExitCode> {
    info!(input = %args.input.display(), "Reading allow-list");
    let identifiers = load_allowlist(&args.input)?;
    let rows = identifiers.len();

    let tree = AllowlistTree::build(identifiers).context("Failed to build allow-list tree")?;
    let commitment = tree.commitment();
    info!(
        rows,
        unique = commitment.count,
        depth = tree.depth(),
        root = %commitment.root,
        "Built allow-list tree"
    );

    let output = config.output_path(args.output, "root.json");
    write_json(&output, &commitment, config.pretty_json)?;
    info!(path = %output.display(), "Wrote root commitment");

    if let Some(tree_path) = args.tree_output {
        write_file_atomic(&tree_path, render_layers(&tree).as_bytes())?;
        info!(path = %tree_path.display(), "Wrote tree layers");
    }

    println!("{}", commitment.root);
    Ok(ExitCode::SUCCESS)
}

fn render_layers(tree: &AllowlistTree) -> String {
    tree.layers()
        .iter()
        .enumerate()
        .flat_map(|(level, layer)| {
            layer
                .iter()
                .enumerate()
                .map(move |(index, hash)| format!("{level}:{index}:{}\n", encode_hash(hash)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpop_merkle::RootCommitment;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_render_layers() {
        let tree = AllowlistTree::build(["Addr1", "Addr2", "Addr3"]).unwrap();
        let rendered = render_layers(&tree);
        let lines: Vec<&str> = rendered.lines().collect();

        // 3 leaves, 2 nodes, 1 root
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("0:0:0x"));
        assert!(lines[4].starts_with("1:1:0x"));
        assert_eq!(lines[5], format!("2:0:{}", encode_hash(&tree.root())));
    }

    #[test]
    fn test_run_writes_commitment_and_tree() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("attendees.csv");
        fs::write(&input, "# wallet,name\nAddr1,alice\nAddr2,bob\nAddr1,alice again\n").unwrap();

        let config = Config {
            log: "info".to_string(),
            output_dir: temp_dir.path().to_path_buf(),
            pretty_json: false,
        };
        let tree_output = temp_dir.path().join("tree.txt");
        let args = Args { input, output: None, tree_output: Some(tree_output.clone()) };

        run(&config, args).unwrap();

        let commitment: RootCommitment =
            serde_json::from_str(&fs::read_to_string(temp_dir.path().join("root.json")).unwrap())
                .unwrap();
        let expected = AllowlistTree::build(["Addr1", "Addr2"]).unwrap();
        assert_eq!(commitment, expected.commitment());
        assert_eq!(fs::read_to_string(tree_output).unwrap().lines().count(), 3);
    }

    #[test]
    fn test_run_rejects_empty_allowlist() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("empty.csv");
        fs::write(&input, "# nothing here\n\n").unwrap();

        let config = Config {
            log: "info".to_string(),
            output_dir: temp_dir.path().to_path_buf(),
            pretty_json: true,
        };
        let args = Args { input, output: None, tree_output: None };

        assert!(run(&config, args).is_err());
        assert!(!temp_dir.path().join("root.json").exists());
    }
}
