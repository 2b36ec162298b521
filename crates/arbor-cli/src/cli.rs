use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "arbor",
    about = "Arbor: inspect blob stores, diff and round-trip storage trees",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the keys of a directory blob store
    Keys(KeysArgs),
    /// Write one blob of a directory store to stdout
    Cat(CatArgs),
    /// Diff two JSON tree documents
    Diff(DiffArgs),
    /// Load a stored record tree and store it again, reporting any drift
    Roundtrip(RoundtripArgs),
}

#[derive(Args)]
pub struct KeysArgs {
    pub root: PathBuf,
}

#[derive(Args)]
pub struct CatArgs {
    pub root: PathBuf,
    /// Zero-based position in the key list
    pub index: usize,
}

#[derive(Args)]
pub struct DiffArgs {
    pub left: PathBuf,
    pub right: PathBuf,
    /// TOML diff configuration
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Display name of the left tree
    #[arg(long)]
    pub left_name: Option<String>,
    /// Display name of the right tree
    #[arg(long)]
    pub right_name: Option<String>,
    /// Suppress findings for this child or attribute key (repeatable)
    #[arg(long = "ignore")]
    pub ignore_keys: Vec<String>,
    /// Exit with an error if the trees differ
    #[arg(long)]
    pub check: bool,
}

#[derive(Args)]
pub struct RoundtripArgs {
    pub tree: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn diff_flags_parse() {
        let cli = Cli::parse_from([
            "arbor", "diff", "a.json", "b.json", "--ignore", "stamp", "--ignore", "tmp", "--check",
        ]);
        match cli.command {
            Command::Diff(args) => {
                assert_eq!(args.ignore_keys, vec!["stamp", "tmp"]);
                assert!(args.check);
                assert!(args.config.is_none());
            }
            _ => panic!("expected diff"),
        }
    }
}
