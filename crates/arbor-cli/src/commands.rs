use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context};
use arbor_codec::{layout_of, load_into, store};
use arbor_diff::{diff_named, DiffConfig, DiffOptions, DiffReport, Finding};
use arbor_store::{BlobStore, DirectoryReader};
use arbor_tree::Node;
use colored::Colorize;
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Keys(args) => cmd_keys(args),
        Command::Cat(args) => cmd_cat(args),
        Command::Diff(args) => cmd_diff(args),
        Command::Roundtrip(args) => cmd_roundtrip(args),
    }
}

fn cmd_keys(args: KeysArgs) -> anyhow::Result<()> {
    let store = DirectoryReader::open(&args.root)?;
    for (index, key) in store.keys().iter().enumerate() {
        println!("{:>5}  {}", index.to_string().dimmed(), key);
    }
    Ok(())
}

fn cmd_cat(args: CatArgs) -> anyhow::Result<()> {
    let store = DirectoryReader::open(&args.root)?;
    let blob = store.read(args.index)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&blob)?;
    stdout.flush()?;
    Ok(())
}

fn cmd_diff(args: DiffArgs) -> anyhow::Result<()> {
    let left = load_tree(&args.left)?;
    let right = load_tree(&args.right)?;
    let config = diff_config(&args)?;

    let report = diff_named(
        &[
            (config.left_name.as_str(), &left),
            (config.right_name.as_str(), &right),
        ],
        &config.options(),
    )?;
    print_report(&report);

    if args.check && !report.is_empty() {
        bail!("trees differ ({} findings)", report.len());
    }
    Ok(())
}

fn cmd_roundtrip(args: RoundtripArgs) -> anyhow::Result<()> {
    let tree = load_tree(&args.tree)?;
    let report = roundtrip_report(&tree)?;
    print_report(&report);
    if !report.is_empty() {
        bail!("round trip changed the tree ({} findings)", report.len());
    }
    Ok(())
}

fn load_tree(path: &Path) -> anyhow::Result<Node> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let node = Node::from_json_slice(&bytes)
        .with_context(|| format!("decoding {}", path.display()))?;
    debug!(path = %path.display(), kind = %node.kind(), "loaded tree document");
    Ok(node)
}

/// Config file first, then command-line overrides.
fn diff_config(args: &DiffArgs) -> anyhow::Result<DiffConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            DiffConfig::from_toml(&text)?
        }
        None => DiffConfig::default(),
    };
    if let Some(name) = &args.left_name {
        config.left_name = name.clone();
    }
    if let Some(name) = &args.right_name {
        config.right_name = name.clone();
    }
    config.ignore_keys.extend(args.ignore_keys.iter().cloned());
    Ok(config)
}

/// Load `tree` into a record of its own layout, store the record again and
/// diff the result against the input.
fn roundtrip_report(tree: &Node) -> anyhow::Result<DiffReport> {
    let Some(group) = tree.as_group() else {
        bail!("a stored record must be a group, got {}", tree.kind());
    };
    let mut record = layout_of(group)?;
    load_into(&mut record, group)?;
    let restored = Node::from(store(&record)?);
    Ok(diff_named(
        &[("input", tree), ("restored", &restored)],
        &DiffOptions::new(),
    )?)
}

fn print_report(report: &DiffReport) {
    if report.is_empty() {
        println!("{} No differences.", "✓".green().bold());
        return;
    }
    for finding in &report.findings {
        let line = finding.to_string();
        let line = match finding {
            Finding::Presence { .. } => line.yellow(),
            Finding::Attribute { .. } => line.cyan(),
            Finding::ArrayDump { .. } => line.red(),
            Finding::KindMismatch { .. } => line.magenta().bold(),
        };
        println!("{line}");
    }
    println!("{} {} findings", "✗".red().bold(), report.len());
}
