//! Command-line driver that parses one or more JSON files with
//! [`flatjson`], reporting throughput and optionally re-serializing.
//!
//! Grounded in `cejson-files.c`'s heap-based test harness: the node arena
//! is pre-sized from the file's byte length using the same
//! `json_estimate_node_count` heuristic (~11 bytes/node, +20% headroom,
//! rounded up to a 4K boundary), and `-nw` emulates network delivery by
//! feeding 8..4096-byte chunks instead of the whole file at once.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use flatjson::{Node, Parser, Style};
use rand::Rng;

/// Parse JSON files through `flatjson`, reporting throughput.
#[derive(Debug, ClapParser)]
#[command(name = "flatjson", version, about)]
struct Cli {
    /// Pretty-print the parsed document to stdout after a successful parse.
    #[arg(short = 'd', long = "dump")]
    dump: bool,

    /// Report nodes parsed, throughput, and arena sizing to stderr.
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Feed the file in randomly-sized 8..4096-byte chunks instead of one
    /// big chunk, emulating a slow network source.
    #[arg(short = 'n', long = "network-emulation", visible_alias = "nw")]
    network_emulation: bool,

    /// JSON files to parse.
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

/// `~11 bytes/node` worst case, floored at 64, plus 20% headroom, rounded
/// up to a 4096-node boundary.
fn estimate_node_count(input_bytes: u64) -> usize {
    if input_bytes == 0 {
        return 64;
    }
    let mut nodes = (input_bytes / 11).max(64);
    nodes += nodes / 5;
    let rounded = nodes.div_ceil(4096) * 4096;
    usize::try_from(rounded).unwrap_or(usize::MAX)
}

fn parse_file(path: &PathBuf, cli: &Cli) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    if bytes.is_empty() {
        log::warn!("{}: empty file", path.display());
        return Ok(());
    }

    let node_cap = estimate_node_count(bytes.len() as u64);
    let stack_cap = node_cap / 8 + 1024;

    let mut arena = vec![Node::default(); node_cap];
    let mut stack = vec![0u32; stack_cap];
    let mut expecting_key = vec![false; stack_cap];
    let mut parser = Parser::init(&mut arena, &mut stack, &mut expecting_key);

    let start = Instant::now();
    let mut offset = 0usize;
    while offset < bytes.len() {
        let remaining = bytes.len() - offset;
        let chunk_size = if cli.network_emulation {
            rand::rng().random_range(8..=4096).min(remaining)
        } else {
            remaining
        };
        if !parser.feed(&bytes[offset..offset + chunk_size]) {
            let error = parser.error().expect("a failed feed always latches an error");
            anyhow::bail!(
                "{}: parse error {} at byte {} (line {})",
                path.display(),
                error.kind,
                error.pos,
                error.line
            );
        }
        offset += chunk_size;
    }
    if !parser.finish() {
        let error = parser.error().expect("a failed finish always latches an error");
        anyhow::bail!(
            "{}: parse error {} at byte {} (line {})",
            path.display(),
            error.kind,
            error.pos,
            error.line
        );
    }
    let elapsed = start.elapsed();

    if cli.verbose {
        let mb = bytes.len() as f64 / (1024.0 * 1024.0);
        let secs = elapsed.as_secs_f64();
        let speed = if secs > 0.0 { mb / secs } else { 0.0 };
        log::info!(
            "{}: {} nodes ({} allocated) | {speed:.2} MB/s ({secs:.3}s) | {}",
            path.display(),
            parser.nodes().len(),
            node_cap,
            if cli.network_emulation { "net emu" } else { "full speed" },
        );
    }

    if cli.dump {
        let mut stdout = std::io::stdout().lock();
        flatjson::dump(parser.nodes(), &bytes, 0, &mut stdout, Style::Pretty)
            .with_context(|| format!("serializing {}", path.display()))?;
        println!();
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut had_error = false;
    for path in &cli.files {
        if let Err(err) = parse_file(path, &cli) {
            log::error!("{err:#}");
            had_error = true;
        }
    }

    if had_error {
        anyhow::bail!("one or more files failed to parse");
    }
    Ok(())
}
