//! Veles CLI - inspect, search, and carve binary byte streams.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use veles_registry::{read_records, IdMap, PackedId};
use veles_stream::{ByteReader, ByteWriter};

/// Veles - binary byte-stream inspection tool
#[derive(Parser)]
#[command(name = "veles")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find a byte pattern in a file
    Find {
        /// File to search
        #[arg(short, long, env = "INPUT_FILE")]
        file: PathBuf,

        /// Pattern as a literal string
        #[arg(short, long)]
        string: Option<String>,

        /// Pattern as hex bytes, e.g. "DEADBEEF" or "de ad be ef"
        #[arg(short = 'x', long)]
        hex: Option<String>,

        /// Report every occurrence instead of stopping at the first
        #[arg(short, long)]
        all: bool,

        /// Offset to start searching from
        #[arg(long, default_value_t = 0)]
        start: u64,
    },

    /// Copy a byte range out of a file
    Carve {
        /// File to carve from
        #[arg(short, long, env = "INPUT_FILE")]
        file: PathBuf,

        /// Start offset of the range
        #[arg(long)]
        offset: u64,

        /// Length of the range in bytes
        #[arg(long)]
        length: u64,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Inspect registry map files
    #[command(subcommand)]
    Map(MapCommands),
}

#[derive(Subcommand)]
enum MapCommands {
    /// List the records in a map file
    Dump {
        /// Map file to read
        #[arg(short, long)]
        file: PathBuf,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Compare a map file against a list of known names
    Check {
        /// Map file to read
        #[arg(short, long)]
        file: PathBuf,

        /// Newline-delimited list of known full names
        #[arg(short, long)]
        names: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Find {
            file,
            string,
            hex,
            all,
            start,
        } => {
            cmd_find(&file, string.as_deref(), hex.as_deref(), all, start)?;
        }
        Commands::Carve {
            file,
            offset,
            length,
            output,
        } => {
            cmd_carve(&file, offset, length, &output)?;
        }
        Commands::Map(MapCommands::Dump { file, json }) => {
            cmd_map_dump(&file, json)?;
        }
        Commands::Map(MapCommands::Check { file, names }) => {
            cmd_map_check(&file, &names)?;
        }
    }

    Ok(())
}

fn cmd_find(
    file: &PathBuf,
    string: Option<&str>,
    hex: Option<&str>,
    all: bool,
    start: u64,
) -> Result<()> {
    let pattern = match (string, hex) {
        (Some(s), None) => s.as_bytes().to_vec(),
        (None, Some(h)) => parse_hex(h)?,
        _ => bail!("specify exactly one of --string or --hex"),
    };

    let mut reader = ByteReader::open(file).context("Failed to open input file")?;
    reader
        .seek(start)
        .with_context(|| format!("Start offset {start} is past the end of the file"))?;

    let pb = if all {
        let pb = ProgressBar::new(reader.len());
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let begin = Instant::now();
    let mut found = 0u64;

    loop {
        let at = reader.position();
        match reader.try_skip_until(&pattern, true) {
            Some(skipped) => {
                let offset = at + skipped;
                match &pb {
                    Some(pb) => {
                        pb.set_position(reader.position());
                        pb.println(format!("{offset:#010x}"));
                    }
                    None => println!("{offset:#010x}"),
                }
                found += 1;
                if !all {
                    break;
                }
            }
            None => break,
        }
    }

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    if found == 0 {
        println!("Pattern not found");
    } else {
        println!("{} occurrence(s) in {:?}", found, begin.elapsed());
    }

    Ok(())
}

fn cmd_carve(file: &PathBuf, offset: u64, length: u64, output: &PathBuf) -> Result<()> {
    let mut reader = ByteReader::open(file).context("Failed to open input file")?;
    reader
        .seek(offset)
        .with_context(|| format!("Offset {offset} is past the end of the file"))?;

    let length = usize::try_from(length).context("Range too large to carve")?;
    let bytes = reader
        .try_next_bytes(length)
        .with_context(|| format!("Range [{offset}, {offset}+{length}) runs past the end"))?;

    let mut writer = ByteWriter::with_capacity(bytes.len());
    writer.write_bytes(&bytes);
    writer.save(output).context("Failed to write output file")?;

    println!("Carved {} bytes to {}", bytes.len(), output.display());

    Ok(())
}

fn cmd_map_dump(file: &PathBuf, json: bool) -> Result<()> {
    let records = read_records(file).context("Failed to read map file")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    for record in &records {
        println!(
            "{:#010x} ({:>5}:{:<5}) {}",
            record.id.raw(),
            record.id.registry(),
            record.id.item(),
            record.name
        );
    }
    println!("\nTotal: {} records", records.len());

    Ok(())
}

fn cmd_map_check(file: &PathBuf, names: &PathBuf) -> Result<()> {
    let list = fs::read_to_string(names).context("Failed to read name list")?;

    // a synthetic live id per known name is enough to drive resolution
    let known: HashMap<&str, PackedId> = list
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .enumerate()
        .map(|(i, name)| (name, PackedId::new(0, i as u16)))
        .collect();

    let (map, missing) = IdMap::load(file, |name| known.get(name).copied())
        .context("Failed to load map file")?;

    println!("Resolved: {} records", map.len());

    if missing.is_empty() {
        println!("All names resolved");
    } else {
        println!("Missing: {} names", missing.len());
        for name in &missing {
            println!("  {name}");
        }
    }

    Ok(())
}

/// Parse a hex pattern, ignoring whitespace between byte pairs.
fn parse_hex(s: &str) -> Result<Vec<u8>> {
    let digits: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.is_empty() || digits.len() % 2 != 0 {
        bail!("hex pattern must contain an even number of digits");
    }

    digits
        .chunks(2)
        .map(|pair| match (pair[0].to_digit(16), pair[1].to_digit(16)) {
            (Some(hi), Some(lo)) => Ok((hi * 16 + lo) as u8),
            _ => bail!("invalid hex byte {:?}{:?}", pair[0], pair[1]),
        })
        .collect()
}
