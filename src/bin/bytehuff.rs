//! bytehuff CLI - Huffman file compressor
//!
//! ```text
//! bytehuff -c <SOURCE> <TARGET>   compress SOURCE into TARGET
//! bytehuff -x <SOURCE> <TARGET>   decompress SOURCE into TARGET
//! ```

use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

use bytehuff::{compress_file, decompress_file, Framing, HuffmanOptions};

/// Lossless per-file Huffman compressor.
#[derive(Parser, Debug)]
#[command(name = "bytehuff")]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("mode").required(true).args(["compress", "extract"])))]
struct Args {
    /// Compress SOURCE into TARGET
    #[arg(short = 'c', long)]
    compress: bool,

    /// Decompress SOURCE into TARGET
    #[arg(short = 'x', long)]
    extract: bool,

    /// Input file
    #[arg(value_name = "SOURCE")]
    source: PathBuf,

    /// Output file (created or truncated)
    #[arg(value_name = "TARGET")]
    target: PathBuf,

    /// Use the baseline layout without a symbol count
    #[arg(long)]
    bare: bool,

    /// I/O buffer size in bytes
    #[arg(
        long,
        default_value = "1024",
        value_parser = clap::value_parser!(u32).range(1..=1_048_576)
    )]
    buffer_size: u32,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let options = HuffmanOptions {
        buffer_size: args.buffer_size as usize,
        framing: if args.bare {
            Framing::Bare
        } else {
            Framing::SymbolCount
        },
    };

    let (input_size, output_size) = if args.compress {
        let stats = compress_file(&args.source, &args.target, &options)?;
        info!(
            source = %args.source.display(),
            target = %args.target.display(),
            distinct = stats.distinct_symbols,
            "compressed"
        );
        (stats.input_bytes, stats.output_bytes)
    } else {
        let stats = decompress_file(&args.source, &args.target, &options)?;
        info!(
            source = %args.source.display(),
            target = %args.target.display(),
            "decompressed"
        );
        (stats.input_bytes, stats.output_bytes)
    };

    if args.verbose {
        let ratio = if input_size > 0 {
            (output_size as f64 / input_size as f64) * 100.0
        } else {
            0.0
        };
        eprintln!(
            "{} -> {} ({:.1}%)",
            format_size(input_size),
            format_size(output_size),
            ratio
        );
    }

    Ok(())
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
