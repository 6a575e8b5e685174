use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, ensure};
use clap::{ArgAction, Parser, Subcommand};
use huffpack::{Huffman, files};

#[derive(Parser, Debug)]
#[command(version, about = "Huffman text compressor")]
struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a UTF-8 text file
    Compress {
        input: PathBuf,
        /// Output path, defaults to the input with a .bin extension
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print the code table
        #[arg(long)]
        print_codes: bool,
    },
    /// Decompress a file, re-deriving the code table from its source text
    Decompress {
        artifact: PathBuf,
        /// The original text the artifact was compressed from
        #[arg(short, long)]
        source: PathBuf,
        /// Output path, defaults to <artifact stem>_decompressed.txt
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compress then decompress a file and report the size reduction
    Roundtrip {
        input: PathBuf,
        #[arg(long)]
        print_codes: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Ok(()) = log::set_logger(&LOGGER) {
        log::set_max_level(match args.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        });
    }

    match args.command {
        Command::Compress {
            input,
            output,
            print_codes,
        } => {
            let output = output.unwrap_or_else(|| files::compressed_path(&input));
            let huffman = compress(&input, &output, print_codes)?;
            log::info!(
                "compressed {} ({} symbols) into {}",
                input.display(),
                huffman.frequencies().len(),
                output.display()
            );
        }
        Command::Decompress {
            artifact,
            source,
            output,
        } => {
            let output = output.unwrap_or_else(|| files::decompressed_path(&artifact));
            let text = files::read_text(&source)
                .with_context(|| format!("read source text {}", source.display()))?;
            let huffman = Huffman::from_text(&text).context("derive code table")?;
            decompress(&huffman, &artifact, &output)?;
        }
        Command::Roundtrip { input, print_codes } => roundtrip(&input, print_codes)?,
    }

    Ok(())
}

fn compress(input: &Path, output: &Path, print_codes: bool) -> Result<Huffman> {
    let text = files::read_text(input)
        .with_context(|| format!("read provided file {}", input.display()))?;
    let huffman = Huffman::from_text(&text).context("derive code table")?;
    if print_codes {
        print!("{}", huffman.codes());
    }

    let packed = huffman.encode(&text).context("encode text")?;
    files::write_atomic(output, packed)
        .with_context(|| format!("write compressed file {}", output.display()))?;
    Ok(huffman)
}

fn decompress(huffman: &Huffman, artifact: &Path, output: &Path) -> Result<String> {
    let packed =
        fs::read(artifact).with_context(|| format!("read compressed file {}", artifact.display()))?;
    let text = huffman.decode(&packed).context("decode compressed file")?;
    files::write_atomic(output, &text)
        .with_context(|| format!("write decompressed file {}", output.display()))?;
    Ok(text)
}

fn roundtrip(input: &Path, print_codes: bool) -> Result<()> {
    let start = Instant::now();

    let compressed = files::compressed_path(input);
    let huffman = compress(input, &compressed, print_codes)?;
    let decompressed = files::decompressed_path(&compressed);
    let text = decompress(&huffman, &compressed, &decompressed)?;

    let original_size = fs::metadata(input)?.len();
    let compressed_size = fs::metadata(&compressed)?.len();
    let decompressed_size = fs::metadata(&decompressed)?.len();

    ensure!(
        text == files::read_text(input)?,
        "decompressed text differs from {}",
        input.display()
    );

    println!(
        "Program took about {:.2} seconds to compress and decompress the file\n",
        start.elapsed().as_secs_f64()
    );
    println!(
        "The original file has been reduced in size by {:.2}%.\n",
        files::compression_ratio(original_size, compressed_size)
    );
    println!(
        "The decompressed file is {} bytes, the original {} bytes: {}.",
        decompressed_size,
        original_size,
        if decompressed_size == original_size {
            "sizes match"
        } else {
            "sizes differ"
        }
    );

    Ok(())
}

/// A simple stderr logger.
static LOGGER: SimpleLogger = SimpleLogger;
struct SimpleLogger;
impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let target = if !record.target().is_empty() {
                record.target()
            } else {
                record.module_path().unwrap_or_default()
            };

            match record.level() {
                log::Level::Error => eprintln!("Error ({}): {}", target, record.args()),
                log::Level::Warn => eprintln!("Warning ({}): {}", target, record.args()),
                log::Level::Info => eprintln!("Info ({}): {}", target, record.args()),
                log::Level::Debug => eprintln!("Debug ({}): {}", target, record.args()),
                log::Level::Trace => eprintln!("Trace ({}): {}", target, record.args()),
            }
        }
    }

    fn flush(&self) {}
}
