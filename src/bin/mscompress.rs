use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use mscompress::{CompressConfig, CompressStats, SzddCompressor};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mscompress")]
#[command(about = "Compress files into the MS-DOS COMPRESS.EXE (SZDD) format")]
#[command(version)]
struct Args {
    /// Files to compress; FILE.EXT is written to FILE.EX_
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Write the bare LZSS stream without the SZDD header
    #[arg(long)]
    raw: bool,

    /// Show per-file statistics
    #[arg(short, long)]
    verbose: bool,

    /// Suppress warnings
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

const EXIT_OK: u8 = 0;
const EXIT_FAILED: u8 = 1;

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(&args);

    let config = CompressConfig { raw: args.raw, ..Default::default() };

    let mut failed = 0;
    for input in &args.files {
        let Some(output) = output_path(input) else {
            eprintln!("Error: {}: cannot derive an output name", input.display());
            failed += 1;
            continue;
        };
        if output == *input {
            warn!("{}: already ends with underscore -- ignored", input.display());
            continue;
        }

        let start = std::time::Instant::now();
        match compress_file(input, &output, config.clone()) {
            Ok(stats) => {
                if args.verbose {
                    report(input, &output, &stats, start.elapsed());
                }
            }
            Err(e) => {
                eprintln!("Error: {}: {}", input.display(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        ExitCode::from(EXIT_FAILED)
    } else {
        ExitCode::from(EXIT_OK)
    }
}

fn init_tracing(args: &Args) {
    let filter = if args.quiet {
        EnvFilter::new("off")
    } else if args.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// `name.ext` becomes `name.ex_`; a name already ending in `_` maps to itself
#[cfg(unix)]
fn output_path(input: &Path) -> Option<PathBuf> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    // Raw bytes, so names that are not UTF-8 still get an output name
    let mut name = input.as_os_str().as_bytes().to_vec();
    *name.last_mut()? = b'_';
    Some(PathBuf::from(OsStr::from_bytes(&name)))
}

#[cfg(not(unix))]
fn output_path(input: &Path) -> Option<PathBuf> {
    let name = input.to_str()?;
    let mut chars = name.chars();
    chars.next_back()?;
    Some(PathBuf::from(format!("{}_", chars.as_str())))
}

fn compress_file(
    input: &Path,
    output: &Path,
    config: CompressConfig,
) -> mscompress::Result<CompressStats> {
    let name = input.to_string_lossy();
    let reader = File::open(input)?;
    let writer = File::create(output)?;

    let mut compressor = SzddCompressor::new(config);
    let result = compressor.compress(reader, &name, writer);
    if result.is_err() {
        // A partial archive is worse than none
        fs::remove_file(output).ok();
    }
    result
}

fn report(input: &Path, output: &Path, stats: &CompressStats, elapsed: std::time::Duration) {
    eprintln!("{} -> {}:", input.display(), output.display());
    eprintln!("  Input bytes:      {}", stats.input_bytes);
    eprintln!("  Output bytes:     {}", stats.output_bytes);
    eprintln!("  Ratio:            {:.1}%", stats.ratio() * 100.0);
    eprintln!("  Literals:         {}", stats.literals);
    eprintln!("  Back-references:  {}", stats.matches);
    eprintln!("  Time:             {:.2?}", elapsed);
}
