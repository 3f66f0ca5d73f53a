//! dirhash CLI - print one digest for the contents of a directory tree

use clap::Parser;
use dirhash::config::{CliArgs, DigestConfig, HashAlgorithm, OutputFormat};
use dirhash::error::{IoResultExt, Result, EXIT_USAGE};
use dirhash::hash::DirectoryHasher;
use std::io::Write;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = CliArgs::parse();

    // Logs go to stderr; stdout carries only the digest
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if args.list_algorithms {
        if let Err(e) = list_algorithms() {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
        return;
    }

    if args.directory.is_none() {
        // Exit status is the usage code whether or not stdout is still open
        let _ = write_stdout(
            "Usage: dirhash <DIRECTORY> [HASH_TYPE | crc32]\n       \
             dirhash --list-algorithms\n       \
             dirhash --help for more information",
        );
        std::process::exit(EXIT_USAGE);
    }

    if let Err(e) = run(&args) {
        tracing::debug!(error = ?e, "run failed");
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run(args: &CliArgs) -> Result<()> {
    let config = DigestConfig::from_cli(args)?;
    tracing::info!(
        root = %config.root.display(),
        algorithm = %config.algorithm,
        chunk_size = config.chunk_size,
        order = ?config.order,
        "hashing directory"
    );

    let digest = DirectoryHasher::from_config(&config).hash(&config.root)?;

    let line = match config.format {
        OutputFormat::Text => digest.to_string(),
        OutputFormat::Json => serde_json::to_string(&digest)?,
    };
    write_stdout(&line)
}

fn list_algorithms() -> Result<()> {
    let names: Vec<&str> = HashAlgorithm::ALL.iter().map(|a| a.name()).collect();
    write_stdout(&names.join("\n"))
}

/// Write one line to stdout, reporting a closed pipe as an error instead of panicking
fn write_stdout(line: &str) -> Result<()> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", line)
        .and_then(|_| out.flush())
        .with_path("<stdout>")
}
