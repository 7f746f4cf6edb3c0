use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tmarkup::{Config, Normalizer, PositionMapper};

#[derive(Parser)]
#[command(name = "tmarkup")]
#[command(about = "Convert between markup and styled text")]
struct Cli {
    /// Config file (defaults to the built-in configuration)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the styled runs of a markup file as JSON
    Render { input: PathBuf },
    /// Render a markup file and convert it back to markup
    Roundtrip { input: PathBuf },
    /// Map a cursor offset between the raw and rendered text
    Map {
        input: PathBuf,
        #[command(flatten)]
        offset: Offset,
    },
    /// Print the normalized markup
    Normalize { input: PathBuf },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct Offset {
    /// Offset into the raw markup, in characters
    #[arg(long)]
    raw: Option<usize>,
    /// Offset into the rendered text, in characters
    #[arg(long)]
    rendered: Option<usize>,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::try_load(path)?,
        None => Config::compiled_default(),
    };

    match cli.command {
        Command::Render { input } => {
            let markup = read_input(&input)?;
            let styled = tmarkup::render_with_config(&markup, &config);
            let json = serde_json::to_string_pretty(&styled).context("failed to encode runs")?;
            println!("{json}");
        }
        Command::Roundtrip { input } => {
            let markup = read_input(&input)?;
            let styled = tmarkup::render_with_config(&markup, &config);
            let back = tmarkup::to_markup_with_config(&styled, &config);
            println!("{back}");
            let expected = Normalizer::from_config(&config.normalize).normalize(&markup);
            if back != expected {
                eprintln!(
                    "{}: round trip differs from the normalized input",
                    input.display()
                );
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Map { input, offset } => {
            let markup = read_input(&input)?;
            let styled = tmarkup::render_with_config(&markup, &config);
            let mut mapper = PositionMapper::new(&config);
            mapper.rebuild(&markup, &styled);
            let mapped = match offset.raw {
                Some(raw) => mapper.to_rendered(raw),
                None => mapper.to_raw(offset.rendered.unwrap_or_default()),
            };
            println!("{mapped}");
        }
        Command::Normalize { input } => {
            let markup = read_input(&input)?;
            print!("{}", Normalizer::from_config(&config.normalize).normalize(&markup));
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
