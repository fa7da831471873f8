//! chemscreen: compound screening from the command line.
//! Trains both property models at startup, then prints one JSON document.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chemscreen_app::{parse_records, Envelope, ScreeningContext};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "chemscreen", version, about = "Drug-likeness, ADMET and screening over a reference library")]
struct Cli {
    /// Config file (toml, yaml or json); overrides CHEMSCREEN_CONFIG and ./chemscreen.toml
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summary statistics, counts per target and the ranked library
    Library,
    /// Top-N screening hits
    Screen {
        /// Screening target, echoed in the report
        #[arg(long)]
        target: Option<String>,
        /// Number of hits (defaults to screening.top_n)
        #[arg(long)]
        top: Option<usize>,
    },
    /// Full analysis of descriptor records read from FILE, or stdin with "-"
    Analyze {
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
    /// Classifier cross-validation accuracy and feature importances
    Diagnostics,
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).context("reading descriptors from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("chemscreen=info,warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("chemscreen {}", env!("CARGO_PKG_VERSION"));

    let ctx = ScreeningContext::load(cli.config.as_deref()).context("building screening context")?;

    let json = match cli.command {
        Command::Library => Envelope::new("library", ctx.library_report()).to_json()?,
        Command::Screen { target, top } => {
            Envelope::new("screen", ctx.screen(target.as_deref(), top)).to_json()?
        }
        Command::Analyze { input } => {
            let records = parse_records(&read_input(&input)?)?;
            info!(records = records.len(), "Analyzing descriptor records");
            Envelope::new("analyze", ctx.analyze_batch(&records)?).to_json()?
        }
        Command::Diagnostics => Envelope::new("diagnostics", ctx.diagnostics()).to_json()?,
    };

    println!("{json}");
    Ok(())
}
