use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vitae_core::config_file::{self, ConfigFile};
use vitae_parsing::{CvExtractor, ParsingConfigBuilder, Strategy};

mod output;

use output::ColorMode;

/// Vitae - Extract publications and talks from CV text
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log debug details to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract a structured JSON report from a page export or text file
    Extract {
        /// Path to the JSON page export (or .txt file)
        input: PathBuf,

        /// Path to write the JSON report
        #[arg(short, long, default_value = "cv_structured.json")]
        output: PathBuf,

        /// Segmentation strategy: auto, sectioned or numbered
        #[arg(long)]
        strategy: Option<Strategy>,

        /// Config file (replaces the platform and ./.vitae.toml cascade)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Dry run: print the segmented items without parsing them
    Segment {
        /// Path to the JSON page export (or .txt file)
        input: PathBuf,

        /// Segmentation strategy: auto, sectioned or numbered
        #[arg(long)]
        strategy: Option<Strategy>,

        /// Config file (replaces the platform and ./.vitae.toml cascade)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Extract {
            input,
            output,
            strategy,
            config,
            compact,
            no_color,
        } => extract(&input, &output, strategy, config, compact, no_color),
        Command::Segment {
            input,
            strategy,
            config,
            no_color,
        } => segment(&input, strategy, config, no_color),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve configuration: --config > VITAE_CONFIG > platform/CWD cascade.
fn load_config_file(config: Option<PathBuf>) -> anyhow::Result<ConfigFile> {
    let explicit = config.or_else(|| std::env::var("VITAE_CONFIG").ok().map(PathBuf::from));
    match explicit {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            config_file::load_from_path(&path)
                .with_context(|| format!("Could not parse config file {}", path.display()))
        }
        None => Ok(config_file::load_config()),
    }
}

fn build_extractor(file: &ConfigFile) -> anyhow::Result<CvExtractor> {
    let config = ParsingConfigBuilder::from_config_file(file)
        .build()
        .context("Invalid vocabulary in config")?;
    Ok(CvExtractor::with_config(config))
}

/// CLI flag wins over the config file; both absent means auto.
fn resolve_strategy(flag: Option<Strategy>, file: &ConfigFile) -> anyhow::Result<Strategy> {
    if let Some(strategy) = flag {
        return Ok(strategy);
    }
    match file.output.as_ref().and_then(|o| o.strategy.as_deref()) {
        Some(name) => name
            .parse()
            .with_context(|| format!("Invalid output.strategy in config: {name}")),
        None => Ok(Strategy::Auto),
    }
}

fn load_input(input: &Path) -> anyhow::Result<Vec<String>> {
    vitae_ingest::load_lines(input)
        .with_context(|| format!("Failed to load input {}", input.display()))
}

fn extract(
    input: &Path,
    output: &Path,
    strategy: Option<Strategy>,
    config: Option<PathBuf>,
    compact: bool,
    no_color: bool,
) -> anyhow::Result<()> {
    let file = load_config_file(config)?;
    let extractor = build_extractor(&file)?;
    let strategy = resolve_strategy(strategy, &file)?;
    let pretty = !compact && file.output.as_ref().and_then(|o| o.pretty).unwrap_or(true);

    let lines = load_input(input)?;
    let report = extractor.extract(&lines, strategy);

    let json = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    std::fs::write(output, json)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let color = ColorMode(!no_color);
    let mut stdout = std::io::stdout();
    output::print_report_summary(&mut stdout, output, &report, color)?;
    stdout.flush()?;
    Ok(())
}

fn segment(
    input: &Path,
    strategy: Option<Strategy>,
    config: Option<PathBuf>,
    no_color: bool,
) -> anyhow::Result<()> {
    let file = load_config_file(config)?;
    let extractor = build_extractor(&file)?;
    let strategy = resolve_strategy(strategy, &file)?;

    let lines = load_input(input)?;
    let (strategy, segmentation) = extractor.segment(&lines, strategy);

    let color = ColorMode(!no_color);
    let mut stdout = std::io::stdout();
    output::print_segmentation(&mut stdout, strategy, &segmentation, color)?;
    stdout.flush()?;
    Ok(())
}
