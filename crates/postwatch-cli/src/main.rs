//! `postwatch`: generate, preprocess, and analyze post tables.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use postwatch_core::config::{AnnotatorKind, CliOverrides, PostwatchConfig};
use postwatch_core::errors::PipelineError;
use postwatch_core::tracing::init_tracing;
use postwatch_core::PostwatchErrorCode;

mod cmd;
mod summary;

#[derive(Parser)]
#[command(name = "postwatch")]
#[command(about = "Flag likely misinformation in social media post tables")]
#[command(version)]
struct Cli {
    /// Config file to use instead of ./postwatch.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Suppress the summary printed on success
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a labelled synthetic raw table
    Generate {
        #[arg(short, long)]
        output: PathBuf,

        /// Number of posts
        #[arg(long)]
        rows: Option<usize>,

        /// Share of misinformation posts, 0.0 to 1.0
        #[arg(long)]
        misinfo_ratio: Option<f64>,

        #[arg(long)]
        seed: Option<u64>,
    },

    /// Repair a raw table and derive features
    Preprocess {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },

    /// Flag and enrich a cleaned table
    Analyze {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        analysis: AnalysisArgs,
    },

    /// Preprocess and analyze a raw table in one pass
    Run {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        /// Also write the cleaned table here
        #[arg(long)]
        cleaned: Option<PathBuf>,

        #[command(flatten)]
        analysis: AnalysisArgs,
    },
}

#[derive(clap::Args)]
struct AnalysisArgs {
    /// Write chart data as JSON
    #[arg(long)]
    charts: Option<PathBuf>,

    /// Skip entity enrichment; the entities column is filled with N/A
    #[arg(long)]
    no_entities: bool,

    /// Outlier detector seed
    #[arg(long)]
    seed: Option<u64>,

    /// Expected outlier share, in (0, 0.5]
    #[arg(long)]
    contamination: Option<f64>,
}

impl AnalysisArgs {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            detector_seed: self.seed,
            contamination: self.contamination,
            annotator: self.no_entities.then_some(AnnotatorKind::None),
            ..Default::default()
        }
    }
}

impl Commands {
    fn overrides(&self) -> CliOverrides {
        match self {
            Self::Generate {
                rows,
                misinfo_ratio,
                seed,
                ..
            } => CliOverrides {
                synth_rows: *rows,
                synth_misinfo_ratio: *misinfo_ratio,
                synth_seed: *seed,
                ..Default::default()
            },
            Self::Preprocess { .. } => CliOverrides::default(),
            Self::Analyze { analysis, .. } | Self::Run { analysis, .. } => analysis.overrides(),
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", e.report_string());
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run(cli: Cli) -> Result<(), PipelineError> {
    let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = PostwatchConfig::load(&root, cli.config.as_deref(), Some(&cli.command.overrides()))?;
    tracing::debug!(config = ?config, "resolved configuration");
    let quiet = cli.quiet;

    match cli.command {
        Commands::Generate { output, .. } => cmd::generate::run(&config, &output, quiet),
        Commands::Preprocess { input, output } => cmd::preprocess::run(config, &input, &output, quiet),
        Commands::Analyze {
            input,
            output,
            analysis,
        } => cmd::analyze::run(config, &input, &output, analysis.charts.as_deref(), quiet),
        Commands::Run {
            input,
            output,
            cleaned,
            analysis,
        } => cmd::analyze::run_all(
            config,
            &input,
            &output,
            cleaned.as_deref(),
            analysis.charts.as_deref(),
            quiet,
        ),
    }
}
