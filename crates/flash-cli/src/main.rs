mod analyze;
mod export;
mod notify;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "flash-cli")]
#[command(about = "Brand-monitoring KPI engine")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Where mentions come from and which brands to track.
///
/// Flags override the monitoring profile; an absent profile file falls back
/// to the built-in default.
#[derive(Debug, Clone, Default, Args)]
pub(crate) struct SourceArgs {
    /// Mentions file (.csv or .json); defaults to `FLASH_DATA_PATH`
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Monitoring profile (YAML); defaults to `FLASH_PROFILE_PATH`
    #[arg(long)]
    pub profile: Option<PathBuf>,

    /// Primary brand, overriding the profile
    #[arg(long)]
    pub brand: Option<String>,

    /// Competitor name; repeat for several. Replaces the profile's list
    #[arg(long = "competitor")]
    pub competitors: Vec<String>,

    /// Campaign message; repeat for several. Replaces the profile's list
    #[arg(long = "campaign")]
    pub campaigns: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Json,
    Markdown,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compute the KPI summary and top keywords
    Analyze {
        #[command(flatten)]
        source: SourceArgs,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Reporting period label shown in the markdown report
        #[arg(long, default_value = "Last 30 days")]
        period: String,
    },
    /// Print the top keywords and phrases only
    Keywords {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Write enriched mentions to a CSV file
    Export {
        /// Destination CSV path
        #[arg(long)]
        out: PathBuf,

        #[command(flatten)]
        source: SourceArgs,
    },
    /// Classify the sentiment and theme of one text
    Classify {
        text: String,
    },
}

fn main() -> anyhow::Result<()> {
    let config = flash_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(env = %config.env, data = %config.data_path.display(), "configuration loaded");

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Analyze {
            source,
            format,
            period,
        }) => analyze::run_analyze(&config, &source, format, &period, &notify::LogNotifier)?,
        Some(Commands::Keywords { source }) => analyze::run_keywords(&config, &source)?,
        Some(Commands::Export { out, source }) => export::run_export(&config, &source, &out)?,
        Some(Commands::Classify { text }) => analyze::run_classify(&text),
        None => println!("flash-cli ready; run `flash-cli --help` for commands"),
    }

    Ok(())
}
