// SPDX-License-Identifier: PMPL-1.0-or-later
//! Sitegauge CLI - URL presentation scoring

use clap::{Parser, Subcommand, ValueEnum};
use sitegauge::ai::{CompletionClient, DisabledCompletionClient, HttpCompletionClient};
use sitegauge::config;
use sitegauge::report::{
    generate_analysis_report, generate_audit_report, generate_llm_report, generate_seo_report,
    OutputFormat,
};
use sitegauge::seo::Grade;
use sitegauge::wcag::{WcagLevel, WcagVersion};
use sitegauge::{
    analyze_url, calculate_pour_scores, calculate_summary, criteria_for_level, run_wcag_audit,
    DocumentProvider, HttpProvider,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// URL presentation scoring: SEO, LLM citability, and WCAG auditing
#[derive(Parser)]
#[command(name = "sitegauge")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the SEO and LLM-readiness analyses on a URL
    Analyze {
        /// URL to analyze
        url: String,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Run only the SEO analysis
    Seo {
        /// URL to analyze
        url: String,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,
    },

    /// Run only the LLM-readiness analysis
    Llm {
        /// URL to analyze
        url: String,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,
    },

    /// Run a WCAG success-criteria audit on a URL
    Wcag {
        /// URL to audit
        url: String,

        /// WCAG conformance level
        #[arg(long, default_value = "aa")]
        level: LevelArg,

        /// WCAG specification version
        #[arg(long, default_value = "2.2")]
        version: VersionArg,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Initialize a configuration file
    Init {
        /// Configuration format (yaml, toml)
        #[arg(long, default_value = "yaml")]
        format: String,
    },

    /// Show the current configuration
    Show,
}

/// WCAG conformance level CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum LevelArg {
    /// Level A - minimum
    A,
    /// Level AA - standard
    Aa,
    /// Level AAA - enhanced
    Aaa,
}

impl From<LevelArg> for WcagLevel {
    fn from(arg: LevelArg) -> Self {
        match arg {
            LevelArg::A => WcagLevel::A,
            LevelArg::Aa => WcagLevel::AA,
            LevelArg::Aaa => WcagLevel::AAA,
        }
    }
}

/// WCAG version CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum VersionArg {
    #[value(name = "2.1")]
    V21,
    #[value(name = "2.2")]
    V22,
}

impl From<VersionArg> for WcagVersion {
    fn from(arg: VersionArg) -> Self {
        match arg {
            VersionArg::V21 => WcagVersion::V2_1,
            VersionArg::V22 => WcagVersion::V2_2,
        }
    }
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("sitegauge=debug")
    } else {
        EnvFilter::new("sitegauge=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let config = config::load_config(&config_path)?;

    match cli.command {
        Commands::Analyze { url, format, output } => {
            let provider = HttpProvider::new(&config.http)?;
            let analysis = analyze_url(&provider, &url).await?;
            let report = generate_analysis_report(&analysis, format.into());
            write_output(&report, output.as_deref())?;

            if analysis.seo_grade == Grade::Poor {
                std::process::exit(1);
            }
        }

        Commands::Seo { url, format } => {
            let provider = HttpProvider::new(&config.http)?;
            let analysis = analyze_url(&provider, &url).await?;
            println!("{}", generate_seo_report(&analysis, format.into()));

            if analysis.seo_grade == Grade::Poor {
                std::process::exit(1);
            }
        }

        Commands::Llm { url, format } => {
            let provider = HttpProvider::new(&config.http)?;
            let analysis = analyze_url(&provider, &url).await?;
            println!("{}", generate_llm_report(&analysis, format.into()));
        }

        Commands::Wcag { url, level, version, format, output } => {
            let provider = HttpProvider::new(&config.http)?;
            let doc = provider.fetch_document(&url).await?;

            let ai: Box<dyn CompletionClient> = match config.ai.endpoint {
                Some(_) => Box::new(HttpCompletionClient::new(&config.ai)?),
                None => Box::new(DisabledCompletionClient),
            };

            let level: WcagLevel = level.into();
            let version: WcagVersion = version.into();
            let criteria = criteria_for_level(level, version);
            let results = run_wcag_audit(&criteria, &doc, ai.as_ref()).await;
            let scores = calculate_pour_scores(&results, level, version);
            let summary = calculate_summary(&results);

            let report = generate_audit_report(&results, &scores, &summary, format.into());
            write_output(&report, output.as_deref())?;

            if summary.failed > 0 {
                std::process::exit(1);
            }
        }

        Commands::Init { format } => {
            let path = if format == "toml" {
                config_path.with_extension("toml")
            } else {
                config_path.clone()
            };
            config::write_default_config(&path)?;
            println!("Created configuration file: {}", path.display());
        }

        Commands::Show => {
            println!("{}", serde_yaml::to_string(&config)?);
        }
    }

    Ok(())
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&std::path::Path>) -> anyhow::Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)?;
            eprintln!("Report written to {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
