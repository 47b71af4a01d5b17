// ABOUTME: office - command-line front end for spreadsheet, document and AI workflows.
// ABOUTME: Loads .env, parses flags, sets up tracing, then dispatches to the cmd modules.

mod cmd;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use cmd::{ai::GenerateSubcommand, doc::DocSubcommand, table::TableSubcommand};
use office_agent::config::AgentConfig;

#[derive(Parser)]
#[command(
    name = "office",
    about = "Create, read and analyze spreadsheets and documents, with Gemini for the AI parts",
    version,
    propagate_version = true
)]
struct Cli {
    /// Gemini API key (falls back to GEMINI_API_KEY)
    #[arg(long, global = true, env = "GOOGLE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Gemini model name [default: gemini-2.0-flash]
    #[arg(long, global = true)]
    model: Option<String>,

    /// Maximum model requests per minute [default: 10]
    #[arg(long, global = true)]
    rate: Option<f64>,

    /// Log progress at info level
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create, read and update spreadsheets
    Table {
        #[command(subcommand)]
        subcommand: TableSubcommand,
    },

    /// Create, read and extend documents
    Doc {
        #[command(subcommand)]
        subcommand: DocSubcommand,
    },

    /// Ask the model a question
    Ask {
        #[arg(required = true)]
        question: Vec<String>,

        /// Extra context placed before the question
        #[arg(long)]
        context: Option<String>,
    },

    /// Ask the model to analyze a spreadsheet
    Analyze { path: PathBuf },

    /// Write a full executive report next to a spreadsheet
    Report { source: PathBuf },

    /// Write a short executive report on a spreadsheet's first rows
    AutoReport {
        source: PathBuf,

        #[arg(long, default_value = "report.docx")]
        output: PathBuf,
    },

    /// Spreadsheet, analysis and report in one go
    Pipeline {
        /// Output prefix: writes {project}.xlsx and {project}_report.docx
        project: PathBuf,

        /// One data row as "id, description, value, status" (repeatable)
        #[arg(long = "row", required = true)]
        rows: Vec<String>,
    },

    /// Generate a spreadsheet or document from a description
    Generate {
        #[command(subcommand)]
        subcommand: GenerateSubcommand,
    },

    /// Open a file in the default application
    Open { path: PathBuf },

    /// Interactive menu
    Menu,
}

fn build_config(cli: &Cli) -> AgentConfig {
    let mut config = AgentConfig::from_env();
    if let Some(key) = cli.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
        config = config.with_api_key(key.trim());
    }
    if let Some(model) = &cli.model {
        config = config.with_model(model);
    }
    if let Some(rate) = cli.rate {
        config = config.with_max_per_minute(rate);
    }
    config
}

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = build_config(&cli);

    let result = match cli.command {
        Commands::Table { subcommand } => cmd::table::run(subcommand),
        Commands::Doc { subcommand } => cmd::doc::run(subcommand),
        Commands::Ask { question, context } => {
            cmd::ai::ask(&config, &question.join(" "), context.as_deref()).await
        }
        Commands::Analyze { path } => cmd::ai::analyze(&config, &path).await,
        Commands::Report { source } => cmd::ai::report(&config, &source).await,
        Commands::AutoReport { source, output } => {
            cmd::ai::auto_report(&config, &source, &output).await
        }
        Commands::Pipeline { project, rows } => cmd::ai::pipeline(&config, &project, &rows).await,
        Commands::Generate { subcommand } => cmd::ai::generate(&config, subcommand).await,
        Commands::Open { path } => cmd::open::run(&path),
        Commands::Menu => cmd::menu::run(config).await,
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
