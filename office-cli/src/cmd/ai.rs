// ABOUTME: AI commands - ask, analyze, report, auto-report, pipeline and generate.
// ABOUTME: Each builds an OfficeAgent from the config and fails fast without an API key.

use anyhow::{bail, Context};
use clap::Subcommand;
use std::path::{Path, PathBuf};

use office_agent::config::AgentConfig;
use office_agent::office::{self, preview};
use office_agent::workflow::{DocumentLength, OfficeAgent, PIPELINE_HEADERS};

use super::table::parse_rows;

const PREVIEW_CHARS: usize = 200;

#[derive(Subcommand)]
pub enum GenerateSubcommand {
    /// Generate a spreadsheet
    Table {
        description: String,
        /// Number of data rows to ask for
        #[arg(long, default_value_t = 10)]
        rows: usize,
        #[arg(long, default_value = "ai_spreadsheet.xlsx")]
        output: PathBuf,
    },
    /// Generate a document
    Doc {
        description: String,
        /// short, medium or long
        #[arg(long, default_value = "medium")]
        length: DocumentLength,
        #[arg(long, default_value = "AI Generated Document")]
        title: String,
        #[arg(long, default_value = "ai_document.docx")]
        output: PathBuf,
    },
}

/// Build an agent, failing early when no API key is configured.
pub fn agent(config: &AgentConfig) -> anyhow::Result<OfficeAgent> {
    if !config.has_api_key() {
        bail!("no API key configured: set GOOGLE_API_KEY or pass --api-key");
    }
    OfficeAgent::from_config(config).context("invalid agent configuration")
}

pub async fn ask(config: &AgentConfig, question: &str, context: Option<&str>) -> anyhow::Result<()> {
    let answer = agent(config)?.ask(question, context).await?;
    println!("{answer}");
    Ok(())
}

pub async fn analyze(config: &AgentConfig, path: &Path) -> anyhow::Result<()> {
    let analysis = agent(config)?
        .analyze_table(path)
        .await
        .with_context(|| format!("failed to analyze {}", path.display()))?;
    println!("{analysis}");
    Ok(())
}

pub async fn report(config: &AgentConfig, source: &Path) -> anyhow::Result<()> {
    let report = agent(config)?
        .analyze_and_report(source)
        .await
        .with_context(|| format!("failed to report on {}", source.display()))?;
    println!("Source: {}", source.display());
    println!("Report: {}", report.display());
    Ok(())
}

pub async fn auto_report(config: &AgentConfig, source: &Path, output: &Path) -> anyhow::Result<()> {
    let agent = agent(config)?;
    let rows = office::read_table(source, None)
        .with_context(|| format!("failed to read {}", source.display()))?;
    let report = agent.auto_report(&rows, output).await?;
    println!("Report: {}", report.display());
    Ok(())
}

pub async fn pipeline(config: &AgentConfig, project: &Path, lines: &[String]) -> anyhow::Result<()> {
    let agent = agent(config)?;
    let rows = parse_rows(lines, Some(PIPELINE_HEADERS.len()));
    let output = agent.run_pipeline(&rows, project).await?;

    println!("Pipeline finished");
    println!("  Spreadsheet: {}", output.spreadsheet.display());
    println!("  Report:      {}", output.report.display());
    Ok(())
}

pub async fn generate(config: &AgentConfig, subcmd: GenerateSubcommand) -> anyhow::Result<()> {
    let agent = agent(config)?;
    match subcmd {
        GenerateSubcommand::Table {
            description,
            rows,
            output,
        } => {
            let table = agent.generate_table(&description, rows).await?;
            println!(
                "Generated {} columns and {} rows",
                table.headers.len(),
                table.rows.len()
            );
            println!("Columns: {}", table.headers.join(", "));

            let written = office::create_table(&output, &table.rows, Some(table.headers.as_slice()))
                .with_context(|| format!("failed to create {}", output.display()))?;
            println!("Created {}", written.display());
        }
        GenerateSubcommand::Doc {
            description,
            length,
            title,
            output,
        } => {
            let paragraphs = agent.generate_document(&description, length).await?;
            let text = paragraphs.join("\n");
            println!("Generated {} paragraphs", paragraphs.len());
            println!("{}...", preview(&text, PREVIEW_CHARS));

            let written = office::create_document(&output, &title, paragraphs)
                .with_context(|| format!("failed to create {}", output.display()))?;
            println!("Created {}", written.display());
        }
    }
    Ok(())
}
