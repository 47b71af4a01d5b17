// ABOUTME: OfficeAgent - runs the AI-backed workflows over one CompletionService.
// ABOUTME: Every model call goes through the service, so all workflows share one rate ceiling.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::prompts;
use crate::config::AgentConfig;
use crate::error::{GovernorError, OfficeError};
use crate::llm::CompletionService;
use crate::office::{self, CellValue, Table};

/// Column headers of the spreadsheet written by [`OfficeAgent::run_pipeline`].
pub const PIPELINE_HEADERS: [&str; 4] = ["ID", "Description", "Value", "Status"];

const AUTO_REPORT_TITLE: &str = "Automated Report";
const PIPELINE_INTRO: &str = "This report was generated automatically by the agent.";
const ANALYSIS_HEADING: &str = "DATA ANALYSIS:";
const FULL_REPORT_INTRO: &str =
    "This report was generated automatically by AI from an analysis of the spreadsheet data.";

/// How long a generated document should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl DocumentLength {
    /// Wording used in the generation prompt.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Short => "short document (1-2 paragraphs)",
            Self::Medium => "medium document (3-5 paragraphs)",
            Self::Long => "long document (6-8 paragraphs)",
        }
    }
}

impl fmt::Display for DocumentLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        })
    }
}

/// Accepts the menu numbers `1`-`3` or the names `short`, `medium`, `long`.
impl FromStr for DocumentLength {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "short" => Ok(Self::Short),
            "2" | "medium" => Ok(Self::Medium),
            "3" | "long" => Ok(Self::Long),
            other => Err(format!("unknown document length '{other}' (use short, medium or long)")),
        }
    }
}

/// Files written by [`OfficeAgent::run_pipeline`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    pub spreadsheet: PathBuf,
    pub report: PathBuf,
}

/// `project` with `suffix` appended to its final component.
fn with_suffix(project: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(project.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Runs spreadsheet and document jobs that need the model.
pub struct OfficeAgent {
    service: CompletionService,
}

impl OfficeAgent {
    pub fn new(service: CompletionService) -> Self {
        Self { service }
    }

    /// Build an agent backed by Gemini, or with AI disabled when no key is set.
    pub fn from_config(config: &AgentConfig) -> Result<Self, GovernorError> {
        Ok(Self::new(CompletionService::from_config(config)?))
    }

    pub fn service(&self) -> &CompletionService {
        &self.service
    }

    /// Ask a free-form question, optionally with context.
    pub async fn ask(&self, question: &str, context: Option<&str>) -> Result<String, OfficeError> {
        Ok(self.service.ask(question, context).await?)
    }

    /// Read a spreadsheet and ask the model for a summary, insights and suggestions.
    pub async fn analyze_table(&self, path: impl AsRef<Path>) -> Result<String, OfficeError> {
        let path = path.as_ref();
        let rows = office::read_table(path, None)?;
        tracing::info!(path = %path.display(), rows = rows.len(), "analyzing spreadsheet");

        Ok(self.service.complete(&prompts::analyze_rows(&rows)).await?)
    }

    /// Write an executive report on `rows` to `output`.
    pub async fn auto_report(
        &self,
        rows: &[Vec<CellValue>],
        output: impl AsRef<Path>,
    ) -> Result<PathBuf, OfficeError> {
        let report = self.service.complete(&prompts::executive_report(rows)).await?;
        Ok(office::create_document(output, AUTO_REPORT_TITLE, report)?)
    }

    /// Spreadsheet, then analysis, then report.
    ///
    /// Writes `{project}.xlsx` with [`PIPELINE_HEADERS`] and
    /// `{project}_report.docx` holding the model's analysis of it.
    pub async fn run_pipeline(
        &self,
        rows: &[Vec<CellValue>],
        project: impl AsRef<Path>,
    ) -> Result<PipelineOutput, OfficeError> {
        let project = project.as_ref();
        tracing::info!(project = %project.display(), rows = rows.len(), "pipeline started");

        let headers: Vec<String> = PIPELINE_HEADERS.iter().map(|h| h.to_string()).collect();
        let spreadsheet = office::create_table(
            with_suffix(project, ".xlsx"),
            rows,
            Some(headers.as_slice()),
        )?;

        let analysis = self.analyze_table(&spreadsheet).await?;

        let report = office::create_document(
            with_suffix(project, "_report.docx"),
            &format!("Report: {}", display_name(project)),
            vec![
                PIPELINE_INTRO.to_string(),
                String::new(),
                ANALYSIS_HEADING.to_string(),
                analysis,
            ],
        )?;

        tracing::info!(spreadsheet = %spreadsheet.display(), report = %report.display(), "pipeline finished");
        Ok(PipelineOutput {
            spreadsheet,
            report,
        })
    }

    /// Ask the model for a table matching `description` with `rows` data rows.
    pub async fn generate_table(&self, description: &str, rows: usize) -> Result<Table, OfficeError> {
        let reply = self
            .service
            .complete(&prompts::generate_table(description, rows))
            .await?;
        let table = office::extract_table(&reply)?;

        if table.rows.len() != rows {
            tracing::warn!(requested = rows, received = table.rows.len(), "model returned a different row count");
        }
        tracing::info!(columns = table.headers.len(), rows = table.rows.len(), "table generated");
        Ok(table)
    }

    /// Ask the model for plain prose about `description`, split into paragraphs.
    pub async fn generate_document(
        &self,
        description: &str,
        length: DocumentLength,
    ) -> Result<Vec<String>, OfficeError> {
        let reply = self
            .service
            .complete(&prompts::generate_document(description, length))
            .await?;
        let paragraphs = office::split_paragraphs(&office::strip_emphasis(&reply));

        tracing::info!(%length, paragraphs = paragraphs.len(), "document generated");
        Ok(paragraphs)
    }

    /// Analyze an existing spreadsheet and write `{stem}_report.docx` beside it.
    pub async fn analyze_and_report(&self, xlsx: impl AsRef<Path>) -> Result<PathBuf, OfficeError> {
        let xlsx = xlsx.as_ref();
        let rows = office::read_table(xlsx, None)?;

        let analysis = self.service.complete(&prompts::full_report(&rows)).await?;
        let analysis = office::strip_emphasis(&analysis);

        let stem = xlsx
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "spreadsheet".to_string());
        let output = xlsx.with_file_name(format!("{stem}_report.docx"));

        Ok(office::create_document(
            output,
            &format!("Report: {}", display_name(xlsx)),
            vec![FULL_REPORT_INTRO.to_string(), String::new(), analysis],
        )?)
    }
}
