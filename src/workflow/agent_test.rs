// ABOUTME: Tests for the AI-backed workflows.
// ABOUTME: A scripted client stands in for Gemini; files land in temp dirs.

use std::sync::Arc;

use tempfile::TempDir;

use super::{DocumentLength, OfficeAgent, PIPELINE_HEADERS};
use crate::error::{ExtractError, LlmError, OfficeError};
use crate::llm::testing::ScriptedClient;
use crate::llm::CompletionService;
use crate::office::{self, CellValue};

fn agent_with(client: &Arc<ScriptedClient>) -> OfficeAgent {
    OfficeAgent::new(CompletionService::new(client.clone(), "test-model", 1.0e9).unwrap())
}

fn sales_rows() -> Vec<Vec<CellValue>> {
    vec![
        vec![
            CellValue::Int(1),
            "Product A".into(),
            CellValue::Int(1500),
            "Done".into(),
        ],
        vec![
            CellValue::Int(2),
            "Product B".into(),
            CellValue::Int(2300),
            "Pending".into(),
        ],
    ]
}

#[tokio::test]
async fn test_analyze_table_sends_rows_to_model() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sales.xlsx");
    office::create_table(&path, &sales_rows(), None).unwrap();

    let client = Arc::new(ScriptedClient::new(["Sales look healthy."]));
    let analysis = agent_with(&client).analyze_table(&path).await.unwrap();

    assert_eq!(analysis, "Sales look healthy.");
    let prompt = &client.prompts()[0];
    assert!(prompt.starts_with("Analyze the following spreadsheet data"));
    assert!(prompt.contains("Product B"));
}

#[tokio::test]
async fn test_auto_report_writes_titled_document() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("auto.docx");

    let client = Arc::new(ScriptedClient::new(["Revenue is up."]));
    let written = agent_with(&client)
        .auto_report(&sales_rows(), &output)
        .await
        .unwrap();

    assert_eq!(written, output);
    let paragraphs = office::read_document(&output).unwrap();
    assert_eq!(paragraphs[0], "Automated Report");
    assert_eq!(paragraphs[2], "Revenue is up.");
    assert!(client.prompts()[0].starts_with("Write an executive report"));
}

#[tokio::test]
async fn test_run_pipeline_writes_both_files() {
    let dir = TempDir::new().unwrap();
    let project = dir.path().join("q4");

    let client = Arc::new(ScriptedClient::new(["Two products, one pending."]));
    let output = agent_with(&client)
        .run_pipeline(&sales_rows(), &project)
        .await
        .unwrap();

    assert_eq!(output.spreadsheet, dir.path().join("q4.xlsx"));
    assert_eq!(output.report, dir.path().join("q4_report.docx"));

    let rows = office::read_table(&output.spreadsheet, None).unwrap();
    let headers: Vec<String> = rows[0].iter().map(CellValue::to_string).collect();
    assert_eq!(headers, PIPELINE_HEADERS);

    let paragraphs = office::read_document(&output.report).unwrap();
    assert_eq!(paragraphs[0], "Report: q4");
    assert_eq!(
        &paragraphs[2..],
        [
            "This report was generated automatically by the agent.",
            "DATA ANALYSIS:",
            "Two products, one pending.",
        ]
    );
}

#[tokio::test]
async fn test_run_pipeline_stops_when_model_fails() {
    let dir = TempDir::new().unwrap();
    let project = dir.path().join("broken");

    let client = Arc::new(ScriptedClient::failing_then(Vec::<String>::new()));
    let err = agent_with(&client)
        .run_pipeline(&sales_rows(), &project)
        .await
        .unwrap_err();

    assert!(matches!(err, OfficeError::Llm(LlmError::Api { status: 503, .. })));
    assert!(dir.path().join("broken.xlsx").exists());
    assert!(!dir.path().join("broken_report.docx").exists());
}

#[tokio::test]
async fn test_generate_table_extracts_fenced_reply() {
    let reply = "```json\n{\"headers\": [\"Item\", \"Qty\"], \"rows\": [[\"Pen\", 3], [\"Ink\", 1]]}\n```";
    let client = Arc::new(ScriptedClient::new([reply]));

    let table = agent_with(&client)
        .generate_table("office supplies", 2)
        .await
        .unwrap();

    assert_eq!(table.headers, vec!["Item", "Qty"]);
    assert_eq!(table.rows[0], vec![CellValue::from("Pen"), CellValue::Int(3)]);
    assert!(client.prompts()[0].contains("EXACTLY 2 rows"));
}

#[tokio::test]
async fn test_generate_table_rejects_prose() {
    let client = Arc::new(ScriptedClient::new(["I cannot help with that."]));

    let err = agent_with(&client)
        .generate_table("anything", 3)
        .await
        .unwrap_err();

    assert!(matches!(err, OfficeError::Extract(ExtractError::InvalidJson { .. })));
}

#[tokio::test]
async fn test_generate_document_cleans_markdown() {
    let reply = "**Remote work** is here to stay.\n\n*Teams* adapt quickly.\n  \nThe end.";
    let client = Arc::new(ScriptedClient::new([reply]));

    let paragraphs = agent_with(&client)
        .generate_document("remote work", DocumentLength::Short)
        .await
        .unwrap();

    assert_eq!(
        paragraphs,
        vec![
            "Remote work is here to stay.",
            "Teams adapt quickly.",
            "The end."
        ]
    );
    assert!(client.prompts()[0].starts_with("Write a short document (1-2 paragraphs) about"));
}

#[tokio::test]
async fn test_analyze_and_report_writes_beside_source() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("inventory.xlsx");
    office::create_table(&source, &sales_rows(), None).unwrap();

    let client = Arc::new(ScriptedClient::new(["**EXECUTIVE SUMMARY**: stock is low."]));
    let report = agent_with(&client).analyze_and_report(&source).await.unwrap();

    assert_eq!(report, dir.path().join("inventory_report.docx"));
    let paragraphs = office::read_document(&report).unwrap();
    assert_eq!(paragraphs[0], "Report: inventory.xlsx");
    assert_eq!(paragraphs[3], "EXECUTIVE SUMMARY: stock is low.");
    assert!(client.prompts()[0].contains("Data (first 2 rows)"));
}

#[tokio::test]
async fn test_disabled_agent_still_fails_cleanly() {
    let agent = OfficeAgent::new(CompletionService::disabled("m"));

    let err = agent.ask("hello", None).await.unwrap_err();
    assert!(matches!(err, OfficeError::Llm(LlmError::Configuration(_))));
}

#[test]
fn test_document_length_parsing() {
    assert_eq!("1".parse::<DocumentLength>(), Ok(DocumentLength::Short));
    assert_eq!(" Medium ".parse::<DocumentLength>(), Ok(DocumentLength::Medium));
    assert_eq!("long".parse::<DocumentLength>(), Ok(DocumentLength::Long));
    assert!("epic".parse::<DocumentLength>().is_err());
    assert_eq!(DocumentLength::default(), DocumentLength::Medium);
}
