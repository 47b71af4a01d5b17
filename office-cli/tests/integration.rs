#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

fn office(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("office").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("GOOGLE_API_KEY")
        .env_remove("GEMINI_API_KEY")
        .env_remove("OFFICE_AGENT_BASE_URL")
        .env_remove("OFFICE_AGENT_MODEL")
        .env_remove("OFFICE_AGENT_RATE");
    cmd
}

/// Command wired to a mock Gemini endpoint.
fn office_with_model(dir: &TempDir, server: &mockito::Server) -> Command {
    let mut cmd = office(dir);
    cmd.env("GOOGLE_API_KEY", "test-key")
        .env("OFFICE_AGENT_BASE_URL", server.url())
        .args(["--rate", "6000"]);
    cmd
}

fn gemini_reply(text: &str) -> String {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
    .to_string()
}

fn mock_gemini(server: &mut mockito::Server, text: &str) -> mockito::Mock {
    server
        .mock("POST", "/models/gemini-2.0-flash:generateContent")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(gemini_reply(text))
        .create()
}

// ---------------------------------------------------------------------------
// Spreadsheets
// ---------------------------------------------------------------------------

#[test]
fn table_create_then_read() {
    let dir = TempDir::new().unwrap();
    office(&dir)
        .args(["table", "create", "sales.xlsx", "--headers", "ID, Product, Value"])
        .args(["--row", "1, Pen, 2.5", "--row", "2, Ink"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 data rows"));

    assert!(dir.path().join("sales.xlsx").exists());

    office(&dir)
        .args(["table", "read", "sales.xlsx"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ID | Product | Value"))
        .stdout(predicate::str::contains("1 | Pen | 2.5"))
        .stdout(predicate::str::contains("(3 rows)"));
}

#[test]
fn table_update_changes_one_cell() {
    let dir = TempDir::new().unwrap();
    office(&dir)
        .args(["table", "create", "t.xlsx", "--headers", "A, B", "--row", "x, y"])
        .assert()
        .success();

    office(&dir)
        .args(["table", "update", "t.xlsx", "2", "2", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated cell (2, 2) = 42"));

    office(&dir)
        .args(["table", "read", "t.xlsx"])
        .assert()
        .success()
        .stdout(predicate::str::contains("x | 42"));
}

#[test]
fn table_read_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    office(&dir)
        .args(["table", "read", "missing.xlsx"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("error: failed to read missing.xlsx"));
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

#[test]
fn doc_create_append_read() {
    let dir = TempDir::new().unwrap();
    office(&dir)
        .args(["doc", "create", "notes.docx", "--title", "Notes", "first", "second"])
        .assert()
        .success();

    office(&dir)
        .args(["doc", "append", "notes.docx", "third", "line"])
        .assert()
        .success();

    office(&dir)
        .args(["doc", "read", "notes.docx"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Notes"))
        .stdout(predicate::str::contains("Generated at: "))
        .stdout(predicate::str::contains("second\nthird line"))
        .stdout(predicate::str::contains("(5 paragraphs)"));
}

#[test]
fn open_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    office(&dir)
        .args(["open", "ghost.docx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

// ---------------------------------------------------------------------------
// AI commands
// ---------------------------------------------------------------------------

#[test]
fn ask_without_api_key_fails() {
    let dir = TempDir::new().unwrap();
    office(&dir)
        .args(["ask", "hello"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no API key configured"));
}

#[test]
fn ask_prints_model_answer() {
    let dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let mock = mock_gemini(&mut server, "Forty-two.");

    office_with_model(&dir, &server)
        .args(["ask", "what", "is", "the", "answer?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Forty-two."));

    mock.assert();
}

#[test]
fn ask_prints_answer_with_tabs_and_quotes() {
    let dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let _mock = mock_gemini(&mut server, "Item\tQty\n\"Pen\"\t3\u{1}");

    office_with_model(&dir, &server)
        .args(["ask", "list", "stock"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Item\tQty\n\"Pen\"\t3"));
}

#[test]
fn api_error_is_reported() {
    let dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", "/models/gemini-2.0-flash:generateContent")
        .match_query(mockito::Matcher::Any)
        .with_status(403)
        .with_body(r#"{"error": {"code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED"}}"#)
        .create();

    office_with_model(&dir, &server)
        .args(["ask", "hi"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("API key not valid"));
}

#[test]
fn pipeline_writes_spreadsheet_and_report() {
    let dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let _mock = mock_gemini(&mut server, "Sales are concentrated in one product.");

    office_with_model(&dir, &server)
        .args(["pipeline", "q4", "--row", "1, Product A, 1500, Done"])
        .args(["--row", "2, Product B, 2300, Pending"])
        .assert()
        .success()
        .stdout(predicate::str::contains("q4_report.docx"));

    assert!(dir.path().join("q4.xlsx").exists());

    office(&dir)
        .args(["doc", "read", "q4_report.docx"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DATA ANALYSIS:"))
        .stdout(predicate::str::contains("Sales are concentrated in one product."));
}

#[test]
fn generate_table_writes_model_data() {
    let dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let reply = "```json\n{\"headers\": [\"Item\", \"Qty\"], \"rows\": [[\"Pen\", 3], [\"Ink\", 1]]}\n```";
    let _mock = mock_gemini(&mut server, reply);

    office_with_model(&dir, &server)
        .args(["generate", "table", "office supplies", "--rows", "2", "--output", "supplies.xlsx"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Columns: Item, Qty"));

    office(&dir)
        .args(["table", "read", "supplies.xlsx"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pen | 3"));
}

#[test]
fn generate_doc_rejects_unknown_length() {
    let dir = TempDir::new().unwrap();
    office(&dir)
        .args(["generate", "doc", "anything", "--length", "epic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown document length"));
}

// ---------------------------------------------------------------------------
// Interactive menu
// ---------------------------------------------------------------------------

#[test]
fn menu_exits_on_request() {
    let dir = TempDir::new().unwrap();
    office(&dir)
        .arg("menu")
        .write_stdin("7\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bye!"));
}

#[test]
fn menu_creates_spreadsheet_by_hand() {
    let dir = TempDir::new().unwrap();
    office(&dir)
        .arg("menu")
        .write_stdin("1\ninventory\nItem, Qty\nPen, 3\n\nInk, 1\ndone\nn\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created inventory.xlsx (2 data rows)"));

    office(&dir)
        .args(["table", "read", "inventory.xlsx"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ink | 1"));
}
