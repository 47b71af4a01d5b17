// ABOUTME: Interactive menu - manual entry, AI generation, reports and file opening.
// ABOUTME: Errors are reported per action and the menu keeps running.

use anyhow::Context;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::Path;

use office_agent::config::AgentConfig;
use office_agent::office::{self, preview, CellValue};
use office_agent::shell::{self, OPENABLE_EXTENSIONS};
use office_agent::workflow::{DocumentLength, OfficeAgent};

const DEFAULT_AI_ROWS: usize = 10;
const PREVIEW_CHARS: usize = 200;
const EMPTY_DOCUMENT: &str = "This document is empty.";

/// Read one trimmed line. `None` on Ctrl-C or end of input.
fn prompt(rl: &mut DefaultEditor, text: &str) -> anyhow::Result<Option<String>> {
    match rl.readline(text) {
        Ok(line) => {
            let line = line.trim().to_string();
            if !line.is_empty() {
                let _ = rl.add_history_entry(&line);
            }
            Ok(Some(line))
        }
        Err(ReadlineError::Eof | ReadlineError::Interrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Menu state: the config plus an agent built on first use.
struct Session {
    config: AgentConfig,
    agent: Option<OfficeAgent>,
}

impl Session {
    /// The agent, asking for an API key first if none is configured.
    fn agent(&mut self, rl: &mut DefaultEditor) -> anyhow::Result<Option<&OfficeAgent>> {
        if self.agent.is_none() {
            if !self.config.has_api_key() {
                println!("\nNo API key configured (GOOGLE_API_KEY).");
                let Some(key) = prompt(rl, "Paste your API key (blank to cancel): ")? else {
                    return Ok(None);
                };
                if key.is_empty() {
                    println!("Cancelled.");
                    return Ok(None);
                }
                self.config = self.config.clone().with_api_key(key);
            }
            self.agent = Some(OfficeAgent::from_config(&self.config).context("invalid agent configuration")?);
        }
        Ok(self.agent.as_ref())
    }
}

fn offer_open(rl: &mut DefaultEditor, path: &Path) -> anyhow::Result<()> {
    if let Some(answer) = prompt(rl, "Open the file now? (y/n): ")? {
        if shell::is_yes(&answer) {
            shell::open_file(path)?;
        }
    }
    Ok(())
}

fn manual_table(rl: &mut DefaultEditor) -> anyhow::Result<()> {
    println!("\n== New spreadsheet ==");
    let Some(name) = prompt(rl, "File name (without extension): ")? else {
        return Ok(());
    };
    let path = shell::file_name_or(&name, "spreadsheet", "xlsx");

    println!("Column names, comma-separated (e.g. Name, Email, Phone, Age)");
    let Some(line) = prompt(rl, "Headers: ")? else {
        return Ok(());
    };
    let headers = shell::parse_headers(&line);

    println!("Enter {} comma-separated values per row; type 'done' to finish.", headers.len());
    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    loop {
        let Some(line) = prompt(rl, &format!("Row {}: ", rows.len() + 1))? else {
            break;
        };
        if shell::is_done(&line) {
            break;
        }
        if line.is_empty() {
            println!("Empty row skipped");
            continue;
        }
        rows.push(
            shell::parse_row(&line, headers.len())
                .iter()
                .map(|v| CellValue::infer(v))
                .collect(),
        );
    }
    if rows.is_empty() {
        println!("No data entered; the spreadsheet will only have headers.");
    }

    office::create_table(&path, &rows, Some(headers.as_slice()))?;
    println!("Created {} ({} data rows)", path.display(), rows.len());
    offer_open(rl, &path)
}

fn manual_document(rl: &mut DefaultEditor) -> anyhow::Result<()> {
    println!("\n== New document ==");
    let Some(name) = prompt(rl, "File name (without extension): ")? else {
        return Ok(());
    };
    let path = shell::file_name_or(&name, "document", "docx");

    let Some(title) = prompt(rl, "Title: ")? else {
        return Ok(());
    };
    let title = if title.is_empty() { "Document".to_string() } else { title };

    println!("One paragraph per line; empty lines add spacing; type 'done' to finish.");
    let mut paragraphs = Vec::new();
    loop {
        let Some(line) = prompt(rl, "> ")? else {
            break;
        };
        if shell::is_done(&line) {
            break;
        }
        paragraphs.push(line);
    }
    if paragraphs.iter().all(|p| p.is_empty()) {
        println!("No content entered.");
        paragraphs = vec![EMPTY_DOCUMENT.to_string()];
    }

    let count = paragraphs.iter().filter(|p| !p.is_empty()).count();
    office::create_document(&path, &title, paragraphs)?;
    println!("Created {} ({count} paragraphs)", path.display());
    offer_open(rl, &path)
}

async fn ai_table(rl: &mut DefaultEditor, session: &mut Session) -> anyhow::Result<()> {
    println!("\n== Generate a spreadsheet with AI ==");
    let Some(agent) = session.agent(rl)? else {
        return Ok(());
    };
    let Some(name) = prompt(rl, "File name (without extension): ")? else {
        return Ok(());
    };
    let path = shell::file_name_or(&name, "ai_spreadsheet", "xlsx");

    println!("Describe the spreadsheet, e.g. \"10 products with prices and categories\"");
    let Some(description) = prompt(rl, "Description: ")? else {
        return Ok(());
    };
    if description.is_empty() {
        println!("Empty description. Cancelled.");
        return Ok(());
    }
    let Some(count) = prompt(rl, &format!("Number of rows (default {DEFAULT_AI_ROWS}): "))? else {
        return Ok(());
    };
    let count = count.parse().unwrap_or(DEFAULT_AI_ROWS);

    println!("Generating...");
    let table = agent.generate_table(&description, count).await?;
    println!("Columns: {}", table.headers.join(", "));
    if let Some(first) = table.rows.first() {
        let cells: Vec<String> = first.iter().map(CellValue::to_string).collect();
        println!("First row: {}", cells.join(" | "));
    }
    println!("{} rows", table.rows.len());

    let Some(answer) = prompt(rl, "Create the spreadsheet? (y/n): ")? else {
        return Ok(());
    };
    if !shell::is_yes(&answer) {
        println!("Cancelled.");
        return Ok(());
    }
    office::create_table(&path, &table.rows, Some(table.headers.as_slice()))?;
    println!("Created {}", path.display());
    offer_open(rl, &path)
}

async fn ai_document(rl: &mut DefaultEditor, session: &mut Session) -> anyhow::Result<()> {
    println!("\n== Generate a document with AI ==");
    let Some(agent) = session.agent(rl)? else {
        return Ok(());
    };
    let Some(name) = prompt(rl, "File name (without extension): ")? else {
        return Ok(());
    };
    let path = shell::file_name_or(&name, "ai_document", "docx");

    let Some(title) = prompt(rl, "Title: ")? else {
        return Ok(());
    };
    let title = if title.is_empty() { "AI Generated Document".to_string() } else { title };

    println!("Describe the document, e.g. \"meeting minutes for project X\"");
    let Some(description) = prompt(rl, "Description: ")? else {
        return Ok(());
    };
    if description.is_empty() {
        println!("Empty description. Cancelled.");
        return Ok(());
    }

    println!("Length: 1. short (1-2 paragraphs)  2. medium (3-5)  3. long (6-8)");
    let Some(choice) = prompt(rl, "Option (default 2): ")? else {
        return Ok(());
    };
    let length = choice.parse().unwrap_or(DocumentLength::Medium);

    println!("Generating...");
    let paragraphs = agent.generate_document(&description, length).await?;
    let text = paragraphs.join("\n");
    println!("{} paragraphs, {} characters", paragraphs.len(), text.chars().count());
    println!("{}...", preview(&text, PREVIEW_CHARS));

    let Some(answer) = prompt(rl, "Create the document? (y/n): ")? else {
        return Ok(());
    };
    if !shell::is_yes(&answer) {
        println!("Cancelled.");
        return Ok(());
    }
    office::create_document(&path, &title, paragraphs)?;
    println!("Created {}", path.display());
    offer_open(rl, &path)
}

async fn analyze_report(rl: &mut DefaultEditor, session: &mut Session) -> anyhow::Result<()> {
    println!("\n== Analyze a spreadsheet and write a report ==");
    let Some(agent) = session.agent(rl)? else {
        return Ok(());
    };

    let files = shell::list_files(".", &["xlsx"])?;
    if files.is_empty() {
        println!("No spreadsheets in the current directory.");
        return Ok(());
    }
    for (i, file) in files.iter().enumerate() {
        println!("  {}. {file}", i + 1);
    }

    let Some(choice) = prompt(rl, "Spreadsheet (number or name): ")? else {
        return Ok(());
    };
    let source = shell::resolve_choice(&choice, &files, "xlsx")?;
    if !Path::new(&source).exists() {
        println!("File '{source}' not found.");
        return Ok(());
    }

    println!("Analyzing {source}...");
    let report = agent.analyze_and_report(&source).await?;
    println!("Source: {source}");
    println!("Report: {}", report.display());
    offer_open(rl, &report)
}

fn open_files(rl: &mut DefaultEditor) -> anyhow::Result<()> {
    loop {
        println!("\n== Open a file ==");
        let files = shell::list_files(".", &OPENABLE_EXTENSIONS)?;
        for (i, file) in files.iter().enumerate() {
            println!("  {}. {file}", i + 1);
        }
        println!("Enter a file name or number, or 'exit' to go back.");

        let Some(input) = prompt(rl, "> ")? else {
            return Ok(());
        };
        if shell::is_exit(&input) {
            return Ok(());
        }

        let opened = shell::resolve_choice(&input, &files, "")
            .and_then(|file| shell::open_file(&file).map(|()| file));
        match opened {
            Ok(file) => println!("Opening {file}"),
            Err(e) => println!("{e}"),
        }
    }
}

fn print_menu() {
    println!("\n== Office agent ==");
    println!("  1. Create spreadsheet (manual)");
    println!("  2. Create document (manual)");
    println!("  3. Generate spreadsheet with AI");
    println!("  4. Generate document with AI");
    println!("  5. Analyze spreadsheet and write report");
    println!("  6. Open a file");
    println!("  7. Exit");
}

pub async fn run(config: AgentConfig) -> anyhow::Result<()> {
    let mut rl = DefaultEditor::new()?;
    let mut session = Session {
        config,
        agent: None,
    };

    loop {
        print_menu();
        let Some(choice) = prompt(&mut rl, "Option: ")? else {
            break;
        };
        if shell::is_exit(&choice) {
            break;
        }

        let result = match choice.as_str() {
            "1" => manual_table(&mut rl),
            "2" => manual_document(&mut rl),
            "3" => ai_table(&mut rl, &mut session).await,
            "4" => ai_document(&mut rl, &mut session).await,
            "5" => analyze_report(&mut rl, &mut session).await,
            "6" => open_files(&mut rl),
            "7" => break,
            _ => {
                println!("Invalid option, try again.");
                continue;
            }
        };

        if let Err(e) = result {
            eprintln!("error: {e:#}");
        }
    }

    println!("Bye!");
    Ok(())
}
