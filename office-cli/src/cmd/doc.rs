// ABOUTME: Document subcommands - create, read and append .docx files.
// ABOUTME: Thin wrappers over the office document backend.

use anyhow::Context;
use clap::Subcommand;
use std::path::{Path, PathBuf};

use office_agent::office;

#[derive(Subcommand)]
pub enum DocSubcommand {
    /// Create a document; each argument becomes a paragraph
    Create {
        path: PathBuf,
        #[arg(long, default_value = "Document")]
        title: String,
        paragraphs: Vec<String>,
    },
    /// Print the non-empty paragraphs of a document
    Read { path: PathBuf },
    /// Append one paragraph to a document
    Append {
        path: PathBuf,
        #[arg(required = true)]
        text: Vec<String>,
    },
}

pub fn run(subcmd: DocSubcommand) -> anyhow::Result<()> {
    match subcmd {
        DocSubcommand::Create {
            path,
            title,
            paragraphs,
        } => create(&path, &title, paragraphs),
        DocSubcommand::Read { path } => read(&path),
        DocSubcommand::Append { path, text } => append(&path, &text.join(" ")),
    }
}

fn create(path: &Path, title: &str, paragraphs: Vec<String>) -> anyhow::Result<()> {
    let count = paragraphs.len();
    let written = office::create_document(path, title, paragraphs)
        .with_context(|| format!("failed to create {}", path.display()))?;
    println!("Created {} ({count} paragraphs)", written.display());
    Ok(())
}

fn read(path: &Path) -> anyhow::Result<()> {
    let paragraphs = office::read_document(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    for paragraph in &paragraphs {
        println!("{paragraph}");
    }
    println!("({} paragraphs)", paragraphs.len());
    Ok(())
}

fn append(path: &Path, text: &str) -> anyhow::Result<()> {
    office::append_paragraph(path, text)
        .with_context(|| format!("failed to append to {}", path.display()))?;
    println!("Appended to {}", path.display());
    Ok(())
}
