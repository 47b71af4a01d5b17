// ABOUTME: Shapes free-form model replies into tables and paragraphs.
// ABOUTME: Tolerates markdown fences and the Portuguese key names older prompts used.

use serde::Deserialize;

use super::{CellValue, Table};
use crate::error::ExtractError;

const PREVIEW_CHARS: usize = 200;

#[derive(Deserialize)]
struct RawTable {
    #[serde(default, alias = "cabecalhos")]
    headers: Vec<CellValue>,
    #[serde(default, alias = "dados")]
    rows: Vec<Vec<CellValue>>,
}

/// Drop a surrounding markdown code fence and its `json` language tag.
fn strip_fence(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let inner = rest.split("```").next().unwrap_or(rest);
    inner.strip_prefix("json").unwrap_or(inner).trim()
}

/// Parse a `{"headers": [...], "rows": [[...]]}` reply into a [`Table`].
///
/// Missing keys give an empty table part. Header cells that are not text
/// are rendered to strings.
pub fn extract_table(text: &str) -> Result<Table, ExtractError> {
    let json = strip_fence(text);
    let raw: RawTable = serde_json::from_str(json).map_err(|source| ExtractError::InvalidJson {
        source,
        preview: preview(text.trim(), PREVIEW_CHARS).to_string(),
    })?;

    Ok(Table {
        headers: raw.headers.iter().map(CellValue::to_string).collect(),
        rows: raw.rows,
    })
}

/// Remove markdown bold and italic markers.
pub fn strip_emphasis(text: &str) -> String {
    text.replace("**", "").replace('*', "")
}

/// Trimmed, non-empty lines of `text`.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// The first `n` characters of `text`.
pub fn preview(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
