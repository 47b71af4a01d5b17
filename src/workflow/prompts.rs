// ABOUTME: Prompt text for every AI-backed workflow.
// ABOUTME: Rows are embedded as JSON so the model sees exact cell values.

use serde_json::json;

use crate::office::CellValue;

use super::DocumentLength;

fn sample(rows: &[Vec<CellValue>], limit: usize) -> &[Vec<CellValue>] {
    &rows[..rows.len().min(limit)]
}

pub(crate) fn analyze_rows(rows: &[Vec<CellValue>]) -> String {
    format!(
        "Analyze the following spreadsheet data:\n\n{}\n\n\
         Provide:\n\
         1. A summary of the data\n\
         2. Key insights\n\
         3. Suggestions for further analysis",
        json!(sample(rows, 10))
    )
}

pub(crate) fn executive_report(rows: &[Vec<CellValue>]) -> String {
    format!(
        "Write an executive report based on this data: {}",
        json!(sample(rows, 5))
    )
}

pub(crate) fn generate_table(description: &str, rows: usize) -> String {
    format!(
        r#"Create data for a spreadsheet based on this description:

"{description}"

Generate EXACTLY {rows} rows of data.

Return ONLY valid JSON in this format (no markdown, no explanations):
{{
    "headers": ["Column1", "Column2", "Column3"],
    "rows": [
        ["value1", "value2", "value3"],
        ["value1", "value2", "value3"]
    ]
}}

IMPORTANT:
- Generate realistic and varied data
- Use values that fit each column
- EXACTLY {rows} entries in "rows"
- Return ONLY the JSON, with no extra text"#
    )
}

pub(crate) fn generate_document(description: &str, length: DocumentLength) -> String {
    format!(
        r#"Write a {length} about:

"{description}"

IMPORTANT:
- Write in a professional, well-structured way
- Split the text into clear paragraphs
- Use formal but accessible language
- Be objective and informative
- Do NOT use markdown, bold or italics
- Do NOT use titles or subtitles
- Plain text paragraphs only

Return ONLY the document content, with no introduction or explanation."#,
        length = length.describe()
    )
}

pub(crate) fn full_report(rows: &[Vec<CellValue>]) -> String {
    let sample = sample(rows, 20);
    format!(
        "Analyze the data in this spreadsheet and write a complete executive report.\n\n\
         Data (first {} rows):\n{:#}\n\n\
         Write a report with:\n\
         1. EXECUTIVE SUMMARY: overview of the data\n\
         2. DETAILED ANALYSIS: main insights and patterns\n\
         3. STATISTICS: important numbers and metrics\n\
         4. CONCLUSIONS: main findings\n\
         5. RECOMMENDATIONS: suggestions based on the data\n\n\
         Write professionally, objectively and with clear structure.\n\
         Use a separate paragraph for each section.\n\
         Do NOT use markdown or special formatting.",
        sample.len(),
        json!(sample)
    )
}
