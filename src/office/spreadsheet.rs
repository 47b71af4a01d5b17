// ABOUTME: Spreadsheet backend - create, read and update .xlsx tables.
// ABOUTME: Writes with rust_xlsxwriter, reads with calamine.

use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Range, Reader};
use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook, Worksheet};

use super::CellValue;
use crate::error::DocumentError;

const HEADER_FILL: u32 = 0x366092;
const COLUMN_PADDING: usize = 2;
/// Largest 1-based row and column an .xlsx sheet can address.
const MAX_ROWS: u32 = 1_048_576;
const MAX_COLS: u32 = 16_384;

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_align(FormatAlign::Center)
}

fn column_index(col: usize) -> Result<u16, DocumentError> {
    u16::try_from(col).map_err(|_| DocumentError::InvalidCell {
        row: 1,
        col: u32::try_from(col + 1).unwrap_or(u32::MAX),
    })
}

fn row_index(row: usize) -> Result<u32, DocumentError> {
    u32::try_from(row).map_err(|_| DocumentError::InvalidCell {
        row: u32::MAX,
        col: 1,
    })
}

fn write_value(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
) -> Result<(), DocumentError> {
    match value {
        CellValue::Empty => {}
        CellValue::Bool(b) => {
            sheet.write_boolean(row, col, *b)?;
        }
        CellValue::Int(i) => {
            sheet.write_number(row, col, *i as f64)?;
        }
        CellValue::Number(n) => {
            sheet.write_number(row, col, *n)?;
        }
        CellValue::Text(s) => {
            sheet.write_string(row, col, s)?;
        }
    }
    Ok(())
}

fn track_width(widths: &mut Vec<usize>, col: usize, len: usize) {
    if widths.len() <= col {
        widths.resize(col + 1, 0);
    }
    widths[col] = widths[col].max(len);
}

/// Write headers and rows into `sheet`, sizing columns to their content.
fn fill_sheet(
    sheet: &mut Worksheet,
    headers: Option<&[String]>,
    rows: &[Vec<CellValue>],
) -> Result<(), DocumentError> {
    let mut widths = Vec::new();
    let mut next_row = 0usize;

    if let Some(headers) = headers {
        let format = header_format();
        for (col, header) in headers.iter().enumerate() {
            sheet.write_string_with_format(0, column_index(col)?, header, &format)?;
            track_width(&mut widths, col, header.chars().count());
        }
        next_row = 1;
    }

    for row in rows {
        let row_num = row_index(next_row)?;
        for (col, value) in row.iter().enumerate() {
            write_value(sheet, row_num, column_index(col)?, value)?;
            track_width(&mut widths, col, value.to_string().chars().count());
        }
        next_row += 1;
    }

    for (col, width) in widths.iter().enumerate() {
        sheet.set_column_width(column_index(col)?, (width + COLUMN_PADDING) as f64)?;
    }
    Ok(())
}

/// Create a spreadsheet at `path` holding `rows`, with an optional styled header row.
///
/// Header cells are bold white on blue and centered. Every column is as
/// wide as its longest value plus two characters.
pub fn create_table(
    path: impl AsRef<Path>,
    rows: &[Vec<CellValue>],
    headers: Option<&[String]>,
) -> Result<PathBuf, DocumentError> {
    let path = path.as_ref();
    let mut workbook = Workbook::new();
    fill_sheet(workbook.add_worksheet(), headers, rows)?;
    workbook.save(path)?;

    tracing::info!(path = %path.display(), rows = rows.len(), "spreadsheet created");
    Ok(path.to_path_buf())
}

/// Expand a calamine range into rows anchored at A1.
fn range_to_rows(range: &Range<Data>) -> Vec<Vec<CellValue>> {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };

    let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); start_row as usize];
    for row in range.rows() {
        let mut values = vec![CellValue::Empty; start_col as usize];
        values.extend(row.iter().map(CellValue::from));
        rows.push(values);
    }
    rows
}

fn load_sheet(path: &Path, sheet: Option<&str>) -> Result<(String, Range<Data>), DocumentError> {
    let mut workbook = open_workbook_auto(path)?;
    let name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| DocumentError::SheetNotFound("(workbook has no sheets)".to_string()))?,
    };

    if !workbook.sheet_names().contains(&name) {
        return Err(DocumentError::SheetNotFound(name));
    }
    let range = workbook.worksheet_range(&name)?;
    Ok((name, range))
}

/// Read every row of `sheet` (or of the first sheet).
pub fn read_table(
    path: impl AsRef<Path>,
    sheet: Option<&str>,
) -> Result<Vec<Vec<CellValue>>, DocumentError> {
    let path = path.as_ref();
    let (name, range) = load_sheet(path, sheet)?;
    let rows = range_to_rows(&range);

    tracing::info!(path = %path.display(), sheet = %name, rows = rows.len(), "spreadsheet read");
    Ok(rows)
}

/// Set one cell of the first sheet. `row` and `col` start at 1.
///
/// Every sheet is rewritten from its values in the original order, so other
/// sheets survive but cell styling is not kept.
pub fn update_cell(
    path: impl AsRef<Path>,
    row: u32,
    col: u32,
    value: CellValue,
) -> Result<(), DocumentError> {
    if row == 0 || col == 0 || row > MAX_ROWS || col > MAX_COLS {
        return Err(DocumentError::InvalidCell { row, col });
    }
    let path = path.as_ref();
    let mut source = open_workbook_auto(path)?;
    let names: Vec<String> = source.sheet_names().to_vec();
    if names.is_empty() {
        return Err(DocumentError::SheetNotFound("(workbook has no sheets)".to_string()));
    }

    let mut workbook = Workbook::new();
    for (index, name) in names.iter().enumerate() {
        let mut rows = range_to_rows(&source.worksheet_range(name)?);
        if index == 0 {
            set_value(&mut rows, (row - 1) as usize, (col - 1) as usize, value.clone());
        }
        let sheet = workbook.add_worksheet();
        sheet.set_name(name)?;
        fill_sheet(sheet, None, &rows)?;
    }
    workbook.save(path)?;

    tracing::info!(path = %path.display(), row, col, value = %value, "spreadsheet cell updated");
    Ok(())
}

fn set_value(rows: &mut Vec<Vec<CellValue>>, r: usize, c: usize, value: CellValue) {
    if rows.len() <= r {
        rows.resize(r + 1, Vec::new());
    }
    if rows[r].len() <= c {
        rows[r].resize(c + 1, CellValue::Empty);
    }
    rows[r][c] = value;
}
