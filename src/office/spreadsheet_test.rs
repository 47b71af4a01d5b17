// ABOUTME: Tests for the spreadsheet backend.
// ABOUTME: Writes real .xlsx files into temp dirs and reads them back.

use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

use super::spreadsheet::{create_table, read_table, update_cell};
use super::CellValue;
use crate::error::DocumentError;

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
            CellValue::Number(2300.5),
            "Pending".into(),
        ],
    ]
}

fn headers() -> Vec<String> {
    ["ID", "Product", "Value", "Status"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[test]
fn test_create_then_read_with_headers() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sales.xlsx");

    let written = create_table(&path, &sales_rows(), Some(headers().as_slice())).unwrap();
    assert_eq!(written, path);

    let rows = read_table(&path, None).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0][0], CellValue::from("ID"));
    assert_eq!(rows[0][3], CellValue::from("Status"));
    // Integers come back as spreadsheet numbers.
    assert_eq!(rows[1][0], CellValue::Number(1.0));
    assert_eq!(rows[1][1], CellValue::from("Product A"));
    assert_eq!(rows[2][2], CellValue::Number(2300.5));
}

#[test]
fn test_create_without_headers() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plain.xlsx");

    create_table(&path, &sales_rows(), None).unwrap();
    let rows = read_table(&path, None).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][1], CellValue::from("Product A"));
}

#[test]
fn test_headers_only_table() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.xlsx");

    create_table(&path, &[], Some(headers().as_slice())).unwrap();
    let rows = read_table(&path, None).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].len(), 4);
}

#[test]
fn test_read_named_sheet() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("named.xlsx");
    create_table(&path, &sales_rows(), None).unwrap();

    assert!(read_table(&path, Some("Sheet1")).is_ok());
    let err = read_table(&path, Some("Missing")).unwrap_err();
    assert!(matches!(err, DocumentError::SheetNotFound(name) if name == "Missing"));
}

#[test]
fn test_read_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let result = read_table(dir.path().join("nope.xlsx"), None);
    assert!(result.is_err());
}

#[test]
fn test_update_cell_inside_table() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("update.xlsx");
    create_table(&path, &sales_rows(), Some(headers().as_slice())).unwrap();

    update_cell(&path, 2, 4, CellValue::from("Shipped")).unwrap();

    let rows = read_table(&path, None).unwrap();
    assert_eq!(rows[1][3], CellValue::from("Shipped"));
    assert_eq!(rows[0][0], CellValue::from("ID"));
    assert_eq!(rows[2][1], CellValue::from("Product B"));
}

#[test]
fn test_update_cell_grows_table() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("grow.xlsx");
    create_table(&path, &sales_rows(), None).unwrap();

    update_cell(&path, 5, 6, CellValue::Number(9.5)).unwrap();

    let rows = read_table(&path, None).unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[4][5], CellValue::Number(9.5));
    assert_eq!(rows[3].iter().filter(|v| !v.is_empty()).count(), 0);
}

#[test]
fn test_update_cell_rejects_zero_index() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("zero.xlsx");
    create_table(&path, &sales_rows(), None).unwrap();

    let err = update_cell(&path, 0, 1, CellValue::Empty).unwrap_err();
    assert!(matches!(err, DocumentError::InvalidCell { row: 0, col: 1 }));
}

#[test]
fn test_update_cell_keeps_other_sheets() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("two_sheets.xlsx");
    let mut workbook = Workbook::new();
    let data = workbook.add_worksheet();
    data.set_name("Data").unwrap();
    data.write_string(0, 0, "a").unwrap();
    let notes = workbook.add_worksheet();
    notes.set_name("Notes").unwrap();
    notes.write_string(0, 0, "keep me").unwrap();
    notes.write_number(1, 1, 7.0).unwrap();
    workbook.save(&path).unwrap();

    update_cell(&path, 1, 1, CellValue::from("b")).unwrap();

    let data = read_table(&path, Some("Data")).unwrap();
    assert_eq!(data[0][0], CellValue::from("b"));
    let notes = read_table(&path, Some("Notes")).unwrap();
    assert_eq!(notes[0][0], CellValue::from("keep me"));
    assert_eq!(notes[1][1], CellValue::Number(7.0));
    // The first sheet stays first.
    assert_eq!(read_table(&path, None).unwrap()[0][0], CellValue::from("b"));
}

#[test]
fn test_update_cell_rejects_out_of_range_cells() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("huge.xlsx");
    create_table(&path, &sales_rows(), None).unwrap();

    let err = update_cell(&path, 20_000_000, 1, CellValue::Int(2)).unwrap_err();
    assert!(matches!(err, DocumentError::InvalidCell { row: 20_000_000, col: 1 }));
    let err = update_cell(&path, 1, 16_385, CellValue::Int(2)).unwrap_err();
    assert!(matches!(err, DocumentError::InvalidCell { row: 1, col: 16_385 }));

    // The last addressable cell is still accepted.
    update_cell(&path, 1, 16_384, CellValue::Int(2)).unwrap();
    assert_eq!(read_table(&path, None).unwrap()[0][16_383], CellValue::Number(2.0));
}
