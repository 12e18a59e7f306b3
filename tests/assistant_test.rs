//! Assistant Tests
//!
//! アップロードから質問応答までの流れを、クロージャのモデルで検証します。

use rust_xlsxwriter::*;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use rentsheet::{Assistant, ChatRequest, Extractor, RentsheetError, Role, UploadOutcome};

fn write_summary(dir: &Path, name: &str, units: &[&str]) -> PathBuf {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("JAN SUMMARY").unwrap();
    sheet.write_string(2, 0, "House").unwrap();
    sheet.write_string(2, 1, "Rent").unwrap();
    sheet.write_string(2, 2, "Paid").unwrap();
    sheet.write_string(2, 3, "Balance").unwrap();
    for (i, unit) in units.iter().enumerate() {
        let row = 3 + i as u32;
        sheet.write_string(row, 0, *unit).unwrap();
        sheet.write_number(row, 1, 5000.0).unwrap();
        sheet.write_number(row, 2, 2500.0).unwrap();
        sheet.write_number(row, 3, 2500.0).unwrap();
    }
    // 行数を最低限確保する
    sheet.write_string(4 + units.len() as u32, 5, "end").unwrap();

    let path = dir.join(name);
    workbook.save(&path).unwrap();
    path
}

#[test]
fn test_upload_then_question() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_summary(dir.path(), "rent.xlsx", &["A1", "A2"]);

    let seen = RefCell::new(Vec::new());
    let model = |request: &ChatRequest| -> Result<String, RentsheetError> {
        seen.borrow_mut().push(request.clone());
        Ok("A1 and A2 each owe 2500.".to_string())
    };
    let assistant = Assistant::new(Extractor::default(), &model);

    let replies = assistant.handle_upload(&path);
    assert_eq!(replies.len(), 1);
    assert!(replies[0].starts_with("✅ Parsed 2 records."));
    assert!(replies[0].contains("A1 (JAN SUMMARY, JAN) → Rent: 5000, Paid: 2500, Bal: 2500"));

    let replies = assistant.handle_question("Who hasn't paid?");
    assert_eq!(replies, vec!["💬 A1 and A2 each owe 2500.".to_string()]);

    let requests = seen.borrow();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].messages[0].role, Role::System);
    assert!(requests[0].messages[0]
        .content
        .contains("Source: JAN SUMMARY, Unit: A2, Month: JAN, Rent: 5000, Paid: 2500, Balance: 2500"));
    assert_eq!(requests[0].messages[1].content, "Who hasn't paid?");
}

#[test]
fn test_new_upload_replaces_previous() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_summary(dir.path(), "first.xlsx", &["A1", "A2", "A3"]);
    let second = write_summary(dir.path(), "second.xlsx", &["B1"]);

    let model = |_: &ChatRequest| -> Result<String, RentsheetError> { Ok("ok".to_string()) };
    let assistant = Assistant::new(Extractor::default(), model);

    assert!(matches!(assistant.upload(&first), UploadOutcome::Stored(_)));
    assert_eq!(assistant.slot().len(), 3);

    assert!(matches!(assistant.upload(&second), UploadOutcome::Stored(_)));
    assert_eq!(assistant.slot().len(), 1);
    assert_eq!(assistant.slot().snapshot()[0].unit, "B1");
}

#[test]
fn test_empty_upload_keeps_previous_data() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_summary(dir.path(), "good.xlsx", &["A1"]);

    let empty = dir.path().join("empty.xlsx");
    let mut workbook = Workbook::new();
    workbook.add_worksheet().write_string(0, 0, "nothing here").unwrap();
    workbook.save(&empty).unwrap();

    let model = |_: &ChatRequest| -> Result<String, RentsheetError> { Ok("ok".to_string()) };
    let assistant = Assistant::new(Extractor::default(), model);

    assistant.upload(&good);
    let replies = assistant.handle_upload(&empty);

    assert_eq!(
        replies,
        vec!["⚠️ No valid rental entries found in the Excel file.".to_string()]
    );
    assert_eq!(assistant.slot().len(), 1);
}

#[test]
fn test_corrupt_upload_reports_parse_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, b"this is not a spreadsheet").unwrap();

    let model = |_: &ChatRequest| -> Result<String, RentsheetError> { Ok("ok".to_string()) };
    let assistant = Assistant::new(Extractor::default(), model);

    assert_eq!(
        assistant.handle_upload(&path),
        vec!["❌ Failed to parse the Excel file.".to_string()]
    );
    assert!(assistant.slot().is_empty());
}

#[test]
fn test_context_is_limited_to_first_records() {
    let dir = tempfile::tempdir().unwrap();
    let units: Vec<String> = (1..=60).map(|i| format!("U{}", i)).collect();
    let unit_refs: Vec<&str> = units.iter().map(String::as_str).collect();
    let path = write_summary(dir.path(), "large.xlsx", &unit_refs);

    let model = |request: &ChatRequest| -> Result<String, RentsheetError> {
        let context_lines = request.messages[0].content.lines().count() - 1;
        Ok(format!("{} records in context", context_lines))
    };
    let assistant = Assistant::new(Extractor::default(), model);

    assert!(matches!(assistant.upload(&path), UploadOutcome::Stored(_)));
    assert_eq!(assistant.slot().len(), 60);
    assert_eq!(
        assistant.handle_question("How many?"),
        vec!["💬 50 records in context".to_string()]
    );
}
