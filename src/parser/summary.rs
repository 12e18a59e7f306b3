//! Summary Sheet Extraction
//!
//! 月次サマリーシート（1行 = 1住戸）からレコードを抽出します。

use chrono::Month;

use super::headers::HeaderResolver;
use super::months::month_code;
use super::sheet::SheetView;
use super::SheetExtraction;
use crate::api::SheetType;
use crate::builder::ExtractionConfig;
use crate::error::SkipReason;
use crate::types::RentalEntry;

/// サマリーシートからレコードを抽出する
///
/// # 引数
///
/// * `source` - 正規化済みのシート名
/// * `month` - シート名から判定した月
/// * `sheet` - シート
/// * `config` - 抽出設定
///
/// # 戻り値
///
/// * `Ok(SheetExtraction)` - 見出し行の後のすべての行のうち、住戸番号が空でないもの
/// * `Err(SkipReason::MissingHeader)` - 必須の列見出しが見つからない場合（部分的な抽出は行わない）
pub(crate) fn extract_summary(
    source: &str,
    month: Month,
    sheet: &SheetView,
    config: &ExtractionConfig,
) -> Result<SheetExtraction, SkipReason> {
    let header_row = config.summary_header_row;
    let headers: Vec<String> = sheet
        .row_texts(header_row)
        .into_iter()
        .map(|h| h.to_lowercase())
        .collect();

    let columns = HeaderResolver::new(&config.header_candidates).resolve(&headers)?;
    let month = month_code(month);

    let mut entries = Vec::new();
    for row in (header_row + 1)..=sheet.row_count() {
        let unit = sheet.text(row, columns.unit);
        if unit.is_empty() {
            continue;
        }

        entries.push(RentalEntry {
            source: source.to_string(),
            sheet_type: SheetType::Summary,
            unit,
            tenant: None,
            month: month.clone(),
            expected_rent: sheet.cell(row, columns.rent).to_amount(),
            amount_paid: sheet.cell(row, columns.paid).to_amount(),
            balance: sheet.cell(row, columns.balance).to_amount(),
            water: None,
        });
    }

    Ok(SheetExtraction {
        entries,
        skipped_groups: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ColumnRole;
    use calamine::Data;

    fn s(text: &str) -> Data {
        Data::String(text.to_string())
    }

    fn n(value: f64) -> Data {
        Data::Float(value)
    }

    fn jan_sheet() -> SheetView {
        SheetView::from_rows(vec![
            vec![s("REHOBOTH APARTMENTS")],
            vec![s("January 2024")],
            vec![s("House No"), s("Rent"), s("Paid"), s("Balance")],
            vec![s("A1"), n(5000.0), n(5000.0), n(0.0)],
            vec![s("A2"), n(5000.0), n(0.0), n(5000.0)],
            vec![s(" A3 "), n(5000.0), s("2,500"), n(2500.0)],
            vec![s("A4"), n(5000.0), n(5000.0), n(0.0)],
        ])
    }

    #[test]
    fn test_extracts_every_row_with_unit() {
        let config = ExtractionConfig::default();
        let result = extract_summary("JAN SUMMARY", Month::January, &jan_sheet(), &config).unwrap();

        let units: Vec<&str> = result.entries.iter().map(|e| e.unit.as_str()).collect();
        assert_eq!(units, vec!["A1", "A2", "A3", "A4"]);

        let paid: Vec<f64> = result.entries.iter().map(|e| e.amount_paid).collect();
        assert_eq!(paid, vec![5000.0, 0.0, 2500.0, 5000.0]);

        assert!(result
            .entries
            .iter()
            .all(|e| e.month == "JAN" && e.sheet_type == SheetType::Summary));
    }

    #[test]
    fn test_rows_without_unit_are_dropped() {
        let sheet = SheetView::from_rows(vec![
            vec![],
            vec![],
            vec![s("HOUSE"), s("RENT"), s("PAID"), s("BALANCE")],
            vec![s(""), n(5000.0), n(5000.0), n(0.0)],
            vec![s("C1"), n(1.0), n(1.0), n(0.0)],
            vec![Data::Empty, n(5000.0)],
        ]);
        let config = ExtractionConfig::default();
        let result = extract_summary("FEB", Month::February, &sheet, &config).unwrap();

        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.entries[0].month, "FEB");
    }

    #[test]
    fn test_unparseable_amounts_become_zero() {
        let sheet = SheetView::from_rows(vec![
            vec![],
            vec![],
            vec![s("House"), s("Rent"), s("Paid"), s("Balance")],
            vec![s("B1"), s("five thousand"), Data::Empty, s("-250")],
            vec![s("B2"), Data::Bool(true), s("n/a"), s("")],
        ]);
        let config = ExtractionConfig::default();
        let result = extract_summary("MAR", Month::March, &sheet, &config).unwrap();

        assert_eq!(result.entries[0].expected_rent, 0.0);
        assert_eq!(result.entries[0].amount_paid, 0.0);
        assert_eq!(result.entries[0].balance, -250.0);
        assert_eq!(result.entries[1].expected_rent, 0.0);
        assert_eq!(result.entries[1].balance, 0.0);
    }

    #[test]
    fn test_numeric_unit_is_stringified() {
        let sheet = SheetView::from_rows(vec![
            vec![],
            vec![],
            vec![s("House"), s("Rent"), s("Paid"), s("Balance")],
            vec![n(101.0), n(4000.0), n(4000.0), n(0.0)],
        ]);
        let config = ExtractionConfig::default();
        let result = extract_summary("APR", Month::April, &sheet, &config).unwrap();
        assert_eq!(result.entries[0].unit, "101");
    }

    #[test]
    fn test_missing_header_skips_whole_sheet() {
        let sheet = SheetView::from_rows(vec![
            vec![],
            vec![],
            vec![s("House"), s("Rent"), s("Balance")],
            vec![s("A1"), n(5000.0), n(0.0)],
        ]);
        let config = ExtractionConfig::default();
        let result = extract_summary("JAN", Month::January, &sheet, &config);

        assert!(matches!(
            result,
            Err(SkipReason::MissingHeader {
                role: ColumnRole::Paid
            })
        ));
    }
}
