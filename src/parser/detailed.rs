//! Detailed Sheet Extraction
//!
//! 物件別の詳細シートからレコードを抽出します。
//!
//! 詳細シートは「横長」形式で、1行 = 1住戸、見出し行に月名（`JANUARY`など）が並び、
//! 月名セルの右隣から5列が1つの列グループを構成します。
//!
//! | 列 | 内容 |
//! | --- | --- |
//! | p+1 | 請求額（payable） |
//! | p+2 | 入金額（paid） |
//! | p+3 | 家賃（rent） |
//! | p+4 | 水道料金（water） |
//! | p+5 | 残高（balance） |
//!
//! これを「縦長」形式（1住戸 × 1か月 = 1レコード）に展開します。

use chrono::Month;

use super::months::{month_code, month_for_header};
use super::sheet::SheetView;
use super::SheetExtraction;
use crate::api::SheetType;
use crate::builder::ExtractionConfig;
use crate::types::{CellValue, RentalEntry};

/// 月グループの列数
const MONTH_GROUP_WIDTH: u32 = 5;

const PAID_OFFSET: usize = 1;
const RENT_OFFSET: usize = 2;
const WATER_OFFSET: usize = 3;
const BALANCE_OFFSET: usize = 4;

/// 見出し行から検出した月の列位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MonthColumn {
    month: Month,
    col: u32,
}

/// 見出し行を左から走査して月の列位置を検出する
///
/// 同じ月が複数回現れた場合は、最初に検出した順序を保ったまま後の列位置で上書きします。
fn locate_months(sheet: &SheetView, config: &ExtractionConfig) -> Vec<MonthColumn> {
    let mut located: Vec<MonthColumn> = Vec::new();

    for col in 1..=sheet.column_count() {
        let text = sheet.text(config.detailed_header_row, col).to_uppercase();
        let Some(month) = month_for_header(&text, &config.months) else {
            continue;
        };

        match located.iter_mut().find(|m| m.month == month) {
            Some(existing) => existing.col = col,
            None => located.push(MonthColumn { month, col }),
        }
    }

    located
}

/// 詳細シートからレコードを抽出する
///
/// 住戸番号が空の行は読み飛ばします。月グループのうち入金額・家賃のどちらも
/// 数値として読めないものはレコードを出力しません。エラー値（`#REF!`など）を含む
/// 月グループは警告を出して読み飛ばし、同じ行の他の月は処理を続けます。
pub(crate) fn extract_detailed(
    source: &str,
    sheet: &SheetView,
    config: &ExtractionConfig,
) -> SheetExtraction {
    let months = locate_months(sheet, config);
    let mut result = SheetExtraction::default();

    if months.is_empty() {
        log::warn!(
            "No month headers found in row {} of sheet '{}'",
            config.detailed_header_row,
            source
        );
        return result;
    }

    for row in (config.detailed_header_row + 1)..=sheet.row_count() {
        let unit = sheet.text(row, config.unit_column);
        if unit.is_empty() {
            continue;
        }

        let tenant = Some(sheet.text(row, config.tenant_column)).filter(|t| !t.is_empty());

        for located in &months {
            let group: Vec<CellValue> = (1..=MONTH_GROUP_WIDTH)
                .map(|offset| sheet.cell(row, located.col + offset))
                .collect();

            if group.iter().any(CellValue::is_error) {
                log::warn!(
                    "Skipping malformed {} group for unit '{}' in sheet '{}' (row {})",
                    month_code(located.month),
                    unit,
                    source,
                    row
                );
                result.skipped_groups += 1;
                continue;
            }

            let paid = group[PAID_OFFSET].parse_number();
            let rent = group[RENT_OFFSET].parse_number();
            if paid.is_none() && rent.is_none() {
                continue;
            }

            result.entries.push(RentalEntry {
                source: source.to_string(),
                sheet_type: SheetType::Detailed,
                unit: unit.clone(),
                tenant: tenant.clone(),
                month: month_code(located.month),
                expected_rent: rent.unwrap_or(0.0),
                amount_paid: paid.unwrap_or(0.0),
                balance: group[BALANCE_OFFSET].to_amount(),
                water: Some(group[WATER_OFFSET].to_amount()),
            });
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{CellErrorType, Data};

    fn s(text: &str) -> Data {
        Data::String(text.to_string())
    }

    fn n(value: f64) -> Data {
        Data::Float(value)
    }

    /// 1始まりの列番号でセルを置いた行を作る
    fn row(cells: &[(usize, Data)]) -> Vec<Data> {
        let width = cells.iter().map(|(c, _)| *c).max().unwrap_or(0);
        let mut out = vec![Data::Empty; width];
        for (col, value) in cells {
            out[col - 1] = value.clone();
        }
        out
    }

    fn detailed_sheet(data_rows: Vec<Vec<Data>>) -> SheetView {
        let mut rows = vec![
            row(&[(1, s("REHOBOTH"))]),
            vec![],
            vec![],
            vec![],
            vec![],
            row(&[
                (3, s("HSE NO")),
                (4, s("TENANT")),
                (10, s("JANUARY")),
                (16, s(" february ")),
                (21, Data::Empty),
            ]),
        ];
        rows.extend(data_rows);
        SheetView::from_rows(rows)
    }

    #[test]
    fn test_locate_months_in_header_order() {
        let sheet = detailed_sheet(vec![]);
        let config = ExtractionConfig::default();

        let months = locate_months(&sheet, &config);
        assert_eq!(
            months,
            vec![
                MonthColumn {
                    month: Month::January,
                    col: 10
                },
                MonthColumn {
                    month: Month::February,
                    col: 16
                },
            ]
        );
    }

    #[test]
    fn test_single_month_group() {
        let sheet = detailed_sheet(vec![
            vec![],
            row(&[
                (3, s("B2")),
                (11, n(1000.0)),
                (12, n(1000.0)),
                (13, n(1000.0)),
                (14, n(50.0)),
                (15, n(0.0)),
            ]),
        ]);
        let config = ExtractionConfig::default();
        let result = extract_detailed("REHOBOTH", &sheet, &config);

        assert_eq!(result.entries.len(), 1);
        let entry = &result.entries[0];
        assert_eq!(entry.unit, "B2");
        assert_eq!(entry.month, "JAN");
        assert_eq!(entry.sheet_type, SheetType::Detailed);
        assert_eq!(entry.expected_rent, 1000.0);
        assert_eq!(entry.amount_paid, 1000.0);
        assert_eq!(entry.water, Some(50.0));
        assert_eq!(entry.balance, 0.0);
        assert_eq!(entry.tenant, None);
    }

    #[test]
    fn test_row_explodes_into_one_record_per_month() {
        let sheet = detailed_sheet(vec![row(&[
            (3, s("C7")),
            (4, s("Jane Wanjiku")),
            (12, n(3000.0)),
            (13, n(3500.0)),
            (15, n(500.0)),
            (18, s("3500")),
            (19, n(3500.0)),
            (21, n(0.0)),
        ])]);
        let config = ExtractionConfig::default();
        let result = extract_detailed("REHOBOTH", &sheet, &config);

        let months: Vec<&str> = result.entries.iter().map(|e| e.month.as_str()).collect();
        assert_eq!(months, vec!["JAN", "FEB"]);
        assert!(result
            .entries
            .iter()
            .all(|e| e.tenant.as_deref() == Some("Jane Wanjiku")));
        assert_eq!(result.entries[0].balance, 500.0);
        assert_eq!(result.entries[1].amount_paid, 3500.0);
        // 水道料金が空なら0
        assert_eq!(result.entries[0].water, Some(0.0));
    }

    #[test]
    fn test_empty_unit_yields_nothing() {
        let sheet = detailed_sheet(vec![row(&[
            (3, s("   ")),
            (12, n(1000.0)),
            (13, n(1000.0)),
        ])]);
        let config = ExtractionConfig::default();
        assert!(extract_detailed("REHOBOTH", &sheet, &config)
            .entries
            .is_empty());
    }

    #[test]
    fn test_group_without_paid_or_rent_is_not_emitted() {
        let sheet = detailed_sheet(vec![row(&[
            (3, s("D1")),
            (11, n(1000.0)),
            (12, s("")),
            (13, s("pending")),
            (14, n(50.0)),
        ])]);
        let config = ExtractionConfig::default();
        assert!(extract_detailed("REHOBOTH", &sheet, &config)
            .entries
            .is_empty());
    }

    #[test]
    fn test_malformed_group_is_skipped_not_the_row() {
        let sheet = detailed_sheet(vec![row(&[
            (3, s("E4")),
            (12, Data::Error(CellErrorType::Ref)),
            (13, n(2000.0)),
            (18, n(2000.0)),
            (19, n(2000.0)),
        ])]);
        let config = ExtractionConfig::default();
        let result = extract_detailed("REHOBOTH", &sheet, &config);

        assert_eq!(result.skipped_groups, 1);
        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.entries[0].month, "FEB");
    }

    #[test]
    fn test_no_month_headers() {
        let sheet = SheetView::from_rows(
            (0..8)
                .map(|_| (0..12).map(|_| s("x")).collect())
                .collect(),
        );
        let config = ExtractionConfig::default();
        let result = extract_detailed("WIDE", &sheet, &config);
        assert!(result.entries.is_empty());
        assert_eq!(result.skipped_groups, 0);
    }
}
