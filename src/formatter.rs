//! Formatter Module
//!
//! レコードを人間やLLMが読む1行の文字列に整形する。

use crate::types::RentalEntry;

/// 金額を文字列に整形する
///
/// 整数値は小数点なし（`5000`）、`-0`は`0`として出力します。
pub(crate) fn format_amount(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

/// LLMのコンテキスト用の1行
///
/// ```text
/// Source: REHOBOTH, Unit: B2, Month: JAN, Rent: 1000, Paid: 1000, Balance: 0, Tenant: Jane, Water: 50
/// ```
pub(crate) fn context_line(entry: &RentalEntry) -> String {
    let mut line = format!(
        "Source: {}, Unit: {}, Month: {}, Rent: {}, Paid: {}, Balance: {}",
        entry.source,
        entry.unit,
        entry.month,
        format_amount(entry.expected_rent),
        format_amount(entry.amount_paid),
        format_amount(entry.balance)
    );
    if let Some(ref tenant) = entry.tenant {
        line.push_str(&format!(", Tenant: {}", tenant));
    }
    if let Some(water) = entry.water {
        line.push_str(&format!(", Water: {}", format_amount(water)));
    }
    line
}

/// アップロード結果のサンプル表示用の1行
///
/// ```text
/// A1 (JAN SUMMARY, JAN) → Rent: 5000, Paid: 5000, Bal: 0
/// ```
pub(crate) fn sample_line(entry: &RentalEntry) -> String {
    format!(
        "{} ({}, {}) → Rent: {}, Paid: {}, Bal: {}",
        entry.unit,
        entry.source,
        entry.month,
        format_amount(entry.expected_rent),
        format_amount(entry.amount_paid),
        format_amount(entry.balance)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SheetType;

    fn entry() -> RentalEntry {
        RentalEntry {
            source: "REHOBOTH".to_string(),
            sheet_type: SheetType::Detailed,
            unit: "B2".to_string(),
            tenant: Some("Jane".to_string()),
            month: "JAN".to_string(),
            expected_rent: 1000.0,
            amount_paid: 1000.0,
            balance: -0.0,
            water: Some(50.0),
        }
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(5000.0), "5000");
        assert_eq!(format_amount(2500.5), "2500.5");
        assert_eq!(format_amount(-300.0), "-300");
        assert_eq!(format_amount(-0.0), "0");
    }

    #[test]
    fn test_context_line() {
        assert_eq!(
            context_line(&entry()),
            "Source: REHOBOTH, Unit: B2, Month: JAN, Rent: 1000, Paid: 1000, Balance: 0, Tenant: Jane, Water: 50"
        );
    }

    #[test]
    fn test_context_line_summary_has_no_optional_fields() {
        let mut e = entry();
        e.tenant = None;
        e.water = None;
        assert!(!context_line(&e).contains("Tenant"));
        assert!(!context_line(&e).contains("Water"));
    }

    #[test]
    fn test_sample_line() {
        assert_eq!(
            sample_line(&entry()),
            "B2 (REHOBOTH, JAN) → Rent: 1000, Paid: 1000, Bal: 0"
        );
    }
}
