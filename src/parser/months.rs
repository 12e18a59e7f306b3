//! 月名の照合

use chrono::Month;

/// 3文字の大文字月コード（`Month::January` → `"JAN"`）
pub(crate) fn month_code(month: Month) -> String {
    month.name()[..3].to_uppercase()
}

/// 大文字化済みのシート名が、いずれかの月コードで始まるかを判定
pub(crate) fn month_for_prefix(name: &str, months: &[Month]) -> Option<Month> {
    months
        .iter()
        .copied()
        .find(|m| name.starts_with(month_code(*m).as_str()))
}

/// 大文字化済みの見出し文字列が、月の正式名（`JANUARY`など）と一致するかを判定
pub(crate) fn month_for_header(text: &str, months: &[Month]) -> Option<Month> {
    months
        .iter()
        .copied()
        .find(|m| m.name().to_uppercase() == text)
}
