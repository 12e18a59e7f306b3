//! Sheet Classification
//!
//! シート名と寸法だけから、シートの形状を決定する純粋関数。

use chrono::Month;

use super::months::month_for_prefix;
use super::sheet::SheetView;
use crate::api::SheetKind;
use crate::builder::ExtractionConfig;

/// シートの形状
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SheetShape {
    /// 行数不足
    TooSmall { rows: u32 },

    /// 月次サマリー（シート名の先頭が月コード）
    Summary { month: Month },

    /// 物件別の詳細シート
    Detailed,

    /// 未対応
    Unsupported { columns: u32 },
}

impl SheetShape {
    /// レポート用の分類
    pub fn kind(&self) -> SheetKind {
        match self {
            SheetShape::TooSmall { .. } => SheetKind::TooSmall,
            SheetShape::Summary { .. } => SheetKind::Summary,
            SheetShape::Detailed => SheetKind::Detailed,
            SheetShape::Unsupported { .. } => SheetKind::Unsupported,
        }
    }
}

/// シートを分類する
///
/// 判定順:
///
/// 1. 行数が`min_rows`未満 → `TooSmall`
/// 2. シート名（前後空白除去・大文字化）が月コードで始まる → `Summary`
/// 3. 列数が`detailed_min_columns`を超える → `Detailed`
/// 4. それ以外 → `Unsupported`
pub(crate) fn classify(name: &str, sheet: &SheetView, config: &ExtractionConfig) -> SheetShape {
    let rows = sheet.row_count();
    if rows < config.min_rows {
        return SheetShape::TooSmall { rows };
    }

    let normalized = name.trim().to_uppercase();
    if let Some(month) = month_for_prefix(&normalized, &config.months) {
        return SheetShape::Summary { month };
    }

    let columns = sheet.column_count();
    if columns > config.detailed_min_columns {
        return SheetShape::Detailed;
    }

    SheetShape::Unsupported { columns }
}
