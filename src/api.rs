//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

use std::fmt;

use serde::{Deserialize, Serialize};

/// レコードの抽出元となったシートの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetType {
    /// 月次サマリーシート（1シート = 1か月）
    Summary,

    /// 物件別の詳細シート（月ごとの列グループが横に並ぶ）
    Detailed,
}

impl SheetType {
    /// 小文字の識別子（`"summary"` / `"detailed"`）
    pub fn as_str(&self) -> &'static str {
        match self {
            SheetType::Summary => "summary",
            SheetType::Detailed => "detailed",
        }
    }
}

impl fmt::Display for SheetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// シート分類の結果
///
/// `ExtractionReport`の各シートに記録されます。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SheetKind {
    /// 行数不足で読み飛ばし
    TooSmall,

    /// 月次サマリー
    Summary,

    /// 詳細（月別列グループ）
    Detailed,

    /// 未対応の形状で読み飛ばし
    Unsupported,

    /// シートを読み込めなかった
    Unreadable,
}

/// サマリーシートの論理列
///
/// 列見出しの文字列照合により、実際の列位置に解決されます。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    /// 部屋番号・住戸番号
    Unit,

    /// 家賃（請求額）
    Rent,

    /// 入金額
    Paid,

    /// 残高
    Balance,
}

impl ColumnRole {
    /// すべての役割（解決順）
    pub const ALL: [ColumnRole; 4] = [
        ColumnRole::Unit,
        ColumnRole::Rent,
        ColumnRole::Paid,
        ColumnRole::Balance,
    ];
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnRole::Unit => "unit",
            ColumnRole::Rent => "rent",
            ColumnRole::Paid => "paid",
            ColumnRole::Balance => "balance",
        };
        f.write_str(name)
    }
}

/// データセットの出力フォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum OutputFormat {
    /// LLMに渡すコンテキスト形式（1レコード1行）
    ///
    /// ```text
    /// Source: JAN SUMMARY, Unit: A1, Month: JAN, Rent: 5000, Paid: 5000, Balance: 0
    /// ```
    Context,

    /// Markdownテーブル形式
    ///
    /// ```markdown
    /// | Source | Type | Unit | Tenant | Month | Rent | Paid | Balance | Water |
    /// | --- | --- | --- | --- | --- | --- | --- | --- | --- |
    /// | JAN SUMMARY | summary | A1 |  | JAN | 5000 | 5000 | 0 |  |
    /// ```
    Markdown,

    /// JSON形式（レコードの配列）
    Json,
}
