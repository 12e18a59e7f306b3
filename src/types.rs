//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use calamine::Data;
use serde::{Deserialize, Serialize};

use crate::api::{SheetKind, SheetType};
use crate::error::SkipReason;

/// 抽出された家賃レコード（出力単位）
///
/// 1レコードは必ず1シート・1か月に属します。数値フィールドがNaNや無限大になることはなく、
/// 解釈できない値はすべて`0`に正規化されます。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalEntry {
    /// 抽出元シート名（前後の空白を除去し、大文字化）
    pub source: String,

    /// 抽出元シートの種類
    pub sheet_type: SheetType,

    /// 住戸番号（空になることはない）
    pub unit: String,

    /// 入居者名（詳細シートのみ）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,

    /// 3文字の月コード（例: `JAN`）
    pub month: String,

    /// 請求家賃
    pub expected_rent: f64,

    /// 入金額
    pub amount_paid: f64,

    /// 残高（負の値は過払い）
    pub balance: f64,

    /// 水道料金（詳細シートのみ）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water: Option<f64>,
}

/// シート1枚分の処理結果
#[derive(Debug, Clone, PartialEq)]
pub struct SheetReport {
    /// シート名（ワークブック上の表記そのまま）
    pub name: String,

    /// 分類結果
    pub kind: SheetKind,

    /// このシートから出力したレコード数
    pub records: usize,

    /// 不正なセルを含むため読み飛ばした月グループ数（詳細シートのみ）
    pub skipped_groups: usize,

    /// シート全体を読み飛ばした場合の理由
    pub skip: Option<SkipReason>,
}

impl SheetReport {
    pub(crate) fn skipped(name: &str, kind: SheetKind, reason: SkipReason) -> Self {
        Self {
            name: name.to_string(),
            kind,
            records: 0,
            skipped_groups: 0,
            skip: Some(reason),
        }
    }
}

/// 抽出結果とシートごとの診断情報
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractionReport {
    /// 抽出されたレコード（シート順 → 行順 → 月の列順）
    pub entries: Vec<RentalEntry>,

    /// ワークブック上の順序でのシートごとの結果
    pub sheets: Vec<SheetReport>,
}

impl ExtractionReport {
    /// 読み飛ばされたシートの一覧
    pub fn skipped_sheets(&self) -> impl Iterator<Item = &SheetReport> {
        self.sheets.iter().filter(|s| s.skip.is_some())
    }
}

/// セルの値を表す列挙型
///
/// calamineの`Data`を、抽出処理に必要な形へ縮約したものです。
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CellValue {
    /// 数値（日付シリアル値を含む）
    Number(f64),

    /// 文字列
    String(String),

    /// 論理値
    Bool(bool),

    /// エラー値（例: #DIV/0!）
    Error(String),

    /// 空セル（範囲外を含む）
    Empty,
}

impl CellValue {
    /// calamineのセルデータから変換
    pub fn from_data(cell: Option<&Data>) -> Self {
        match cell {
            None => CellValue::Empty,
            Some(data) => match data {
                Data::Int(i) => CellValue::Number(*i as f64),
                Data::Float(f) => CellValue::Number(*f),
                Data::String(s) => CellValue::String(s.clone()),
                Data::Bool(b) => CellValue::Bool(*b),
                Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
                Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
                Data::Error(e) => CellValue::Error(e.to_string()),
                _ => CellValue::Empty,
            },
        }
    }

    /// 値が空かどうか（空白のみの文字列も空とみなす）
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// エラー値かどうか
    pub fn is_error(&self) -> bool {
        matches!(self, CellValue::Error(_))
    }

    /// 前後の空白を除去した文字列表現
    ///
    /// 数値は`5000.0`ではなく`5000`のように出力されます。エラー値は空文字列になります。
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Number(n) => n.to_string(),
            CellValue::String(s) => s.trim().to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Error(_) | CellValue::Empty => String::new(),
        }
    }

    /// 数値として解釈する
    ///
    /// 空セル・数値に変換できない文字列・論理値・エラー値は`None`。
    pub fn parse_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n).filter(|n| n.is_finite()),
            CellValue::String(s) => parse_numeric_text(s),
            CellValue::Bool(_) | CellValue::Error(_) | CellValue::Empty => None,
        }
    }

    /// 金額として解釈する（解釈できない場合は`0`）
    pub fn to_amount(&self) -> f64 {
        self.parse_number().unwrap_or(0.0)
    }
}

/// 数値文字列を解釈する
///
/// 空白と桁区切りのカンマを取り除いてから`f64`として解析します。
/// 空文字列、解析失敗、NaN・無限大はすべて`None`。
pub(crate) fn parse_numeric_text(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}
