//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。
//!
//! 致命的なエラー（`RentsheetError`）と、シート単位で吸収される
//! ソフトエラー（`SkipReason`）の2階層に分かれています。

use thiserror::Error;

use crate::api::ColumnRole;

/// rentsheetクレート全体で使用するエラー型
///
/// 抽出処理が失敗として呼び出し元に返すのは、ファイルを開けない・読めない場合のみです。
/// データ品質の問題（列見出しの欠落、数値に変換できないセルなど）はこの型では
/// 表現されず、`SkipReason`としてログとレポートに記録されます。
///
/// # 使用例
///
/// ```rust,no_run
/// use rentsheet::{ExtractorBuilder, RentsheetError};
///
/// fn load(path: &str) -> Result<usize, RentsheetError> {
///     let extractor = ExtractorBuilder::new().build()?;
///     let entries = extractor.extract_path(path)?; // Io / Parse エラーが伝播する
///     Ok(entries.len())
/// }
/// ```
#[derive(Error, Debug)]
pub enum RentsheetError {
    /// I/O操作中に発生したエラー
    ///
    /// ファイルが存在しない、読み取り権限がないなど。
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ワークブックの解析中に発生したエラー
    ///
    /// calamineがファイル形式を認識できない、または破損している場合に発生します。
    #[error("Failed to parse workbook: {0}")]
    Parse(#[from] calamine::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `ExtractorBuilder::build()`時に検出されます。
    ///
    /// ```rust,no_run
    /// use rentsheet::{ExtractorBuilder, RentsheetError};
    ///
    /// match ExtractorBuilder::new().with_min_rows(0).build() {
    ///     Err(RentsheetError::Config(msg)) => println!("設定エラー: {}", msg),
    ///     _ => {}
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSONのシリアライズ・デシリアライズに失敗したエラー
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// セキュリティ制限に違反したエラー
    ///
    /// 入力ファイルが上限サイズを超えた場合に発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),

    /// チャット補完APIの呼び出しに失敗したエラー
    #[error("Model request failed: {0}")]
    Model(String),

    /// チャット補完APIがリクエストサイズ超過を報告したエラー
    #[error("Request too large: {0}")]
    RequestTooLarge(String),
}

/// シートを読み飛ばした理由（ソフトエラー）
///
/// 抽出は中断されず、`log::warn!`（小さすぎるシートは`log::debug!`）で記録した上で
/// 次のシートへ進みます。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// 行数がしきい値に満たない
    #[error("sheet has {rows} rows, at least {min} required")]
    TooSmall { rows: u32, min: u32 },

    /// 月名で始まらず、詳細シートとみなすには列数が足りない
    #[error("unsupported sheet shape ({columns} columns)")]
    Unsupported { columns: u32 },

    /// 必須の列見出しが見つからない
    #[error("missing required header for {role}")]
    MissingHeader { role: ColumnRole },

    /// シート自体を読み込めない（チャートシートなど）
    #[error("sheet could not be read: {0}")]
    Unreadable(String),
}
