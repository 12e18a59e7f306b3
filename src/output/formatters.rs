//! Output Formatters Implementation
//!
//! 各出力フォーマットの実装を提供するモジュール。

use std::io::Write;

use crate::error::RentsheetError;
use crate::formatter::{context_line, format_amount};
use crate::types::RentalEntry;

/// LLMコンテキスト形式のフォーマッター（1レコード1行）
pub(crate) struct ContextFormatter;

impl ContextFormatter {
    pub fn render<W: Write>(
        &self,
        entries: &[RentalEntry],
        writer: &mut W,
    ) -> Result<(), RentsheetError> {
        for entry in entries {
            writeln!(writer, "{}", context_line(entry))?;
        }
        Ok(())
    }
}

/// Markdown形式のフォーマッター
pub(crate) struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn render<W: Write>(
        &self,
        entries: &[RentalEntry],
        writer: &mut W,
    ) -> Result<(), RentsheetError> {
        if entries.is_empty() {
            return Ok(());
        }

        writeln!(
            writer,
            "| Source | Type | Unit | Tenant | Month | Rent | Paid | Balance | Water |"
        )?;
        writeln!(
            writer,
            "| --- | --- | --- | --- | --- | --- | --- | --- | --- |"
        )?;

        for entry in entries {
            writeln!(
                writer,
                "| {} | {} | {} | {} | {} | {} | {} | {} | {} |",
                escape_markdown(&entry.source),
                entry.sheet_type,
                escape_markdown(&entry.unit),
                escape_markdown(entry.tenant.as_deref().unwrap_or("")),
                entry.month,
                format_amount(entry.expected_rent),
                format_amount(entry.amount_paid),
                format_amount(entry.balance),
                entry.water.map(format_amount).unwrap_or_default()
            )?;
        }

        Ok(())
    }
}

/// JSON形式のフォーマッター（レコードの配列）
pub(crate) struct JsonFormatter;

impl JsonFormatter {
    pub fn render<W: Write>(
        &self,
        entries: &[RentalEntry],
        writer: &mut W,
    ) -> Result<(), RentsheetError> {
        serde_json::to_writer_pretty(&mut *writer, entries)?;
        writeln!(writer)?;
        Ok(())
    }
}

/// Markdownテーブルのセル内でパイプと改行をエスケープ
fn escape_markdown(s: &str) -> String {
    s.replace('|', "\\|").replace(['\n', '\r'], " ")
}
