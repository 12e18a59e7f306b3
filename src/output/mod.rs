//! Output Format Module
//!
//! Strategy Patternによる出力フォーマットの抽象化を提供するモジュール。

mod formatters;

use std::io::Write;

use crate::api::OutputFormat;
use crate::error::RentsheetError;
use crate::types::RentalEntry;

use formatters::{ContextFormatter, JsonFormatter, MarkdownFormatter};

/// 出力フォーマッター（Strategy Pattern）
#[derive(Debug, Clone, Copy)]
pub(crate) enum OutputFormatter {
    Context,
    Markdown,
    Json,
}

impl OutputFormatter {
    /// 出力フォーマットからフォーマッターを生成
    pub fn from_format(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Context => OutputFormatter::Context,
            OutputFormat::Markdown => OutputFormatter::Markdown,
            OutputFormat::Json => OutputFormatter::Json,
        }
    }

    /// レコードを指定されたフォーマットで出力する
    pub fn render<W: Write>(
        &self,
        entries: &[RentalEntry],
        writer: &mut W,
    ) -> Result<(), RentsheetError> {
        match self {
            OutputFormatter::Context => ContextFormatter.render(entries, writer),
            OutputFormatter::Markdown => MarkdownFormatter.render(entries, writer),
            OutputFormatter::Json => JsonFormatter.render(entries, writer),
        }
    }
}

/// レコードを指定したフォーマットで書き出す
///
/// # 使用例
///
/// ```rust,no_run
/// use rentsheet::{render_entries, extract_rental_entries, OutputFormat};
///
/// # fn main() -> Result<(), rentsheet::RentsheetError> {
/// let entries = extract_rental_entries("rent.xlsx")?;
/// render_entries(&entries, OutputFormat::Markdown, std::io::stdout())?;
/// # Ok(())
/// # }
/// ```
pub fn render_entries<W: Write>(
    entries: &[RentalEntry],
    format: OutputFormat,
    mut writer: W,
) -> Result<(), RentsheetError> {
    OutputFormatter::from_format(format).render(entries, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// レコードを指定したフォーマットの文字列に変換する
pub fn render_to_string(
    entries: &[RentalEntry],
    format: OutputFormat,
) -> Result<String, RentsheetError> {
    let mut buffer = Vec::new();
    render_entries(entries, format, &mut buffer)?;

    String::from_utf8(buffer)
        .map_err(|e| RentsheetError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}
