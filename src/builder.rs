//! Builder Module
//!
//! Fluent Builder APIを提供し、`Extractor`インスタンスを段階的に構築する。
//!
//! シートのレイアウトに関する定数（見出し行、住戸列、しきい値など）はすべて
//! ここで設定として明示されます。行番号・列番号は表計算ソフトの表示と同じ1始まりです。

use chrono::Month;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::api::{ColumnRole, SheetKind};
use crate::error::{RentsheetError, SkipReason};
use crate::parser::{
    classify, extract_detailed, extract_summary, HeaderCandidates, SheetShape, SheetView,
    WorkbookParser,
};
use crate::security::SecurityConfig;
use crate::types::{ExtractionReport, RentalEntry, SheetReport};

/// 抽出処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ExtractionConfig {
    /// これ未満の行数のシートは読み飛ばす
    pub min_rows: u32,

    /// サマリーシートの見出し行
    pub summary_header_row: u32,

    /// 詳細シートの見出し行（月名が並ぶ行）
    pub detailed_header_row: u32,

    /// 詳細シートとみなす列数のしきい値（この値を超える列数が必要）
    pub detailed_min_columns: u32,

    /// 詳細シートの住戸番号列
    pub unit_column: u32,

    /// 詳細シートの入居者名列
    pub tenant_column: u32,

    /// 認識する月（サマリーのシート名接頭辞と詳細の見出しの両方に使用）
    pub months: Vec<Month>,

    /// サマリーシートの見出し候補
    pub header_candidates: HeaderCandidates,

    /// 入力サイズ制限
    pub security: SecurityConfig,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_rows: 5,
            summary_header_row: 3,
            detailed_header_row: 6,
            detailed_min_columns: 10,
            unit_column: 3,
            tenant_column: 4,
            months: vec![
                Month::January,
                Month::February,
                Month::March,
                Month::April,
                Month::May,
            ],
            header_candidates: HeaderCandidates::default(),
            security: SecurityConfig::default(),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use rentsheet::{ColumnRole, ExtractorBuilder, Month};
///
/// # fn main() -> Result<(), rentsheet::RentsheetError> {
/// let extractor = ExtractorBuilder::new()
///     .with_months([Month::January, Month::February, Month::June])
///     .with_header_candidates(ColumnRole::Unit, ["house", "unit", "room"])
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ExtractorBuilder {
    /// 内部設定（構築中）
    config: ExtractionConfig,
}

impl Default for ExtractorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractorBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 最小行数: 5
    /// - サマリー見出し行: 3
    /// - 詳細見出し行: 6（データは7行目から）
    /// - 詳細シートの列数しきい値: 10（11列以上で詳細シート）
    /// - 住戸番号列 / 入居者名列: 3 / 4
    /// - 月: 1月〜5月
    /// - 見出し候補: 住戸 `house`, `hse`, `unit` / 家賃 `rent` / 入金 `paid` / 残高 `balance`
    /// - 入力サイズ上限: 50MB
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
        }
    }

    /// これ未満の行数のシートを読み飛ばす
    pub fn with_min_rows(mut self, rows: u32) -> Self {
        self.config.min_rows = rows;
        self
    }

    /// サマリーシートの見出し行を指定する
    pub fn with_summary_header_row(mut self, row: u32) -> Self {
        self.config.summary_header_row = row;
        self
    }

    /// 詳細シートの見出し行を指定する
    pub fn with_detailed_header_row(mut self, row: u32) -> Self {
        self.config.detailed_header_row = row;
        self
    }

    /// 詳細シートとみなす列数のしきい値を指定する
    pub fn with_detailed_min_columns(mut self, columns: u32) -> Self {
        self.config.detailed_min_columns = columns;
        self
    }

    /// 詳細シートの住戸番号列を指定する
    pub fn with_unit_column(mut self, col: u32) -> Self {
        self.config.unit_column = col;
        self
    }

    /// 詳細シートの入居者名列を指定する
    pub fn with_tenant_column(mut self, col: u32) -> Self {
        self.config.tenant_column = col;
        self
    }

    /// 認識する月を指定する
    ///
    /// 順序は意味を持ちません（詳細シートの月の順序は見出し行の列順）。
    pub fn with_months<I>(mut self, months: I) -> Self
    where
        I: IntoIterator<Item = Month>,
    {
        self.config.months = months.into_iter().collect();
        self
    }

    /// サマリーシートの見出し候補を役割ごとに置き換える
    ///
    /// 候補は先頭ほど優先されます。照合は大文字小文字を区別しない部分一致です。
    pub fn with_header_candidates<I, S>(mut self, role: ColumnRole, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.config.header_candidates.set(role, candidates);
        self
    }

    /// 入力ファイルの最大サイズ（バイト）を指定する
    pub fn with_max_input_file_size(mut self, bytes: u64) -> Self {
        self.config.security = SecurityConfig::with_max_input_file_size(bytes);
        self
    }

    /// 設定を検証し、`Extractor`インスタンスを生成する
    ///
    /// # 戻り値
    ///
    /// * `Ok(Extractor)`: 設定が有効な場合
    /// * `Err(RentsheetError::Config)`: 設定が無効な場合
    ///   * 行番号・列番号・最小行数が0
    ///   * 住戸番号列と入居者名列が同じ
    ///   * 月の指定が空、または重複
    ///   * 見出し候補が空、または空白のみの候補を含む
    ///   * 入力サイズ上限が0
    pub fn build(self) -> Result<Extractor, RentsheetError> {
        let config = &self.config;

        // 1. 行番号・列番号（1始まり）
        let positions = [
            ("min_rows", config.min_rows),
            ("summary_header_row", config.summary_header_row),
            ("detailed_header_row", config.detailed_header_row),
            ("unit_column", config.unit_column),
            ("tenant_column", config.tenant_column),
        ];
        for (name, value) in positions {
            if value == 0 {
                return Err(RentsheetError::Config(format!(
                    "{} must be at least 1",
                    name
                )));
            }
        }

        if config.unit_column == config.tenant_column {
            return Err(RentsheetError::Config(format!(
                "unit_column and tenant_column must differ (both {})",
                config.unit_column
            )));
        }

        // 2. 月
        if config.months.is_empty() {
            return Err(RentsheetError::Config(
                "At least one month must be recognized".to_string(),
            ));
        }
        for (i, month) in config.months.iter().enumerate() {
            if config.months[..i].contains(month) {
                return Err(RentsheetError::Config(format!(
                    "Duplicate month: {}",
                    month.name()
                )));
            }
        }

        // 3. 見出し候補
        for role in ColumnRole::ALL {
            let candidates = config.header_candidates.candidates(role);
            if candidates.is_empty() || candidates.iter().any(|c| c.is_empty()) {
                return Err(RentsheetError::Config(format!(
                    "Header candidates for {} must be non-empty",
                    role
                )));
            }
        }

        // 4. 入力サイズ
        if config.security.max_input_file_size == 0 {
            return Err(RentsheetError::Config(
                "max_input_file_size must be greater than 0".to_string(),
            ));
        }

        Ok(Extractor::new(self.config))
    }
}

/// ワークブック抽出のファサード
///
/// 状態を持たない純粋な変換器です。同じ入力に対しては常に同じ結果を返します。
///
/// # 使用例
///
/// ```rust,no_run
/// use rentsheet::ExtractorBuilder;
///
/// # fn main() -> Result<(), rentsheet::RentsheetError> {
/// let extractor = ExtractorBuilder::new().build()?;
/// let entries = extractor.extract_path("uploads/latest.xlsx")?;
/// for entry in &entries {
///     println!("{} {} paid {}", entry.unit, entry.month, entry.amount_paid);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Extractor {
    /// 抽出設定
    config: ExtractionConfig,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(ExtractionConfig::default())
    }
}

impl Extractor {
    pub(crate) fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// ファイルパスからレコードを抽出する
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<RentalEntry>)` - 抽出されたレコード（0件の場合もある）
    /// * `Err(RentsheetError::Io)` - ファイルを開けない・読めない場合
    /// * `Err(RentsheetError::Parse)` - ワークブックとして認識できない場合
    /// * `Err(RentsheetError::SecurityViolation)` - サイズ上限を超えた場合
    pub fn extract_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<RentalEntry>, RentsheetError> {
        Ok(self.extract_path_report(path)?.entries)
    }

    /// ファイルパスからレコードとシートごとの診断情報を抽出する
    pub fn extract_path_report<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<ExtractionReport, RentsheetError> {
        let file = File::open(path.as_ref())?;
        self.extract_report(file)
    }

    /// リーダーからレコードを抽出する
    pub fn extract<R: Read>(&self, input: R) -> Result<Vec<RentalEntry>, RentsheetError> {
        Ok(self.extract_report(input)?.entries)
    }

    /// リーダーからレコードとシートごとの診断情報を抽出する
    ///
    /// # 処理フロー
    ///
    /// 1. 入力をサイズ上限付きでメモリに読み込む（唯一のI/O）
    /// 2. ワークブックを開く
    /// 3. シートごとに分類し、サマリー／詳細の抽出戦略へ振り分ける
    /// 4. ワークブック上の順序でレコードを連結する
    pub fn extract_report<R: Read>(&self, input: R) -> Result<ExtractionReport, RentsheetError> {
        // 1. 入力の読み込み
        let buffer = self.config.security.read_limited(input)?;

        // 2. ワークブックを開く
        let mut parser = WorkbookParser::open(buffer)?;

        // 3. シートごとの処理
        let mut report = ExtractionReport::default();
        for name in parser.sheet_names() {
            let sheet_report = match parser.load_sheet(&name) {
                Ok(sheet) => self.extract_sheet(&name, &sheet, &mut report.entries),
                Err(e) => {
                    log::warn!("Skipping sheet '{}': {}", name, e);
                    SheetReport::skipped(&name, SheetKind::Unreadable, SkipReason::Unreadable(e.to_string()))
                }
            };
            report.sheets.push(sheet_report);
        }

        log::info!(
            "Extracted {} rental entries from {} sheets ({} skipped)",
            report.entries.len(),
            report.sheets.len(),
            report.skipped_sheets().count()
        );

        Ok(report)
    }

    /// シート1枚を分類して抽出し、レコードを`entries`に追加する
    fn extract_sheet(
        &self,
        name: &str,
        sheet: &SheetView,
        entries: &mut Vec<RentalEntry>,
    ) -> SheetReport {
        let shape = classify(name, sheet, &self.config);
        let source = name.trim().to_uppercase();

        let outcome = match shape {
            SheetShape::TooSmall { rows } => {
                let reason = SkipReason::TooSmall {
                    rows,
                    min: self.config.min_rows,
                };
                log::debug!("Skipping sheet '{}': {}", name, reason);
                return SheetReport::skipped(name, shape.kind(), reason);
            }
            SheetShape::Unsupported { columns } => Err(SkipReason::Unsupported { columns }),
            SheetShape::Summary { month } => extract_summary(&source, month, sheet, &self.config),
            SheetShape::Detailed => Ok(extract_detailed(&source, sheet, &self.config)),
        };

        match outcome {
            Ok(extraction) => {
                log::debug!(
                    "Sheet '{}' ({:?}): {} records",
                    name,
                    shape.kind(),
                    extraction.entries.len()
                );
                let report = SheetReport {
                    name: name.to_string(),
                    kind: shape.kind(),
                    records: extraction.entries.len(),
                    skipped_groups: extraction.skipped_groups,
                    skip: None,
                };
                entries.extend(extraction.entries);
                report
            }
            Err(reason) => {
                log::warn!("Skipping sheet '{}': {}", name, reason);
                SheetReport::skipped(name, shape.kind(), reason)
            }
        }
    }
}

/// デフォルト設定でファイルからレコードを抽出する
///
/// `ExtractorBuilder::new().build()?.extract_path(path)`の省略形です。
pub fn extract_rental_entries<P: AsRef<Path>>(path: P) -> Result<Vec<RentalEntry>, RentsheetError> {
    Extractor::default().extract_path(path)
}
