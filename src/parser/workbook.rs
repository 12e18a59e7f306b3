//! Workbook Parser
//!
//! calamineのラッパーとして、ワークブックレベルの操作を提供します。
//! 形式（XLSX / XLS / XLSB / ODS）はcalamineの自動判定に任せます。

use calamine::{open_workbook_auto_from_rs, Reader, Sheets};
use std::io::Cursor;

use super::sheet::SheetView;
use crate::error::RentsheetError;

/// ワークブックパーサー
pub(crate) struct WorkbookParser {
    /// calamineのワークブック
    workbook: Sheets<Cursor<Vec<u8>>>,
}

impl WorkbookParser {
    /// メモリ上のファイル内容からワークブックを開く
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - ワークブックとして認識できた場合
    /// * `Err(RentsheetError::Parse)` - 形式を認識できない、または破損している場合
    pub fn open(buffer: Vec<u8>) -> Result<Self, RentsheetError> {
        let workbook = open_workbook_auto_from_rs(Cursor::new(buffer))?;
        Ok(Self { workbook })
    }

    /// すべてのシート名をワークブック上の順序で取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// シートを読み込む
    ///
    /// チャートシートなど、セル範囲を持たないシートはエラーになります。
    /// 呼び出し側はこのエラーをシート単位のソフトエラーとして扱います。
    pub fn load_sheet(&mut self, sheet_name: &str) -> Result<SheetView, RentsheetError> {
        let range = self.workbook.worksheet_range(sheet_name)?;
        Ok(SheetView::new(range))
    }
}

// ファイル単位の動作は統合テスト（tests/）で検証します。
