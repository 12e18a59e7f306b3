//! Sheet View
//!
//! calamineの`Range`を、1始まりの絶対座標でアクセスできるようにするラッパー。
//! calamineの範囲は最初の非空セルから始まるため、先頭の空行・空列も
//! 行番号・列番号に数えるよう`get_value`（絶対座標）を使用します。

use calamine::{Data, Range};

use crate::types::CellValue;

/// 読み込み済みシート
#[derive(Debug, Clone)]
pub(crate) struct SheetView {
    range: Range<Data>,
}

impl SheetView {
    /// calamineの範囲から生成
    pub fn new(range: Range<Data>) -> Self {
        Self { range }
    }

    /// 最後に使用されている行の行番号（空シートは0）
    pub fn row_count(&self) -> u32 {
        self.range.end().map(|(row, _)| row + 1).unwrap_or(0)
    }

    /// 最後に使用されている列の列番号（空シートは0）
    pub fn column_count(&self) -> u32 {
        self.range.end().map(|(_, col)| col + 1).unwrap_or(0)
    }

    /// セル値を取得（1始まり）
    ///
    /// 範囲外・0番地は`CellValue::Empty`。
    pub fn cell(&self, row: u32, col: u32) -> CellValue {
        if row == 0 || col == 0 {
            return CellValue::Empty;
        }
        CellValue::from_data(self.range.get_value((row - 1, col - 1)))
    }

    /// セルの文字列表現を取得（1始まり、前後の空白除去済み）
    pub fn text(&self, row: u32, col: u32) -> String {
        self.cell(row, col).as_text()
    }

    /// 指定行のすべてのセルの文字列表現（1列目から最終列まで）
    pub fn row_texts(&self, row: u32) -> Vec<String> {
        (1..=self.column_count())
            .map(|col| self.text(row, col))
            .collect()
    }

    /// テスト用: 行の配列からシートを組み立てる（1行目 = 配列の先頭）
    #[cfg(test)]
    pub fn from_rows(rows: Vec<Vec<Data>>) -> Self {
        let height = rows.len() as u32;
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0) as u32;
        if height == 0 || width == 0 {
            return Self::new(Range::empty());
        }

        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in rows.into_iter().enumerate() {
            for (c, value) in row.into_iter().enumerate() {
                range.set_value((r as u32, c as u32), value);
            }
        }
        Self::new(range)
    }
}
