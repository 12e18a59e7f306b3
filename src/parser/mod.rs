//! Parser Module
//!
//! calamineを使用したワークブック解析と、家賃レコードの抽出。
//! シートの形状を一度だけ分類し、サマリー／詳細の2つの抽出戦略に振り分けます。

mod classify;
mod detailed;
mod headers;
mod months;
mod sheet;
mod summary;
mod workbook;

pub(crate) use classify::{classify, SheetShape};
pub(crate) use detailed::extract_detailed;
pub use headers::HeaderCandidates;
pub(crate) use sheet::SheetView;
pub(crate) use summary::extract_summary;
pub(crate) use workbook::WorkbookParser;

use crate::types::RentalEntry;

/// シート1枚から抽出した結果
#[derive(Debug, Default)]
pub(crate) struct SheetExtraction {
    /// 抽出したレコード
    pub entries: Vec<RentalEntry>,

    /// 不正なセルにより読み飛ばした月グループ数
    pub skipped_groups: usize,
}
