//! Dataset Slot
//!
//! 最新のアップロード結果を1つだけ保持するメモリ上の領域。
//! 新しいアップロードのたびに丸ごと置き換えられます。永続化はしません。

use std::sync::{Arc, PoisonError, RwLock};

use crate::types::RentalEntry;

/// 「最新アップロード」スロット
///
/// 抽出処理自体は状態を持たず、このスロットを所有するのは呼び出し側（チャット連携層）です。
/// 読み手は`snapshot()`で取得した`Arc`を保持している間、置き換えの影響を受けません。
#[derive(Debug, Default)]
pub struct DatasetSlot {
    current: RwLock<Arc<Vec<RentalEntry>>>,
}

impl DatasetSlot {
    /// 空のスロットを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// データセットを置き換える
    pub fn replace(&self, entries: Vec<RentalEntry>) {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Arc::new(entries);
    }

    /// 現在のデータセットを取得する
    pub fn snapshot(&self) -> Arc<Vec<RentalEntry>> {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&current)
    }

    /// レコード数
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// データセットが空かどうか
    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// データセットを破棄する
    pub fn clear(&self) {
        self.replace(Vec::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SheetType;

    fn entry(unit: &str) -> RentalEntry {
        RentalEntry {
            source: "JAN".to_string(),
            sheet_type: SheetType::Summary,
            unit: unit.to_string(),
            tenant: None,
            month: "JAN".to_string(),
            expected_rent: 1.0,
            amount_paid: 1.0,
            balance: 0.0,
            water: None,
        }
    }

    #[test]
    fn test_replace_overwrites_previous_upload() {
        let slot = DatasetSlot::new();
        assert!(slot.is_empty());

        slot.replace(vec![entry("A1"), entry("A2")]);
        assert_eq!(slot.len(), 2);

        slot.replace(vec![entry("B1")]);
        assert_eq!(slot.len(), 1);
        assert_eq!(slot.snapshot()[0].unit, "B1");
    }

    #[test]
    fn test_snapshot_is_stable_across_replace() {
        let slot = DatasetSlot::new();
        slot.replace(vec![entry("A1")]);

        let before = slot.snapshot();
        slot.clear();

        assert_eq!(before.len(), 1);
        assert!(slot.is_empty());
    }
}
