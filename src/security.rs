//! Security Module
//!
//! 入力サイズの制限を実装するモジュール。
//! アップロードされたワークブックは一度すべてメモリに読み込まれるため、
//! 上限を超える入力は読み込み途中で打ち切ります。

use std::io::Read;

use crate::error::RentsheetError;

/// セキュリティ設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 50MB (52_428_800 bytes)
    pub max_input_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: 52_428_800, // 50MB
        }
    }
}

impl SecurityConfig {
    /// 上限サイズを指定して作成
    pub fn with_max_input_file_size(max_input_file_size: u64) -> Self {
        Self {
            max_input_file_size,
        }
    }

    /// 上限サイズまで入力を読み込む
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<u8>)` - 入力全体
    /// * `Err(RentsheetError::SecurityViolation)` - 入力が上限を超えた場合
    /// * `Err(RentsheetError::Io)` - 読み込みに失敗した場合
    pub fn read_limited<R: Read>(&self, reader: R) -> Result<Vec<u8>, RentsheetError> {
        let mut buffer = Vec::new();
        // 上限+1バイトまで読めば超過を判定できる
        let bytes_read = reader
            .take(self.max_input_file_size.saturating_add(1))
            .read_to_end(&mut buffer)?;

        if bytes_read as u64 > self.max_input_file_size {
            return Err(RentsheetError::SecurityViolation(format!(
                "Input file size exceeds maximum: more than {} bytes",
                self.max_input_file_size
            )));
        }

        Ok(buffer)
    }
}
