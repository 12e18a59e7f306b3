//! Rental Assistant
//!
//! チャットボット側の処理を提供するモジュール。
//! アップロードされたワークブックを抽出して「最新アップロード」スロットに保持し、
//! 質問に対してはスロットの内容をコンテキストとして言語モデルに問い合わせます。
//!
//! メッセージの送受信そのもの（チャットサービスとの通信）は呼び出し側の責務で、
//! ここでは送信すべき返信メッセージ（分割済み）を返すだけです。

mod chunk;
mod client;
mod prompt;
mod slot;

use std::path::Path;

use crate::builder::Extractor;
use crate::error::RentsheetError;
use crate::formatter::sample_line;
use crate::types::RentalEntry;

pub use chunk::{chunk_message, MAX_MESSAGE_LEN};
pub use client::ChatModel;
#[cfg(feature = "groq")]
pub use client::{GroqClient, GroqConfig};
pub use prompt::{
    build_context, build_request, ChatMessage, ChatRequest, Role, DEFAULT_CONTEXT_LIMIT,
    DEFAULT_TEMPERATURE,
};
pub use slot::DatasetSlot;

const MSG_INVALID_FILE: &str = "⚠️ Please upload a valid Excel (.xlsx) file.";
const MSG_NO_ENTRIES: &str = "⚠️ No valid rental entries found in the Excel file.";
const MSG_PARSE_FAILED: &str = "❌ Failed to parse the Excel file.";
const MSG_UPLOAD_FIRST: &str = "📂 Please upload your rental Excel file first.";
const MSG_TOO_LARGE: &str =
    "⚠️ Your data is too large. Try uploading fewer records or summarizing the file.";
const MSG_ANSWER_FAILED: &str = "❌ Sorry, I could not process that question right now.";
const MSG_NO_ANSWER: &str = "No answer found.";

const SUPPORTED_EXTENSIONS: [&str; 4] = ["xlsx", "xls", "xlsb", "ods"];
const SAMPLE_SIZE: usize = 3;

/// アシスタントの動作設定
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// コンテキストに含める最大レコード数
    pub context_limit: usize,
    /// 返信1メッセージの最大文字数
    pub max_message_len: usize,
    /// 応答生成の温度
    pub temperature: f32,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            context_limit: DEFAULT_CONTEXT_LIMIT,
            max_message_len: MAX_MESSAGE_LEN,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// アップロード成功時の概要
#[derive(Debug, Clone, PartialEq)]
pub struct UploadSummary {
    /// 抽出されたレコード数
    pub records: usize,
    /// ソース名（最初に出現した順、重複なし）
    pub sources: Vec<String>,
    /// 先頭数件のサンプル行
    pub samples: Vec<String>,
}

impl UploadSummary {
    /// 抽出結果から概要を作成
    pub fn from_entries(entries: &[RentalEntry]) -> Self {
        let mut sources: Vec<String> = Vec::new();
        for entry in entries {
            if !sources.contains(&entry.source) {
                sources.push(entry.source.clone());
            }
        }

        Self {
            records: entries.len(),
            sources,
            samples: entries.iter().take(SAMPLE_SIZE).map(sample_line).collect(),
        }
    }

    /// ユーザーへの返信文
    pub fn message(&self) -> String {
        format!(
            "✅ Parsed {} records.\n🏘️ Sources: {}\n📦 Sample:\n{}\n\n\
             💬 Now ask questions like:\n• Who hasn't paid?\n• Show total rent per source\n• List top defaulters",
            self.records,
            self.sources.join(", "),
            self.samples.join("\n")
        )
    }
}

/// アップロード処理の結果
#[derive(Debug)]
pub enum UploadOutcome {
    /// 抽出に成功し、スロットを置き換えた
    Stored(UploadSummary),
    /// ワークブックは読めたが、レコードが1件もなかった（スロットは変更しない）
    Empty,
    /// 対応していない拡張子
    Rejected,
    /// 抽出に失敗した（スロットは変更しない）
    Failed(RentsheetError),
}

impl UploadOutcome {
    /// ユーザーへの返信文
    pub fn message(&self) -> String {
        match self {
            UploadOutcome::Stored(summary) => summary.message(),
            UploadOutcome::Empty => MSG_NO_ENTRIES.to_string(),
            UploadOutcome::Rejected => MSG_INVALID_FILE.to_string(),
            UploadOutcome::Failed(_) => MSG_PARSE_FAILED.to_string(),
        }
    }
}

/// 家賃データについての質問に答えるアシスタント
///
/// # 使用例
///
/// ```rust,no_run
/// use rentsheet::{Assistant, ChatRequest, Extractor, RentsheetError};
///
/// let model = |_: &ChatRequest| -> Result<String, RentsheetError> { Ok("A1 owes 2500".to_string()) };
/// let assistant = Assistant::new(Extractor::default(), model);
///
/// for reply in assistant.handle_upload("rent.xlsx") {
///     println!("{}", reply);
/// }
/// for reply in assistant.handle_question("Who hasn't paid?") {
///     println!("{}", reply);
/// }
/// ```
#[derive(Debug)]
pub struct Assistant<M: ChatModel> {
    extractor: Extractor,
    model: M,
    slot: DatasetSlot,
    config: AssistantConfig,
}

impl<M: ChatModel> Assistant<M> {
    /// デフォルト設定でアシスタントを作成
    pub fn new(extractor: Extractor, model: M) -> Self {
        Self::with_config(extractor, model, AssistantConfig::default())
    }

    /// 設定を指定してアシスタントを作成
    pub fn with_config(extractor: Extractor, model: M, config: AssistantConfig) -> Self {
        Self {
            extractor,
            model,
            slot: DatasetSlot::new(),
            config,
        }
    }

    /// 最新アップロードのスロット
    pub fn slot(&self) -> &DatasetSlot {
        &self.slot
    }

    /// ワークブックを抽出し、成功した場合はスロットを置き換える
    pub fn upload<P: AsRef<Path>>(&self, path: P) -> UploadOutcome {
        let path = path.as_ref();
        if !is_supported_workbook(path) {
            log::debug!("Rejected upload with unsupported extension: {}", path.display());
            return UploadOutcome::Rejected;
        }

        match self.extractor.extract_path(path) {
            Ok(entries) if entries.is_empty() => {
                log::warn!("No rental entries found in {}", path.display());
                UploadOutcome::Empty
            }
            Ok(entries) => {
                let summary = UploadSummary::from_entries(&entries);
                self.slot.replace(entries);
                UploadOutcome::Stored(summary)
            }
            Err(e) => {
                log::error!("Failed to extract {}: {}", path.display(), e);
                UploadOutcome::Failed(e)
            }
        }
    }

    /// アップロードを処理し、返信メッセージ（分割済み）を返す
    pub fn handle_upload<P: AsRef<Path>>(&self, path: P) -> Vec<String> {
        self.reply(&self.upload(path).message())
    }

    /// 質問を処理し、返信メッセージ（分割済み）を返す
    pub fn handle_question(&self, question: &str) -> Vec<String> {
        let entries = self.slot.snapshot();
        if entries.is_empty() {
            return self.reply(MSG_UPLOAD_FIRST);
        }

        let answer = self.answer(question, &entries);
        self.reply(&format!("💬 {}", answer))
    }

    /// レコードをコンテキストとしてモデルに問い合わせ、回答文を返す
    ///
    /// モデルのエラーは利用者向けの定型文に変換されます。
    pub fn answer(&self, question: &str, entries: &[RentalEntry]) -> String {
        let context = build_context(entries, self.config.context_limit);
        let request = build_request(question, &context, self.config.temperature);

        match self.model.complete(&request) {
            Ok(text) if text.trim().is_empty() => MSG_NO_ANSWER.to_string(),
            Ok(text) => text.trim().to_string(),
            Err(RentsheetError::RequestTooLarge(detail)) => {
                log::warn!("Model rejected request as too large: {}", detail);
                MSG_TOO_LARGE.to_string()
            }
            Err(e) => {
                log::error!("Model request failed: {}", e);
                MSG_ANSWER_FAILED.to_string()
            }
        }
    }

    fn reply(&self, text: &str) -> Vec<String> {
        chunk_message(text, self.config.max_message_len)
    }
}

/// 拡張子がワークブックとして扱えるものかどうか（大文字小文字は区別しない）
fn is_supported_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}
