//! Prompt Construction
//!
//! 抽出済みレコードから質問応答用のコンテキストとチャットリクエストを組み立てる。

use serde::{Deserialize, Serialize};

use crate::formatter::context_line;
use crate::types::RentalEntry;

/// コンテキストに含める最大レコード数（既定値）
pub const DEFAULT_CONTEXT_LIMIT: usize = 50;

/// 応答生成の温度（既定値）
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

const SYSTEM_PROMPT: &str =
    "You are a rental assistant AI helping a landlord analyze tenant data. Use this context:\n";

/// メッセージの送り手
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// チャットメッセージ1件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// モデルに渡すリクエスト
///
/// モデル名やエンドポイントは`ChatModel`実装側の責務で、ここには含めません。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

/// 先頭`limit`件のレコードをコンテキスト行に変換する
///
/// 1レコード1行で、行の形式は`OutputFormat::Context`と同じです。
///
/// # 使用例
///
/// ```rust
/// use rentsheet::{build_context, RentalEntry, SheetType};
///
/// let entry = RentalEntry {
///     source: "JAN SUMMARY".to_string(),
///     sheet_type: SheetType::Summary,
///     unit: "A1".to_string(),
///     tenant: None,
///     month: "JAN".to_string(),
///     expected_rent: 5000.0,
///     amount_paid: 2500.0,
///     balance: 2500.0,
///     water: None,
/// };
///
/// let context = build_context(&[entry], 50);
/// assert!(context.starts_with("Source: JAN SUMMARY, Unit: A1"));
/// ```
pub fn build_context(entries: &[RentalEntry], limit: usize) -> String {
    entries
        .iter()
        .take(limit)
        .map(context_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// 質問とコンテキストからリクエストを組み立てる
pub fn build_request(question: &str, context: &str, temperature: f32) -> ChatRequest {
    ChatRequest {
        messages: vec![
            ChatMessage::system(format!("{}{}", SYSTEM_PROMPT, context)),
            ChatMessage::user(question),
        ],
        temperature,
    }
}
