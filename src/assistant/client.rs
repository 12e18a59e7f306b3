//! Chat Model Client
//!
//! 質問応答に使う言語モデルの抽象（`ChatModel`）と、
//! OpenAI互換のチャット補完APIを叩くGroqクライアント（`groq`フィーチャー）を提供する。

use crate::assistant::prompt::ChatRequest;
use crate::error::RentsheetError;

/// 質問応答モデル
///
/// リクエストを受け取り、生成されたテキストを返します。
/// テストやオフライン利用では、クロージャをそのままモデルとして渡せます。
///
/// ```rust
/// use rentsheet::{ChatModel, ChatRequest, RentsheetError};
///
/// let model = |_: &ChatRequest| -> Result<String, RentsheetError> { Ok("A1 owes 2500".to_string()) };
/// let request = ChatRequest { messages: Vec::new(), temperature: 0.3 };
/// assert_eq!(model.complete(&request).unwrap(), "A1 owes 2500");
/// ```
pub trait ChatModel {
    fn complete(&self, request: &ChatRequest) -> Result<String, RentsheetError>;
}

impl<F> ChatModel for F
where
    F: Fn(&ChatRequest) -> Result<String, RentsheetError>,
{
    fn complete(&self, request: &ChatRequest) -> Result<String, RentsheetError> {
        self(request)
    }
}

#[cfg(feature = "groq")]
pub use groq::{GroqClient, GroqConfig};

#[cfg(feature = "groq")]
mod groq {
    use std::time::Duration;

    use serde::{Deserialize, Serialize};

    use super::ChatModel;
    use crate::assistant::prompt::{ChatMessage, ChatRequest};
    use crate::error::RentsheetError;

    const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
    const DEFAULT_MODEL: &str = "llama3-8b-8192";
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Groq APIの接続設定
    #[derive(Debug, Clone)]
    pub struct GroqConfig {
        pub api_key: String,
        pub base_url: String,
        pub model: String,
    }

    impl GroqConfig {
        /// APIキーだけを指定し、その他は既定値で設定を作成
        pub fn new(api_key: impl Into<String>) -> Self {
            Self {
                api_key: api_key.into(),
                base_url: DEFAULT_BASE_URL.to_string(),
                model: DEFAULT_MODEL.to_string(),
            }
        }

        /// 環境変数から設定を読み込む
        ///
        /// `GROQ_API_KEY`は必須です。`GROQ_BASE_URL`と`GROQ_MODEL`は省略できます。
        ///
        /// # 戻り値
        ///
        /// * `Err(RentsheetError::Config)` - `GROQ_API_KEY`が未設定または空の場合
        pub fn from_env() -> Result<Self, RentsheetError> {
            let api_key = std::env::var("GROQ_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty())
                .ok_or_else(|| RentsheetError::Config("GROQ_API_KEY is not set".to_string()))?;

            let mut config = Self::new(api_key);
            if let Ok(base_url) = std::env::var("GROQ_BASE_URL") {
                config.base_url = base_url;
            }
            if let Ok(model) = std::env::var("GROQ_MODEL") {
                config.model = model;
            }
            Ok(config)
        }
    }

    #[derive(Serialize)]
    struct CompletionBody<'a> {
        model: &'a str,
        messages: &'a [ChatMessage],
        temperature: f32,
    }

    #[derive(Deserialize)]
    struct CompletionResponse {
        #[serde(default)]
        choices: Vec<Choice>,
    }

    #[derive(Deserialize)]
    struct Choice {
        message: ChoiceMessage,
    }

    #[derive(Deserialize)]
    struct ChoiceMessage {
        #[serde(default)]
        content: Option<String>,
    }

    /// Groqのチャット補完APIクライアント（ブロッキング）
    #[derive(Debug)]
    pub struct GroqClient {
        client: reqwest::blocking::Client,
        config: GroqConfig,
    }

    impl GroqClient {
        /// 設定からクライアントを作成
        pub fn new(config: GroqConfig) -> Result<Self, RentsheetError> {
            let client = reqwest::blocking::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .map_err(|e| RentsheetError::Model(format!("failed to create HTTP client: {}", e)))?;

            Ok(Self { client, config })
        }

        /// 環境変数の設定からクライアントを作成
        pub fn from_env() -> Result<Self, RentsheetError> {
            Self::new(GroqConfig::from_env()?)
        }

        fn endpoint(&self) -> String {
            format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
        }
    }

    impl ChatModel for GroqClient {
        fn complete(&self, request: &ChatRequest) -> Result<String, RentsheetError> {
            let body = CompletionBody {
                model: &self.config.model,
                messages: &request.messages,
                temperature: request.temperature,
            };

            let response = self
                .client
                .post(self.endpoint())
                .bearer_auth(&self.config.api_key)
                .json(&body)
                .send()
                .map_err(|e| RentsheetError::Model(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                let text = response.text().unwrap_or_default();
                if status == reqwest::StatusCode::PAYLOAD_TOO_LARGE
                    || text.contains("Request too large")
                {
                    return Err(RentsheetError::RequestTooLarge(text));
                }
                return Err(RentsheetError::Model(format!("HTTP {}: {}", status, text)));
            }

            let parsed: CompletionResponse = response
                .json()
                .map_err(|e| RentsheetError::Model(e.to_string()))?;

            Ok(parsed
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .unwrap_or_default())
        }
    }

}
