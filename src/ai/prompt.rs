//! Persona prompt and the model's request/response wire shapes.

use serde::{Deserialize, Serialize};

use crate::errors::WatchError;

pub const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";
pub const MAX_OUTPUT_TOKENS: u32 = 256;

pub const SYSTEM_PROMPT: &str = "あなたは「アップデート見張りマン」です。口調は少しぶっきらぼうですが、仕事はできるエージェントです。\
ユーザーの質問には、最新の情報をもとに要点だけを簡潔に答えてください。\
次の制約を必ず守ってください。\
・応答はすべて日本語で行う。\
・要点を短くまとめる。\
・長文の応答は避ける。";

/// Sent to the user whenever the model cannot be reached or fails.
pub const APOLOGY_REPLY: &str = "申し訳ありません、現在AIとの通信に問題が発生しています。";

/// Used when the model answers without any text block.
pub const EMPTY_REPLY: &str = "（応答がありませんでした）";

#[derive(Debug, Serialize)]
pub struct ModelRequest<'a> {
    pub anthropic_version: &'static str,
    pub max_tokens: u32,
    pub system: &'static str,
    pub messages: Vec<ModelMessage<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ModelMessage<'a> {
    pub role: &'static str,
    pub content: Vec<TextBlock<'a>>,
}

#[derive(Debug, Serialize)]
pub struct TextBlock<'a> {
    pub r#type: &'static str,
    pub text: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ModelResponse {
    #[serde(default)]
    pub content: Vec<ResponseBlock>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseBlock {
    #[serde(default)]
    pub text: Option<String>,
}

#[must_use]
pub fn build_request(user_text: &str) -> ModelRequest<'_> {
    ModelRequest {
        anthropic_version: ANTHROPIC_VERSION,
        max_tokens: MAX_OUTPUT_TOKENS,
        system: SYSTEM_PROMPT,
        messages: vec![ModelMessage {
            role: "user",
            content: vec![TextBlock {
                r#type: "text",
                text: user_text,
            }],
        }],
    }
}

/// Pulls the generated text out of the first content block.
///
/// # Errors
///
/// Returns `ModelInvocationError` if the body is not the expected JSON.
pub fn parse_response(body: &[u8]) -> Result<String, WatchError> {
    let response: ModelResponse = serde_json::from_slice(body)
        .map_err(|e| WatchError::ModelInvocationError(format!("invalid response body: {e}")))?;

    Ok(response
        .content
        .into_iter()
        .next()
        .and_then(|block| block.text)
        .unwrap_or_else(|| EMPTY_REPLY.to_string()))
}
