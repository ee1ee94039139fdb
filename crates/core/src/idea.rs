// crates/core/src/idea.rs

//! Prompt construction and the single chat call that produces an idea.

use tracing::info;

use crate::ai_client::{AiClient, ChatRequest};
use crate::error::PipelineError;
use crate::types::{IdeaText, VideoTitleList};

const PROMPT_HEADER: &str = "以下はあるYouTubeチャンネルの人気動画タイトルです：";

const PROMPT_INSTRUCTIONS: &str = "このチャンネルの傾向に合った、新しい動画ネタを1つ提案してください。
出力形式：
1. タイトル案（15文字以内）
2. 内容の狙いや補足（1文）
日本語でお願いします。";

/// Fixed instruction block with the titles listed one per line.
pub fn build_prompt(titles: &VideoTitleList) -> String {
    format!(
        "{}\n{}\n{}",
        PROMPT_HEADER,
        titles.joined(),
        PROMPT_INSTRUCTIONS
    )
}

pub struct IdeaGenerator<A: AiClient> {
    client: A,
}

impl<A: AiClient> IdeaGenerator<A> {
    pub fn new(client: A) -> Self {
        Self { client }
    }

    /// Ask the model for one idea and return its text untouched.
    pub fn generate(&self, titles: &VideoTitleList) -> Result<IdeaText, PipelineError> {
        let prompt = build_prompt(titles);
        info!(titles = titles.len(), prompt_chars = prompt.chars().count(), "requesting idea");

        let response = self
            .client
            .chat(ChatRequest::user(prompt))
            .map_err(|e| PipelineError::LlmRequest(format!("{:#}", e)))?;

        if response.choices.is_empty() {
            return Err(PipelineError::LlmRequest(
                "レスポンスに choices がありません".to_string(),
            ));
        }

        response
            .first_content()
            .map(str::to_string)
            .ok_or_else(|| PipelineError::LlmRequest("レスポンスに本文がありません".to_string()))
    }
}
