use async_trait::async_trait;
use eyre::{Result, bail};
use log::debug;

use crate::PipelineError;
use crate::oembed::VideoInfo;
use crate::youtube::Transcript;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-16k";

/// Transcripts longer than this many characters are rejected before the model is called
pub const DEFAULT_MAX_PROMPT_CHARS: usize = 60_000;

const SYSTEM_PROMPT: &str = "You are a helpful assistant that summarizes YouTube video transcripts. \
Answer in a point-wise manner: capture the key points, main arguments, and important details \
as bullet points.";

const TEMPERATURE: f64 = 0.7;

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";

/// A chat-completion backend: one system instruction, one user prompt, text back
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String>;
}

fn is_anthropic_model(model: &str) -> bool {
    model.starts_with("claude")
}

/// Name of the environment variable holding the API key for `model`
pub fn api_key_var(model: &str) -> &'static str {
    if is_anthropic_model(model) {
        "ANTHROPIC_API_KEY"
    } else {
        "OPENAI_API_KEY"
    }
}

/// Read the API key for `model`; called once at startup
pub fn api_key_from_env(model: &str) -> Option<String> {
    std::env::var(api_key_var(model)).ok().filter(|k| !k.trim().is_empty())
}

/// Calls the OpenAI or Anthropic HTTP API depending on the model name
pub struct LlmClient {
    client: reqwest::Client,
    model: String,
    api_key: Option<String>,
    base_url: String,
}

impl LlmClient {
    pub fn new(client: reqwest::Client, model: impl Into<String>, api_key: Option<String>) -> Self {
        let model = model.into();
        let base_url = if is_anthropic_model(&model) {
            ANTHROPIC_BASE_URL
        } else {
            OPENAI_BASE_URL
        };
        Self {
            client,
            model,
            api_key,
            base_url: base_url.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn api_key(&self) -> Result<&str> {
        match self.api_key.as_deref() {
            Some(key) => Ok(key),
            None => bail!(
                "{} environment variable not set (required for summarization with {})",
                api_key_var(&self.model),
                self.model
            ),
        }
    }

    async fn complete_anthropic(&self, system: &str, prompt: &str) -> Result<String> {
        let api_key = self.api_key()?;
        debug!("Summarizing via Anthropic API with model {}", self.model);

        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": 4096,
            "temperature": TEMPERATURE,
            "system": system,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ]
        });

        let resp = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", api_key)
            .header("anthropic-version", "2023-06-01")
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("Anthropic API returned {status}: {body}");
        }

        let json: serde_json::Value = resp.json().await?;
        extract_anthropic_text(&json)
    }

    async fn complete_openai(&self, system: &str, prompt: &str) -> Result<String> {
        let api_key = self.api_key()?;
        debug!("Summarizing via OpenAI API with model {}", self.model);

        let body = serde_json::json!({
            "model": self.model,
            "temperature": TEMPERATURE,
            "messages": [
                {
                    "role": "system",
                    "content": system
                },
                {
                    "role": "user",
                    "content": prompt
                }
            ]
        });

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("OpenAI API returned {status}: {body}");
        }

        let json: serde_json::Value = resp.json().await?;
        extract_openai_text(&json)
    }
}

#[async_trait]
impl ChatModel for LlmClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String> {
        if is_anthropic_model(&self.model) {
            self.complete_anthropic(system, prompt).await
        } else {
            self.complete_openai(system, prompt).await
        }
    }
}

fn extract_anthropic_text(json: &serde_json::Value) -> Result<String> {
    if let Some(content) = json.get("content").and_then(|c| c.as_array()) {
        let text: String = content
            .iter()
            .filter_map(|block| {
                if block.get("type")?.as_str()? == "text" {
                    block.get("text")?.as_str().map(|s| s.to_string())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("");
        if !text.is_empty() {
            return Ok(text);
        }
    }
    bail!("unexpected Anthropic API response format");
}

fn extract_openai_text(json: &serde_json::Value) -> Result<String> {
    if let Some(text) = json
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|t| t.as_str())
    {
        return Ok(text.to_string());
    }
    bail!("unexpected OpenAI API response format");
}

/// User prompt embedding title, author and the full transcript verbatim
pub fn build_prompt(info: &VideoInfo, transcript: &Transcript) -> String {
    format!(
        "Please summarize the following YouTube video transcript:\nTitle: {}\nAuthor: {}\nTranscript: {}",
        info.title,
        info.author,
        transcript.as_str()
    )
}

pub struct Summarizer {
    model: Box<dyn ChatModel>,
    max_prompt_chars: usize,
}

impl Summarizer {
    /// `max_prompt_chars` of 0 disables the transcript length check
    pub fn new(model: Box<dyn ChatModel>, max_prompt_chars: usize) -> Self {
        Self {
            model,
            max_prompt_chars,
        }
    }

    /// Summarize a transcript using an LLM
    pub async fn summarize(&self, info: &VideoInfo, transcript: &Transcript) -> Result<String, PipelineError> {
        let chars = transcript.char_count();
        if self.max_prompt_chars > 0 && chars > self.max_prompt_chars {
            return Err(PipelineError::SummaryGenerationFailed(format!(
                "transcript is {chars} characters, over the {} character limit",
                self.max_prompt_chars
            )));
        }

        let prompt = build_prompt(info, transcript);
        let summary = self
            .model
            .complete(SYSTEM_PROMPT, &prompt)
            .await
            .map_err(|e| PipelineError::SummaryGenerationFailed(format!("{e:#}")))?;

        if summary.trim().is_empty() {
            return Err(PipelineError::SummaryGenerationFailed(
                "model returned an empty response".to_string(),
            ));
        }
        Ok(summary)
    }
}
