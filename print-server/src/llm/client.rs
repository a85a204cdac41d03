//! Model HTTP Client
//!
//! Thin client for a Gemini-style `generateContent` REST endpoint. The
//! model answers JSON-in-text; extraction, fence stripping and coercion
//! happen here so handlers only ever see typed results.

use serde::Deserialize;
use serde_json::{Value, json};
use shared::models::{
    CalculationRequest, CalculationResult, ChatMessage, ChatReply, ChatResponseType, FileInfo,
    Product,
};
use tracing::{debug, warn};

use crate::core::Config;
use crate::utils::{AppError, AppResult};

use super::coerce::{coerce_calculation_result, strip_json_fence};
use super::prompt;

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

pub struct LlmClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl LlmClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
                .build()
                .unwrap_or_default(),
            api_url: config.llm_api_url.clone(),
            api_key: config.llm_api_key.clone(),
            model: config.llm_model.clone(),
        }
    }

    /// One `generateContent` round trip, returning the parsed JSON answer
    async fn generate(&self, prompt_text: String, file: Option<&FileInfo>) -> AppResult<Value> {
        let mut parts = vec![json!({ "text": prompt_text })];
        if let Some(file) = file {
            parts.push(json!({
                "inlineData": { "mimeType": file.mime_type, "data": file.data }
            }));
        }

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.api_url.trim_end_matches('/'),
            self.model,
            self.api_key
        );

        let resp = self
            .client
            .post(&url)
            .json(&json!({
                "contents": [{ "parts": parts }],
                "generationConfig": { "responseMimeType": "application/json" }
            }))
            .send()
            .await
            .map_err(|e| AppError::External(format!("Model service connection failed: {}", e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            warn!(target: "llm", %status, "model call failed");
            return Err(AppError::External(format!(
                "Model service returned {}: {}",
                status, text
            )));
        }

        let body: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| AppError::External(format!("Invalid model response: {}", e)))?;

        let text = body
            .candidates
            .and_then(|mut c| c.drain(..).next())
            .and_then(|c| c.content)
            .and_then(|c| c.parts)
            .and_then(|mut p| p.drain(..).next())
            .and_then(|p| p.text)
            .ok_or_else(|| AppError::External("Model returned no content".to_string()))?;

        debug!(target: "llm", bytes = text.len(), "model answer received");

        serde_json::from_str(strip_json_fence(&text))
            .map_err(|e| AppError::External(format!("Model returned malformed JSON: {}", e)))
    }

    /// Run one form-driven calculation through the model.
    ///
    /// The echoed request data always comes from the submitted form, never
    /// from the model's own restatement of it.
    pub async fn calculate(
        &self,
        request: &CalculationRequest,
        price_list: &str,
    ) -> AppResult<CalculationResult> {
        let prompt_text = prompt::calculation_prompt(request, price_list);
        let raw = self.generate(prompt_text, request.file.as_ref()).await?;
        let mut result = coerce_calculation_result(&raw)?;
        result.request_data = request.form.clone();
        Ok(result)
    }

    /// Run one chat turn through the model
    pub async fn chat(
        &self,
        history: &[ChatMessage],
        message: &str,
        price_list: &str,
        products: &[Product],
        file: Option<&FileInfo>,
    ) -> AppResult<ChatReply> {
        let prompt_text = prompt::chat_prompt(history, message, price_list, products, file);
        let raw = self.generate(prompt_text, file).await?;

        let text_response = raw
            .get("textResponse")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let response_type = match raw.get("responseType").and_then(Value::as_str) {
            Some("CALCULATIONS") => ChatResponseType::Calculations,
            _ => ChatResponseType::Text,
        };

        // All-or-nothing: a TEXT reply never carries partial calculations
        let calculation_results = match raw.get("calculationResults").and_then(Value::as_array) {
            Some(items) if !items.is_empty() && response_type == ChatResponseType::Calculations => {
                let mut results = Vec::with_capacity(items.len());
                for item in items {
                    results.push(coerce_calculation_result(item)?);
                }
                Some(results)
            }
            _ => None,
        };

        let suggested_actions = raw
            .get("suggestedActions")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .filter(|actions| !actions.is_empty());

        Ok(ChatReply {
            response_type,
            text_response,
            calculation_results,
            suggested_actions,
        })
    }
}
