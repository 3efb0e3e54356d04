use gloo_file::File as GlooFile;
use gloo_net::http::Request;
use serde_json::Value;
use shared::{Classified, HistoryEntry, Modality, ResultBlock, classify, result_blocks};
use thiserror::Error;

use crate::config;

/// Failure modes of one submission attempt.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum PredictError {
    #[error("Network error: {0}")]
    Transport(String),
    #[error("{}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("Unexpected response format")]
    Format,
}

impl PredictError {
    /// Displayable lines, one per batched validation entry.
    pub fn lines(&self) -> Vec<String> {
        match self {
            PredictError::Validation(messages) => messages.clone(),
            other => vec![other.to_string()],
        }
    }
}

/// Posts the set slots as multipart form data and reduces the reply to
/// renderable blocks.
pub async fn submit_prediction(
    modality: Modality,
    slots: Vec<(&'static str, GlooFile)>,
) -> Result<Vec<ResultBlock>, PredictError> {
    let form_data = web_sys::FormData::new()
        .map_err(|_| PredictError::Transport("Failed to build form data".to_string()))?;
    for (name, file) in &slots {
        // The blob is the underlying JS File, so its filename travels along.
        form_data
            .append_with_blob(name, file.as_ref())
            .map_err(|_| PredictError::Transport(format!("Failed to attach field {name}")))?;
    }

    let url = format!("{}/predict/{}", config::api_base(), modality);
    let request = Request::post(&url)
        .body(form_data)
        .map_err(|e| PredictError::Transport(e.to_string()))?;

    let response = request
        .send()
        .await
        .map_err(|e| PredictError::Transport(e.to_string()))?;

    let payload = response.json::<Value>().await;

    if !response.ok() {
        // 4xx/5xx replies still carry an error payload worth surfacing.
        if let Ok(payload) = &payload {
            if let Classified::Error(error) = classify(modality, payload) {
                return Err(PredictError::Validation(error.messages));
            }
        }
        return Err(PredictError::Transport(format!(
            "Server returned status {}",
            response.status()
        )));
    }

    let payload = payload.map_err(|e| {
        log::error!("Failed to parse response: {e}");
        PredictError::Format
    })?;

    match classify(modality, &payload) {
        Classified::Error(error) => Err(PredictError::Validation(error.messages)),
        Classified::Malformed => Err(PredictError::Format),
        success => Ok(result_blocks(&success)),
    }
}

/// Fetches the full prediction history. Callers treat a failure as
/// non-blocking.
pub async fn fetch_history() -> Result<Vec<HistoryEntry>, String> {
    let url = format!("{}/predictions", config::api_base());
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("History fetch failed: {e}"))?;

    if !response.ok() {
        return Err(format!(
            "History fetch failed: server returned status {}",
            response.status()
        ));
    }

    response
        .json::<Vec<HistoryEntry>>()
        .await
        .map_err(|e| format!("History fetch failed: {e}"))
}
