use gloo_net::http::{Request, Response};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::ReadableStreamDefaultReader;

use crate::models::{parse_analysis, AnalysisResult, AssistRequest, ChatMessage, ErrorBody};
use crate::sse::SseDecoder;

/// Base URL of the backend proxy.
const API_BASE: &str = "http://localhost:8080";

fn assist_url() -> String {
    format!("{API_BASE}/api/assist")
}

/// Prefer the proxy's `{"error": ...}` message (rate-limit and quota failures
/// arrive this way), falling back to a generic one.
async fn error_message(resp: Response, fallback: &str) -> String {
    match resp.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => fallback.to_string(),
    }
}

/// Sends the case prompt for one-shot analysis and parses the structured
/// result out of the completion content.
pub async fn analyze_case(prompt: &str) -> Result<AnalysisResult, String> {
    let body = AssistRequest { kind: "analyze", messages: vec![ChatMessage::user(prompt)] };

    let resp = Request::post(&assist_url())
        .json(&body)
        .map_err(|e| format!("Serialize error: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !resp.ok() {
        return Err(error_message(resp, "Analysis failed").await);
    }

    let completion: serde_json::Value =
        resp.json().await.map_err(|e| format!("Parse error: {e}"))?;
    let content = completion["choices"][0]["message"]["content"]
        .as_str()
        .unwrap_or_default();

    parse_analysis(content).map_err(|e| format!("Could not read the analysis: {e}"))
}

/// Sends a chat turn and decodes the SSE reply incrementally. `on_text` is
/// invoked with the full accumulated assistant text after every chunk that
/// carried at least one delta. Reading continues until the browser signals
/// end-of-stream, whether or not a `[DONE]` sentinel was seen.
pub async fn stream_chat(
    messages: Vec<ChatMessage>,
    mut on_text: impl FnMut(String),
) -> Result<(), String> {
    let body = AssistRequest { kind: "chat", messages };

    let resp = Request::post(&assist_url())
        .json(&body)
        .map_err(|e| format!("Serialize error: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !resp.ok() {
        return Err(error_message(resp, "Chat stream failed").await);
    }

    let stream = resp.body().ok_or_else(|| "Chat stream failed".to_string())?;
    let reader: ReadableStreamDefaultReader = stream
        .get_reader()
        .dyn_into()
        .map_err(|_| "Chat stream failed".to_string())?;

    let mut decoder = SseDecoder::new();
    loop {
        let result = JsFuture::from(reader.read())
            .await
            .map_err(|_| "Stream read failed".to_string())?;

        let done = js_sys::Reflect::get(&result, &"done".into())
            .ok()
            .and_then(|v| v.as_bool())
            .unwrap_or(true);
        if done {
            break;
        }

        let value = js_sys::Reflect::get(&result, &"value".into())
            .map_err(|_| "Stream read failed".to_string())?;
        let bytes = js_sys::Uint8Array::new(&value).to_vec();

        if !decoder.push_bytes(&bytes).is_empty() {
            on_text(decoder.accumulated().to_string());
        }
    }

    Ok(())
}
