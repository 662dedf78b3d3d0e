use tracing::error;

use crate::errors::AppError;
use crate::models::{AssistKind, ChatMessage};

const DEFAULT_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";
const DEFAULT_MODEL: &str = "google/gemini-3-flash-preview";

const CHAT_PREAMBLE: &str = "You are a senior Indian legal expert AI assistant. You have deep \
     knowledge of Indian Penal Code (IPC), Bharatiya Nyaya Sanhita (BNS), Code of Criminal \
     Procedure (CrPC), Bharatiya Nagarik Suraksha Sanhita (BNSS), Indian Evidence Act, \
     Bharatiya Sakshya Adhiniyam, and all major Indian legal statutes. You help lawyers with \
     case analysis, legal research, and strategy. Always cite specific sections and relevant \
     case law. Be precise, authoritative, and practical. Maintain context from the conversation.";

const ANALYZE_PREAMBLE: &str = "You are a senior Indian legal analysis AI. Given a case \
     description, case category, and offence type, provide a comprehensive structured analysis \
     in the following JSON format:\n\
     {\n\
     \x20 \"legalSections\": [{\"section\": \"section name\", \"description\": \"brief description\"}],\n\
     \x20 \"punishmentRange\": \"detailed punishment/sentence range description\",\n\
     \x20 \"presentationStrategy\": \"detailed court presentation strategy\",\n\
     \x20 \"casePrecedents\": [{\"name\": \"case name\", \"relevance\": \"how it's relevant\"}],\n\
     \x20 \"courtDocument\": \"A complete court-ready document brief including: Title, Facts of \
     the Case, Applicable Legal Provisions, Arguments, Prayer/Relief Sought, and Conclusion. \
     Format it professionally.\"\n\
     }\n\
     Respond ONLY with valid JSON. Be thorough, cite specific Indian legal sections (IPC/BNS), \
     and reference real landmark Indian case precedents.";

/// Thin client for the remote chat-completions gateway. The gateway is an
/// opaque OpenAI-style service: a leading system instruction, a `model`
/// field, bearer auth, and an optional `stream: true` flag.
#[derive(Clone)]
pub struct GatewayClient {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
    model: String,
}

impl GatewayClient {
    pub fn new(url: String, api_key: Option<String>, model: String) -> Self {
        Self { client: reqwest::Client::new(), url, api_key, model }
    }

    /// Reads `AI_GATEWAY_URL`, `AI_GATEWAY_API_KEY`, and `AI_GATEWAY_MODEL`.
    /// A missing credential is not fatal here; each request reports it so the
    /// user sees a descriptive configuration error.
    pub fn from_env() -> Self {
        let url =
            std::env::var("AI_GATEWAY_URL").unwrap_or_else(|_| DEFAULT_GATEWAY_URL.to_string());
        let api_key = std::env::var("AI_GATEWAY_API_KEY").ok();
        let model =
            std::env::var("AI_GATEWAY_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self::new(url, api_key, model)
    }

    fn preamble(kind: AssistKind) -> &'static str {
        match kind {
            AssistKind::Chat => CHAT_PREAMBLE,
            AssistKind::Analyze => ANALYZE_PREAMBLE,
        }
    }

    /// Builds the chat-completions body: system instruction first, then the
    /// caller's messages in order.
    fn build_body(&self, kind: AssistKind, messages: &[ChatMessage], stream: bool) -> serde_json::Value {
        let mut all = Vec::with_capacity(messages.len() + 1);
        all.push(ChatMessage::system(Self::preamble(kind)));
        all.extend(messages.iter().cloned());

        let mut body = serde_json::json!({
            "model": self.model,
            "messages": all,
        });
        if stream {
            body["stream"] = serde_json::json!(true);
        }
        body
    }

    async fn send(
        &self,
        kind: AssistKind,
        messages: &[ChatMessage],
        stream: bool,
    ) -> Result<reqwest::Response, AppError> {
        let api_key = self.api_key.as_ref().ok_or(AppError::MissingCredential)?;
        let body = self.build_body(kind, messages, stream);

        let response = self
            .client
            .post(&self.url)
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(AppError::GatewayUnreachable)?;

        let status = response.status().as_u16();
        if status == 429 {
            return Err(AppError::RateLimited);
        }
        if status == 402 {
            return Err(AppError::CreditsExhausted);
        }
        if !response.status().is_success() {
            let upstream_body = response.text().await.unwrap_or_default();
            error!("Gateway returned {status}: {upstream_body}");
            return Err(AppError::UpstreamFailure { status });
        }

        Ok(response)
    }

    /// One-shot completion for the analysis operation. The completion JSON is
    /// returned as-is; the frontend extracts and parses the embedded payload.
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<serde_json::Value, AppError> {
        let response = self.send(AssistKind::Analyze, messages, false).await?;
        response
            .json::<serde_json::Value>()
            .await
            .map_err(AppError::GatewayUnreachable)
    }

    /// Streaming chat turn. Returns the raw upstream response so the route can
    /// pipe its SSE body through verbatim.
    pub async fn stream(&self, messages: &[ChatMessage]) -> Result<reqwest::Response, AppError> {
        self.send(AssistKind::Chat, messages, true).await
    }
}
