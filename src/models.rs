use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// A single conversation turn as exchanged with both the frontend and the
/// gateway (OpenAI-style `{role, content}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }
}

/// Which of the two assistant operations the client is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssistKind {
    /// One-shot structured case analysis (non-streaming).
    Analyze,
    /// Follow-up chat turn (streamed back as SSE).
    Chat,
}

/// Request body for `POST /api/assist`.
#[derive(Debug, Deserialize)]
pub struct AssistRequest {
    #[serde(rename = "type")]
    pub kind: AssistKind,
    pub messages: Vec<ChatMessage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assist_request_parses_the_type_discriminator() {
        let req: AssistRequest = serde_json::from_str(
            r#"{"type":"analyze","messages":[{"role":"user","content":"A theft case"}]}"#,
        )
        .unwrap();
        assert_eq!(req.kind, AssistKind::Analyze);
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.messages[0].role, Role::User);

        let req: AssistRequest =
            serde_json::from_str(r#"{"type":"chat","messages":[]}"#).unwrap();
        assert_eq!(req.kind, AssistKind::Chat);
    }

    #[test]
    fn roles_serialize_lowercase() {
        let msg = ChatMessage::system("be precise");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "system");
        assert_eq!(json["content"], "be precise");
    }
}
