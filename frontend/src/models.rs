use serde::{Deserialize, Serialize};

/// A single conversation turn. Only the transcript tail is ever mutated,
/// and only while its role is `assistant` (see [`crate::sse`]).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: "assistant".to_string(), content: content.into() }
    }

    pub fn is_assistant(&self) -> bool {
        self.role == "assistant"
    }
}

/// Request body for the backend `/api/assist` proxy.
#[derive(Clone, Debug, Serialize)]
pub struct AssistRequest {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub messages: Vec<ChatMessage>,
}

/// Error body returned by the proxy on failure.
#[derive(Clone, Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct LegalSection {
    pub section: String,
    pub description: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct CasePrecedent {
    pub name: String,
    pub relevance: String,
}

/// Structured analysis produced for one case. Immutable once parsed;
/// replaced wholesale by a new analysis request.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub legal_sections: Vec<LegalSection>,
    pub punishment_range: String,
    pub presentation_strategy: String,
    pub case_precedents: Vec<CasePrecedent>,
    pub court_document: String,
}

/// Parses the completion content into an [`AnalysisResult`]. The model may
/// wrap the JSON in a markdown code fence, so fences are stripped before
/// parsing.
pub fn parse_analysis(content: &str) -> Result<AnalysisResult, serde_json::Error> {
    let cleaned = content.replace("```json", "").replace("```", "");
    serde_json::from_str(cleaned.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = r#"{
        "legalSections": [{"section": "IPC 302", "description": "Punishment for murder"}],
        "punishmentRange": "Life imprisonment or death",
        "presentationStrategy": "Establish motive and intent",
        "casePrecedents": [{"name": "Bachan Singh v. State of Punjab", "relevance": "Rarest of rare doctrine"}],
        "courtDocument": "IN THE COURT OF..."
    }"#;

    #[test]
    fn fenced_and_unfenced_content_parse_identically() {
        let fenced = format!("```json\n{RAW}\n```");
        let from_fenced = parse_analysis(&fenced).unwrap();
        let from_raw = parse_analysis(RAW).unwrap();
        assert_eq!(from_fenced, from_raw);
        assert_eq!(from_raw.legal_sections[0].section, "IPC 302");
        assert_eq!(from_raw.case_precedents[0].name, "Bachan Singh v. State of Punjab");
    }

    #[test]
    fn bare_fence_and_surrounding_whitespace_are_stripped() {
        let fenced = format!("\n```\n{RAW}\n```\n  ");
        assert_eq!(parse_analysis(&fenced).unwrap(), parse_analysis(RAW).unwrap());
    }

    #[test]
    fn malformed_content_is_a_parse_failure() {
        assert!(parse_analysis("The analysis follows: ...").is_err());
        assert!(parse_analysis("{\"legalSections\": []}").is_err());
    }
}
