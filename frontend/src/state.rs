use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::models::{AnalysisResult, ChatMessage};
use crate::sse::apply_assistant_text;

/// Shared session state, provided via Leptos context. All transitions go
/// through the methods below; views only read the signals.
#[derive(Clone)]
pub struct AppState {
    // --- Read signals (for components to subscribe to) ---
    pub analysis: ReadSignal<Option<AnalysisResult>>,
    pub is_analyzing: ReadSignal<bool>,
    pub messages: ReadSignal<Vec<ChatMessage>>,
    pub is_chat_loading: ReadSignal<bool>,
    pub show_document: ReadSignal<bool>,
    pub error: ReadSignal<Option<String>>,

    // --- Write signals (for mutating state) ---
    set_analysis: WriteSignal<Option<AnalysisResult>>,
    set_is_analyzing: WriteSignal<bool>,
    set_messages: WriteSignal<Vec<ChatMessage>>,
    set_is_chat_loading: WriteSignal<bool>,
    pub set_show_document: WriteSignal<bool>,
    set_error: WriteSignal<Option<String>>,

    /// Prompt built from the last analysed case; context for chat turns.
    case_context: ReadSignal<String>,
    set_case_context: WriteSignal<String>,
}

impl AppState {
    /// Create a new `AppState` and provide it in the current Leptos context.
    pub fn provide() -> Self {
        let state = Self::new();
        provide_context(state.clone());
        state
    }

    fn new() -> Self {
        let (analysis, set_analysis) = signal(None::<AnalysisResult>);
        let (is_analyzing, set_is_analyzing) = signal(false);
        let (messages, set_messages) = signal(Vec::<ChatMessage>::new());
        let (is_chat_loading, set_is_chat_loading) = signal(false);
        let (show_document, set_show_document) = signal(false);
        let (error, set_error) = signal(None::<String>);
        let (case_context, set_case_context) = signal(String::new());

        Self {
            analysis,
            is_analyzing,
            messages,
            is_chat_loading,
            show_document,
            error,
            set_analysis,
            set_is_analyzing,
            set_messages,
            set_is_chat_loading,
            set_show_document,
            set_error,
            case_context,
            set_case_context,
        }
    }

    /// Synchronous prefix of a new analysis: the stale result and chat
    /// transcript are cleared and any open document view is hidden before
    /// the request goes out.
    fn begin_analysis(&self) {
        self.set_is_analyzing.set(true);
        self.set_analysis.set(None);
        self.set_messages.set(Vec::new());
        self.set_show_document.set(false);
        self.set_error.set(None);
    }

    /// Submits the case for analysis. A blank description is a no-op: no
    /// request leaves the browser. Starting a new analysis replaces the
    /// prior result, clears the chat transcript, and hides the document
    /// view. An in-flight chat request is not cancelled; if it resolves
    /// afterwards its text lands in the fresh transcript, matching the
    /// unguarded single-session model.
    pub fn analyze_case(&self, description: String, category: String, offence: String) {
        if !can_submit(&description, self.is_analyzing.get_untracked()) {
            return;
        }
        let description = description.trim().to_string();

        self.begin_analysis();

        let prompt = build_case_prompt(&description, &category, &offence);
        self.set_case_context.set(prompt.clone());

        let set_analysis = self.set_analysis;
        let set_is_analyzing = self.set_is_analyzing;
        let set_error = self.set_error;

        spawn_local(async move {
            match api::analyze_case(&prompt).await {
                Ok(result) => set_analysis.set(Some(result)),
                Err(e) => {
                    log::error!("Analysis failed: {e}");
                    set_error.set(Some(e));
                }
            }
            set_is_analyzing.set(false);
        });
    }

    /// Sends a follow-up chat turn. The gateway reply streams in and the
    /// transcript tail is rewritten on each update; text already streamed
    /// stays in place if the request later fails.
    pub fn send_chat_message(&self, input: String) {
        if !can_submit(&input, self.is_chat_loading.get_untracked()) {
            return;
        }
        let input = input.trim().to_string();

        self.set_messages.update(|msgs| msgs.push(ChatMessage::user(input)));
        self.set_is_chat_loading.set(true);
        self.set_error.set(None);

        let context = ChatMessage::user(build_chat_context(
            &self.case_context.get_untracked(),
            self.analysis.get_untracked().as_ref(),
        ));
        let mut payload = vec![context];
        payload.extend(self.messages.get_untracked());

        let set_messages = self.set_messages;
        let set_is_chat_loading = self.set_is_chat_loading;
        let set_error = self.set_error;

        spawn_local(async move {
            let outcome = api::stream_chat(payload, move |text| {
                set_messages.update(|msgs| apply_assistant_text(msgs, &text));
            })
            .await;

            if let Err(e) = outcome {
                log::error!("Chat failed: {e}");
                set_error.set(Some(e));
            }
            set_is_chat_loading.set(false);
        });
    }
}

/// Whether a submission may go out: non-blank text and no request already
/// in flight. Also drives the disabled state of the submit controls.
pub fn can_submit(text: &str, busy: bool) -> bool {
    !text.trim().is_empty() && !busy
}

/// Builds the case prompt from the description plus optional filters. The
/// result doubles as the immutable case context for later chat turns.
pub fn build_case_prompt(description: &str, category: &str, offence: &str) -> String {
    let mut prompt = format!("Case Description: {description}");
    if !category.is_empty() {
        prompt.push_str(&format!("\nCase Category: {category}"));
    }
    if !offence.is_empty() {
        prompt.push_str(&format!("\nOffence Type: {offence}"));
    }
    prompt
}

/// The leading context message sent with every chat turn: the original case
/// prompt plus the structured analysis the conversation refers back to.
pub fn build_chat_context(case_context: &str, analysis: Option<&AnalysisResult>) -> String {
    let analysis_json = analysis
        .and_then(|a| serde_json::to_string_pretty(a).ok())
        .unwrap_or_else(|| "null".to_string());
    format!("Context from case analysis:\n{case_context}\n\nAnalysis results:\n{analysis_json}")
}
