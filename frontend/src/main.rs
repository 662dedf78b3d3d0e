mod api;
mod components;
mod models;
mod sse;
mod state;

use leptos::mount::mount_to_body;
use leptos::prelude::*;

use components::analysis::AnalysisCards;
use components::case_form::CaseNotepad;
use components::chat::ChatPanel;
use components::document::DocumentModal;
use state::AppState;

/// Root application component.
#[component]
fn App() -> impl IntoView {
    let state = AppState::provide();
    let error = state.error;
    let is_analyzing = state.is_analyzing;
    let analysis = state.analysis;
    let show_document = state.show_document;

    view! {
        <div class="app-container">
            <header class="workspace-header">
                <h1>"Legal Intelligence Workspace"</h1>
                <div class="badges">
                    <span class="badge">"India"</span>
                    <span class="badge">"Laws"</span>
                    <span class="badge">"AI-Assisted"</span>
                </div>
            </header>

            // Error banner
            {move || {
                error.get().map(|err| {
                    view! { <div class="error-banner">{err}</div> }
                })
            }}

            <main class="workspace-main">
                <CaseNotepad />

                {move || {
                    is_analyzing.get().then(|| {
                        view! {
                            <div class="analyzing-indicator">
                                <span class="spinner" />
                                "Analyzing case with AI..."
                            </div>
                        }
                    })
                }}

                {move || {
                    analysis.get().map(|data| {
                        view! {
                            <AnalysisCards data=data.clone() />
                            <ChatPanel />
                        }
                    })
                }}

                {move || {
                    show_document.get().then(|| {
                        analysis.get().map(|data| {
                            view! { <DocumentModal document=data.court_document.clone() /> }
                        })
                    })
                }}
            </main>

            <footer class="workspace-footer">
                <p>"Prototype • Government Law Sources • Cloud Ready • Built for Lawyers"</p>
            </footer>
        </div>
    }
}

fn main() {
    console_log::init_with_level(log::Level::Debug).expect("Failed to init logger");
    mount_to_body(App);
}
