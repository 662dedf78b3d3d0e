use leptos::prelude::*;

use crate::models::AnalysisResult;
use crate::state::AppState;

/// The five analysis cards: sections, sentence range, strategy, precedents,
/// and the court-document teaser.
#[component]
pub fn AnalysisCards(data: AnalysisResult) -> impl IntoView {
    let state = expect_context::<AppState>();
    let on_view_document = move |_| state.set_show_document.set(true);

    view! {
        <div class="analysis-grid">
            <AnalysisCard number=1 title="Applicable Legal Sections">
                <ul>
                    {data
                        .legal_sections
                        .iter()
                        .map(|s| view! { <li>"• " {s.section.clone()} " – " {s.description.clone()}</li> })
                        .collect_view()}
                </ul>
            </AnalysisCard>

            <AnalysisCard number=2 title="Punishment / Sentence Range">
                <p>{data.punishment_range.clone()}</p>
            </AnalysisCard>

            <AnalysisCard number=3 title="Court Presentation Strategy">
                <p>{data.presentation_strategy.clone()}</p>
            </AnalysisCard>

            <AnalysisCard number=4 title="Relevant Case Precedents">
                <ul>
                    {data
                        .case_precedents
                        .iter()
                        .map(|c| view! { <li>"• " {c.name.clone()} " – " {c.relevance.clone()}</li> })
                        .collect_view()}
                </ul>
            </AnalysisCard>

            <AnalysisCard number=5 title="Court-Ready Documentation">
                <p>
                    "Auto-generated brief with headings, facts, legal grounds, and prayer clause (PDF export ready)."
                </p>
                <button class="view-document-btn" on:click=on_view_document>
                    "View Full Document →"
                </button>
            </AnalysisCard>
        </div>
    }
}

#[component]
fn AnalysisCard(number: u8, title: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="analysis-card">
            <h3>{number.to_string()} ". " {title}</h3>
            {children()}
        </div>
    }
}
