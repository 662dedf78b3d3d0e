use leptos::prelude::*;

use crate::state::{can_submit, AppState};

const CASE_CATEGORIES: [&str; 10] = [
    "Criminal",
    "Civil",
    "Constitutional",
    "Family",
    "Cyber Crime",
    "Property",
    "Labour",
    "Consumer",
    "Environmental",
    "Corporate",
];

const OFFENCE_TYPES: [&str; 12] = [
    "Murder / Homicide",
    "Theft / Robbery",
    "Fraud / Cheating",
    "Assault / Battery",
    "Kidnapping / Abduction",
    "Sexual Offence",
    "Drug Offence",
    "Corruption",
    "Defamation",
    "Breach of Trust",
    "Domestic Violence",
    "Dowry Related",
];

/// Case notepad: free-text description plus optional category and offence
/// filters. Submitting kicks off a fresh analysis.
#[component]
pub fn CaseNotepad() -> impl IntoView {
    let state = expect_context::<AppState>();
    let is_analyzing = state.is_analyzing;

    let (description, set_description) = signal(String::new());
    let (category, set_category) = signal(String::new());
    let (offence, set_offence) = signal(String::new());

    let is_loading = move || is_analyzing.get();

    let on_analyze = move |_| {
        state.analyze_case(description.get(), category.get(), offence.get());
    };

    let on_reset = move |_| {
        set_description.set(String::new());
        set_category.set(String::new());
        set_offence.set(String::new());
    };

    view! {
        <section class="case-notepad">
            <div>
                <h2>"Case Notepad"</h2>
                <p class="hint">
                    "Describe the case briefly (max two sentences). Select filters to narrow legal accuracy."
                </p>
            </div>

            <textarea
                placeholder="Example: A person intentionally caused the death of another individual due to personal enmity."
                prop:value=description
                on:input=move |ev| set_description.set(event_target_value(&ev))
                disabled=is_loading
            />

            <div class="filter-row">
                <select
                    prop:value=category
                    on:change=move |ev| set_category.set(event_target_value(&ev))
                    disabled=is_loading
                >
                    <option value="">"Case Category"</option>
                    {CASE_CATEGORIES
                        .iter()
                        .map(|c| view! { <option value=*c>{*c}</option> })
                        .collect_view()}
                </select>

                <select
                    prop:value=offence
                    on:change=move |ev| set_offence.set(event_target_value(&ev))
                    disabled=is_loading
                >
                    <option value="">"Offence Type"</option>
                    {OFFENCE_TYPES
                        .iter()
                        .map(|o| view! { <option value=*o>{*o}</option> })
                        .collect_view()}
                </select>

                <button
                    class="analyze-btn"
                    on:click=on_analyze
                    disabled=move || !can_submit(&description.get(), is_loading())
                >
                    {move || if is_loading() { "Analyzing…" } else { "Analyze Case" }}
                </button>
            </div>

            <button class="reset-btn" on:click=on_reset>
                "Reset"
            </button>
        </section>
    }
}
