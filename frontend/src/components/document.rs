use leptos::prelude::*;

use crate::state::AppState;

const PRINT_STYLE: &str = "body{font-family:Georgia,serif;max-width:800px;margin:40px auto;\
     padding:20px;line-height:1.8;color:#1a1a1a}h1,h2,h3{margin-top:24px}\
     h1{text-align:center;border-bottom:2px solid #333;padding-bottom:10px}";

/// Modal overlay showing the generated court document, with an export action
/// that hands the text to a print-ready browser window.
#[component]
pub fn DocumentModal(document: String) -> impl IntoView {
    let state = expect_context::<AppState>();
    let set_show_document = state.set_show_document;
    let on_close = move |_| set_show_document.set(false);

    let content = document.clone();
    let on_export = move |_| {
        if let Err(e) = export_document(&content) {
            log::error!("Document export failed: {e:?}");
        }
    };

    view! {
        <div class="modal-overlay" on:click=on_close>
            <div class="modal" on:click=|ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h2>"Court-Ready Document"</h2>
                    <div class="modal-actions">
                        <button class="export-btn" on:click=on_export>
                            "Export / Print"
                        </button>
                        <button class="close-btn" on:click=on_close>
                            "Close"
                        </button>
                    </div>
                </div>
                <div class="modal-body">
                    <pre class="document-text">{document}</pre>
                </div>
            </div>
        </div>
    }
}

/// Opens a blank window, writes a print-styled rendition of the document,
/// and triggers the browser print action. Popup blockers may refuse the
/// window; that simply aborts the export.
fn export_document(content: &str) -> Result<(), wasm_bindgen::JsValue> {
    let Some(window) = web_sys::window() else {
        return Ok(());
    };
    let Some(print_window) = window.open_with_url_and_target("", "_blank")? else {
        return Ok(());
    };
    let Some(root) = print_window.document().and_then(|d| d.document_element()) else {
        return Ok(());
    };

    let html = format!(
        "<head><title>Court-Ready Document</title><style>{PRINT_STYLE}</style></head>\
         <body>{}</body>",
        content.replace('\n', "<br/>")
    );
    root.set_inner_html(&html);
    print_window.print()?;
    Ok(())
}
