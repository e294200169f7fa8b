//! Upload widget with drag & drop support.
//!
//! Handles file selection, concurrent upload and the status message. What is
//! displayed comes from [`WidgetView`]; this component only wires DOM events
//! to [`WidgetEvent`]s and starts the dispatcher.

use dropload::view::{ADD_MORE_LABEL, CLEAR_LABEL, HEADING};
use dropload::{dispatch, UploadEvent, WidgetView};
use leptos::ev::DragEvent;
use leptos::*;
use web_sys::{Event, HtmlInputElement};

use crate::components::ProgressList;
use crate::config::upload_config;
use crate::services::XhrTransport;
use crate::types::{files_from_list, WidgetEvent, WidgetState};

#[component]
pub fn UploadWidget() -> impl IntoView {
    let config = upload_config();
    let state = create_rw_signal(WidgetState::new(config.settle_policy));
    let view_model = create_memo(move |_| state.with(|s| WidgetView::project(s)));
    let transport = store_value(XhrTransport::new(config));
    let file_input = create_node_ref::<html::Input>();

    let apply = move |event: WidgetEvent| {
        log::debug!("widget event: {}", event.kind());
        state.update(|s| s.apply(event));
    };

    // Drop zone and "Add More Files" both open the hidden picker
    let open_picker = move |_| {
        if let Some(input) = file_input.get_untracked() {
            input.click();
        }
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        if let Some(list) = ev.data_transfer().and_then(|dt| dt.files()) {
            let files = files_from_list(&list);
            log::info!("📥 {} file(s) dropped", files.len());
            apply(UploadEvent::FilesAdded(files));
        }
    };

    let on_drag_over = move |ev: DragEvent| ev.prevent_default();

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(list) = input.files() {
            let files = files_from_list(&list);
            log::info!("📂 {} file(s) picked", files.len());
            apply(UploadEvent::FilesAdded(files));
        }
        // Picking the same file again must fire `change`
        input.set_value("");
    };

    let on_upload = move |_| {
        let files = state.with_untracked(|s| s.files().to_vec());
        let transport = transport.get_value();
        spawn_local(async move {
            let emit = move |event: WidgetEvent| state.update(|s| s.apply(event));
            if let Err(e) = dispatch(&files, &transport, &emit).await {
                log::warn!("⚠️ {}", e);
            }
        });
    };

    let on_clear = move |_| apply(UploadEvent::Cleared);

    view! {
        <div class="upload-widget">
            <h1 class="upload-title">{HEADING}</h1>
            <form class="upload-form">
                <div
                    class="file-drop-area"
                    on:drop=on_drop
                    on:dragover=on_drag_over
                    on:click=open_picker
                >
                    <p>{move || view_model.with(WidgetView::drop_zone_text)}</p>
                    <Show
                        when=move || view_model.with(WidgetView::has_selection)
                        fallback=|| view! { }
                    >
                        <ul class="selected-files">
                            <For
                                each=move || view_model.with(|v| v.selected.clone())
                                key=|(id, _)| *id
                                children=|(_, name)| view! { <li>{name}</li> }
                            />
                        </ul>
                    </Show>
                </div>

                <input
                    type="file"
                    multiple=true
                    style="display:none"
                    node_ref=file_input
                    on:change=on_file_change
                />

                <button
                    class="btn"
                    type="button"
                    on:click=on_upload
                    disabled=move || view_model.with(|v| v.upload_disabled)
                >
                    {move || view_model.with(|v| v.upload_label)}
                </button>

                <Show
                    when=move || view_model.with(|v| v.show_add_more)
                    fallback=|| view! { }
                >
                    <button class="btn-add-more" type="button" on:click=open_picker>
                        {ADD_MORE_LABEL}
                    </button>
                </Show>

                <button class="btn-clear" type="button" on:click=on_clear>
                    {CLEAR_LABEL}
                </button>
            </form>

            <Show
                when=move || view_model.with(|v| v.message.is_some())
                fallback=|| view! { }
            >
                <span class="upload-message">
                    {move || view_model.with(|v| v.message.clone().unwrap_or_default())}
                </span>
            </Show>

            <ProgressList rows=Signal::derive(move || view_model.with(|v| v.progress.clone()))/>
        </div>
    }
}
