use dropload::ProgressRow;
use leptos::*;

/// Per-file progress list, hidden when nothing is selected.
#[component]
pub fn ProgressList(#[prop(into)] rows: Signal<Vec<ProgressRow>>) -> impl IntoView {
    view! {
        <Show
            when=move || rows.with(|r| !r.is_empty())
            fallback=|| view! { }
        >
            <ul class="progress-list">
                <For
                    each=move || rows.get()
                    key=|row| row.id
                    children=move |row| {
                        // Rows are keyed by id, so the label has to track the signal itself
                        let id = row.id;
                        let current = move || rows.with(|r| r.iter().find(|x| x.id == id).cloned());
                        view! {
                            <li class:uploaded=move || current().is_some_and(|r| r.uploaded)>
                                {move || current().map(|r| r.label()).unwrap_or_default()}
                            </li>
                        }
                    }
                />
            </ul>
        </Show>
    }
}
