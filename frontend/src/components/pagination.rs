use leptos::*;

use crate::utils::table::PageWindow;

#[component]
pub fn Pagination(
    window: Signal<PageWindow>,
    total: Signal<usize>,
    on_change: Callback<usize>,
) -> impl IntoView {
    let summary = move || {
        let w = window.get();
        let total = total.get();
        if total == 0 {
            "No rows".to_string()
        } else {
            format!("Showing {}-{} of {}", w.start + 1, w.end, total)
        }
    };

    view! {
        <div class="flex items-center justify-between px-4 py-3 text-sm text-fg-muted">
            <span>{summary}</span>
            <div class="flex items-center gap-2">
                <button
                    type="button"
                    class="px-3 py-1 rounded border border-border disabled:opacity-50"
                    disabled=move || !window.get().has_previous()
                    on:click=move |_| on_change.call(window.get_untracked().page.saturating_sub(1))
                >
                    {"Previous"}
                </button>
                <span>{move || format!("Page {} / {}", window.get().page, window.get().page_count)}</span>
                <button
                    type="button"
                    class="px-3 py-1 rounded border border-border disabled:opacity-50"
                    disabled=move || !window.get().has_next()
                    on:click=move |_| on_change.call(window.get_untracked().page + 1)
                >
                    {"Next"}
                </button>
            </div>
        </div>
    }
}
