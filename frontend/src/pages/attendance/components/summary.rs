use leptos::*;

use crate::{
    components::{cards::StatGrid, common::StatusBadge},
    pages::attendance::utils::status_color,
};

/// Per-status counts for the filtered range.
#[component]
pub fn StatusSummary(counts: Signal<Vec<(String, usize)>>, total: Signal<usize>) -> impl IntoView {
    view! {
        <section class="space-y-2">
            <h3 class="text-sm font-medium text-fg-muted">
                {move || format!("{} records in range", total.get())}
            </h3>
            <StatGrid>
                {move || {
                    counts
                        .get()
                        .into_iter()
                        .map(|(status, count)| {
                            let color = status_color(Some(&status)).as_str();
                            view! {
                                <div class="flex items-center justify-between rounded border border-border px-3 py-2">
                                    <StatusBadge label=status color=color />
                                    <span class="text-lg font-semibold text-fg">{count}</span>
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </StatGrid>
        </section>
    }
}
