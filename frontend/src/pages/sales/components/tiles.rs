use leptos::*;

use crate::{
    components::cards::{StatCard, StatGrid},
    pages::sales::utils::SalesTiles,
    utils::format::format_money,
};

#[component]
pub fn SalesSummary(tiles: Signal<SalesTiles>) -> impl IntoView {
    let value = move |f: fn(&SalesTiles) -> String| Signal::derive(move || tiles.with(f));
    view! {
        <StatGrid>
            <StatCard label="Orders" value=value(|t| t.orders.to_string()) />
            <StatCard label="Revenue" value=value(|t| format_money(t.revenue)) hint=value(|_| "excluding cancelled".to_string()) />
            <StatCard label="Average order" value=value(|t| format_money(t.average)) />
        </StatGrid>
        <div class="flex flex-wrap gap-2 mb-4 text-sm">
            {move || {
                tiles
                    .get()
                    .per_status
                    .into_iter()
                    .map(|(status, count)| {
                        view! {
                            <span class="rounded border border-border px-2 py-1">
                                {format!("{}: {}", status, count)}
                            </span>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
