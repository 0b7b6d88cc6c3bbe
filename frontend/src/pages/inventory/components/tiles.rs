use leptos::*;

use crate::{
    components::cards::{StatCard, StatGrid},
    pages::inventory::utils::InventoryTiles,
    utils::format::format_money,
};

#[component]
pub fn InventorySummary(tiles: Signal<InventoryTiles>) -> impl IntoView {
    let value = move |f: fn(&InventoryTiles) -> String| Signal::derive(move || tiles.with(f));
    view! {
        <StatGrid>
            <StatCard label="Components" value=value(|t| t.components.to_string()) />
            <StatCard
                label="Low stock"
                value=value(|t| t.low_stock.to_string())
                hint=value(|_| "at or below reorder level".to_string())
            />
            <StatCard label="Stock value" value=value(|t| format_money(t.stock_value)) />
            <StatCard label="Products" value=value(|t| t.products.to_string()) />
            <StatCard label="Suppliers" value=value(|t| t.suppliers.to_string()) />
            <StatCard label="Open batches" value=value(|t| t.open_batches.to_string()) />
        </StatGrid>
    }
}
