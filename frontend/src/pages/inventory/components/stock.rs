use leptos::*;
use uuid::Uuid;

use crate::{
    api::{Component, Supplier},
    components::{common::StatusBadge, empty_state::EmptyState, pagination::Pagination},
    pages::inventory::utils::is_low_stock,
    utils::{format::format_money, lookup::LookupMap, table::PageWindow},
};

#[component]
pub fn ComponentTable(
    rows: Signal<(Vec<Component>, PageWindow)>,
    total: Signal<usize>,
    suppliers: Signal<LookupMap<Uuid, Supplier>>,
    on_page: Callback<usize>,
    on_edit: Callback<Component>,
    on_delete: Callback<Component>,
) -> impl IntoView {
    let window = Signal::derive(move || rows.with(|(_, window)| *window));
    view! {
        <Show when=move || { total.get() > 0 } fallback=move || { view! { <EmptyState title="No components found" /> } }>
            <table class="min-w-full divide-y divide-border text-sm">
                <thead class="bg-surface-muted">
                    <tr>
                        <th class="px-4 py-2 text-left">{"SKU"}</th>
                        <th class="px-4 py-2 text-left">{"Name"}</th>
                        <th class="px-4 py-2 text-left">{"Supplier"}</th>
                        <th class="px-4 py-2 text-right">{"Stock"}</th>
                        <th class="px-4 py-2 text-right">{"Reorder at"}</th>
                        <th class="px-4 py-2 text-right">{"Unit cost"}</th>
                        <th class="px-4 py-2"></th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-border">
                    {move || {
                        let lookup = suppliers.get();
                        rows.get()
                            .0
                            .into_iter()
                            .map(|component| {
                                let low = is_low_stock(&component);
                                let supplier = lookup.label_opt(component.supplier_id.as_ref(), |s| s.name.clone());
                                let for_edit = component.clone();
                                let for_delete = component.clone();
                                view! {
                                    <tr>
                                        <td class="px-4 py-2 font-mono">{component.sku.clone()}</td>
                                        <td class="px-4 py-2">{component.name.clone()}</td>
                                        <td class="px-4 py-2">{supplier}</td>
                                        <td class="px-4 py-2 text-right">
                                            {format!("{} {}", component.stock_quantity, component.unit)}
                                            {low.then(|| view! { <StatusBadge label="Low" color="red" /> })}
                                        </td>
                                        <td class="px-4 py-2 text-right">{component.reorder_level}</td>
                                        <td class="px-4 py-2 text-right">{format_money(component.unit_cost)}</td>
                                        <td class="px-4 py-2 text-right space-x-2">
                                            <button
                                                type="button"
                                                class="text-action-primary-bg underline"
                                                on:click=move |_| on_edit.call(for_edit.clone())
                                            >
                                                {"Edit"}
                                            </button>
                                            <button
                                                type="button"
                                                class="text-action-danger-bg underline"
                                                on:click=move |_| on_delete.call(for_delete.clone())
                                            >
                                                {"Delete"}
                                            </button>
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
            <Pagination window=window total=total on_change=on_page />
        </Show>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{
        fixtures::{component, id, supplier},
        ssr::render_to_string,
    };
    use crate::utils::table::paginate;

    #[test]
    fn flags_low_stock_and_joins_supplier() {
        let html = render_to_string(move || {
            let mut bolt = component(1, "BOLT", 2, 5, 0.25);
            bolt.supplier_id = Some(id(7));
            let mut nut = component(2, "NUT", 50, 5, 0.1);
            nut.supplier_id = Some(id(99));
            let rows = paginate(&[bolt, nut], 10, 1);
            let lookup = LookupMap::build(&[supplier(7, "Acme Parts")], |s| s.id);
            view! {
                <ComponentTable
                    rows=Signal::derive(move || rows.clone())
                    total=Signal::derive(|| 2)
                    suppliers=Signal::derive(move || lookup.clone())
                    on_page=Callback::new(|_| {})
                    on_edit=Callback::new(|_| {})
                    on_delete=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("Acme Parts"));
        assert!(html.contains("Unknown"));
        assert_eq!(html.matches("badge-red").count(), 1);
        assert!(html.contains("2 pcs"));
    }
}
