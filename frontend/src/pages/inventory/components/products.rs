use leptos::*;

use crate::{
    api::Product,
    components::{empty_state::EmptyState, pagination::Pagination},
    pages::inventory::utils::ProductSummary,
    utils::{format::format_money, table::PageWindow},
};

fn buildable_label(buildable: Option<i32>) -> String {
    match buildable {
        Some(units) => units.to_string(),
        None => "No BOM".to_string(),
    }
}

#[component]
pub fn ProductTable(
    rows: Signal<(Vec<ProductSummary>, PageWindow)>,
    total: Signal<usize>,
    on_page: Callback<usize>,
    on_bom: Callback<Product>,
    on_edit: Callback<Product>,
    on_delete: Callback<Product>,
) -> impl IntoView {
    let window = Signal::derive(move || rows.with(|(_, window)| *window));
    view! {
        <Show when=move || { total.get() > 0 } fallback=move || { view! { <EmptyState title="No products found" /> } }>
            <table class="min-w-full divide-y divide-border text-sm">
                <thead class="bg-surface-muted">
                    <tr>
                        <th class="px-4 py-2 text-left">{"SKU"}</th>
                        <th class="px-4 py-2 text-left">{"Name"}</th>
                        <th class="px-4 py-2 text-right">{"Price"}</th>
                        <th class="px-4 py-2 text-right">{"Cost"}</th>
                        <th class="px-4 py-2 text-right">{"Margin"}</th>
                        <th class="px-4 py-2 text-right">{"Buildable"}</th>
                        <th class="px-4 py-2"></th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-border">
                    {move || {
                        rows.get()
                            .0
                            .into_iter()
                            .map(|row| {
                                let for_bom = row.product.clone();
                                let for_edit = row.product.clone();
                                let for_delete = row.product.clone();
                                let margin_class = if row.margin < 0.0 {
                                    "px-4 py-2 text-right text-status-error-text"
                                } else {
                                    "px-4 py-2 text-right"
                                };
                                view! {
                                    <tr>
                                        <td class="px-4 py-2 font-mono">{row.product.sku.clone()}</td>
                                        <td class="px-4 py-2">{row.product.name.clone()}</td>
                                        <td class="px-4 py-2 text-right">{format_money(row.product.price)}</td>
                                        <td class="px-4 py-2 text-right">{format_money(row.cost)}</td>
                                        <td class=margin_class>{format_money(row.margin)}</td>
                                        <td class="px-4 py-2 text-right">{buildable_label(row.buildable)}</td>
                                        <td class="px-4 py-2 text-right space-x-2">
                                            <button
                                                type="button"
                                                class="text-action-primary-bg underline"
                                                on:click=move |_| on_bom.call(for_bom.clone())
                                            >
                                                {format!("BOM ({})", row.bom_lines)}
                                            </button>
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
    use crate::test_support::{fixtures::product, ssr::render_to_string};
    use crate::utils::table::paginate;

    #[test]
    fn shows_margin_and_missing_bom() {
        let html = render_to_string(move || {
            let rows = vec![
                ProductSummary {
                    product: product(1, "KIT", 25.0),
                    bom_lines: 2,
                    cost: 30.0,
                    margin: -5.0,
                    buildable: Some(4),
                },
                ProductSummary {
                    product: product(2, "LOOSE", 9.0),
                    bom_lines: 0,
                    cost: 0.0,
                    margin: 9.0,
                    buildable: None,
                },
            ];
            let page = paginate(&rows, 10, 1);
            view! {
                <ProductTable
                    rows=Signal::derive(move || page.clone())
                    total=Signal::derive(|| 2)
                    on_page=Callback::new(|_| {})
                    on_bom=Callback::new(|_| {})
                    on_edit=Callback::new(|_| {})
                    on_delete=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("No BOM"));
        assert!(html.contains("BOM (2)"));
        assert!(html.contains("text-status-error-text"));
    }
}
