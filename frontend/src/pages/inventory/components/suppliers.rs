use leptos::*;

use crate::{
    api::Supplier,
    components::{empty_state::EmptyState, pagination::Pagination},
    utils::table::PageWindow,
};

fn or_dash(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

#[component]
pub fn SupplierTable(
    rows: Signal<(Vec<Supplier>, PageWindow)>,
    total: Signal<usize>,
    on_page: Callback<usize>,
    on_edit: Callback<Supplier>,
    on_delete: Callback<Supplier>,
) -> impl IntoView {
    let window = Signal::derive(move || rows.with(|(_, window)| *window));
    view! {
        <Show when=move || { total.get() > 0 } fallback=move || { view! { <EmptyState title="No suppliers found" /> } }>
            <table class="min-w-full divide-y divide-border text-sm">
                <thead class="bg-surface-muted">
                    <tr>
                        <th class="px-4 py-2 text-left">{"Name"}</th>
                        <th class="px-4 py-2 text-left">{"Contact"}</th>
                        <th class="px-4 py-2 text-left">{"Email"}</th>
                        <th class="px-4 py-2 text-left">{"Phone"}</th>
                        <th class="px-4 py-2"></th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-border">
                    {move || {
                        rows.get()
                            .0
                            .into_iter()
                            .map(|supplier| {
                                let for_edit = supplier.clone();
                                let for_delete = supplier.clone();
                                view! {
                                    <tr>
                                        <td class="px-4 py-2 font-medium">{supplier.name.clone()}</td>
                                        <td class="px-4 py-2">{or_dash(&supplier.contact_name)}</td>
                                        <td class="px-4 py-2">{or_dash(&supplier.email)}</td>
                                        <td class="px-4 py-2">{or_dash(&supplier.phone)}</td>
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
    use crate::test_support::{fixtures::supplier, ssr::render_to_string};
    use crate::utils::table::paginate;

    #[test]
    fn renders_contact_or_dash() {
        let html = render_to_string(move || {
            let mut acme = supplier(1, "Acme Parts");
            acme.contact_name = Some("Wile E.".into());
            let rows = paginate(&[acme, supplier(2, "Bare Co")], 10, 1);
            view! {
                <SupplierTable
                    rows=Signal::derive(move || rows.clone())
                    total=Signal::derive(|| 2)
                    on_page=Callback::new(|_| {})
                    on_edit=Callback::new(|_| {})
                    on_delete=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("Wile E."));
        assert!(html.contains("Bare Co"));
        assert!(!html.contains("No suppliers found"));
    }

    #[test]
    fn no_suppliers_renders_empty_state() {
        let html = render_to_string(move || {
            let rows = paginate(&Vec::<Supplier>::new(), 10, 1);
            view! {
                <SupplierTable
                    rows=Signal::derive(move || rows.clone())
                    total=Signal::derive(|| 0)
                    on_page=Callback::new(|_| {})
                    on_edit=Callback::new(|_| {})
                    on_delete=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("No suppliers found"));
    }
}
