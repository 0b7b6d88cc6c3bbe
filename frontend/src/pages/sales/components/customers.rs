use leptos::*;

use crate::{
    api::Customer,
    components::{empty_state::EmptyState, pagination::Pagination},
    utils::table::PageWindow,
};

#[component]
pub fn CustomerTable(
    rows: Signal<(Vec<Customer>, PageWindow)>,
    total: Signal<usize>,
    on_page: Callback<usize>,
    on_edit: Callback<Customer>,
    on_delete: Callback<Customer>,
) -> impl IntoView {
    let window = Signal::derive(move || rows.with(|(_, window)| *window));
    let dash = |value: Option<String>| value.unwrap_or_else(|| "-".into());
    view! {
        <Show when=move || { total.get() > 0 } fallback=move || { view! { <EmptyState title="No customers found" /> } }>
            <table class="min-w-full divide-y divide-border text-sm">
                <thead class="bg-surface-muted">
                    <tr>
                        <th class="px-4 py-2 text-left">{"Name"}</th>
                        <th class="px-4 py-2 text-left">{"Company"}</th>
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
                            .map(|customer| {
                                let for_edit = customer.clone();
                                let for_delete = customer.clone();
                                view! {
                                    <tr>
                                        <td class="px-4 py-2 font-medium">{customer.name.clone()}</td>
                                        <td class="px-4 py-2">{dash(customer.company.clone())}</td>
                                        <td class="px-4 py-2">{dash(customer.email.clone())}</td>
                                        <td class="px-4 py-2">{dash(customer.phone.clone())}</td>
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
    use crate::test_support::{fixtures::customer, ssr::render_to_string};
    use crate::utils::table::paginate;

    #[test]
    fn renders_company_or_dash() {
        let html = render_to_string(move || {
            let mut globex = customer(1, "Hank Scorpio");
            globex.company = Some("Globex".into());
            let rows = paginate(&[globex, customer(2, "Walk-in")], 10, 1);
            view! {
                <CustomerTable
                    rows=Signal::derive(move || rows.clone())
                    total=Signal::derive(|| 2)
                    on_page=Callback::new(|_| {})
                    on_edit=Callback::new(|_| {})
                    on_delete=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("Globex"));
        assert!(html.contains("Walk-in"));
        assert!(html.contains("Showing 1-2 of 2"));
    }
}
