use leptos::*;
use uuid::Uuid;

use crate::{
    api::{BatchDetail, Supplier},
    components::{common::StatusBadge, empty_state::EmptyState, pagination::Pagination},
    pages::inventory::utils::{batch_is_locked, batch_status_color, batch_units, next_batch_status},
    utils::{lookup::LookupMap, table::PageWindow, time::format_date},
};

#[component]
pub fn BatchTable(
    rows: Signal<(Vec<BatchDetail>, PageWindow)>,
    total: Signal<usize>,
    suppliers: Signal<LookupMap<Uuid, Supplier>>,
    on_page: Callback<usize>,
    on_advance: Callback<BatchDetail>,
    on_edit: Callback<BatchDetail>,
    on_delete: Callback<BatchDetail>,
) -> impl IntoView {
    let window = Signal::derive(move || rows.with(|(_, window)| *window));
    view! {
        <Show when=move || { total.get() > 0 } fallback=move || { view! { <EmptyState title="No batches found" /> } }>
            <table class="min-w-full divide-y divide-border text-sm">
                <thead class="bg-surface-muted">
                    <tr>
                        <th class="px-4 py-2 text-left">{"Batch"}</th>
                        <th class="px-4 py-2 text-left">{"Supplier"}</th>
                        <th class="px-4 py-2 text-left">{"Status"}</th>
                        <th class="px-4 py-2 text-right">{"Items"}</th>
                        <th class="px-4 py-2 text-left">{"Expected"}</th>
                        <th class="px-4 py-2 text-left">{"Received"}</th>
                        <th class="px-4 py-2"></th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-border">
                    {move || {
                        let lookup = suppliers.get();
                        rows.get()
                            .0
                            .into_iter()
                            .map(|detail| {
                                let batch = detail.batch.clone();
                                let locked = batch_is_locked(&detail);
                                let next = next_batch_status(&batch.status);
                                let supplier = lookup.label(&batch.supplier_id, |s| s.name.clone());
                                let units = format!("{} lines / {} units", detail.items.len(), batch_units(&detail));
                                let for_advance = detail.clone();
                                let for_edit = detail.clone();
                                let for_delete = detail;
                                view! {
                                    <tr>
                                        <td class="px-4 py-2 font-mono">{batch.batch_code.clone()}</td>
                                        <td class="px-4 py-2">{supplier}</td>
                                        <td class="px-4 py-2">
                                            <StatusBadge label=batch.status.clone() color=batch_status_color(&batch.status) />
                                        </td>
                                        <td class="px-4 py-2 text-right">{units}</td>
                                        <td class="px-4 py-2">{format_date(batch.expected_date)}</td>
                                        <td class="px-4 py-2">{format_date(batch.received_date)}</td>
                                        <td class="px-4 py-2 text-right space-x-2">
                                            {next.map(|status| view! {
                                                <button
                                                    type="button"
                                                    class="text-action-primary-bg underline"
                                                    on:click=move |_| on_advance.call(for_advance.clone())
                                                >
                                                    {format!("Mark {}", status)}
                                                </button>
                                            })}
                                            {(!locked).then(|| view! {
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
                                            })}
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
    use crate::{
        api::{Batch, BatchItem},
        test_support::{
            fixtures::{id, stamp, supplier},
            ssr::render_to_string,
        },
        utils::table::paginate,
    };

    fn detail(n: u128, code: &str, status: &str) -> BatchDetail {
        BatchDetail {
            batch: Batch {
                id: id(n),
                batch_code: code.into(),
                supplier_id: id(7),
                status: status.into(),
                expected_date: None,
                received_date: None,
                notes: None,
                created_at: stamp(),
                updated_at: stamp(),
            },
            items: vec![
                BatchItem { component_id: id(1), quantity: 10 },
                BatchItem { component_id: id(2), quantity: 5 },
            ],
        }
    }

    #[test]
    fn completed_batches_offer_no_actions() {
        let html = render_to_string(move || {
            let rows = paginate(&[detail(1, "B-001", "in-transit"), detail(2, "B-002", "completed")], 10, 1);
            let lookup = LookupMap::build(&[supplier(7, "Acme Parts")], |s| s.id);
            view! {
                <BatchTable
                    rows=Signal::derive(move || rows.clone())
                    total=Signal::derive(|| 2)
                    suppliers=Signal::derive(move || lookup.clone())
                    on_page=Callback::new(|_| {})
                    on_advance=Callback::new(|_| {})
                    on_edit=Callback::new(|_| {})
                    on_delete=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("Mark processing"));
        assert!(!html.contains("Mark completed"));
        assert_eq!(html.matches("text-action-danger-bg").count(), 1);
        assert!(html.contains("2 lines / 15 units"));
        assert!(html.contains("Acme Parts"));
    }
}
