use leptos::*;

use crate::{
    api::Order,
    components::{common::StatusBadge, empty_state::EmptyState, pagination::Pagination},
    pages::sales::utils::{allowed_transitions, is_editable, order_status_color, OrderRow},
    utils::{format::format_money, table::PageWindow, time::format_date},
};

fn transition_label(status: &str) -> &'static str {
    match status {
        "confirmed" => "Confirm",
        "shipped" => "Ship",
        "delivered" => "Deliver",
        "cancelled" => "Cancel",
        _ => "Update",
    }
}

#[component]
pub fn OrderTable(
    rows: Signal<(Vec<OrderRow>, PageWindow)>,
    total: Signal<usize>,
    on_page: Callback<usize>,
    on_status: Callback<(Order, &'static str)>,
    on_invoice: Callback<Order>,
    on_edit: Callback<Order>,
    on_delete: Callback<Order>,
) -> impl IntoView {
    let window = Signal::derive(move || rows.with(|(_, window)| *window));
    view! {
        <Show when=move || { total.get() > 0 } fallback=move || { view! { <EmptyState title="No orders found" /> } }>
            <table class="min-w-full divide-y divide-border text-sm">
                <thead class="bg-surface-muted">
                    <tr>
                        <th class="px-4 py-2 text-left">{"Order"}</th>
                        <th class="px-4 py-2 text-left">{"Date"}</th>
                        <th class="px-4 py-2 text-left">{"Customer"}</th>
                        <th class="px-4 py-2 text-left">{"Status"}</th>
                        <th class="px-4 py-2 text-right">{"Items"}</th>
                        <th class="px-4 py-2 text-right">{"Total"}</th>
                        <th class="px-4 py-2"></th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-border">
                    {move || {
                        rows.get()
                            .0
                            .into_iter()
                            .map(|row| {
                                let order = row.order;
                                let editable = is_editable(&order);
                                let transitions = allowed_transitions(&order.status)
                                    .iter()
                                    .map(|next| {
                                        let target = order.clone();
                                        let next = *next;
                                        let class = if next == "cancelled" {
                                            "text-action-danger-bg underline"
                                        } else {
                                            "text-action-primary-bg underline"
                                        };
                                        view! {
                                            <button
                                                type="button"
                                                class=class
                                                on:click=move |_| on_status.call((target.clone(), next))
                                            >
                                                {transition_label(next)}
                                            </button>
                                        }
                                    })
                                    .collect_view();
                                let for_invoice = order.clone();
                                let for_edit = order.clone();
                                let for_delete = order.clone();
                                view! {
                                    <tr>
                                        <td class="px-4 py-2 font-mono">{order.order_number.clone()}</td>
                                        <td class="px-4 py-2">{format_date(Some(order.order_date))}</td>
                                        <td class="px-4 py-2">{row.customer_name}</td>
                                        <td class="px-4 py-2">
                                            <StatusBadge label=order.status.clone() color=order_status_color(&order.status) />
                                        </td>
                                        <td class="px-4 py-2 text-right">{order.items.len()}</td>
                                        <td class="px-4 py-2 text-right">{format_money(row.totals.total)}</td>
                                        <td class="px-4 py-2 text-right space-x-2">
                                            {transitions}
                                            <button
                                                type="button"
                                                class="text-action-primary-bg underline"
                                                on:click=move |_| on_invoice.call(for_invoice.clone())
                                            >
                                                {"Invoice"}
                                            </button>
                                            {editable.then(|| view! {
                                                <button
                                                    type="button"
                                                    class="text-action-primary-bg underline"
                                                    on:click=move |_| on_edit.call(for_edit.clone())
                                                >
                                                    {"Edit"}
                                                </button>
                                            })}
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
    use crate::{
        api::OrderTotals,
        test_support::{
            fixtures::{item, order},
            ssr::render_to_string,
        },
        utils::table::paginate,
    };

    fn row(n: u128, status: &str) -> OrderRow {
        OrderRow {
            order: order(n, 1, status, vec![item(1, 2, 50.0)]),
            customer_name: "Globex Corp".into(),
            totals: OrderTotals {
                subtotal: 100.0,
                discount: 0.0,
                tax: 0.0,
                total: 100.0,
            },
        }
    }

    fn render(rows: Vec<OrderRow>) -> String {
        render_to_string(move || {
            let count = rows.len();
            let page = paginate(&rows, 10, 1);
            view! {
                <OrderTable
                    rows=Signal::derive(move || page.clone())
                    total=Signal::derive(move || count)
                    on_page=Callback::new(|_| {})
                    on_status=Callback::new(|_| {})
                    on_invoice=Callback::new(|_| {})
                    on_edit=Callback::new(|_| {})
                    on_delete=Callback::new(|_| {})
                />
            }
        })
    }

    #[test]
    fn pending_orders_offer_confirm_cancel_and_edit() {
        let html = render(vec![row(1, "pending")]);
        assert!(html.contains("Confirm"));
        assert!(html.contains("Cancel"));
        assert!(html.contains("Edit"));
        assert!(html.contains("Globex Corp"));
        assert!(html.contains("100.00"));
    }

    #[test]
    fn delivered_orders_only_offer_invoice_and_delete() {
        let html = render(vec![row(1, "delivered")]);
        assert!(html.contains("Invoice"));
        assert!(!html.contains("Confirm"));
        assert!(!html.contains("Ship"));
        assert!(!html.contains("Edit"));
    }
}
