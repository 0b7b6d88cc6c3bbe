use leptos::*;

use super::{
    components::{
        customers::CustomerTable,
        forms::{CustomerForm, OrderForm},
        orders::OrderTable,
        tiles::SalesSummary,
    },
    repository::SalesCommand,
    view_model::{use_sales_view_model, SalesDialog, SalesTab},
};
use crate::{
    api::{Customer, Order, ORDER_STATUSES},
    components::{
        common::{Button, SearchInput},
        confirm_dialog::ConfirmDialog,
        error::InlineErrorMessage,
        layout::{Layout, LoadingSpinner, PageHeader},
        modal::Modal,
    },
};

const TABS: [(SalesTab, &str); 2] = [(SalesTab::Orders, "Orders"), (SalesTab::Customers, "Customers")];

#[component]
pub fn SalesPanel() -> impl IntoView {
    let vm = use_sales_view_model();
    let loading = vm.snapshot.loading();
    let total = vm.match_count();
    let saving: Signal<bool> = vm.command_action.pending().into();
    let form_error: Signal<Option<String>> = vm.form_error.into();
    let on_page = Callback::new(move |page| vm.page.set(page));
    let close = Callback::new(move |_| vm.close_dialog());
    let submit = Callback::new(move |_| vm.submit_dialog());

    let open_new = move |_| match vm.tab.get_untracked() {
        SalesTab::Orders => vm.open_order(None),
        SalesTab::Customers => vm.open_customer(None),
    };
    let dialog_title = Signal::derive(move || {
        let editing = vm.editing.get().is_some();
        match vm.dialog.get() {
            SalesDialog::Customer if editing => "Edit customer",
            SalesDialog::Customer => "New customer",
            SalesDialog::Order if editing => "Edit order",
            SalesDialog::Order => "New order",
            SalesDialog::Closed => "",
        }
        .to_string()
    });
    let pending_message = Signal::derive(move || {
        vm.pending.get().map(|(_, message)| message).unwrap_or_default()
    });
    let confirm_label = Signal::derive(move || {
        vm.pending.with(|p| match p {
            Some((SalesCommand::SetOrderStatus(..), _)) => "Cancel order".to_string(),
            _ => "Delete".to_string(),
        })
    });

    view! {
        <Layout>
            <PageHeader title="Sales" subtitle="Customers, orders and invoices">
                <Button on:click=open_new>
                    {move || match vm.tab.get() {
                        SalesTab::Orders => "New order",
                        SalesTab::Customers => "New customer",
                    }}
                </Button>
            </PageHeader>
            <InlineErrorMessage error=vm.load_error() on_retry=Callback::new(move |_| vm.retry()) />
            <SalesSummary tiles=vm.tiles() />
            <nav class="flex gap-2 border-b border-border mb-4">
                {TABS
                    .into_iter()
                    .map(|(tab, label)| {
                        view! {
                            <button
                                type="button"
                                class=move || {
                                    if vm.tab.get() == tab {
                                        "px-3 py-2 text-sm font-semibold border-b-2 border-action-primary-bg"
                                    } else {
                                        "px-3 py-2 text-sm text-fg-muted"
                                    }
                                }
                                on:click=move |_| vm.select_tab(tab)
                            >
                                {label}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>
            <div class="mb-4 flex flex-wrap items-center gap-3">
                <div class="flex-1">
                    {move || {
                        let placeholder = match vm.tab.get() {
                            SalesTab::Orders => "Search order number or customer",
                            SalesTab::Customers => "Search name, email or company",
                        };
                        view! { <SearchInput value=vm.search placeholder=placeholder /> }
                    }}
                </div>
                <Show when=move || vm.tab.get() == SalesTab::Orders>
                    <select
                        class="rounded border border-border px-2 py-1 text-sm"
                        prop:value=move || vm.status_filter.get()
                        on:change=move |ev| vm.status_filter.set(event_target_value(&ev))
                    >
                        <option value="">{"All statuses"}</option>
                        {ORDER_STATUSES
                            .into_iter()
                            .map(|status| view! { <option value=status>{status}</option> })
                            .collect_view()}
                    </select>
                </Show>
            </div>
            <Show when=move || loading.get()>
                <LoadingSpinner />
            </Show>
            <section class="bg-surface-elevated shadow rounded-lg overflow-hidden">
                {move || match vm.tab.get() {
                    SalesTab::Orders => view! {
                        <OrderTable
                            rows=vm.order_page()
                            total=total
                            on_page=on_page
                            on_status=Callback::new(move |(order, status): (Order, &'static str)| {
                                vm.change_status(&order, status)
                            })
                            on_invoice=Callback::new(move |order: Order| vm.download_invoice(&order))
                            on_edit=Callback::new(move |order: Order| vm.open_order(Some(&order)))
                            on_delete=Callback::new(move |order: Order| {
                                vm.ask(
                                    SalesCommand::DeleteOrder(order.id),
                                    format!("Delete order {}?", order.order_number),
                                )
                            })
                        />
                    }
                    .into_view(),
                    SalesTab::Customers => view! {
                        <CustomerTable
                            rows=vm.customer_page()
                            total=total
                            on_page=on_page
                            on_edit=Callback::new(move |c: Customer| vm.open_customer(Some(&c)))
                            on_delete=Callback::new(move |c: Customer| {
                                vm.ask(SalesCommand::DeleteCustomer(c.id), format!("Delete customer {}?", c.name))
                            })
                        />
                    }
                    .into_view(),
                }}
            </section>
            <Modal
                is_open=Signal::derive(move || vm.dialog.get() != SalesDialog::Closed)
                title=dialog_title
                on_close=close
            >
                {move || match vm.dialog.get() {
                    SalesDialog::Customer => view! {
                        <CustomerForm form=vm.customer_form error=form_error saving=saving on_submit=submit on_cancel=close />
                    }
                    .into_view(),
                    SalesDialog::Order => view! {
                        <OrderForm
                            form=vm.order_form
                            customers=vm.customers()
                            products=vm.products()
                            product_lookup=vm.product_lookup()
                            error=form_error
                            saving=saving
                            on_submit=submit
                            on_cancel=close
                        />
                    }
                    .into_view(),
                    SalesDialog::Closed => ().into_view(),
                }}
            </Modal>
            <ConfirmDialog
                is_open=Signal::derive(move || vm.pending.get().is_some())
                title="Please confirm"
                message=pending_message
                confirm_label=confirm_label
                destructive=true
                confirm_disabled=vm.command_action.pending()
                on_confirm=Callback::new(move |_| vm.confirm_pending())
                on_cancel=Callback::new(move |_| vm.pending.set(None))
            />
        </Layout>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn renders_order_tab_with_status_filter() {
        let html = render_to_string(move || view! { <SalesPanel /> });
        assert!(html.contains("Orders"));
        assert!(html.contains("Customers"));
        assert!(html.contains("All statuses"));
        assert!(html.contains("delivered"));
        assert!(html.contains("No orders found"));
    }
}
