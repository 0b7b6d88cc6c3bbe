use leptos::*;
use std::rc::Rc;
use uuid::Uuid;

use super::{
    repository::{SalesCommand, SalesRepository, SalesSnapshot},
    utils::{
        can_transition, invoice_filename, invoice_html, is_editable, order_rows, sales_tiles,
        CustomerFormState, OrderFormState, OrderRow, SalesTiles,
    },
};
use crate::{
    api::{ApiClient, ApiError, Customer, Order, Product},
    components::toast::{use_toasts, Toasts},
    config,
    utils::{
        lookup::LookupMap,
        table::{filter_by_search, paginate, PageWindow},
        time::today_in_app_tz,
        trigger_html_download,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SalesTab {
    #[default]
    Orders,
    Customers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SalesDialog {
    #[default]
    Closed,
    Customer,
    Order,
}

type SnapshotKey = (u32, String);

#[derive(Clone, Copy)]
pub struct SalesViewModel {
    pub tab: RwSignal<SalesTab>,
    pub search: RwSignal<String>,
    pub status_filter: RwSignal<String>,
    pub page: RwSignal<usize>,
    pub reload: RwSignal<u32>,
    pub snapshot: Resource<SnapshotKey, Result<SalesSnapshot, ApiError>>,
    pub dialog: RwSignal<SalesDialog>,
    pub editing: RwSignal<Option<Uuid>>,
    pub customer_form: RwSignal<CustomerFormState>,
    pub order_form: RwSignal<OrderFormState>,
    pub form_error: RwSignal<Option<String>>,
    pub command_action: Action<SalesCommand, Result<String, ApiError>>,
    pub pending: RwSignal<Option<(SalesCommand, String)>>,
    pub toasts: Toasts,
    page_size: StoredValue<usize>,
}

impl SalesViewModel {
    fn data(&self) -> Signal<SalesSnapshot> {
        let snapshot = self.snapshot;
        Signal::derive(move || snapshot.get().and_then(Result::ok).unwrap_or_default())
    }

    pub fn load_error(&self) -> Signal<Option<ApiError>> {
        let snapshot = self.snapshot;
        Signal::derive(move || snapshot.get().and_then(Result::err))
    }

    pub fn customers(&self) -> Signal<Vec<Customer>> {
        let data = self.data();
        Signal::derive(move || data.with(|d| d.customers.clone()))
    }

    pub fn products(&self) -> Signal<Vec<Product>> {
        let data = self.data();
        Signal::derive(move || data.with(|d| d.products.clone()))
    }

    pub fn customer_lookup(&self) -> Signal<LookupMap<Uuid, Customer>> {
        let data = self.data();
        Signal::derive(move || data.with(|d| LookupMap::build(&d.customers, |c| c.id)))
    }

    pub fn product_lookup(&self) -> Signal<LookupMap<Uuid, Product>> {
        let data = self.data();
        Signal::derive(move || data.with(|d| LookupMap::build(&d.products, |p| p.id)))
    }

    pub fn orders(&self) -> Signal<Vec<OrderRow>> {
        let data = self.data();
        let customers = self.customer_lookup();
        Signal::derive(move || data.with(|d| customers.with(|c| order_rows(&d.orders, c))))
    }

    pub fn filtered_orders(&self) -> Signal<Vec<OrderRow>> {
        let orders = self.orders();
        let search = self.search;
        Signal::derive(move || orders.with(|rows| search.with(|term| filter_by_search(rows, term))))
    }

    pub fn filtered_customers(&self) -> Signal<Vec<Customer>> {
        let customers = self.customers();
        let search = self.search;
        Signal::derive(move || customers.with(|rows| search.with(|term| filter_by_search(rows, term))))
    }

    /// Tiles follow the search and status filter.
    pub fn tiles(&self) -> Signal<SalesTiles> {
        let filtered = self.filtered_orders();
        Signal::derive(move || filtered.with(|rows| sales_tiles(rows)))
    }

    pub fn match_count(&self) -> Signal<usize> {
        let orders = self.filtered_orders();
        let customers = self.filtered_customers();
        let tab = self.tab;
        Signal::derive(move || match tab.get() {
            SalesTab::Orders => orders.with(Vec::len),
            SalesTab::Customers => customers.with(Vec::len),
        })
    }

    pub fn order_page(&self) -> Signal<(Vec<OrderRow>, PageWindow)> {
        let filtered = self.filtered_orders();
        let (page, size) = (self.page, self.page_size);
        Signal::derive(move || filtered.with(|rows| paginate(rows, size.get_value(), page.get())))
    }

    pub fn customer_page(&self) -> Signal<(Vec<Customer>, PageWindow)> {
        let filtered = self.filtered_customers();
        let (page, size) = (self.page, self.page_size);
        Signal::derive(move || filtered.with(|rows| paginate(rows, size.get_value(), page.get())))
    }

    pub fn retry(&self) {
        self.reload.update(|v| *v = v.wrapping_add(1));
    }

    pub fn select_tab(&self, tab: SalesTab) {
        self.tab.set(tab);
        self.search.set(String::new());
        self.page.set(1);
    }

    pub fn close_dialog(&self) {
        self.dialog.set(SalesDialog::Closed);
        self.form_error.set(None);
    }

    pub fn open_customer(&self, customer: Option<&Customer>) {
        self.editing.set(customer.map(|c| c.id));
        self.customer_form
            .set(customer.map(CustomerFormState::from_customer).unwrap_or_default());
        self.form_error.set(None);
        self.dialog.set(SalesDialog::Customer);
    }

    pub fn open_order(&self, order: Option<&Order>) {
        if let Some(existing) = order {
            if !is_editable(existing) {
                self.toasts.error(format!(
                    "Order {} is {} and can no longer be edited",
                    existing.order_number, existing.status
                ));
                return;
            }
        }
        self.editing.set(order.map(|o| o.id));
        self.order_form.set(match order {
            Some(existing) => OrderFormState::from_order(existing),
            None => OrderFormState::new_on(today_in_app_tz()),
        });
        self.form_error.set(None);
        self.dialog.set(SalesDialog::Order);
    }

    pub fn submit_dialog(&self) {
        let id = self.editing.get_untracked();
        let command = match self.dialog.get_untracked() {
            SalesDialog::Closed => return,
            SalesDialog::Customer => self
                .customer_form
                .with_untracked(CustomerFormState::to_payload)
                .map(|p| SalesCommand::SaveCustomer(id, p)),
            SalesDialog::Order => self
                .order_form
                .with_untracked(OrderFormState::to_payload)
                .map(|p| SalesCommand::SaveOrder(id, p)),
        };
        match command {
            Ok(command) => {
                self.form_error.set(None);
                self.command_action.dispatch(command);
            }
            Err(err) => self.form_error.set(Some(err)),
        }
    }

    /// Cancelling asks first; forward moves go straight through.
    pub fn change_status(&self, order: &Order, status: &str) {
        if !can_transition(&order.status, status) {
            self.toasts.error(format!(
                "Order status cannot change from {} to {}",
                order.status, status
            ));
            return;
        }
        let command = SalesCommand::SetOrderStatus(order.id, status.to_string());
        if status == "cancelled" {
            self.ask(command, format!("Cancel order {}?", order.order_number));
        } else {
            self.command_action.dispatch(command);
        }
    }

    pub fn ask(&self, command: SalesCommand, message: impl Into<String>) {
        self.pending.set(Some((command, message.into())));
    }

    pub fn confirm_pending(&self) {
        if let Some((command, _)) = self.pending.get_untracked() {
            self.command_action.dispatch(command);
        }
    }

    pub fn download_invoice(&self, order: &Order) {
        let customers = self.customer_lookup().get_untracked();
        let products = self.product_lookup().get_untracked();
        let html = invoice_html(order, customers.get(&order.customer_id), &products);
        let filename = invoice_filename(order);
        match trigger_html_download(&filename, &html) {
            Ok(()) => {
                self.toasts.success(format!("Downloaded {}", filename));
            }
            Err(err) => {
                log::error!("Invoice download failed: {}", err);
                self.toasts.error(format!("Invoice download failed: {}", err));
            }
        }
    }
}

pub fn use_sales_view_model() -> SalesViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repository = SalesRepository::new_with_client(Rc::new(api));
    let toasts = use_toasts();

    let reload = create_rw_signal(0u32);
    let status_filter = create_rw_signal(String::new());
    let repo_for_load = repository.clone();
    let snapshot = create_resource(
        move || (reload.get(), status_filter.get()),
        move |(_, status)| {
            let repo = repo_for_load.clone();
            let status = Some(status).filter(|s| !s.is_empty());
            async move { repo.load(status).await }
        },
    );

    let repo_for_command = repository;
    let command_action = create_action(move |command: &SalesCommand| {
        let repo = repo_for_command.clone();
        let command = command.clone();
        async move { repo.execute(command).await }
    });

    let vm = SalesViewModel {
        tab: create_rw_signal(SalesTab::default()),
        search: create_rw_signal(String::new()),
        status_filter,
        page: create_rw_signal(1),
        reload,
        snapshot,
        dialog: create_rw_signal(SalesDialog::Closed),
        editing: create_rw_signal(None),
        customer_form: create_rw_signal(CustomerFormState::default()),
        order_form: create_rw_signal(OrderFormState::default()),
        form_error: create_rw_signal(None),
        command_action,
        pending: create_rw_signal(None),
        toasts,
        page_size: store_value(config::current().page_size),
    };

    create_effect(move |_| {
        vm.search.with(|_| ());
        vm.status_filter.with(|_| ());
        vm.page.set(1);
    });

    create_effect(move |_| {
        if let Some(result) = command_action.value().get() {
            vm.pending.set(None);
            match result {
                Ok(message) => {
                    toasts.success(message);
                    vm.close_dialog();
                    vm.retry();
                }
                Err(err) => {
                    toasts.error(err.error.clone());
                    if vm.dialog.get_untracked() != SalesDialog::Closed {
                        vm.form_error.set(Some(err.error));
                    }
                }
            }
        }
    });

    vm
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{
        fixtures::{customer, id, item, order},
        ssr::with_runtime,
    };

    #[test]
    fn shipped_orders_cannot_be_edited() {
        with_runtime(|| {
            let vm = use_sales_view_model();
            vm.open_order(Some(&order(1, 1, "shipped", vec![item(1, 1, 5.0)])));
            assert_eq!(vm.dialog.get_untracked(), SalesDialog::Closed);

            vm.open_order(Some(&order(2, 1, "pending", vec![item(1, 1, 5.0)])));
            assert_eq!(vm.dialog.get_untracked(), SalesDialog::Order);
            assert_eq!(vm.editing.get_untracked(), Some(id(2)));
            assert_eq!(vm.order_form.get_untracked().items.len(), 1);
        });
    }

    #[test]
    fn new_order_starts_with_one_blank_line() {
        with_runtime(|| {
            let vm = use_sales_view_model();
            vm.open_order(None);
            let form = vm.order_form.get_untracked();
            assert_eq!(form.items.len(), 1);
            assert!(!form.order_date.is_empty());
            assert!(vm.editing.get_untracked().is_none());
        });
    }

    #[test]
    fn cancelling_asks_for_confirmation() {
        with_runtime(|| {
            let vm = use_sales_view_model();
            let sale = order(3, 1, "confirmed", vec![]);
            vm.change_status(&sale, "cancelled");
            let (command, _) = vm.pending.get_untracked().unwrap();
            assert_eq!(command, SalesCommand::SetOrderStatus(id(3), "cancelled".into()));
            assert_eq!(vm.command_action.version().get_untracked(), 0);
        });
    }

    #[test]
    fn invalid_transition_is_refused_locally() {
        with_runtime(|| {
            let vm = use_sales_view_model();
            vm.change_status(&order(4, 1, "pending", vec![]), "delivered");
            assert!(vm.pending.get_untracked().is_none());
            assert_eq!(vm.command_action.version().get_untracked(), 0);
        });
    }

    #[test]
    fn customer_dialog_validates_name() {
        with_runtime(|| {
            let vm = use_sales_view_model();
            vm.open_customer(Some(&customer(1, "Globex")));
            vm.customer_form.update(|f| f.name = "  ".into());
            vm.submit_dialog();
            assert_eq!(vm.form_error.get_untracked().as_deref(), Some("Name is required"));
        });
    }
}
