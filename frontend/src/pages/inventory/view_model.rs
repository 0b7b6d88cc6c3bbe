use leptos::*;
use std::{collections::HashMap, rc::Rc};
use uuid::Uuid;

use super::{
    repository::{InventoryCommand, InventoryRepository, InventorySnapshot},
    utils::{
        bom_by_product, bom_drafts, bom_payload, inventory_tiles, next_batch_status,
        product_summaries, BatchFormState, ComponentFormState, InventoryTab, InventoryTiles,
        LineDraft, ProductFormState, ProductSummary, SupplierFormState,
    },
};
use crate::{
    api::{ApiClient, ApiError, BatchDetail, BomLine, Component, Product, Supplier},
    components::toast::{use_toasts, Toasts},
    config,
    utils::{
        lookup::LookupMap,
        table::{filter_by_search, paginate, PageWindow, Searchable},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InventoryDialog {
    #[default]
    Closed,
    Supplier,
    Component,
    Product,
    Bom,
    Batch,
}

/// A write waiting for the user to confirm it, with the question to ask.
pub type PendingCommand = (InventoryCommand, String);

#[derive(Clone, Copy)]
pub struct InventoryViewModel {
    pub tab: RwSignal<InventoryTab>,
    pub search: RwSignal<String>,
    pub page: RwSignal<usize>,
    pub reload: RwSignal<u32>,
    pub snapshot: Resource<u32, Result<InventorySnapshot, ApiError>>,
    pub dialog: RwSignal<InventoryDialog>,
    pub editing: RwSignal<Option<Uuid>>,
    pub supplier_form: RwSignal<SupplierFormState>,
    pub component_form: RwSignal<ComponentFormState>,
    pub product_form: RwSignal<ProductFormState>,
    pub bom_form: RwSignal<Vec<LineDraft>>,
    pub batch_form: RwSignal<BatchFormState>,
    pub form_error: RwSignal<Option<String>>,
    pub command_action: Action<InventoryCommand, Result<String, ApiError>>,
    pub pending: RwSignal<Option<PendingCommand>>,
    pub toasts: Toasts,
    page_size: StoredValue<usize>,
}

impl InventoryViewModel {
    fn data(&self) -> Signal<InventorySnapshot> {
        let snapshot = self.snapshot;
        Signal::derive(move || snapshot.get().and_then(Result::ok).unwrap_or_default())
    }

    pub fn load_error(&self) -> Signal<Option<ApiError>> {
        let snapshot = self.snapshot;
        Signal::derive(move || snapshot.get().and_then(Result::err))
    }

    pub fn suppliers(&self) -> Signal<Vec<Supplier>> {
        let data = self.data();
        Signal::derive(move || data.with(|d| d.suppliers.clone()))
    }

    pub fn components(&self) -> Signal<Vec<Component>> {
        let data = self.data();
        Signal::derive(move || data.with(|d| d.components.clone()))
    }

    pub fn supplier_lookup(&self) -> Signal<LookupMap<Uuid, Supplier>> {
        let data = self.data();
        Signal::derive(move || data.with(|d| LookupMap::build(&d.suppliers, |s| s.id)))
    }

    pub fn component_lookup(&self) -> Signal<LookupMap<Uuid, Component>> {
        let data = self.data();
        Signal::derive(move || data.with(|d| LookupMap::build(&d.components, |c| c.id)))
    }

    fn boms(&self) -> Signal<HashMap<Uuid, Vec<BomLine>>> {
        let data = self.data();
        Signal::derive(move || data.with(|d| bom_by_product(&d.bom_lines)))
    }

    pub fn product_rows(&self) -> Signal<Vec<ProductSummary>> {
        let data = self.data();
        let boms = self.boms();
        let lookup = self.component_lookup();
        Signal::derive(move || {
            data.with(|d| boms.with(|b| lookup.with(|l| product_summaries(&d.products, b, l))))
        })
    }

    pub fn tiles(&self) -> Signal<InventoryTiles> {
        let data = self.data();
        Signal::derive(move || {
            data.with(|d| inventory_tiles(&d.components, &d.products, &d.suppliers, &d.batches))
        })
    }

    fn page_of<T>(&self, rows: Signal<Vec<T>>) -> Signal<(Vec<T>, PageWindow)>
    where
        T: Searchable + Clone + 'static,
    {
        let search = self.search;
        let page = self.page;
        let size = self.page_size;
        Signal::derive(move || {
            rows.with(|rows| {
                let filtered = search.with(|term| filter_by_search(rows, term));
                paginate(&filtered, size.get_value(), page.get())
            })
        })
    }

    /// Rows matching the current search, before paging.
    pub fn match_count(&self) -> Signal<usize> {
        let data = self.data();
        let tab = self.tab;
        let search = self.search;
        Signal::derive(move || {
            let term = search.get();
            data.with(|d| match tab.get() {
                InventoryTab::Components => filter_by_search(&d.components, &term).len(),
                InventoryTab::Products => filter_by_search(&d.products, &term).len(),
                InventoryTab::Suppliers => filter_by_search(&d.suppliers, &term).len(),
                InventoryTab::Batches => filter_by_search(&d.batches, &term).len(),
            })
        })
    }

    pub fn component_page(&self) -> Signal<(Vec<Component>, PageWindow)> {
        self.page_of(self.components())
    }

    pub fn product_page(&self) -> Signal<(Vec<ProductSummary>, PageWindow)> {
        self.page_of(self.product_rows())
    }

    pub fn supplier_page(&self) -> Signal<(Vec<Supplier>, PageWindow)> {
        self.page_of(self.suppliers())
    }

    pub fn batch_page(&self) -> Signal<(Vec<BatchDetail>, PageWindow)> {
        let data = self.data();
        self.page_of(Signal::derive(move || data.with(|d| d.batches.clone())))
    }

    pub fn retry(&self) {
        self.reload.update(|v| *v = v.wrapping_add(1));
    }

    pub fn select_tab(&self, tab: InventoryTab) {
        self.tab.set(tab);
        self.search.set(String::new());
        self.page.set(1);
    }

    fn open(&self, dialog: InventoryDialog, editing: Option<Uuid>) {
        self.editing.set(editing);
        self.form_error.set(None);
        self.dialog.set(dialog);
    }

    pub fn close_dialog(&self) {
        self.dialog.set(InventoryDialog::Closed);
        self.form_error.set(None);
    }

    pub fn open_supplier(&self, supplier: Option<&Supplier>) {
        self.supplier_form
            .set(supplier.map(SupplierFormState::from_supplier).unwrap_or_default());
        self.open(InventoryDialog::Supplier, supplier.map(|s| s.id));
    }

    pub fn open_component(&self, component: Option<&Component>) {
        self.component_form
            .set(component.map(ComponentFormState::from_component).unwrap_or_default());
        self.open(InventoryDialog::Component, component.map(|c| c.id));
    }

    pub fn open_product(&self, product: Option<&Product>) {
        self.product_form
            .set(product.map(ProductFormState::from_product).unwrap_or_default());
        self.open(InventoryDialog::Product, product.map(|p| p.id));
    }

    pub fn open_bom(&self, product: &Product) {
        let lines = self
            .boms()
            .with_untracked(|b| b.get(&product.id).map(|lines| bom_drafts(lines)))
            .unwrap_or_default();
        self.bom_form.set(lines);
        self.open(InventoryDialog::Bom, Some(product.id));
    }

    pub fn open_batch(&self, batch: Option<&BatchDetail>) {
        let form = match batch {
            Some(detail) => BatchFormState::from_batch(detail),
            None => BatchFormState {
                items: vec![LineDraft::default()],
                ..BatchFormState::default()
            },
        };
        self.batch_form.set(form);
        self.open(InventoryDialog::Batch, batch.map(|b| b.batch.id));
    }

    pub fn submit_dialog(&self) {
        let id = self.editing.get_untracked();
        let command = match self.dialog.get_untracked() {
            InventoryDialog::Closed => return,
            InventoryDialog::Supplier => self
                .supplier_form
                .with_untracked(SupplierFormState::to_payload)
                .map(|p| InventoryCommand::SaveSupplier(id, p)),
            InventoryDialog::Component => self
                .component_form
                .with_untracked(ComponentFormState::to_payload)
                .map(|p| InventoryCommand::SaveComponent(id, p)),
            InventoryDialog::Product => self
                .product_form
                .with_untracked(ProductFormState::to_payload)
                .map(|p| InventoryCommand::SaveProduct(id, p)),
            InventoryDialog::Bom => match id {
                Some(product_id) => self
                    .bom_form
                    .with_untracked(|lines| bom_payload(lines))
                    .map(|lines| InventoryCommand::ReplaceBom(product_id, lines)),
                None => Err("Select a product first".into()),
            },
            InventoryDialog::Batch => self
                .batch_form
                .with_untracked(BatchFormState::to_payload)
                .map(|p| InventoryCommand::SaveBatch(id, p)),
        };
        match command {
            Ok(command) => {
                self.form_error.set(None);
                self.command_action.dispatch(command);
            }
            Err(err) => self.form_error.set(Some(err)),
        }
    }

    pub fn ask(&self, command: InventoryCommand, message: impl Into<String>) {
        self.pending.set(Some((command, message.into())));
    }

    /// Asks to move the batch to its next lifecycle step.
    pub fn advance_batch(&self, detail: &BatchDetail) {
        match next_batch_status(&detail.batch.status) {
            Some(next) => {
                let message = if next == "completed" {
                    format!(
                        "Mark batch {} as completed? Its items will be added to stock.",
                        detail.batch.batch_code
                    )
                } else {
                    format!("Move batch {} to {}?", detail.batch.batch_code, next)
                };
                self.ask(InventoryCommand::AdvanceBatch(detail.batch.id, next.to_string()), message);
            }
            None => {
                self.toasts.error(format!("Batch {} is already completed", detail.batch.batch_code));
            }
        }
    }

    pub fn confirm_pending(&self) {
        if let Some((command, _)) = self.pending.get_untracked() {
            self.command_action.dispatch(command);
        }
    }
}

pub fn use_inventory_view_model() -> InventoryViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repository = InventoryRepository::new_with_client(Rc::new(api));
    let toasts = use_toasts();

    let reload = create_rw_signal(0u32);
    let repo_for_load = repository.clone();
    let snapshot = create_resource(
        move || reload.get(),
        move |_| {
            let repo = repo_for_load.clone();
            async move { repo.load().await }
        },
    );

    let repo_for_command = repository;
    let command_action = create_action(move |command: &InventoryCommand| {
        let repo = repo_for_command.clone();
        let command = command.clone();
        async move { repo.execute(command).await }
    });

    let vm = InventoryViewModel {
        tab: create_rw_signal(InventoryTab::default()),
        search: create_rw_signal(String::new()),
        page: create_rw_signal(1),
        reload,
        snapshot,
        dialog: create_rw_signal(InventoryDialog::Closed),
        editing: create_rw_signal(None),
        supplier_form: create_rw_signal(SupplierFormState::default()),
        component_form: create_rw_signal(ComponentFormState::default()),
        product_form: create_rw_signal(ProductFormState::default()),
        bom_form: create_rw_signal(Vec::new()),
        batch_form: create_rw_signal(BatchFormState::default()),
        form_error: create_rw_signal(None),
        command_action,
        pending: create_rw_signal(None),
        toasts,
        page_size: store_value(config::current().page_size),
    };

    create_effect(move |_| {
        vm.search.with(|_| ());
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
                    if vm.dialog.get_untracked() != InventoryDialog::Closed {
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
    use crate::{
        api::Batch,
        test_support::{
            fixtures::{id, product, stamp, supplier},
            ssr::with_runtime,
        },
    };

    fn batch(status: &str) -> BatchDetail {
        BatchDetail {
            batch: Batch {
                id: id(70),
                batch_code: "B-070".into(),
                supplier_id: id(1),
                status: status.into(),
                expected_date: None,
                received_date: None,
                notes: None,
                created_at: stamp(),
                updated_at: stamp(),
            },
            items: Vec::new(),
        }
    }

    #[test]
    fn switching_tabs_clears_search() {
        with_runtime(|| {
            let vm = use_inventory_view_model();
            vm.search.set("bolt".into());
            vm.page.set(3);
            vm.select_tab(InventoryTab::Suppliers);
            assert_eq!(vm.tab.get_untracked(), InventoryTab::Suppliers);
            assert!(vm.search.get_untracked().is_empty());
            assert_eq!(vm.page.get_untracked(), 1);
        });
    }

    #[test]
    fn editing_a_supplier_prefills_the_form() {
        with_runtime(|| {
            let vm = use_inventory_view_model();
            vm.open_supplier(Some(&supplier(4, "Acme Parts")));
            assert_eq!(vm.dialog.get_untracked(), InventoryDialog::Supplier);
            assert_eq!(vm.editing.get_untracked(), Some(id(4)));
            assert_eq!(vm.supplier_form.get_untracked().name, "Acme Parts");
        });
    }

    #[test]
    fn empty_product_form_is_rejected_locally() {
        with_runtime(|| {
            let vm = use_inventory_view_model();
            vm.open_product(None);
            vm.submit_dialog();
            assert_eq!(vm.form_error.get_untracked().as_deref(), Some("SKU and name are required"));
            assert_eq!(vm.command_action.version().get_untracked(), 0);
        });
    }

    #[test]
    fn bom_editor_opens_empty_for_products_without_lines() {
        with_runtime(|| {
            let vm = use_inventory_view_model();
            vm.open_bom(&product(50, "KIT", 10.0));
            assert_eq!(vm.dialog.get_untracked(), InventoryDialog::Bom);
            assert!(vm.bom_form.get_untracked().is_empty());
        });
    }

    #[test]
    fn advancing_asks_for_confirmation_with_next_step() {
        with_runtime(|| {
            let vm = use_inventory_view_model();
            vm.advance_batch(&batch("processing"));
            let (command, message) = vm.pending.get_untracked().unwrap();
            assert_eq!(command, InventoryCommand::AdvanceBatch(id(70), "completed".into()));
            assert!(message.contains("added to stock"));
        });
    }

    #[test]
    fn completed_batch_cannot_advance() {
        with_runtime(|| {
            let vm = use_inventory_view_model();
            vm.advance_batch(&batch("completed"));
            assert!(vm.pending.get_untracked().is_none());
        });
    }
}
