use leptos::*;

use super::{
    components::{
        batches::BatchTable,
        forms::{BatchForm, BomEditor, ComponentForm, ProductForm, SupplierForm},
        products::ProductTable,
        stock::ComponentTable,
        suppliers::SupplierTable,
        tiles::InventorySummary,
    },
    repository::InventoryCommand,
    utils::InventoryTab,
    view_model::{use_inventory_view_model, InventoryDialog},
};
use crate::{
    api::{BatchDetail, Component, Product, Supplier},
    components::{
        common::{Button, SearchInput},
        confirm_dialog::ConfirmDialog,
        error::InlineErrorMessage,
        layout::{Layout, LoadingSpinner, PageHeader},
        modal::Modal,
    },
};

#[component]
pub fn InventoryPanel() -> impl IntoView {
    let vm = use_inventory_view_model();
    let loading = vm.snapshot.loading();
    let total = vm.match_count();
    let supplier_lookup = vm.supplier_lookup();
    let saving: Signal<bool> = vm.command_action.pending().into();
    let form_error: Signal<Option<String>> = vm.form_error.into();
    let on_page = Callback::new(move |page| vm.page.set(page));
    let close = Callback::new(move |_| vm.close_dialog());
    let submit = Callback::new(move |_| vm.submit_dialog());

    let new_label = move || match vm.tab.get() {
        InventoryTab::Components => "New component",
        InventoryTab::Products => "New product",
        InventoryTab::Suppliers => "New supplier",
        InventoryTab::Batches => "New batch",
    };
    let open_new = move |_| match vm.tab.get_untracked() {
        InventoryTab::Components => vm.open_component(None),
        InventoryTab::Products => vm.open_product(None),
        InventoryTab::Suppliers => vm.open_supplier(None),
        InventoryTab::Batches => vm.open_batch(None),
    };
    let dialog_title = Signal::derive(move || {
        let editing = vm.editing.get().is_some();
        match vm.dialog.get() {
            InventoryDialog::Supplier if editing => "Edit supplier",
            InventoryDialog::Supplier => "New supplier",
            InventoryDialog::Component if editing => "Edit component",
            InventoryDialog::Component => "New component",
            InventoryDialog::Product if editing => "Edit product",
            InventoryDialog::Product => "New product",
            InventoryDialog::Bom => "Bill of materials",
            InventoryDialog::Batch if editing => "Edit batch",
            InventoryDialog::Batch => "New batch",
            InventoryDialog::Closed => "",
        }
        .to_string()
    });
    let pending_message = Signal::derive(move || {
        vm.pending.get().map(|(_, message)| message).unwrap_or_default()
    });
    let pending_is_delete = Signal::derive(move || {
        vm.pending.with(|p| {
            !matches!(p, Some((InventoryCommand::AdvanceBatch(..), _)))
        })
    });

    view! {
        <Layout>
            <PageHeader title="Inventory" subtitle="Components, products, suppliers and import batches">
                <Button on:click=open_new>{new_label}</Button>
            </PageHeader>
            <InlineErrorMessage error=vm.load_error() on_retry=Callback::new(move |_| vm.retry()) />
            <InventorySummary tiles=vm.tiles() />
            <nav class="flex gap-2 border-b border-border mb-4">
                {InventoryTab::ALL
                    .into_iter()
                    .map(|tab| {
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
                                {tab.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>
            <div class="mb-4">
                {move || {
                    let placeholder = vm.tab.get().search_placeholder();
                    view! { <SearchInput value=vm.search placeholder=placeholder /> }
                }}
            </div>
            <Show when=move || loading.get()>
                <LoadingSpinner />
            </Show>
            <section class="bg-surface-elevated shadow rounded-lg overflow-hidden">
                {move || match vm.tab.get() {
                    InventoryTab::Components => view! {
                        <ComponentTable
                            rows=vm.component_page()
                            total=total
                            suppliers=supplier_lookup
                            on_page=on_page
                            on_edit=Callback::new(move |c: Component| vm.open_component(Some(&c)))
                            on_delete=Callback::new(move |c: Component| {
                                vm.ask(InventoryCommand::DeleteComponent(c.id), format!("Delete component {}?", c.sku))
                            })
                        />
                    }
                    .into_view(),
                    InventoryTab::Products => view! {
                        <ProductTable
                            rows=vm.product_page()
                            total=total
                            on_page=on_page
                            on_bom=Callback::new(move |p: Product| vm.open_bom(&p))
                            on_edit=Callback::new(move |p: Product| vm.open_product(Some(&p)))
                            on_delete=Callback::new(move |p: Product| {
                                vm.ask(InventoryCommand::DeleteProduct(p.id), format!("Delete product {}?", p.sku))
                            })
                        />
                    }
                    .into_view(),
                    InventoryTab::Suppliers => view! {
                        <SupplierTable
                            rows=vm.supplier_page()
                            total=total
                            on_page=on_page
                            on_edit=Callback::new(move |s: Supplier| vm.open_supplier(Some(&s)))
                            on_delete=Callback::new(move |s: Supplier| {
                                vm.ask(InventoryCommand::DeleteSupplier(s.id), format!("Delete supplier {}?", s.name))
                            })
                        />
                    }
                    .into_view(),
                    InventoryTab::Batches => view! {
                        <BatchTable
                            rows=vm.batch_page()
                            total=total
                            suppliers=supplier_lookup
                            on_page=on_page
                            on_advance=Callback::new(move |b: BatchDetail| vm.advance_batch(&b))
                            on_edit=Callback::new(move |b: BatchDetail| vm.open_batch(Some(&b)))
                            on_delete=Callback::new(move |b: BatchDetail| {
                                vm.ask(
                                    InventoryCommand::DeleteBatch(b.batch.id),
                                    format!("Delete batch {}?", b.batch.batch_code),
                                )
                            })
                        />
                    }
                    .into_view(),
                }}
            </section>
            <Modal
                is_open=Signal::derive(move || vm.dialog.get() != InventoryDialog::Closed)
                title=dialog_title
                on_close=close
            >
                {move || match vm.dialog.get() {
                    InventoryDialog::Supplier => view! {
                        <SupplierForm form=vm.supplier_form error=form_error saving=saving on_submit=submit on_cancel=close />
                    }
                    .into_view(),
                    InventoryDialog::Component => view! {
                        <ComponentForm
                            form=vm.component_form
                            suppliers=vm.suppliers()
                            error=form_error
                            saving=saving
                            on_submit=submit
                            on_cancel=close
                        />
                    }
                    .into_view(),
                    InventoryDialog::Product => view! {
                        <ProductForm form=vm.product_form error=form_error saving=saving on_submit=submit on_cancel=close />
                    }
                    .into_view(),
                    InventoryDialog::Bom => view! {
                        <BomEditor
                            lines=vm.bom_form
                            components=vm.components()
                            error=form_error
                            saving=saving
                            on_submit=submit
                            on_cancel=close
                        />
                    }
                    .into_view(),
                    InventoryDialog::Batch => view! {
                        <BatchForm
                            form=vm.batch_form
                            suppliers=vm.suppliers()
                            components=vm.components()
                            error=form_error
                            saving=saving
                            on_submit=submit
                            on_cancel=close
                        />
                    }
                    .into_view(),
                    InventoryDialog::Closed => ().into_view(),
                }}
            </Modal>
            <ConfirmDialog
                is_open=Signal::derive(move || vm.pending.get().is_some())
                title="Please confirm"
                message=pending_message
                confirm_label=Signal::derive(move || {
                    if pending_is_delete.get() { "Delete".to_string() } else { "Continue".to_string() }
                })
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
    fn renders_tabs_and_component_list_by_default() {
        let html = render_to_string(move || view! { <InventoryPanel /> });
        for label in ["Components", "Products", "Suppliers", "Batches"] {
            assert!(html.contains(label));
        }
        assert!(html.contains("Search name or SKU"));
        assert!(html.contains("No components found"));
    }
}
