use leptos::*;

use crate::{
    api::{Component, Supplier},
    components::forms::{text_area, text_field, DialogForm, FIELD_CLASS},
    pages::inventory::utils::{
        BatchFormState, ComponentFormState, LineDraft, ProductFormState, SupplierFormState,
    },
};

/// Form states that carry editable component lines.
trait HasLines {
    fn lines(&self) -> &[LineDraft];
    fn lines_mut(&mut self) -> &mut Vec<LineDraft>;
}

impl HasLines for Vec<LineDraft> {
    fn lines(&self) -> &[LineDraft] {
        self
    }

    fn lines_mut(&mut self) -> &mut Vec<LineDraft> {
        self
    }
}

impl HasLines for BatchFormState {
    fn lines(&self) -> &[LineDraft] {
        &self.items
    }

    fn lines_mut(&mut self) -> &mut Vec<LineDraft> {
        &mut self.items
    }
}

fn line_editor<T: HasLines + 'static>(
    form: RwSignal<T>,
    components: Signal<Vec<Component>>,
) -> impl IntoView {
    // Rows are rebuilt only when lines are added or removed so inputs keep focus.
    let count = create_memo(move |_| form.with(|f| f.lines().len()));
    view! {
        <div class="space-y-2">
            {move || {
                (0..count.get())
                    .map(|index| {
                        view! {
                            <div class="flex items-center gap-2">
                                <select
                                    class="flex-1 rounded border border-border px-2 py-1"
                                    prop:value=move || {
                                        form.with(|f| {
                                            f.lines().get(index).map(|l| l.component_id.clone()).unwrap_or_default()
                                        })
                                    }
                                    on:change=move |ev| {
                                        let value = event_target_value(&ev);
                                        form.update(|f| {
                                            if let Some(line) = f.lines_mut().get_mut(index) {
                                                line.component_id = value;
                                            }
                                        })
                                    }
                                >
                                    <option value="">{"Select a component"}</option>
                                    {components
                                        .get()
                                        .into_iter()
                                        .map(|c| {
                                            view! {
                                                <option value=c.id.to_string()>{format!("{} · {}", c.sku, c.name)}</option>
                                            }
                                        })
                                        .collect_view()}
                                </select>
                                <input
                                    type="number"
                                    min="1"
                                    class="w-24 rounded border border-border px-2 py-1"
                                    prop:value=move || {
                                        form.with(|f| f.lines().get(index).map(|l| l.quantity.clone()).unwrap_or_default())
                                    }
                                    on:input=move |ev| {
                                        let value = event_target_value(&ev);
                                        form.update(|f| {
                                            if let Some(line) = f.lines_mut().get_mut(index) {
                                                line.quantity = value;
                                            }
                                        })
                                    }
                                />
                                <button
                                    type="button"
                                    class="text-action-danger-bg underline text-sm"
                                    on:click=move |_| {
                                        form.update(|f| {
                                            if index < f.lines().len() {
                                                f.lines_mut().remove(index);
                                            }
                                        })
                                    }
                                >
                                    {"Remove"}
                                </button>
                            </div>
                        }
                    })
                    .collect_view()
            }}
            <button
                type="button"
                class="text-action-primary-bg underline text-sm"
                on:click=move |_| form.update(|f| f.lines_mut().push(LineDraft::default()))
            >
                {"Add line"}
            </button>
        </div>
    }
}

#[component]
pub fn SupplierForm(
    form: RwSignal<SupplierFormState>,
    error: Signal<Option<String>>,
    saving: Signal<bool>,
    on_submit: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <DialogForm error=error saving=saving on_submit=on_submit on_cancel=on_cancel>
            <div class="grid gap-3 md:grid-cols-2">
                {text_field(form, "Name", "text", |f| f.name.clone(), |f, v| f.name = v)}
                {text_field(form, "Contact", "text", |f| f.contact_name.clone(), |f, v| f.contact_name = v)}
                {text_field(form, "Email", "email", |f| f.email.clone(), |f, v| f.email = v)}
                {text_field(form, "Phone", "tel", |f| f.phone.clone(), |f, v| f.phone = v)}
            </div>
            {text_area(form, "Address", 2, |f| f.address.clone(), |f, v| f.address = v)}
        </DialogForm>
    }
}

#[component]
pub fn ComponentForm(
    form: RwSignal<ComponentFormState>,
    suppliers: Signal<Vec<Supplier>>,
    error: Signal<Option<String>>,
    saving: Signal<bool>,
    on_submit: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <DialogForm error=error saving=saving on_submit=on_submit on_cancel=on_cancel>
            <div class="grid gap-3 md:grid-cols-2">
                {text_field(form, "SKU", "text", |f| f.sku.clone(), |f, v| f.sku = v)}
                {text_field(form, "Name", "text", |f| f.name.clone(), |f, v| f.name = v)}
                {text_field(form, "Unit", "text", |f| f.unit.clone(), |f, v| f.unit = v)}
                {text_field(form, "Unit cost", "number", |f| f.unit_cost.clone(), |f, v| f.unit_cost = v)}
                {text_field(form, "In stock", "number", |f| f.stock_quantity.clone(), |f, v| f.stock_quantity = v)}
                {text_field(form, "Reorder level", "number", |f| f.reorder_level.clone(), |f, v| f.reorder_level = v)}
                <label class="block text-sm text-fg-muted">
                    {"Supplier"}
                    <select
                        class=FIELD_CLASS
                        prop:value=move || form.with(|f| f.supplier_id.clone())
                        on:change=move |ev| form.update(|f| f.supplier_id = event_target_value(&ev))
                    >
                        <option value="">{"None"}</option>
                        {move || {
                            suppliers
                                .get()
                                .into_iter()
                                .map(|s| view! { <option value=s.id.to_string()>{s.name.clone()}</option> })
                                .collect_view()
                        }}
                    </select>
                </label>
                {text_field(form, "Image URL", "url", |f| f.image_url.clone(), |f, v| f.image_url = v)}
            </div>
        </DialogForm>
    }
}

#[component]
pub fn ProductForm(
    form: RwSignal<ProductFormState>,
    error: Signal<Option<String>>,
    saving: Signal<bool>,
    on_submit: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <DialogForm error=error saving=saving on_submit=on_submit on_cancel=on_cancel>
            <div class="grid gap-3 md:grid-cols-2">
                {text_field(form, "SKU", "text", |f| f.sku.clone(), |f, v| f.sku = v)}
                {text_field(form, "Name", "text", |f| f.name.clone(), |f, v| f.name = v)}
                {text_field(form, "Price", "number", |f| f.price.clone(), |f, v| f.price = v)}
                {text_field(form, "Image URL", "url", |f| f.image_url.clone(), |f, v| f.image_url = v)}
            </div>
            {text_area(form, "Description", 3, |f| f.description.clone(), |f, v| f.description = v)}
        </DialogForm>
    }
}

/// Replaces the whole bill of materials of one product.
#[component]
pub fn BomEditor(
    lines: RwSignal<Vec<LineDraft>>,
    components: Signal<Vec<Component>>,
    error: Signal<Option<String>>,
    saving: Signal<bool>,
    on_submit: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <DialogForm error=error saving=saving on_submit=on_submit on_cancel=on_cancel>
            <p class="text-sm text-fg-muted">{"Components and quantities needed for one unit."}</p>
            {line_editor(lines, components)}
        </DialogForm>
    }
}

#[component]
pub fn BatchForm(
    form: RwSignal<BatchFormState>,
    suppliers: Signal<Vec<Supplier>>,
    components: Signal<Vec<Component>>,
    error: Signal<Option<String>>,
    saving: Signal<bool>,
    on_submit: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <DialogForm error=error saving=saving on_submit=on_submit on_cancel=on_cancel>
            <div class="grid gap-3 md:grid-cols-2">
                {text_field(form, "Batch code", "text", |f| f.batch_code.clone(), |f, v| f.batch_code = v)}
                <label class="block text-sm text-fg-muted">
                    {"Supplier"}
                    <select
                        class=FIELD_CLASS
                        prop:value=move || form.with(|f| f.supplier_id.clone())
                        on:change=move |ev| form.update(|f| f.supplier_id = event_target_value(&ev))
                    >
                        <option value="">{"Select a supplier"}</option>
                        {move || {
                            suppliers
                                .get()
                                .into_iter()
                                .map(|s| view! { <option value=s.id.to_string()>{s.name.clone()}</option> })
                                .collect_view()
                        }}
                    </select>
                </label>
                {text_field(form, "Expected date", "date", |f| f.expected_date.clone(), |f, v| f.expected_date = v)}
            </div>
            {text_area(form, "Notes", 2, |f| f.notes.clone(), |f, v| f.notes = v)}
            <h3 class="text-sm font-semibold text-fg">{"Items"}</h3>
            {line_editor(form, components)}
        </DialogForm>
    }
}
