use leptos::*;
use uuid::Uuid;

use crate::{
    api::{Customer, Product},
    components::forms::{text_area, text_field, DialogForm, FIELD_CLASS},
    pages::sales::utils::{CustomerFormState, ItemDraft, OrderFormState},
    utils::{format::format_money, lookup::LookupMap},
};

#[component]
pub fn CustomerForm(
    form: RwSignal<CustomerFormState>,
    error: Signal<Option<String>>,
    saving: Signal<bool>,
    on_submit: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <DialogForm error=error saving=saving on_submit=on_submit on_cancel=on_cancel>
            <div class="grid gap-3 md:grid-cols-2">
                {text_field(form, "Name", "text", |f| f.name.clone(), |f, v| f.name = v)}
                {text_field(form, "Company", "text", |f| f.company.clone(), |f, v| f.company = v)}
                {text_field(form, "Email", "email", |f| f.email.clone(), |f, v| f.email = v)}
                {text_field(form, "Phone", "tel", |f| f.phone.clone(), |f, v| f.phone = v)}
            </div>
            {text_area(form, "Address", 2, |f| f.address.clone(), |f, v| f.address = v)}
        </DialogForm>
    }
}

fn item_editor(
    form: RwSignal<OrderFormState>,
    products: Signal<Vec<Product>>,
    lookup: Signal<LookupMap<Uuid, Product>>,
) -> impl IntoView {
    let count = create_memo(move |_| form.with(|f| f.items.len()));
    let field = move |index: usize, read: fn(&ItemDraft) -> String| {
        form.with(|f| f.items.get(index).map(read).unwrap_or_default())
    };
    let write = move |index: usize, value: String, apply: fn(&mut ItemDraft, String)| {
        form.update(|f| {
            if let Some(item) = f.items.get_mut(index) {
                apply(item, value);
            }
        })
    };
    view! {
        <div class="space-y-2">
            {move || {
                (0..count.get())
                    .map(|index| {
                        view! {
                            <div class="flex items-center gap-2">
                                <select
                                    class="flex-1 rounded border border-border px-2 py-1"
                                    prop:value=move || field(index, |i| i.product_id.clone())
                                    on:change=move |ev| {
                                        let value = event_target_value(&ev);
                                        lookup.with_untracked(|products| {
                                            form.update(|f| f.choose_product(index, &value, products))
                                        });
                                    }
                                >
                                    <option value="">{"Select a product"}</option>
                                    {products
                                        .get()
                                        .into_iter()
                                        .map(|p| {
                                            view! {
                                                <option value=p.id.to_string()>{format!("{} · {}", p.sku, p.name)}</option>
                                            }
                                        })
                                        .collect_view()}
                                </select>
                                <input
                                    type="number"
                                    min="1"
                                    class="w-20 rounded border border-border px-2 py-1"
                                    prop:value=move || field(index, |i| i.quantity.clone())
                                    on:input=move |ev| write(index, event_target_value(&ev), |i, v| i.quantity = v)
                                />
                                <input
                                    type="number"
                                    min="0"
                                    step="0.01"
                                    class="w-28 rounded border border-border px-2 py-1"
                                    prop:value=move || field(index, |i| i.unit_price.clone())
                                    on:input=move |ev| write(index, event_target_value(&ev), |i, v| i.unit_price = v)
                                />
                                <button
                                    type="button"
                                    class="text-action-danger-bg underline text-sm"
                                    on:click=move |_| {
                                        form.update(|f| {
                                            if index < f.items.len() {
                                                f.items.remove(index);
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
                on:click=move |_| form.update(|f| f.items.push(ItemDraft::default()))
            >
                {"Add item"}
            </button>
        </div>
    }
}

#[component]
pub fn OrderForm(
    form: RwSignal<OrderFormState>,
    customers: Signal<Vec<Customer>>,
    products: Signal<Vec<Product>>,
    product_lookup: Signal<LookupMap<Uuid, Product>>,
    error: Signal<Option<String>>,
    saving: Signal<bool>,
    on_submit: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let totals = Signal::derive(move || form.with(OrderFormState::preview_totals));
    view! {
        <DialogForm error=error saving=saving on_submit=on_submit on_cancel=on_cancel>
            <div class="grid gap-3 md:grid-cols-2">
                <label class="block text-sm text-fg-muted">
                    {"Customer"}
                    <select
                        class=FIELD_CLASS
                        prop:value=move || form.with(|f| f.customer_id.clone())
                        on:change=move |ev| form.update(|f| f.customer_id = event_target_value(&ev))
                    >
                        <option value="">{"Select a customer"}</option>
                        {move || {
                            customers
                                .get()
                                .into_iter()
                                .map(|c| view! { <option value=c.id.to_string()>{c.name.clone()}</option> })
                                .collect_view()
                        }}
                    </select>
                </label>
                {text_field(form, "Order date", "date", |f| f.order_date.clone(), |f, v| f.order_date = v)}
                {text_field(form, "Discount %", "number", |f| f.discount_percent.clone(), |f, v| f.discount_percent = v)}
                {text_field(form, "Tax %", "number", |f| f.tax_percent.clone(), |f, v| f.tax_percent = v)}
            </div>
            {text_area(form, "Notes", 2, |f| f.notes.clone(), |f, v| f.notes = v)}
            <h3 class="text-sm font-semibold text-fg">{"Items"}</h3>
            {item_editor(form, products, product_lookup)}
            <dl class="grid grid-cols-2 gap-1 text-sm text-right">
                <dt class="text-fg-muted">{"Subtotal"}</dt>
                <dd>{move || format_money(totals.get().subtotal)}</dd>
                <dt class="text-fg-muted">{"Discount"}</dt>
                <dd>{move || format_money(totals.get().discount)}</dd>
                <dt class="text-fg-muted">{"Tax"}</dt>
                <dd>{move || format_money(totals.get().tax)}</dd>
                <dt class="font-semibold">{"Total"}</dt>
                <dd class="font-semibold">{move || format_money(totals.get().total)}</dd>
            </dl>
        </DialogForm>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{
        fixtures::{customer, id, product},
        ssr::render_to_string,
    };

    #[test]
    fn order_form_previews_totals_for_filled_lines() {
        let html = render_to_string(move || {
            let form = create_rw_signal(OrderFormState {
                customer_id: id(1).to_string(),
                order_date: "2025-03-04".into(),
                discount_percent: "10".into(),
                tax_percent: "0".into(),
                notes: String::new(),
                items: vec![
                    ItemDraft {
                        product_id: id(5).to_string(),
                        quantity: "2".into(),
                        unit_price: "50".into(),
                    },
                    ItemDraft::default(),
                ],
            });
            let products = vec![product(5, "CHAIR", 50.0)];
            let lookup = LookupMap::build(&products, |p| p.id);
            view! {
                <OrderForm
                    form=form
                    customers=Signal::derive(|| vec![customer(1, "Globex")])
                    products=Signal::derive(move || products.clone())
                    product_lookup=Signal::derive(move || lookup.clone())
                    error=Signal::derive(|| None)
                    saving=Signal::derive(|| false)
                    on_submit=Callback::new(|_| {})
                    on_cancel=Callback::new(|_| {})
                />
            }
        });
        assert_eq!(html.matches("Select a product").count(), 2);
        assert!(html.contains("CHAIR · Product CHAIR"));
        assert!(html.contains("Globex"));
        assert!(html.contains(&format_money(100.0)));
        assert!(html.contains(&format_money(90.0)));
    }

    #[test]
    fn customer_form_shows_validation_error() {
        let html = render_to_string(move || {
            view! {
                <CustomerForm
                    form=create_rw_signal(CustomerFormState::default())
                    error=Signal::derive(|| Some("Name is required".to_string()))
                    saving=Signal::derive(|| false)
                    on_submit=Callback::new(|_| {})
                    on_cancel=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("Name is required"));
        assert!(html.contains("Company"));
    }
}
