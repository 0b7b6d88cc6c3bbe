use leptos::*;

use crate::components::{
    common::{Button, ButtonVariant},
    layout::ErrorMessage,
};

pub const FIELD_CLASS: &str = "mt-1 block w-full rounded border border-border px-2 py-1";

/// Labelled `<input>` bound to one string field of a form state.
pub fn text_field<T: 'static>(
    form: RwSignal<T>,
    label: &'static str,
    kind: &'static str,
    get: fn(&T) -> String,
    set: fn(&mut T, String),
) -> impl IntoView {
    view! {
        <label class="block text-sm text-fg-muted">
            {label}
            <input
                type=kind
                class=FIELD_CLASS
                prop:value=move || form.with(get)
                on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
            />
        </label>
    }
}

pub fn text_area<T: 'static>(
    form: RwSignal<T>,
    label: &'static str,
    rows: u32,
    get: fn(&T) -> String,
    set: fn(&mut T, String),
) -> impl IntoView {
    view! {
        <label class="block text-sm text-fg-muted">
            {label}
            <textarea
                rows=rows
                class=FIELD_CLASS
                prop:value=move || form.with(get)
                on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
            ></textarea>
        </label>
    }
}

/// Error banner, body and the Cancel/Save row shared by modal forms.
#[component]
pub fn DialogForm(
    error: Signal<Option<String>>,
    saving: Signal<bool>,
    on_submit: Callback<()>,
    on_cancel: Callback<()>,
    children: Children,
) -> impl IntoView {
    view! {
        <form
            class="space-y-3"
            on:submit=move |ev| {
                ev.prevent_default();
                on_submit.call(());
            }
        >
            {move || error.get().map(|message| view! { <ErrorMessage message=message /> })}
            {children()}
            <div class="flex justify-end gap-2">
                <Button variant=ButtonVariant::Secondary attr:type="button" on:click=move |_| on_cancel.call(())>
                    {"Cancel"}
                </Button>
                <Button attr:type="submit" loading=saving>{"Save"}</Button>
            </div>
        </form>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[derive(Clone, Default)]
    struct Draft {
        name: String,
    }

    #[test]
    fn dialog_form_renders_error_and_fields() {
        let html = render_to_string(move || {
            let form = create_rw_signal(Draft { name: "Acme".into() });
            view! {
                <DialogForm
                    error=Signal::derive(|| Some("Name is required".to_string()))
                    saving=Signal::derive(|| false)
                    on_submit=Callback::new(|_| {})
                    on_cancel=Callback::new(|_| {})
                >
                    {text_field(form, "Name", "text", |d| d.name.clone(), |d, v| d.name = v)}
                </DialogForm>
            }
        });
        assert!(html.contains("Name is required"));
        assert!(html.contains("Cancel"));
        assert!(html.contains(">Name"));
    }
}
