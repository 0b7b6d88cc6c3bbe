use leptos::*;

use crate::{
    api::{EMPLOYEE_ROLES, EMPLOYEE_STATUSES},
    components::{
        common::{Button, ButtonVariant},
        layout::ErrorMessage,
    },
    pages::employees::utils::EmployeeFormState,
};

const FIELD_CLASS: &str = "mt-1 block w-full rounded border border-border px-2 py-1";

#[component]
fn TextField(
    form: RwSignal<EmployeeFormState>,
    #[prop(into)] label: String,
    #[prop(default = "text")] kind: &'static str,
    get: fn(&EmployeeFormState) -> String,
    set: fn(&mut EmployeeFormState, String),
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

#[component]
pub fn EmployeeForm(
    form: RwSignal<EmployeeFormState>,
    error: Signal<Option<String>>,
    saving: Signal<bool>,
    on_submit: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <form
            class="space-y-3"
            on:submit=move |ev| {
                ev.prevent_default();
                on_submit.call(());
            }
        >
            <Show when=move || error.get().is_some()>
                <ErrorMessage message=error.get().unwrap_or_default() />
            </Show>
            <div class="grid gap-3 md:grid-cols-2">
                <TextField form=form label="Employee code" get=|f| f.employee_code.clone() set=|f, v| f.employee_code = v />
                <TextField form=form label="Full name" get=|f| f.full_name.clone() set=|f, v| f.full_name = v />
                <TextField form=form label="Email" kind="email" get=|f| f.email.clone() set=|f, v| f.email = v />
                <TextField form=form label="Phone" get=|f| f.phone.clone() set=|f, v| f.phone = v />
                <TextField form=form label="Department" get=|f| f.department.clone() set=|f, v| f.department = v />
                <TextField form=form label="Position" get=|f| f.position.clone() set=|f, v| f.position = v />
                <label class="block text-sm text-fg-muted">
                    {"Role"}
                    <select
                        class=FIELD_CLASS
                        prop:value=move || form.with(|f| f.role.clone())
                        on:change=move |ev| form.update(|f| f.role = event_target_value(&ev))
                    >
                        {EMPLOYEE_ROLES.iter().map(|r| view! { <option value=*r>{*r}</option> }).collect_view()}
                    </select>
                </label>
                <label class="block text-sm text-fg-muted">
                    {"Status"}
                    <select
                        class=FIELD_CLASS
                        prop:value=move || form.with(|f| f.status.clone())
                        on:change=move |ev| form.update(|f| f.status = event_target_value(&ev))
                    >
                        {EMPLOYEE_STATUSES.iter().map(|s| view! { <option value=*s>{*s}</option> }).collect_view()}
                    </select>
                </label>
                <TextField form=form label="Hire date" kind="date" get=|f| f.hire_date.clone() set=|f, v| f.hire_date = v />
                <TextField form=form label="Avatar URL" kind="url" get=|f| f.avatar_url.clone() set=|f, v| f.avatar_url = v />
                <TextField form=form label="Signature URL" kind="url" get=|f| f.signature_url.clone() set=|f, v| f.signature_url = v />
            </div>
            <div class="flex justify-end gap-2">
                <Button variant=ButtonVariant::Secondary attr:type="button" on:click=move |_| on_cancel.call(())>
                    {"Cancel"}
                </Button>
                <Button attr:type="submit" loading=saving>{"Save"}</Button>
            </div>
        </form>
    }
}
