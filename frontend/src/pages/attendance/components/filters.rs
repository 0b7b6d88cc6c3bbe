use leptos::*;

use crate::{
    api::Employee,
    components::{
        common::{Button, ButtonVariant},
        layout::ErrorMessage,
    },
    pages::attendance::utils::{KNOWN_STATUSES, NO_STATUS_LABEL},
};

#[component]
pub fn AttendanceFilters(
    employees: Signal<Vec<Employee>>,
    employee: RwSignal<String>,
    from: RwSignal<String>,
    to: RwSignal<String>,
    status: RwSignal<String>,
    error: Signal<Option<String>>,
    on_employee_change: Callback<String>,
    on_apply: Callback<()>,
    on_clear: Callback<()>,
    on_export: Callback<()>,
) -> impl IntoView {
    view! {
        <section class="bg-surface-elevated shadow rounded-lg p-4 space-y-3">
            <div class="grid gap-3 md:grid-cols-5">
                <label class="text-sm text-fg-muted">
                    {"Employee"}
                    <select
                        class="mt-1 block w-full rounded border border-border px-2 py-1"
                        on:change=move |ev| on_employee_change.call(event_target_value(&ev))
                        prop:value=move || employee.get()
                    >
                        <option value="">{"All employees"}</option>
                        <For
                            each=move || employees.get()
                            key=|e| e.id
                            children=move |e: Employee| {
                                view! { <option value=e.id.to_string()>{e.full_name}</option> }
                            }
                        />
                    </select>
                </label>
                <label class="text-sm text-fg-muted">
                    {"From"}
                    <input
                        type="date"
                        class="mt-1 block w-full rounded border border-border px-2 py-1"
                        prop:value=move || from.get()
                        on:input=move |ev| from.set(event_target_value(&ev))
                    />
                </label>
                <label class="text-sm text-fg-muted">
                    {"To"}
                    <input
                        type="date"
                        class="mt-1 block w-full rounded border border-border px-2 py-1"
                        prop:value=move || to.get()
                        on:input=move |ev| to.set(event_target_value(&ev))
                    />
                </label>
                <label class="text-sm text-fg-muted">
                    {"Status"}
                    <select
                        class="mt-1 block w-full rounded border border-border px-2 py-1"
                        prop:value=move || status.get()
                        on:change=move |ev| status.set(event_target_value(&ev))
                    >
                        <option value="">{"Any status"}</option>
                        {KNOWN_STATUSES
                            .iter()
                            .chain(std::iter::once(&NO_STATUS_LABEL))
                            .map(|s| view! { <option value=*s>{*s}</option> })
                            .collect_view()}
                    </select>
                </label>
                <div class="flex items-end gap-2">
                    <Button on:click=move |_| on_apply.call(())>{"Apply"}</Button>
                    <Button variant=ButtonVariant::Secondary on:click=move |_| on_clear.call(())>
                        {"Clear"}
                    </Button>
                </div>
            </div>
            <Show when=move || error.get().is_some()>
                <ErrorMessage message=error.get().unwrap_or_default() />
            </Show>
            <div class="flex justify-end">
                <Button variant=ButtonVariant::Secondary on:click=move |_| on_export.call(())>
                    {"Export CSV"}
                </Button>
            </div>
        </section>
    }
}
