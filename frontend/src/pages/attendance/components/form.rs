use leptos::*;

use crate::{
    api::Employee,
    components::{
        common::{Button, ButtonVariant},
        layout::ErrorMessage,
    },
    pages::attendance::utils::{AttendanceFormState, KNOWN_STATUSES},
};

/// Fields of the attendance modal bound to a single form signal.
#[component]
pub fn AttendanceForm(
    form: RwSignal<AttendanceFormState>,
    employees: Signal<Vec<Employee>>,
    error: Signal<Option<String>>,
    saving: Signal<bool>,
    on_submit: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let field_class = "mt-1 block w-full rounded border border-border px-2 py-1";
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
            <label class="block text-sm text-fg-muted">
                {"Employee"}
                <select
                    class=field_class
                    prop:value=move || form.with(|f| f.employee_id.clone())
                    on:change=move |ev| form.update(|f| f.employee_id = event_target_value(&ev))
                >
                    <option value="">{"Select an employee"}</option>
                    <For
                        each=move || employees.get()
                        key=|e| e.id
                        children=move |e: Employee| {
                            view! {
                                <option value=e.id.to_string()>
                                    {format!("{} ({})", e.full_name, e.employee_code)}
                                </option>
                            }
                        }
                    />
                </select>
            </label>
            <div class="grid gap-3 md:grid-cols-3">
                <label class="block text-sm text-fg-muted">
                    {"Date"}
                    <input
                        type="date"
                        class=field_class
                        prop:value=move || form.with(|f| f.date.clone())
                        on:input=move |ev| form.update(|f| f.date = event_target_value(&ev))
                    />
                </label>
                <label class="block text-sm text-fg-muted">
                    {"Check in"}
                    <input
                        type="time"
                        class=field_class
                        prop:value=move || form.with(|f| f.check_in.clone())
                        on:input=move |ev| form.update(|f| f.check_in = event_target_value(&ev))
                    />
                </label>
                <label class="block text-sm text-fg-muted">
                    {"Check out"}
                    <input
                        type="time"
                        class=field_class
                        prop:value=move || form.with(|f| f.check_out.clone())
                        on:input=move |ev| form.update(|f| f.check_out = event_target_value(&ev))
                    />
                </label>
            </div>
            <label class="block text-sm text-fg-muted">
                {"Status tags (comma separated)"}
                <input
                    type="text"
                    list="attendance-statuses"
                    class=field_class
                    prop:value=move || form.with(|f| f.status.clone())
                    on:input=move |ev| form.update(|f| f.status = event_target_value(&ev))
                />
                <datalist id="attendance-statuses">
                    {KNOWN_STATUSES.iter().map(|s| view! { <option value=*s></option> }).collect_view()}
                </datalist>
            </label>
            <label class="block text-sm text-fg-muted">
                {"Note"}
                <textarea
                    class=field_class
                    prop:value=move || form.with(|f| f.note.clone())
                    on:input=move |ev| form.update(|f| f.note = event_target_value(&ev))
                ></textarea>
            </label>
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
    use crate::test_support::{
        fixtures::{date, employee},
        ssr::render_to_string,
    };

    #[test]
    fn lists_employees_and_shows_error() {
        let html = render_to_string(move || {
            let form = create_rw_signal(AttendanceFormState::for_date(date(2025, 3, 4)));
            view! {
                <AttendanceForm
                    form=form
                    employees=Signal::derive(|| vec![employee(10, "Alice Example", "Engineering", "active")])
                    error=Signal::derive(|| Some("Select an employee".to_string()))
                    saving=Signal::derive(|| false)
                    on_submit=Callback::new(|_| {})
                    on_cancel=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("Alice Example (EMP-010)"));
        assert!(html.contains("Select an employee"));
        assert!(html.contains("early-departure"));
    }
}
