use leptos::*;

use super::{
    components::{form::EmployeeForm, list::EmployeeList, tiles::EmployeeSummary},
    view_model::use_employees_view_model,
};
use crate::{
    api::{Employee, EMPLOYEE_STATUSES},
    components::{
        common::{Button, SearchInput},
        confirm_dialog::ConfirmDialog,
        error::InlineErrorMessage,
        layout::{Layout, LoadingSpinner, PageHeader},
        modal::Modal,
    },
};

#[component]
pub fn EmployeesPanel() -> impl IntoView {
    let vm = use_employees_view_model();
    let filtered = vm.filtered();
    let total = Signal::derive(move || filtered.with(Vec::len));
    let departments = vm.departments();
    let loading = vm.employees.loading();

    let modal_title = Signal::derive(move || {
        if vm.editing.get().is_some() {
            "Edit employee".to_string()
        } else {
            "New employee".to_string()
        }
    });
    let delete_message = Signal::derive(move || {
        vm.delete_target
            .get()
            .map(|employee| format!("Delete {} ({})?", employee.full_name, employee.employee_code))
            .unwrap_or_default()
    });

    view! {
        <Layout>
            <PageHeader title="Employees" subtitle="Staff directory">
                <Button on:click=move |_| vm.open_create()>{"New employee"}</Button>
            </PageHeader>
            <InlineErrorMessage error=vm.load_error() on_retry=Callback::new(move |_| vm.retry()) />
            <EmployeeSummary tiles=vm.tiles() />
            <div class="flex flex-col gap-3 md:flex-row md:items-center mb-4">
                <SearchInput value=vm.search placeholder="Search name, email or code" />
                <select
                    class="rounded border border-border px-2 py-2 text-sm"
                    prop:value=move || vm.department.get()
                    on:change=move |ev| vm.department.set(event_target_value(&ev))
                >
                    <option value="">{"All departments"}</option>
                    {move || {
                        departments
                            .get()
                            .into_iter()
                            .map(|d| view! { <option value=d.clone()>{d.clone()}</option> })
                            .collect_view()
                    }}
                </select>
                <select
                    class="rounded border border-border px-2 py-2 text-sm"
                    prop:value=move || vm.status.get()
                    on:change=move |ev| vm.status.set(event_target_value(&ev))
                >
                    <option value="">{"Any status"}</option>
                    {EMPLOYEE_STATUSES.iter().map(|s| view! { <option value=*s>{*s}</option> }).collect_view()}
                </select>
            </div>
            <Show when=move || loading.get()>
                <LoadingSpinner />
            </Show>
            <EmployeeList
                rows=vm.page_rows()
                total=total
                on_page=Callback::new(move |page| vm.page.set(page))
                on_edit=Callback::new(move |employee: Employee| vm.open_edit(&employee))
                on_delete=Callback::new(move |employee| vm.delete_target.set(Some(employee)))
            />
            <Modal
                is_open=vm.form_open.into()
                title=modal_title
                on_close=Callback::new(move |_| vm.close_form())
            >
                <EmployeeForm
                    form=vm.form
                    error=vm.form_error.into()
                    saving=vm.save_action.pending().into()
                    on_submit=Callback::new(move |_| vm.submit_form())
                    on_cancel=Callback::new(move |_| vm.close_form())
                />
            </Modal>
            <ConfirmDialog
                is_open=Signal::derive(move || vm.delete_target.get().is_some())
                title="Delete employee"
                message=delete_message
                confirm_label="Delete"
                destructive=true
                confirm_disabled=vm.delete_action.pending()
                on_confirm=Callback::new(move |_| vm.confirm_delete())
                on_cancel=Callback::new(move |_| vm.delete_target.set(None))
            />
        </Layout>
    }
}
