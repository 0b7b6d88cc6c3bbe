use leptos::*;

use super::{
    components::{
        calendar::AttendanceCalendar, filters::AttendanceFilters, form::AttendanceForm,
        records::RecordTable, summary::StatusSummary,
    },
    view_model::use_attendance_view_model,
};
use crate::{
    api::AttendanceRecord,
    components::{
        common::Button,
        confirm_dialog::ConfirmDialog,
        error::InlineErrorMessage,
        layout::{Layout, LoadingSpinner, PageHeader},
        modal::Modal,
    },
    utils::time::today_in_app_tz,
};

#[component]
pub fn AttendancePanel() -> impl IntoView {
    let vm = use_attendance_view_model();
    let filtered = vm.filtered();
    let total = Signal::derive(move || filtered.with(Vec::len));
    let loading = vm.snapshot.loading();
    let saving = vm.save_action.pending();

    let modal_title = Signal::derive(move || {
        if vm.editing.get().is_some() {
            "Edit attendance".to_string()
        } else {
            "New attendance record".to_string()
        }
    });
    let delete_message = Signal::derive(move || {
        vm.delete_target
            .get()
            .map(|record| format!("Delete the attendance record of {}?", record.date))
            .unwrap_or_default()
    });

    view! {
        <Layout>
            <PageHeader title="Attendance" subtitle="Daily attendance, monthly calendar and export">
                <Button on:click=move |_| vm.open_create(today_in_app_tz())>{"New record"}</Button>
            </PageHeader>
            <div class="space-y-6">
                <InlineErrorMessage
                    error=vm.load_error()
                    on_retry=Callback::new(move |_| vm.retry())
                />
                <AttendanceFilters
                    employees=vm.employees()
                    employee=vm.employee_filter
                    from=vm.from_input
                    to=vm.to_input
                    status=vm.status_input
                    error=vm.filter_error.into()
                    on_employee_change=Callback::new(move |value| vm.select_employee(value))
                    on_apply=Callback::new(move |_| vm.apply_filters())
                    on_clear=Callback::new(move |_| vm.clear_filters())
                    on_export=Callback::new(move |_| vm.export_csv())
                />
                <Show when=move || loading.get()>
                    <LoadingSpinner />
                </Show>
                <div class="grid gap-6 lg:grid-cols-2">
                    <AttendanceCalendar
                        calendar=vm.calendar()
                        on_previous=Callback::new(move |_| vm.shift_month(-1))
                        on_next=Callback::new(move |_| vm.shift_month(1))
                        on_select_day=Callback::new(move |date| vm.open_create(date))
                    />
                    <StatusSummary counts=vm.status_counts() total=total />
                </div>
                <RecordTable
                    rows=vm.page_rows()
                    total=total
                    employees=vm.employee_lookup()
                    on_page=Callback::new(move |page| vm.page.set(page))
                    on_edit=Callback::new(move |record: AttendanceRecord| vm.open_edit(&record))
                    on_delete=Callback::new(move |record| vm.delete_target.set(Some(record)))
                />
            </div>
            <Modal
                is_open=vm.form_open.into()
                title=modal_title
                on_close=Callback::new(move |_| vm.close_form())
            >
                <AttendanceForm
                    form=vm.form
                    employees=vm.employees()
                    error=vm.form_error.into()
                    saving=saving.into()
                    on_submit=Callback::new(move |_| vm.submit_form())
                    on_cancel=Callback::new(move |_| vm.close_form())
                />
            </Modal>
            <ConfirmDialog
                is_open=Signal::derive(move || vm.delete_target.get().is_some())
                title="Delete record"
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

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn renders_page_sections_before_data_arrives() {
        let html = render_to_string(move || view! { <AttendancePanel /> });
        assert!(html.contains("Attendance"));
        assert!(html.contains("New record"));
        assert!(html.contains("Export CSV"));
        assert!(html.contains("Mon"));
        assert!(html.contains("No attendance records"));
    }
}
