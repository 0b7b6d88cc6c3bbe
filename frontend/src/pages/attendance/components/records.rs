use leptos::*;
use uuid::Uuid;

use crate::{
    api::{AttendanceRecord, Employee},
    components::{common::StatusBadge, empty_state::EmptyState, pagination::Pagination},
    pages::attendance::utils::{record_color, status_text},
    utils::{lookup::LookupMap, table::PageWindow},
};

#[component]
pub fn RecordTable(
    rows: Signal<(Vec<AttendanceRecord>, PageWindow)>,
    total: Signal<usize>,
    employees: Signal<LookupMap<Uuid, Employee>>,
    on_page: Callback<usize>,
    on_edit: Callback<AttendanceRecord>,
    on_delete: Callback<AttendanceRecord>,
) -> impl IntoView {
    let window = Signal::derive(move || rows.with(|(_, window)| *window));

    view! {
        <section class="bg-surface-elevated shadow rounded-lg overflow-hidden">
            <Show
                when=move || { total.get() > 0 }
                fallback=move || { view! { <EmptyState title="No attendance records" description="Adjust the filters or add a record." /> } }
            >
                <table class="min-w-full divide-y divide-border text-sm">
                    <thead class="bg-surface-muted">
                        <tr>
                            <th class="px-4 py-2 text-left">{"Date"}</th>
                            <th class="px-4 py-2 text-left">{"Employee"}</th>
                            <th class="px-4 py-2 text-left">{"Status"}</th>
                            <th class="px-4 py-2 text-left">{"Check in"}</th>
                            <th class="px-4 py-2 text-left">{"Check out"}</th>
                            <th class="px-4 py-2 text-left">{"Note"}</th>
                            <th class="px-4 py-2"></th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-border">
                        {move || {
                            let lookup = employees.get();
                            rows.get()
                                .0
                                .into_iter()
                                .map(|record| {
                                    let name = lookup.label(&record.employee_id, |e| e.full_name.clone());
                                    let color = record_color(&record).as_str();
                                    let status = status_text(&record.status);
                                    let status = if status.is_empty() { "-".to_string() } else { status };
                                    let for_edit = record.clone();
                                    let for_delete = record.clone();
                                    view! {
                                        <tr>
                                            <td class="px-4 py-2">{record.date.format("%Y-%m-%d").to_string()}</td>
                                            <td class="px-4 py-2">{name}</td>
                                            <td class="px-4 py-2"><StatusBadge label=status color=color /></td>
                                            <td class="px-4 py-2">
                                                {record.check_in.map(|t| t.format("%H:%M").to_string()).unwrap_or_else(|| "-".into())}
                                            </td>
                                            <td class="px-4 py-2">
                                                {record.check_out.map(|t| t.format("%H:%M").to_string()).unwrap_or_else(|| "-".into())}
                                            </td>
                                            <td class="px-4 py-2">{record.note.clone().unwrap_or_default()}</td>
                                            <td class="px-4 py-2 text-right space-x-2">
                                                <button
                                                    type="button"
                                                    class="text-action-primary-bg underline"
                                                    on:click=move |_| on_edit.call(for_edit.clone())
                                                >
                                                    {"Edit"}
                                                </button>
                                                <button
                                                    type="button"
                                                    class="text-action-danger-bg underline"
                                                    on:click=move |_| on_delete.call(for_delete.clone())
                                                >
                                                    {"Delete"}
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>
            </Show>
            <Pagination window=window total=total on_change=on_page />
        </section>
    }
}
