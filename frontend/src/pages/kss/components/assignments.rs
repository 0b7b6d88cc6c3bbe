use leptos::*;
use std::collections::HashSet;
use uuid::Uuid;

use crate::{
    api::{Employee, KssAssignment, ASSIGNMENT_STATUSES},
    components::{common::{Button, StatusBadge}, empty_state::EmptyState},
    pages::kss::utils::{assignment_progress, assignment_state},
    utils::{format::format_percent, lookup::LookupMap, time::format_date},
};

#[component]
pub fn AssignmentTable(
    assignments: Signal<Vec<KssAssignment>>,
    lesson_ids: Signal<HashSet<Uuid>>,
    employees: Signal<LookupMap<Uuid, Employee>>,
    on_assign: Callback<()>,
    on_status: Callback<(KssAssignment, String)>,
    on_delete: Callback<KssAssignment>,
) -> impl IntoView {
    view! {
        <section class="space-y-2">
            <div class="flex items-center justify-between">
                <h3 class="text-base font-semibold text-fg">{"Assignments"}</h3>
                <Button on:click=move |_| on_assign.call(())>{"Assign employee"}</Button>
            </div>
            <Show
                when=move || assignments.with(|a| !a.is_empty())
                fallback=move || { view! { <EmptyState title="Nobody is assigned to this module" /> } }
            >
                <table class="min-w-full divide-y divide-border text-sm">
                    <thead class="bg-surface-muted">
                        <tr>
                            <th class="px-3 py-2 text-left">{"Employee"}</th>
                            <th class="px-3 py-2 text-left">{"State"}</th>
                            <th class="px-3 py-2 text-right">{"Progress"}</th>
                            <th class="px-3 py-2 text-right">{"Score"}</th>
                            <th class="px-3 py-2 text-left">{"Due"}</th>
                            <th class="px-3 py-2 text-left">{"Status"}</th>
                            <th class="px-3 py-2"></th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-border">
                        {move || {
                            let ids = lesson_ids.get();
                            let lookup = employees.get();
                            assignments
                                .get()
                                .into_iter()
                                .map(|assignment| {
                                    let state = assignment_state(&assignment, &ids);
                                    let progress = assignment_progress(&assignment, &ids);
                                    let name = lookup.label(&assignment.employee_id, |e| e.full_name.clone());
                                    let for_status = assignment.clone();
                                    let for_delete = assignment.clone();
                                    view! {
                                        <tr>
                                            <td class="px-3 py-2">{name}</td>
                                            <td class="px-3 py-2">
                                                <StatusBadge label=state.label() color=state.color() />
                                            </td>
                                            <td class="px-3 py-2 text-right">{format_percent(progress)}</td>
                                            <td class="px-3 py-2 text-right">
                                                {assignment.score.map(format_percent).unwrap_or_else(|| "-".into())}
                                            </td>
                                            <td class="px-3 py-2">{format_date(assignment.due_date)}</td>
                                            <td class="px-3 py-2">
                                                <select
                                                    class="rounded border border-border px-2 py-1"
                                                    prop:value=assignment.status.clone()
                                                    on:change=move |ev| {
                                                        on_status.call((for_status.clone(), event_target_value(&ev)))
                                                    }
                                                >
                                                    {ASSIGNMENT_STATUSES
                                                        .iter()
                                                        .map(|s| view! { <option value=*s selected=assignment.status == *s>{*s}</option> })
                                                        .collect_view()}
                                                </select>
                                            </td>
                                            <td class="px-3 py-2 text-right">
                                                <button
                                                    type="button"
                                                    class="underline text-action-danger-bg"
                                                    on:click=move |_| on_delete.call(for_delete.clone())
                                                >
                                                    {"Remove"}
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
        </section>
    }
}
