use leptos::*;

use crate::{
    api::Employee,
    components::{common::StatusBadge, empty_state::EmptyState, pagination::Pagination},
    utils::{table::PageWindow, time::format_date},
};

#[component]
pub fn EmployeeList(
    rows: Signal<(Vec<Employee>, PageWindow)>,
    total: Signal<usize>,
    on_page: Callback<usize>,
    on_edit: Callback<Employee>,
    on_delete: Callback<Employee>,
) -> impl IntoView {
    let window = Signal::derive(move || rows.with(|(_, window)| *window));
    view! {
        <section class="bg-surface-elevated shadow rounded-lg overflow-hidden">
            <Show
                when=move || { total.get() > 0 }
                fallback=move || { view! { <EmptyState title="No employees found" /> } }
            >
                <table class="min-w-full divide-y divide-border text-sm">
                    <thead class="bg-surface-muted">
                        <tr>
                            <th class="px-4 py-2 text-left">{"Code"}</th>
                            <th class="px-4 py-2 text-left">{"Name"}</th>
                            <th class="px-4 py-2 text-left">{"Email"}</th>
                            <th class="px-4 py-2 text-left">{"Department"}</th>
                            <th class="px-4 py-2 text-left">{"Position"}</th>
                            <th class="px-4 py-2 text-left">{"Hired"}</th>
                            <th class="px-4 py-2 text-left">{"Status"}</th>
                            <th class="px-4 py-2"></th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-border">
                        {move || {
                            rows.get()
                                .0
                                .into_iter()
                                .map(|employee| {
                                    let color = if employee.is_active() { "green" } else { "gray" };
                                    let for_edit = employee.clone();
                                    let for_delete = employee.clone();
                                    view! {
                                        <tr>
                                            <td class="px-4 py-2 font-mono">{employee.employee_code.clone()}</td>
                                            <td class="px-4 py-2">
                                                <div class="flex items-center gap-2">
                                                    {employee.avatar_url.clone().map(|url| view! {
                                                        <img src=url alt="" class="h-6 w-6 rounded-full" />
                                                    })}
                                                    {employee.full_name.clone()}
                                                </div>
                                            </td>
                                            <td class="px-4 py-2">{employee.email.clone()}</td>
                                            <td class="px-4 py-2">{employee.department.clone()}</td>
                                            <td class="px-4 py-2">{employee.position.clone()}</td>
                                            <td class="px-4 py-2">{format_date(employee.hire_date)}</td>
                                            <td class="px-4 py-2">
                                                <StatusBadge label=employee.status.clone() color=color />
                                            </td>
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

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{fixtures::employee, ssr::render_to_string};
    use crate::utils::table::paginate;

    #[test]
    fn last_page_holds_remaining_rows() {
        let staff: Vec<Employee> = (1..=12)
            .map(|n| employee(n, &format!("Person {}", n), "Ops", "active"))
            .collect();
        let html = render_to_string(move || {
            let page = paginate(&staff, 5, 3);
            view! {
                <EmployeeList
                    rows=Signal::derive(move || page.clone())
                    total=Signal::derive(|| 12)
                    on_page=Callback::new(|_| {})
                    on_edit=Callback::new(|_| {})
                    on_delete=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("Person 11"));
        assert!(html.contains("Person 12"));
        assert!(!html.contains("EMP-010"));
        assert!(html.contains("Showing 11-12 of 12"));
    }
}
