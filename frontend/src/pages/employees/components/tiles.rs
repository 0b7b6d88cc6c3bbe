use leptos::*;

use crate::{
    components::cards::{StatCard, StatGrid},
    pages::employees::utils::EmployeeTiles,
};

#[component]
pub fn EmployeeSummary(tiles: Signal<EmployeeTiles>) -> impl IntoView {
    view! {
        <StatGrid>
            <StatCard label="Employees" value=Signal::derive(move || tiles.get().total.to_string()) />
            <StatCard label="Active" value=Signal::derive(move || tiles.get().active.to_string()) />
            <StatCard label="Inactive" value=Signal::derive(move || tiles.get().inactive.to_string()) />
        </StatGrid>
        <div class="flex flex-wrap gap-2 my-4 text-sm">
            {move || {
                tiles
                    .get()
                    .by_department
                    .into_iter()
                    .map(|(department, count)| {
                        view! {
                            <span class="rounded-full border border-border px-3 py-1">
                                {department}": "{count}
                            </span>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
