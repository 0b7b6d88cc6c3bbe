use leptos::*;
use uuid::Uuid;

use crate::{
    components::{
        cards::{StatCard, StatGrid},
        empty_state::EmptyState,
    },
    pages::kss::utils::{ModuleStats, OverallStats},
    utils::format::format_percent,
};

#[component]
pub fn OverallSummary(overall: Signal<OverallStats>) -> impl IntoView {
    let value = move |f: fn(&OverallStats) -> String| Signal::derive(move || overall.with(f));
    view! {
        <StatGrid>
            <StatCard label="Modules" value=value(|o| o.modules.to_string()) hint=value(|o| format!("{} lessons", o.lessons)) />
            <StatCard label="Assignments" value=value(|o| o.assigned.to_string()) />
            <StatCard label="Completed" value=value(|o| o.completed.to_string()) />
            <StatCard label="In progress" value=value(|o| o.in_progress.to_string()) />
            <StatCard label="Not started" value=value(|o| o.not_started.to_string()) />
            <StatCard label="Completion rate" value=value(|o| format_percent(o.completion_rate)) />
        </StatGrid>
    }
}

#[component]
pub fn ModuleTable(
    stats: Signal<Vec<ModuleStats>>,
    selected: Signal<Option<Uuid>>,
    on_select: Callback<Uuid>,
) -> impl IntoView {
    view! {
        <section class="bg-surface-elevated shadow rounded-lg overflow-hidden">
            <Show
                when=move || stats.with(|s| !s.is_empty())
                fallback=move || { view! { <EmptyState title="No training modules yet" /> } }
            >
                <table class="min-w-full divide-y divide-border text-sm">
                    <thead class="bg-surface-muted">
                        <tr>
                            <th class="px-4 py-2 text-left">{"Module"}</th>
                            <th class="px-4 py-2 text-right">{"Lessons"}</th>
                            <th class="px-4 py-2 text-right">{"Minutes"}</th>
                            <th class="px-4 py-2 text-right">{"Assigned"}</th>
                            <th class="px-4 py-2 text-right">{"Done / Active / New"}</th>
                            <th class="px-4 py-2 text-left">{"Completion"}</th>
                            <th class="px-4 py-2 text-right">{"Avg. progress"}</th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-border">
                        {move || {
                            let current = selected.get();
                            stats
                                .get()
                                .into_iter()
                                .map(|row| {
                                    let id = row.module_id;
                                    let row_class = if current == Some(id) {
                                        "bg-surface-muted cursor-pointer"
                                    } else {
                                        "cursor-pointer hover:bg-surface-muted"
                                    };
                                    let width = format!("width: {:.0}%", row.completion_rate.clamp(0.0, 100.0));
                                    view! {
                                        <tr class=row_class on:click=move |_| on_select.call(id)>
                                            <td class="px-4 py-2 font-medium">{row.title.clone()}</td>
                                            <td class="px-4 py-2 text-right">{row.lesson_count}</td>
                                            <td class="px-4 py-2 text-right">{row.total_minutes}</td>
                                            <td class="px-4 py-2 text-right">{row.assigned}</td>
                                            <td class="px-4 py-2 text-right">
                                                {format!("{} / {} / {}", row.completed, row.in_progress, row.not_started)}
                                            </td>
                                            <td class="px-4 py-2">
                                                <div class="h-2 w-32 rounded bg-surface-muted">
                                                    <div class="h-2 rounded bg-status-success-bg" style=width></div>
                                                </div>
                                                <span class="text-xs">{format_percent(row.completion_rate)}</span>
                                            </td>
                                            <td class="px-4 py-2 text-right">{format_percent(row.average_progress)}</td>
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

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{fixtures::id, ssr::render_to_string};

    #[test]
    fn module_rows_show_rates() {
        let html = render_to_string(move || {
            let stats = vec![ModuleStats {
                module_id: id(1),
                title: "Safety".into(),
                lesson_count: 4,
                total_minutes: 60,
                assigned: 4,
                completed: 1,
                in_progress: 2,
                not_started: 1,
                completion_rate: 25.0,
                average_progress: 37.5,
            }];
            view! {
                <ModuleTable
                    stats=Signal::derive(move || stats.clone())
                    selected=Signal::derive(|| None)
                    on_select=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("Safety"));
        assert!(html.contains("1 / 2 / 1"));
        assert!(html.contains("25.0%"));
        assert!(html.contains("37.5%"));
    }

    #[test]
    fn overall_summary_shows_zero_rate_when_unassigned() {
        let html = render_to_string(move || {
            view! { <OverallSummary overall=Signal::derive(OverallStats::default) /> }
        });
        assert!(html.contains("Completion rate"));
        assert!(html.contains("0.0%"));
    }
}
