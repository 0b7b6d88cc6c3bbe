use chrono::{Datelike, NaiveDate};
use leptos::*;

use crate::pages::attendance::utils::{
    month_label, CalendarCell, DayStats, MonthCalendar, WEEKDAY_HEADERS,
};

#[component]
pub fn AttendanceCalendar(
    calendar: Signal<Option<MonthCalendar>>,
    on_previous: Callback<()>,
    on_next: Callback<()>,
    on_select_day: Callback<NaiveDate>,
) -> impl IntoView {
    let title = move || {
        calendar
            .get()
            .map(|c| month_label(c.year, c.month))
            .unwrap_or_default()
    };

    view! {
        <section class="bg-surface-elevated shadow rounded-lg p-4 space-y-3">
            <div class="flex items-center justify-between">
                <button
                    type="button"
                    class="px-3 py-1 rounded border border-border"
                    aria-label="Previous month"
                    on:click=move |_| on_previous.call(())
                >
                    {"‹"}
                </button>
                <h2 class="text-lg font-semibold text-fg">{title}</h2>
                <button
                    type="button"
                    class="px-3 py-1 rounded border border-border"
                    aria-label="Next month"
                    on:click=move |_| on_next.call(())
                >
                    {"›"}
                </button>
            </div>
            <div class="grid grid-cols-7 gap-1 text-center text-xs font-medium text-fg-muted">
                {WEEKDAY_HEADERS.iter().map(|day| view! { <div>{*day}</div> }).collect_view()}
            </div>
            <div class="grid grid-cols-7 gap-1">
                {move || {
                    calendar
                        .get()
                        .map(|calendar| {
                            calendar
                                .cells
                                .into_iter()
                                .map(|cell| match cell {
                                    CalendarCell::Blank => view! { <div class="h-16"></div> }.into_view(),
                                    CalendarCell::Day(stats) => {
                                        view! { <DayTile stats=stats on_select=on_select_day /> }.into_view()
                                    }
                                })
                                .collect_view()
                        })
                        .unwrap_or_default()
                }}
            </div>
        </section>
    }
}

#[component]
fn DayTile(stats: DayStats, on_select: Callback<NaiveDate>) -> impl IntoView {
    let date = stats.date;
    let detail = if stats.has_data() {
        format!("{}/{} attended", stats.attended, stats.total)
    } else {
        String::new()
    };
    view! {
        <button
            type="button"
            class=format!("h-16 rounded border border-border p-1 text-left calendar-{}", stats.color().as_str())
            title=detail
            on:click=move |_| on_select.call(date)
        >
            <div class="text-xs text-fg-muted">{date.day()}</div>
            <div class="text-sm font-semibold">{stats.label()}</div>
        </button>
    }
}
