use leptos::*;
use uuid::Uuid;

use crate::{
    api::{KssLesson, KssQuestion},
    components::{common::Button, empty_state::EmptyState},
};

#[component]
pub fn LessonList(
    lessons: Signal<Vec<KssLesson>>,
    selected: Signal<Option<Uuid>>,
    on_select: Callback<Uuid>,
    on_add: Callback<()>,
    on_edit: Callback<KssLesson>,
    on_delete: Callback<KssLesson>,
) -> impl IntoView {
    view! {
        <section class="space-y-2">
            <div class="flex items-center justify-between">
                <h3 class="text-base font-semibold text-fg">{"Lessons"}</h3>
                <Button on:click=move |_| on_add.call(())>{"Add lesson"}</Button>
            </div>
            <Show
                when=move || lessons.with(|l| !l.is_empty())
                fallback=move || { view! { <EmptyState title="No lessons in this module" /> } }
            >
                <ol class="divide-y divide-border rounded border border-border">
                    {move || {
                        let current = selected.get();
                        lessons
                            .get()
                            .into_iter()
                            .map(|lesson| {
                                let id = lesson.id;
                                let for_edit = lesson.clone();
                                let for_delete = lesson.clone();
                                let class = if current == Some(id) {
                                    "flex items-center justify-between px-3 py-2 bg-surface-muted"
                                } else {
                                    "flex items-center justify-between px-3 py-2"
                                };
                                view! {
                                    <li class=class>
                                        <button
                                            type="button"
                                            class="text-left"
                                            on:click=move |_| on_select.call(id)
                                        >
                                            <span class="font-medium">
                                                {format!("{}. {}", lesson.position, lesson.title)}
                                            </span>
                                            <span class="ml-2 text-xs text-fg-muted">
                                                {format!("{} min", lesson.duration_minutes)}
                                            </span>
                                        </button>
                                        <span class="space-x-2 text-sm">
                                            <button
                                                type="button"
                                                class="underline"
                                                on:click=move |_| on_edit.call(for_edit.clone())
                                            >
                                                {"Edit"}
                                            </button>
                                            <button
                                                type="button"
                                                class="underline text-action-danger-bg"
                                                on:click=move |_| on_delete.call(for_delete.clone())
                                            >
                                                {"Delete"}
                                            </button>
                                        </span>
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ol>
            </Show>
        </section>
    }
}

#[component]
pub fn QuestionList(
    questions: Signal<Vec<KssQuestion>>,
    on_add: Callback<()>,
    on_delete: Callback<KssQuestion>,
) -> impl IntoView {
    view! {
        <section class="space-y-2">
            <div class="flex items-center justify-between">
                <h3 class="text-base font-semibold text-fg">{"Quiz questions"}</h3>
                <Button on:click=move |_| on_add.call(())>{"Add question"}</Button>
            </div>
            <ul class="space-y-2">
                {move || {
                    questions
                        .get()
                        .into_iter()
                        .map(|question| {
                            let for_delete = question.clone();
                            let correct = usize::try_from(question.correct_option).ok();
                            view! {
                                <li class="rounded border border-border p-3 text-sm">
                                    <div class="flex justify-between gap-2">
                                        <p class="font-medium">{question.prompt.clone()}</p>
                                        <button
                                            type="button"
                                            class="underline text-action-danger-bg"
                                            on:click=move |_| on_delete.call(for_delete.clone())
                                        >
                                            {"Delete"}
                                        </button>
                                    </div>
                                    <ol class="list-decimal list-inside">
                                        {question
                                            .options
                                            .iter()
                                            .enumerate()
                                            .map(|(i, option)| {
                                                let class = if Some(i) == correct { "font-semibold" } else { "" };
                                                view! { <li class=class>{option.clone()}</li> }
                                            })
                                            .collect_view()}
                                    </ol>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
        </section>
    }
}
