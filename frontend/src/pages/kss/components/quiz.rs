use leptos::*;
use uuid::Uuid;

use crate::{
    api::{ApiError, Employee, KssAssignment, KssQuestion, QuizResult},
    components::{common::Button, empty_state::EmptyState, layout::ErrorMessage},
    pages::kss::utils::QuizState,
    utils::{format::format_percent, lookup::LookupMap},
};

/// Lets an assigned employee answer the selected lesson's questions.
#[component]
pub fn QuizPanel(
    questions: Signal<Vec<KssQuestion>>,
    assignments: Signal<Vec<KssAssignment>>,
    employees: Signal<LookupMap<Uuid, Employee>>,
    quiz: RwSignal<QuizState>,
    error: Signal<Option<String>>,
    result: Signal<Option<Result<QuizResult, ApiError>>>,
    submitting: Signal<bool>,
    on_submit: Callback<()>,
) -> impl IntoView {
    let last_score = move || {
        result.get().and_then(Result::ok).map(|outcome| {
            let verdict = if outcome.passed { "passed" } else { "not passed" };
            format!(
                "Last attempt: {} of {} correct, {} ({})",
                outcome.correct,
                outcome.total,
                format_percent(outcome.score),
                verdict
            )
        })
    };

    view! {
        <section class="space-y-3">
            <h3 class="text-base font-semibold text-fg">{"Take quiz"}</h3>
            <Show
                when=move || questions.with(|q| !q.is_empty())
                fallback=move || { view! { <EmptyState title="This lesson has no quiz" /> } }
            >
                <label class="block text-sm text-fg-muted">
                    {"Attempt for"}
                    <select
                        class="mt-1 block w-full rounded border border-border px-2 py-1"
                        prop:value=move || {
                            quiz.with(|q| q.assignment_id.map(|id| id.to_string()).unwrap_or_default())
                        }
                        on:change=move |ev| {
                            let chosen = Uuid::parse_str(&event_target_value(&ev)).ok();
                            quiz.update(|q| q.assignment_id = chosen);
                        }
                    >
                        <option value="">{"Select an assignment"}</option>
                        {move || {
                            let lookup = employees.get();
                            assignments
                                .get()
                                .into_iter()
                                .map(|a| {
                                    let name = lookup.label(&a.employee_id, |e| e.full_name.clone());
                                    view! { <option value=a.id.to_string()>{name}</option> }
                                })
                                .collect_view()
                        }}
                    </select>
                </label>
                <ol class="space-y-3">
                    {move || {
                        questions
                            .get()
                            .into_iter()
                            .map(|question| {
                                let question_id = question.id;
                                let group = format!("question-{}", question_id);
                                view! {
                                    <li class="rounded border border-border p-3 text-sm">
                                        <p class="font-medium mb-2">{question.prompt.clone()}</p>
                                        {question
                                            .options
                                            .iter()
                                            .enumerate()
                                            .map(|(index, option)| {
                                                let index = index as i32;
                                                view! {
                                                    <label class="flex items-center gap-2">
                                                        <input
                                                            type="radio"
                                                            name=group.clone()
                                                            prop:checked=move || {
                                                                quiz.with(|q| q.answers.get(&question_id) == Some(&index))
                                                            }
                                                            on:change=move |_| quiz.update(|q| q.select(question_id, index))
                                                        />
                                                        {option.clone()}
                                                    </label>
                                                }
                                            })
                                            .collect_view()}
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ol>
                {move || error.get().map(|message| view! { <ErrorMessage message=message /> })}
                <div class="flex items-center justify-between">
                    <p class="text-sm text-fg-muted">{last_score}</p>
                    <Button loading=submitting on:click=move |_| on_submit.call(())>{"Submit answers"}</Button>
                </div>
            </Show>
        </section>
    }
}
