use leptos::*;
use std::collections::HashSet;
use uuid::Uuid;

use super::{
    components::{
        assignments::AssignmentTable,
        forms::{AssignForm, LessonForm, ModuleForm, QuestionForm},
        lessons::{LessonList, QuestionList},
        overview::{ModuleTable, OverallSummary},
        quiz::QuizPanel,
    },
    repository::KssCommand,
    view_model::{use_kss_view_model, KssDialog},
};
use crate::{
    api::{KssAssignment, KssLesson, KssQuestion},
    components::{
        common::{Button, ButtonVariant},
        confirm_dialog::ConfirmDialog,
        error::InlineErrorMessage,
        layout::{Layout, LoadingSpinner, PageHeader},
        modal::Modal,
    },
};

#[component]
pub fn KssPanel() -> impl IntoView {
    let vm = use_kss_view_model();
    let loading = vm.snapshot.loading();
    let current_module = vm.current_module();
    let lessons = vm.lessons();
    let lesson_ids = Signal::derive(move || {
        lessons.with(|rows| rows.iter().map(|l| l.id).collect::<HashSet<Uuid>>())
    });
    let employee_lookup = vm.employee_lookup();
    let saving: Signal<bool> = vm.command_action.pending().into();

    let dialog_title = Signal::derive(move || {
        match vm.dialog.get() {
            KssDialog::Module if vm.editing_module.get().is_some() => "Edit module",
            KssDialog::Module => "New module",
            KssDialog::Lesson if vm.editing_lesson.get().is_some() => "Edit lesson",
            KssDialog::Lesson => "New lesson",
            KssDialog::Question => "New question",
            KssDialog::Assign => "Assign module",
            KssDialog::Closed => "",
        }
        .to_string()
    });
    let delete_message = Signal::derive(move || {
        vm.pending_delete
            .get()
            .map(|(_, message)| message)
            .unwrap_or_default()
    });
    let close = Callback::new(move |_| vm.close_dialog());
    let submit = Callback::new(move |_| vm.submit_dialog());
    let form_error: Signal<Option<String>> = vm.form_error.into();

    view! {
        <Layout>
            <PageHeader title="Training" subtitle="Knowledge sharing modules and progress">
                <Button on:click=move |_| vm.open_new_module()>{"New module"}</Button>
            </PageHeader>
            <InlineErrorMessage error=vm.load_error() on_retry=Callback::new(move |_| vm.retry()) />
            <Show when=move || loading.get()>
                <LoadingSpinner />
            </Show>
            <div class="space-y-6">
                <OverallSummary overall=vm.overall() />
                <ModuleTable
                    stats=vm.module_stats()
                    selected=vm.selected_module.into()
                    on_select=Callback::new(move |id| vm.select_module(id))
                />
                {move || {
                    current_module
                        .get()
                        .map(|module| {
                            let for_edit = module.clone();
                            let module_id = module.id;
                            let title = module.title.clone();
                            view! {
                                <section class="bg-surface-elevated shadow rounded-lg p-4 space-y-6">
                                    <div class="flex flex-wrap items-start justify-between gap-3">
                                        <div>
                                            <h2 class="text-lg font-semibold text-fg">{module.title.clone()}</h2>
                                            <p class="text-sm text-fg-muted">
                                                {module.category.clone().unwrap_or_default()}
                                                {if module.is_published { " · published" } else { " · draft" }}
                                            </p>
                                            {module.description.clone().map(|d| view! { <p class="text-sm mt-1">{d}</p> })}
                                            {module.document_url.clone().map(|url| {
                                                view! {
                                                    <a class="text-sm underline" href=url target="_blank" rel="noopener">
                                                        {"Open document"}
                                                    </a>
                                                }
                                            })}
                                        </div>
                                        <div class="flex gap-2">
                                            <Button
                                                variant=ButtonVariant::Secondary
                                                on:click=move |_| vm.open_edit_module(&for_edit)
                                            >
                                                {"Edit"}
                                            </Button>
                                            <Button
                                                variant=ButtonVariant::Danger
                                                on:click=move |_| {
                                                    vm.ask_delete(
                                                        KssCommand::DeleteModule(module_id),
                                                        format!("Delete module \"{}\" with its lessons and assignments?", title),
                                                    )
                                                }
                                            >
                                                {"Delete"}
                                            </Button>
                                        </div>
                                    </div>
                                    <div class="grid gap-6 lg:grid-cols-2">
                                        <LessonList
                                            lessons=lessons
                                            selected=vm.selected_lesson.into()
                                            on_select=Callback::new(move |id| vm.select_lesson(id))
                                            on_add=Callback::new(move |_| vm.open_new_lesson())
                                            on_edit=Callback::new(move |lesson: KssLesson| vm.open_edit_lesson(&lesson))
                                            on_delete=Callback::new(move |lesson: KssLesson| {
                                                vm.ask_delete(
                                                    KssCommand::DeleteLesson(lesson.id),
                                                    format!("Delete lesson \"{}\"?", lesson.title),
                                                )
                                            })
                                        />
                                        <AssignmentTable
                                            assignments=vm.assignments()
                                            lesson_ids=lesson_ids
                                            employees=employee_lookup
                                            on_assign=Callback::new(move |_| vm.open_assign())
                                            on_status=Callback::new(move |(assignment, status): (KssAssignment, String)| {
                                                vm.set_assignment_status(&assignment, &status)
                                            })
                                            on_delete=Callback::new(move |assignment: KssAssignment| {
                                                vm.ask_delete(
                                                    KssCommand::DeleteAssignment(assignment.id),
                                                    "Remove this assignment?",
                                                )
                                            })
                                        />
                                    </div>
                                    <Show when=move || vm.selected_lesson.get().is_some()>
                                        <div class="grid gap-6 lg:grid-cols-2">
                                            <QuestionList
                                                questions=vm.question_list()
                                                on_add=Callback::new(move |_| vm.open_new_question())
                                                on_delete=Callback::new(move |question: KssQuestion| {
                                                    vm.ask_delete(
                                                        KssCommand::DeleteQuestion(question.id),
                                                        "Delete this question?",
                                                    )
                                                })
                                            />
                                            <QuizPanel
                                                questions=vm.question_list()
                                                assignments=vm.assignments()
                                                employees=employee_lookup
                                                quiz=vm.quiz
                                                error=vm.quiz_error.into()
                                                result=vm.quiz_action.value().into()
                                                submitting=vm.quiz_action.pending().into()
                                                on_submit=Callback::new(move |_| vm.submit_quiz())
                                            />
                                        </div>
                                    </Show>
                                </section>
                            }
                        })
                }}
            </div>
            <Modal
                is_open=Signal::derive(move || vm.dialog.get() != KssDialog::Closed)
                title=dialog_title
                on_close=close
            >
                {move || match vm.dialog.get() {
                    KssDialog::Module => view! {
                        <ModuleForm form=vm.module_form error=form_error saving=saving on_submit=submit on_cancel=close />
                    }
                    .into_view(),
                    KssDialog::Lesson => view! {
                        <LessonForm form=vm.lesson_form error=form_error saving=saving on_submit=submit on_cancel=close />
                    }
                    .into_view(),
                    KssDialog::Question => view! {
                        <QuestionForm form=vm.question_form error=form_error saving=saving on_submit=submit on_cancel=close />
                    }
                    .into_view(),
                    KssDialog::Assign => view! {
                        <AssignForm
                            form=vm.assign_form
                            employees=vm.employees()
                            error=form_error
                            saving=saving
                            on_submit=submit
                            on_cancel=close
                        />
                    }
                    .into_view(),
                    KssDialog::Closed => ().into_view(),
                }}
            </Modal>
            <ConfirmDialog
                is_open=Signal::derive(move || vm.pending_delete.get().is_some())
                title="Confirm delete"
                message=delete_message
                confirm_label="Delete"
                destructive=true
                confirm_disabled=vm.command_action.pending()
                on_confirm=Callback::new(move |_| vm.confirm_delete())
                on_cancel=Callback::new(move |_| vm.pending_delete.set(None))
            />
        </Layout>
    }
}
