use leptos::*;
use std::rc::Rc;
use uuid::Uuid;

use super::{
    repository::{KssCommand, KssRepository, KssSnapshot},
    utils::{
        all_module_stats, overall_stats, sorted_lessons, status_update, AssignFormState,
        LessonFormState, ModuleFormState, ModuleStats, OverallStats, QuestionFormState, QuizState,
    },
};
use crate::{
    api::{
        ApiClient, ApiError, Employee, KssAssignment, KssLesson, KssModule, KssQuestion,
        QuizResult, SubmitQuizPayload,
    },
    components::toast::{use_toasts, Toasts},
    utils::lookup::LookupMap,
};

/// Which modal is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KssDialog {
    #[default]
    Closed,
    Module,
    Lesson,
    Question,
    Assign,
}

type QuizRequest = (Uuid, SubmitQuizPayload);

#[derive(Clone, Copy)]
pub struct KssViewModel {
    pub reload: RwSignal<u32>,
    pub snapshot: Resource<u32, Result<KssSnapshot, ApiError>>,
    pub selected_module: RwSignal<Option<Uuid>>,
    pub selected_lesson: RwSignal<Option<Uuid>>,
    pub questions_reload: RwSignal<u32>,
    pub questions: Resource<(Option<Uuid>, u32), Result<Vec<KssQuestion>, ApiError>>,
    pub dialog: RwSignal<KssDialog>,
    pub module_form: RwSignal<ModuleFormState>,
    pub lesson_form: RwSignal<LessonFormState>,
    pub question_form: RwSignal<QuestionFormState>,
    pub assign_form: RwSignal<AssignFormState>,
    pub editing_module: RwSignal<Option<Uuid>>,
    pub editing_lesson: RwSignal<Option<Uuid>>,
    pub form_error: RwSignal<Option<String>>,
    pub command_action: Action<KssCommand, Result<String, ApiError>>,
    pub pending_delete: RwSignal<Option<(KssCommand, String)>>,
    pub quiz: RwSignal<QuizState>,
    pub quiz_action: Action<QuizRequest, Result<QuizResult, ApiError>>,
    pub quiz_error: RwSignal<Option<String>>,
    pub toasts: Toasts,
}

impl KssViewModel {
    fn data(&self) -> Signal<KssSnapshot> {
        let snapshot = self.snapshot;
        Signal::derive(move || snapshot.get().and_then(Result::ok).unwrap_or_default())
    }

    pub fn load_error(&self) -> Signal<Option<ApiError>> {
        let snapshot = self.snapshot;
        Signal::derive(move || snapshot.get().and_then(Result::err))
    }

    pub fn modules(&self) -> Signal<Vec<KssModule>> {
        let data = self.data();
        Signal::derive(move || data.with(|d| d.modules.clone()))
    }

    pub fn employees(&self) -> Signal<Vec<Employee>> {
        let data = self.data();
        Signal::derive(move || data.with(|d| d.employees.clone()))
    }

    pub fn employee_lookup(&self) -> Signal<LookupMap<Uuid, Employee>> {
        let data = self.data();
        Signal::derive(move || data.with(|d| LookupMap::build(&d.employees, |e| e.id)))
    }

    pub fn module_stats(&self) -> Signal<Vec<ModuleStats>> {
        let data = self.data();
        Signal::derive(move || {
            data.with(|d| all_module_stats(&d.modules, &d.lessons, &d.assignments))
        })
    }

    pub fn overall(&self) -> Signal<OverallStats> {
        let stats = self.module_stats();
        Signal::derive(move || stats.with(|s| overall_stats(s)))
    }

    pub fn current_module(&self) -> Signal<Option<KssModule>> {
        let data = self.data();
        let selected = self.selected_module;
        Signal::derive(move || {
            let id = selected.get()?;
            data.with(|d| d.modules.iter().find(|m| m.id == id).cloned())
        })
    }

    pub fn lessons(&self) -> Signal<Vec<KssLesson>> {
        let data = self.data();
        let selected = self.selected_module;
        Signal::derive(move || match selected.get() {
            Some(id) => data.with(|d| sorted_lessons(&d.lessons, id)),
            None => Vec::new(),
        })
    }

    pub fn assignments(&self) -> Signal<Vec<KssAssignment>> {
        let data = self.data();
        let selected = self.selected_module;
        Signal::derive(move || match selected.get() {
            Some(id) => data.with(|d| {
                d.assignments
                    .iter()
                    .filter(|a| a.module_id == id)
                    .cloned()
                    .collect()
            }),
            None => Vec::new(),
        })
    }

    pub fn question_list(&self) -> Signal<Vec<KssQuestion>> {
        let questions = self.questions;
        Signal::derive(move || questions.get().and_then(Result::ok).unwrap_or_default())
    }

    pub fn retry(&self) {
        self.reload.update(|v| *v = v.wrapping_add(1));
        self.questions_reload.update(|v| *v = v.wrapping_add(1));
    }

    pub fn select_module(&self, id: Uuid) {
        self.selected_module.set(Some(id));
        self.selected_lesson.set(None);
        self.quiz.set(QuizState::default());
        self.quiz_action.value().set(None);
    }

    pub fn select_lesson(&self, id: Uuid) {
        self.selected_lesson.set(Some(id));
        self.quiz.set(QuizState::default());
        self.quiz_error.set(None);
        self.quiz_action.value().set(None);
    }

    fn open(&self, dialog: KssDialog) {
        self.form_error.set(None);
        self.dialog.set(dialog);
    }

    pub fn close_dialog(&self) {
        self.dialog.set(KssDialog::Closed);
        self.form_error.set(None);
    }

    pub fn open_new_module(&self) {
        self.editing_module.set(None);
        self.module_form.set(ModuleFormState::default());
        self.open(KssDialog::Module);
    }

    pub fn open_edit_module(&self, module: &KssModule) {
        self.editing_module.set(Some(module.id));
        self.module_form.set(ModuleFormState::from_module(module));
        self.open(KssDialog::Module);
    }

    pub fn open_new_lesson(&self) {
        self.editing_lesson.set(None);
        let existing = self.lessons().get_untracked();
        self.lesson_form.set(LessonFormState::next_for(&existing));
        self.open(KssDialog::Lesson);
    }

    pub fn open_edit_lesson(&self, lesson: &KssLesson) {
        self.editing_lesson.set(Some(lesson.id));
        self.lesson_form.set(LessonFormState::from_lesson(lesson));
        self.open(KssDialog::Lesson);
    }

    pub fn open_new_question(&self) {
        self.question_form.set(QuestionFormState {
            correct_option: "1".into(),
            ..QuestionFormState::default()
        });
        self.open(KssDialog::Question);
    }

    pub fn open_assign(&self) {
        self.assign_form.set(AssignFormState::default());
        self.open(KssDialog::Assign);
    }

    fn dispatch_form(&self, command: Result<KssCommand, String>) {
        match command {
            Ok(command) => {
                self.form_error.set(None);
                self.command_action.dispatch(command);
            }
            Err(err) => self.form_error.set(Some(err)),
        }
    }

    pub fn submit_dialog(&self) {
        let module_id = self.selected_module.get_untracked();
        let lesson_id = self.selected_lesson.get_untracked();
        let command = match self.dialog.get_untracked() {
            KssDialog::Closed => return,
            KssDialog::Module => {
                let id = self.editing_module.get_untracked();
                self.module_form
                    .with_untracked(ModuleFormState::to_payload)
                    .map(|payload| KssCommand::SaveModule(id, payload))
            }
            KssDialog::Lesson => match module_id {
                Some(module_id) => self
                    .lesson_form
                    .with_untracked(LessonFormState::to_payload)
                    .map(|payload| KssCommand::SaveLesson {
                        id: self.editing_lesson.get_untracked(),
                        module_id,
                        payload,
                    }),
                None => Err("Select a module first".into()),
            },
            KssDialog::Question => match lesson_id {
                Some(lesson_id) => self
                    .question_form
                    .with_untracked(QuestionFormState::to_payload)
                    .map(|payload| KssCommand::AddQuestion(lesson_id, payload)),
                None => Err("Select a lesson first".into()),
            },
            KssDialog::Assign => match module_id {
                Some(module_id) => self
                    .assign_form
                    .with_untracked(|form| form.to_payload(module_id))
                    .map(KssCommand::Assign),
                None => Err("Select a module first".into()),
            },
        };
        self.dispatch_form(command);
    }

    pub fn set_assignment_status(&self, assignment: &KssAssignment, status: &str) {
        match status_update(assignment, status) {
            Ok(payload) => self
                .command_action
                .dispatch(KssCommand::UpdateAssignment(assignment.id, payload)),
            Err(err) => {
                self.toasts.error(err);
            }
        }
    }

    pub fn ask_delete(&self, command: KssCommand, message: impl Into<String>) {
        self.pending_delete.set(Some((command, message.into())));
    }

    pub fn confirm_delete(&self) {
        if let Some((command, _)) = self.pending_delete.get_untracked() {
            self.command_action.dispatch(command);
        }
    }

    pub fn submit_quiz(&self) {
        let Some(lesson_id) = self.selected_lesson.get_untracked() else {
            self.quiz_error.set(Some("Select a lesson first".into()));
            return;
        };
        let questions = self.question_list().get_untracked();
        match self.quiz.with_untracked(|quiz| quiz.to_payload(&questions)) {
            Ok(payload) => {
                self.quiz_error.set(None);
                self.quiz_action.dispatch((lesson_id, payload));
            }
            Err(err) => self.quiz_error.set(Some(err)),
        }
    }
}

pub fn use_kss_view_model() -> KssViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repository = KssRepository::new_with_client(Rc::new(api));
    let toasts = use_toasts();

    let reload = create_rw_signal(0u32);
    let repo_for_load = repository.clone();
    let snapshot = create_resource(
        move || reload.get(),
        move |_| {
            let repo = repo_for_load.clone();
            async move { repo.load().await }
        },
    );

    let selected_lesson = create_rw_signal(None::<Uuid>);
    let questions_reload = create_rw_signal(0u32);
    let repo_for_questions = repository.clone();
    let questions = create_resource(
        move || (selected_lesson.get(), questions_reload.get()),
        move |(lesson_id, _)| {
            let repo = repo_for_questions.clone();
            async move { repo.questions(lesson_id).await }
        },
    );

    let repo_for_command = repository.clone();
    let command_action = create_action(move |command: &KssCommand| {
        let repo = repo_for_command.clone();
        let command = command.clone();
        async move { repo.execute(command).await }
    });

    let repo_for_quiz = repository;
    let quiz_action = create_action(move |(lesson_id, payload): &QuizRequest| {
        let repo = repo_for_quiz.clone();
        let (lesson_id, payload) = (*lesson_id, payload.clone());
        async move { repo.submit_quiz(lesson_id, payload).await }
    });

    let vm = KssViewModel {
        reload,
        snapshot,
        selected_module: create_rw_signal(None),
        selected_lesson,
        questions_reload,
        questions,
        dialog: create_rw_signal(KssDialog::Closed),
        module_form: create_rw_signal(ModuleFormState::default()),
        lesson_form: create_rw_signal(LessonFormState::default()),
        question_form: create_rw_signal(QuestionFormState::default()),
        assign_form: create_rw_signal(AssignFormState::default()),
        editing_module: create_rw_signal(None),
        editing_lesson: create_rw_signal(None),
        form_error: create_rw_signal(None),
        command_action,
        pending_delete: create_rw_signal(None),
        quiz: create_rw_signal(QuizState::default()),
        quiz_action,
        quiz_error: create_rw_signal(None),
        toasts,
    };

    create_effect(move |_| {
        if let Some(result) = command_action.value().get() {
            let deleted = vm
                .pending_delete
                .get_untracked()
                .map(|(command, _)| command);
            vm.pending_delete.set(None);
            match result {
                Ok(message) => {
                    toasts.success(message);
                    vm.close_dialog();
                    match deleted {
                        Some(KssCommand::DeleteModule(_)) => vm.selected_module.set(None),
                        Some(KssCommand::DeleteLesson(_)) => vm.selected_lesson.set(None),
                        _ => {}
                    }
                    vm.retry();
                }
                Err(err) => {
                    toasts.error(err.error.clone());
                    if vm.dialog.get_untracked() != KssDialog::Closed {
                        vm.form_error.set(Some(err.error));
                    }
                }
            }
        }
    });

    create_effect(move |_| {
        if let Some(result) = quiz_action.value().get() {
            match result {
                Ok(outcome) => {
                    if outcome.passed {
                        toasts.success(format!("Passed with {:.1}%", outcome.score));
                    } else {
                        toasts.error(format!("Scored {:.1}%, not enough to pass", outcome.score));
                    }
                    vm.quiz.set(QuizState::default());
                    vm.reload.update(|v| *v = v.wrapping_add(1));
                }
                Err(err) => vm.quiz_error.set(Some(err.error)),
            }
        }
    });

    vm
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{fixtures::id, ssr::with_runtime};

    #[test]
    fn lesson_dialog_requires_selected_module() {
        with_runtime(|| {
            let vm = use_kss_view_model();
            vm.open_new_lesson();
            vm.lesson_form.update(|f| f.title = "Intro".into());
            vm.submit_dialog();
            assert_eq!(vm.form_error.get_untracked().as_deref(), Some("Select a module first"));
            assert_eq!(vm.command_action.version().get_untracked(), 0);
        });
    }

    #[test]
    fn selecting_module_clears_lesson_and_quiz() {
        with_runtime(|| {
            let vm = use_kss_view_model();
            vm.selected_lesson.set(Some(id(11)));
            vm.quiz.update(|q| q.select(id(1), 2));
            vm.select_module(id(1));
            assert_eq!(vm.selected_module.get_untracked(), Some(id(1)));
            assert!(vm.selected_lesson.get_untracked().is_none());
            assert!(vm.quiz.get_untracked().answers.is_empty());
        });
    }

    #[test]
    fn quiz_needs_lesson_before_submit() {
        with_runtime(|| {
            let vm = use_kss_view_model();
            vm.submit_quiz();
            assert_eq!(vm.quiz_error.get_untracked().as_deref(), Some("Select a lesson first"));
        });
    }

    #[test]
    fn new_question_defaults_to_first_option() {
        with_runtime(|| {
            let vm = use_kss_view_model();
            vm.open_new_question();
            assert_eq!(vm.dialog.get_untracked(), KssDialog::Question);
            assert_eq!(vm.question_form.get_untracked().correct_option, "1");
        });
    }
}
