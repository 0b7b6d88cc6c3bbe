use leptos::*;

use crate::{
    api::Employee,
    components::forms::{text_area, text_field, DialogForm, FIELD_CLASS},
    pages::kss::utils::{AssignFormState, LessonFormState, ModuleFormState, QuestionFormState},
};

#[component]
pub fn ModuleForm(
    form: RwSignal<ModuleFormState>,
    error: Signal<Option<String>>,
    saving: Signal<bool>,
    on_submit: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <DialogForm error=error saving=saving on_submit=on_submit on_cancel=on_cancel>
            {text_field(form, "Title", "text", |f| f.title.clone(), |f, v| f.title = v)}
            {text_field(form, "Category", "text", |f| f.category.clone(), |f, v| f.category = v)}
            {text_area(form, "Description", 3, |f| f.description.clone(), |f, v| f.description = v)}
            {text_field(form, "Document URL", "url", |f| f.document_url.clone(), |f, v| f.document_url = v)}
            <label class="flex items-center gap-2 text-sm text-fg-muted">
                <input
                    type="checkbox"
                    prop:checked=move || form.with(|f| f.is_published)
                    on:change=move |ev| form.update(|f| f.is_published = event_target_checked(&ev))
                />
                {"Published"}
            </label>
        </DialogForm>
    }
}

#[component]
pub fn LessonForm(
    form: RwSignal<LessonFormState>,
    error: Signal<Option<String>>,
    saving: Signal<bool>,
    on_submit: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <DialogForm error=error saving=saving on_submit=on_submit on_cancel=on_cancel>
            {text_field(form, "Title", "text", |f| f.title.clone(), |f, v| f.title = v)}
            <div class="grid gap-3 md:grid-cols-2">
                {text_field(form, "Position", "number", |f| f.position.clone(), |f, v| f.position = v)}
                {text_field(
                    form,
                    "Duration (minutes)",
                    "number",
                    |f| f.duration_minutes.clone(),
                    |f, v| f.duration_minutes = v,
                )}
            </div>
            {text_area(form, "Content", 6, |f| f.content.clone(), |f, v| f.content = v)}
        </DialogForm>
    }
}

#[component]
pub fn QuestionForm(
    form: RwSignal<QuestionFormState>,
    error: Signal<Option<String>>,
    saving: Signal<bool>,
    on_submit: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <DialogForm error=error saving=saving on_submit=on_submit on_cancel=on_cancel>
            {text_field(form, "Prompt", "text", |f| f.prompt.clone(), |f, v| f.prompt = v)}
            {text_area(form, "Options (one per line)", 4, |f| f.options.clone(), |f, v| f.options = v)}
            {text_field(
                form,
                "Correct option number",
                "number",
                |f| f.correct_option.clone(),
                |f, v| f.correct_option = v,
            )}
        </DialogForm>
    }
}

#[component]
pub fn AssignForm(
    form: RwSignal<AssignFormState>,
    employees: Signal<Vec<Employee>>,
    error: Signal<Option<String>>,
    saving: Signal<bool>,
    on_submit: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <DialogForm error=error saving=saving on_submit=on_submit on_cancel=on_cancel>
            <label class="block text-sm text-fg-muted">
                {"Employee"}
                <select
                    class=FIELD_CLASS
                    prop:value=move || form.with(|f| f.employee_id.clone())
                    on:change=move |ev| form.update(|f| f.employee_id = event_target_value(&ev))
                >
                    <option value="">{"Select an employee"}</option>
                    {move || {
                        employees
                            .get()
                            .into_iter()
                            .map(|e| {
                                view! {
                                    <option value=e.id.to_string()>
                                        {format!("{} ({})", e.full_name, e.employee_code)}
                                    </option>
                                }
                            })
                            .collect_view()
                    }}
                </select>
            </label>
            {text_field(form, "Due date", "date", |f| f.due_date.clone(), |f, v| f.due_date = v)}
        </DialogForm>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{fixtures::employee, ssr::render_to_string};

    #[test]
    fn module_form_shows_error_and_fields() {
        let html = render_to_string(move || {
            view! {
                <ModuleForm
                    form=create_rw_signal(ModuleFormState::default())
                    error=Signal::derive(|| Some("Title is required".to_string()))
                    saving=Signal::derive(|| false)
                    on_submit=Callback::new(|_| {})
                    on_cancel=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("Title is required"));
        assert!(html.contains("Document URL"));
        assert!(html.contains("Published"));
    }

    #[test]
    fn assign_form_lists_employees() {
        let html = render_to_string(move || {
            view! {
                <AssignForm
                    form=create_rw_signal(AssignFormState::default())
                    employees=Signal::derive(|| vec![employee(1, "Alice Example", "Engineering", "active")])
                    error=Signal::derive(|| None)
                    saving=Signal::derive(|| false)
                    on_submit=Callback::new(|_| {})
                    on_cancel=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("Alice Example (EMP-001)"));
        assert!(!html.contains("status-error-bg"));
    }
}
