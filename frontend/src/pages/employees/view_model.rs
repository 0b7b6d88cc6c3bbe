use leptos::*;
use std::rc::Rc;
use uuid::Uuid;

use super::{
    repository::EmployeesRepository,
    utils::{departments, employee_tiles, EmployeeFilter, EmployeeFormState, EmployeeTiles},
};
use crate::{
    api::{ApiClient, ApiError, Employee, EmployeePayload},
    components::toast::{use_toasts, Toasts},
    config,
    utils::table::{paginate, PageWindow},
};

type SaveRequest = (Option<Uuid>, EmployeePayload);

#[derive(Clone, Copy)]
pub struct EmployeesViewModel {
    pub search: RwSignal<String>,
    pub department: RwSignal<String>,
    pub status: RwSignal<String>,
    pub page: RwSignal<usize>,
    pub reload: RwSignal<u32>,
    pub employees: Resource<u32, Result<Vec<Employee>, ApiError>>,
    pub form: RwSignal<EmployeeFormState>,
    pub editing: RwSignal<Option<Uuid>>,
    pub form_open: RwSignal<bool>,
    pub form_error: RwSignal<Option<String>>,
    pub save_action: Action<SaveRequest, Result<Employee, ApiError>>,
    pub delete_target: RwSignal<Option<Employee>>,
    pub delete_action: Action<Uuid, Result<(), ApiError>>,
    pub toasts: Toasts,
    page_size: StoredValue<usize>,
}

impl EmployeesViewModel {
    pub fn all(&self) -> Signal<Vec<Employee>> {
        let employees = self.employees;
        Signal::derive(move || employees.get().and_then(Result::ok).unwrap_or_default())
    }

    pub fn load_error(&self) -> Signal<Option<ApiError>> {
        let employees = self.employees;
        Signal::derive(move || employees.get().and_then(Result::err))
    }

    pub fn filter(&self) -> Signal<EmployeeFilter> {
        let (search, department, status) = (self.search, self.department, self.status);
        Signal::derive(move || EmployeeFilter {
            search: search.get(),
            department: department.get(),
            status: status.get(),
        })
    }

    pub fn filtered(&self) -> Signal<Vec<Employee>> {
        let all = self.all();
        let filter = self.filter();
        Signal::derive(move || all.with(|rows| filter.with(|f| f.apply(rows))))
    }

    pub fn tiles(&self) -> Signal<EmployeeTiles> {
        let filtered = self.filtered();
        Signal::derive(move || filtered.with(|rows| employee_tiles(rows)))
    }

    pub fn departments(&self) -> Signal<Vec<String>> {
        let all = self.all();
        Signal::derive(move || all.with(|rows| departments(rows)))
    }

    pub fn page_rows(&self) -> Signal<(Vec<Employee>, PageWindow)> {
        let filtered = self.filtered();
        let page = self.page;
        let size = self.page_size;
        Signal::derive(move || filtered.with(|rows| paginate(rows, size.get_value(), page.get())))
    }

    pub fn retry(&self) {
        self.reload.update(|value| *value = value.wrapping_add(1));
    }

    pub fn open_create(&self) {
        self.editing.set(None);
        self.form.set(EmployeeFormState::default());
        self.form_error.set(None);
        self.form_open.set(true);
    }

    pub fn open_edit(&self, employee: &Employee) {
        self.editing.set(Some(employee.id));
        self.form.set(EmployeeFormState::from_employee(employee));
        self.form_error.set(None);
        self.form_open.set(true);
    }

    pub fn close_form(&self) {
        self.form_open.set(false);
        self.form_error.set(None);
    }

    pub fn submit_form(&self) {
        match self.form.with_untracked(EmployeeFormState::to_payload) {
            Ok(payload) => {
                self.form_error.set(None);
                self.save_action
                    .dispatch((self.editing.get_untracked(), payload));
            }
            Err(err) => self.form_error.set(Some(err)),
        }
    }

    pub fn confirm_delete(&self) {
        if let Some(employee) = self.delete_target.get_untracked() {
            self.delete_action.dispatch(employee.id);
        }
    }
}

pub fn use_employees_view_model() -> EmployeesViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repository = EmployeesRepository::new_with_client(Rc::new(api));
    let toasts = use_toasts();

    let reload = create_rw_signal(0u32);
    let repo_for_load = repository.clone();
    let employees = create_resource(
        move || reload.get(),
        move |_| {
            let repo = repo_for_load.clone();
            async move { repo.fetch_all().await }
        },
    );

    let repo_for_save = repository.clone();
    let save_action = create_action(move |(id, payload): &SaveRequest| {
        let repo = repo_for_save.clone();
        let (id, payload) = (*id, payload.clone());
        async move { repo.save(id, payload).await }
    });

    let repo_for_delete = repository;
    let delete_action = create_action(move |id: &Uuid| {
        let repo = repo_for_delete.clone();
        let id = *id;
        async move { repo.delete(id).await }
    });

    let vm = EmployeesViewModel {
        search: create_rw_signal(String::new()),
        department: create_rw_signal(String::new()),
        status: create_rw_signal(String::new()),
        page: create_rw_signal(1),
        reload,
        employees,
        form: create_rw_signal(EmployeeFormState::default()),
        editing: create_rw_signal(None),
        form_open: create_rw_signal(false),
        form_error: create_rw_signal(None),
        save_action,
        delete_target: create_rw_signal(None),
        delete_action,
        toasts,
        page_size: store_value(config::current().page_size),
    };

    // Any filter change starts over on the first page.
    create_effect(move |_| {
        vm.search.with(|_| ());
        vm.department.with(|_| ());
        vm.status.with(|_| ());
        vm.page.set(1);
    });

    create_effect(move |_| {
        if let Some(result) = save_action.value().get() {
            match result {
                Ok(employee) => {
                    toasts.success(format!("Employee {} saved", employee.full_name));
                    vm.close_form();
                    vm.retry();
                }
                Err(err) => {
                    toasts.error(err.error.clone());
                    vm.form_error.set(Some(err.error));
                }
            }
        }
    });

    create_effect(move |_| {
        if let Some(result) = delete_action.value().get() {
            vm.delete_target.set(None);
            match result {
                Ok(()) => {
                    toasts.success("Employee deleted");
                    vm.retry();
                }
                Err(err) => {
                    toasts.error(err.error);
                }
            }
        }
    });

    vm
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{fixtures::employee, ssr::with_runtime};

    #[test]
    fn filter_signal_tracks_inputs() {
        with_runtime(|| {
            let vm = use_employees_view_model();
            vm.search.set("alice".into());
            vm.department.set("Engineering".into());
            let filter = vm.filter().get_untracked();
            assert_eq!(filter.search, "alice");
            assert_eq!(filter.department, "Engineering");
            assert!(filter.status.is_empty());
        });
    }

    #[test]
    fn edit_prefills_form_and_create_resets_it() {
        with_runtime(|| {
            let vm = use_employees_view_model();
            let existing = employee(1, "Alice Example", "Engineering", "active");
            vm.open_edit(&existing);
            assert_eq!(vm.editing.get_untracked(), Some(existing.id));
            assert_eq!(vm.form.get_untracked().full_name, "Alice Example");

            vm.open_create();
            assert!(vm.editing.get_untracked().is_none());
            assert_eq!(vm.form.get_untracked(), EmployeeFormState::default());
        });
    }

    #[test]
    fn invalid_form_keeps_modal_open() {
        with_runtime(|| {
            let vm = use_employees_view_model();
            vm.open_create();
            vm.submit_form();
            assert!(vm.form_open.get_untracked());
            assert_eq!(
                vm.form_error.get_untracked().as_deref(),
                Some("Employee code is required")
            );
        });
    }
}
