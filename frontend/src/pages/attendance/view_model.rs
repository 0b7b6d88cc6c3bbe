use chrono::NaiveDate;
use leptos::*;
use std::rc::Rc;
use uuid::Uuid;

use super::{
    repository::{AttendanceRepository, AttendanceSnapshot},
    utils::{
        export_filename, month_calendar, records_csv, shift_month, status_counts,
        AttendanceFilter, AttendanceFormState, MonthCalendar,
    },
};
use crate::{
    api::{ApiClient, ApiError, AttendancePayload, AttendanceQuery, AttendanceRecord, Employee},
    components::toast::{use_toasts, Toasts},
    config,
    utils::{
        lookup::LookupMap,
        table::{paginate, PageWindow},
        time::current_year_month,
        trigger_csv_download,
    },
};

type SaveRequest = (Option<Uuid>, AttendancePayload);

#[derive(Clone, Copy)]
pub struct AttendanceViewModel {
    pub month: RwSignal<(i32, u32)>,
    pub employee_filter: RwSignal<String>,
    pub from_input: RwSignal<String>,
    pub to_input: RwSignal<String>,
    pub status_input: RwSignal<String>,
    pub filter: RwSignal<AttendanceFilter>,
    pub filter_error: RwSignal<Option<String>>,
    pub page: RwSignal<usize>,
    pub reload: RwSignal<u32>,
    pub snapshot: Resource<(Option<Uuid>, u32), Result<AttendanceSnapshot, ApiError>>,
    pub form: RwSignal<AttendanceFormState>,
    pub editing: RwSignal<Option<Uuid>>,
    pub form_open: RwSignal<bool>,
    pub form_error: RwSignal<Option<String>>,
    pub save_action: Action<SaveRequest, Result<AttendanceRecord, ApiError>>,
    pub delete_target: RwSignal<Option<AttendanceRecord>>,
    pub delete_action: Action<Uuid, Result<(), ApiError>>,
    pub toasts: Toasts,
    page_size: StoredValue<usize>,
}

impl AttendanceViewModel {
    pub fn records(&self) -> Signal<Vec<AttendanceRecord>> {
        let snapshot = self.snapshot;
        Signal::derive(move || {
            snapshot
                .get()
                .and_then(Result::ok)
                .map(|data| data.records)
                .unwrap_or_default()
        })
    }

    pub fn employees(&self) -> Signal<Vec<Employee>> {
        let snapshot = self.snapshot;
        Signal::derive(move || {
            snapshot
                .get()
                .and_then(Result::ok)
                .map(|data| data.employees)
                .unwrap_or_default()
        })
    }

    pub fn employee_lookup(&self) -> Signal<LookupMap<Uuid, Employee>> {
        let employees = self.employees();
        Signal::derive(move || employees.with(|list| LookupMap::build(list, |e| e.id)))
    }

    pub fn load_error(&self) -> Signal<Option<ApiError>> {
        let snapshot = self.snapshot;
        Signal::derive(move || snapshot.get().and_then(Result::err))
    }

    pub fn calendar(&self) -> Signal<Option<MonthCalendar>> {
        let records = self.records();
        let month = self.month;
        Signal::derive(move || {
            let (year, month) = month.get();
            records.with(|records| month_calendar(records, year, month))
        })
    }

    pub fn filtered(&self) -> Signal<Vec<AttendanceRecord>> {
        let records = self.records();
        let filter = self.filter;
        Signal::derive(move || records.with(|records| filter.with(|f| f.apply(records))))
    }

    pub fn status_counts(&self) -> Signal<Vec<(String, usize)>> {
        let filtered = self.filtered();
        Signal::derive(move || filtered.with(|rows| status_counts(rows)))
    }

    pub fn page_rows(&self) -> Signal<(Vec<AttendanceRecord>, PageWindow)> {
        let filtered = self.filtered();
        let page = self.page;
        let size = self.page_size;
        Signal::derive(move || filtered.with(|rows| paginate(rows, size.get_value(), page.get())))
    }

    pub fn retry(&self) {
        self.reload.update(|value| *value = value.wrapping_add(1));
    }

    pub fn shift_month(&self, delta: i32) {
        self.month
            .update(|(year, month)| (*year, *month) = shift_month(*year, *month, delta));
    }

    pub fn apply_filters(&self) {
        match AttendanceFilter::from_inputs(
            &self.from_input.get_untracked(),
            &self.to_input.get_untracked(),
            &self.status_input.get_untracked(),
        ) {
            Ok(filter) => {
                self.filter_error.set(None);
                self.filter.set(filter);
                self.page.set(1);
            }
            Err(err) => self.filter_error.set(Some(err)),
        }
    }

    pub fn clear_filters(&self) {
        self.from_input.set(String::new());
        self.to_input.set(String::new());
        self.status_input.set(String::new());
        self.filter_error.set(None);
        self.filter.set(AttendanceFilter::default());
        self.page.set(1);
    }

    pub fn select_employee(&self, value: String) {
        self.employee_filter.set(value);
        self.page.set(1);
    }

    pub fn open_create(&self, date: NaiveDate) {
        self.editing.set(None);
        self.form.set(AttendanceFormState::for_date(date));
        self.form_error.set(None);
        self.form_open.set(true);
    }

    pub fn open_edit(&self, record: &AttendanceRecord) {
        self.editing.set(Some(record.id));
        self.form.set(AttendanceFormState::from_record(record));
        self.form_error.set(None);
        self.form_open.set(true);
    }

    pub fn close_form(&self) {
        self.form_open.set(false);
        self.form_error.set(None);
    }

    pub fn submit_form(&self) {
        match self.form.with_untracked(AttendanceFormState::to_payload) {
            Ok(payload) => {
                self.form_error.set(None);
                self.save_action
                    .dispatch((self.editing.get_untracked(), payload));
            }
            Err(err) => self.form_error.set(Some(err)),
        }
    }

    pub fn confirm_delete(&self) {
        if let Some(record) = self.delete_target.get_untracked() {
            self.delete_action.dispatch(record.id);
        }
    }

    pub fn export_csv(&self) {
        let rows = self.filtered().get_untracked();
        if rows.is_empty() {
            self.toasts.error("No records to export");
            return;
        }
        let csv = records_csv(&rows, &self.employee_lookup().get_untracked());
        let filename = self.filter.with_untracked(export_filename);
        match trigger_csv_download(&filename, &csv) {
            Ok(()) => {
                self.toasts.success(format!("Downloaded {}", filename));
            }
            Err(err) => {
                log::error!("CSV export failed: {}", err);
                self.toasts.error(format!("CSV export failed: {}", err));
            }
        }
    }
}

pub fn use_attendance_view_model() -> AttendanceViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repository = AttendanceRepository::new_with_client(Rc::new(api));
    let toasts = use_toasts();

    let month = create_rw_signal(current_year_month());
    let employee_filter = create_rw_signal(String::new());
    let reload = create_rw_signal(0u32);

    let repo_for_load = repository.clone();
    let snapshot = create_resource(
        move || {
            (
                Uuid::parse_str(employee_filter.get().trim()).ok(),
                reload.get(),
            )
        },
        move |(employee_id, _)| {
            let repo = repo_for_load.clone();
            async move {
                repo.load(AttendanceQuery {
                    employee_id,
                    ..AttendanceQuery::default()
                })
                .await
            }
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

    let vm = AttendanceViewModel {
        month,
        employee_filter,
        from_input: create_rw_signal(String::new()),
        to_input: create_rw_signal(String::new()),
        status_input: create_rw_signal(String::new()),
        filter: create_rw_signal(AttendanceFilter::default()),
        filter_error: create_rw_signal(None),
        page: create_rw_signal(1),
        reload,
        snapshot,
        form: create_rw_signal(AttendanceFormState::default()),
        editing: create_rw_signal(None),
        form_open: create_rw_signal(false),
        form_error: create_rw_signal(None),
        save_action,
        delete_target: create_rw_signal(None),
        delete_action,
        toasts,
        page_size: store_value(config::current().page_size),
    };

    create_effect(move |_| {
        if let Some(result) = save_action.value().get() {
            match result {
                Ok(record) => {
                    toasts.success(format!("Attendance for {} saved", record.date));
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
                    toasts.success("Attendance record deleted");
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
    use crate::test_support::{
        fixtures::{date, id},
        ssr::with_runtime,
    };

    #[test]
    fn starts_on_current_month_with_no_filters() {
        with_runtime(|| {
            let vm = use_attendance_view_model();
            assert_eq!(vm.month.get_untracked(), current_year_month());
            assert_eq!(vm.filter.get_untracked(), AttendanceFilter::default());
            assert_eq!(vm.page.get_untracked(), 1);
            assert!(vm.records().get_untracked().is_empty());
        });
    }

    #[test]
    fn month_navigation_moves_one_month() {
        with_runtime(|| {
            let vm = use_attendance_view_model();
            vm.month.set((2025, 1));
            vm.shift_month(-1);
            assert_eq!(vm.month.get_untracked(), (2024, 12));
            vm.shift_month(2);
            assert_eq!(vm.month.get_untracked(), (2025, 2));
        });
    }

    #[test]
    fn applying_filters_resets_page_and_reports_errors() {
        with_runtime(|| {
            let vm = use_attendance_view_model();
            vm.page.set(3);
            vm.from_input.set("2025-03-10".into());
            vm.to_input.set("2025-03-01".into());
            vm.apply_filters();
            assert!(vm.filter_error.get_untracked().is_some());
            assert_eq!(vm.page.get_untracked(), 3);

            vm.to_input.set("2025-03-31".into());
            vm.status_input.set("Late".into());
            vm.apply_filters();
            assert!(vm.filter_error.get_untracked().is_none());
            assert_eq!(vm.page.get_untracked(), 1);
            assert_eq!(vm.filter.get_untracked().status.as_deref(), Some("late"));

            vm.clear_filters();
            assert_eq!(vm.filter.get_untracked(), AttendanceFilter::default());
        });
    }

    #[test]
    fn invalid_form_is_not_dispatched() {
        with_runtime(|| {
            let vm = use_attendance_view_model();
            vm.open_create(date(2025, 3, 4));
            assert!(vm.form_open.get_untracked());
            vm.submit_form();
            assert_eq!(vm.form_error.get_untracked().as_deref(), Some("Select an employee"));
            assert_eq!(vm.save_action.version().get_untracked(), 0);
        });
    }

    #[test]
    fn selecting_employee_resets_page() {
        with_runtime(|| {
            let vm = use_attendance_view_model();
            vm.page.set(2);
            vm.select_employee(id(10).to_string());
            assert_eq!(vm.page.get_untracked(), 1);
            assert_eq!(vm.employee_filter.get_untracked(), id(10).to_string());
        });
    }
}
