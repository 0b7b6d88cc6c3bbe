use leptos::*;

pub mod components;
pub mod repository;
pub mod utils;
pub mod view_model;

mod panel;

pub use panel::EmployeesPanel;

#[component]
pub fn EmployeesPage() -> impl IntoView {
    view! { <EmployeesPanel /> }
}
