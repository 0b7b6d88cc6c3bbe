use leptos::*;

pub mod components;
pub mod repository;
pub mod utils;
pub mod view_model;

mod panel;

pub use panel::AttendancePanel;

#[component]
pub fn AttendancePage() -> impl IntoView {
    view! { <AttendancePanel /> }
}
