use leptos::*;

pub mod components;
pub mod repository;
pub mod utils;
pub mod view_model;

mod panel;

pub use panel::SalesPanel;

#[component]
pub fn SalesPage() -> impl IntoView {
    view! { <SalesPanel /> }
}
