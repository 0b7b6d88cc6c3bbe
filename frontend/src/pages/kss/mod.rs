use leptos::*;

pub mod components;
pub mod repository;
pub mod utils;
pub mod view_model;

mod panel;

pub use panel::KssPanel;

#[component]
pub fn KssPage() -> impl IntoView {
    view! { <KssPanel /> }
}
