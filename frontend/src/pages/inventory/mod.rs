use leptos::*;

pub mod components;
pub mod repository;
pub mod utils;
pub mod view_model;

mod panel;

pub use panel::InventoryPanel;

#[component]
pub fn InventoryPage() -> impl IntoView {
    view! { <InventoryPanel /> }
}
