use leptos::*;

pub mod api;
pub mod components;
pub mod config;
pub mod pages;
pub mod router;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_support;

/// Boots the app: logging, runtime config, idle watchdog, then the router.
pub fn run() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Starting back-office frontend");

    spawn_local(async move {
        config::init().await;
        state::session::start_idle_watchdog();
        router::mount_app();
    });
}

