//! Module-global inactivity watchdog.
//!
//! Pointer and keyboard activity resets the timer. Once the configured idle
//! timeout elapses the stored session keys are cleared and the browser is
//! sent to the sign-in page. The expiry decision lives in [`IdleWatchdog`]
//! so it can be exercised on the host.

use chrono::{DateTime, Duration, Utc};

pub const CHECK_INTERVAL_MS: u32 = 30_000;
pub const ACTIVITY_EVENTS: [&str; 5] = ["mousemove", "mousedown", "keydown", "scroll", "touchstart"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleWatchdog {
    timeout: Duration,
    last_activity: DateTime<Utc>,
}

impl IdleWatchdog {
    pub fn new(timeout_minutes: u32, now: DateTime<Utc>) -> Self {
        Self {
            timeout: Duration::minutes(i64::from(timeout_minutes.max(1))),
            last_activity: now,
        }
    }

    pub fn record_activity(&mut self, now: DateTime<Utc>) {
        if now > self.last_activity {
            self.last_activity = now;
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.last_activity >= self.timeout
    }

    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        let left = self.timeout - (now - self.last_activity);
        left.max(Duration::zero())
    }
}

/// Whether an expiry should navigate away from `current_path`.
pub fn should_redirect(current_path: &str, sign_in_url: &str) -> bool {
    let target = sign_in_url.split(['?', '#']).next().unwrap_or(sign_in_url);
    current_path.trim_end_matches('/') != target.trim_end_matches('/')
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::*;
    use crate::{config, utils::storage};
    use std::cell::{Cell, RefCell};
    use wasm_bindgen::{closure::Closure, JsCast};

    thread_local! {
        static WATCHDOG: RefCell<Option<IdleWatchdog>> = const { RefCell::new(None) };
        static STARTED: Cell<bool> = const { Cell::new(false) };
    }

    fn touch() {
        WATCHDOG.with(|cell| {
            if let Some(watchdog) = cell.borrow_mut().as_mut() {
                watchdog.record_activity(Utc::now());
            }
        });
    }

    fn expired() -> bool {
        WATCHDOG.with(|cell| {
            cell.borrow()
                .as_ref()
                .map(|watchdog| watchdog.is_expired(Utc::now()))
                .unwrap_or(false)
        })
    }

    fn sign_out(sign_in_url: &str) {
        if let Err(err) = storage::clear_session_keys() {
            log::warn!("Failed to clear session keys: {}", err);
        }
        let Ok(window) = storage::window() else {
            return;
        };
        let location = window.location();
        let current = location.pathname().unwrap_or_default();
        if should_redirect(&current, sign_in_url) {
            let _ = location.set_href(sign_in_url);
        }
    }

    pub fn start() {
        if STARTED.with(|started| started.replace(true)) {
            return;
        }
        let Ok(window) = storage::window() else {
            log::warn!("Idle watchdog disabled: no window");
            return;
        };
        let runtime = config::current();
        WATCHDOG.with(|cell| {
            *cell.borrow_mut() = Some(IdleWatchdog::new(runtime.idle_timeout_minutes, Utc::now()));
        });

        for event in ACTIVITY_EVENTS {
            let listener = Closure::<dyn FnMut(web_sys::Event)>::new(|_| touch());
            if window
                .add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
                .is_err()
            {
                log::warn!("Failed to listen for {}", event);
            }
            listener.forget();
        }

        leptos::spawn_local(async move {
            loop {
                gloo_timers::future::TimeoutFuture::new(CHECK_INTERVAL_MS).await;
                if expired() {
                    log::info!("Session idle for {} minutes, signing out", runtime.idle_timeout_minutes);
                    sign_out(&runtime.sign_in_url);
                    break;
                }
            }
        });
    }
}

/// Starts the watchdog once per page load. No-op off the browser.
pub fn start_idle_watchdog() {
    #[cfg(target_arch = "wasm32")]
    browser::start();
}
