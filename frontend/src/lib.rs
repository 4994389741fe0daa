pub mod api;
pub mod components;
pub mod config;
pub mod pages;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use pages::week_calendar::{WeekCalendar, WeekCalendarPanel};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    use leptos::*;

    console_error_panic_hook::set_once();

    // Config decides the log level and the admin capability, so mount after it resolves.
    leptos::spawn_local(async move {
        let cfg = config::init().await;
        if console_log::init_with_level(cfg.log_level).is_err() {
            web_sys::console::warn_1(&"Logger was already initialized".into());
        }
        log::info!(
            "Starting classroom frontend (api: {}, admin: {})",
            cfg.api_base_url,
            cfg.is_admin
        );
        let is_admin = cfg.is_admin;
        mount_to_body(move || {
            view! { <WeekCalendar is_admin=Signal::derive(move || is_admin) /> }
        });
    });
}
