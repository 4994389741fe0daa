pub mod components;
pub mod panel;
pub mod reconciler;
pub mod repository;
pub mod store;
pub mod types;
pub mod utils;
pub mod view_model;

pub use panel::{WeekCalendar, WeekCalendarPanel};
