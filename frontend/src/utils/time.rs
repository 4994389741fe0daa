use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::config;

/// Calendar day of `instant` as seen in `tz`.
pub fn local_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

pub fn now_in_app_tz() -> DateTime<Tz> {
    Utc::now().with_timezone(&config::current_time_zone())
}

pub fn today_in_app_tz() -> NaiveDate {
    local_date(Utc::now(), config::current_time_zone())
}
