use crate::api::DateKey;
use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Weekday};

pub const WINDOW_DAYS: usize = 7;

/// Seven consecutive days starting the day before the reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekWindow {
    days: [DateKey; WINDOW_DAYS],
}

impl WeekWindow {
    pub fn anchored_at(today: NaiveDate) -> Self {
        let start = today.pred_opt().unwrap_or(today);
        // Keep all seven days representable at the end of the calendar range.
        let start = match NaiveDate::MAX.checked_sub_days(Days::new(WINDOW_DAYS as u64 - 1)) {
            Some(latest) if start > latest => latest,
            _ => start,
        };
        let days = std::array::from_fn(|offset| {
            DateKey::new(
                start
                    .checked_add_days(Days::new(offset as u64))
                    .unwrap_or(start),
            )
        });
        Self { days }
    }

    pub fn keys(&self) -> &[DateKey] {
        &self.days
    }

    pub fn first(&self) -> DateKey {
        self.days[0]
    }

    pub fn last(&self) -> DateKey {
        self.days[WINDOW_DAYS - 1]
    }

    pub fn contains(&self, key: &DateKey) -> bool {
        self.days.contains(key)
    }

    pub fn range_label(&self) -> String {
        format!("{} 〜 {}", day_label(self.first()), day_label(self.last()))
    }
}

pub fn resolve_window<Tz: TimeZone>(now: &DateTime<Tz>) -> WeekWindow {
    WeekWindow::anchored_at(now.date_naive())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayTone {
    Holiday,
    Working,
}

impl DayTone {
    pub fn from_flag(is_holiday: bool) -> Self {
        if is_holiday {
            Self::Holiday
        } else {
            Self::Working
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Holiday => "休日",
            Self::Working => "授業日",
        }
    }

    pub fn cell_class(self) -> &'static str {
        match self {
            Self::Holiday => {
                "bg-status-error-bg border-status-error-border text-status-error-text"
            }
            Self::Working => "bg-surface-elevated border-border text-fg",
        }
    }
}

pub fn day_label(key: DateKey) -> String {
    let date = key.date();
    format!("{}/{}", date.month(), date.day())
}

pub fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "月",
        Weekday::Tue => "火",
        Weekday::Wed => "水",
        Weekday::Thu => "木",
        Weekday::Fri => "金",
        Weekday::Sat => "土",
        Weekday::Sun => "日",
    }
}
