pub mod week_calendar;
