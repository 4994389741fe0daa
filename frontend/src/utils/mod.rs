pub mod time;
pub mod timeout;
