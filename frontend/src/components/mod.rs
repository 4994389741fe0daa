pub mod error;
pub mod toast;
