pub mod day_cell;
pub mod summary;
