pub mod date_formatter;

pub use date_formatter::{format_elapsed, format_ticks, ticks_to_datetime};
