// src/sink/mod.rs
pub mod display;
pub mod html;

pub use display::present;
pub use html::{report_file_name, write_report};
