mod export;
mod report;

pub use export::{to_csv, to_json, to_json_list, CSV_HEADER};
pub use report::{render_history, render_report};
