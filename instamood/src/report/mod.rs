mod builder;
pub mod export;
mod text;

pub use builder::{summarize, summary_table, ReportBuilder};
pub use export::{save_anomalies_json, save_summary_csv, summary_csv_string, write_summary_csv};
pub use text::{render_anomalies, render_summary};
