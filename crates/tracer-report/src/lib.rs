pub mod common;
pub mod html;

pub use html::{ReportContext, render_json, render_report, write_report};
