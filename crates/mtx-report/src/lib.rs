//! Static report generation.
//!
//! Renders the aggregation views into a plain-table HTML document. The
//! report layer consumes views by reference and never mutates them; PDF
//! conversion and dashboard theming live outside this crate.

mod common;
mod html;

pub use html::{ReportOptions, render_html, write_html_report};
