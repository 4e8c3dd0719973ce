//! CLI presentation: text and json formatters for run summaries.

mod report;

pub use report::{
    format_harvest_report, format_harvest_text, format_reconcile_report, format_reconcile_text,
};
