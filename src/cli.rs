//! CLI domain: parse, route, output, and presentation only.
//! No domain orchestration; the route dispatches the selected mode to the reconciler.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, RunMode};
pub use presentation::{
    format_harvest_report, format_harvest_text, format_reconcile_report, format_reconcile_text,
};
pub use route::{load_config, RunContext};
