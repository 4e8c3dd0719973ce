//! Integration tests for the Eclipse workspace configurator

mod cli_run;
mod harvest;
mod legacy_layout;
mod reconcile_update;
mod test_utils;
