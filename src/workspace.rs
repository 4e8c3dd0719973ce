//! Workspace domain: logical files, template discovery and the reconciler that
//! drives setup/update runs and change harvesting.

mod discovery;
mod facade;
mod file;
mod reconciler;
mod types;

pub use facade::*;
