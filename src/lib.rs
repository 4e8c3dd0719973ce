//! Eclipse Configurator: keeps Eclipse workspaces in line with shared templates
//!
//! Applies `setup` and `update` template trees to a workspace, substituting
//! `${name}` placeholders, and harvests workspace preference edits back into the
//! update templates.

pub mod cli;
pub mod config;
pub mod destination;
pub mod document;
pub mod error;
pub mod fragment;
pub mod logging;
pub mod prefs;
pub mod resolver;
pub mod workspace;
