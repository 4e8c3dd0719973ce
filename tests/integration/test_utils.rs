//! Shared test utilities for integration tests
//!
//! Builds a workspace plus `setup`/`update` template trees inside a temporary
//! directory and hands out reconcilers bound to them.

use eclipse_configurator::fragment::Fragment;
use eclipse_configurator::resolver::{ReplacementTable, Resolver};
use eclipse_configurator::workspace::{Reconciler, TemplateLayout};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Home directory used by the default replacement table of fixtures.
pub const HOME: &str = "/home/dev";

pub struct Fixture {
    _temp_dir: TempDir,
    root: PathBuf,
    layout: TemplateLayout,
}

impl Fixture {
    /// Empty workspace and both template trees created.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_path_buf();
        let layout = TemplateLayout::new(root.join("workspace"), &root.join("templates"));
        fs::create_dir_all(layout.workspace_root()).unwrap();
        fs::create_dir_all(layout.setup_root()).unwrap();
        fs::create_dir_all(layout.update_root()).unwrap();
        Self {
            _temp_dir: temp_dir,
            root,
            layout,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn layout(&self) -> &TemplateLayout {
        &self.layout
    }

    pub fn write_setup(&self, relative: &str, contents: &str) {
        write(&self.layout.setup_root().join(relative), contents);
    }

    pub fn write_update(&self, relative: &str, contents: &str) {
        write(&self.layout.update_root().join(relative), contents);
    }

    pub fn write_workspace(&self, relative: &str, contents: &str) {
        write(&self.layout.workspace_root().join(relative), contents);
    }

    pub fn workspace_path(&self, relative: &str) -> PathBuf {
        self.layout.workspace_root().join(relative)
    }

    pub fn update_path(&self, relative: &str) -> PathBuf {
        self.layout.update_root().join(relative)
    }

    pub fn read_workspace(&self, relative: &str) -> String {
        fs::read_to_string(self.workspace_path(relative)).unwrap()
    }

    pub fn workspace_prefs(&self, relative: &str) -> Fragment {
        Fragment::load(&self.workspace_path(relative)).unwrap()
    }

    pub fn update_prefs(&self, relative: &str) -> Fragment {
        Fragment::load(&self.update_path(relative)).unwrap()
    }

    /// Reconciler whose table binds `H` to [`HOME`].
    pub fn reconciler(&self) -> Reconciler {
        self.reconciler_with(&[("H", HOME)])
    }

    pub fn reconciler_with(&self, entries: &[(&str, &str)]) -> Reconciler {
        let table: ReplacementTable = entries.iter().copied().collect();
        Reconciler::new(self.layout.clone(), Arc::new(Resolver::table_only(table)))
    }
}

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}
