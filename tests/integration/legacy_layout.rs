//! Integration tests for template trees predating the `.metadata` folder.

use eclipse_configurator::config::{ConfiguratorConfig, RunPaths};
use eclipse_configurator::resolver::{ReplacementTable, Resolver};
use eclipse_configurator::workspace::Reconciler;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn run_update(root: &Path) -> RunPaths {
    fs::create_dir_all(root.join("templates/setup")).unwrap();
    let config = ConfiguratorConfig {
        workspace_path: Some("ws".into()),
        templates_path: Some("templates".into()),
        ..Default::default()
    };
    let paths = RunPaths::resolve(&config, root).unwrap();
    let resolver = Arc::new(Resolver::table_only(ReplacementTable::new()));
    Reconciler::new(paths.layout(), resolver)
        .update_workspace()
        .unwrap();
    paths
}

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn test_current_layout_targets_workspace_root() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(
        &root.join("templates/update/.metadata/.plugins/p/a.prefs"),
        "k=v\n",
    );

    let paths = run_update(root);
    assert_eq!(paths.workspace_root, root.join("ws"));
    assert!(root.join("ws/.metadata/.plugins/p/a.prefs").is_file());
}

#[test]
fn test_plugins_layout_targets_metadata_folder() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(&root.join("templates/update/.plugins/p/a.prefs"), "k=v\n");

    let paths = run_update(root);
    assert_eq!(paths.workspace_root, root.join("ws/.metadata"));
    assert!(root.join("ws/.metadata/.plugins/p/a.prefs").is_file());
}

#[test]
fn test_bare_layout_targets_plugins_folder() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(&root.join("templates/update/p/a.prefs"), "k=v\n");

    let paths = run_update(root);
    assert_eq!(paths.workspace_root, root.join("ws/.metadata/.plugins"));
    assert!(root.join("ws/.metadata/.plugins/p/a.prefs").is_file());
}
