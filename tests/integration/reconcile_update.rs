//! Integration tests for setup/update runs of the reconciler.

use super::test_utils::{Fixture, HOME};
use eclipse_configurator::error::ReconcileError;
use std::fs;

const PREFS: &str = ".metadata/.plugins/org.eclipse.core.runtime/.settings/org.eclipse.jdt.core.prefs";

#[test]
fn test_update_template_wins_and_workspace_keys_survive() {
    let fixture = Fixture::new();
    fixture.write_workspace(PREFS, "a=1\nb=2\n");
    fixture.write_setup(PREFS, "a=from-setup\nc=3\n");
    fixture.write_update(PREFS, "b=${H}/x\n");

    let report = fixture.reconciler().update_workspace().unwrap();
    assert_eq!(report.discovered, 1);
    assert_eq!(report.merged, 1);
    assert!(report.failures.is_empty());

    let merged = fixture.workspace_prefs(PREFS);
    assert_eq!(merged.get("a"), Some("1"));
    assert_eq!(merged.get("b"), Some(format!("{}/x", HOME).as_str()));
    assert_eq!(merged.get("c"), None, "setup is ignored once the workspace file exists");
}

#[test]
fn test_first_run_bootstraps_from_setup() {
    let fixture = Fixture::new();
    fixture.write_setup(PREFS, "a=s\nc=3\n");
    fixture.write_update(PREFS, "a=u\n");

    fixture.reconciler().update_workspace().unwrap();

    let merged = fixture.workspace_prefs(PREFS);
    assert_eq!(merged.get("a"), Some("u"));
    assert_eq!(merged.get("c"), Some("3"));
}

#[test]
fn test_update_template_alone_creates_workspace_prefs() {
    let fixture = Fixture::new();
    fixture.write_update("p/only-update.prefs", "eclipse.preferences.version=1\n");

    fixture.reconciler().update_workspace().unwrap();

    assert_eq!(
        fixture.workspace_prefs("p/only-update.prefs").get("eclipse.preferences.version"),
        Some("1")
    );
}

#[test]
fn test_unknown_placeholders_are_kept() {
    let fixture = Fixture::new();
    fixture.write_update(PREFS, "k=${undefined.variable.name}\n");

    fixture.reconciler().update_workspace().unwrap();

    assert_eq!(
        fixture.workspace_prefs(PREFS).get("k"),
        Some("${undefined.variable.name}")
    );
}

#[test]
fn test_documents_are_resolved_from_update_template() {
    let fixture = Fixture::new();
    fixture.write_update(
        "launches/Run.launch",
        r#"<?xml version="1.0" encoding="UTF-8"?>
<launchConfiguration type="${H}"><entry>${H}/bin</entry><other>${nope}</other></launchConfiguration>
"#,
    );

    let report = fixture.reconciler().update_workspace().unwrap();
    assert_eq!(report.resolved_documents, 1);

    let written = fixture.read_workspace("launches/Run.launch");
    assert!(written.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert!(written.contains(&format!(r#"<launchConfiguration type="{}">"#, HOME)));
    assert!(written.contains(&format!("<entry>{}/bin</entry>", HOME)));
    assert!(written.contains("<other>${nope}</other>"));
}

#[test]
fn test_setup_only_files_are_applied_once() {
    let fixture = Fixture::new();
    fixture.write_setup("dialog_settings.dat", "from setup");

    let report = fixture.reconciler().update_workspace().unwrap();
    assert_eq!(report.copied, 1);
    assert_eq!(fixture.read_workspace("dialog_settings.dat"), "from setup");

    fixture.write_workspace("dialog_settings.dat", "edited by user");
    let report = fixture.reconciler().update_workspace().unwrap();
    assert_eq!(report.skipped, 1);
    assert_eq!(fixture.read_workspace("dialog_settings.dat"), "edited by user");
}

#[test]
fn test_update_files_overwrite_workspace_every_run() {
    let fixture = Fixture::new();
    fixture.write_update("keys.dat", "v2");
    fixture.write_workspace("keys.dat", "v1");

    fixture.reconciler().update_workspace().unwrap();
    assert_eq!(fixture.read_workspace("keys.dat"), "v2");
}

#[test]
fn test_backup_files_are_never_templates() {
    let fixture = Fixture::new();
    fixture.write_update("a.prefs", "k=v\n");
    fixture.write_update("a.prefs.bak", "k=old\n");

    let report = fixture.reconciler().update_workspace().unwrap();
    assert_eq!(report.discovered, 1);
    assert!(!fixture.workspace_path("a.prefs.bak").exists());
}

#[test]
fn test_second_run_is_byte_identical() {
    let fixture = Fixture::new();
    fixture.write_setup(PREFS, "z=last\na=first\n");
    fixture.write_update(PREFS, "m=${H}\n");
    fixture.write_update("p/config.xml", "<config><home>${H}</home></config>");
    fixture.write_setup("p/blob.dat", "blob");

    fixture.reconciler().update_workspace().unwrap();
    let prefs_first = fs::read(fixture.workspace_path(PREFS)).unwrap();
    let xml_first = fs::read(fixture.workspace_path("p/config.xml")).unwrap();

    let report = fixture.reconciler().update_workspace().unwrap();
    assert_eq!(report.merged, 0);
    assert_eq!(report.resolved_documents, 0);
    assert_eq!(report.unchanged, 2);

    assert_eq!(fs::read(fixture.workspace_path(PREFS)).unwrap(), prefs_first);
    assert_eq!(fs::read(fixture.workspace_path("p/config.xml")).unwrap(), xml_first);
    assert_eq!(fixture.read_workspace("p/blob.dat"), "blob");
}

#[test]
fn test_failing_file_does_not_stop_the_run() {
    let fixture = Fixture::new();
    fixture.write_update("broken.xml", "<unclosed>");
    fixture.write_update("fine.prefs", "k=${H}\n");
    fixture.write_workspace("broken.xml", "previous");

    let report = fixture.reconciler().update_workspace().unwrap();

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].relative_path, "broken.xml");
    assert_eq!(report.merged, 1);
    assert_eq!(fixture.read_workspace("broken.xml"), "previous");
    assert_eq!(fixture.workspace_prefs("fine.prefs").get("k"), Some(HOME));
}

#[test]
fn test_missing_template_tree_is_fatal() {
    let fixture = Fixture::new();
    fs::remove_dir_all(fixture.layout().setup_root()).unwrap();

    match fixture.reconciler().update_workspace() {
        Err(ReconcileError::MissingTemplateDirectory(path)) => {
            assert_eq!(path, fixture.layout().setup_root())
        }
        other => panic!("expected missing template directory, got {:?}", other),
    }
}

#[test]
fn test_empty_table_leaves_placeholders_untouched() {
    let fixture = Fixture::new();
    fixture.write_update("a.prefs", "k=${H}\n");

    fixture.reconciler_with(&[]).update_workspace().unwrap();

    assert_eq!(fixture.workspace_prefs("a.prefs").get("k"), Some("${H}"));
}
