//! Integration tests for saving workspace changes back into update templates.

use super::test_utils::{Fixture, HOME};
use std::fs;

#[test]
fn test_changed_value_is_saved_as_placeholder() {
    let fixture = Fixture::new();
    fixture.write_update("a.prefs", "a=${H}/y\nb=same\n");
    fixture.write_workspace("a.prefs", &format!("a={}/z\nb=same\n", HOME));

    let report = fixture.reconciler().save_changes_in_workspace(false).unwrap();
    assert_eq!(report.examined, 1);
    assert_eq!(report.saved, 1);

    let update = fixture.update_prefs("a.prefs");
    assert_eq!(update.get("a"), Some("${H}/z"));
    assert_eq!(update.get("b"), Some("same"));
}

#[test]
fn test_new_keys_require_include_new() {
    let fixture = Fixture::new();
    fixture.write_update("a.prefs", "k=v\n");
    fixture.write_workspace("a.prefs", "k=v\nnew=1\n");
    let before = fs::read(fixture.update_path("a.prefs")).unwrap();

    let report = fixture.reconciler().save_changes_in_workspace(false).unwrap();
    assert_eq!(report.saved, 0);
    assert_eq!(report.unchanged, 1);
    assert_eq!(fs::read(fixture.update_path("a.prefs")).unwrap(), before);

    let report = fixture.reconciler().save_changes_in_workspace(true).unwrap();
    assert_eq!(report.saved, 1);
    assert_eq!(fixture.update_prefs("a.prefs").get("new"), Some("1"));
}

#[test]
fn test_include_new_creates_missing_update_file() {
    let fixture = Fixture::new();
    fixture.write_setup("b.prefs", "k=setup\n");
    fixture.write_workspace("b.prefs", "k=mine\n");

    let report = fixture.reconciler().save_changes_in_workspace(true).unwrap();
    assert_eq!(report.saved, 1);
    assert_eq!(fixture.update_prefs("b.prefs").get("k"), Some("mine"));
}

#[test]
fn test_unmodified_workspace_writes_nothing() {
    let fixture = Fixture::new();
    fixture.write_update("a.prefs", "a=${H}\n");
    fixture.reconciler().update_workspace().unwrap();
    let before = fs::read(fixture.update_path("a.prefs")).unwrap();

    let report = fixture.reconciler().save_changes_in_workspace(true).unwrap();
    assert_eq!(report.saved, 0);
    assert_eq!(fs::read(fixture.update_path("a.prefs")).unwrap(), before);
}

#[test]
fn test_only_preference_files_are_harvested() {
    let fixture = Fixture::new();
    fixture.write_update("p/config.xml", "<config>${H}</config>");
    fixture.write_workspace("p/config.xml", "<config>edited</config>");
    fixture.write_update("p/data.dat", "template");
    fixture.write_workspace("p/data.dat", "edited");
    fixture.write_update("p/x.prefs", "k=v\n");

    let report = fixture.reconciler().save_changes_in_workspace(true).unwrap();
    assert_eq!(report.examined, 1);
    assert_eq!(report.skipped, 1, "x.prefs has no workspace copy");
    assert_eq!(
        fs::read_to_string(fixture.update_path("p/config.xml")).unwrap(),
        "<config>${H}</config>"
    );
    assert_eq!(fs::read_to_string(fixture.update_path("p/data.dat")).unwrap(), "template");
}

#[test]
fn test_update_then_harvest_round_trip() {
    let fixture = Fixture::new();
    fixture.write_update("a.prefs", "path=${H}/workspace\n");
    fixture.reconciler().update_workspace().unwrap();

    fixture.write_workspace("a.prefs", &format!("path={}/elsewhere\n", HOME));
    fixture.reconciler().save_changes_in_workspace(false).unwrap();
    assert_eq!(
        fixture.update_prefs("a.prefs").get("path"),
        Some("${H}/elsewhere")
    );

    fixture.reconciler().update_workspace().unwrap();
    assert_eq!(
        fixture.workspace_prefs("a.prefs").get("path"),
        Some(format!("{}/elsewhere", HOME).as_str())
    );
}
