//! Upward workspace search and nested-workspace rejection.

use wsconf_core::WorkspaceLocator;
use wsconf_fs::NormalizedPath;
use wsconf_test_utils::TestWorkspace;

#[test]
fn finds_marker_from_root_and_subdirectories() {
    let ws = TestWorkspace::new();
    ws.init_marker();
    let deep = ws.mkdir("src/pkg/nodes");

    let expected = Some(NormalizedPath::new(ws.root()));
    assert_eq!(WorkspaceLocator::locate(ws.root()).unwrap(), expected);
    assert_eq!(WorkspaceLocator::locate(&deep).unwrap(), expected);
}

#[test]
fn no_marker_is_not_found() {
    let ws = TestWorkspace::new();
    let sub = ws.mkdir("a/b");

    assert_eq!(WorkspaceLocator::locate(&sub).unwrap(), None);
}

#[test]
fn nonexistent_start_directory_is_searched_from_existing_ancestor() {
    let ws = TestWorkspace::new();
    ws.init_marker();

    let located = WorkspaceLocator::locate(&ws.path("not/created/yet")).unwrap();

    assert_eq!(located, Some(NormalizedPath::new(ws.root())));
}

#[test]
fn marker_without_profiles_rejects_default_build_space() {
    let ws = TestWorkspace::new();
    ws.init_marker();
    let inside = ws.mkdir("build/pkg");

    let err = WorkspaceLocator::locate(&inside).unwrap_err();

    assert_eq!(err.kind(), "nested-workspace");
    assert_eq!(err.path(), Some(inside.as_path()));
}

#[test]
fn suffixed_devel_space_is_rejected_but_plain_name_is_not() {
    let ws = TestWorkspace::new();
    ws.write_record("default", "space_suffix = \"_x\"\n");

    let suffixed = ws.mkdir("devel_x/lib");
    let err = WorkspaceLocator::locate(&suffixed).unwrap_err();
    assert_eq!(err.kind(), "nested-workspace");

    let plain = ws.mkdir("devel/lib");
    assert!(WorkspaceLocator::locate(&plain).unwrap().is_some());
}

#[test]
fn every_profile_build_space_is_checked() {
    let ws = TestWorkspace::new();
    ws.write_record("default", "");
    ws.write_record("alt", "build_space = \"out/alt-build\"\n");
    let inside = ws.mkdir("out/alt-build/CMakeFiles");

    let err = WorkspaceLocator::locate(&inside).unwrap_err();

    assert_eq!(err.kind(), "nested-workspace");
}

#[test]
fn nearest_marker_wins() {
    let outer = TestWorkspace::new();
    outer.init_marker();
    let inner = outer.mkdir("src/inner_ws");
    std::fs::create_dir_all(inner.join(".wsconf")).unwrap();

    let located = WorkspaceLocator::locate(&inner.join("src")).unwrap();

    assert_eq!(located, Some(NormalizedPath::new(&inner)));
}

#[test]
fn corrupt_profile_surfaces_during_nesting_check() {
    let ws = TestWorkspace::new();
    ws.write_record("default", "build_space = ");

    let err = WorkspaceLocator::locate(ws.root()).unwrap_err();

    assert_eq!(err.kind(), "corrupt-record");
}

#[test]
fn spaces_at_or_above_root_do_not_reject_the_workspace() {
    let ws = TestWorkspace::new();
    ws.write_record("default", "devel_space = \".\"\nbuild_space = \"..\"\n");
    let sub = ws.mkdir("src/pkg");

    let expected = Some(NormalizedPath::new(ws.root()));
    assert_eq!(WorkspaceLocator::locate(ws.root()).unwrap(), expected);
    assert_eq!(WorkspaceLocator::locate(&sub).unwrap(), expected);
}
