use collab_guard::{WorkspaceError, validate_same_workspace};
use domain::EntityRecord;

#[test]
fn shared_workspace_is_returned() {
    let entities = vec![
        EntityRecord::new("1", "w1"),
        EntityRecord::new("2", "w1"),
        EntityRecord::new("3", "w1"),
    ];
    assert_eq!(validate_same_workspace(&entities).expect("shared"), "w1");
}

#[test]
fn single_entity_is_its_own_workspace() {
    let entities = vec![EntityRecord::new("1", "w7")];
    assert_eq!(validate_same_workspace(&entities).expect("shared"), "w7");
}

#[test]
fn unspecified_entries_are_ignored() {
    let entities = vec![
        EntityRecord::without_workspace("1"),
        EntityRecord::new("2", "w1"),
        EntityRecord::new("3", ""),
    ];
    assert_eq!(validate_same_workspace(&entities).expect("shared"), "w1");
}

#[test]
fn distinct_workspaces_conflict() {
    let entities = vec![
        EntityRecord::new("1", "w2"),
        EntityRecord::new("2", "w1"),
        EntityRecord::new("3", "w2"),
    ];
    let err = validate_same_workspace(&entities).expect_err("conflict");
    match err {
        WorkspaceError::CrossWorkspaceConflict { ref workspaces } => {
            assert_eq!(workspaces, &vec!["w1".to_string(), "w2".to_string()]);
        }
        ref other => panic!("unexpected error: {other}"),
    }
    assert_eq!(
        err.to_string(),
        "entities belong to conflicting workspaces: w1, w2"
    );
}

#[test]
fn empty_input_is_unspecified() {
    let err = validate_same_workspace(&[]).expect_err("empty");
    assert!(matches!(err, WorkspaceError::UnspecifiedWorkspace));
}

#[test]
fn all_missing_workspaces_is_unspecified() {
    let entities = vec![
        EntityRecord::without_workspace("1"),
        EntityRecord::without_workspace("2"),
    ];
    let err = validate_same_workspace(&entities).expect_err("unspecified");
    assert!(matches!(err, WorkspaceError::UnspecifiedWorkspace));
}
