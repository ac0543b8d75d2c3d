use domain::WorkspaceContext;

#[test]
fn workspace_context_builds() {
    let ctx = WorkspaceContext::new("w1", "user-1");

    assert_eq!(ctx.workspace_id, "w1");
    assert_eq!(ctx.user_id, "user-1");
    assert!(ctx.has_workspace());
}

#[test]
fn default_context_has_no_workspace() {
    let ctx = WorkspaceContext::default();
    assert!(!ctx.has_workspace());
}
