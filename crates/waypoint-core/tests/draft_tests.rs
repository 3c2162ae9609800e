use tempfile::TempDir;
use waypoint_core::{
    flows::{onboarding, HostPatch, HostProfile},
    Draft, DraftStore, RecordingGateway, WizardBuilder, WizardError,
};

/// Helper function to create a draft store in a temporary directory
fn create_test_store() -> (TempDir, DraftStore) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let store = DraftStore::new(temp_dir.path().join("drafts"));
    (temp_dir, store)
}

#[test]
fn test_exit_save_resume_cycle() {
    let (_temp_dir, store) = create_test_store();
    let mut gateway = RecordingGateway::new();

    let mut wizard = WizardBuilder::new(onboarding::table().unwrap()).build();
    wizard.complete_step(onboarding::OVERVIEW, HostPatch::default());
    wizard.complete_step(
        onboarding::HOST_TYPE,
        HostPatch {
            host_type: Some(onboarding::HostType::Company),
            ..HostPatch::default()
        },
    );
    wizard.update(HostPatch {
        first_name: Some("Ada".to_string()),
        ..HostPatch::default()
    });
    wizard.save_and_exit().dispatch(&mut gateway);

    let partial = gateway.last_exited().cloned().unwrap();
    store
        .save(&Draft::new(onboarding::FLOW_NAME, partial))
        .expect("Failed to save draft");

    let draft: Draft<HostProfile> = store
        .load(onboarding::FLOW_NAME)
        .expect("Failed to load draft")
        .expect("Draft should exist");
    let resumed = WizardBuilder::new(onboarding::table().unwrap())
        .resume(draft)
        .expect("Draft should match flow")
        .build();

    assert_eq!(resumed.current_step(), onboarding::OVERVIEW);
    assert!(resumed.completed_steps().is_empty());
    assert_eq!(resumed.data().first_name.as_deref(), Some("Ada"));
    assert!(resumed.data().is_company());
}

#[test]
fn test_resume_rejects_foreign_draft() {
    let (_temp_dir, store) = create_test_store();
    let draft = Draft::new("package", HostProfile::default());
    store.save(&draft).unwrap();

    let loaded = store.load::<HostProfile>(onboarding::FLOW_NAME).unwrap();
    assert!(loaded.is_none());

    let resumed = WizardBuilder::new(onboarding::table().unwrap()).resume(draft);
    assert!(matches!(resumed, Err(WizardError::DraftFlowMismatch { .. })));
}

#[test]
fn test_malformed_draft_is_serialization_error() {
    let (_temp_dir, store) = create_test_store();
    std::fs::create_dir_all(store.dir()).unwrap();
    std::fs::write(store.path_for("onboarding"), "{not json").unwrap();

    let err = store.load::<HostProfile>("onboarding").unwrap_err();
    assert!(matches!(err, WizardError::Serialization { .. }));
}
