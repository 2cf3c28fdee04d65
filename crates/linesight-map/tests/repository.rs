use linesight_map::{DraftRepository, MappingDraft, MappingEditSession};
use linesight_model::{FieldVocabulary, RawImportId};

fn session() -> MappingEditSession {
    MappingEditSession::open(
        vec![
            ("Timestamp".to_string(), "timestamp".to_string()),
            ("Qty".to_string(), String::new()),
        ],
        FieldVocabulary::standard(),
    )
}

#[test]
fn drafts_round_trip_edits() {
    let dir = tempfile::tempdir().unwrap();
    let repo = DraftRepository::new(dir.path()).unwrap();
    let import_id = RawImportId::new("imp-roundtrip").unwrap();

    let mut session = session();
    session.set_target(1, "units_produced").unwrap();

    let draft = MappingDraft::from_session(
        import_id.clone(),
        "may_output.csv",
        &session,
        Some("Timestamp".to_string()),
    );
    repo.save(&draft).unwrap();
    assert!(repo.exists(&import_id));

    let loaded = repo.load(&import_id).unwrap().expect("draft exists");
    assert_eq!(loaded.filename, "may_output.csv");
    assert_eq!(loaded.time_column.as_deref(), Some("Timestamp"));

    let resumed = loaded.into_session(FieldVocabulary::standard());
    assert_eq!(resumed.rows()[1].target, "units_produced");
    // The suggestion survived persistence, so the correction flag holds.
    assert!(resumed.entries()[1].user_corrected);
}

#[test]
fn missing_draft_loads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let repo = DraftRepository::new(dir.path()).unwrap();
    let id = RawImportId::new("imp-none").unwrap();
    assert!(repo.load(&id).unwrap().is_none());
    assert!(!repo.delete(&id).unwrap());
}

#[test]
fn list_and_delete() {
    let dir = tempfile::tempdir().unwrap();
    let repo = DraftRepository::new(dir.path()).unwrap();

    for n in 0..3 {
        let id = RawImportId::new(format!("imp-{n}")).unwrap();
        let draft = MappingDraft::from_session(id, format!("file{n}.csv"), &session(), None);
        repo.save(&draft).unwrap();
    }

    let listed = repo.list().unwrap();
    assert_eq!(listed.len(), 3);
    assert!(listed.iter().all(|m| m.row_count == 2));

    let victim = RawImportId::new("imp-1").unwrap();
    assert!(repo.delete(&victim).unwrap());
    assert_eq!(repo.list().unwrap().len(), 2);
    assert!(!repo.exists(&victim));
}
