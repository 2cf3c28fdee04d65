//! Behavior of the mapping edit session, including the review scenarios the
//! product contract pins down.

use linesight_map::{ConfirmOptions, MappingEditSession, MappingError, SaveState};
use linesight_model::{FieldDef, FieldType, FieldVocabulary, RawImportId};
use proptest::prelude::*;

fn small_vocab() -> FieldVocabulary {
    FieldVocabulary::new(vec![
        FieldDef::new("line_id", "Production line", FieldType::Text, true),
        FieldDef::new("style_id", "Style", FieldType::Text, false),
    ])
}

#[test]
fn two_column_review_scenario() {
    // initialMapping = {"Col A": "line_id", "Col B": ""} against a
    // two-field vocabulary.
    let mut session = MappingEditSession::open(
        vec![
            ("Col A".to_string(), "line_id".to_string()),
            ("Col B".to_string(), String::new()),
        ],
        small_vocab(),
    );

    assert_eq!(session.len(), 2);
    // Row 2 is unselected until changed, and blocks submission.
    assert_eq!(session.rows()[1].target, "");
    assert!(!session.can_submit());

    session.set_target(1, "style_id").unwrap();
    assert!(session.can_submit());

    // Both targets are drawn from the vocabulary; anything else is refused.
    assert!(matches!(
        session.set_target(0, "units_produced"),
        Err(MappingError::UnknownField(_))
    ));
}

#[test]
fn full_save_cycle_builds_request() {
    let mut session = MappingEditSession::open(
        vec![
            ("Date".to_string(), "line_id".to_string()),
            ("Style".to_string(), String::new()),
        ],
        small_vocab(),
    );
    session.set_target(1, "style_id").unwrap();

    let request = session
        .to_request(
            RawImportId::new("imp-9").unwrap(),
            "Date",
            ConfirmOptions {
                learn_corrections: Some(true),
                ..ConfirmOptions::default()
            },
        )
        .unwrap();

    assert_eq!(request.mappings.len(), 2);
    assert_eq!(request.mappings[1].target_field.as_deref(), Some("style_id"));
    assert!(request.mappings[1].user_corrected);
    assert!(!request.mappings[0].user_corrected);
    assert_eq!(request.learn_corrections, Some(true));

    session.begin_save().unwrap();
    assert_eq!(session.save_state(), &SaveState::Saving);
    session.save_succeeded();
    assert!(session.close_after().is_some());
}

proptest! {
    /// N input entries always produce exactly N rows, sources fixed and
    /// targets initialized from the input.
    #[test]
    fn open_is_row_for_row(entries in prop::collection::vec(("[A-Za-z ]{1,12}", "[a-z_]{0,10}"), 0..24)) {
        let session = MappingEditSession::open(
            entries.iter().cloned().collect::<Vec<_>>(),
            small_vocab(),
        );
        prop_assert_eq!(session.len(), entries.len());
        for (row, (source, target)) in session.rows().iter().zip(&entries) {
            prop_assert_eq!(&row.source, source);
            prop_assert_eq!(&row.target, target);
        }
    }

    /// Editing one row never affects any other row.
    #[test]
    fn edits_are_row_local(
        len in 1usize..16,
        edit_idx in 0usize..16,
        pick_second in any::<bool>(),
    ) {
        let edit_idx = edit_idx % len;
        let entries: Vec<(String, String)> = (0..len)
            .map(|i| (format!("Col {i}"), "line_id".to_string()))
            .collect();
        let mut session = MappingEditSession::open(entries, small_vocab());
        let before: Vec<String> =
            session.rows().iter().map(|r| r.target.clone()).collect();

        let field = if pick_second { "style_id" } else { "line_id" };
        session.set_target(edit_idx, field).unwrap();

        for (i, row) in session.rows().iter().enumerate() {
            if i == edit_idx {
                prop_assert_eq!(row.target.as_str(), field);
            } else {
                prop_assert_eq!(&row.target, &before[i]);
            }
        }
    }

    /// A failed save never loses an edit.
    #[test]
    fn failed_save_preserves_all_edits(
        len in 1usize..12,
        corrections in prop::collection::vec(any::<bool>(), 12),
    ) {
        let entries: Vec<(String, String)> = (0..len)
            .map(|i| (format!("Col {i}"), "line_id".to_string()))
            .collect();
        let mut session = MappingEditSession::open(entries, small_vocab());
        for i in 0..len {
            if corrections[i] {
                session.set_target(i, "style_id").unwrap();
            }
        }
        let before: Vec<String> =
            session.rows().iter().map(|r| r.target.clone()).collect();

        session.begin_save().unwrap();
        session.save_failed("backend unavailable");

        prop_assert_eq!(session.save_state(), &SaveState::Failed("backend unavailable".to_string()));
        let after: Vec<String> =
            session.rows().iter().map(|r| r.target.clone()).collect();
        prop_assert_eq!(before, after);
    }
}
