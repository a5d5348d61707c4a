// ==========================================
// Import integration tests
// ==========================================
// Pasted text and CSV files through RosterApi
// ==========================================


use class_assign::api::ApiError;
use class_assign::domain::action_log::ActionType;
use class_assign::domain::types::Gender;
use class_assign::importer::ImportError;
use std::io::Write;
use test_helpers::create_test_state;

fn csv_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_import_pasted_text_into_class() {
    let (_temp, state) = create_test_state().unwrap();
    let text = "번호\t이름\t성별\t석차\n1\t김민수\t남\t2\n2\t이서연\t여\t1\t반장\n\n3\t박지훈";

    let report = state.roster_api.import_bulk_text(text, 4).unwrap();
    assert_eq!(report.added, 3);
    assert_eq!(report.target_class, 4);
    assert_eq!(report.skipped_lines, vec![1, 4]);

    let class_four = state.roster_api.list_students(Some(4)).unwrap();
    assert_eq!(class_four.len(), 3);
    let girl = class_four.iter().find(|s| s.name == "이서연").unwrap();
    assert_eq!(girl.gender, Gender::F);
    assert_eq!(girl.rank, 1);
    assert_eq!(girl.note, "반장");
    assert!(class_four.iter().all(|s| s.manual_class.is_none() && !s.is_transfer));

    let logged = state.action_log_repo.count_by_type(ActionType::Import).unwrap();
    assert_eq!(logged, 1);
}

#[test]
fn test_import_csv_file() {
    let (_temp, state) = create_test_state().unwrap();
    let file = csv_file("번호,이름,성별,석차\n1,김민수,남,3\n2,이서연,여,1,전학생\n,,,\n");

    let report = state.roster_api.import_file(file.path(), 2).unwrap();
    assert_eq!(report.added, 2);
    assert_eq!(report.skipped_lines, vec![1, 4]);
    assert_eq!(report.student_ids.len(), 2);

    let stored = state.roster_api.get_student(report.student_ids[1]).unwrap();
    assert_eq!(stored.name, "이서연");
    assert_eq!(stored.original_class, 2);
    assert_eq!(stored.note, "전학생");
}

#[test]
fn test_import_nothing_recognized() {
    let (_temp, state) = create_test_state().unwrap();

    let err = state.roster_api.import_bulk_text("이름 성별\n   \n", 1).unwrap_err();
    assert!(matches!(
        err,
        ApiError::ImportError(ImportError::NoRecognizedRows { skipped: 2 })
    ));
    assert!(state.roster_api.list_students(None).unwrap().is_empty());
}

#[test]
fn test_import_rejects_bad_class_and_files() {
    let (_temp, state) = create_test_state().unwrap();

    let err = state.roster_api.import_bulk_text("김민수", 10).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));

    let txt = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    let err = state.roster_api.import_file(txt.path(), 1).unwrap_err();
    assert!(matches!(
        err,
        ApiError::ImportError(ImportError::UnsupportedFormat(ref ext)) if ext == "txt"
    ));

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.csv");
    let err = state.roster_api.import_file(&missing, 1).unwrap_err();
    assert!(matches!(err, ApiError::ImportError(ImportError::FileNotFound(_))));
}
