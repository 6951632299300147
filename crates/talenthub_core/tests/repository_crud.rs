use serde_json::{json, Value};
use talenthub_core::store::Row;
use talenthub_core::{RepoError, Repository, SqliteStore, StoreError};

fn row(value: Value) -> Row {
    value.as_object().cloned().unwrap()
}

fn talent_row(first_name: &str, discipline: &str) -> Row {
    row(json!({
        "first_name": first_name,
        "last_name": "Ito",
        "date_of_birth": "2010-02-03",
        "gender": "Female",
        "discipline": discipline,
        "team": "Academy",
        "current_stage": "Beginner",
        "contact_email": "ito@club.test",
    }))
}

#[test]
fn create_assigns_id_and_timestamps() {
    let store = SqliteStore::open_in_memory().unwrap();
    let repo = Repository::new(&store, "talents");

    let created = repo.create(talent_row("Mei", "Karate")).unwrap();
    let id = created["id"].as_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());
    assert_eq!(created["created_at"], created["updated_at"]);

    let loaded = repo.get_by_id(id).unwrap();
    assert_eq!(loaded["first_name"], "Mei");
    assert_eq!(loaded["contact_phone"], Value::Null);
}

#[test]
fn update_changes_only_given_columns() {
    let store = SqliteStore::open_in_memory().unwrap();
    let repo = Repository::new(&store, "talents");
    let created = repo.create(talent_row("Mei", "Karate")).unwrap();
    let id = created["id"].as_str().unwrap();

    let updated = repo
        .update(id, row(json!({ "current_stage": "Elite" })))
        .unwrap();
    assert_eq!(updated["current_stage"], "Elite");
    assert_eq!(updated["first_name"], "Mei");
    assert_eq!(updated["created_at"], created["created_at"]);
    assert!(updated["updated_at"].as_str() >= created["updated_at"].as_str());
}

#[test]
fn update_of_missing_id_is_not_found() {
    let store = SqliteStore::open_in_memory().unwrap();
    let repo = Repository::new(&store, "talents");

    let err = repo
        .update("missing", row(json!({ "bio": "x" })))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound { collection: "talents", .. }));
    assert!(repo.get_all().unwrap().is_empty());
}

#[test]
fn delete_then_get_is_not_found_and_delete_is_idempotent() {
    let store = SqliteStore::open_in_memory().unwrap();
    let repo = Repository::new(&store, "talents");
    let created = repo.create(talent_row("Mei", "Karate")).unwrap();
    let id = created["id"].as_str().unwrap();

    repo.delete(id).unwrap();
    repo.delete(id).unwrap();

    let err = repo.get_by_id(id).unwrap_err();
    match err {
        RepoError::NotFound { collection, key } => {
            assert_eq!(collection, "talents");
            assert_eq!(key, format!("id={id}"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn find_by_field_and_find_one() {
    let store = SqliteStore::open_in_memory().unwrap();
    let repo = Repository::new(&store, "talents");
    repo.create(talent_row("Mei", "Karate")).unwrap();
    repo.create(talent_row("Ren", "Karate")).unwrap();
    repo.create(talent_row("Sol", "Orchestra")).unwrap();

    assert_eq!(repo.find_by_field("discipline", "Karate").unwrap().len(), 2);
    assert!(repo.find_by_field("discipline", "Swimming").unwrap().is_empty());

    let sol = repo.find_one_by_field("discipline", "Orchestra").unwrap();
    assert_eq!(sol["first_name"], "Sol");

    assert!(matches!(
        repo.find_one_by_field("discipline", "Swimming"),
        Err(RepoError::NotFound { .. })
    ));
    assert!(matches!(
        repo.find_one_by_field("discipline", "Karate"),
        Err(RepoError::NotUnique { count: 2, .. })
    ));
}

#[test]
fn store_faults_surface_as_storage_errors() {
    let store = SqliteStore::open_in_memory().unwrap();

    let missing_column = Repository::new(&store, "talents")
        .create(row(json!({ "first_name": "Mei" })))
        .unwrap_err();
    match missing_column {
        RepoError::Storage(StoreError::Backend(err)) => {
            assert!(err.to_string().contains("NOT NULL"));
        }
        other => panic!("unexpected error: {other}"),
    }

    assert!(matches!(
        Repository::new(&store, "teams").get_all(),
        Err(RepoError::Storage(StoreError::UnknownCollection(_)))
    ));
    assert!(matches!(
        Repository::new(&store, "talents").find_by_field("nickname", "x"),
        Err(RepoError::Storage(StoreError::UnknownField { .. }))
    ));
}
