mod common;

#[test]
fn test_creates_and_migrates_db_file() {
    let test_db = common::TestDb::new("test_creates_and_migrates_db_file.db");
    let conn = test_db.pool().get();
    assert!(conn.is_ok());
    assert!(test_db.path().exists());
}

#[test]
fn test_migrations_are_idempotent() {
    let test_db = common::TestDb::new("test_migrations_are_idempotent.db");
    assert!(shopdesk::db::run_migrations(&test_db.pool()).is_ok());
}
