use predicates::str::contains;

mod common;
use common::{clock_in_at, init_db, setup_test_db, slog};

#[test]
fn test_db_check_and_info() {
    let db_path = setup_test_db("maint_db");
    init_db(&db_path);

    clock_in_at(&db_path, "alice", "2025-06-10 07:00", Some("pagi"));

    slog()
        .args(["--db", &db_path, "db", "--check"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"));

    slog()
        .args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Total attendance events"))
        .stdout(contains("Shifts"));

    slog()
        .args(["--db", &db_path, "db", "--vacuum"])
        .assert()
        .success()
        .stdout(contains("Vacuum completed"));
}

#[test]
fn test_migrations_are_idempotent() {
    let db_path = setup_test_db("maint_migrate");
    init_db(&db_path);

    // running migrations again on an up-to-date schema is a no-op
    slog()
        .args(["--db", &db_path, "db", "--migrate"])
        .assert()
        .success()
        .stdout(contains("Migration completed"));

    slog()
        .args(["--db", &db_path, "db", "--migrate"])
        .assert()
        .success()
        .stdout(contains("Migration completed"));
}

#[test]
fn test_operations_land_in_the_internal_log() {
    let db_path = setup_test_db("maint_oplog");
    init_db(&db_path);

    clock_in_at(&db_path, "alice", "2025-06-10 07:00", Some("pagi"));

    slog()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("init"))
        .stdout(contains("clock-in"));
}

#[test]
fn test_config_check_validates_the_timezone() {
    let db_path = setup_test_db("maint_config");
    init_db(&db_path);

    slog()
        .args(["--db", &db_path, "config", "--check"])
        .assert()
        .success()
        .stdout(contains("Configuration OK"));
}
