use predicates::str::contains;

mod common;
use common::{clock_in_at, clock_out_at, init_db, setup_test_db, slog};

#[test]
fn test_monthly_totals_for_a_worked_shift() {
    let db_path = setup_test_db("report_totals");
    init_db(&db_path);

    clock_in_at(&db_path, "alice", "2025-06-10 07:15", Some("pagi"));
    clock_out_at(&db_path, "alice", "2025-06-10 14:50");

    slog()
        .args([
            "--db", &db_path, "--user", "alice", "report", "--month", "2025-06",
        ])
        .assert()
        .success()
        .stdout(contains("Working days: 1 (regular 1, relief 0)"))
        .stdout(contains("Late minutes: 15"))
        .stdout(contains("Early-leave minutes: 10"));
}

#[test]
fn test_planned_day_without_logs_counts_nothing() {
    let db_path = setup_test_db("report_planned_only");
    init_db(&db_path);

    slog()
        .args([
            "--db",
            &db_path,
            "--user",
            "alice",
            "shift",
            "set",
            "pagi",
            "--date",
            "2025-07-01",
        ])
        .assert()
        .success();

    // the day shows up in the report, but no clock-in was ever recorded
    slog()
        .args([
            "--db", &db_path, "--user", "alice", "report", "--month", "2025-07",
        ])
        .assert()
        .success()
        .stdout(contains("2025-07-01"))
        .stdout(contains("--:--"))
        .stdout(contains("Working days: 0"));
}

#[test]
fn test_regular_and_relief_on_one_day_count_twice() {
    let db_path = setup_test_db("report_two_types");
    init_db(&db_path);

    clock_in_at(&db_path, "alice", "2025-06-10 07:00", Some("pagi"));
    clock_out_at(&db_path, "alice", "2025-06-10 15:00");

    slog()
        .args([
            "--db",
            &db_path,
            "--user",
            "alice",
            "in",
            "--shift",
            "sore",
            "--type",
            "relief",
            "--at",
            "2025-06-10 15:00",
        ])
        .assert()
        .success();

    slog()
        .args([
            "--db", &db_path, "--user", "alice", "report", "--month", "2025-06",
        ])
        .assert()
        .success()
        .stdout(contains("Working days: 2 (regular 1, relief 1)"));
}

#[test]
fn test_json_report_round_trips_instants() {
    let db_path = setup_test_db("report_json");
    init_db(&db_path);

    clock_in_at(&db_path, "alice", "2025-06-10 07:15", Some("pagi"));

    slog()
        .args([
            "--db", &db_path, "--user", "alice", "report", "--month", "2025-06", "--json",
        ])
        .assert()
        .success()
        .stdout(contains("\"total_working_days\": 1"))
        .stdout(contains("\"total_late_minutes\": 15"))
        // instants serialize as absolute RFC 3339, dates as plain YYYY-MM-DD
        .stdout(contains("2025-06-10T00:15:00Z"))
        .stdout(contains("\"date\": \"2025-06-10\""));
}

#[test]
fn test_report_for_another_user_requires_admin() {
    let db_path = setup_test_db("report_admin");
    init_db(&db_path);

    clock_in_at(&db_path, "alice", "2025-06-10 07:00", Some("pagi"));

    slog()
        .args([
            "--db", &db_path, "--user", "bob", "report", "--month", "2025-06", "--for", "alice",
        ])
        .assert()
        .failure()
        .stderr(contains("admin"));

    slog()
        .args([
            "--db", &db_path, "--user", "bob", "--admin", "report", "--month", "2025-06", "--for",
            "alice",
        ])
        .assert()
        .success()
        .stdout(contains("Working days: 1"));
}

#[test]
fn test_reset_day_clears_everything() {
    let db_path = setup_test_db("report_reset");
    init_db(&db_path);

    clock_in_at(&db_path, "alice", "2025-06-10 07:15", Some("pagi"));
    clock_out_at(&db_path, "alice", "2025-06-10 14:50");

    slog()
        .args([
            "--db",
            &db_path,
            "--user",
            "alice",
            "reset",
            "--date",
            "2025-06-10",
        ])
        .assert()
        .success()
        .stdout(contains("Deleted 2 events"));

    slog()
        .args([
            "--db",
            &db_path,
            "--user",
            "alice",
            "status",
            "--date",
            "2025-06-10",
        ])
        .assert()
        .success()
        .stdout(contains("not started"));

    slog()
        .args([
            "--db", &db_path, "--user", "alice", "report", "--month", "2025-06",
        ])
        .assert()
        .success()
        .stdout(contains("No attendance recorded."));
}

#[test]
fn test_invalid_month_is_rejected() {
    let db_path = setup_test_db("report_bad_month");
    init_db(&db_path);

    slog()
        .args([
            "--db", &db_path, "--user", "alice", "report", "--month", "2025-13",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid date"));
}
