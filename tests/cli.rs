use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn rolodex(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rolodex").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

fn add_alice(dir: &Path) {
    rolodex(dir)
        .args(["add", "Alice", "555-123-4567", "--email", "a@b.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Contact 'Alice' added successfully!"));
}

#[test]
fn add_then_search_round_trips_through_the_file() {
    let temp = TempDir::new().unwrap();
    add_alice(temp.path());

    let data = fs::read_to_string(temp.path().join("contacts_data.json")).unwrap();
    assert!(data.contains("\"phone\": \"5551234567\""));
    assert!(data.contains("\"createdAt\""));

    rolodex(temp.path())
        .args(["search", "ali"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice").and(predicate::str::contains("5551234567")));
}

#[test]
fn invalid_phone_fails() {
    let temp = TempDir::new().unwrap();
    rolodex(temp.path())
        .args(["add", "Bob", "123"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid phone number"));
    assert!(!temp.path().join("contacts_data.json").exists());
}

#[test]
fn duplicate_add_needs_force() {
    let temp = TempDir::new().unwrap();
    add_alice(temp.path());

    rolodex(temp.path())
        .args(["add", "Alice", "5559999999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    rolodex(temp.path())
        .args(["add", "Alice", "5559999999", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("replaced"));
}

#[test]
fn update_reports_rejected_fields() {
    let temp = TempDir::new().unwrap();
    add_alice(temp.path());

    rolodex(temp.path())
        .args(["update", "Alice", "--phone", "12", "--group", "Work"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Invalid phone, keeping current")
                .and(predicate::str::contains("updated (group)")),
        );

    let data = fs::read_to_string(temp.path().join("contacts_data.json")).unwrap();
    assert!(data.contains("\"group\": \"Work\""));
    assert!(data.contains("5551234567"));
}

#[test]
fn delete_with_yes_removes_contact() {
    let temp = TempDir::new().unwrap();
    add_alice(temp.path());

    rolodex(temp.path())
        .args(["delete", "Alice", "--yes"])
        .assert()
        .success();

    rolodex(temp.path())
        .args(["delete", "Alice", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn delete_prompt_can_cancel() {
    let temp = TempDir::new().unwrap();
    add_alice(temp.path());

    rolodex(temp.path())
        .args(["delete", "Alice"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deletion cancelled."));
}

#[test]
fn export_writes_csv() {
    let temp = TempDir::new().unwrap();
    add_alice(temp.path());

    rolodex(temp.path())
        .args(["export", "book"])
        .assert()
        .success()
        .stdout(predicate::str::contains("book.csv"));

    let csv = fs::read_to_string(temp.path().join("book.csv")).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("Name,Phone,Email,Address,Group,Created At,Updated At")
    );
    assert!(lines.next().unwrap().starts_with("Alice,5551234567,a@b.com,,Other,"));
}

#[test]
fn stats_counts_groups() {
    let temp = TempDir::new().unwrap();
    add_alice(temp.path());

    rolodex(temp.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Total Contacts: 1")
                .and(predicate::str::contains("Recently Updated (last 7 days): 1")),
        );
}

#[test]
fn corrupt_file_starts_fresh() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("contacts_data.json"), "not json at all").unwrap();

    rolodex(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No contacts to display."))
        .stderr(predicate::str::contains("Starting fresh."));
}

#[test]
fn file_flag_and_config_choose_data_file() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("rolodex.json"),
        r#"{"data_file": "book.json"}"#,
    )
    .unwrap();
    add_alice(temp.path());
    assert!(temp.path().join("book.json").exists());

    rolodex(temp.path())
        .args(["--file", "other.json", "add", "Bob", "5550001111"])
        .assert()
        .success();
    assert!(temp.path().join("other.json").exists());
}

#[test]
fn shell_runs_menu_until_exit() {
    let temp = TempDir::new().unwrap();

    rolodex(temp.path())
        .write_stdin("1\nCarol\n(555) 222-3333\n\n12 Oak Ave\nFamily\n5\n8\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("MAIN MENU")
                .and(predicate::str::contains("Contact 'Carol' added successfully!"))
                .and(predicate::str::contains("All contacts (1 total)"))
                .and(predicate::str::contains("Thank you for using rolodex!")),
        );

    let data = fs::read_to_string(temp.path().join("contacts_data.json")).unwrap();
    assert!(data.contains("5552223333"));
    assert!(data.contains("12 Oak Ave"));
}

#[test]
fn invalid_config_is_reported() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("rolodex.json"),
        r#"{"recent_days": 1000000000}"#,
    )
    .unwrap();

    rolodex(temp.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Recently Updated (last 7 days): 0"))
        .stderr(predicate::str::contains("Ignoring config file, using defaults"));
}
