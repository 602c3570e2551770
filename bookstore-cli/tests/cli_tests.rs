//! Integration tests for the Bookstore CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Command with an isolated session file and an unreachable backend
fn bookstore(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bookstore").unwrap();
    cmd.env_remove("BOOKSTORE_API_URL")
        .env_remove("BOOKSTORE_SESSION_PATH")
        .args([
            "--session-file",
            session_file(dir).to_str().unwrap(),
            "--api-url",
            "http://127.0.0.1:1/api",
        ]);
    cmd
}

fn session_file(dir: &TempDir) -> PathBuf {
    dir.path().join("session.json")
}

/// Write a stored session for a logged-in staff member
fn write_session(dir: &TempDir) {
    let session = serde_json::json!({
        "accessToken": "token-1",
        "refreshToken": "refresh-1",
        "user": r#"{"email":"staff@example.com","name":"Sam"}"#,
        "role": "EMPLOYEE"
    });
    fs::write(session_file(dir), session.to_string()).unwrap();
}

#[test]
fn test_help() {
    let mut cmd = Command::cargo_bin("bookstore").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("books"))
        .stdout(predicate::str::contains("orders"))
        .stdout(predicate::str::contains("clients"))
        .stdout(predicate::str::contains("employees"));
}

#[test]
fn test_version() {
    let mut cmd = Command::cargo_bin("bookstore").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bookstore"));
}

#[test]
fn test_books_search_help() {
    let mut cmd = Command::cargo_bin("bookstore").unwrap();
    cmd.args(["books", "search", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--genre"))
        .stdout(predicate::str::contains("--sort"))
        .stdout(predicate::str::contains("--page"));
}

#[test]
fn test_login_missing_password() {
    let dir = TempDir::new().unwrap();
    bookstore(&dir)
        .args(["login", "reader@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--password"));
}

#[test]
fn test_login_rejects_invalid_email() {
    let dir = TempDir::new().unwrap();
    bookstore(&dir)
        .args(["login", "not-an-email", "--password", "hunter22"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid email"));
}

#[test]
fn test_login_rejects_unknown_role() {
    let dir = TempDir::new().unwrap();
    bookstore(&dir)
        .args([
            "login",
            "reader@example.com",
            "--password",
            "hunter22",
            "--role",
            "admin",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown role"));
}

#[test]
fn test_whoami_without_session() {
    let dir = TempDir::new().unwrap();
    bookstore(&dir)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[test]
fn test_whoami_reads_stored_session() {
    let dir = TempDir::new().unwrap();
    write_session(&dir);
    bookstore(&dir)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sam <staff@example.com> (EMPLOYEE)"));
}

#[test]
fn test_whoami_json() {
    let dir = TempDir::new().unwrap();
    write_session(&dir);
    let output = bookstore(&dir)
        .args(["--json", "whoami"])
        .assert()
        .success();

    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("Output should be valid JSON");
    assert_eq!(json["email"], "staff@example.com");
    assert_eq!(json["role"], "EMPLOYEE");
}

#[test]
fn test_corrupt_session_is_discarded() {
    let dir = TempDir::new().unwrap();
    fs::write(session_file(&dir), "{not json").unwrap();
    bookstore(&dir)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[test]
fn test_logout_clears_session_when_server_unreachable() {
    let dir = TempDir::new().unwrap();
    write_session(&dir);
    bookstore(&dir)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out"));

    let stored: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(session_file(&dir)).unwrap()).unwrap();
    assert_eq!(stored, serde_json::json!({}));
}

#[test]
fn test_books_search_unreachable_server_fails() {
    let dir = TempDir::new().unwrap();
    bookstore(&dir)
        .args(["books", "search", "--genre", "Fiction"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not be reached"));
}

#[test]
fn test_sort_options_need_no_server() {
    let dir = TempDir::new().unwrap();
    bookstore(&dir)
        .args(["books", "sort-options"])
        .assert()
        .success()
        .stdout(predicate::str::contains("name (A-Z)"))
        .stdout(predicate::str::contains("price,desc"));
}

#[test]
fn test_place_order_rejects_bad_quantity() {
    let dir = TempDir::new().unwrap();
    bookstore(&dir)
        .args([
            "orders",
            "place",
            "--client",
            "reader@example.com",
            "Dune:lots",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid quantity"));
}

#[test]
fn test_orders_list_client_and_employee_conflict() {
    let dir = TempDir::new().unwrap();
    bookstore(&dir)
        .args([
            "orders",
            "list",
            "--client",
            "a@example.com",
            "--employee",
            "b@example.com",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_verbose_flag() {
    let dir = TempDir::new().unwrap();
    bookstore(&dir)
        .args(["--verbose", "whoami"])
        .assert()
        .success();
}
