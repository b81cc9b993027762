use assert_cmd::Command;
use assert_cmd::cargo;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use std::path::Path;
use tempfile::tempdir;

fn apireq(url: &str, storage: &Path) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("apireq"));
    cmd.env_remove("APIREQ_ORIGIN")
        .env_remove("APIREQ_STORAGE")
        .env_remove("RUST_LOG")
        .arg("--origin")
        .arg(url)
        .arg("--storage")
        .arg(storage)
        .arg("--connectivity")
        .arg("online");
    cmd
}

fn stored_token(storage: &Path) -> Option<String> {
    let content = std::fs::read_to_string(storage).ok()?;
    let values: serde_json::Value = serde_json::from_str(&content).ok()?;
    values.get("token")?.as_str().map(str::to_string)
}

#[test]
fn test_get_prints_body_on_200() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/api/user")
        .match_query(Matcher::UrlEncoded("id".into(), "7".into()))
        .with_status(200)
        .with_body(r#"{"name":"ada"}"#)
        .create();
    let dir = tempdir().unwrap();

    apireq(&server.url(), &dir.path().join("storage.json"))
        .args(["get", "/user", "-q", "id=7"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"name":"ada"}"#));

    mock.assert();
}

#[test]
fn test_post_sends_json_body() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/api/user")
        .match_header("content-type", "application/json")
        .match_body(Matcher::JsonString(r#"{"name":"ada"}"#.to_string()))
        .with_status(200)
        .with_body("{}")
        .create();
    let dir = tempdir().unwrap();

    apireq(&server.url(), &dir.path().join("storage.json"))
        .args(["post", "/user", "--data", r#"{"name":"ada"}"#])
        .assert()
        .success();

    mock.assert();
}

#[test]
fn test_created_rejected_unless_accept_2xx() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", "/api/user")
        .with_status(201)
        .with_body(r#"{"id":1}"#)
        .expect(2)
        .create();
    let dir = tempdir().unwrap();
    let storage = dir.path().join("storage.json");

    apireq(&server.url(), &storage)
        .args(["post", "/user"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("HTTP 201"));

    apireq(&server.url(), &storage)
        .args(["post", "/user", "--accept-2xx"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"id":1}"#));
}

#[test]
fn test_not_found_shows_notice() {
    let mut server = Server::new();
    let _mock = server.mock("GET", "/api/missing").with_status(404).create();
    let dir = tempdir().unwrap();

    apireq(&server.url(), &dir.path().join("storage.json"))
        .args(["get", "/missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requested resource does not exist"))
        .stderr(predicate::str::contains("Redirected").not());
}

#[test]
fn test_unauthorized_redirects_to_login() {
    let mut server = Server::new();
    let _mock = server.mock("GET", "/api/orders").with_status(401).create();
    let dir = tempdir().unwrap();

    apireq(&server.url(), &dir.path().join("storage.json"))
        .args(["get", "/orders", "--current-path", "/orders"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Redirected to /login?redirect=%2Forders"));
}

#[test]
fn test_forbidden_clears_token_and_redirects() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/api/user")
        .with_status(403)
        .with_body(r#"{"message":"expired"}"#)
        .create();
    let dir = tempdir().unwrap();
    let storage = dir.path().join("storage.json");

    apireq(&server.url(), &storage)
        .args(["token", "set", "abc"])
        .assert()
        .success();
    assert_eq!(stored_token(&storage).as_deref(), Some("abc"));

    apireq(&server.url(), &storage)
        .args(["get", "/user", "--current-path", "/account"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("login expired, please log in again"))
        .stderr(predicate::str::contains("Redirected to /login?redirect=%2Faccount"))
        .stderr(predicate::str::contains("HTTP 403: expired"));

    assert_eq!(stored_token(&storage), None);
}

#[test]
fn test_attach_token_sends_authorization_header() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/api/user")
        .match_header("authorization", "Bearer abc")
        .with_status(200)
        .create();
    let dir = tempdir().unwrap();
    let storage = dir.path().join("storage.json");

    apireq(&server.url(), &storage)
        .args(["token", "set", "Bearer abc"])
        .assert()
        .success();

    apireq(&server.url(), &storage)
        .args(["get", "/user", "--attach-token"])
        .assert()
        .success();

    mock.assert();
}

#[test]
fn test_offline_failure_is_absorbed() {
    let dir = tempdir().unwrap();

    // Nothing listens on port 1.
    let mut cmd = apireq("http://127.0.0.1:1", &dir.path().join("storage.json"));
    cmd.args(["get", "/user", "--connectivity", "offline"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Network is offline"));
}

#[test]
fn test_online_failure_is_reported() {
    let dir = tempdir().unwrap();

    apireq("http://127.0.0.1:1", &dir.path().join("storage.json"))
        .args(["get", "/user"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Connection failed"))
        .stderr(predicate::str::contains("Check --origin."));
}

#[test]
fn test_invalid_path_is_rejected() {
    let dir = tempdir().unwrap();

    apireq("http://127.0.0.1:1", &dir.path().join("storage.json"))
        .args(["get", "http://elsewhere.test/user"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("absolute URLs are not allowed"));
}

#[test]
fn test_token_show_and_clear() {
    let dir = tempdir().unwrap();
    let storage = dir.path().join("storage.json");
    let url = "http://127.0.0.1:1";

    apireq(url, &storage)
        .args(["token", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No token stored."));

    apireq(url, &storage).args(["token", "set", "xyz"]).assert().success();

    apireq(url, &storage)
        .args(["token", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("xyz"));

    apireq(url, &storage).args(["token", "clear"]).assert().success();
    assert_eq!(stored_token(&storage), None);
}
