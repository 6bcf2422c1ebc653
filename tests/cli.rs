//! Integration tests for CLI commands

#![allow(deprecated)]

mod common;

use assert_cmd::{assert::OutputAssertExt, cargo::CommandCargoExt};
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_help_lists_commands() {
    let mut cmd = Command::cargo_bin("qast").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Check backend health"))
        .stdout(predicate::str::contains("Ask the RAG service a question"))
        .stdout(predicate::str::contains("Interactive chat and ingest UI"));
}

#[test]
fn test_ask_help_shows_expertise_values() {
    let mut cmd = Command::cargo_bin("qast").unwrap();
    cmd.arg("ask").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("novice"))
        .stdout(predicate::str::contains("expert"));
}

#[test]
fn test_health_against_unreachable_backend_fails() {
    let mut cmd = Command::cargo_bin("qast").unwrap();
    cmd.arg("health")
        .arg("--base-url")
        .arg("http://127.0.0.1:1")
        .arg("--timeout-secs")
        .arg("5");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Network error"));
}

#[test]
fn test_invalid_base_url_fails() {
    let mut cmd = Command::cargo_bin("qast").unwrap();
    cmd.arg("health").arg("--base-url").arg("not a url");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to create API client"));
}

#[test]
fn test_table_rejects_bad_identifier() {
    let mut cmd = Command::cargo_bin("qast").unwrap();
    cmd.arg("table")
        .arg("test; DROP TABLE x")
        .arg("list")
        .arg("--base-url")
        .arg("http://127.0.0.1:1");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid identifier"));
}

#[test]
fn test_table_create_requires_key_value() {
    let mut cmd = Command::cargo_bin("qast").unwrap();
    cmd.arg("table")
        .arg("test")
        .arg("create")
        .arg("--set")
        .arg("novalue");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Expected column=value"));
}

#[test]
fn test_config_prints_sections() {
    let mut cmd = Command::cargo_bin("qast").unwrap();
    cmd.arg("config").arg("--rag-url").arg("http://rag.internal:9000");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("[api]"))
        .stdout(predicate::str::contains("[rag]"))
        .stdout(predicate::str::contains("http://rag.internal:9000"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_ask_prints_answer_and_sources() {
    let base = common::spawn(common::backend_router(common::Recorder::default())).await;

    let output = tokio::task::spawn_blocking(move || {
        Command::cargo_bin("qast")
            .unwrap()
            .arg("ask")
            .arg("What is Qast?")
            .arg("--rag-url")
            .arg(&base)
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Qast is a RAG system."));
    assert!(stdout.contains("[1] doc1"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_query_json_format() {
    let base = common::spawn(common::backend_router(common::Recorder::default())).await;

    let output = tokio::task::spawn_blocking(move || {
        Command::cargo_bin("qast")
            .unwrap()
            .args(["query", "SELECT * FROM test", "--format", "json", "--base-url"])
            .arg(&base)
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows.as_array().map(Vec::len), Some(2));
}
