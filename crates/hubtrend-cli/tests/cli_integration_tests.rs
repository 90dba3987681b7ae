//! CLI integration tests
//!
//! Drive the `hubtrend` binary end to end: collect two generations from
//! listing files, then discover and inspect history.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const REPO: &str = "org/trending-repos";

fn write_listing(dir: &Path, name: &str, json: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, json).unwrap();
    path
}

fn run(temp_dir: &TempDir, args: &[&str]) -> Output {
    let cli_bin = env!("CARGO_BIN_EXE_hubtrend");
    Command::new(cli_bin)
        .current_dir(temp_dir.path())
        .env("RUST_LOG", "off")
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Jan 1: A, B. Jan 8: A, B, C and dataset X.
fn setup_test_repo(temp_dir: &TempDir) -> PathBuf {
    let db_path = temp_dir.path().join("store.db");
    let db = db_path.to_str().unwrap();

    let first = write_listing(
        temp_dir.path(),
        "models-1.json",
        r#"[
            {"modelId": "org/a", "downloads": 50, "likes": 3, "lastModified": "2023-12-20T00:00:00Z"},
            {"modelId": "org/b", "downloads": 40, "likes": 2, "lastModified": "2023-12-21T00:00:00Z"}
        ]"#,
    );
    let second = write_listing(
        temp_dir.path(),
        "models-2.json",
        r#"[
            {"modelId": "org/a", "downloads": 90, "likes": 5, "lastModified": "2023-12-20T00:00:00Z"},
            {"modelId": "org/b", "downloads": 80, "likes": 4, "lastModified": "2023-12-21T00:00:00Z"},
            {"modelId": "org/c", "downloads": 30, "likes": 1, "lastModified": "2024-01-05T00:00:00Z"}
        ]"#,
    );
    let datasets = write_listing(
        temp_dir.path(),
        "datasets-2.json",
        r#"[{"id": "org/x", "downloads": 7, "likes": 0, "lastModified": "2024-01-06T00:00:00Z"}]"#,
    );

    for (models, datasets, at) in [
        (first.as_path(), None, "2024-01-01T00:00:00Z"),
        (second.as_path(), Some(datasets.as_path()), "2024-01-08T00:00:00Z"),
    ] {
        let mut args = vec![
            "collect",
            "--repo",
            REPO,
            "--db",
            db,
            "--models",
            models.to_str().unwrap(),
            "--collected-at",
            at,
        ];
        if let Some(datasets) = datasets {
            args.extend(["--datasets", datasets.to_str().unwrap()]);
        }
        let output = run(temp_dir, &args);
        assert!(output.status.success(), "collect failed: {}", stderr(&output));
    }

    db_path
}

#[test]
fn test_cli_discover_prints_report() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = setup_test_repo(&temp_dir);

    let output = run(
        &temp_dir,
        &[
            "discover",
            "--repo",
            REPO,
            "--db",
            db_path.to_str().unwrap(),
            "--days",
            "6",
        ],
    );

    assert!(output.status.success(), "discover failed: {}", stderr(&output));
    let report = stdout(&output);
    assert!(report.contains("=== New Trending Models (first appeared in last 6 days) ==="));
    assert!(report.contains("2024-01-08 00:00:00+00:00: org/c (Downloads: 30, Likes: 1)"));
    assert!(!report.contains("org/a"));
    assert!(report.contains("Total new datasets: 1"));
}

#[test]
fn test_cli_discover_with_recency_shows_age() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = setup_test_repo(&temp_dir);

    let output = run(
        &temp_dir,
        &[
            "discover",
            "--repo",
            REPO,
            "--db",
            db_path.to_str().unwrap(),
            "--days",
            "6",
            "--max-age-months",
            "1",
        ],
    );

    assert!(output.status.success(), "discover failed: {}", stderr(&output));
    assert!(stdout(&output).contains("org/c (Modified 3d ago, Downloads: 30, Likes: 1)"));
}

#[test]
fn test_cli_discover_json() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = setup_test_repo(&temp_dir);

    let output = run(
        &temp_dir,
        &[
            "discover",
            "--repo",
            REPO,
            "--db",
            db_path.to_str().unwrap(),
            "--days",
            "6",
            "--json",
        ],
    );

    assert!(output.status.success(), "discover failed: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["result"]["new_models_count"], 1);
    assert_eq!(json["result"]["models"][0]["id"], "org/c");
}

#[test]
fn test_cli_history_lists_generations() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = setup_test_repo(&temp_dir);

    let output = run(
        &temp_dir,
        &["history", "--repo", REPO, "--db", db_path.to_str().unwrap()],
    );

    assert!(output.status.success(), "history failed: {}", stderr(&output));
    let lines: Vec<String> = stdout(&output).lines().map(str::to_string).collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("2024-01-01 00:00:00+00:00"));
    assert!(lines[2].contains("dataset"));
}

#[test]
fn test_cli_unknown_repository_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = setup_test_repo(&temp_dir);

    let output = run(
        &temp_dir,
        &[
            "discover",
            "--repo",
            "nobody/nothing",
            "--db",
            db_path.to_str().unwrap(),
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.starts_with("Error: "));
    assert!(err.contains("ERR_STORE_UNAVAILABLE"));
}

#[test]
fn test_cli_missing_store_is_not_created() {
    let temp_dir = TempDir::new().unwrap();

    let output = run(&temp_dir, &["discover", "--db", "absent/store.db"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("ERR_STORE_UNAVAILABLE"));
    assert!(!temp_dir.path().join("absent").exists());
}

#[test]
fn test_cli_collect_requires_a_listing() {
    let temp_dir = TempDir::new().unwrap();

    let output = run(&temp_dir, &["collect", "--db", "store.db"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("--models and/or --datasets"));
}

#[test]
fn test_cli_rejects_zero_day_window() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = setup_test_repo(&temp_dir);

    let output = run(
        &temp_dir,
        &["discover", "--db", db_path.to_str().unwrap(), "--days", "0"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("days"));
}

fn ranked_listing(count: usize, extra: Option<&str>) -> String {
    let mut items: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "modelId": format!("org/m{:03}", i),
                "downloads": 1000 + i,
                "lastModified": "2024-01-01T00:00:00Z"
            })
        })
        .collect();
    if let Some(id) = extra {
        items.push(serde_json::json!({
            "modelId": id,
            "downloads": 1,
            "lastModified": "2024-01-07T00:00:00Z"
        }));
    }
    serde_json::Value::Array(items).to_string()
}

fn new_models_count(temp_dir: &TempDir, db: &str, extra_args: &[&str]) -> u64 {
    let mut args = vec!["discover", "--repo", REPO, "--db", db, "--days", "6", "--json"];
    args.extend_from_slice(extra_args);
    let output = run(temp_dir, &args);
    assert!(output.status.success(), "discover failed: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    json["result"]["new_models_count"].as_u64().unwrap()
}

#[test]
fn test_cli_bare_top_n_applies_default_cap() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("store.db");
    let db = db_path.to_str().unwrap();

    let first = write_listing(temp_dir.path(), "gen-1.json", &ranked_listing(100, None));
    let second = write_listing(
        temp_dir.path(),
        "gen-2.json",
        &ranked_listing(100, Some("org/newcomer")),
    );
    for (listing, at) in [
        (&first, "2024-01-01T00:00:00Z"),
        (&second, "2024-01-08T00:00:00Z"),
    ] {
        let output = run(
            &temp_dir,
            &[
                "collect",
                "--repo",
                REPO,
                "--db",
                db,
                "--models",
                listing.to_str().unwrap(),
                "--collected-at",
                at,
            ],
        );
        assert!(output.status.success(), "collect failed: {}", stderr(&output));
    }

    // The newcomer ranks 101st in its generation
    assert_eq!(new_models_count(&temp_dir, db, &[]), 1);
    assert_eq!(new_models_count(&temp_dir, db, &["--top-n"]), 0);
    assert_eq!(new_models_count(&temp_dir, db, &["--top-n", "101"]), 1);
}

#[test]
fn test_cli_discover_does_not_migrate_foreign_database() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("other.db");
    {
        let conn = rusqlite::Connection::open(&db_path).unwrap();
        conn.execute_batch("CREATE TABLE notes (body TEXT);").unwrap();
    }

    let output = run(&temp_dir, &["discover", "--db", db_path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("ERR_STORE_UNAVAILABLE"));

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    let table_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(table_count, 1);
}
