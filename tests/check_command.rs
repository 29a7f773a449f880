//! `slate check` keeps its listing on stdout and its logs on stderr.

use std::process::Command;

const POSTS: &str = r#"[
    {"title": "Go Fast!", "image": "", "author": "A", "createdAt": 1704067200, "teaser": "", "content": ""},
    {"title": "Go  Fast?", "image": "", "author": "B", "createdAt": 1706745600, "teaser": "", "content": ""}
]"#;

#[test]
fn check_prints_only_tab_separated_rows_on_stdout() {
    let dir = tempfile::tempdir().expect("temp dir");
    let posts_file = dir.path().join("posts.json");
    std::fs::write(&posts_file, POSTS).expect("write posts file");

    let output = Command::new(env!("CARGO_BIN_EXE_slate"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .env("RUST_LOG", "info")
        .env_remove("SLATE_CONFIG_FILE")
        .arg("check")
        .arg("--posts-file")
        .arg(&posts_file)
        .output()
        .expect("run slate check");

    assert!(output.status.success(), "{output:?}");

    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "go-fast\tJanuary 1, 2024\tGo Fast!",
            "go-fast\tFebruary 1, 2024\tGo  Fast?",
            "collision\tgo-fast\tpositions [0, 1]",
        ]
    );

    let stderr = String::from_utf8(output.stderr).expect("utf8 stderr");
    assert!(stderr.contains("loaded posts"), "{stderr}");
    assert!(stderr.contains("multiple posts share a slug"), "{stderr}");
}

#[test]
fn check_fails_on_missing_posts_file() {
    let dir = tempfile::tempdir().expect("temp dir");

    let output = Command::new(env!("CARGO_BIN_EXE_slate"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .env_remove("SLATE_CONFIG_FILE")
        .arg("check")
        .arg("--posts-file")
        .arg(dir.path().join("absent.json"))
        .output()
        .expect("run slate check");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
