//! Integration tests for the `empdoc` binary against the fixture repo.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn empdoc_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_empdoc"))
}

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn temp_out(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("empdoc-cli-test").join(name);
    // Clean up from previous runs
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn empdoc(args: &[&str]) -> Output {
    Command::new(empdoc_bin())
        .arg("--root")
        .arg(fixtures())
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run empdoc")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn render_prints_html_fragment() {
    let readme = fixtures().join("docs/README.md");
    let out = empdoc(&["render", readme.to_str().unwrap()]);
    assert!(out.status.success());

    let html = stdout(&out);
    assert!(html.starts_with("<h1>EMP documentation</h1>"));
    assert!(html.contains(r##"<a href="#03_syntax.md">Syntax</a>"##));
}

#[test]
fn render_json_exposes_blocks() {
    let readme = fixtures().join("docs/README.md");
    let out = empdoc(&["render", readme.to_str().unwrap(), "--format", "json"]);
    assert!(out.status.success());

    let json: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(json["doc"]["blocks"][0]["type"], "heading");
    assert_eq!(json["doc"]["blocks"][0]["level"], 1);
    assert_eq!(json["diagnostics"].as_array().unwrap().len(), 0);
}

#[test]
fn render_reports_unterminated_fence_on_stderr() {
    let dir = temp_out("render-fence");
    fs::create_dir_all(&dir).unwrap();
    let page = dir.join("open.md");
    fs::write(&page, "intro\n```emp\nlet x = 1;\n").unwrap();

    let out = empdoc(&["render", page.to_str().unwrap()]);
    assert!(out.status.success(), "diagnostics are not fatal");
    assert!(stderr(&out).contains(":2: Unterminated code fence opened at line 2"));
    assert_eq!(stdout(&out).trim_end(), "<p>intro</p><pre><code>let x = 1;\n</code></pre>");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn predict_json_for_a_file() {
    let file = fixtures().join("tests/mm_file.em");
    let out = empdoc(&["predict", file.to_str().unwrap(), "--format", "json"]);
    assert!(out.status.success());

    let json: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(json["isFail"], false);
    assert_eq!(json["statistics"]["deferCount"], 1);
    assert_eq!(json["features"][0]["id"], "mm_file");
    assert_eq!(json["hints"].as_array().unwrap().len(), 1);
}

#[test]
fn predict_reads_stdin_without_a_path() {
    let mut child = Command::new(empdoc_bin())
        .args(["predict", "-", "--format", "json"])
        .env("NO_COLOR", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to run empdoc predict");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"let x = 1;\n")
        .unwrap();
    let out = child.wait_with_output().unwrap();
    assert!(out.status.success());

    let json: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert!(json["filePath"].is_null());
    assert_eq!(json["keywords"], serde_json::json!(["let"]));
}

#[test]
fn runner_uses_index_default() {
    let out = empdoc(&["runner", "--format", "json"]);
    assert!(out.status.success(), "{}", stderr(&out));

    let json: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(json["filePath"], "tests/mm_file.em");
}

#[test]
fn runner_all_summarises_group() {
    let out = empdoc(&["runner", "--group", "tests", "--all"]);
    assert!(out.status.success(), "{}", stderr(&out));

    let text = stdout(&out);
    assert!(text.contains("tests/borrow_twice_fail.em"));
    assert!(text.contains("expected fail"));
    assert!(text.contains("tests/mm_file.em"));
    assert!(!text.contains("examples/hello.em"));
    assert!(text.contains("Explained 2 file(s)"));
}

#[test]
fn runner_rejects_empty_group() {
    let out = empdoc(&["runner", "--group", "stdlib"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("No .em files in group 'stdlib'"));
}

#[test]
fn pages_filters_and_marks_current() {
    let out = empdoc(&["pages", "--search", "SYNTAX"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert_eq!(text.lines().count(), 1);
    assert!(text.contains("Syntax"));

    let out = empdoc(&["pages", "--hash", "#07_mm_off.md"]);
    let text = stdout(&out);
    assert_eq!(text.lines().count(), 3);
    assert!(
        text.lines()
            .any(|l| l.starts_with("* Manual memory (@emp mm off)"))
    );
    assert!(text.lines().any(|l| l.starts_with("  Overview")));
}

#[test]
fn index_walks_em_files() {
    let dir = temp_out("index");
    let out_file = dir.join("em_index.json");
    let out = empdoc(&["index", "--out", out_file.to_str().unwrap(), "--quiet"]);
    assert!(out.status.success(), "{}", stderr(&out));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out_file).unwrap()).unwrap();
    let paths: Vec<_> = json["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["path"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        paths,
        vec!["examples/hello.em", "tests/borrow_twice_fail.em", "tests/mm_file.em"]
    );
    assert_eq!(json["defaultPath"], "tests/borrow_twice_fail.em");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn build_writes_single_page_site() {
    let dir = temp_out("build");
    let out = empdoc(&["build", "--out", dir.to_str().unwrap(), "--quiet"]);
    assert!(out.status.success(), "{}", stderr(&out));

    let html = fs::read_to_string(dir.join("index.html")).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Overview</title>"));
    for id in ["README.md", "03_syntax.md", "07_mm_off.md"] {
        assert!(html.contains(&format!("<section id=\"{id}\">")), "missing section {id}");
    }
    assert!(html.contains(r##"<a href="#README.md" data-path="README.md" class="active">Overview</a>"##));
    assert!(html.contains("<h1>EMP documentation</h1>"));

    assert!(dir.join("manifest.json").exists(), "manifest should be copied");

    let _ = fs::remove_dir_all(&dir);
}
