//! Integration tests for the Folio CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const CHAPTER: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<html xmlns="http://www.w3.org/1999/xhtml">
  <head><title>Persuasion</title></head>
  <body>
    <h3>Chapter 1</h3>
    <div class="text">
      <p>Sir Walter Elliot, of Kellynch Hall, in Somersetshire&hellip;</p>
    </div>
  </body>
</html>"#;

const NCX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">
  <head><meta name="dtb:uid" content="urn:uuid:1"/></head>
  <docTitle><text>Persuasion</text></docTitle>
  <navMap>
    <navPoint id="np1" playOrder="1">
      <navLabel><text>Volume I</text></navLabel>
      <content src="v1.xhtml"/>
      <navPoint id="np2" playOrder="2">
        <navLabel><text>Chapter 1</text></navLabel>
        <content src="ch1.xhtml"/>
      </navPoint>
    </navPoint>
  </navMap>
</ncx>"#;

const OPF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="2.0" unique-identifier="BookId">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
    <dc:title>Persuasion</dc:title>
    <dc:creator>Jane Austen</dc:creator>
    <dc:language>en</dc:language>
    <dc:identifier id="BookId">urn:uuid:1</dc:identifier>
  </metadata>
  <manifest/>
</package>"#;

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write test file");
    path
}

fn folio() -> Command {
    Command::cargo_bin("folio-cli").unwrap()
}

#[test]
fn test_help() {
    folio()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("content"))
        .stdout(predicate::str::contains("toc"))
        .stdout(predicate::str::contains("metadata"))
        .stdout(predicate::str::contains("batch"));
}

#[test]
fn test_version() {
    folio()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("folio"));
}

#[test]
fn test_batch_help() {
    folio()
        .args(["batch", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Batch extract"))
        .stdout(predicate::str::contains("--output-dir"))
        .stdout(predicate::str::contains("--jobs"));
}

#[test]
fn test_content_text_output() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_file(&temp_dir, "ch1.xhtml", CHAPTER);

    folio()
        .args(["content", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Title: Chapter 1"))
        .stdout(predicate::str::contains("### Chapter 1"))
        .stdout(predicate::str::contains("Somersetshire\u{2026}"));
}

#[test]
fn test_content_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_file(&temp_dir, "ch1.xhtml", CHAPTER);

    let output = folio()
        .args(["content", "--json", input.to_str().unwrap()])
        .assert()
        .success();

    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("Output should be valid JSON");
    assert_eq!(json["title"], "Chapter 1");
    assert_eq!(json["content"][0]["type"], "chapter_title");
    assert_eq!(json["content"][1]["type"], "text_block");
}

#[test]
fn test_toc_output() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_file(&temp_dir, "toc.ncx", NCX);

    folio()
        .args(["toc", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Volume I (v1.xhtml)"))
        .stdout(predicate::str::contains("  Chapter 1 (ch1.xhtml)"));
}

#[test]
fn test_metadata_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_file(&temp_dir, "content.opf", OPF);

    let output = folio()
        .args(["metadata", "--json", input.to_str().unwrap()])
        .assert()
        .success();

    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("Output should be valid JSON");
    assert_eq!(json["title"], "Persuasion");
    assert_eq!(json["creators"][0], "Jane Austen");
    assert_eq!(json["identifier"], "urn:uuid:1");
}

#[test]
fn test_content_nonexistent_file() {
    folio()
        .args(["content", "/nonexistent/file.xhtml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open input file"));
}

#[test]
fn test_malformed_markup() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_file(&temp_dir, "bad.xhtml", "<html><body><p>open</body></html>");

    folio()
        .args(["content", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid XML"));
}

#[test]
fn test_toc_on_wrong_document() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_file(&temp_dir, "ch1.xhtml", CHAPTER);

    folio()
        .args(["toc", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("path element 'ncx'"));
}

#[test]
fn test_batch_missing_output_dir() {
    folio()
        .args(["batch", "/some/input/dir"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--output-dir"));
}

#[test]
fn test_batch_invalid_jobs() {
    folio()
        .args([
            "batch",
            "/some/input/dir",
            "--output-dir",
            "/some/output/dir",
            "--jobs",
            "0",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 1"));
}

#[test]
fn test_batch_empty_directory() {
    let temp_dir = TempDir::new().unwrap();
    let input_dir = temp_dir.path().join("input");
    let output_dir = temp_dir.path().join("output");
    fs::create_dir_all(&input_dir).unwrap();

    folio()
        .args([
            "batch",
            input_dir.to_str().unwrap(),
            "--output-dir",
            output_dir.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No supported files"));
}

#[test]
fn test_batch_with_files() {
    let temp_dir = TempDir::new().unwrap();
    let input_dir = temp_dir.path().join("input");
    let output_dir = temp_dir.path().join("output");
    fs::create_dir_all(&input_dir).unwrap();

    fs::write(input_dir.join("ch1.xhtml"), CHAPTER).unwrap();
    fs::write(input_dir.join("toc.ncx"), NCX).unwrap();
    fs::write(input_dir.join("content.opf"), OPF).unwrap();
    fs::write(input_dir.join("notes.txt"), "ignored").unwrap();

    folio()
        .args([
            "batch",
            input_dir.to_str().unwrap(),
            "--output-dir",
            output_dir.to_str().unwrap(),
            "--jobs",
            "2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 3 files"));

    let toc: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(output_dir.join("toc.ncx.json")).unwrap())
            .unwrap();
    assert_eq!(toc["kind"], "toc");
    assert_eq!(toc["value"][0]["children"][0]["title"], "Chapter 1");
    assert!(output_dir.join("ch1.xhtml.json").exists());
    assert!(output_dir.join("content.opf.json").exists());
    assert!(!output_dir.join("notes.txt.json").exists());
}

#[test]
fn test_batch_reports_failures() {
    let temp_dir = TempDir::new().unwrap();
    let input_dir = temp_dir.path().join("input");
    let output_dir = temp_dir.path().join("output");
    fs::create_dir_all(&input_dir).unwrap();

    fs::write(input_dir.join("good.opf"), OPF).unwrap();
    fs::write(input_dir.join("bad.opf"), "<package><metadata/></package>").unwrap();

    folio()
        .args([
            "batch",
            input_dir.to_str().unwrap(),
            "--output-dir",
            output_dir.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("completed with 1 errors"));
}

#[test]
fn test_verbose_flag() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_file(&temp_dir, "content.opf", OPF);

    folio()
        .args(["--verbose", "metadata", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Authors:     Jane Austen"));
}
