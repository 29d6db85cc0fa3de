use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

const TABLE: &str = "\
title,section,authors,year,venue,paper_url,media,abstract
First journal,Journal Article,Jane Doe,2019,J. One,https://example.org/1.pdf,,
A talk,conf.,solo,2020,Conf,,Talk|http://x.test;NoURL,
Second journal,journal,,2021,J. Two,,,**bold** and *it*
Draft,Working Paper,Bob <b>,,,,,
Blog post,misc,,,,,,
";

fn pubpage() -> Command {
    let mut cmd = Command::cargo_bin("pubpage").expect("binary");
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

#[test]
fn generates_page_with_no_arguments() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("publications.csv"), TABLE)?;

    pubpage()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout("Wrote publications.html (5 items).\n");

    let html = fs::read_to_string(dir.path().join("publications.html"))?;
    assert_eq!(html.matches("<article").count(), 5);

    // Newest row first within a section.
    let second = html.find(">Second journal<").expect("second journal");
    let first = html.find(">First journal<").expect("first journal");
    assert!(second < first);

    assert!(html.contains("<strong>bold</strong> and <em>it</em>"));
    assert!(html.contains("with Bob &lt;b&gt;"));
    assert!(html.contains(r#"<a class="media-pill" href="http://x.test" rel="noopener">Talk</a>"#));
    assert!(html.contains(r#"<span class="media-pill">NoURL</span>"#));
    Ok(())
}

#[test]
fn every_section_is_present_even_when_empty() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("publications.csv"), "title,section\n")?;

    pubpage()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("(0 items)"));

    let html = fs::read_to_string(dir.path().join("publications.html"))?;
    for id in ["journal-papers", "conf-papers", "working-papers", "other-articles"] {
        assert!(html.contains(&format!(r#"id="{id}""#)), "missing {id}");
    }
    assert!(!html.contains("<article"));
    Ok(())
}

#[test]
fn output_is_identical_across_runs() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("publications.csv"), TABLE)?;

    pubpage().current_dir(dir.path()).assert().success();
    let first = fs::read(dir.path().join("publications.html"))?;
    pubpage().current_dir(dir.path()).assert().success();
    let second = fs::read(dir.path().join("publications.html"))?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn missing_input_fails_without_touching_output() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let out = dir.path().join("publications.html");
    fs::write(&out, "previous page")?;

    let output = pubpage().current_dir(dir.path()).output()?;
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(strip_ansi_escapes::strip(output.stderr))?;
    assert!(
        stderr.contains("error: publications.csv not found")
            && stderr.contains("Create the CSV (see template) and run again."),
        "stderr mismatch. stderr=\n{}",
        stderr
    );
    assert_eq!(fs::read_to_string(&out)?, "previous page");
    Ok(())
}

#[test]
fn paths_can_be_overridden() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("data").join("pubs.csv");
    let output = dir.path().join("site").join("index.html");
    fs::create_dir_all(input.parent().unwrap())?;
    fs::write(&input, TABLE)?;

    pubpage()
        .current_dir(dir.path())
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("(5 items)"));
    assert!(output.is_file());
    assert!(!dir.path().join("publications.html").exists());
    Ok(())
}

#[test]
fn config_file_sets_site_chrome() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("publications.csv"), TABLE)?;
    fs::write(
        dir.path().join("pubpage.toml"),
        "output = \"out.html\"\n\n[site]\nowner = \"Ada Lovelace\"\nmathjax = false\n",
    )?;

    pubpage()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout("Wrote out.html (5 items).\n");

    let html = fs::read_to_string(dir.path().join("out.html"))?;
    assert!(html.contains("<title>Publications | Ada Lovelace</title>"));
    assert!(!html.contains("MathJax"));
    Ok(())
}

#[test]
fn invalid_config_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("publications.csv"), TABLE)?;
    fs::write(dir.path().join("pubpage.toml"), "[site]\ncolour = \"red\"\n")?;

    pubpage()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config file"));
    assert!(!dir.path().join("publications.html").exists());
    Ok(())
}

#[test]
fn ragged_rows_read_as_empty_cells() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::write(
        dir.path().join("publications.csv"),
        "title,section,authors,year,venue,abstract\n\
         Short row,journal\n\
         Long row,conf,Jane Doe,2022,Conf,text,surplus,cells\n\
         Bare\n",
    )?;

    pubpage()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout("Wrote publications.html (3 items).\n");

    let html = fs::read_to_string(dir.path().join("publications.html"))?;
    assert_eq!(html.matches("<article").count(), 3);
    assert!(html.contains(">Short row<"));
    assert!(html.contains("with Jane Doe"));
    assert!(!html.contains("surplus"));

    let other = html.find(r#"id="other-articles""#).expect("other list");
    let bare = html.find(">Bare<").expect("bare row");
    assert!(other < bare);
    Ok(())
}

#[test]
fn repeated_columns_keep_the_last_value() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::write(
        dir.path().join("publications.csv"),
        "title,section,title,colour\nOld title,working,New title,blue\n",
    )?;

    pubpage()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout("Wrote publications.html (1 items).\n");

    let html = fs::read_to_string(dir.path().join("publications.html"))?;
    assert!(html.contains(">New title<"));
    assert!(!html.contains("Old title"));
    assert!(!html.contains("blue"));
    Ok(())
}
