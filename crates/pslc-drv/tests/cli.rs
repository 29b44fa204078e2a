//! End-to-end tests driving the `pslc` binary through its CLI surface.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn pslc_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_pslc"))
}

fn pslc() -> Command {
    Command::new(pslc_bin())
}

fn write_source(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write fixture source");
    path
}

#[test]
fn missing_argument_reports_no_input_file() {
    pslc()
        .assert()
        .failure()
        .stdout(predicate::str::contains("parser: no input file."));
}

#[test]
fn unreadable_path_reports_cant_read() {
    pslc()
        .arg("/nonexistent/path/does/not/exist.kpl")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Can't read input file!"));
}

#[test]
fn minimal_program_succeeds_with_a_nonempty_tree() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_source(&dir, "p.kpl", "PROGRAM P;\nBEGIN\nEND.\n");

    pslc()
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn type_mismatch_reports_a_single_diagnostic_line() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_source(
        &dir,
        "p.kpl",
        "PROGRAM P;\nVAR x: INTEGER;\nBEGIN x := 'a' END.\n",
    );

    pslc()
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Type inconsistency"));
}

#[test]
fn duplicate_declaration_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_source(
        &dir,
        "p.kpl",
        "PROGRAM P; VAR x: INTEGER; x: CHAR; BEGIN END.\n",
    );

    pslc()
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Duplicate identifier."));
}

#[test]
fn array_element_access_succeeds() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_source(
        &dir,
        "p.kpl",
        "PROGRAM P;\nVAR a: ARRAY (.10.) OF INTEGER;\nBEGIN a(.3.) := a(.4.) + 1 END.\n",
    );

    pslc().arg(&path).assert().success();
}

#[test]
fn unterminated_block_comment_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_source(&dir, "p.kpl", "PROGRAM P; (* no end BEGIN END.\n");

    pslc()
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("End of comment expected!"));
}

#[test]
fn by_reference_argument_must_be_an_lvalue() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_source(
        &dir,
        "p.kpl",
        "PROGRAM P;\nPROCEDURE Q(VAR x: INTEGER);\nBEGIN END;\nBEGIN CALL Q(1+2) END.\n",
    );

    pslc().arg(&path).assert().failure();
}

#[test]
fn by_reference_argument_accepts_a_plain_variable() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_source(
        &dir,
        "p.kpl",
        "PROGRAM P;\nVAR v: INTEGER;\nPROCEDURE Q(VAR x: INTEGER);\nBEGIN END;\nBEGIN CALL Q(v) END.\n",
    );

    pslc().arg(&path).assert().success();
}

#[test]
fn a_constant_identifier_type_checks_as_a_factor() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_source(
        &dir,
        "p.kpl",
        "PROGRAM P; CONST N = 5; VAR X: INTEGER; BEGIN X := N END.\n",
    );

    pslc().arg(&path).assert().success();
}

#[test]
fn a_parameterless_function_is_called_without_parens() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_source(&dir, "p.kpl", "PROGRAM P; VAR X: INTEGER; BEGIN X := READI END.\n");

    pslc().arg(&path).assert().success();
}

#[test]
fn for_loop_accepts_a_char_variable() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_source(
        &dir,
        "p.kpl",
        "PROGRAM P; VAR C: CHAR; BEGIN FOR C := 'a' TO 'z' DO CALL WRITEC(C) END.\n",
    );

    pslc().arg(&path).assert().success();
}
