#[path = "common/mod.rs"]
mod common;

use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use common::{pileup_line, scratch_dir, tally_row, write_pileup, MIXED_PILEUP};
use pileup_tally::pileup::HEADER_COLUMNS;

fn run_binary_in<P: AsRef<OsStr>>(dir: &Path, args: &[P]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pileup-tally"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("expected pileup-tally binary to execute")
}

fn expected_header() -> String {
    format!("{}\n", HEADER_COLUMNS.join("\t"))
}

fn assert_usage(result: &Output, args: &[&str]) {
    assert!(!result.status.success(), "expected failure for {:?}", args);
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("Usage"), "usage missing from stdout: {stdout}");
}

#[test]
fn wrong_argument_count_prints_usage_without_touching_files() {
    let dir = scratch_dir("cli_usage");
    write_pileup(&dir, "in.pileup", &[pileup_line("chr1", "1", 'A', "1", ".")]);

    let cases: [&[&str]; 5] = [
        &[],
        &["in.pileup"],
        &["in.pileup", "out.tsv", "extra.tsv"],
        &["--", "in.pileup", "out.tsv"],
        &["-h"],
    ];
    for args in cases {
        let result = run_binary_in(&dir, args);
        assert_usage(&result, args);
    }

    assert!(!dir.join("out.tsv").exists());
    assert!(!dir.join("extra.tsv").exists());
}

#[test]
fn two_arguments_run_even_when_they_look_like_flags() {
    let dir = scratch_dir("cli_hyphen_paths");
    write_pileup(&dir, "-dash.pileup", &[pileup_line("chr1", "1", 'A', "2", ".,")]);

    let result = run_binary_in(&dir, &["-dash.pileup", "--"]);
    assert!(
        result.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&result.stderr)
    );

    let table = fs::read_to_string(dir.join("--")).expect("read output");
    assert_eq!(
        table,
        format!(
            "{}{}",
            expected_header(),
            tally_row("chr1", "1", 'A', "2", [2, 0, 0, 0, 0, 0, 0])
        )
    );
}

#[test]
fn tallies_file_to_file() {
    let dir = scratch_dir("cli_success");
    fs::write(dir.join("mixed.pileup"), MIXED_PILEUP).expect("write input");

    let result = run_binary_in(&dir, &["mixed.pileup", "mixed.tsv"]);
    assert!(
        result.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&result.stderr)
    );

    let table = fs::read_to_string(dir.join("mixed.tsv")).expect("read output");
    assert!(table.starts_with(&expected_header()));
    assert_eq!(table.lines().count(), 1 + MIXED_PILEUP.lines().count());
}

#[test]
fn depth_mismatch_exits_non_zero_and_keeps_earlier_rows() {
    let dir = scratch_dir("cli_mismatch");
    write_pileup(
        &dir,
        "bad.pileup",
        &[
            pileup_line("chr1", "1", 'A', "2", ".,"),
            pileup_line("chr1", "2", 'A', "5", ".,T"),
            pileup_line("chr1", "3", 'A', "1", "."),
        ],
    );

    let result = run_binary_in(&dir, &["bad.pileup", "bad.tsv"]);
    assert!(!result.status.success());

    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("chr1\t2\tA\t5\t.,T"), "raw line missing: {stderr}");
    assert!(stderr.contains("['.', ',', 'T']"), "tokens missing: {stderr}");
    assert!(stderr.contains("does not match total number of reads (5)"));

    let table = fs::read_to_string(dir.join("bad.tsv")).expect("read output");
    assert_eq!(
        table,
        format!(
            "{}{}",
            expected_header(),
            tally_row("chr1", "1", 'A', "2", [2, 0, 0, 0, 0, 0, 0])
        )
    );
}

#[test]
fn missing_input_does_not_create_output() {
    let dir = scratch_dir("cli_missing");

    let result = run_binary_in(&dir, &["absent.pileup", "absent.tsv"]);
    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("failed to open pileup file"));
    assert!(!dir.join("absent.tsv").exists());
}
