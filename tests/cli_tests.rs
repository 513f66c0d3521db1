//! CLI integration tests for the kadline binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn sample_log() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp event log");
    writeln!(file, "peer_id,distance,time,type,has_error,error,extra").unwrap();
    writeln!(file, "QmPeer1,ab12,0.000000,*main.DialStart,false,,/ip4/1.2.3.4/tcp/4001").unwrap();
    writeln!(file, "QmPeer1,ab12,0.050000,*main.DialEnd,false,,/ip4/1.2.3.4/tcp/4001").unwrap();
    writeln!(file, "QmPeer2,cd34,1.000000,*main.DialStart,false,,").unwrap();
    writeln!(file, "QmPeer2,cd34,1.200000,*main.DialEnd,true,connection refused,").unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_json_output_to_stdout() {
    let log = sample_log();
    Command::cargo_bin("kadline")
        .unwrap()
        .arg(log.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"tool\": \"kadline\""))
        .stdout(predicate::str::contains("QmPeer1"))
        .stdout(predicate::str::contains("50.0ms"));
}

#[test]
fn test_csv_output_has_header_and_rows() {
    let log = sample_log();
    Command::cargo_bin("kadline")
        .unwrap()
        .arg(log.path())
        .args(["--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "peer_id,lane,start,end,duration",
        ))
        .stdout(predicate::str::contains("QmPeer2,Dialing Peer"))
        .stdout(predicate::str::contains("pink"));
}

#[test]
fn test_summary_mode() {
    let log = sample_log();
    Command::cargo_bin("kadline")
        .unwrap()
        .arg(log.path())
        .arg("-c")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dialing Peer"))
        .stdout(predicate::str::contains("peers ranked: 2"));
}

#[test]
fn test_output_file_written() {
    let log = sample_log();
    let out = NamedTempFile::new().unwrap();
    Command::cargo_bin("kadline")
        .unwrap()
        .arg(log.path())
        .args(["--format", "json", "-o"])
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = std::fs::read_to_string(out.path()).unwrap();
    assert!(written.contains("\"records\""));
}

#[test]
fn test_min_duration_filters_everything() {
    let log = sample_log();
    Command::cargo_bin("kadline")
        .unwrap()
        .arg(log.path())
        .args(["--format", "csv", "--min-duration", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("QmPeer1").not());
}

#[test]
fn test_missing_input_fails() {
    Command::cargo_bin("kadline")
        .unwrap()
        .arg("/nonexistent/events.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("reading event log"));
}
