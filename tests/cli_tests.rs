use regex::Regex;
use std::io::Write;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

const LUGS: &str = "1-2 1-4 2-5 3-6 0-1 0-1 0-2 0-2 0-2 0-3 0-3 0-3 0-3 0-4 0-4 0-4 0-4 0-4 0-5 0-5 0-5 0-5 0-5 0-6 0-6 0-6 0-6";
const PINS: &str = "ABDHIKMNSTVW,ADEGJKLORSUX,ABGHJLMNRSTUX,CEFHIMNPSTU,BDFGHIJKNPQ,AEFGHIJKLMNO";

fn m209(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_m209"))
        .args(args)
        .output()
        .expect("Failed to execute binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn crypt(text: &str, decrypt: bool) -> String {
    let mut args = vec!["crypt", "--lugs", LUGS, "--pins", PINS, "--indicator", "ABCDEF"];
    if decrypt {
        args.push("-d");
    }
    args.push(text);
    let output = m209(&args);
    assert!(output.status.success(), "{:?}", output);
    stdout(&output).trim().to_string()
}

#[test]
fn test_cli_crypt_round_trip() {
    let cipher = crypt("ATTACK AT DAWN", false);
    let re = Regex::new(r"^[A-Z]{14}$").unwrap();
    assert!(re.is_match(&cipher), "unexpected output '{}'", cipher);
    assert_eq!(crypt(&cipher, true), "ATTACKZATZDAWN");
}

#[test]
fn test_cli_crypt_rejects_bad_pins() {
    let output = m209(&[
        "crypt",
        "--lugs",
        LUGS,
        "--pins",
        "ABC,ADW,A,A,A,A",
        "HELLO",
    ]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_lists_lug_sequences() {
    let output = m209(&["lugs", "--rules", "v1953", "-n", "5"]);
    assert!(output.status.success());
    let text = stdout(&output);
    let header = Regex::new(r"\d+ lug-count sequences for V1953").unwrap();
    assert!(header.is_match(&text), "{}", text);
    assert!(text.contains("Overlaps"));
}

#[test]
fn test_cli_rules_json_overrides_version() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{ "version": "V1942", "max_overlap": 3, "min_overlap": 1 }}"#).unwrap();
    let output = m209(&["lugs", "--rules-json", file.path().to_str().unwrap()]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("for V1942 (overlaps 1..=3)"));
}

#[test]
fn test_cli_simulate_small_run() {
    let output = m209(&[
        "simulate",
        "--length",
        "120",
        "--crib-length",
        "40",
        "--threads",
        "1",
        "--cycles",
        "1",
        "--kp-trials",
        "5",
        "--kp-restarts",
        "0",
        "--lug-max-passes",
        "2",
        "--seed",
        "7",
    ]);
    assert!(output.status.success(), "{:?}", output);
    let text = stdout(&output);
    assert!(text.contains("KNOWN-PLAINTEXT ATTACK"));
    let plaintext = Regex::new(r"Plaintext: [A-Z]{120}").unwrap();
    assert!(plaintext.is_match(&text));
}

#[test]
fn test_cli_solve_requires_ciphertext() {
    let output = m209(&["solve"]);
    assert!(!output.status.success());
}
