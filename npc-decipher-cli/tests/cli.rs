use std::fs;
use std::path::Path;

use clap::Parser;
use npc_decipher_cli::{Args, Error, run};

fn args(extra: &[&str]) -> Args {
    Args::parse_from(std::iter::once("npc-decipher").chain(extra.iter().copied()))
}

async fn run_to_string(args: &Args) -> Result<String, Error> {
    let mut out = Vec::new();
    run(args, &mut out).await?;
    Ok(String::from_utf8(out).unwrap())
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[tokio::test]
async fn test_deciphers_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let dictionary = dir.path().join("precomputed_hashes.txt");
    let input = dir.path().join("request.txt");
    fs::write(&dictionary, "5d41402abc4b2a76b9719d911017c592:hello\n").unwrap();
    fs::write(
        &input,
        "user@example.com:5d41402abc4b2a76b9719d911017c592\n\
         other@example.com:deadbeefdeadbeefdeadbeefdeadbeef\n",
    )
    .unwrap();

    let out = run_to_string(&args(&["-d", path_str(&dictionary), "-i", path_str(&input)]))
        .await
        .unwrap();

    assert_eq!(
        out,
        "user@example.com:hello\nother@example.com:deadbeefdeadbeefdeadbeefdeadbeef\n"
    );
}

#[tokio::test]
async fn test_count() {
    let dir = tempfile::tempdir().unwrap();
    let dictionary = dir.path().join("precomputed_hashes.txt");
    fs::write(&dictionary, "aaa:one\nbbb:two\nbroken line\n").unwrap();

    let out = run_to_string(&args(&["-d", path_str(&dictionary), "--count"])).await.unwrap();
    assert_eq!(out, "2 passwords known\n");
}

#[tokio::test]
async fn test_missing_dictionary_counts_zero() {
    let dir = tempfile::tempdir().unwrap();
    let dictionary = dir.path().join("missing.txt");

    let out = run_to_string(&args(&["-d", path_str(&dictionary), "--count", "--strict"]))
        .await
        .unwrap();
    assert_eq!(out, "0 passwords known\n");
}

#[tokio::test]
async fn test_unreadable_dictionary_degrades_unless_strict() {
    let dir = tempfile::tempdir().unwrap();
    // A directory exists but cannot be read as a file.
    let dictionary = dir.path();

    let out = run_to_string(&args(&["-d", path_str(dictionary), "--count"])).await.unwrap();
    assert_eq!(out, "0 passwords known\n");

    let err = run_to_string(&args(&["-d", path_str(dictionary), "--count", "--strict"]))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Dictionary(npc_decipher::Error::Unreadable { .. })));
}

#[tokio::test]
async fn test_empty_request_file_is_no_result() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("request.txt");
    fs::write(&input, "").unwrap();

    let out = run_to_string(&args(&[
        "-d",
        path_str(&dir.path().join("missing.txt")),
        "-i",
        path_str(&input),
    ]))
    .await
    .unwrap();
    assert_eq!(out, "no result\n");
}

#[tokio::test]
async fn test_missing_request_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();

    let err = run_to_string(&args(&[
        "-d",
        path_str(&dir.path().join("missing.txt")),
        "-i",
        path_str(&dir.path().join("nope.txt")),
    ]))
    .await
    .unwrap_err();
    assert!(matches!(err, Error::Input { .. }));
}
