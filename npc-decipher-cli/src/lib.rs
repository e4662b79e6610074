//! Command-line host for [`npc_decipher`].
//!
//! The dictionary is loaded once at start. A missing dictionary file only produces a
//! warning; an unreadable one is reported at error level and the process carries on
//! with an empty dictionary unless `--strict` is given.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use npc_decipher::{Dictionary, NO_RESULT, Report, dictionary_path_from_env};
use serde::Serialize;
use tokio::io::AsyncReadExt;
use tracing::{error, info};

pub mod error;

pub use error::Error;

#[derive(Parser, Debug)]
#[command(name = "npc-decipher")]
#[command(about = "Replace password hashes in colon-delimited records with known plaintexts")]
pub struct Args {
    /// Dictionary of hash:password lines
    /// (default: $NPC_DICTIONARY_PATH, then wordlists/precomputed_hashes.txt)
    #[arg(short, long)]
    pub dictionary: Option<PathBuf>,

    /// Read the request from this file instead of stdin
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Print how many password hashes are known and exit
    #[arg(long)]
    pub count: bool,

    /// Print a JSON report instead of the plain deciphered text
    #[arg(long)]
    pub json: bool,

    /// Fail if the dictionary exists but cannot be read
    #[arg(long)]
    pub strict: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    known: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    records: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolved: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<Option<&'a str>>,
}

/// Loads the dictionary named by `args`, degrading to an empty one on read
/// failures unless `--strict` was given.
pub async fn load_dictionary(args: &Args) -> Result<Dictionary, Error> {
    let path = args.dictionary.clone().unwrap_or_else(dictionary_path_from_env);

    match Dictionary::load_async(&path).await {
        Ok(dictionary) => Ok(dictionary),
        Err(e) if !args.strict => {
            error!(error = %e, "starting with an empty dictionary");
            Ok(Dictionary::empty())
        }
        Err(e) => Err(e.into()),
    }
}

/// Reads the request text from `--input` or stdin.
pub async fn read_request(args: &Args) -> Result<String, Error> {
    match &args.input {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|source| Error::Input { path: path.clone(), source }),
        None => {
            let mut request = String::new();
            tokio::io::stdin().read_to_string(&mut request).await.map_err(Error::Stdin)?;
            Ok(request)
        }
    }
}

/// Writes the entry count, as text or JSON.
pub fn write_count<W: Write>(
    dictionary: &Dictionary,
    json: bool,
    out: &mut W,
) -> Result<(), Error> {
    if json {
        let body =
            JsonReport { known: dictionary.len(), records: None, resolved: None, output: None };
        serde_json::to_writer(&mut *out, &body)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{} passwords known", dictionary.len())?;
    }
    Ok(())
}

/// Deciphers one request and writes the response, as text or JSON.
///
/// Plain text output always ends with a newline so the terminal prompt starts on a
/// fresh line: one is appended when the deciphered text (or [`NO_RESULT`]) lacks it.
/// The text itself is otherwise exactly what [`Dictionary::decipher`] returns.
pub fn respond<W: Write>(
    dictionary: &Dictionary,
    request: &str,
    json: bool,
    out: &mut W,
) -> Result<Report, Error> {
    let report = dictionary.decipher_report(request);
    info!(records = report.records, resolved = report.resolved, "deciphered request");

    if json {
        let body = JsonReport {
            known: dictionary.len(),
            records: Some(report.records),
            resolved: Some(report.resolved),
            output: Some(report.output.as_deref()),
        };
        serde_json::to_writer(&mut *out, &body)?;
        writeln!(out)?;
    } else {
        let text = report.output.as_deref().unwrap_or(NO_RESULT);
        out.write_all(text.as_bytes())?;
        if !text.ends_with('\n') {
            writeln!(out)?;
        }
    }

    Ok(report)
}

/// Runs the command described by `args`, writing to `out`.
pub async fn run<W: Write>(args: &Args, out: &mut W) -> Result<(), Error> {
    let dictionary = load_dictionary(args).await?;

    if args.count {
        return write_count(&dictionary, args.json, out);
    }

    let request = read_request(args).await?;
    respond(&dictionary, &request, args.json, out)?;
    Ok(())
}
