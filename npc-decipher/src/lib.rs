//! Resolves pasted `...:<hash>` records against a precomputed password dictionary.
//!
//! The dictionary is a plain text file with one `hash:password` entry per line
//! (see the `npc-hashgen` crate for how it is produced). It is parsed once into an
//! in-memory map and never mutated afterwards, so a single [`Dictionary`] can be
//! shared between any number of concurrent requests without locking.
//!
//! A request is free-form multi-line text where every line ends with a colon and a
//! hash, e.g. `user@example.com:5d41402abc4b2a76b9719d911017c592`. Each line is split
//! on its last colon, the trailing field is trimmed and lowercased, and all distinct
//! hashes of the request are resolved in a single pass. Lines whose hash is known get
//! the trailing field replaced by the plaintext; every other byte of the request is
//! passed through untouched.
//!
//! ```
//! use npc_decipher::Dictionary;
//!
//! let dictionary: Dictionary =
//!     [("5d41402abc4b2a76b9719d911017c592", "hello")].into_iter().collect();
//!
//! let output = dictionary.decipher("user@example.com:5D41402ABC4B2A76B9719D911017C592\n");
//! assert_eq!(output.as_deref(), Some("user@example.com:hello\n"));
//!
//! // Nothing to resolve is reported distinctly from "resolved nothing".
//! assert_eq!(dictionary.decipher(""), None);
//! ```

use std::path::{Path, PathBuf};

use compact_str::CompactString;

pub mod dictionary;
pub mod error;
pub mod lookup;
pub mod record;

pub use dictionary::{Dictionary, LoadStats};
pub use error::Error;
pub use lookup::{HashLookup, Resolved, resolve_batch};
pub use record::{NO_RESULT, Record};

/// Environment variable name for specifying the dictionary file.
pub const NPC_DICTIONARY_PATH_ENV: &str = "NPC_DICTIONARY_PATH";

/// File name of the precomputed dictionary inside the wordlists directory.
pub const DEFAULT_DICTIONARY_FILE: &str = "precomputed_hashes.txt";

/// Returns the dictionary path from the NPC_DICTIONARY_PATH environment variable,
/// or falls back to `wordlists/precomputed_hashes.txt` beside the workspace.
pub fn dictionary_path_from_env() -> PathBuf {
    std::env::var_os(NPC_DICTIONARY_PATH_ENV).map(PathBuf::from).unwrap_or_else(|| {
        let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
        manifest_dir
            .parent()
            .unwrap_or(manifest_dir)
            .join("wordlists")
            .join(DEFAULT_DICTIONARY_FILE)
    })
}

/// Normalizes a hash field into a dictionary key: surrounding whitespace is
/// trimmed and the result is lowercased.
pub fn normalize_hash(raw: &str) -> CompactString {
    let trimmed = raw.trim();
    // Hex digests are nearly always lowercase already.
    if trimmed.bytes().all(|b| b.is_ascii() && !b.is_ascii_uppercase()) {
        CompactString::from(trimmed)
    } else {
        CompactString::from(trimmed.to_lowercase())
    }
}

/// Outcome of deciphering one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Number of lines the request was split into.
    pub records: usize,
    /// Number of lines whose trailing hash was replaced.
    pub resolved: usize,
    /// The reassembled text, or `None` when the request had no lines at all.
    pub output: Option<String>,
}

/// Runs the full request pipeline against any [`HashLookup`]: parse the request into
/// records, resolve all distinct hashes in one batch, and reassemble the lines.
pub fn decipher<L: HashLookup + ?Sized>(dictionary: &L, input: &str) -> Report {
    let records = record::parse(input);
    let resolved = resolve_batch(dictionary, records.iter().map(Record::key));
    let replaced = records.iter().filter(|r| r.is_resolved_by(&resolved)).count();

    tracing::debug!(
        records = records.len(),
        distinct_found = resolved.len(),
        replaced,
        "deciphered request"
    );

    Report {
        records: records.len(),
        resolved: replaced,
        output: record::format(&records, &resolved),
    }
}
