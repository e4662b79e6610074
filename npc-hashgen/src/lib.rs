//! Builds the precomputed `hash:password` dictionary read by
//! [npc-decipher](../npc_decipher/index.html) from plain wordlists.
//!
//! # Input
//!
//! A directory of wordlists: every `*.txt` file in it (except the output file) is
//! read line by line, one candidate password per line. Empty lines and lines that
//! are not valid UTF-8 are ignored, and `\r\n` line endings are accepted.
//!
//! # Output
//!
//! One `hash:password` line per distinct hash, where `hash` is the lowercase hex
//! MD5 of the password. Lines are sorted by hash so regenerating from the same
//! wordlists gives a byte-identical file. The password is written verbatim and may
//! contain colons; readers split each line on its first colon only.
//!
//! When the same password (and therefore the same hash) appears in several
//! wordlists, the copy from the file that sorts first is kept.
//!
//! # Usage
//!
//! ```sh
//! npc-hashgen --wordlists ./wordlists
//! ```
//!
//! writes `./wordlists/precomputed_hashes.txt`.

pub mod conversion;
pub mod error;
pub mod worker;

pub use conversion::{MD5_HEX_LEN, digest_to_hex, line_to_entry, md5_hex};
pub use error::Error;
pub use worker::{
    Batch, Entries, generate, hash_wordlist, list_wordlists, merge, worker, write_dictionary,
};

/// Default name of the generated dictionary inside the wordlists directory.
pub const OUTPUT_FILE_NAME: &str = "precomputed_hashes.txt";
