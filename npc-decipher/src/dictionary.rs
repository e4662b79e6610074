use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use compact_str::CompactString;
use tracing::{error, info, warn};

use crate::error::Error;
use crate::lookup::HashLookup;
use crate::{Report, normalize_hash};

/// Read buffer for the dictionary file. The file is read exactly once, so a large
/// buffer keeps the number of read syscalls low for multi-hundred-megabyte files.
const READ_BUFFER_SIZE: usize = 1 << 16;

/// Counters collected while parsing a dictionary source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Lines read from the source.
    pub lines: usize,
    /// Distinct hashes held after loading.
    pub loaded: usize,
    /// Lines skipped because they were not a usable `hash:password` pair.
    pub skipped: usize,
    /// Lines whose hash had already been seen; the later line replaced the earlier one.
    pub duplicates: usize,
}

/// Immutable in-memory map from lowercase hash to plaintext password.
///
/// Built once (from a file, a reader, or an iterator of pairs) and read-only
/// afterwards, so it can be shared across threads behind an `Arc` or a plain
/// reference.
#[derive(Debug, Default)]
pub struct Dictionary {
    entries: HashMap<CompactString, CompactString>,
}

impl Dictionary {
    /// Creates a dictionary that knows no hashes.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads the dictionary from a `hash:password` file.
    ///
    /// A missing file is not an error: a warning is logged and an empty dictionary
    /// is returned, so lookups simply never match. Any other failure to read the
    /// file is returned as [`Error::Unreadable`].
    pub fn load(path: &Path) -> Result<Self, Error> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "dictionary file not found, no hashes will resolve");
                return Ok(Self::empty());
            }
            Err(source) => return Err(Error::Unreadable { path: path.to_path_buf(), source }),
        };

        let (dictionary, stats) =
            Self::from_reader(BufReader::with_capacity(READ_BUFFER_SIZE, file))
                .map_err(|source| Error::Unreadable { path: path.to_path_buf(), source })?;

        info!(
            path = %path.display(),
            loaded = stats.loaded,
            skipped = stats.skipped,
            duplicates = stats.duplicates,
            "loaded {} password hashes",
            stats.loaded
        );

        Ok(dictionary)
    }

    /// Like [`Dictionary::load`], but degrades to an empty dictionary when the file
    /// exists and cannot be read. The failure is logged at error level.
    pub fn load_or_empty(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            error!(error = %e, "starting with an empty dictionary");
            Self::empty()
        })
    }

    /// Loads the dictionary on tokio's blocking pool.
    #[cfg(feature = "tokio")]
    pub async fn load_async(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        tokio::task::spawn_blocking(move || Self::load(&path)).await?
    }

    /// Parses `hash:password` lines from any buffered reader.
    ///
    /// Each line is split on its first colon, so the password may itself contain
    /// colons and may be empty. The hash is trimmed and lowercased. Lines without a
    /// colon, with an empty hash, or that are not valid UTF-8 are skipped. When a
    /// hash appears more than once the last line wins.
    pub fn from_reader<R: BufRead>(mut reader: R) -> io::Result<(Self, LoadStats)> {
        let mut entries = HashMap::new();
        let mut stats = LoadStats::default();
        let mut buf = Vec::with_capacity(128);

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            stats.lines += 1;

            let Some((hash, password)) =
                std::str::from_utf8(strip_line_ending(&buf)).ok().and_then(split_entry)
            else {
                stats.skipped += 1;
                continue;
            };

            if entries.insert(hash, CompactString::from(password)).is_some() {
                stats.duplicates += 1;
            }
        }

        stats.loaded = entries.len();
        Ok((Self { entries }, stats))
    }

    /// Builds a dictionary from `(hash, password)` pairs, e.g. a small fixture.
    pub fn from_entries<H, P, I>(entries: I) -> Self
    where
        H: AsRef<str>,
        P: AsRef<str>,
        I: IntoIterator<Item = (H, P)>,
    {
        entries.into_iter().collect()
    }

    /// Number of distinct hashes known.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no hashes are known.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a single hash. The hash is normalized first, so case and
    /// surrounding whitespace do not matter.
    pub fn get(&self, hash: &str) -> Option<&str> {
        self.lookup(&normalize_hash(hash))
    }

    /// Deciphers a multi-line request. Returns `None` when the request contains
    /// no lines at all.
    pub fn decipher(&self, input: &str) -> Option<String> {
        self.decipher_report(input).output
    }

    /// Same as [`Dictionary::decipher`], with line counts attached.
    pub fn decipher_report(&self, input: &str) -> Report {
        crate::decipher(self, input)
    }
}

impl HashLookup for Dictionary {
    #[inline]
    fn lookup(&self, hash: &str) -> Option<&str> {
        self.entries.get(hash).map(CompactString::as_str)
    }
}

/// Builds a dictionary from `(hash, password)` pairs using the same rules as
/// [`Dictionary::from_reader`]: hashes are normalized, pairs with an empty hash
/// are dropped, and later pairs replace earlier ones.
impl<H: AsRef<str>, P: AsRef<str>> FromIterator<(H, P)> for Dictionary {
    fn from_iter<T: IntoIterator<Item = (H, P)>>(iter: T) -> Self {
        let entries = iter
            .into_iter()
            .filter_map(|(hash, password)| {
                let hash = normalize_hash(hash.as_ref());
                (!hash.is_empty()).then(|| (hash, CompactString::from(password.as_ref())))
            })
            .collect();

        Self { entries }
    }
}

#[inline]
fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn split_entry(line: &str) -> Option<(CompactString, &str)> {
    let (hash, password) = line.split_once(':')?;
    let hash = normalize_hash(hash);
    if hash.is_empty() {
        return None;
    }
    Some((hash, password))
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use super::*;

    fn parse(source: &str) -> (Dictionary, LoadStats) {
        Dictionary::from_reader(Cursor::new(source)).unwrap()
    }

    #[test]
    fn test_from_reader_basic() {
        let (dictionary, stats) = parse(
            "5d41402abc4b2a76b9719d911017c592:hello\n\
             7d793037a0760186574b0282f2f435e7:world\n",
        );

        assert_eq!(dictionary.len(), 2);
        assert_eq!(dictionary.get("5d41402abc4b2a76b9719d911017c592"), Some("hello"));
        assert_eq!(dictionary.get("7d793037a0760186574b0282f2f435e7"), Some("world"));
        assert_eq!(stats, LoadStats { lines: 2, loaded: 2, skipped: 0, duplicates: 0 });
    }

    #[test]
    fn test_password_splits_on_first_colon_only() {
        let (dictionary, _) = parse("abc123:pa:ss:word\n");
        assert_eq!(dictionary.get("abc123"), Some("pa:ss:word"));
    }

    #[test]
    fn test_duplicate_hash_last_line_wins() {
        let (dictionary, stats) = parse("abc123:first\nabc123:second\n");

        assert_eq!(dictionary.len(), 1);
        assert_eq!(dictionary.get("abc123"), Some("second"));
        assert_eq!(stats.duplicates, 1);
    }

    #[test]
    fn test_duplicates_differing_only_in_case_collapse() {
        let (dictionary, _) = parse("ABC123:first\nabc123:second\n");
        assert_eq!(dictionary.len(), 1);
        assert_eq!(dictionary.get("abc123"), Some("second"));
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let (dictionary, stats) = parse("no delimiter\n:orphan\n\n   :blank\nabc123:ok\n");

        assert_eq!(dictionary.len(), 1);
        assert_eq!(dictionary.get("abc123"), Some("ok"));
        assert_eq!(stats.lines, 5);
        assert_eq!(stats.skipped, 4);
    }

    #[test]
    fn test_empty_password_is_kept() {
        // MD5 of the empty string.
        let (dictionary, stats) = parse("d41d8cd98f00b204e9800998ecf8427e:\n");

        assert_eq!(dictionary.len(), 1);
        assert_eq!(stats.skipped, 0);
        assert_eq!(dictionary.get("d41d8cd98f00b204e9800998ecf8427e"), Some(""));
        assert_eq!(
            dictionary.decipher("u:d41d8cd98f00b204e9800998ecf8427e").as_deref(),
            Some("u:")
        );
    }

    #[test]
    fn test_crlf_and_missing_final_newline() {
        let (dictionary, _) = parse("aaa:one\r\nbbb:two");

        assert_eq!(dictionary.get("aaa"), Some("one"));
        assert_eq!(dictionary.get("bbb"), Some("two"));
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped() {
        let source: &[u8] = b"aaa:one\n\xff\xfe:bad\nbbb:two\n";
        let (dictionary, stats) = Dictionary::from_reader(source).unwrap();

        assert_eq!(dictionary.len(), 2);
        assert_eq!(stats.skipped, 1);
    }

    #[test]
    fn test_get_is_case_insensitive() {
        let (dictionary, _) = parse("abc123:secret\n");

        assert_eq!(dictionary.get("ABC123"), Some("secret"));
        assert_eq!(dictionary.get(" abc123 "), Some("secret"));
        assert_eq!(dictionary.get("abc124"), None);
    }

    #[test]
    fn test_from_entries_matches_collect() {
        let pairs = vec![("AAA".to_string(), "one".to_string())];
        let dictionary = Dictionary::from_entries(pairs);
        assert_eq!(dictionary.get("aaa"), Some("one"));
    }

    #[test]
    fn test_from_iter_applies_load_rules() {
        let dictionary: Dictionary =
            [("ABC", "one"), ("", "orphan"), ("def", ""), ("abc", "two")].into_iter().collect();

        assert_eq!(dictionary.len(), 2);
        assert_eq!(dictionary.get("abc"), Some("two"));
        assert_eq!(dictionary.get("def"), Some(""));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "5d41402abc4b2a76b9719d911017c592:hello").unwrap();
        writeln!(file, "garbage").unwrap();

        let dictionary = Dictionary::load(file.path()).unwrap();
        assert_eq!(dictionary.len(), 1);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let dictionary = Dictionary::load(&dir.path().join("precomputed_hashes.txt")).unwrap();

        assert!(dictionary.is_empty());
        assert_eq!(dictionary.len(), 0);
    }

    #[test]
    fn test_load_unreadable_source_is_an_error() {
        // Reading a directory fails with an I/O error other than NotFound.
        let dir = tempfile::tempdir().unwrap();
        let err = Dictionary::load(dir.path()).unwrap_err();

        assert!(matches!(err, Error::Unreadable { .. }));
        assert!(Dictionary::load_or_empty(dir.path()).is_empty());
    }

    #[cfg(feature = "tokio")]
    #[tokio::test]
    async fn test_load_async() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "abc123:secret").unwrap();

        let dictionary = Dictionary::load_async(file.path()).await.unwrap();
        assert_eq!(dictionary.get("abc123"), Some("secret"));
    }
}
