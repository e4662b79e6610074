//! Splitting requests into records and reassembling them.

use compact_str::CompactString;

use crate::lookup::Resolved;
use crate::normalize_hash;

/// Display text for a request that contained no lines.
pub const NO_RESULT: &str = "no result";

/// One line of a request.
///
/// The line is split on its last colon into a prefix and a trailing hash field.
/// A line without any colon has an empty hash field and never resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<'a> {
    line: &'a str,
    ending: &'a str,
    field_start: Option<usize>,
    key: CompactString,
}

impl<'a> Record<'a> {
    /// Builds a record from a line without its terminator and the terminator itself.
    pub fn new(line: &'a str, ending: &'a str) -> Self {
        let colon = line.rfind(':');
        let key = colon.map(|i| normalize_hash(&line[i + 1..])).unwrap_or_default();

        Self { line, ending, field_start: colon.map(|i| i + 1), key }
    }

    /// The original line, without its terminator.
    pub fn line(&self) -> &'a str {
        self.line
    }

    /// The terminator that followed the line: `"\n"`, `"\r\n"`, or `""` for a final
    /// unterminated line.
    pub fn ending(&self) -> &'a str {
        self.ending
    }

    /// Everything before the last colon, or the whole line if there is none.
    pub fn prefix(&self) -> &'a str {
        match self.field_start {
            Some(start) => &self.line[..start - 1],
            None => self.line,
        }
    }

    /// The trailing field as it appeared in the input.
    pub fn raw_hash(&self) -> &'a str {
        self.field_start.map_or("", |start| &self.line[start..])
    }

    /// The normalized lookup key. Empty when the line has no hash field.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether this line's hash has a plaintext in `resolved`.
    pub fn is_resolved_by(&self, resolved: &Resolved<'_, '_>) -> bool {
        self.plaintext(resolved).is_some()
    }

    fn plaintext<'d>(&self, resolved: &Resolved<'_, 'd>) -> Option<&'d str> {
        self.field_start?;
        resolved.get(self.key()).copied()
    }

    fn write_to(&self, out: &mut String, resolved: &Resolved<'_, '_>) {
        match self.plaintext(resolved) {
            Some(plaintext) => {
                out.push_str(self.prefix());
                out.push(':');
                out.push_str(plaintext);
            }
            None => out.push_str(self.line),
        }
        out.push_str(self.ending);
    }
}

/// Splits a request into one record per line.
///
/// Both `\n` and `\r\n` terminators are recognized and kept with their record. A
/// trailing newline does not produce an extra empty record, and an empty request
/// produces no records.
pub fn parse(input: &str) -> Vec<Record<'_>> {
    input
        .split_inclusive('\n')
        .map(|chunk| {
            let line = match chunk.strip_suffix('\n') {
                Some(line) => line.strip_suffix('\r').unwrap_or(line),
                None => chunk,
            };
            Record::new(line, &chunk[line.len()..])
        })
        .collect()
}

/// Reassembles records, replacing the trailing field of every resolved line with
/// its plaintext. Unresolved lines are emitted exactly as they were received.
///
/// Returns `None` when there are no records, which callers display as
/// [`NO_RESULT`].
pub fn format(records: &[Record<'_>], resolved: &Resolved<'_, '_>) -> Option<String> {
    if records.is_empty() {
        return None;
    }

    let capacity = records.iter().map(|r| r.line.len() + r.ending.len()).sum();
    let mut out = String::with_capacity(capacity);
    for record in records {
        record.write_to(&mut out, resolved);
    }

    Some(out)
}
