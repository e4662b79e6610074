//! Batch resolution of hashes against a dictionary.

use std::collections::{HashMap, HashSet};

/// Hashes that were found, mapped to their plaintext. Hashes that were not found
/// are absent.
pub type Resolved<'k, 'd> = HashMap<&'k str, &'d str>;

/// Read access to a hash → plaintext mapping.
///
/// Keys passed in are already normalized (trimmed and lowercased).
pub trait HashLookup {
    fn lookup(&self, hash: &str) -> Option<&str>;
}

impl<T: HashLookup + ?Sized> HashLookup for &T {
    #[inline]
    fn lookup(&self, hash: &str) -> Option<&str> {
        (**self).lookup(hash)
    }
}

/// Resolves a batch of normalized hashes in a single pass.
///
/// Every distinct non-empty hash is looked up exactly once, no matter how often it
/// repeats in `hashes`. The result only contains the hashes that were found.
pub fn resolve_batch<'k, 'd, L, I>(dictionary: &'d L, hashes: I) -> Resolved<'k, 'd>
where
    L: HashLookup + ?Sized,
    I: IntoIterator<Item = &'k str>,
{
    let hashes = hashes.into_iter();
    let mut seen = HashSet::with_capacity(hashes.size_hint().0);
    let mut resolved = HashMap::new();

    for hash in hashes {
        if hash.is_empty() || !seen.insert(hash) {
            continue;
        }
        if let Some(plaintext) = dictionary.lookup(hash) {
            resolved.insert(hash, plaintext);
        }
    }

    resolved
}
