use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::fs;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::debug;

use crate::conversion::line_to_entry;
use crate::error::Error;

/// Merged `hash -> password` entries.
pub type Entries = HashMap<String, String>;

/// Hashes of one wordlist, in file order.
pub type Batch = Vec<(String, String)>;

/// Hash every non-empty line of a single wordlist on the blocking pool.
pub async fn hash_wordlist(path: PathBuf) -> Result<Batch, Error> {
    tokio::task::spawn_blocking(move || -> Result<Batch, Error> {
        let mut reader = BufReader::new(File::open(&path)?);
        let mut batch = Vec::new();
        let mut line = Vec::with_capacity(64);

        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            if let Some(entry) = line_to_entry(&line) {
                batch.push(entry);
            }
        }

        debug!(path = %path.display(), hashes = batch.len(), "hashed wordlist");
        Ok(batch)
    })
    .await?
}

/// Worker task that processes a chunk of wordlists
pub async fn worker(files: Vec<PathBuf>, progress: Arc<AtomicU64>) -> Result<Vec<Batch>, Error> {
    let mut batches = Vec::with_capacity(files.len());
    for path in files {
        batches.push(hash_wordlist(path).await?);
        progress.fetch_add(1, Ordering::Relaxed);
    }

    Ok(batches)
}

/// Fold a batch into `entries`. A hash that is already present keeps its first
/// password.
pub fn merge(entries: &mut Entries, batch: Batch) {
    for (hash, password) in batch {
        entries.entry(hash).or_insert(password);
    }
}

/// Hash `files` with `concurrent_workers` tasks and merge the results.
///
/// Files are merged in the order given, so for hashes that occur in several files
/// the password from the earliest file is kept.
pub async fn generate(
    files: Vec<PathBuf>,
    concurrent_workers: usize,
    progress: Arc<AtomicU64>,
) -> Result<Entries, Error> {
    let mut entries = Entries::new();
    if files.is_empty() {
        return Ok(entries);
    }

    let chunk_size = files.len().div_ceil(concurrent_workers.max(1));
    let handles: Vec<_> = files
        .chunks(chunk_size)
        .map(|chunk| tokio::spawn(worker(chunk.to_vec(), Arc::clone(&progress))))
        .collect();

    // Handles are awaited in spawn order, which is file order.
    for handle in handles {
        for batch in handle.await?? {
            merge(&mut entries, batch);
        }
    }

    Ok(entries)
}

/// Scan a directory for `*.txt` wordlists, skipping the output file itself.
/// Returned paths are sorted by name.
///
/// The output is matched by its canonical path, so a wordlist that merely shares
/// the output's file name in another directory is still listed.
pub async fn list_wordlists(dir: &Path, output: &Path) -> Result<Vec<PathBuf>, Error> {
    let output = canonical_output(output).await;
    let mut files = Vec::new();
    let mut entries = fs::read_dir(dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_txt = path.extension().is_some_and(|ext| ext == "txt");
        if !is_txt || !entry.file_type().await?.is_file() {
            continue;
        }

        let is_output = match &output {
            Some(output) => fs::canonicalize(&path).await.is_ok_and(|p| &p == output),
            None => false,
        };
        if !is_output {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Canonical form of the output path. The output usually does not exist yet, so
/// fall back to its canonical parent joined with the file name. `None` means the
/// parent does not exist either, in which case no wordlist can be the output.
async fn canonical_output(output: &Path) -> Option<PathBuf> {
    if let Ok(path) = fs::canonicalize(output).await {
        return Some(path);
    }

    let parent = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Some(fs::canonicalize(parent).await.ok()?.join(output.file_name()?))
}

/// Write `hash:password` lines sorted by hash. Returns the number of lines written.
pub async fn write_dictionary(path: &Path, entries: &Entries) -> Result<usize, Error> {
    let mut sorted: Vec<_> = entries.iter().collect();
    sorted.sort_unstable_by(|a, b| a.0.cmp(b.0));

    let mut writer = BufWriter::new(fs::File::create(path).await?);
    for (hash, password) in &sorted {
        writer.write_all(hash.as_bytes()).await?;
        writer.write_all(b":").await?;
        writer.write_all(password.as_bytes()).await?;
        writer.write_all(b"\n").await?;
    }
    writer.flush().await?;

    Ok(sorted.len())
}
