//! Profiling binary for npc-decipher
//!
//! Loads the real dictionary once and times the individual steps of deciphering
//! a request to identify where time is spent.

use std::time::{Duration, Instant};

use npc_decipher::{Dictionary, dictionary_path_from_env, record, resolve_batch};

const KNOWN_HASH: &str = "5d41402abc4b2a76b9719d911017c592";

fn report(step: &str, elapsed: Duration) {
    println!("{step:<24} {:>12.3} µs", elapsed.as_secs_f64() * 1e6);
}

fn main() {
    println!("=== NPC Decipher Profiling ===\n");

    let dictionary_path = dictionary_path_from_env();

    if !dictionary_path.exists() {
        eprintln!("Dictionary not found at: {:?}", dictionary_path);
        eprintln!("Set NPC_DICTIONARY_PATH or run npc-hashgen first.");
        std::process::exit(1);
    }

    let start = Instant::now();
    let dictionary = match Dictionary::load(&dictionary_path) {
        Ok(dictionary) => dictionary,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    report("load", start.elapsed());
    println!("{} password hashes known\n", dictionary.len());

    // 10k lines over 100 distinct hashes, one of which is "hello".
    let input: String = (0..10_000)
        .map(|i| {
            if i % 100 == 0 {
                format!("npc{i}@example.com:{}\n", KNOWN_HASH.to_uppercase())
            } else {
                format!("npc{i}@example.com:{:032x}\n", i % 100)
            }
        })
        .collect();

    let start = Instant::now();
    let records = record::parse(&input);
    report("parse", start.elapsed());

    let start = Instant::now();
    let resolved = resolve_batch(&dictionary, records.iter().map(record::Record::key));
    report("resolve_batch", start.elapsed());

    let start = Instant::now();
    let output = record::format(&records, &resolved);
    report("format", start.elapsed());

    println!(
        "\n{} records, {} distinct hashes resolved, {} bytes out",
        records.len(),
        resolved.len(),
        output.as_ref().map_or(0, String::len)
    );

    let iterations = 100;
    let start = Instant::now();
    for _ in 0..iterations {
        std::hint::black_box(dictionary.decipher(&input));
    }
    report("decipher (avg)", start.elapsed() / iterations);
}
