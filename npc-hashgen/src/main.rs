use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use npc_hashgen::{Error, OUTPUT_FILE_NAME, generate, list_wordlists, write_dictionary};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "npc-hashgen")]
#[command(about = "Hash wordlists into a precomputed hash:password dictionary")]
struct Args {
    /// Directory containing *.txt wordlists
    #[arg(short, long)]
    wordlists: PathBuf,

    /// Output file (default: <wordlists>/precomputed_hashes.txt)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of concurrent hashing workers
    #[arg(short = 'j', long, default_value = "8")]
    concurrent_workers: usize,

    /// Overwrite an existing output file
    #[arg(long)]
    force: bool,

    /// Disable progress bar
    #[arg(long)]
    no_progress: bool,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let args = Args::parse();
    let output = args.output.clone().unwrap_or_else(|| args.wordlists.join(OUTPUT_FILE_NAME));

    if output.exists() && !args.force {
        return Err(Error::FileExists { path: output });
    }

    let files = list_wordlists(&args.wordlists, &output).await?;
    if files.is_empty() {
        return Err(Error::NoWordlists { dir: args.wordlists });
    }

    let total_files = files.len() as u64;
    println!(
        "Hashing {} wordlists from {:?} using {} concurrent workers",
        total_files, args.wordlists, args.concurrent_workers
    );

    let progress_counter = Arc::new(AtomicU64::new(0));

    // Set up progress bar
    let progress_bar = if !args.no_progress {
        let pb = ProgressBar::new(total_files);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} wordlists {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    // Spawn progress updater task
    let progress_counter_clone = Arc::clone(&progress_counter);
    let progress_bar_clone = progress_bar.clone();
    let progress_task = tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_millis(100)).await;
            let current = progress_counter_clone.load(Ordering::Relaxed);
            if let Some(ref pb) = progress_bar_clone {
                pb.set_position(current);
            }
            if current >= total_files {
                break;
            }
        }
    });

    let result = generate(files, args.concurrent_workers, Arc::clone(&progress_counter)).await;

    // Clean up progress
    progress_task.abort();
    if let Some(pb) = progress_bar {
        pb.finish_with_message("done");
    }

    let entries = result?;
    println!("Writing {} unique hashes to {:?}", entries.len(), output);
    let written = write_dictionary(&output, &entries).await?;

    println!("Done! {} hashes written.", written);
    Ok(())
}
