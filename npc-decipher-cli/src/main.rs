use clap::Parser;
use npc_decipher_cli::{Args, Error, run};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Logs go to stderr so stdout carries only the response.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let args = Args::parse();
    let mut stdout = std::io::stdout().lock();
    run(&args, &mut stdout).await
}
