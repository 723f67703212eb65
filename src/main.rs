use std::env;
use std::io;

use tracing_subscriber::EnvFilter;

fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("draftwise=info")),
        )
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    let args: Vec<String> = env::args().collect();
    std::process::exit(draftwise::cli::run_with_args(&args));
}
