use aquamark::config::Config;
use aquamark::{pipeline, prompt};
use clap::Parser;
use std::path::PathBuf;

/// Aquamark - interactive watermarking for local image files
#[derive(Parser, Debug)]
#[command(name = "aquamark")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (built-in defaults when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Validate configuration and exit
    #[arg(long)]
    check_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging subsystem
    aquamark::logging::init_subscriber()?;

    // Parse command-line arguments
    let args = Args::parse();

    // Load configuration from file, or fall back to the defaults
    let config = match &args.config {
        Some(path) => Config::from_file(path).unwrap_or_else(|e| {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }),
        None => Config::default(),
    };

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    if args.check_config {
        println!("Configuration OK");
        return Ok(());
    }

    tracing::info!(
        images_dir = %config.images_dir,
        output_dir = %config.output_dir,
        collision = ?config.on_collision,
        "Configuration loaded successfully"
    );

    run_loop(&config).await;
    Ok(())
}

/// Prompt for jobs until the user declines or the console closes.
async fn run_loop(config: &Config) {
    loop {
        match prompt::welcome(&config.images_dir) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                tracing::warn!(error = %e, "console closed, exiting");
                break;
            }
        }

        let job = match prompt::next_job(config) {
            Ok(job) => job,
            Err(e) => {
                tracing::warn!(error = %e, "console closed, exiting");
                break;
            }
        };

        match pipeline::run(&job, config).await {
            Ok(outcome) => {
                println!(
                    "File created successfully! ({})",
                    outcome.output_path.display()
                );
            }
            Err(e) => {
                tracing::error!(kind = e.kind(), error = %e, "watermarking failed");
                println!("Something went wrong.... Try again!");
            }
        }
    }
}
