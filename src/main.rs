use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, LevelFilter};
use simple_logger::SimpleLogger;
use std::process::ExitCode;
use std::sync::Arc;
use storylog::config::{self, Cli};
use storylog::{line_collector, LogBuffer, StoryError};
use tokio::io::BufReader;
use tokio::sync::Mutex;

const EXIT_PANIC: u8 = 2;
const EXIT_FATAL: u8 = 3;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse command-line arguments
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    SimpleLogger::new()
        .with_level(level)
        .env()
        .init()
        .context("Failed to initialise logger")?;

    info!("Starting storylog");

    // Load configuration
    let config = config::load_config(&cli)?;
    info!("Configuration loaded: {:?}", config);

    // Shared state for the log buffer
    let log_buffer = Arc::new(Mutex::new(LogBuffer::with_config(config)));

    let collector_handle = {
        let log_buffer = Arc::clone(&log_buffer);
        tokio::spawn(async move {
            let reader = BufReader::new(tokio::io::stdin());
            line_collector::run(reader, log_buffer).await
        })
    };

    let outcome = collector_handle
        .await
        .context("Line collector task terminated unexpectedly")?;

    let exit = match outcome {
        Ok(recorded) => {
            info!("Collected {} lines", recorded);
            ExitCode::SUCCESS
        }
        Err(StoryError::Panic(msg)) => {
            error!("Recorded panic: {}", msg);
            ExitCode::from(EXIT_PANIC)
        }
        Err(StoryError::Fatal(msg)) => {
            error!("Recorded fatal: {}", msg);
            ExitCode::from(EXIT_FATAL)
        }
        Err(e) => return Err(anyhow::Error::new(e).context("Failed to read input")),
    };

    let mut buffer = log_buffer.lock().await;
    if cli.flat {
        let flat = serde_json::to_string_pretty(&buffer.flatten())
            .map_err(StoryError::from)
            .context("Failed to encode flattened log")?;
        println!("{}", flat);
    } else {
        let mut stdout = std::io::stdout().lock();
        buffer
            .dump_to(&mut stdout)
            .map_err(StoryError::from)
            .context("Failed to write log dump")?;
    }

    Ok(exit)
}
