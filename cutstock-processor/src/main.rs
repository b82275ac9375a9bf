use anyhow::{Context, Result};
use cutopt::config::CutOptConfig;
use cutstock_processor::processor::DEFAULT_MAX_CONCURRENT;
use cutstock_processor::{CutProcessor, MemoryRecordStore, ResponseEnvelope};
use log::{info, warn};
use std::env;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::signal;
use tokio::sync::{broadcast, mpsc};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting cutstock-processor");

    let config = match env::var("CUTSTOCK_CONFIG_FILE") {
        Ok(path) => {
            info!("  CUTSTOCK_CONFIG_FILE: {}", path);
            cutopt::io::read_json::<CutOptConfig>(Path::new(&path))?
        }
        Err(_) => {
            warn!("No config file provided, use CUTSTOCK_CONFIG_FILE to provide a custom config");
            CutOptConfig::default()
        }
    };
    let max_concurrent = match env::var("CUTSTOCK_MAX_CONCURRENT") {
        Ok(value) => value
            .parse::<usize>()
            .context("CUTSTOCK_MAX_CONCURRENT must be a positive integer")?,
        Err(_) => DEFAULT_MAX_CONCURRENT,
    };
    info!("  CUTSTOCK_MAX_CONCURRENT: {}", max_concurrent);
    info!("Config: {:?}", config);

    let (output_tx, mut output_rx) = mpsc::unbounded_channel::<ResponseEnvelope>();
    let processor = CutProcessor::new(Arc::new(MemoryRecordStore::new()), config, output_tx);

    //responses go to stdout one per line, logs go to stderr
    let writer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(response) = output_rx.recv().await {
            let mut line = serde_json::to_vec(&response).context("failed to serialize response")?;
            line.push(b'\n');
            stdout
                .write_all(&line)
                .await
                .context("failed to write response")?;
            stdout.flush().await.context("failed to flush stdout")?;
        }
        anyhow::Ok(())
    });

    let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);

    let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())
        .context("Failed to register SIGTERM handler")?;
    let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt())
        .context("Failed to register SIGINT handler")?;

    let shutdown_tx_clone = shutdown_tx.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = sigterm.recv() => {
                info!("Received SIGTERM, initiating graceful shutdown...");
                let _ = shutdown_tx_clone.send(());
            }
            _ = sigint.recv() => {
                info!("Received SIGINT, initiating graceful shutdown...");
                let _ = shutdown_tx_clone.send(());
            }
        }
    });

    let stdin = BufReader::new(tokio::io::stdin());
    let result = processor
        .listen_and_process(stdin, max_concurrent, shutdown_rx)
        .await;

    //closing the last sender lets the writer drain and stop
    drop(processor);
    writer.await.context("response writer panicked")??;

    if let Err(e) = &result {
        warn!("Processor exited with error: {}", e);
    }

    result
}
