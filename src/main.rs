//! keytrigger-demo: stdin-driven host for the trigger detector
//!
//! Feeds each character of every stdin line to a detector as a key press
//! and prints detector events as JSON lines. The trigger phrase comes from
//! the first argument (default "tech"); set KEYTRIGGER_IDLE_MS to run in
//! idle-timeout mode instead of bounded-FIFO mode.

use std::time::Duration;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use keytrigger::{Detector, DetectorConfig, KeyPress};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let trigger = std::env::args().nth(1).unwrap_or_else(|| "tech".to_string());

    let mut config = DetectorConfig::new(&trigger);
    if let Ok(value) = std::env::var("KEYTRIGGER_IDLE_MS") {
        match value.parse::<u64>() {
            Ok(ms) => {
                config = config.with_idle_timeout(Duration::from_millis(ms));
            }
            Err(_) => {
                warn!(value = %value, "ignoring unparseable KEYTRIGGER_IDLE_MS");
            }
        }
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        trigger = %trigger,
        idle_timeout = ?config.idle_timeout,
        "keytrigger-demo starting"
    );

    let mut detector = Detector::new(config, || {
        info!("trigger fired");
    })?;

    let mut events = detector.subscribe();
    let keys = detector.attach()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("stdin closed");
                    break;
                };
                for ch in line.chars() {
                    keys.send(KeyPress::character(ch)).await;
                }
            }

            event = events.recv() => {
                if let Ok(event) = event {
                    println!("{}", serde_json::to_string(&event)?);
                }
            }

            _ = tokio::signal::ctrl_c() => {
                info!("shutdown signal received");
                break;
            }
        }
    }

    detector.detach().await;
    info!("keytrigger-demo stopped");

    Ok(())
}
