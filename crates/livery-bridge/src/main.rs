use std::time::Instant;

use anyhow::Context;
use livery_engine::logging::{LoggingConfig, init_logging};
use livery_ui::EditorConfig;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

mod backend;
mod protocol;

use backend::Bridge;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // stdout carries Lua; logs go to stderr.
    init_logging(LoggingConfig::default());

    let config = EditorConfig::from_env();
    let mut ticker = tokio::time::interval(config.badge_refresh_interval.min(config.preset_hold_duration) / 4);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let mut bridge = Bridge::new(config, Instant::now());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    log::info!("livery-bridge ready");

    loop {
        let out = tokio::select! {
            line = lines.next_line() => match line.context("reading stdin")? {
                Some(line) => bridge.handle_line(&line, Instant::now()),
                None => break,
            },
            _ = ticker.tick() => bridge.tick(Instant::now()),
        };
        for chunk in out {
            stdout.write_all(chunk.as_bytes()).await.context("writing stdout")?;
            stdout.write_all(b"\n").await.context("writing stdout")?;
        }
        stdout.flush().await.context("flushing stdout")?;
    }

    log::info!("stdin closed; shutting down");
    Ok(())
}
