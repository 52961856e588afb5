use std::sync::Arc;
use std::time::Duration;

use adapters::{RpcBalanceProvider, RpcClient};
use anyhow::Context;
use clap::Parser;
use common::logger::init_logger;
use corelib::payload;
use engine::{Detector, Snapshotter};
use monitor::{
    cli::{Cli, Command, RunArgs},
    config::AppConfig,
    metrics::Counters,
    pipeline::BalanceMonitor,
    poller::run_monitor_loop,
    sink::{AlertEvent, AlertSink, FanoutSink, LogSink, WebhookSink},
};

const SERVICE: &str = "balance-monitor";

/// Log sink always; webhook on top when configured.
fn build_sink(cfg: &AppConfig) -> anyhow::Result<Arc<dyn AlertSink>> {
    let mut sink = FanoutSink::new().with(Arc::new(LogSink));

    if let Some(url) = &cfg.webhook_url {
        let webhook = WebhookSink::new(url.clone()).context("failed to build webhook sink")?;
        sink = sink.with(Arc::new(webhook));
    }

    Ok(Arc::new(sink))
}

async fn run(args: RunArgs) -> anyhow::Result<()> {
    let mut cfg = AppConfig::from_env().context("invalid configuration")?;
    init_logger(SERVICE, args.json_logs || cfg.json_logs);

    tracing::info!("Starting balance monitor...");

    if let Some(ms) = args.interval_ms {
        cfg.poll_interval = Duration::from_millis(ms.max(1));
    }

    let client = RpcClient::new(cfg.rpc_url.clone()).context("failed to build rpc client")?;
    let provider = Arc::new(RpcBalanceProvider::new(client));

    let monitor = BalanceMonitor::new(
        Snapshotter::new(cfg.target),
        Detector::new(cfg.detector),
        provider,
        build_sink(&cfg)?,
        cfg.history_len,
        Counters::default(),
    );

    tracing::info!(
        account = %cfg.target,
        rpc = %cfg.rpc_url,
        threshold_milli_percent = cfg.detector.threshold_milli_percent,
        min_previous_quantity = %cfg.detector.min_previous_quantity,
        min_absolute_diff = %cfg.detector.min_absolute_diff,
        "monitor configured"
    );

    tokio::select! {
        monitor = run_monitor_loop(monitor, cfg.poll_interval, args.max_ticks) => {
            let c = monitor.counters();
            tracing::info!(
                ticks = Counters::get(&c.ticks),
                alerts = Counters::get(&c.alerts_emitted),
                provider_errors = Counters::get(&c.provider_errors),
                "monitor finished"
            );
        }
        res = tokio::signal::ctrl_c() => {
            res?;
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

fn decode(raw: &str) -> anyhow::Result<()> {
    let alert = payload::decode_hex(raw).context("payload is not a valid alert")?;
    println!("{}", serde_json::to_string_pretty(&AlertEvent::new(&alert, None))?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    match Cli::parse().into_command() {
        Command::Run(args) => run(args).await,
        Command::Decode { payload } => decode(&payload),
    }
}
