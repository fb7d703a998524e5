use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use news_digest::{
    run_digest, sources, AppConfig, DigestRenderer, Fetcher, NewsAggregator, Notifier, WebhookChannel,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "news-digest", version, about = "Daily automotive news digest: fetch, filter, render, deliver")]
struct Cli {
    /// TOML configuration file; built-in defaults are used when omitted
    #[arg(short, long, global = true, env = "NEWS_DIGEST_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch, render and deliver the digest (default)
    Run {
        /// Render but do not deliver
        #[arg(long)]
        dry_run: bool,
    },
    /// Fetch and render, then print one format to stdout
    Preview {
        #[arg(long, value_enum, default_value_t = PreviewFormat::Text)]
        format: PreviewFormat,
    },
    /// Send a short text message to the configured webhook
    TestWebhook {
        #[arg(long, default_value = "news-digest test message: the webhook is configured correctly.")]
        message: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PreviewFormat {
    Text,
    Html,
    Card,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        // stdout is reserved for `preview` output
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Run failed: {:?}", e);
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load(cli.config.as_deref())
        .await
        .context("failed to load configuration")?;

    match cli.command.unwrap_or(Command::Run { dry_run: false }) {
        Command::Run { dry_run } => run(&config, dry_run).await,
        Command::Preview { format } => preview(&config, format).await,
        Command::TestWebhook { message } => test_webhook(&config, &message).await,
    }
}

fn build_aggregator(config: &AppConfig) -> anyhow::Result<NewsAggregator> {
    let fetcher = Arc::new(Fetcher::new(config.fetch.clone()).context("failed to create HTTP client")?);
    let sources = sources::from_endpoints(&config.sources, fetcher);

    Ok(NewsAggregator::new(
        sources,
        &config.filter,
        Duration::from_millis(config.fetch.pause_ms),
    ))
}

fn build_renderer(config: &AppConfig) -> DigestRenderer {
    DigestRenderer::new(&config.report, config.source_label(), Local::now().fixed_offset())
}

async fn run(config: &AppConfig, dry_run: bool) -> anyhow::Result<()> {
    let start_time = Instant::now();
    info!("Automotive news digest starting");

    let aggregator = build_aggregator(config)?;
    let renderer = build_renderer(config);
    let notifier = if dry_run {
        None
    } else {
        Some(Notifier::from_config(config).context("failed to set up delivery channels")?)
    };

    let summary = run_digest(&aggregator, &renderer, notifier.as_ref()).await;

    for report in &summary.sources {
        match &report.outcome {
            Ok(count) => info!("  source {}: {} items", report.source_name, count),
            Err(e) => warn!("  source {}: failed ({})", report.source_name, e),
        }
    }

    match &summary.delivery {
        Some(delivery) if delivery.any_delivered() => {
            info!("Delivered via: {}", delivery.delivered_channels().join(", "));
        }
        Some(_) => warn!("No delivery channel configured or succeeded"),
        None => info!("Dry run, nothing delivered"),
    }

    info!(
        "Finished: {} items in digest, took {:.1}s",
        summary.digest.item_count,
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

async fn preview(config: &AppConfig, format: PreviewFormat) -> anyhow::Result<()> {
    let aggregator = build_aggregator(config)?;
    let renderer = build_renderer(config);
    let summary = run_digest(&aggregator, &renderer, None).await;

    match format {
        PreviewFormat::Text => println!("{}", summary.digest.text),
        PreviewFormat::Html => println!("{}", summary.digest.html),
        PreviewFormat::Card => println!("{}", serde_json::to_string_pretty(&summary.digest.card)?),
    }
    Ok(())
}

async fn test_webhook(config: &AppConfig, message: &str) -> anyhow::Result<()> {
    if !config.webhook.is_configured() {
        anyhow::bail!("no webhook URL configured (set [webhook].url or FEISHU_WEBHOOK)");
    }

    info!("Sending test message to webhook");
    let channel = WebhookChannel::new(&config.webhook)?;
    channel.send_text(message).await.context("webhook test failed")?;
    info!("Webhook test message delivered");
    Ok(())
}
