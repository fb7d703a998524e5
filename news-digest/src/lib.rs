pub mod types;
pub mod config;
pub mod utils;
pub mod fetcher;
pub mod parser;
pub mod normalizer;
pub mod pipeline;
pub mod traits;
pub mod sources;
pub mod aggregator;
pub mod render;
pub mod digest;
pub mod notifier;
pub mod runner;

pub use types::*;
pub use config::{AppConfig, ExclusionMode, FilterConfig};
pub use fetcher::Fetcher;
pub use parser::FeedParser;
pub use pipeline::AggregationPipeline;
pub use traits::{DeliveryChannel, FeedSource};
pub use aggregator::{CollectOutcome, NewsAggregator, SourceReport};
pub use digest::DigestRenderer;
pub use notifier::{DeliveryReport, Notifier, WebhookChannel};
pub use runner::{run_digest, RunSummary};
