//! CrawlerX engine: backend HTTP client, live-update feed and the I/O worker.
mod client;
mod engine;
mod live;
mod settings;
mod types;

pub use client::{CrawlApi, ReqwestCrawlApi};
pub use engine::EngineHandle;
pub use live::{run_live_feed, ChannelFeedSink, FeedSink};
pub use settings::ApiSettings;
pub use types::{ApiError, EngineEvent, FailureKind, FeedEvent, Ticket};
