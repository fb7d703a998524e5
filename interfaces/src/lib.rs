pub mod defs;

pub use defs::{Digest, FeedEndpoint, NewsItem, RawEntry};
