//! Crawl pipeline: fetching, extraction, pacing, retries, and coordination
//!
//! The coordinator walks the work-key space strictly sequentially; the
//! fetcher trait is the seam to the external page-rendering layer; the retry
//! policy and pacer govern how hard the target site is hit.

mod coordinator;
pub mod extract;
mod fetcher;
mod pacing;
mod retry;

pub use coordinator::{Coordinator, PlayerOutcome, Stage};
pub use fetcher::{build_http_client, HttpFetcher, PageFetcher};
pub use pacing::Pacer;
pub use retry::RetryPolicy;
