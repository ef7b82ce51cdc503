//! pagescout — discover a bounded, validated URL sample from a website's
//! XML sitemap hierarchy, ready for batch audit pipelines.
//!
//! The walk is a breadth-first traversal of the sitemap-index tree. Page
//! URLs found in leaf sitemaps flow through filter -> reachability check ->
//! grouped sampler under one bounded concurrency pool, and the run stops as
//! soon as the sampler has enough.

pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod sample;
pub mod sitemap;
pub mod validate;
pub mod writer;

use anyhow::Result;
use config::GatherConfig;
use filter::UrlFilter;
use sample::Sampler;
use sitemap::fetcher::SitemapFetcher;
use sitemap::walker::{WalkReport, Walker};
use validate::Validator;

/// Run one gather: normalize the entry URL, walk the sitemap tree, and
/// return the finalized sample.
///
/// Configuration problems fail here, before any network activity. Bad
/// sitemap documents and unreachable pages are skipped, never fatal, so the
/// report may hold fewer URLs than requested.
pub async fn gather(input: &str, config: GatherConfig) -> Result<WalkReport> {
    let entry = sitemap::normalize_entry_url(input, config.default_sitemap)?;
    let filter = UrlFilter::new(&entry, config.rules)?;

    let client = reqwest::Client::builder()
        .user_agent(concat!("pagescout/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let fetcher = SitemapFetcher::new(client.clone());
    let validator = Validator::new(client, config.skip_validate, config.timeout);
    let sampler = Sampler::new(config.mode, config.per_group, config.target_total);
    let walker = Walker::new(
        fetcher,
        validator,
        filter,
        config.concurrency,
        config.max_sitemaps,
    );

    Ok(walker.walk(&entry, sampler).await)
}
