//! Breadth-first traversal of the sitemap-index tree.
//!
//! The frontier is an explicit FIFO queue plus a visited set, so deep, wide,
//! or accidentally cyclic sitemap trees cannot overflow the call stack.

use crate::filter::UrlFilter;
use crate::sample::Sampler;
use crate::sitemap::fetcher::SitemapFetcher;
use crate::sitemap::parser::SitemapNode;
use crate::validate::Validator;
use futures::StreamExt;
use serde::Serialize;
use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, warn};
use url::Url;

/// Why the walk stopped. Exhaustion is a normal outcome, not an error:
/// whatever the sampler accumulated is still returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StopReason {
    QueueEmpty,
    SitemapBudgetExhausted,
    SamplerSatisfied,
}

/// Run counters, for the final summary line.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WalkStats {
    pub sitemaps_processed: usize,
    pub urls_discovered: usize,
    pub urls_validated: usize,
    pub urls_kept: usize,
    pub groups: usize,
}

/// Final output of a walk: the sampler's finalized list plus bookkeeping.
#[derive(Debug)]
pub struct WalkReport {
    pub urls: Vec<String>,
    pub stopped: StopReason,
    pub stats: WalkStats,
}

/// Orchestrates fetch+parse, filter, validation, and sampling.
///
/// One knob bounds all simultaneous outbound HTTP: page dispatch runs under
/// `for_each_concurrent(concurrency)` with the validation call inside each
/// task, and document fetches are sequential and never overlap dispatch, so
/// at most `concurrency` requests are ever in flight.
pub struct Walker {
    fetcher: SitemapFetcher,
    validator: Validator,
    filter: UrlFilter,
    concurrency: usize,
    max_sitemaps: usize,
}

impl Walker {
    pub fn new(
        fetcher: SitemapFetcher,
        validator: Validator,
        filter: UrlFilter,
        concurrency: usize,
        max_sitemaps: usize,
    ) -> Self {
        Self {
            fetcher,
            validator,
            filter,
            concurrency: concurrency.max(1),
            max_sitemaps,
        }
    }

    pub async fn walk(&self, entry: &Url, sampler: Sampler) -> WalkReport {
        let mut visited: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<String> = VecDeque::from([entry.to_string()]);
        let mut processed = 0usize;
        let mut stats = WalkStats::default();
        let sampler = Mutex::new(sampler);
        let validated = AtomicUsize::new(0);

        let stopped = loop {
            let Some(doc_url) = queue.pop_front() else {
                break StopReason::QueueEmpty;
            };
            if processed >= self.max_sitemaps {
                break StopReason::SitemapBudgetExhausted;
            }
            if sampler.lock().await.is_satisfied() {
                break StopReason::SamplerSatisfied;
            }
            if !visited.insert(doc_url.clone()) {
                continue;
            }
            processed += 1;

            let node = match self.fetcher.fetch_and_parse(&doc_url).await {
                Ok(node) => node,
                Err(e) => {
                    warn!("skipping sitemap {doc_url}: {e:#}");
                    continue;
                }
            };

            let Ok(base) = Url::parse(&doc_url) else {
                continue;
            };

            match node {
                SitemapNode::Index(children) => {
                    let before = queue.len();
                    for child in children {
                        // Relative <loc> values resolve against the document.
                        let Ok(abs) = base.join(&child) else {
                            continue;
                        };
                        if !self.filter.host_allowed(&abs) {
                            continue;
                        }
                        let abs = abs.to_string();
                        if !visited.contains(&abs) && !queue.contains(&abs) {
                            queue.push_back(abs);
                        }
                    }
                    debug!(
                        children = queue.len() - before,
                        queued = queue.len(),
                        "sitemap index {doc_url}"
                    );
                }
                SitemapNode::Pages(locs) => {
                    stats.urls_discovered += locs.len();
                    debug!(urls = locs.len(), "urlset {doc_url}");
                    self.dispatch_pages(&base, locs, &sampler, &validated).await;
                }
                SitemapNode::Unrecognized => {
                    debug!("unrecognized sitemap root at {doc_url}");
                }
            }
        };

        stats.sitemaps_processed = processed;
        stats.urls_validated = validated.load(Ordering::Relaxed);
        let sampler = sampler.into_inner();
        stats.urls_kept = sampler.accepted_count();
        stats.groups = sampler.group_count();
        WalkReport {
            urls: sampler.finalize(),
            stopped,
            stats,
        }
    }

    /// Drain one urlset through filter -> validate -> sample under the
    /// bounded pool. Page URLs are dispatched in list order but may be
    /// admitted out of order.
    async fn dispatch_pages(
        &self,
        base: &Url,
        locs: Vec<String>,
        sampler: &Mutex<Sampler>,
        validated: &AtomicUsize,
    ) {
        futures::stream::iter(locs)
            .for_each_concurrent(self.concurrency, |loc| async move {
                let Ok(abs) = base.join(&loc) else {
                    return;
                };
                let abs = abs.to_string();
                if !self.filter.passes(&abs) {
                    return;
                }
                // Best-effort short-circuit before the costly network call;
                // the finalize trim is what guarantees the cap.
                if sampler.lock().await.is_satisfied() {
                    return;
                }
                if !self.validator.is_reachable(&abs).await {
                    return;
                }
                validated.fetch_add(1, Ordering::Relaxed);
                if sampler.lock().await.add(&abs) {
                    debug!("picked {abs}");
                }
            })
            .await;
    }
}
