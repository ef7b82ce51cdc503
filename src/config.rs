//! Run configuration, passed in as plain data.
//!
//! The core never reads argv or the environment; the CLI layer resolves
//! everything into a [`GatherConfig`] once per run.

use crate::filter::FilterRules;
use crate::sample::SampleMode;
use std::time::Duration;

/// Everything a gather run needs, resolved once up front.
#[derive(Debug, Clone)]
pub struct GatherConfig {
    /// Sampling mode (see [`SampleMode`]).
    pub mode: SampleMode,
    /// Per-group cap for `per-group` and `sample` modes.
    pub per_group: usize,
    /// Global target for the capped modes.
    pub target_total: usize,
    /// Width of the single outbound-HTTP pool.
    pub concurrency: usize,
    /// Maximum number of sitemap documents fetched in one run.
    pub max_sitemaps: usize,
    /// Trust mode: admit every filtered URL without a reachability check.
    pub skip_validate: bool,
    /// Shared HEAD+GET budget for one reachability check.
    pub timeout: Duration,
    /// Append `/sitemap.xml` to the input URL when it is missing.
    pub default_sitemap: bool,
    /// Host and path rule families.
    pub rules: FilterRules,
}

impl Default for GatherConfig {
    fn default() -> Self {
        Self {
            mode: SampleMode::Sample,
            per_group: 5,
            target_total: 50,
            concurrency: 8,
            max_sitemaps: 1000,
            skip_validate: false,
            timeout: Duration::from_secs(10),
            default_sitemap: true,
            rules: FilterRules::default(),
        }
    }
}
