//! Grouped sampling: decide, per discovered URL, whether to keep it.
//!
//! Groups bucket URLs by the first path segment (typically a locale like
//! `/en/` or a site section like `/blog/`) so a capped sample cannot be
//! dominated by one section of the site.

use clap::ValueEnum;
use rand::seq::SliceRandom;
use std::collections::{HashMap, HashSet};
use url::Url;

/// Closed set of sampling behaviors, selected once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SampleMode {
    /// Keep everything, in discovery order.
    All,
    /// Cap each group, no global cap.
    PerGroup,
    /// Cap each group and stop at the global target.
    Sample,
    /// Legacy `sample` with the per-group cap fixed at 5.
    Sample50,
    /// Like `sample50`, but finalize shuffles before trimming.
    Random,
}

impl SampleMode {
    /// Modes with a global target; the only ones that can be satisfied.
    fn capped(self) -> bool {
        matches!(self, Self::Sample | Self::Sample50 | Self::Random)
    }
}

/// Stateful acceptor over discovered URLs.
///
/// Admission is best-effort under concurrent dispatch: the global cap is
/// pre-checked in [`Sampler::add`], but the hard size guarantee for capped
/// modes comes from the deterministic trim in [`Sampler::finalize`].
pub struct Sampler {
    mode: SampleMode,
    per_group: usize,
    target_total: usize,
    groups: HashMap<String, Vec<String>>,
    accepted: Vec<String>,
    seen: HashSet<String>,
}

impl Sampler {
    pub fn new(mode: SampleMode, per_group: usize, target_total: usize) -> Self {
        Self {
            mode,
            per_group,
            target_total,
            groups: HashMap::new(),
            accepted: Vec::new(),
            seen: HashSet::new(),
        }
    }

    fn per_group_cap(&self) -> usize {
        match self.mode {
            SampleMode::PerGroup | SampleMode::Sample => self.per_group,
            // Legacy modes keep the historical fixed cap.
            SampleMode::Sample50 | SampleMode::Random => 5,
            SampleMode::All => usize::MAX,
        }
    }

    /// Try to admit one URL. Re-discovery of an already-accepted URL is a
    /// no-op. Returns whether the URL was kept.
    pub fn add(&mut self, url: &str) -> bool {
        if self.seen.contains(url) {
            return false;
        }
        let key = group_key(url);
        if self.mode != SampleMode::All {
            if self.mode.capped() && self.accepted.len() >= self.target_total {
                return false;
            }
            if self
                .groups
                .get(&key)
                .is_some_and(|bucket| bucket.len() >= self.per_group_cap())
            {
                return false;
            }
        }
        self.groups.entry(key).or_default().push(url.to_string());
        self.seen.insert(url.to_string());
        self.accepted.push(url.to_string());
        true
    }

    /// Whether the walker can stop doing further work.
    ///
    /// `all` and `per-group` have no natural stopping point.
    pub fn is_satisfied(&self) -> bool {
        self.mode.capped() && self.accepted.len() >= self.target_total
    }

    pub fn accepted_count(&self) -> usize {
        self.accepted.len()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Produce the final list, applying the per-mode trim exactly once.
    ///
    /// For capped modes the result never exceeds the target, regardless of
    /// how admission interleaved during the walk.
    pub fn finalize(self) -> Vec<String> {
        let mut list = self.accepted;
        match self.mode {
            SampleMode::Random => {
                list.shuffle(&mut rand::thread_rng());
                list.truncate(self.target_total);
            }
            SampleMode::Sample | SampleMode::Sample50 => {
                list.truncate(self.target_total);
            }
            SampleMode::All | SampleMode::PerGroup => {}
        }
        list
    }
}

/// Coarse bucket for a URL, derived from its path.
///
/// Locale segments (`/en/`, `/en-US/`) group by the locale itself, which is
/// the first path segment; every other path groups by its first segment.
/// The empty path maps to `/`.
pub fn group_key(url: &str) -> String {
    let Ok(u) = Url::parse(url) else {
        return "/".to_string();
    };
    match u.path().split('/').find(|s| !s.is_empty()) {
        Some(seg) => format!("/{seg}/"),
        None => "/".to_string(),
    }
}
