//! Command-line surface for the pagescout binary.
//!
//! Everything here is resolved into a plain-data [`GatherConfig`]; the core
//! never touches argv or the environment.

use crate::config::GatherConfig;
use crate::filter::FilterRules;
use crate::sample::SampleMode;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "pagescout",
    version,
    about = "Gather a validated URL sample from a site's XML sitemaps"
)]
pub struct Cli {
    /// Site or sitemap URL. Without a /sitemap.xml suffix the conventional
    /// path is appended (unless --default-sitemap=false).
    #[arg(long)]
    pub url: String,

    /// Append /sitemap.xml to --url when it is missing.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub default_sitemap: bool,

    /// Sampling mode. `sample` honors --target-total/--per-group; `sample50`
    /// and `random` keep the legacy 5-per-group cap.
    #[arg(long, value_enum, default_value_t = SampleMode::Sample)]
    pub mode: SampleMode,

    /// Target total URLs for the capped modes.
    #[arg(long, default_value_t = 50)]
    pub target_total: usize,

    /// Max URLs per group (sample and per-group modes).
    #[arg(long, default_value_t = 5)]
    pub per_group: usize,

    /// PATH must start with ANY of these (repeatable).
    #[arg(long = "start-with")]
    pub start_with: Vec<String>,

    /// PATH must contain ANY of these (repeatable).
    #[arg(long = "contains-any")]
    pub contains_any: Vec<String>,

    /// PATH must contain ALL of these (repeatable).
    #[arg(long = "contains-all")]
    pub contains_all: Vec<String>,

    /// Apply the contains rules to the query string too.
    #[arg(long)]
    pub match_query: bool,

    /// Legacy include prefix (repeatable).
    #[arg(long = "include")]
    pub include: Vec<String>,

    /// Reject paths starting with this prefix (repeatable).
    #[arg(long = "exclude")]
    pub exclude: Vec<String>,

    /// Legacy include regex over the path.
    #[arg(long)]
    pub include_re: Option<String>,

    /// Reject paths matching this regex.
    #[arg(long)]
    pub exclude_re: Option<String>,

    /// Also accept subdomains of the base host.
    #[arg(long)]
    pub allow_subdomains: bool,

    /// Extra exact host to accept (repeatable).
    #[arg(long = "allow-host")]
    pub allow_hosts: Vec<String>,

    /// Accept hosts matching this regex.
    #[arg(long)]
    pub host_re: Option<String>,

    /// Width of the outbound-HTTP pool.
    #[arg(long, default_value_t = 8)]
    pub concurrency: usize,

    /// Max sitemap documents fetched in one run.
    #[arg(long, default_value_t = 1000)]
    pub max_sitemaps: usize,

    /// Trust mode: skip reachability checks entirely.
    #[arg(long)]
    pub skip_validate: bool,

    /// Shared HEAD+GET timeout per reachability check, in milliseconds.
    #[arg(long, default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Output file (a CommonJS module exporting the URL list).
    #[arg(long, default_value = "urls.js")]
    pub out: PathBuf,

    /// Debug-level progress logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn to_config(&self) -> GatherConfig {
        GatherConfig {
            mode: self.mode,
            per_group: self.per_group,
            target_total: self.target_total,
            concurrency: self.concurrency,
            max_sitemaps: self.max_sitemaps,
            skip_validate: self.skip_validate,
            timeout: Duration::from_millis(self.timeout_ms),
            default_sitemap: self.default_sitemap,
            rules: FilterRules {
                include: self.include.clone(),
                exclude: self.exclude.clone(),
                include_re: self.include_re.clone(),
                exclude_re: self.exclude_re.clone(),
                start_with: self.start_with.clone(),
                contains_any: self.contains_any.clone(),
                contains_all: self.contains_all.clone(),
                match_query: self.match_query,
                allow_subdomains: self.allow_subdomains,
                allow_hosts: self.allow_hosts.clone(),
                host_re: self.host_re.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["pagescout", "--url", "https://example.com"]);
        let config = cli.to_config();
        assert_eq!(config.mode, SampleMode::Sample);
        assert_eq!(config.target_total, 50);
        assert_eq!(config.per_group, 5);
        assert_eq!(config.concurrency, 8);
        assert_eq!(config.max_sitemaps, 1000);
        assert!(config.default_sitemap);
        assert!(!config.skip_validate);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_repeatable_rule_flags() {
        let cli = Cli::parse_from([
            "pagescout",
            "--url",
            "https://example.com",
            "--mode",
            "per-group",
            "--start-with",
            "/en/",
            "--start-with",
            "/fr/",
            "--exclude",
            "/drafts",
            "--allow-host",
            "cdn.example.net",
            "--skip-validate",
        ]);
        let config = cli.to_config();
        assert_eq!(config.mode, SampleMode::PerGroup);
        assert_eq!(config.rules.start_with, vec!["/en/", "/fr/"]);
        assert_eq!(config.rules.exclude, vec!["/drafts"]);
        assert_eq!(config.rules.allow_hosts, vec!["cdn.example.net"]);
        assert!(config.skip_validate);
    }
}
