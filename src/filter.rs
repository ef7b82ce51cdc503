//! Pure URL predicate combining host rules and path rule families.
//!
//! Rules are evaluated in a fixed order, short-circuiting on the first
//! failure: host policy, excludes, start-with (OR), contains-all (AND),
//! contains-any (OR), legacy include (OR of prefix and regex). The order is
//! load-bearing: an exclude always wins over any include family. A rule
//! family left empty is no constraint, never "reject everything".

use crate::error::ConfigError;
use regex::Regex;
use url::Url;

/// Uncompiled rule sets, as handed over by the CLI layer.
#[derive(Debug, Clone, Default)]
pub struct FilterRules {
    /// Legacy include prefixes (OR, together with `include_re`).
    pub include: Vec<String>,
    /// Reject when the path starts with any of these.
    pub exclude: Vec<String>,
    /// Legacy include regex over the path.
    pub include_re: Option<String>,
    /// Reject when the path matches.
    pub exclude_re: Option<String>,
    /// Path must start with at least one entry (OR).
    pub start_with: Vec<String>,
    /// Path must contain at least one token (OR).
    pub contains_any: Vec<String>,
    /// Path must contain every token (AND).
    pub contains_all: Vec<String>,
    /// Apply the contains families to path plus query string.
    pub match_query: bool,
    /// Accept hosts that are subdomains of the base host.
    pub allow_subdomains: bool,
    /// Extra exact hosts to accept.
    pub allow_hosts: Vec<String>,
    /// Accept hosts matching this regex.
    pub host_re: Option<String>,
}

/// Compiled filter bound to the run's base origin.
///
/// Regexes are compiled once at construction; an invalid pattern is a
/// [`ConfigError`] and aborts the run before any network activity.
pub struct UrlFilter {
    base: Url,
    rules: FilterRules,
    include_re: Option<Regex>,
    exclude_re: Option<Regex>,
    host_re: Option<Regex>,
}

impl UrlFilter {
    pub fn new(base: &Url, rules: FilterRules) -> Result<Self, ConfigError> {
        let include_re = compile("include", rules.include_re.as_deref())?;
        let exclude_re = compile("exclude", rules.exclude_re.as_deref())?;
        let host_re = compile("host", rules.host_re.as_deref())?;
        Ok(Self {
            base: base.clone(),
            rules,
            include_re,
            exclude_re,
            host_re,
        })
    }

    /// Host policy: same origin as the base, an allow-listed host, a
    /// subdomain of the base host (when enabled), or a host regex match.
    /// Exclusionary by default: anything else is rejected before the path
    /// rules ever run.
    pub fn host_allowed(&self, u: &Url) -> bool {
        if u.origin() == self.base.origin() {
            return true;
        }
        let Some(host) = u.host_str() else {
            return false;
        };
        if self.rules.allow_hosts.iter().any(|h| h == host) {
            return true;
        }
        if self.rules.allow_subdomains {
            if let Some(base_host) = self.base.host_str() {
                if host == base_host || host.ends_with(&format!(".{base_host}")) {
                    return true;
                }
            }
        }
        if let Some(re) = &self.host_re {
            if re.is_match(host) {
                return true;
            }
        }
        false
    }

    /// Evaluate every rule family against one URL string.
    ///
    /// Unparsable URLs fail the filter.
    pub fn passes(&self, url: &str) -> bool {
        let Ok(u) = Url::parse(url) else {
            return false;
        };

        // 1) Host rules
        if !self.host_allowed(&u) {
            return false;
        }

        let path = u.path();
        // The contains families optionally see the query string too.
        let path_query = match u.query() {
            Some(q) if self.rules.match_query => format!("{path}?{q}"),
            _ => path.to_string(),
        };

        // 2) Excludes first (fast fail)
        if self.rules.exclude.iter().any(|p| path.starts_with(p.as_str())) {
            return false;
        }
        if self.exclude_re.as_ref().is_some_and(|re| re.is_match(path)) {
            return false;
        }

        // 3) start-with (OR)
        if !self.rules.start_with.is_empty()
            && !self
                .rules
                .start_with
                .iter()
                .any(|p| path.starts_with(p.as_str()))
        {
            return false;
        }

        // 4) contains-all (AND)
        if !self.rules.contains_all.is_empty()
            && !self
                .rules
                .contains_all
                .iter()
                .all(|s| path_query.contains(s.as_str()))
        {
            return false;
        }

        // 5) contains-any (OR)
        if !self.rules.contains_any.is_empty()
            && !self
                .rules
                .contains_any
                .iter()
                .any(|s| path_query.contains(s.as_str()))
        {
            return false;
        }

        // 6) legacy include prefix/regex (if either is set, one must hit)
        if !self.rules.include.is_empty() || self.include_re.is_some() {
            let hit_prefix = self.rules.include.iter().any(|p| path.starts_with(p.as_str()));
            let hit_regex = self.include_re.as_ref().is_some_and(|re| re.is_match(path));
            if !hit_prefix && !hit_regex {
                return false;
            }
        }

        true
    }
}

fn compile(which: &'static str, pattern: Option<&str>) -> Result<Option<Regex>, ConfigError> {
    match pattern {
        None | Some("") => Ok(None),
        Some(p) => Regex::new(p).map(Some).map_err(|source| ConfigError::InvalidRegex {
            which,
            pattern: p.to_string(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(rules: FilterRules) -> UrlFilter {
        let base = Url::parse("https://example.com/sitemap.xml").unwrap();
        UrlFilter::new(&base, rules).unwrap()
    }

    #[test]
    fn test_same_origin_passes_by_default() {
        let f = filter(FilterRules::default());
        assert!(f.passes("https://example.com/about"));
        assert!(f.passes("https://example.com/"));
    }

    #[test]
    fn test_foreign_host_rejected_by_default() {
        let f = filter(FilterRules::default());
        assert!(!f.passes("https://other.com/about"));
        // A different scheme is a different origin too.
        assert!(!f.passes("http://example.com/about"));
    }

    #[test]
    fn test_allow_hosts_and_subdomains() {
        let f = filter(FilterRules {
            allow_hosts: vec!["cdn.partner.io".to_string()],
            allow_subdomains: true,
            ..Default::default()
        });
        assert!(f.passes("https://cdn.partner.io/page"));
        assert!(f.passes("https://blog.example.com/page"));
        assert!(!f.passes("https://notexample.com/page"));
    }

    #[test]
    fn test_host_regex() {
        let f = filter(FilterRules {
            host_re: Some(r"^shop\d+\.example\.net$".to_string()),
            ..Default::default()
        });
        assert!(f.passes("https://shop42.example.net/item"));
        assert!(!f.passes("https://shop.example.net/item"));
    }

    #[test]
    fn test_exclude_wins_over_include() {
        let f = filter(FilterRules {
            exclude_re: Some("/draft-".to_string()),
            start_with: vec!["/blog/".to_string()],
            ..Default::default()
        });
        assert!(f.passes("https://example.com/blog/post-1"));
        assert!(!f.passes("https://example.com/blog/draft-123"));
    }

    #[test]
    fn test_exclude_prefix() {
        let f = filter(FilterRules {
            exclude: vec!["/admin".to_string()],
            ..Default::default()
        });
        assert!(!f.passes("https://example.com/admin/settings"));
        assert!(f.passes("https://example.com/public"));
    }

    #[test]
    fn test_start_with_is_or() {
        let f = filter(FilterRules {
            start_with: vec!["/en/".to_string(), "/fr/".to_string()],
            ..Default::default()
        });
        assert!(f.passes("https://example.com/en/pricing"));
        assert!(f.passes("https://example.com/fr/tarifs"));
        assert!(!f.passes("https://example.com/de/preise"));
    }

    #[test]
    fn test_contains_all_and_any() {
        let f = filter(FilterRules {
            contains_all: vec!["en".to_string(), "insights".to_string()],
            ..Default::default()
        });
        assert!(f.passes("https://example.com/en/insights/report"));
        assert!(!f.passes("https://example.com/en/news"));

        let f = filter(FilterRules {
            contains_any: vec!["sku_".to_string(), "insights".to_string()],
            ..Default::default()
        });
        assert!(f.passes("https://example.com/products/sku_991"));
        assert!(!f.passes("https://example.com/products/other"));
    }

    #[test]
    fn test_match_query_extends_contains() {
        let rules = FilterRules {
            contains_any: vec!["id=".to_string()],
            ..Default::default()
        };
        let without = filter(rules.clone());
        assert!(!without.passes("https://example.com/item?id=42"));

        let with = filter(FilterRules {
            match_query: true,
            ..rules
        });
        assert!(with.passes("https://example.com/item?id=42"));
    }

    #[test]
    fn test_legacy_include() {
        let f = filter(FilterRules {
            include: vec!["/services/".to_string()],
            include_re: Some("^/team/".to_string()),
            ..Default::default()
        });
        assert!(f.passes("https://example.com/services/audit"));
        assert!(f.passes("https://example.com/team/alice"));
        assert!(!f.passes("https://example.com/careers"));
    }

    #[test]
    fn test_unconfigured_families_are_no_constraint() {
        let f = filter(FilterRules::default());
        assert!(f.passes("https://example.com/anything/at/all?q=1"));
    }

    #[test]
    fn test_invalid_regex_is_config_error() {
        let base = Url::parse("https://example.com/sitemap.xml").unwrap();
        let err = UrlFilter::new(
            &base,
            FilterRules {
                exclude_re: Some("(unclosed".to_string()),
                ..Default::default()
            },
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_unparsable_url_fails() {
        let f = filter(FilterRules::default());
        assert!(!f.passes("not a url"));
    }
}
