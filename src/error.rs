//! Fatal configuration errors, raised before any network activity starts.

use thiserror::Error;

/// A configuration problem that aborts the run up front.
///
/// Everything else (an unfetchable sitemap document, an unreachable page)
/// is recovered locally during the walk and never surfaces as an error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid input URL `{0}`")]
    InvalidUrl(String),

    #[error("input must end with /sitemap.xml when --default-sitemap is disabled")]
    MissingSitemapSuffix,

    #[error("invalid {which} regex `{pattern}`")]
    InvalidRegex {
        which: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
