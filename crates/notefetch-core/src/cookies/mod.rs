//! Cookie jar bridge: reuse a logged-in browser profile's cookies.
//!
//! The live `cookies.sqlite` is never opened directly; it is copied into a
//! private temp dir, read, and the copy is removed when the guard drops.
//! Jars are exported either as a Netscape cookie file (for the video
//! metadata backend) or as CDP-style cookie params (for the browser session).

mod export;
mod profile;
mod store;

pub use export::{export_netscape, export_session_params, render_netscape, CookieFile, SessionCookie};
pub use profile::{default_profiles_root, ProfileLocator};
pub use store::{copy_session_store, copy_session_store_in, load_cookies, StoreCopy, STORE_COPY_PREFIX};

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::EnrichError;

/// Same-site policy as stored by the browser (0/1/2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SameSite {
    #[default]
    None,
    Lax,
    Strict,
}

impl SameSite {
    /// Maps the stored integer; unknown or missing values are treated as `None`.
    pub fn from_stored(value: Option<i64>) -> Self {
        match value {
            Some(1) => SameSite::Lax,
            Some(2) => SameSite::Strict,
            _ => SameSite::None,
        }
    }
}

/// One cookie row from the browser store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub host: String,
    pub path: String,
    /// Stored expiry; `<= 0` means a session cookie.
    pub expiry: i64,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
}

impl Cookie {
    pub fn is_session(&self) -> bool {
        self.expiry <= 0
    }
}

/// Cookies selected from a store, in row order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    pub cookies: Vec<Cookie>,
}

impl CookieJar {
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cookie> {
        self.cookies.iter()
    }
}

/// How a cookie's host field is compared against a wanted domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostMatch {
    /// Raw host contains the domain anywhere (`notx.com` matches `x.com`).
    Substring,
    /// Host equals the domain or is a subdomain of it; a leading `.` is ignored.
    #[default]
    #[serde(rename = "suffix")]
    DomainSuffix,
}

/// Host predicate used when loading a jar.
#[derive(Debug, Clone)]
pub struct HostFilter {
    domains: Vec<String>,
    mode: HostMatch,
}

impl HostFilter {
    pub fn new<I, S>(domains: I, mode: HostMatch) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            domains: domains.into_iter().map(Into::into).collect(),
            mode,
        }
    }

    /// Cookies needed to view posts.
    pub fn post_hosts(mode: HostMatch) -> Self {
        Self::new(["x.com", "twitter.com"], mode)
    }

    /// Cookies needed for members-only or age-gated videos.
    pub fn video_hosts(mode: HostMatch) -> Self {
        Self::new(["youtube.com", "google.com"], mode)
    }

    pub fn matches(&self, host: &str) -> bool {
        self.domains.iter().any(|domain| match self.mode {
            HostMatch::Substring => host.contains(domain.as_str()),
            HostMatch::DomainSuffix => {
                let host = host.strip_prefix('.').unwrap_or(host);
                host.eq_ignore_ascii_case(domain)
                    || host.len() > domain.len()
                        && host.as_bytes()[host.len() - domain.len() - 1] == b'.'
                        && host[host.len() - domain.len()..].eq_ignore_ascii_case(domain)
            }
        })
    }
}

/// Reads the filtered jar from a profile: copy the store, load it, drop the copy.
pub async fn read_jar(profile: &Path, filter: &HostFilter) -> Result<CookieJar, EnrichError> {
    read_jar_in(profile, filter, &std::env::temp_dir()).await
}

/// Like [`read_jar`], with the temporary copy placed under `tmp_root`.
pub async fn read_jar_in(
    profile: &Path,
    filter: &HostFilter,
    tmp_root: &Path,
) -> Result<CookieJar, EnrichError> {
    let copy = copy_session_store_in(profile, tmp_root)?;
    let jar = load_cookies(copy.path(), filter).await;
    drop(copy);
    jar
}

#[cfg(test)]
pub(crate) mod fixture;
