//! Jar exporters: Netscape cookie file and browser-session cookie params.

use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use super::{CookieJar, SameSite};
use crate::error::EnrichError;

const NETSCAPE_HEADER: &str = "# Netscape HTTP Cookie File";

/// Expiry sent to the browser for session cookies.
pub const SESSION_EXPIRES: f64 = -1.0;

/// Store expiry values are millisecond epochs; the browser wants seconds.
const STORE_EXPIRY_PER_SECOND: f64 = 1000.0;

/// Renders the jar in Netscape cookie-file format (header line included).
pub fn render_netscape(jar: &CookieJar) -> String {
    let mut out = String::new();
    out.push_str(NETSCAPE_HEADER);
    out.push('\n');
    for cookie in jar.iter() {
        let include_subdomains = if cookie.host.starts_with('.') { "TRUE" } else { "FALSE" };
        let secure = if cookie.secure { "TRUE" } else { "FALSE" };
        let prefix = if cookie.http_only { "#HttpOnly_" } else { "" };
        let path = if cookie.path.is_empty() { "/" } else { cookie.path.as_str() };
        out.push_str(&format!(
            "{}{}\t{}\t{}\t{}\t{}\t{}\t{}\n",
            prefix,
            cookie.host,
            include_subdomains,
            path,
            secure,
            cookie.expiry.max(0),
            cookie.name,
            cookie.value
        ));
    }
    out
}

/// Temporary cookie file; deleted when dropped.
#[derive(Debug)]
pub struct CookieFile {
    file: NamedTempFile,
}

impl CookieFile {
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl Drop for CookieFile {
    fn drop(&mut self) {
        tracing::debug!(path = %self.file.path().display(), "removing exported cookie file");
    }
}

/// Writes the jar to a private temp file for a non-browser downloader.
pub fn export_netscape(jar: &CookieJar) -> Result<CookieFile, EnrichError> {
    let mut file = tempfile::Builder::new()
        .prefix("notefetch-")
        .suffix(".cookies")
        .tempfile()?;
    file.write_all(render_netscape(jar).as_bytes())?;
    file.flush()?;
    tracing::debug!(path = %file.path().display(), count = jar.len(), "exported cookie file");
    Ok(CookieFile { file })
}

/// Cookie in the shape a browser-automation context accepts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    /// Epoch seconds, or [`SESSION_EXPIRES`] for session cookies.
    pub expires: f64,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
}

impl SessionCookie {
    pub fn is_session(&self) -> bool {
        self.expires < 0.0
    }
}

pub fn export_session_params(jar: &CookieJar) -> Vec<SessionCookie> {
    jar.iter()
        .map(|cookie| SessionCookie {
            name: cookie.name.clone(),
            value: cookie.value.clone(),
            domain: cookie.host.clone(),
            path: cookie.path.clone(),
            expires: if cookie.expiry > 0 {
                cookie.expiry as f64 / STORE_EXPIRY_PER_SECOND
            } else {
                SESSION_EXPIRES
            },
            secure: cookie.secure,
            http_only: cookie.http_only,
            same_site: cookie.same_site,
        })
        .collect()
}
