//! Private copies of the browser cookie store, read via sqlx.

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Connection, Row, SqliteConnection};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::{Cookie, CookieJar, HostFilter, SameSite};
use crate::error::EnrichError;

const STORE_FILE: &str = "cookies.sqlite";
const WAL_SUFFIX: &str = "-wal";

/// A copied cookie store. The temp directory (and every file in it) is
/// removed when this guard is dropped.
#[derive(Debug)]
pub struct StoreCopy {
    dir: TempDir,
    path: PathBuf,
}

impl StoreCopy {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StoreCopy {
    fn drop(&mut self) {
        tracing::debug!(dir = %self.dir.path().display(), "removing cookie store copy");
    }
}

/// Prefix of the temp directories holding store copies.
pub const STORE_COPY_PREFIX: &str = "notefetch-cookies-";

/// Copies `cookies.sqlite` (plus its WAL sidecar, if present) out of the
/// profile so the running browser's lock is never contended.
pub fn copy_session_store(profile: &Path) -> Result<StoreCopy, EnrichError> {
    copy_session_store_in(profile, &std::env::temp_dir())
}

/// Like [`copy_session_store`], with the copy placed under `tmp_root`.
pub fn copy_session_store_in(profile: &Path, tmp_root: &Path) -> Result<StoreCopy, EnrichError> {
    let source = profile.join(STORE_FILE);
    if !source.is_file() {
        return Err(EnrichError::StoreMissing(profile.to_path_buf()));
    }

    let dir = tempfile::Builder::new()
        .prefix(STORE_COPY_PREFIX)
        .tempdir_in(tmp_root)?;
    let path = dir.path().join(STORE_FILE);
    fs::copy(&source, &path)?;

    let wal = profile.join(format!("{STORE_FILE}{WAL_SUFFIX}"));
    if wal.is_file() {
        fs::copy(&wal, dir.path().join(format!("{STORE_FILE}{WAL_SUFFIX}")))?;
    }

    tracing::debug!(from = %source.display(), to = %path.display(), "copied cookie store");
    Ok(StoreCopy { dir, path })
}

/// Reads every row of `moz_cookies` and keeps those whose host passes `filter`.
pub async fn load_cookies(store: &Path, filter: &HostFilter) -> Result<CookieJar, EnrichError> {
    let opts = SqliteConnectOptions::new().filename(store);
    let mut conn = SqliteConnection::connect_with(&opts).await?;

    let rows = sqlx::query(
        "SELECT name, value, host, path, expiry, isSecure, isHttpOnly, sameSite FROM moz_cookies",
    )
    .fetch_all(&mut conn)
    .await;
    // Close before propagating so the copy can be deleted right after.
    conn.close().await?;
    let rows = rows?;

    let mut cookies = Vec::new();
    for row in rows {
        let host: String = row.try_get::<Option<String>, _>("host")?.unwrap_or_default();
        if !filter.matches(&host) {
            continue;
        }
        cookies.push(Cookie {
            name: row.try_get::<Option<String>, _>("name")?.unwrap_or_default(),
            value: row.try_get::<Option<String>, _>("value")?.unwrap_or_default(),
            host,
            path: row
                .try_get::<Option<String>, _>("path")?
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| "/".to_string()),
            expiry: row.try_get::<Option<i64>, _>("expiry")?.unwrap_or(0),
            secure: row.try_get::<Option<i64>, _>("isSecure")?.unwrap_or(0) != 0,
            http_only: row.try_get::<Option<i64>, _>("isHttpOnly")?.unwrap_or(0) != 0,
            same_site: SameSite::from_stored(row.try_get::<Option<i64>, _>("sameSite")?),
        });
    }

    tracing::debug!(count = cookies.len(), "loaded cookies from store");
    Ok(CookieJar { cookies })
}
