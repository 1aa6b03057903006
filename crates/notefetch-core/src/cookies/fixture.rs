//! Test helpers: build a browser-shaped cookie store on disk.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode};
use sqlx::{Connection, SqliteConnection};
use std::path::Path;

use super::{Cookie, SameSite};

pub(crate) fn cookie(name: &str, value: &str, host: &str) -> Cookie {
    Cookie {
        name: name.to_string(),
        value: value.to_string(),
        host: host.to_string(),
        path: "/".to_string(),
        expiry: 0,
        secure: true,
        http_only: false,
        same_site: SameSite::Lax,
    }
}

/// Creates `moz_cookies` at `path` and inserts `cookies` in order.
pub(crate) async fn write_store(path: &Path, cookies: &[Cookie]) {
    let opts = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Delete);
    let mut conn = SqliteConnection::connect_with(&opts).await.unwrap();
    sqlx::query(
        r#"
        CREATE TABLE moz_cookies (
            id INTEGER PRIMARY KEY,
            name TEXT,
            value TEXT,
            host TEXT,
            path TEXT,
            expiry INTEGER,
            isSecure INTEGER,
            isHttpOnly INTEGER,
            sameSite INTEGER
        )
        "#,
    )
    .execute(&mut conn)
    .await
    .unwrap();

    for c in cookies {
        let same_site = match c.same_site {
            SameSite::None => 0_i64,
            SameSite::Lax => 1,
            SameSite::Strict => 2,
        };
        sqlx::query(
            "INSERT INTO moz_cookies (name, value, host, path, expiry, isSecure, isHttpOnly, sameSite) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(&c.name)
        .bind(&c.value)
        .bind(&c.host)
        .bind(&c.path)
        .bind(c.expiry)
        .bind(c.secure as i64)
        .bind(c.http_only as i64)
        .bind(same_site)
        .execute(&mut conn)
        .await
        .unwrap();
    }
    conn.close().await.unwrap();
}
