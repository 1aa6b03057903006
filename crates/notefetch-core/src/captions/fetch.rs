//! Caption payload download (single GET via libcurl).

use std::time::Duration;

use crate::error::EnrichError;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

fn curl_err(e: curl::Error) -> EnrichError {
    EnrichError::CaptionFetchFailed(e.to_string())
}

/// Downloads `url` and returns the body as text. Follows redirects; a
/// non-2xx status, transport error, or elapsed `timeout` is `CaptionFetchFailed`.
/// Runs on the current thread.
pub fn fetch_caption_payload(url: &str, timeout: Duration) -> Result<String, EnrichError> {
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(curl_err)?;
    easy.follow_location(true).map_err(curl_err)?;
    easy.max_redirections(10).map_err(curl_err)?;
    easy.connect_timeout(CONNECT_TIMEOUT.min(timeout)).map_err(curl_err)?;
    easy.timeout(timeout).map_err(curl_err)?;
    easy.accept_encoding("").map_err(curl_err)?;

    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(curl_err)?;
        transfer
            .perform()
            .map_err(|e| EnrichError::CaptionFetchFailed(format!("GET {url}: {e}")))?;
    }

    let code = easy.response_code().map_err(curl_err)?;
    if !(200..300).contains(&code) {
        return Err(EnrichError::CaptionFetchFailed(format!(
            "GET {url} returned HTTP {code}"
        )));
    }

    tracing::debug!(bytes = body.len(), "downloaded caption payload");
    Ok(String::from_utf8_lossy(&body).into_owned())
}
