//! HTTP freshness negotiation module
//!
//! Writes cache-validation headers for a file's metadata and decides
//! whether a request's conditional headers still match the current
//! representation.

use crate::config::CacheConfig;
use hyper::http::response::Builder;
use hyper::HeaderMap;
use std::fs::Metadata;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Build a weak `ETag` validator from file size and modification time.
///
/// Format: `W/"<size>-<mtime millis, hex>"`. Deterministic for a given
/// (size, mtime) pair, so an unchanged file keeps its validator across
/// requests without hashing the content.
pub fn weak_etag(meta: &Metadata) -> String {
    let mtime_ms = meta
        .modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map_or(0, |d| d.as_millis());
    format!("W/\"{}-{mtime_ms:x}\"", meta.len())
}

/// Write cache-validation headers onto the response builder, per the
/// configured feature toggles.
///
/// Must run before [`is_fresh`], which reads the headers back from the
/// builder to compare against the request's conditional headers.
pub fn apply_freshness_headers(
    mut builder: Builder,
    meta: &Metadata,
    cache: &CacheConfig,
) -> Builder {
    if cache.last_modified {
        if let Ok(modified) = meta.modified() {
            builder = builder.header("Last-Modified", httpdate::fmt_http_date(modified));
        }
    }
    if cache.cache_control {
        builder = builder.header("Cache-Control", format!("public, max-age={}", cache.max_age));
    }
    if cache.etag {
        builder = builder.header("ETag", weak_etag(meta));
    }
    if cache.expires {
        let expires = SystemTime::now() + Duration::from_secs(cache.max_age);
        builder = builder.header("Expires", httpdate::fmt_http_date(expires));
    }
    builder
}

/// Decide whether the client's cached copy is still valid.
///
/// Not fresh when the request carries no conditional headers at all, when
/// `If-None-Match` differs from the response `ETag`, or when
/// `If-Modified-Since` differs from the response `Last-Modified` string.
/// The date comparison is an exact string match, not a time ordering.
pub fn is_fresh(request: &HeaderMap, response: &HeaderMap) -> bool {
    let if_none_match = request.get("if-none-match").and_then(|v| v.to_str().ok());
    let if_modified_since = request
        .get("if-modified-since")
        .and_then(|v| v.to_str().ok());

    // Nothing to validate against: the body must be served.
    if if_none_match.is_none() && if_modified_since.is_none() {
        return false;
    }

    if let Some(client_etag) = if_none_match {
        let current = response.get("etag").and_then(|v| v.to_str().ok());
        if current != Some(client_etag) {
            return false;
        }
    }

    if let Some(since) = if_modified_since {
        let current = response.get("last-modified").and_then(|v| v.to_str().ok());
        if current != Some(since) {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::Response;
    use std::fs;

    fn test_cache_config() -> CacheConfig {
        CacheConfig {
            cache_control: true,
            expires: true,
            etag: true,
            last_modified: true,
            max_age: 600,
        }
    }

    fn sample_metadata(name: &str) -> Metadata {
        let dir = std::env::temp_dir().join("staticd-freshness-tests");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, b"sample content").unwrap();
        fs::metadata(&path).unwrap()
    }

    fn built_headers(meta: &Metadata, cache: &CacheConfig) -> HeaderMap {
        let builder = apply_freshness_headers(Response::builder(), meta, cache);
        builder.headers_ref().unwrap().clone()
    }

    #[test]
    fn test_weak_etag_format() {
        let meta = sample_metadata("etag-format.txt");
        let etag = weak_etag(&meta);
        assert!(etag.starts_with("W/\""));
        assert!(etag.ends_with('"'));
        assert!(etag.contains(&format!("{}-", meta.len())));
    }

    #[test]
    fn test_all_headers_written() {
        let meta = sample_metadata("all-headers.txt");
        let headers = built_headers(&meta, &test_cache_config());
        assert!(headers.contains_key("last-modified"));
        assert_eq!(headers["cache-control"], "public, max-age=600");
        assert!(headers.contains_key("etag"));
        assert!(headers.contains_key("expires"));
    }

    #[test]
    fn test_toggles_disable_headers() {
        let meta = sample_metadata("toggles.txt");
        let cache = CacheConfig {
            cache_control: false,
            expires: false,
            etag: true,
            last_modified: false,
            max_age: 600,
        };
        let headers = built_headers(&meta, &cache);
        assert!(!headers.contains_key("cache-control"));
        assert!(!headers.contains_key("expires"));
        assert!(!headers.contains_key("last-modified"));
        assert!(headers.contains_key("etag"));
    }

    #[test]
    fn test_no_conditional_headers_is_stale() {
        let meta = sample_metadata("no-conditional.txt");
        let response = built_headers(&meta, &test_cache_config());
        assert!(!is_fresh(&HeaderMap::new(), &response));
    }

    #[test]
    fn test_matching_etag_is_fresh() {
        let meta = sample_metadata("match-etag.txt");
        let response = built_headers(&meta, &test_cache_config());
        let mut request = HeaderMap::new();
        request.insert("if-none-match", response["etag"].clone());
        assert!(is_fresh(&request, &response));
    }

    #[test]
    fn test_mismatching_etag_is_stale() {
        let meta = sample_metadata("mismatch-etag.txt");
        let response = built_headers(&meta, &test_cache_config());
        let mut request = HeaderMap::new();
        request.insert("if-none-match", "W/\"0-0\"".parse().unwrap());
        assert!(!is_fresh(&request, &response));
    }

    #[test]
    fn test_modified_since_exact_string_match() {
        let meta = sample_metadata("modified-since.txt");
        let response = built_headers(&meta, &test_cache_config());
        let mut request = HeaderMap::new();
        request.insert("if-modified-since", response["last-modified"].clone());
        assert!(is_fresh(&request, &response));

        // A semantically later but textually different date is stale.
        request.insert(
            "if-modified-since",
            "Fri, 01 Jan 2100 00:00:00 GMT".parse().unwrap(),
        );
        assert!(!is_fresh(&request, &response));
    }

    #[test]
    fn test_etag_match_with_stale_date_is_stale() {
        // Both conditions must hold when both are present.
        let meta = sample_metadata("both-conditions.txt");
        let response = built_headers(&meta, &test_cache_config());
        let mut request = HeaderMap::new();
        request.insert("if-none-match", response["etag"].clone());
        request.insert(
            "if-modified-since",
            "Fri, 01 Jan 2100 00:00:00 GMT".parse().unwrap(),
        );
        assert!(!is_fresh(&request, &response));
    }

    #[test]
    fn test_conditional_against_disabled_validator_is_stale() {
        // ETag generation disabled: any If-None-Match fails to match.
        let meta = sample_metadata("disabled-validator.txt");
        let cache = CacheConfig {
            etag: false,
            ..test_cache_config()
        };
        let response = built_headers(&meta, &cache);
        let mut request = HeaderMap::new();
        request.insert("if-none-match", "W/\"1-1\"".parse().unwrap());
        assert!(!is_fresh(&request, &response));
    }
}
