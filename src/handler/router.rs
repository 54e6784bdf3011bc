//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: normalizes the request path,
//! resolves it under the configured root and decides among SPA fallback,
//! directory listing, trailing-slash redirect, file serving and not-found.

use crate::config::AppState;
use crate::handler::transfer;
use crate::http::freshness;
use crate::http::response::{self, BoxedBody};
use crate::logger;
use hyper::{HeaderMap, Request, Response};
use std::convert::Infallible;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    /// Raw URL path as requested
    pub url_path: &'a str,
    /// Path after the `static` prefix rewrite
    pub normalized: &'a str,
    /// The normalized path joined onto the configured root
    pub fs_path: PathBuf,
    pub headers: &'a HeaderMap,
}

/// Main entry point for HTTP request handling
///
/// Generic over the request body: the body is never read, only the URI and
/// headers matter.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<BoxedBody>, Infallible> {
    if state.config.logging.access_log {
        logger::log_request(req.method(), req.uri(), req.version());
    }

    let url_path = req.uri().path();
    let normalized = normalize_path(url_path);
    let fs_path = Path::new(&state.config.server.root).join(normalized.trim_start_matches('/'));

    let ctx = RequestContext {
        url_path,
        normalized,
        fs_path,
        headers: req.headers(),
    };

    Ok(route_request(&ctx, &state).await)
}

/// Rewrite the request path for serving under a `static` prefix.
///
/// When the path contains the literal substring `static` at a non-zero
/// offset, it is truncated to start at that substring, so any leading
/// segments are dropped: `/app/v2/static/app.js` is served as
/// `static/app.js` relative to the root. Paths without the substring, or
/// starting with it, pass through unchanged.
pub fn normalize_path(path: &str) -> &str {
    match path.find("static") {
        Some(offset) if offset > 0 => &path[offset..],
        _ => path,
    }
}

/// Route request based on the resolved path's disk state
async fn route_request(ctx: &RequestContext<'_>, state: &AppState) -> Response<BoxedBody> {
    // SPA routes always resolve to the root index page, whether or not the
    // path exists on disk.
    if ctx.normalized.contains("article/") || ctx.normalized.contains("homepage") {
        return respond(&state.index_path(), ctx.headers, state).await;
    }

    match fs::metadata(&ctx.fs_path).await {
        Err(_) => response::build_not_found_response(ctx.url_path),
        Ok(meta) if meta.is_dir() => {
            if ctx.url_path.ends_with('/') {
                serve_directory(ctx, state).await
            } else {
                response::build_redirect_response(&format!("{}/", ctx.url_path))
            }
        }
        Ok(_) => respond(&ctx.fs_path, ctx.headers, state).await,
    }
}

/// Serve a directory: its index page when present, a listing otherwise.
async fn serve_directory(ctx: &RequestContext<'_>, state: &AppState) -> Response<BoxedBody> {
    let index_path = ctx.fs_path.join(&state.config.server.index);
    match fs::metadata(&index_path).await {
        Ok(meta) if meta.is_file() => respond(&index_path, ctx.headers, state).await,
        _ => serve_listing(&ctx.fs_path, ctx.url_path).await,
    }
}

/// Combined freshness + transfer flow for a single file.
///
/// Freshness headers are written onto the builder first, then read back by
/// the freshness check, so a fresh client gets 304 before any stream is
/// opened.
pub async fn respond(path: &Path, headers: &HeaderMap, state: &AppState) -> Response<BoxedBody> {
    let meta = match fs::metadata(path).await {
        Ok(meta) => meta,
        Err(e) => return response::build_500_response(&e),
    };

    let builder = freshness::apply_freshness_headers(Response::builder(), &meta, &state.config.cache);
    let fresh = builder
        .headers_ref()
        .is_some_and(|resp_headers| freshness::is_fresh(headers, resp_headers));
    if fresh {
        return response::finish(builder.status(304), response::empty());
    }

    transfer::serve_file(builder, path, &meta, headers, state).await
}

/// Materialize the full directory listing before responding.
async fn serve_listing(dir: &Path, url_path: &str) -> Response<BoxedBody> {
    let mut read_dir = match fs::read_dir(dir).await {
        Ok(rd) => rd,
        Err(e) => return response::build_500_response(&e),
    };

    let mut entries = Vec::new();
    loop {
        match read_dir.next_entry().await {
            Ok(Some(entry)) => {
                let name = entry.file_name().to_string_lossy().into_owned();
                let is_dir = entry
                    .file_type()
                    .await
                    .map_or(false, |file_type| file_type.is_dir());
                entries.push((name, is_dir));
            }
            Ok(None) => break,
            Err(e) => return response::build_500_response(&e),
        }
    }
    entries.sort();

    response::build_html_response(render_listing(url_path, &entries))
}

/// Render the listing HTML: one link per entry, directories suffixed `/`.
pub fn render_listing(url_path: &str, entries: &[(String, bool)]) -> String {
    let mut html = format!(
        "<html><head><title>Index of {url_path}</title></head>\
         <body><h1>Index of {url_path}</h1><ul>"
    );
    for (name, is_dir) in entries {
        if *is_dir {
            html.push_str(&format!("<li><a href=\"{name}/\">{name}/</a></li>"));
        } else {
            html.push_str(&format!("<li><a href=\"{name}\">{name}</a></li>"));
        }
    }
    html.push_str("</ul></body></html>");
    html
}
