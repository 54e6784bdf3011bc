//! HTTP response building module
//!
//! Provides the boxed body type shared by every response path, plus
//! builders for the canned responses, decoupled from specific business logic.

use futures::TryStreamExt;
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Empty, Full, StreamBody};
use hyper::body::{Bytes, Frame};
use hyper::http::response::Builder;
use hyper::Response;
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;

/// Unified response body: either a buffered payload or a file stream.
pub type BoxedBody = BoxBody<Bytes, std::io::Error>;

/// Box a fully-buffered payload into the unified body type.
pub fn full(data: impl Into<Bytes>) -> BoxedBody {
    Full::new(data.into())
        .map_err(|never| match never {})
        .boxed()
}

/// An empty body.
pub fn empty() -> BoxedBody {
    Empty::new().map_err(|never| match never {}).boxed()
}

/// Stream an async reader as the response body.
///
/// The reader is owned by the stream, so the underlying file descriptor is
/// released when the response completes, errors, or is dropped on client
/// disconnect. A read error terminates the body for this request only.
pub fn stream(reader: impl AsyncRead + Send + Sync + Unpin + 'static) -> BoxedBody {
    StreamBody::new(ReaderStream::new(reader).map_ok(Frame::data)).boxed()
}

/// Finalize a builder, falling back to an empty response on header errors.
pub fn finish(builder: Builder, body: BoxedBody) -> Response<BoxedBody> {
    builder.body(body).unwrap_or_else(|e| {
        log_build_error("response", &e);
        Response::new(empty())
    })
}

/// Build the not-found response: 400 with an HTML body naming the URL.
///
/// The original service reported missing paths with status 400 rather than
/// the conventional 404; that status is preserved for compatibility.
pub fn build_not_found_response(url: &str) -> Response<BoxedBody> {
    let html = format!(
        "<html><head><title>Not Found</title></head>\
         <body><h1>Not Found</h1><p>The requested URL {url} was not found on this server.</p></body></html>"
    );
    Response::builder()
        .status(400)
        .header("Content-Type", "text/html")
        .body(full(html))
        .unwrap_or_else(|e| {
            log_build_error("400", &e);
            Response::new(empty())
        })
}

/// Build a 301 redirect adding a trailing slash to a directory URL.
pub fn build_redirect_response(location: &str) -> Response<BoxedBody> {
    let html = format!(
        "<html><head><title>Moved Permanently</title></head>\
         <body><h1>Moved Permanently</h1><p>Redirecting to <a href=\"{location}\">{location}</a></p></body></html>"
    );
    Response::builder()
        .status(301)
        .header("Location", location)
        .header("Content-Type", "text/html")
        .body(full(html))
        .unwrap_or_else(|e| {
            log_build_error("301", &e);
            Response::new(empty())
        })
}

/// Build a 416 Range Not Satisfiable response on the accumulated builder.
///
/// Carries only the unsatisfied `Content-Range` form and an empty body.
pub fn build_416_response(builder: Builder, total: u64) -> Response<BoxedBody> {
    let resp = builder
        .status(416)
        .header("Content-Range", format!("bytes */{total}"))
        .body(empty());
    resp.unwrap_or_else(|e| {
        log_build_error("416", &e);
        Response::new(empty())
    })
}

/// Build a 500 response carrying the raw error text as body.
pub fn build_500_response(err: &std::io::Error) -> Response<BoxedBody> {
    Response::builder()
        .status(500)
        .body(full(err.to_string()))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(empty())
        })
}

/// Build a 200 HTML response (directory listings).
pub fn build_html_response(html: String) -> Response<BoxedBody> {
    Response::builder()
        .status(200)
        .header("Content-Type", "text/html")
        .header("Content-Length", html.len())
        .body(full(html))
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(empty())
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_text(resp: Response<BoxedBody>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_names_url() {
        let resp = build_not_found_response("/missing/page");
        assert_eq!(resp.status(), 400);
        assert_eq!(resp.headers()["content-type"], "text/html");
        assert!(body_text(resp).await.contains("/missing/page"));
    }

    #[tokio::test]
    async fn test_redirect_location_and_link() {
        let resp = build_redirect_response("/dir/");
        assert_eq!(resp.status(), 301);
        assert_eq!(resp.headers()["location"], "/dir/");
        assert!(body_text(resp).await.contains("<a href=\"/dir/\">"));
    }

    #[tokio::test]
    async fn test_416_empty_body_with_content_range() {
        let resp = build_416_response(Response::builder(), 1234);
        assert_eq!(resp.status(), 416);
        assert_eq!(resp.headers()["content-range"], "bytes */1234");
        assert!(body_text(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_stream_body_yields_reader_bytes() {
        let resp = finish(Response::builder(), stream(&b"chunked payload"[..]));
        assert_eq!(body_text(resp).await, "chunked payload");
    }
}
