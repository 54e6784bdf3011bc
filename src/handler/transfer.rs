//! Content transfer engine
//!
//! Given a resolved file path, produces the response byte stream: whole
//! file, byte range, or either passed through a compression transform.
//! Files are streamed, never buffered in full, so per-request memory is
//! bounded by the stream read buffer.

use crate::config::AppState;
use crate::http::range::{compute_range, ByteRange};
use crate::http::response::{self, BoxedBody};
use crate::http::mime;
use async_compression::tokio::bufread::{GzipEncoder, ZlibEncoder};
use hyper::http::response::Builder;
use hyper::{HeaderMap, Response};
use std::fs::Metadata;
use std::io::SeekFrom;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt, BufReader};

/// Content encoding negotiated for this response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Encoding {
    Identity,
    Gzip,
    Deflate,
}

/// Pick the transfer encoding for a file.
///
/// Only files whose extension matches the configured pattern are
/// candidates; among those, `gzip` is preferred over `deflate`. A client
/// that offers neither still gets the file, uncompressed.
fn choose_encoding(path: &str, headers: &HeaderMap, state: &AppState) -> Encoding {
    let compressible = mime::extension(path)
        .is_some_and(|ext| state.zip_match.is_match(ext));
    if !compressible {
        return Encoding::Identity;
    }

    let accept = headers
        .get("accept-encoding")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if accept.contains("gzip") {
        Encoding::Gzip
    } else if accept.contains("deflate") {
        Encoding::Deflate
    } else {
        Encoding::Identity
    }
}

/// Serve a file's content onto the accumulated response builder.
///
/// Resolves any `Range` header before a stream is opened: malformed or
/// unsatisfiable ranges are answered with 416 and an unsatisfied
/// `Content-Range`, valid ones with 206 and a stream scoped to exactly
/// those bytes.
pub async fn serve_file(
    mut builder: Builder,
    path: &Path,
    meta: &Metadata,
    headers: &HeaderMap,
    state: &AppState,
) -> Response<BoxedBody> {
    let total = meta.len();
    let path_str = path.to_string_lossy();

    builder = builder
        .header("Content-Type", mime::content_type(&path_str))
        .header("Accept-Ranges", "bytes");

    // Resolve the requested range before any stream is opened.
    let range_header = headers.get("range").and_then(|v| v.to_str().ok());
    let byte_range = match range_header {
        Some(value) => match compute_range(value, total) {
            Some(range) if range.is_satisfiable(total) => Some(range),
            _ => return response::build_416_response(builder, total),
        },
        None => None,
    };

    let mut file = match File::open(path).await {
        Ok(f) => f,
        Err(e) => return response::build_500_response(&e),
    };

    if let Some(range) = byte_range {
        builder = builder.status(206).header(
            "Content-Range",
            format!("bytes {}-{}/{total}", range.start, range.end),
        );
        if let Err(e) = file.seek(SeekFrom::Start(range.start)).await {
            return response::build_500_response(&e);
        }
    }

    let content_length = byte_range.as_ref().map_or(total, ByteRange::length);
    let reader = file.take(content_length);

    match choose_encoding(&path_str, headers, state) {
        Encoding::Gzip => {
            builder = builder.header("Content-Encoding", "gzip");
            response::finish(builder, response::stream(GzipEncoder::new(BufReader::new(reader))))
        }
        Encoding::Deflate => {
            builder = builder.header("Content-Encoding", "deflate");
            response::finish(builder, response::stream(ZlibEncoder::new(BufReader::new(reader))))
        }
        Encoding::Identity => {
            builder = builder.header("Content-Length", content_length);
            response::finish(builder, response::stream(reader))
        }
    }
}
