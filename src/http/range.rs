//! HTTP Range request parsing module
//!
//! Turns a `Range` request header and a total byte size into a concrete
//! inclusive byte interval for partial-content responses.

/// An inclusive byte interval into a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// First byte position
    pub start: u64,
    /// Last byte position (inclusive)
    pub end: u64,
}

impl ByteRange {
    /// Number of bytes covered by this range.
    #[inline]
    pub const fn length(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Whether this range can be served from a file of `total` bytes.
    ///
    /// The bounds must satisfy `start <= end < total`; anything else is
    /// answered with 416 by the caller before a stream is opened.
    #[inline]
    pub const fn is_satisfiable(&self, total: u64) -> bool {
        self.start <= self.end && self.end < total
    }
}

/// Parse a `Range` header value against a total file size.
///
/// Supported forms of `bytes=<start>-<end>`:
/// - `bytes=0-99` - both bounds, used as-is
/// - `bytes=100-` - open-ended, runs to the last byte
/// - `bytes=-500` - suffix, the last 500 bytes
///
/// Returns `None` for malformed syntax (neither side parses). Bounds are
/// not validated here; see [`ByteRange::is_satisfiable`].
///
/// # Examples
/// ```
/// use staticd::http::range::{compute_range, ByteRange};
///
/// assert_eq!(compute_range("bytes=0-99", 1000), Some(ByteRange { start: 0, end: 99 }));
/// assert_eq!(compute_range("bytes=-10", 1000), Some(ByteRange { start: 990, end: 999 }));
/// assert_eq!(compute_range("bytes=a-b", 1000), None);
/// ```
pub fn compute_range(header: &str, total: u64) -> Option<ByteRange> {
    let spec = header.strip_prefix("bytes=")?;
    let (start_str, end_str) = spec.split_once('-')?;
    let (start_str, end_str) = (start_str.trim(), end_str.trim());

    let start = start_str.parse::<u64>().ok();
    let end = end_str.parse::<u64>().ok();

    match (start, end) {
        // Suffix form: the last `end` bytes of the file.
        (None, Some(suffix)) if start_str.is_empty() => Some(ByteRange {
            start: total.saturating_sub(suffix),
            end: total.saturating_sub(1),
        }),
        // Open-ended form: from `start` to EOF.
        (Some(start), None) if end_str.is_empty() => Some(ByteRange {
            start,
            end: total.saturating_sub(1),
        }),
        // Both bounds present: used as-is, no suffix semantics.
        (Some(start), Some(end)) => Some(ByteRange { start, end }),
        // Neither side parses: malformed.
        _ => None,
    }
}
