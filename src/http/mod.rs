//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from specific business logic.

pub mod freshness;
pub mod mime;
pub mod range;
pub mod response;

// Re-export commonly used types
pub use range::{compute_range, ByteRange};
pub use response::{
    build_416_response, build_500_response, build_html_response, build_not_found_response,
    build_redirect_response, BoxedBody,
};
