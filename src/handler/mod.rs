//! Request handler module
//!
//! Responsible for request routing dispatch and file serving: the path
//! router decides what a request resolves to, the transfer engine streams
//! file content with range and compression support.

pub mod router;
pub mod transfer;

// Re-export main entry point
pub use router::handle_request;
