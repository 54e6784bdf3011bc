//! staticd - asynchronous HTTP static file server
//!
//! Maps request paths to files under a configured root directory and
//! streams their contents back with conditional caching (`ETag`,
//! Last-Modified), byte-range serving and on-the-fly gzip/deflate
//! encoding.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
