//! Small, independent utilities.
//!
//! - [`secret`]: AES-GCM encryption with a random nonce and a URL-safe text form.
//! - [`client`]: JSON over HTTP client with timeout, default headers and a
//!   configurable success status.
//! - [`domain`] and [`mime`]: domain, URL and media file validation.
//! - [`utils`], [`time`] and [`code`]: dedup, containment, rounding, dates,
//!   digests and base64.
//!
//! Nothing here keeps global mutable state; every function can be called
//! from any thread.

pub mod client;
pub mod code;
pub mod config;
pub mod domain;
pub mod logs;
pub mod mime;
pub mod secret;
pub mod time;
pub mod utils;
