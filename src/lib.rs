//! httpclient - a small fluent request builder over reqwest
//!
//! Configure method, URL, headers, cookies, timeout, query parameters and a
//! body (raw, URL-encoded form or single-file multipart), then execute the
//! request or save the response to a file.
//!
//! ```no_run
//! use httpclient::RequestBuilder;
//! use std::time::Duration;
//!
//! # async fn example() -> httpclient::Result<()> {
//! let body = RequestBuilder::new("https://example.com/search", "GET")
//!     .with_headers([("Accept", "text/html")])
//!     .with_query_params([("q", "rust")])
//!     .with_timeout(Duration::from_secs(5))
//!     .execute()
//!     .await?;
//! println!("{} bytes", body.len());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod exit_code;
pub mod http;
pub mod logging;
pub mod utils;

pub use error::{HttpClientError, Result};
pub use http::{Cookie, RequestBuilder};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
