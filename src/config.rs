//! Configuration management for httpclient
//!
//! [`Config`] is the plain-data form of one request, as assembled by the
//! command line. It turns into a [`RequestBuilder`] with [`Config::into_builder`].

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::Result;
use crate::http::{Cookie, RequestBuilder};

/// Timeout applied when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the request body comes from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BodySource {
    #[default]
    None,
    Raw(String),
    Form(Vec<(String, String)>),
    File { path: PathBuf, field: String },
}

/// Main configuration struct
#[derive(Debug, Clone)]
pub struct Config {
    pub url: String,
    pub method: String,
    pub headers: HashMap<String, String>,
    pub cookies: Vec<Cookie>,
    pub query: Vec<(String, String)>,
    pub body: BodySource,
    pub timeout: Duration,
    pub output: Option<PathBuf>,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            url: String::new(),
            method: "GET".to_string(),
            headers: HashMap::new(),
            cookies: Vec::new(),
            query: Vec::new(),
            body: BodySource::None,
            timeout: DEFAULT_TIMEOUT,
            output: None,
            verbose: false,
        }
    }
}

impl Config {
    /// Build the request described by this configuration.
    ///
    /// Fails only when a file body cannot be attached.
    pub fn into_builder(self) -> Result<RequestBuilder> {
        let builder = RequestBuilder::new(self.url, self.method)
            .with_headers(self.headers)
            .with_cookies(self.cookies)
            .with_timeout(self.timeout)
            .with_query_params(self.query);

        let builder = match self.body {
            BodySource::None => builder,
            BodySource::Raw(data) => builder.with_raw_data(data),
            BodySource::Form(pairs) => builder.with_form_data(pairs),
            BodySource::File { path, field } => builder.with_file_data(path, &field)?,
        };
        Ok(builder)
    }
}
