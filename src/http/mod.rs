//! HTTP client module
//!
//! [`RequestBuilder`] collects the pieces of a single request through chained
//! `with_*` calls and performs it with [`RequestBuilder::execute`]. Nothing is
//! validated until execution; a fresh `reqwest` client is built per call.

use crate::config::DEFAULT_TIMEOUT;
use crate::error::{HttpClientError, Result};
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, COOKIE};
use reqwest::{ClientBuilder, Method};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use url::{form_urlencoded, Url};

pub mod cookie;
mod download;
pub mod request;

pub use cookie::{cookies_to_header, Cookie};
pub use request::{FileUpload, RequestBody, FORM_URLENCODED};

/// Fluent builder for one HTTP request
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    url: String,
    method: String,
    headers: HashMap<String, String>,
    cookies: Vec<Cookie>,
    timeout: Duration,
    query: Vec<(String, String)>,
    body: RequestBody,
}

impl RequestBuilder {
    /// Create a builder for `method` on `url`.
    ///
    /// Neither argument is checked here; bad values surface from [`execute`](Self::execute).
    pub fn new(url: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: method.into(),
            headers: HashMap::new(),
            cookies: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    /// Merge headers, overwriting existing values with the same name
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in headers {
            self.headers.insert(key.into(), value.into());
        }
        self
    }

    /// Append cookies; duplicates are kept and all of them are sent
    pub fn with_cookies<I>(mut self, cookies: I) -> Self
    where
        I: IntoIterator<Item = Cookie>,
    {
        self.cookies.extend(cookies);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Append query parameters. Repeated keys accumulate.
    pub fn with_query_params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Send `data` URL-encoded as a POST form.
    pub fn with_form_data<I, K, V>(mut self, data: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.method = Method::POST.to_string();
        self.body = RequestBody::form(data);
        self
    }

    /// Upload the file at `source_path` as multipart field `field_name` with a POST.
    ///
    /// Fails when the file cannot be opened or its size cannot be read.
    pub fn with_file_data(
        mut self,
        source_path: impl AsRef<Path>,
        field_name: &str,
    ) -> Result<Self> {
        let upload = FileUpload::open(source_path.as_ref(), field_name).inspect_err(|e| {
            log::warn!(
                "Cannot attach {} as '{}': {}",
                source_path.as_ref().display(),
                field_name,
                e
            )
        })?;
        self.method = Method::POST.to_string();
        self.body = RequestBody::File(upload);
        Ok(self)
    }

    /// Send `data` verbatim; no content type is inferred.
    pub fn with_raw_data(mut self, data: impl Into<bytes::Bytes>) -> Self {
        self.body = RequestBody::Raw(data.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    /// Encoded query parameters, e.g. `a=1&b=2`
    pub fn query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish()
    }

    /// Content type the body will be sent with
    pub fn content_type(&self) -> Option<String> {
        self.body.content_type()
    }

    pub fn content_length(&self) -> u64 {
        self.body.content_length()
    }

    /// Perform the request and return the full response body.
    ///
    /// The body is returned whatever the status code. Each call rebuilds the
    /// request from the current configuration and uses its own client.
    pub async fn execute(&self) -> Result<Vec<u8>> {
        let method = Method::from_bytes(self.method.as_bytes())
            .map_err(|_| HttpClientError::InvalidMethod(self.method.clone()))?;
        let url = self.request_url()?;
        log::debug!("> {} {}", method, url);

        let client = ClientBuilder::new()
            .timeout(self.timeout)
            .build()
            .map_err(HttpClientError::Http)?;
        let mut request = client.request(method, url);

        // Headers derived from the body replace user-supplied ones.
        let content_type = self.body.content_type();
        let is_multipart = matches!(self.body, RequestBody::File(_));
        for (key, value) in &self.headers {
            if (content_type.is_some() && key.eq_ignore_ascii_case(CONTENT_TYPE.as_str()))
                || (is_multipart && key.eq_ignore_ascii_case(CONTENT_LENGTH.as_str()))
                || key.eq_ignore_ascii_case(COOKIE.as_str())
            {
                continue;
            }
            request = request.header(key, value);
        }
        if let Some(content_type) = content_type {
            request = request.header(CONTENT_TYPE, content_type);
        }
        if is_multipart {
            request = request.header(CONTENT_LENGTH, self.body.content_length().to_string());
        }

        if let Some(cookie_header) = self.cookie_header() {
            request = request.header(COOKIE, cookie_header);
        }

        if let Some(body) = self.body.to_reqwest().await? {
            request = request.body(body);
        }

        let request = request.build().map_err(HttpClientError::Http)?;
        let response = client
            .execute(request)
            .await
            .map_err(HttpClientError::from_transport)?;

        let status = response.status();
        let data = response
            .bytes()
            .await
            .map_err(HttpClientError::from_transport)?;
        log::debug!("< {} ({} bytes)", status, data.len());

        Ok(data.to_vec())
    }

    fn request_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.url).map_err(|e| {
            HttpClientError::InvalidUrl(format!("Invalid URL '{}': {}", self.url, e))
        })?;
        if !self.query.is_empty() {
            if url.cannot_be_a_base() {
                return Err(HttpClientError::InvalidUrl(format!(
                    "Cannot add query parameters to '{}'",
                    self.url
                )));
            }
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }
        Ok(url)
    }

    /// Cookie header built from a user-supplied `Cookie` header followed by
    /// the configured cookies
    fn cookie_header(&self) -> Option<String> {
        let existing = find_cookie_header(&self.headers);
        if self.cookies.is_empty() {
            return existing;
        }
        let header_value = cookies_to_header(&self.cookies);
        Some(match existing {
            Some(existing) => format!("{}; {}", existing, header_value),
            None => header_value,
        })
    }
}

fn find_cookie_header(headers: &HashMap<String, String>) -> Option<String> {
    for (key, value) in headers {
        if key.eq_ignore_ascii_case("cookie") {
            return Some(value.clone());
        }
    }
    None
}
