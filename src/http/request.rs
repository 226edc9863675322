//! HTTP request bodies
//!
//! A request carries at most one body. The multipart variant is assembled by
//! hand so its exact length is known before any byte of the file is read.

use crate::error::Result;
use crate::utils::FileUtils;
use bytes::Bytes;
use futures_util::future;
use futures_util::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tokio_util::io::ReaderStream;
use url::form_urlencoded;
use uuid::Uuid;

/// Content type of URL-encoded form bodies
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// The body attached to a request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestBody {
    #[default]
    Empty,
    Raw(Bytes),
    Form(String),
    File(FileUpload),
}

impl RequestBody {
    /// URL-encode `pairs` in iteration order
    pub fn form<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in pairs {
            serializer.append_pair(key.as_ref(), value.as_ref());
        }
        RequestBody::Form(serializer.finish())
    }

    /// Content type implied by the body, if any
    pub fn content_type(&self) -> Option<String> {
        match self {
            RequestBody::Empty | RequestBody::Raw(_) => None,
            RequestBody::Form(_) => Some(FORM_URLENCODED.to_string()),
            RequestBody::File(upload) => Some(upload.content_type()),
        }
    }

    /// Exact number of bytes the body puts on the wire
    pub fn content_length(&self) -> u64 {
        match self {
            RequestBody::Empty => 0,
            RequestBody::Raw(data) => data.len() as u64,
            RequestBody::Form(encoded) => encoded.len() as u64,
            RequestBody::File(upload) => upload.content_length(),
        }
    }

    pub(crate) async fn to_reqwest(&self) -> Result<Option<reqwest::Body>> {
        let body = match self {
            RequestBody::Empty => None,
            RequestBody::Raw(data) => Some(reqwest::Body::from(data.clone())),
            RequestBody::Form(encoded) => Some(reqwest::Body::from(encoded.clone())),
            RequestBody::File(upload) => Some(upload.stream().await?),
        };
        Ok(body)
    }
}

/// A single-file `multipart/form-data` body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    path: PathBuf,
    field_name: String,
    file_name: String,
    boundary: String,
    file_len: u64,
}

impl FileUpload {
    /// Check that `path` is a readable file and record its size.
    ///
    /// The declared filename is the last component of `path`.
    pub fn open(path: impl AsRef<Path>, field_name: &str) -> Result<Self> {
        let path = path.as_ref();
        FileUtils::check_file_readable(path)?;
        let file_len = std::fs::metadata(path)?.len();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        Ok(Self {
            path: path.to_path_buf(),
            field_name: field_name.to_string(),
            file_name,
            boundary: generate_boundary(),
            file_len,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Size of the file when it was attached
    pub fn file_len(&self) -> u64 {
        self.file_len
    }

    /// Part header written before the file bytes
    pub fn preamble(&self) -> String {
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
            self.boundary,
            escape_quotes(&self.field_name),
            escape_quotes(&self.file_name)
        )
    }

    /// Closing boundary written after the file bytes
    pub fn closing(&self) -> String {
        format!("\r\n--{}--\r\n", self.boundary)
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    pub fn content_length(&self) -> u64 {
        self.preamble().len() as u64 + self.file_len + self.closing().len() as u64
    }

    /// Stream preamble, file and closing boundary without buffering the file.
    ///
    /// The file is read up to the size recorded at attach time so the body
    /// never outgrows the declared `Content-Length`.
    async fn stream(&self) -> Result<reqwest::Body> {
        let file = tokio::fs::File::open(&self.path).await?;
        let head = stream::once(future::ready(Ok::<Bytes, std::io::Error>(Bytes::from(
            self.preamble(),
        ))));
        let tail = stream::once(future::ready(Ok::<Bytes, std::io::Error>(Bytes::from(
            self.closing(),
        ))));
        let contents = ReaderStream::new(file.take(self.file_len));
        Ok(reqwest::Body::wrap_stream(head.chain(contents).chain(tail)))
    }
}

fn generate_boundary() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

fn escape_quotes(input: &str) -> String {
    input.replace('\\', "\\\\").replace('"', "\\\"")
}
