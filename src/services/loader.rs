// Loader service - reads description documents from files or http(s) URLs

use std::path::PathBuf;
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tracing::debug;
use url::Url;

use crate::domain::description::{DescriptionDocument, DescriptionParser};
use crate::error::{DescriptionError, DescriptionResult};
use crate::validation;

/// Largest document accepted from any source
pub const MAX_DOCUMENT_SIZE: usize = 1_000_000;
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_REDIRECTS: usize = 5;

/// Where a description document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Remote(Url),
}

impl Source {
    /// Anything with a scheme is treated as a URL (and must be http or https); the rest is a path
    pub fn parse(source: &str) -> DescriptionResult<Self> {
        let source = source.trim();
        if source.contains("://") {
            validation::validate_source_url(source).map(Source::Remote)
        } else {
            Ok(Source::File(PathBuf::from(source)))
        }
    }
}

/// Read the raw text of a description document
pub async fn load_source(source: &str) -> DescriptionResult<String> {
    match Source::parse(source)? {
        Source::File(path) => read_file(path).await,
        Source::Remote(url) => fetch(url).await,
    }
}

/// Read and parse a description document
pub async fn load_document(source: &str) -> DescriptionResult<DescriptionDocument> {
    let text = load_source(source).await?;
    DescriptionParser::new().parse(&text)
}

async fn read_file(path: PathBuf) -> DescriptionResult<String> {
    debug!(path = %path.display(), "Reading description document");
    let file = tokio::fs::File::open(&path).await?;

    // one byte past the cap is enough to know the file is too large
    let mut bytes = Vec::new();
    file.take(MAX_DOCUMENT_SIZE as u64 + 1)
        .read_to_end(&mut bytes)
        .await?;
    into_text(bytes)
}

async fn fetch(url: Url) -> DescriptionResult<String> {
    debug!(%url, "Fetching description document");

    let client = reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()
        .map_err(|e| DescriptionError::Fetch(format!("Failed to create HTTP client: {}", e)))?;

    let mut response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| DescriptionError::Fetch(format!("Failed to fetch {}: {}", url, e)))?;

    if !response.status().is_success() {
        return Err(DescriptionError::Fetch(format!(
            "{} returned status {}",
            url,
            response.status()
        )));
    }

    if let Some(length) = response.content_length() {
        if length > MAX_DOCUMENT_SIZE as u64 {
            return Err(too_large(length));
        }
    }

    // Content-Length may be absent or wrong, so count the bytes as they arrive
    let mut body = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| DescriptionError::Fetch(format!("Failed to read {}: {}", url, e)))?
    {
        append_chunk(&mut body, &chunk)?;
    }

    into_text(body)
}

fn append_chunk(body: &mut Vec<u8>, chunk: &[u8]) -> DescriptionResult<()> {
    let size = body.len() + chunk.len();
    if size > MAX_DOCUMENT_SIZE {
        return Err(too_large(size as u64));
    }
    body.extend_from_slice(chunk);
    Ok(())
}

fn too_large(size: u64) -> DescriptionError {
    DescriptionError::Io(format!(
        "Document too large ({} bytes, max {})",
        size, MAX_DOCUMENT_SIZE
    ))
}

fn into_text(bytes: Vec<u8>) -> DescriptionResult<String> {
    if bytes.len() > MAX_DOCUMENT_SIZE {
        return Err(too_large(bytes.len() as u64));
    }
    String::from_utf8(bytes)
        .map_err(|_| DescriptionError::Io("Document is not valid UTF-8".to_string()))
}
