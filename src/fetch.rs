// 🌐 Retrieve step - pull a whole CSV document from its source location

use crate::error::{EtlError, EtlResult};
use reqwest::blocking::Client;
use std::path::PathBuf;
use tracing::debug;
use url::Url;

/// Fetcher - anything that can turn a source location into raw bytes
///
/// Implementations must fail on any non-success answer and never hand back
/// a partial body.
pub trait Fetcher {
    fn fetch(&self, location: &str) -> EtlResult<Vec<u8>>;
}

// ============================================================================
// HTTP(S)
// ============================================================================

/// Blocking HTTP client; one request per call, no retry
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        HttpFetcher {
            client: Client::new(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, location: &str) -> EtlResult<Vec<u8>> {
        let response = self
            .client
            .get(location)
            .send()
            .map_err(|source| EtlError::Http {
                url: location.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EtlError::Status {
                url: location.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(|source| EtlError::Http {
            url: location.to_string(),
            source,
        })?;

        debug!(url = location, bytes = body.len(), "downloaded");
        Ok(body.to_vec())
    }
}

// ============================================================================
// LOCAL FILES
// ============================================================================

/// Reads `file://` URLs and plain paths
pub struct FileFetcher;

impl FileFetcher {
    fn resolve(location: &str) -> PathBuf {
        Url::parse(location)
            .ok()
            .filter(|url| url.scheme() == "file")
            .and_then(|url| url.to_file_path().ok())
            .unwrap_or_else(|| PathBuf::from(location))
    }
}

impl Fetcher for FileFetcher {
    fn fetch(&self, location: &str) -> EtlResult<Vec<u8>> {
        let path = Self::resolve(location);
        std::fs::read(&path).map_err(|source| EtlError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}

// ============================================================================
// DISPATCH BY SCHEME
// ============================================================================

/// http/https go over the network, everything else is read from disk
#[derive(Default)]
pub struct AnyFetcher {
    http: HttpFetcher,
}

impl AnyFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

fn is_http(location: &str) -> bool {
    Url::parse(location)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

impl Fetcher for AnyFetcher {
    fn fetch(&self, location: &str) -> EtlResult<Vec<u8>> {
        if is_http(location) {
            self.http.fetch(location)
        } else {
            FileFetcher.fetch(location)
        }
    }
}
