// SPDX-License-Identifier: MIT

//! Thumbnail fetching over HTTP.

use log::debug;

use crate::pipeline_error::PipelineError;

/// Fetches thumbnail bytes from a URL.
#[cfg_attr(test, mockall::automock)]
pub trait ThumbnailFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, PipelineError>;
}

/// Fetches a thumbnail with a plain blocking GET.
///
/// No caching and no retry; a non-2xx response or a transport failure is an
/// error.
pub struct HttpThumbnailFetcher;

impl ThumbnailFetcher for HttpThumbnailFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, PipelineError> {
        debug!("Fetches thumbnail from {url}");

        let fetch_failed = |error: reqwest::Error| PipelineError::ThumbnailFetchFailed {
            url: url.to_string(),
            cause: error.to_string(),
        };

        let response = reqwest::blocking::get(url)
            .map_err(fetch_failed)?
            .error_for_status()
            .map_err(fetch_failed)?;

        let bytes = response.bytes().map_err(fetch_failed)?;

        Ok(bytes.to_vec())
    }
}
