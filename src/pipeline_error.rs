// SPDX-License-Identifier: MIT

use std::{path::PathBuf, process::ExitStatus};

use thiserror::Error;

/// Error about the download and tagging pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Downloader command {command} is not found: {error}")]
    DownloaderNotFound {
        command: String,
        error: which::Error,
    },

    #[error("Downloader cannot be executed for url `{url}`: {error}")]
    DownloaderCannotBeExecuted { url: String, error: std::io::Error },

    #[error("Downloader failed for url `{url}` with {status}")]
    DownloadFailed { url: String, status: ExitStatus },

    #[error("Metadata for url `{url}` could not be parsed: {cause}")]
    MetadataParseFailed { url: String, cause: String },

    #[error("Thumbnail could not be fetched from `{url}`: {cause}")]
    ThumbnailFetchFailed { url: String, cause: String },

    #[error("{path:?} is not a file.")]
    NotFile { path: PathBuf },

    #[error("Unsupported file format: `{extension}`")]
    UnsupportedFormat { extension: String },

    #[error("Tags could not be written to {path:?} ({step}): {cause}")]
    TagWriteFailed {
        path: PathBuf,
        step: &'static str,
        cause: String,
    },

    #[error("Invalid logging configuration {path:?}: {cause}")]
    ConfigError { path: PathBuf, cause: String },

    #[error("I/O error: {error}")]
    IoError { error: std::io::Error },
}
