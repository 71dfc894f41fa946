// SPDX-License-Identifier: MIT

use std::process::exit;

use clap::Parser;
use log::error;

use youtube_music_metadata::log_config::{self, LogConfig};
use youtube_music_metadata::pipeline::{self, Setting};
use youtube_music_metadata::pipeline_error::PipelineError;

fn main() {
    let setting = Setting::parse();

    let config = match setting.log_config.as_deref().map(LogConfig::load).transpose() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{error}");
            exit(1);
        }
    };

    if let Err(error) = log_config::initialize_logging(config.as_ref()) {
        eprintln!("{error}");
        exit(1);
    }

    let result = pipeline::run(&setting);

    if let Err(error) = result {
        match &error {
            PipelineError::DownloadFailed { url, status } => {
                error!("The downloader failed for url `{url}` with {status}.");
            }
            PipelineError::MetadataParseFailed { url, cause } => {
                error!("Metadata for url `{url}` could not be parsed. Detail: {cause}");
            }
            PipelineError::ThumbnailFetchFailed { url, cause } => {
                error!("The thumbnail at `{url}` could not be fetched. Detail: {cause}");
            }
            PipelineError::UnsupportedFormat { extension } => {
                error!("Unsupported file format: `{extension}`.");
            }
            PipelineError::TagWriteFailed { path, step, cause } => {
                error!("Tags could not be written to {path:?} ({step}). Detail: {cause}");
            }
            error => {
                error!("{error}");
            }
        }

        exit(1);
    }
}
