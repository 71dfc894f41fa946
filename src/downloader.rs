// SPDX-License-Identifier: MIT

//! Adapter for the external `yt-dlp` downloader.

use std::{
    ffi::OsString,
    fs::create_dir_all,
    path::{Path, PathBuf},
    process::Command,
};

use log::debug;
use which::which;

use crate::pipeline_error::PipelineError;

/// The downloader command that is resolved on PATH.
pub const DOWNLOADER_COMMAND: &str = "yt-dlp";

/// The default output template.
///
/// Placeholders are resolved by the downloader, never by this crate.
pub const DEFAULT_OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

/// Dumps the downloader's JSON metadata for a URL.
#[cfg_attr(test, mockall::automock)]
pub trait MetadataDumper {
    fn dump_metadata(&self, url: &str) -> Result<Vec<u8>, PipelineError>;
}

/// Invokes the external downloader.
///
/// The program path is resolved once at construction and passed around
/// explicitly instead of living in a process-wide constant.
pub struct Downloader {
    program: PathBuf,
}

impl Downloader {
    /// Resolves the downloader on PATH.
    pub fn locate() -> Result<Self, PipelineError> {
        match which(DOWNLOADER_COMMAND) {
            Ok(program) => Ok(Downloader { program }),

            Err(error) => Err(PipelineError::DownloaderNotFound {
                command: DOWNLOADER_COMMAND.to_string(),
                error,
            }),
        }
    }

    /// Uses an explicit program path instead of resolving PATH.
    pub fn with_program<P: Into<PathBuf>>(program: P) -> Self {
        Downloader {
            program: program.into(),
        }
    }

    /// Downloads the audio of a video with metadata embedded by the downloader.
    ///
    /// One or more media files are written under `output_template`.
    pub fn run_download(&self, url: &str, output_template: &Path) -> Result<(), PipelineError> {
        debug!("Downloads audio for {url} to {output_template:?}");

        prepare_output_directory(output_template)?;

        let mut command = Command::new(&self.program);
        command
            .args(download_arguments(output_template))
            .arg(url);

        run_for_status(&mut command, url)
    }

    /// Dumps the metadata of a video as raw JSON bytes.
    ///
    /// Nothing is written to disk.
    pub fn run_metadata_dump(&self, url: &str) -> Result<Vec<u8>, PipelineError> {
        let mut command = Command::new(&self.program);
        command.arg("--dump-json").arg(url);

        debug!("Dumps metadata for {url}");

        let output = command
            .output()
            .map_err(|error| PipelineError::DownloaderCannotBeExecuted {
                url: url.to_string(),
                error,
            })?;

        if output.status.success() {
            Ok(output.stdout)
        } else {
            Err(PipelineError::DownloadFailed {
                url: url.to_string(),
                status: output.status,
            })
        }
    }

    /// Writes only the thumbnail of a video, skipping the media download.
    pub fn run_thumbnail_only(
        &self,
        url: &str,
        output_template: &Path,
    ) -> Result<(), PipelineError> {
        debug!("Writes thumbnail for {url} to {output_template:?}");

        prepare_output_directory(output_template)?;

        let mut command = Command::new(&self.program);
        command
            .args(thumbnail_arguments(output_template))
            .arg(url);

        run_for_status(&mut command, url)
    }
}

impl MetadataDumper for Downloader {
    fn dump_metadata(&self, url: &str) -> Result<Vec<u8>, PipelineError> {
        self.run_metadata_dump(url)
    }
}

fn download_arguments(output_template: &Path) -> Vec<OsString> {
    vec![
        OsString::from("--embed-thumbnail"),
        OsString::from("--add-metadata"),
        OsString::from("--extract-audio"),
        OsString::from("-o"),
        output_template.into(),
    ]
}

fn thumbnail_arguments(output_template: &Path) -> Vec<OsString> {
    vec![
        OsString::from("--write-thumbnail"),
        OsString::from("--skip-download"),
        OsString::from("-o"),
        output_template.into(),
    ]
}

fn prepare_output_directory(output_template: &Path) -> Result<(), PipelineError> {
    let Some(parent) = output_template.parent() else {
        return Ok(());
    };

    if parent.as_os_str().is_empty() {
        return Ok(());
    }

    create_dir_all(parent).map_err(|error| PipelineError::IoError { error })
}

fn run_for_status(command: &mut Command, url: &str) -> Result<(), PipelineError> {
    let result = command.status();

    match result {
        Ok(exit_status) => {
            if exit_status.success() {
                Ok(())
            } else {
                Err(PipelineError::DownloadFailed {
                    url: url.to_string(),
                    status: exit_status,
                })
            }
        }
        Err(error) => Err(PipelineError::DownloaderCannotBeExecuted {
            url: url.to_string(),
            error,
        }),
    }
}
