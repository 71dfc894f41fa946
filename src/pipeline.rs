// SPDX-License-Identifier: MIT

//! This module has the function that is called by the main function.

use std::path::{Path, PathBuf};

use clap::Parser;
use log::{debug, info};

use crate::{
    downloader::{Downloader, DEFAULT_OUTPUT_TEMPLATE},
    metadata::{self, MetadataDump, VideoMetadata},
    pipeline_error::PipelineError,
    tag_writer,
    thumbnail::HttpThumbnailFetcher,
};

/// The struct for setting.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = "Download audio from YouTube videos with embedded metadata using yt-dlp."
)]
pub struct Setting {
    #[arg(help = "URL of the YouTube video or playlist.")]
    url: String,

    #[arg(
        long,
        value_name = "TEMPLATE",
        help = "Output path template. Placeholders such as %(title)s are resolved by the \
                downloader. Defaults to %(title)s.%(ext)s in the working directory."
    )]
    output_file_path: Option<PathBuf>,

    #[arg(
        long,
        help = "Do not write tags to the downloaded file after the download."
    )]
    no_m4a_metadata: bool,

    #[arg(
        long,
        help = "Only fetch and print the metadata of the video without downloading it."
    )]
    metadata_only: bool,

    #[arg(long, help = "Download the thumbnail of the video.")]
    download_thumbnail: bool,

    #[arg(
        long,
        value_name = "FILE",
        help = "Write tags to an existing audio file, dispatching on its extension."
    )]
    set_m4a_metadata: Option<PathBuf>,

    #[arg(
        long,
        value_name = "FILE",
        help = "Path to a JSON logging configuration file."
    )]
    pub log_config: Option<PathBuf>,
}

#[cfg_attr(test, mockall::automock)]
trait PipelineRunner {
    fn download(&self, url: &str, output_template: &Path) -> Result<(), PipelineError>;

    fn download_thumbnail(&self, url: &str, output_template: &Path)
        -> Result<(), PipelineError>;

    fn fetch_metadata(&self, url: &str) -> Result<MetadataDump, PipelineError>;

    fn write_tags(&self, file: &Path, metadata: &VideoMetadata) -> Result<(), PipelineError>;
}

struct Pipeline {
    downloader: Downloader,
}

impl PipelineRunner for Pipeline {
    fn download(&self, url: &str, output_template: &Path) -> Result<(), PipelineError> {
        self.downloader.run_download(url, output_template)
    }

    fn download_thumbnail(
        &self,
        url: &str,
        output_template: &Path,
    ) -> Result<(), PipelineError> {
        self.downloader.run_thumbnail_only(url, output_template)
    }

    fn fetch_metadata(&self, url: &str) -> Result<MetadataDump, PipelineError> {
        metadata::fetch_metadata(&self.downloader, url)
    }

    fn write_tags(&self, file: &Path, metadata: &VideoMetadata) -> Result<(), PipelineError> {
        tag_writer::write_tags(file, metadata, &HttpThumbnailFetcher)
    }
}

/// Runs the operation selected by the setting.
pub fn run(setting: &Setting) -> Result<(), PipelineError> {
    let downloader = Downloader::locate()?;

    run_on_runner(setting, Pipeline { downloader })
}

fn run_on_runner<T: PipelineRunner>(setting: &Setting, runner: T) -> Result<(), PipelineError> {
    if setting.metadata_only {
        info!("Fetches metadata.");

        let dump = runner.fetch_metadata(&setting.url)?;

        print_metadata(&dump)?;

        return Ok(());
    }

    if setting.download_thumbnail {
        info!("Downloads the thumbnail.");

        runner.download_thumbnail(&setting.url, &output_template(setting))?;

        info!("Completed.");

        return Ok(());
    }

    if let Some(file) = &setting.set_m4a_metadata {
        info!("Writes tags to {file:?}.");

        let metadata = single_video(&setting.url, runner.fetch_metadata(&setting.url)?)?;

        runner.write_tags(file, &metadata)?;

        info!("Completed.");

        return Ok(());
    }

    info!("Downloads audio with embedded metadata.");

    let template = output_template(setting);

    runner.download(&setting.url, &template)?;

    if !setting.no_m4a_metadata {
        if let Some(file) = concrete_output_file(&template) {
            info!("Writes tags to {file:?}.");

            let metadata = single_video(&setting.url, runner.fetch_metadata(&setting.url)?)?;

            runner.write_tags(file, &metadata)?;
        } else {
            debug!(
                "The output template contains placeholders; tags were embedded by the downloader."
            );
        }
    }

    info!("Completed.");

    Ok(())
}

fn output_template(setting: &Setting) -> PathBuf {
    setting
        .output_file_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_TEMPLATE))
}

/// A template without downloader placeholders names a concrete file that can
/// be tagged after the download.
fn concrete_output_file(template: &Path) -> Option<&Path> {
    if template.to_string_lossy().contains("%(") {
        return None;
    }

    template.is_file().then_some(template)
}

fn single_video(url: &str, dump: MetadataDump) -> Result<VideoMetadata, PipelineError> {
    match dump {
        MetadataDump::Single(metadata) => Ok(metadata),

        MetadataDump::Playlist(_) => Err(PipelineError::MetadataParseFailed {
            url: url.to_string(),
            cause: "expected a single video but the downloader returned a playlist".to_string(),
        }),
    }
}

fn print_metadata(dump: &MetadataDump) -> Result<(), PipelineError> {
    let json = match dump {
        MetadataDump::Single(metadata) => serde_json::to_string_pretty(metadata),
        MetadataDump::Playlist(videos) => serde_json::to_string_pretty(videos),
    }
    .map_err(|error| PipelineError::IoError {
        error: error.into(),
    })?;

    println!("{json}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;

    const URL: &str = "https://example.com/v";

    fn setting() -> Setting {
        Setting {
            url: URL.to_string(),
            output_file_path: None,
            no_m4a_metadata: false,
            metadata_only: false,
            download_thumbnail: false,
            set_m4a_metadata: None,
            log_config: None,
        }
    }

    fn video_metadata() -> VideoMetadata {
        VideoMetadata {
            title: "Song A".to_string(),
            channel: "Artist X".to_string(),
            upload_date: "20230115".to_string(),
            webpage_url: URL.to_string(),
            description: "desc".to_string(),
            thumbnail: "https://example.com/cover.jpg".to_string(),
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn metadata_only_fetches_without_downloading() {
        let mut runner = MockPipelineRunner::new();
        runner
            .expect_fetch_metadata()
            .with(eq(URL))
            .times(1)
            .returning(|_| Ok(MetadataDump::Single(video_metadata())));
        runner.expect_download().never();
        runner.expect_write_tags().never();

        let setting = Setting {
            metadata_only: true,
            ..setting()
        };

        run_on_runner(&setting, runner).unwrap();
    }

    #[test]
    fn thumbnail_mode_only_writes_the_thumbnail() {
        let mut runner = MockPipelineRunner::new();
        runner
            .expect_download_thumbnail()
            .withf(|url, template| url == URL && template == Path::new(DEFAULT_OUTPUT_TEMPLATE))
            .times(1)
            .returning(|_, _| Ok(()));
        runner.expect_download().never();
        runner.expect_fetch_metadata().never();

        let setting = Setting {
            download_thumbnail: true,
            ..setting()
        };

        run_on_runner(&setting, runner).unwrap();
    }

    #[test]
    fn tagging_an_existing_file_fetches_metadata_first() {
        let mut runner = MockPipelineRunner::new();
        runner
            .expect_fetch_metadata()
            .with(eq(URL))
            .times(1)
            .returning(|_| Ok(MetadataDump::Single(video_metadata())));
        runner
            .expect_write_tags()
            .withf(|file, metadata| {
                file == Path::new("track.m4a") && metadata.title == "Song A"
            })
            .times(1)
            .returning(|_, _| Ok(()));
        runner.expect_download().never();

        let setting = Setting {
            set_m4a_metadata: Some(PathBuf::from("track.m4a")),
            ..setting()
        };

        run_on_runner(&setting, runner).unwrap();
    }

    #[test]
    fn tagging_an_existing_file_rejects_a_playlist_dump() {
        let mut runner = MockPipelineRunner::new();
        runner
            .expect_fetch_metadata()
            .returning(|_| Ok(MetadataDump::Playlist(vec![video_metadata()])));
        runner.expect_write_tags().never();

        let setting = Setting {
            set_m4a_metadata: Some(PathBuf::from("track.m4a")),
            ..setting()
        };

        let result = run_on_runner(&setting, runner);

        assert!(matches!(
            result,
            Err(PipelineError::MetadataParseFailed { .. })
        ));
    }

    #[test]
    fn download_with_placeholder_template_leaves_tagging_to_the_downloader() {
        let mut runner = MockPipelineRunner::new();
        runner
            .expect_download()
            .withf(|url, template| url == URL && template == Path::new(DEFAULT_OUTPUT_TEMPLATE))
            .times(1)
            .returning(|_, _| Ok(()));
        runner.expect_fetch_metadata().never();
        runner.expect_write_tags().never();

        run_on_runner(&setting(), runner).unwrap();
    }

    #[test]
    fn download_without_tagging_when_disabled() {
        let mut runner = MockPipelineRunner::new();
        runner.expect_download().times(1).returning(|_, _| Ok(()));
        runner.expect_fetch_metadata().never();
        runner.expect_write_tags().never();

        let setting = Setting {
            no_m4a_metadata: true,
            output_file_path: Some(PathBuf::from("does-not-exist.m4a")),
            ..setting()
        };

        run_on_runner(&setting, runner).unwrap();
    }

    #[test]
    fn print_metadata_handles_both_dump_shapes() {
        print_metadata(&MetadataDump::Single(video_metadata())).unwrap();
        print_metadata(&MetadataDump::Playlist(vec![video_metadata()])).unwrap();
    }

    #[test]
    fn download_failure_stops_the_pipeline() {
        let mut runner = MockPipelineRunner::new();
        runner.expect_download().times(1).returning(|url, _| {
            Err(PipelineError::MetadataParseFailed {
                url: url.to_string(),
                cause: "failed".to_string(),
            })
        });
        runner.expect_fetch_metadata().never();
        runner.expect_write_tags().never();

        let result = run_on_runner(&setting(), runner);

        assert!(result.is_err());
    }
}
