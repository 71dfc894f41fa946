// SPDX-License-Identifier: MIT

use anyhow::Result;

use youtube_music_metadata::metadata::{parse_metadata_dump, MetadataDump};
use youtube_music_metadata::pipeline_error::PipelineError;

const URL: &str = "https://example.com/v";

const SINGLE_VIDEO: &str = r#"{"title":"Song A","channel":"Artist X","upload_date":"20230115","webpage_url":"https://example.com/v","description":"desc","thumbnail":"https://example.com/cover.jpg"}"#;

#[test]
fn single_video_fields_are_unmodified() -> Result<()> {
    let dump = parse_metadata_dump(URL, SINGLE_VIDEO.as_bytes())?;

    let MetadataDump::Single(metadata) = dump else {
        panic!("expected a single video");
    };

    assert_eq!("Song A", metadata.title);
    assert_eq!("Artist X", metadata.channel);
    assert_eq!("20230115", metadata.upload_date);
    assert_eq!("https://example.com/v", metadata.webpage_url);
    assert_eq!("desc", metadata.description);
    assert_eq!("https://example.com/cover.jpg", metadata.thumbnail);

    Ok(())
}

#[test]
fn playlist_dump_is_parsed_in_emission_order() -> Result<()> {
    let entry = |title: &str| SINGLE_VIDEO.replace("Song A", title);
    let raw = format!("{}\n{}\n{}\n", entry("First"), entry("Second"), entry("Third"));

    let dump = parse_metadata_dump(URL, raw.as_bytes())?;

    let MetadataDump::Playlist(videos) = dump else {
        panic!("expected a playlist");
    };

    let titles: Vec<&str> = videos.iter().map(|video| video.title.as_str()).collect();

    assert_eq!(vec!["First", "Second", "Third"], titles);

    Ok(())
}

#[test]
fn unrecoverable_dump_is_a_parse_error() {
    let result = parse_metadata_dump(URL, b"<html>not json</html>");

    assert!(matches!(
        result,
        Err(PipelineError::MetadataParseFailed { url, .. }) if url == URL
    ));
}
