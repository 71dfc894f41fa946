// SPDX-License-Identifier: MIT

//! Video metadata from the downloader's JSON dump.

use serde::{Deserialize, Serialize};

use crate::{downloader::MetadataDumper, pipeline_error::PipelineError};

/// Metadata of a single video, as reported by the downloader.
///
/// The named fields are the ones consumed by the tag writer; a missing field
/// fails the parse instead of being defaulted. All remaining downloader fields
/// are retained in `extra` so a dump can be printed back losslessly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: String,

    pub channel: String,

    /// `YYYYMMDD`.
    pub upload_date: String,

    pub webpage_url: String,

    pub description: String,

    pub thumbnail: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A parsed metadata dump.
///
/// The downloader emits one JSON object for a single video and one object per
/// line for a playlist. Playlist order follows the emission order.
#[derive(Debug, Clone)]
pub enum MetadataDump {
    Single(VideoMetadata),
    Playlist(Vec<VideoMetadata>),
}

/// Fetches the metadata for a URL through the downloader.
pub fn fetch_metadata(
    dumper: &dyn MetadataDumper,
    url: &str,
) -> Result<MetadataDump, PipelineError> {
    let raw = dumper.dump_metadata(url)?;

    parse_metadata_dump(url, &raw)
}

/// Parses the raw bytes of a metadata dump.
///
/// The bytes are first parsed as one JSON document. When that fails
/// syntactically the dump is assumed to be the one-object-per-line playlist
/// shape, which is not valid JSON as a whole, and is repaired into an array
/// before a second parse. A document that is valid JSON but does not carry the
/// required fields fails without entering the repair stage.
pub fn parse_metadata_dump(url: &str, raw: &[u8]) -> Result<MetadataDump, PipelineError> {
    match serde_json::from_slice::<serde_json::Value>(raw) {
        Ok(value) => serde_json::from_value(value)
            .map(MetadataDump::Single)
            .map_err(|error| parse_failed(url, &error)),

        Err(_) => {
            let repaired = repair_concatenated_objects(raw);

            serde_json::from_slice::<Vec<VideoMetadata>>(&repaired)
                .map(MetadataDump::Playlist)
                .map_err(|error| parse_failed(url, &error))
        }
    }
}

fn parse_failed(url: &str, error: &serde_json::Error) -> PipelineError {
    PipelineError::MetadataParseFailed {
        url: url.to_string(),
        cause: error.to_string(),
    }
}

/// Turns a one-object-per-line stream into a JSON array.
///
/// Object boundaries `}\n{` become element separators and a trailing `}\n`
/// loses its newline before the whole stream is wrapped in brackets.
fn repair_concatenated_objects(raw: &[u8]) -> Vec<u8> {
    let separated = replace_bytes(raw, b"}\n{", b"},{");
    let trimmed = replace_bytes(&separated, b"}\n", b"}");

    let mut repaired = Vec::with_capacity(trimmed.len() + 2);

    repaired.push(b'[');
    repaired.extend_from_slice(&trimmed);
    repaired.push(b']');

    repaired
}

fn replace_bytes(haystack: &[u8], needle: &[u8], replacement: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(haystack.len());
    let mut position = 0;

    while position < haystack.len() {
        if haystack[position..].starts_with(needle) {
            result.extend_from_slice(replacement);
            position += needle.len();
        } else {
            result.push(haystack[position]);
            position += 1;
        }
    }

    result
}
