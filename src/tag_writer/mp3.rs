// SPDX-License-Identifier: MIT

//! A tag strategy for MP3 files.

use std::path::Path;

use lofty::tag::TagType;

use crate::{
    metadata::VideoMetadata, pipeline_error::PipelineError, thumbnail::ThumbnailFetcher,
};

use super::{common, TagStrategy};

/// Whether a file is an MP3 file.
pub fn is_mp3<P: AsRef<Path>>(file: P) -> bool {
    common::has_extension("mp3", file)
}

/// Writes the metadata into an ID3v2 tag, with the thumbnail as the single
/// cover.
pub struct Mp3TagStrategy;

impl TagStrategy for Mp3TagStrategy {
    fn write(
        &self,
        file: &Path,
        metadata: &VideoMetadata,
        thumbnails: &dyn ThumbnailFetcher,
    ) -> Result<(), PipelineError> {
        let cover = common::fetch_cover(file, metadata, thumbnails)?;

        common::write_with_tag_type(TagType::Id3v2, file, metadata, Some(cover))
    }
}
