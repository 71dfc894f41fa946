// SPDX-License-Identifier: MIT

//! A tag strategy for MP4 (.m4a) files.

use std::path::Path;

use lofty::tag::TagType;

use crate::{
    metadata::VideoMetadata, pipeline_error::PipelineError, thumbnail::ThumbnailFetcher,
};

use super::{common, TagStrategy};

/// Whether a file is an M4A file.
pub fn is_m4a<P: AsRef<Path>>(file: P) -> bool {
    common::has_extension("m4a", file)
}

/// Writes the metadata into the MP4 ilst atom, with the thumbnail as the
/// single cover.
pub struct Mp4TagStrategy;

impl TagStrategy for Mp4TagStrategy {
    fn write(
        &self,
        file: &Path,
        metadata: &VideoMetadata,
        thumbnails: &dyn ThumbnailFetcher,
    ) -> Result<(), PipelineError> {
        let cover = common::fetch_cover(file, metadata, thumbnails)?;

        common::write_with_tag_type(TagType::Mp4Ilst, file, metadata, Some(cover))
    }
}
