// SPDX-License-Identifier: MIT

//! A tag strategy for Opus files.

use std::path::Path;

use lofty::tag::TagType;
use log::warn;

use crate::{
    metadata::VideoMetadata, pipeline_error::PipelineError, thumbnail::ThumbnailFetcher,
};

use super::{common, TagStrategy};

/// Whether a file is an Opus file.
pub fn is_opus<P: AsRef<Path>>(file: P) -> bool {
    common::has_extension("opus", file)
}

/// Writes the metadata into the Vorbis comment header.
///
/// Cover art embedding is an open gap for this container and is skipped.
pub struct OpusTagStrategy;

impl TagStrategy for OpusTagStrategy {
    fn write(
        &self,
        file: &Path,
        metadata: &VideoMetadata,
        _thumbnails: &dyn ThumbnailFetcher,
    ) -> Result<(), PipelineError> {
        warn!("Cover art embedding is not implemented for Opus files. {file:?} keeps its current pictures.");

        common::write_with_tag_type(TagType::VorbisComments, file, metadata, None)
    }
}
