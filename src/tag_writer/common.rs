// SPDX-License-Identifier: MIT

use std::{fs, io::Write, path::Path};

use lofty::{
    config::WriteOptions,
    picture::{MimeType, Picture, PictureType},
    prelude::{Accessor, TagExt, TaggedFileExt},
    tag::{ItemKey, Tag, TagType},
};
use tempfile::NamedTempFile;

use crate::{
    metadata::VideoMetadata, pipeline_error::PipelineError, thumbnail::ThumbnailFetcher,
};

pub fn has_extension<P: AsRef<Path>>(extension: &str, file: P) -> bool {
    match file.as_ref().extension() {
        Some(file_extension) => file_extension.eq_ignore_ascii_case(extension),
        None => false,
    }
}

/// The MIME type is decided by the URL's extension alone, without sniffing the
/// fetched bytes.
pub fn mime_type_for_url(url: &str) -> MimeType {
    if url.ends_with(".jpg") || url.ends_with(".jpeg") {
        MimeType::Jpeg
    } else {
        MimeType::Png
    }
}

/// Copies the metadata fields into a tag.
///
/// The per-container key names are resolved by the tag library; the upload
/// date is written in full `YYYYMMDD` form for every container.
pub fn apply_fields(tag: &mut Tag, metadata: &VideoMetadata) {
    tag.set_title(metadata.title.clone());
    tag.set_artist(metadata.channel.clone());
    tag.insert_text(ItemKey::RecordingDate, metadata.upload_date.clone());
    tag.insert_text(ItemKey::Comment, metadata.webpage_url.clone());
    tag.insert_text(ItemKey::Description, metadata.description.clone());
}

/// Fetches the thumbnail and builds the cover picture.
///
/// The bytes pass through a scratch file scoped to this invocation, so
/// concurrent runs cannot end up with swapped covers.
pub fn fetch_cover(
    file: &Path,
    metadata: &VideoMetadata,
    thumbnails: &dyn ThumbnailFetcher,
) -> Result<Picture, PipelineError> {
    let bytes = thumbnails.fetch(&metadata.thumbnail)?;

    let mut scratch =
        NamedTempFile::new().map_err(|error| tag_write_failed(file, "cover scratch", error))?;

    scratch
        .write_all(&bytes)
        .map_err(|error| tag_write_failed(file, "cover scratch", error))?;

    let data = fs::read(scratch.path())
        .map_err(|error| tag_write_failed(file, "cover scratch", error))?;

    Ok(Picture::new_unchecked(
        PictureType::CoverFront,
        Some(mime_type_for_url(&metadata.thumbnail)),
        None,
        data,
    ))
}

/// Replaces every embedded picture with the single cover.
pub fn set_cover(tag: &mut Tag, cover: Picture) {
    while !tag.pictures().is_empty() {
        tag.remove_picture(0);
    }

    tag.push_picture(cover);
}

/// Applies the fields and the optional cover, then saves the tag back to the
/// file.
///
/// The file on disk is only touched by the final save; a failure before it
/// leaves the file as it was.
pub fn write_with_tag_type(
    tag_type: TagType,
    file: &Path,
    metadata: &VideoMetadata,
    cover: Option<Picture>,
) -> Result<(), PipelineError> {
    let tagged_file =
        lofty::read_from_path(file).map_err(|error| tag_write_failed(file, "read", error))?;

    let mut tag = tagged_file
        .tag(tag_type)
        .cloned()
        .unwrap_or_else(|| Tag::new(tag_type));

    apply_fields(&mut tag, metadata);

    if let Some(cover) = cover {
        set_cover(&mut tag, cover);
    }

    tag.save_to_path(file, WriteOptions::default())
        .map_err(|error| tag_write_failed(file, "save", error))
}

fn tag_write_failed<E: ToString>(file: &Path, step: &'static str, error: E) -> PipelineError {
    PipelineError::TagWriteFailed {
        path: file.to_path_buf(),
        step,
        cause: error.to_string(),
    }
}
