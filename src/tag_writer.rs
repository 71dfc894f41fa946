// SPDX-License-Identifier: MIT

mod common;
mod mp3;
mod mp4;
mod opus;

use std::path::Path;

use crate::{
    metadata::VideoMetadata, pipeline_error::PipelineError, thumbnail::ThumbnailFetcher,
};

use self::{mp3::Mp3TagStrategy, mp4::Mp4TagStrategy, opus::OpusTagStrategy};

pub type FactoryResult<E> = std::result::Result<Box<E>, PipelineError>;

/// Writes metadata fields and an optional cover into one tag container format.
pub trait TagStrategy {
    fn write(
        &self,
        file: &Path,
        metadata: &VideoMetadata,
        thumbnails: &dyn ThumbnailFetcher,
    ) -> Result<(), PipelineError>;
}

struct StrategyGenerator {
    is_file: fn(&Path) -> bool,
    create_strategy: fn() -> Box<dyn TagStrategy>,
}

/// The closed set of supported tag container formats.
pub struct Strategies {
    generators: Vec<StrategyGenerator>,
}

impl Strategies {
    pub fn new() -> Self {
        Strategies {
            generators: vec![
                StrategyGenerator {
                    is_file: |file| mp4::is_m4a(file),
                    create_strategy: || Box::new(Mp4TagStrategy),
                },
                StrategyGenerator {
                    is_file: |file| mp3::is_mp3(file),
                    create_strategy: || Box::new(Mp3TagStrategy),
                },
                StrategyGenerator {
                    is_file: |file| opus::is_opus(file),
                    create_strategy: || Box::new(OpusTagStrategy),
                },
            ],
        }
    }

    /// Selects the strategy for a file strictly by its extension.
    pub fn create_strategy(&self, file: &Path) -> FactoryResult<dyn TagStrategy> {
        for generator in self.generators.iter() {
            if (generator.is_file)(file) {
                return Ok((generator.create_strategy)());
            }
        }

        Err(PipelineError::UnsupportedFormat {
            extension: extension_of(file),
        })
    }
}

impl Default for Strategies {
    fn default() -> Self {
        Strategies::new()
    }
}

/// Writes the descriptive tags of a metadata record into an audio file.
///
/// The file must exist and carry a supported extension before any tag library
/// call is made. Every written field is a verbatim copy of a metadata field.
pub fn write_tags(
    file: &Path,
    metadata: &VideoMetadata,
    thumbnails: &dyn ThumbnailFetcher,
) -> Result<(), PipelineError> {
    if !file.is_file() {
        return Err(PipelineError::NotFile {
            path: file.to_path_buf(),
        });
    }

    let strategy = Strategies::new().create_strategy(file)?;

    strategy.write(file, metadata, thumbnails)
}

fn extension_of(file: &Path) -> String {
    file.extension()
        .map(|extension| extension.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default()
}
