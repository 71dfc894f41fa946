// SPDX-License-Identifier: MIT

pub mod downloader;
pub mod log_config;
pub mod metadata;
pub mod pipeline;
pub mod pipeline_error;
pub mod tag_writer;
pub mod thumbnail;
