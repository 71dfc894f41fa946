// SPDX-License-Identifier: MIT

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use tempfile::{tempdir, TempDir};

fn get_test_file(filename: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

    path.push("tests");
    path.push("resources");
    path.push(filename);

    path
}

pub fn prepare_test_file(filename: &str) -> Result<(PathBuf, TempDir)> {
    let directory = tempdir()?;

    let destination_file: PathBuf = directory.path().join(filename);

    fs::copy(get_test_file(filename), &destination_file)?;

    Ok((destination_file, directory))
}
