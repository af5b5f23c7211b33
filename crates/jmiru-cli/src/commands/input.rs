//! Reading command input from files or stdin.

use std::fs;
use std::io::{self, Read};

use jmiru_engine::split_blocks;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Error reading {path}: {source}")]
    File { path: String, source: io::Error },
    #[error("Error reading stdin: {0}")]
    Stdin(io::Error),
}

pub fn read_file(path: &str) -> Result<String, InputError> {
    fs::read_to_string(path).map_err(|source| InputError::File {
        path: path.to_string(),
        source,
    })
}

pub fn read_stdin() -> Result<String, InputError> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(InputError::Stdin)?;
    Ok(buf)
}

/// Read `path`, or stdin when `None`.
pub fn read_file_or_stdin(path: Option<&str>) -> Result<String, InputError> {
    match path {
        Some(p) => read_file(p),
        None => read_stdin(),
    }
}

/// Blocks from every file in order, each file split on `divider`.
pub fn blocks_from_files(files: &[String], divider: &str) -> Result<Vec<String>, InputError> {
    let mut blocks = Vec::new();
    for path in files {
        let content = read_file(path)?;
        blocks.extend(split_blocks(&content, divider).into_iter().map(String::from));
    }
    Ok(blocks)
}

/// Blocks from `files`, or from stdin when no file is given.
pub fn read_blocks(files: &[String], divider: &str) -> Result<Vec<String>, InputError> {
    if files.is_empty() {
        let content = read_stdin()?;
        return Ok(split_blocks(&content, divider)
            .into_iter()
            .map(String::from)
            .collect());
    }
    blocks_from_files(files, divider)
}
