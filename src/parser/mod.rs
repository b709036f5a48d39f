//! Parser module: splits source text into comment blocks and turns each
//! block into a [`DocRecord`].

pub mod annotation;
pub mod command;
pub mod identifier;
pub mod splitter;

use crate::model::{DocRecord, Document};
use splitter::CommentBlock;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Where text before the first `@command` in a block goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LeadingText {
    /// Space-joined into a single brief
    #[default]
    Brief,
    /// One description line per source line
    Description,
}

/// Knobs for a parse run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Accept `a.b.c` member paths as a record name
    pub dotted_names: bool,
    pub leading_text: LeadingText,
    /// Report empty `@brief`, `@description` and `@feature` as parse
    /// failures, keep the brief on a bare `@type`, and drop the unused
    /// leading seed
    pub strict: bool,
}

/// Failure to load a source file. Only the file concerned is skipped.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path} is not valid UTF-8")]
    Encoding { path: PathBuf },
}

/// Read a source file as UTF-8 text.
pub fn read_source(path: &Path) -> Result<String, SourceError> {
    let bytes = fs::read(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|_| SourceError::Encoding {
        path: path.to_path_buf(),
    })
}

/// Parse every doc comment block in `input`, in source order.
pub fn parse(input: &str, options: &ParseOptions) -> Vec<DocRecord> {
    let input = input.replace("\r\n", "\n");
    let blocks = splitter::split(&input);
    tracing::debug!(blocks = blocks.len(), "split source into comment blocks");

    blocks
        .iter()
        .map(|block| parse_block(block, options))
        .collect()
}

/// Build the record for a single comment block.
pub fn parse_block(block: &CommentBlock<'_>, options: &ParseOptions) -> DocRecord {
    let mut record = DocRecord {
        name: identifier::first_identifier(block.code, options.dotted_names).map(str::to_string),
        ..Default::default()
    };

    for line in annotation::group(block.body, block.indent, options) {
        command::apply(&mut record, &line, options);
    }

    tracing::trace!(
        name = record.display_name(),
        params = record.params.len(),
        warnings = record.diagnostics.len(),
        "parsed comment block"
    );
    record
}

/// Parse a whole file and attach the file context renderers need.
pub fn parse_document(path: &Path, content: &str, options: &ParseOptions) -> Document {
    Document {
        title: path.file_stem().map(|s| s.to_string_lossy().to_string()),
        source_file: Some(path.to_string_lossy().to_string()),
        records: parse(content, options),
    }
}
