//! Script front end: chunked reading, line tokenizing and command interpretation.

pub(crate) mod commands;
pub(crate) mod factory;
pub(crate) mod reader;
pub(crate) mod tokenizer;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::ScriptResult;
use crate::script::factory::ContextFactory;
use crate::script::reader::{DEFAULT_CHUNK_SIZE, ScriptReader};

/// Parse a script from `r`, stopping at the first fatal command error.
pub fn parse_reader<R: Read>(r: R) -> ScriptResult<ContextFactory> {
    parse_reader_with_chunk_size(r, DEFAULT_CHUNK_SIZE)
}

/// Like [`parse_reader`], reading `chunk_size` bytes at a time.
#[tracing::instrument(skip(r))]
pub fn parse_reader_with_chunk_size<R: Read>(
    r: R,
    chunk_size: usize,
) -> ScriptResult<ContextFactory> {
    let mut reader = ScriptReader::with_chunk_size(r, chunk_size);
    let mut factory = ContextFactory::new();
    for record in reader.by_ref() {
        factory.run(&record?)?;
    }
    tracing::debug!(
        lines = reader.lines_seen(),
        diagnostics = factory.diagnostics().len(),
        "script parsed"
    );
    Ok(factory)
}

/// Parse an in-memory script.
pub fn parse_str(src: &str) -> ScriptResult<ContextFactory> {
    parse_reader(src.as_bytes())
}

/// Parse the script file at `path`.
pub fn parse_path(path: impl AsRef<Path>) -> ScriptResult<ContextFactory> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open script '{}'", path.display()))?;
    parse_reader(f)
}
