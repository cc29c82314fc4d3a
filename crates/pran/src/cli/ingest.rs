//! JSON-lines document input for `pran ingest`
//!
//! One object per line: `{"content": "...", "metadata": {...}}`. The content
//! key may also be spelled `text`. Blank lines are skipped.

use std::io::BufRead;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use pran_domain::value_objects::{Document, Metadata};

#[derive(Debug, Deserialize)]
struct DocumentLine {
    #[serde(alias = "text")]
    content: String,
    #[serde(default)]
    metadata: Metadata,
}

/// Parse every document of a JSON-lines stream
///
/// Fails on the first malformed or invalid line, naming its line number.
pub fn read_documents<R: BufRead>(reader: R) -> Result<Vec<Document>> {
    let mut documents = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("Failed to read line {line_no}"))?;
        if line.trim().is_empty() {
            continue;
        }
        let parsed: DocumentLine = serde_json::from_str(&line)
            .with_context(|| format!("Line {line_no} is not a document object"))?;
        let document = Document::with_metadata_map(parsed.content, parsed.metadata);
        document
            .validate()
            .with_context(|| format!("Line {line_no} holds an invalid document"))?;
        documents.push(document);
    }
    if documents.is_empty() {
        bail!("No documents found in input");
    }
    Ok(documents)
}
