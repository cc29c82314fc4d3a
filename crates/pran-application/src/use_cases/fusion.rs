//! Response Fusion Use Case
//!
//! Merges per-domain answers into one response. A single answer passes
//! through untouched. Several answers go through the model; afterwards every
//! `[Source: ...]` token of the inputs missing from the output is appended on
//! a trailing `Sources:` line. When the model call fails the answers are
//! concatenated with repeated lines removed.

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::{debug, warn};

use pran_domain::constants::FUSION_WORD_LIMIT;
use pran_domain::error::{Error, Result};
use pran_domain::ports::providers::{CompletionRequest, LanguageModel};
use pran_domain::value_objects::FusionInput;

use crate::prompts;

static CITATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[Source:[^\]]+\]").expect("Invalid regex"));

/// Citation tokens in order of first appearance, without duplicates
pub fn citations<'a>(texts: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    texts
        .into_iter()
        .flat_map(|text| CITATION.find_iter(text).map(|m| m.as_str()))
        .filter(|token| seen.insert(*token))
        .collect()
}

/// Append citations of `input` that `output` lost
pub fn restore_citations(input: &FusionInput, output: &str) -> String {
    let missing: Vec<&str> = citations(input.iter().map(|(_, answer)| answer))
        .into_iter()
        .filter(|token| !output.contains(token))
        .collect();
    if missing.is_empty() {
        return output.to_string();
    }
    debug!(restored = missing.len(), "Restoring dropped citations");
    format!("{}\n\nSources: {}", output.trim_end(), missing.join(" "))
}

/// Concatenate answers, skipping lines already emitted by an earlier answer
pub fn concatenate_distinct(input: &FusionInput) -> String {
    let mut seen: HashSet<String> = HashSet::new();
    let mut blocks = Vec::with_capacity(input.len());
    for (_, answer) in input.iter() {
        let lines: Vec<&str> = answer
            .lines()
            .filter(|line| {
                let key = line.trim().to_lowercase();
                key.is_empty() || seen.insert(key)
            })
            .collect();
        let block = lines.join("\n").trim().to_string();
        if !block.is_empty() {
            blocks.push(block);
        }
    }
    blocks.join("\n\n")
}

/// Model-backed fusion of domain answers
pub struct ResponseFusion {
    model: Arc<dyn LanguageModel>,
    word_limit: usize,
}

impl ResponseFusion {
    /// Create a fusion step with the default word limit
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self {
            model,
            word_limit: FUSION_WORD_LIMIT,
        }
    }

    /// Merge the answers into one response
    ///
    /// Fails with [`Error::NothingToSynthesize`] for an empty input.
    pub async fn fuse(&self, query: &str, input: &FusionInput) -> Result<String> {
        let mut answers = input.iter();
        let (first, second) = (answers.next(), answers.next());
        match (first, second) {
            (None, _) => return Err(Error::NothingToSynthesize),
            (Some((intent, answer)), None) => {
                debug!(intent = %intent, "Single answer, fusion is a pass-through");
                return Ok(answer.to_string());
            }
            _ => {}
        }

        let formatted = input
            .iter()
            .map(|(intent, answer)| format!("=== {} ===\n{answer}", intent.title()))
            .collect::<Vec<_>>()
            .join("\n\n");
        let request = CompletionRequest::text(
            prompts::fusion_system(self.word_limit),
            prompts::fusion_user(query, &formatted),
        );

        match self.model.complete(request).await {
            Ok(fused) if !fused.trim().is_empty() => {
                debug!(answers = input.len(), "Fused answers");
                Ok(restore_citations(input, fused.trim()))
            }
            Ok(_) => {
                warn!("Fusion returned a blank response, concatenating answers");
                Ok(concatenate_distinct(input))
            }
            Err(e) => {
                warn!(error = %e, "Fusion failed, concatenating answers");
                Ok(concatenate_distinct(input))
            }
        }
    }
}
