//! Fusion Value Objects

use crate::value_objects::Intent;

/// Per-domain answers to be merged into one response
///
/// Keeps dispatch order; a second answer for the same intent replaces
/// the first in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FusionInput {
    answers: Vec<(Intent, String)>,
}

impl FusionInput {
    /// Create an empty input
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the answer of one domain
    pub fn insert(&mut self, intent: Intent, answer: impl Into<String>) {
        let answer = answer.into();
        match self.answers.iter_mut().find(|(i, _)| *i == intent) {
            Some(slot) => slot.1 = answer,
            None => self.answers.push((intent, answer)),
        }
    }

    /// Builder form of [`FusionInput::insert`]
    pub fn with(mut self, intent: Intent, answer: impl Into<String>) -> Self {
        self.insert(intent, answer);
        self
    }

    /// Number of answers
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    /// Whether there is nothing to merge
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Answers in dispatch order
    pub fn iter(&self) -> impl Iterator<Item = (Intent, &str)> {
        self.answers.iter().map(|(i, a)| (*i, a.as_str()))
    }
}

impl FromIterator<(Intent, String)> for FusionInput {
    fn from_iter<T: IntoIterator<Item = (Intent, String)>>(iter: T) -> Self {
        let mut input = Self::new();
        for (intent, answer) in iter {
            input.insert(intent, answer);
        }
        input
    }
}
