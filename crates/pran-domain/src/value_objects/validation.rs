//! Validation Value Objects

use serde::{Deserialize, Serialize};

/// Value Object: verdict of the post-hoc response check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationVerdict {
    /// Whether the response may be shown as is (or with a disclaimer)
    pub is_safe: bool,
    /// Why the response was blocked or amended
    #[serde(default)]
    pub reason: Option<String>,
    /// Amended response or disclaimer text
    #[serde(default)]
    pub revised_response: Option<String>,
}

impl ValidationVerdict {
    /// A plain pass with no amendment
    pub fn pass() -> Self {
        Self {
            is_safe: true,
            reason: None,
            revised_response: None,
        }
    }

    /// Verdict used when the check itself failed
    pub fn fail_open(reason: impl Into<String>) -> Self {
        Self {
            is_safe: true,
            reason: Some(reason.into()),
            revised_response: None,
        }
    }

    /// Apply the verdict to a response
    ///
    /// Returns `None` when the response is blocked. A safe verdict with a
    /// revision that already contains the response replaces it; any other
    /// revision is appended as a disclaimer.
    pub fn apply(&self, response: &str) -> Option<String> {
        if !self.is_safe {
            return None;
        }
        let revision = self
            .revised_response
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty());
        match revision {
            None => Some(response.to_string()),
            Some(revised) if revised.contains(response.trim()) => Some(revised.to_string()),
            Some(disclaimer) => Some(format!("{}\n\n{}", response.trim_end(), disclaimer)),
        }
    }
}
