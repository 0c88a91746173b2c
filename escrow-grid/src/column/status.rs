//! Status badge lookup.

use std::collections::HashMap;

/// Visual tone of a badge or styled text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tone {
    Success,
    Warning,
    Danger,
    Info,
    #[default]
    Neutral,
}

/// A status value rendered as a badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    pub label: String,
    pub tone: Tone,
}

/// Maps status text to a badge tone. Lookups ignore case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusStyles {
    tones: HashMap<String, Tone>,
}

impl StatusStyles {
    /// A table with no entries; every status is neutral.
    pub fn empty() -> Self {
        Self {
            tones: HashMap::new(),
        }
    }

    /// Adds or replaces a status tone (builder pattern).
    pub fn with(mut self, status: &str, tone: Tone) -> Self {
        self.tones.insert(status.to_lowercase(), tone);
        self
    }

    /// Tone for a status.
    pub fn tone(&self, status: &str) -> Tone {
        self.tones
            .get(&status.to_lowercase())
            .copied()
            .unwrap_or_default()
    }

    /// Badge for a status.
    pub fn badge(&self, status: &str) -> StatusBadge {
        StatusBadge {
            label: status.to_string(),
            tone: self.tone(status),
        }
    }
}

impl Default for StatusStyles {
    /// Workflow states used across the escrow console.
    fn default() -> Self {
        Self::empty()
            .with("approved", Tone::Success)
            .with("active", Tone::Success)
            .with("completed", Tone::Success)
            .with("released", Tone::Success)
            .with("pending", Tone::Warning)
            .with("in review", Tone::Warning)
            .with("draft", Tone::Info)
            .with("submitted", Tone::Info)
            .with("rejected", Tone::Danger)
            .with("cancelled", Tone::Danger)
            .with("blocked", Tone::Danger)
            .with("expired", Tone::Danger)
    }
}
