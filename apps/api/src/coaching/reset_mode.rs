//! Discipline reset modes and the guidance clause each one injects into the prompt.

/// Which situation the student is resetting from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResetMode {
    Procrastinating,
    Overwhelmed,
    #[default]
    SkippedPrayer,
}

impl ResetMode {
    /// Maps a request label to a mode. Matching is exact and case-sensitive.
    /// Missing or unrecognized labels get `SkippedPrayer`; they are never rejected.
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("procrastinating") => ResetMode::Procrastinating,
            Some("overwhelmed") => ResetMode::Overwhelmed,
            Some("skipped_prayer") => ResetMode::SkippedPrayer,
            _ => ResetMode::default(),
        }
    }

    /// The situation clause placed into the discipline-reset prompt.
    pub fn guidance(self) -> &'static str {
        match self {
            ResetMode::Procrastinating => {
                "Give tough-love, high-energy advice. 3 concrete actions for the next 60 minutes."
            }
            ResetMode::Overwhelmed => {
                "Give calm, structured guidance. 3 simple steps to regain control without panic."
            }
            ResetMode::SkippedPrayer => {
                "He skipped prayer/habits. Give compassionate but firm reset in 3 steps."
            }
        }
    }
}
