//! Visit mode labels.

use serde::{Serialize, Serializer};
use std::fmt;

/// Predicted travel style.
///
/// `from_code` is total: codes outside 0..=4 become `Unknown(code)` and
/// display as the raw integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisitMode {
    Business,
    Couples,
    Family,
    Friends,
    Solo,
    Unknown(i64),
}

impl VisitMode {
    /// The five labelled modes, in class-code order
    pub const ALL: [VisitMode; 5] = [
        VisitMode::Business,
        VisitMode::Couples,
        VisitMode::Family,
        VisitMode::Friends,
        VisitMode::Solo,
    ];

    pub fn from_code(code: i64) -> Self {
        match code {
            0 => VisitMode::Business,
            1 => VisitMode::Couples,
            2 => VisitMode::Family,
            3 => VisitMode::Friends,
            4 => VisitMode::Solo,
            other => VisitMode::Unknown(other),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            VisitMode::Business => 0,
            VisitMode::Couples => 1,
            VisitMode::Family => 2,
            VisitMode::Friends => 3,
            VisitMode::Solo => 4,
            VisitMode::Unknown(code) => *code,
        }
    }

    /// Label for the five known modes
    pub fn label(&self) -> Option<&'static str> {
        match self {
            VisitMode::Business => Some("Business"),
            VisitMode::Couples => Some("Couples"),
            VisitMode::Family => Some("Family"),
            VisitMode::Friends => Some("Friends"),
            VisitMode::Solo => Some("Solo"),
            VisitMode::Unknown(_) => None,
        }
    }

    /// Known mode for a label, ignoring case
    pub fn from_label(label: &str) -> Option<Self> {
        VisitMode::ALL
            .into_iter()
            .find(|mode| mode.label().is_some_and(|l| l.eq_ignore_ascii_case(label)))
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, VisitMode::Unknown(_))
    }
}

impl fmt::Display for VisitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => f.write_str(label),
            None => write!(f, "{}", self.code()),
        }
    }
}

impl Serialize for VisitMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
