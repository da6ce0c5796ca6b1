//! Category preferences per travel style.

use classifier::VisitMode;
use std::collections::HashMap;

/// Maps each visit mode to the attraction categories it favours.
///
/// Modes without an entry (including `VisitMode::Unknown`) favour nothing,
/// which turns the boost off.
#[derive(Debug, Clone, PartialEq)]
pub struct StylePreferences {
    categories: HashMap<VisitMode, Vec<String>>,
}

impl StylePreferences {
    /// No preferences for any mode
    pub fn empty() -> Self {
        Self {
            categories: HashMap::new(),
        }
    }

    /// Set the preferred categories for one mode (builder pattern)
    pub fn with<I, S>(mut self, mode: VisitMode, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set(mode, categories);
        self
    }

    pub fn set<I, S>(&mut self, mode: VisitMode, categories: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories
            .insert(mode, categories.into_iter().map(Into::into).collect());
    }

    /// Preferred categories for a mode; empty when unmapped
    pub fn categories_for(&self, mode: VisitMode) -> &[String] {
        self.categories
            .get(&mode)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_preferred(&self, mode: VisitMode, category: &str) -> bool {
        self.categories_for(mode).iter().any(|c| c == category)
    }
}

impl Default for StylePreferences {
    fn default() -> Self {
        Self::empty()
            .with(VisitMode::Business, ["Museums", "Historic Sites", "Landmarks"])
            .with(VisitMode::Couples, ["Beaches", "Parks", "Romantic"])
            .with(VisitMode::Family, ["Theme Parks", "Zoos", "Water Parks"])
            .with(VisitMode::Friends, ["Nightlife", "Adventure", "Water Parks"])
            .with(
                VisitMode::Solo,
                ["Museums", "Nature & Wildlife Areas", "Hiking Trails"],
            )
    }
}
