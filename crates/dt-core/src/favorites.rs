//! Favorite drink presets.
//!
//! Favorites outlive the day ledger: a day rollover never touches them.

use serde::{Deserialize, Serialize};

use crate::catalog::{self, DrinkPreset};

/// Number of favorites shown in the quick-add strip.
pub const DISPLAY_LIMIT: usize = 5;

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

/// Ordered, duplicate-free set of drink type tags.
///
/// Tags are kept as raw strings so that a tag which stops naming a preset is
/// dropped from display instead of breaking the stored set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoritesSet(Vec<String>);

impl FavoritesSet {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    /// Removes the tag if present, otherwise appends it.
    pub fn toggle(&mut self, tag: &str) -> Toggle {
        if let Some(pos) = self.0.iter().position(|t| t == tag) {
            self.0.remove(pos);
            Toggle::Removed
        } else {
            self.0.push(tag.to_string());
            Toggle::Added
        }
    }

    /// Raw tags in insertion order.
    pub fn tags(&self) -> &[String] {
        &self.0
    }

    /// The first `limit` favorites resolved to presets. Unknown tags are skipped
    /// after truncation, so they still occupy a slot.
    pub fn list(&self, limit: usize) -> Vec<&'static DrinkPreset> {
        self.0
            .iter()
            .take(limit)
            .filter_map(|tag| catalog::lookup_tag(tag))
            .collect()
    }
}

impl FromIterator<String> for FavoritesSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = Self::new();
        for tag in iter {
            if !set.contains(&tag) {
                set.0.push(tag);
            }
        }
        set
    }
}
