use serde::{Deserialize, Serialize};

use crate::error::{Result, StudioError};

/// A named, fixed editing instruction offered as a one-click style.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StylePreset {
    pub name: String,
    pub instruction: String,
}

impl StylePreset {
    pub fn new(name: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instruction: instruction.into(),
        }
    }
}

/// Ordered list of style presets. Order is display order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleCatalog {
    styles: Vec<StylePreset>,
}

impl Default for StyleCatalog {
    fn default() -> Self {
        Self::new(vec![
            StylePreset::new(
                "Watercolor",
                "Transform the image into a beautiful watercolor painting with soft edges and vibrant, blended colors.",
            ),
            StylePreset::new(
                "Vintage",
                "Apply a vintage photo effect, with faded colors, film grain, and a slightly yellowed tone.",
            ),
            StylePreset::new(
                "Neon Punk",
                "Give the image a neon punk aesthetic, with glowing edges, vibrant cybernetic colors, and a dark, futuristic feel.",
            ),
            StylePreset::new(
                "Cartoonify",
                "Convert the image into a vibrant cartoon style with bold outlines and cel-shading.",
            ),
        ])
    }
}

impl StyleCatalog {
    pub fn new(styles: Vec<StylePreset>) -> Self {
        Self { styles }
    }

    pub fn iter(&self) -> impl Iterator<Item = &StylePreset> {
        self.styles.iter()
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Look up a preset by name, ignoring case and surrounding whitespace.
    pub fn find(&self, name: &str) -> Option<&StylePreset> {
        let name = name.trim();
        self.styles
            .iter()
            .find(|style| style.name.eq_ignore_ascii_case(name))
    }

    /// Like [`find`](Self::find) but reports an unknown name as an error.
    pub fn get(&self, name: &str) -> Result<&StylePreset> {
        self.find(name)
            .ok_or_else(|| StudioError::UnknownStyle(name.to_string()))
    }
}
