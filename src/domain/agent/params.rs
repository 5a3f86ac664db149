//! Permissive parameter extraction from free text.
//!
//! A marker such as `área:` is followed by a single word value. Missing
//! markers fall back to defaults; nothing here ever rejects input.

use serde::{Deserialize, Serialize};

pub const DEFAULT_AREA: &str = "tecnologia";
pub const DEFAULT_LEVEL: &str = "intermediário";
pub const DEFAULT_RESOURCE_KIND: &str = "todos";

const AREA_MARKERS: &[&str] = &["área:", "area:"];
const LEVEL_MARKERS: &[&str] = &["nível:", "nivel:"];
const KIND_MARKERS: &[&str] = &["tipo:"];
const EXPERIENCE_MARKERS: &[&str] = &["experiência:", "experiencia:"];

/// Returns the first word after the first marker present in `text`.
///
/// Markers are tried in order. Surrounding commas and periods are trimmed
/// from the value; an empty value counts as absent.
pub fn extract_marker<'a>(text: &'a str, markers: &[&str]) -> Option<&'a str> {
    let marker = markers.iter().find(|m| text.contains(**m))?;
    let (_, after) = text.split_once(marker)?;
    let value = after
        .split_whitespace()
        .next()?
        .trim_matches(|c| c == ',' || c == '.');
    (!value.is_empty()).then_some(value)
}

/// Parameters for the resource-suggestion skill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRequest {
    pub area: String,
    pub level: String,
    pub kind: String,
}

impl ResourceRequest {
    pub fn from_text(text: &str) -> Self {
        Self {
            area: extract_marker(text, AREA_MARKERS).unwrap_or(DEFAULT_AREA).to_string(),
            level: extract_marker(text, LEVEL_MARKERS).unwrap_or(DEFAULT_LEVEL).to_string(),
            kind: extract_marker(text, KIND_MARKERS)
                .unwrap_or(DEFAULT_RESOURCE_KIND)
                .to_string(),
        }
    }
}

/// Parameters for a career score calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRequest {
    #[serde(default = "default_area")]
    pub area: String,
    #[serde(default = "default_level", alias = "experiencia")]
    pub experience: String,
}

fn default_area() -> String {
    DEFAULT_AREA.to_string()
}

fn default_level() -> String {
    DEFAULT_LEVEL.to_string()
}

impl Default for ScoreRequest {
    fn default() -> Self {
        Self {
            area: default_area(),
            experience: default_level(),
        }
    }
}

impl ScoreRequest {
    pub fn from_text(text: &str) -> Self {
        Self {
            area: extract_marker(text, AREA_MARKERS).unwrap_or(DEFAULT_AREA).to_string(),
            experience: extract_marker(text, EXPERIENCE_MARKERS)
                .unwrap_or(DEFAULT_LEVEL)
                .to_string(),
        }
    }

    /// The message understood by the score agent.
    pub fn to_command(&self) -> String {
        format!(
            "calcular score área: {} experiência: {}",
            self.area, self.experience
        )
    }
}
