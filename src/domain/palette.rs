// Category palette - stable display colors per category
use super::series::SeriesPoint;
use serde::Serialize;

pub const DEFAULT_CATEGORIES: [&str; 6] =
    ["Core", "Networking", "Interface", "ERC", "Meta", "Informational"];

pub const DEFAULT_COLORS: [&str; 10] = [
    "rgb(255, 99, 132)",
    "rgb(255, 159, 64)",
    "rgb(255, 205, 86)",
    "rgb(75, 192, 192)",
    "rgb(54, 162, 235)",
    "rgb(153, 102, 255)",
    "rgb(255, 99, 255)",
    "rgb(50, 205, 50)",
    "rgb(255, 0, 0)",
    "rgb(0, 128, 0)",
];

pub const DEFAULT_FALLBACK_COLOR: &str = "rgb(160, 174, 192)";

const BORDER_ALPHA: f32 = 0.2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaletteEntry {
    pub category: String,
    pub color: String,
    pub border: String,
}

/// Fixed category -> color mapping. The category list is configured once and
/// never derived from fetched data, so a category keeps its color for the
/// lifetime of the process.
#[derive(Debug, Clone)]
pub struct Palette {
    categories: Vec<String>,
    colors: Vec<String>,
    fallback: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(
            DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
            DEFAULT_FALLBACK_COLOR.to_string(),
        )
    }
}

impl Palette {
    pub fn new(categories: Vec<String>, colors: Vec<String>, fallback: String) -> Self {
        if categories.len() > colors.len() {
            tracing::warn!(
                "Palette has {} categories but only {} colors; colors will repeat",
                categories.len(),
                colors.len()
            );
        }
        Self {
            categories,
            colors,
            fallback,
        }
    }

    /// One entry per known category, in configured order.
    pub fn entries(&self) -> Vec<PaletteEntry> {
        self.categories
            .iter()
            .map(|category| PaletteEntry {
                category: category.clone(),
                color: self.color_for(category).to_string(),
                border: self.border_for(category),
            })
            .collect()
    }

    /// Color for a category. Known categories cycle through the color list
    /// when it is shorter; unknown categories get the fallback color.
    pub fn color_for(&self, category: &str) -> &str {
        if self.colors.is_empty() {
            return &self.fallback;
        }
        match self.categories.iter().position(|c| c == category) {
            Some(idx) => &self.colors[idx % self.colors.len()],
            None => {
                tracing::debug!("No palette entry for category {}, using fallback", category);
                &self.fallback
            }
        }
    }

    /// Translucent border companion of `color_for`.
    pub fn border_for(&self, category: &str) -> String {
        translucent(self.color_for(category))
    }

    /// Colors in first-appearance order of the categories in `points`. The
    /// chart widget assigns colors by series order, so this keeps each
    /// category on its own color whatever subset a status contains.
    pub fn colors_for(&self, points: &[SeriesPoint]) -> Vec<String> {
        let mut seen: Vec<&str> = Vec::new();
        for point in points {
            if !seen.contains(&point.category.as_str()) {
                seen.push(&point.category);
            }
        }
        seen.into_iter().map(|c| self.color_for(c).to_string()).collect()
    }
}

fn translucent(color: &str) -> String {
    match color
        .strip_prefix("rgb(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        Some(channels) => format!("rgba({}, {})", channels, BORDER_ALPHA),
        None => color.to_string(),
    }
}
