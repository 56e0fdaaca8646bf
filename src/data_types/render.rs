use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::data::{Point, Series};

/// Display color of one dataset.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    /// CSS color name (palette entries and the highlight).
    Named(&'static str),
    /// `#rgb` shorthand produced by the random fallback.
    Hex(String),
}

impl Color {
    /// Reserved color of the primary series.
    pub const HIGHLIGHT: Color = Color::Named("red");

    pub fn as_str(&self) -> &str {
        match self {
            Color::Named(name) => name,
            Color::Hex(hex) => hex,
        }
    }

    pub fn is_highlight(&self) -> bool {
        *self == Self::HIGHLIGHT
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Serialized as the plain CSS string the charting library expects.
impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw.eq_ignore_ascii_case(Self::HIGHLIGHT.as_str()) {
            return Ok(Self::HIGHLIGHT);
        }
        if let Some(name) = crate::colors::PALETTE
            .iter()
            .copied()
            .find(|name| name.eq_ignore_ascii_case(&raw))
        {
            return Ok(Color::Named(name));
        }
        Ok(Color::Hex(raw))
    }
}

/// Per-dataset drawing flags (scatter convention).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleFlags {
    pub border_width: u32,
    pub point_radius: u32,
    pub point_hover_radius: u32,
    pub show_line: bool,
}

impl Default for StyleFlags {
    fn default() -> Self {
        Self {
            border_width: 0,
            point_radius: 3,
            point_hover_radius: 0,
            show_line: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedSeries {
    pub label: String,
    #[serde(rename = "data")]
    pub points: Vec<Point>,
    #[serde(rename = "backgroundColor")]
    pub color: Color,
    #[serde(flatten)]
    pub style: StyleFlags,
}

impl RenderedSeries {
    pub fn new(series: Series, color: Color) -> Self {
        Self {
            label: series.label,
            points: series.points,
            color,
            style: StyleFlags::default(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.points.len()
    }
}

/// Render-ready datasets, in snapshot order. The last one is the primary
/// series and is always drawn with [`Color::HIGHLIGHT`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderDataset {
    pub datasets: Vec<RenderedSeries>,
}

impl RenderDataset {
    pub fn new(datasets: Vec<RenderedSeries>) -> Self {
        Self { datasets }
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    pub fn primary(&self) -> Option<&RenderedSeries> {
        self.datasets.last()
    }

    pub fn primary_series_label(&self) -> Option<&str> {
        self.primary().map(|d| d.label.as_str())
    }

    /// Enforces the highlight convention on the primary dataset.
    pub fn apply_highlight(&mut self) {
        if let Some(last) = self.datasets.last_mut() {
            last.color = Color::HIGHLIGHT;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendOptions {
    pub font_color: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub display: bool,
    pub responsive: bool,
    pub legend: LegendOptions,
    pub tooltips_enabled: bool,
    pub animation_duration_ms: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            display: true,
            responsive: true,
            legend: LegendOptions {
                font_color: "#fff".to_string(),
            },
            tooltips_enabled: false,
            animation_duration_ms: 0,
        }
    }
}

/// Everything handed to the rendering engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    pub canvas_id: String,
    pub options: ChartOptions,
    pub data: RenderDataset,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            canvas_id: "Scatter".to_string(),
            options: ChartOptions::default(),
            data: RenderDataset::default(),
        }
    }
}

impl ChartConfig {
    /// Same canvas and options, different datasets.
    pub fn with_data(&self, data: RenderDataset) -> Self {
        Self {
            canvas_id: self.canvas_id.clone(),
            options: self.options.clone(),
            data,
        }
    }
}
