use crate::pdf::table::{TableRegion, VAlign};
use crate::pdf::PageSize;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Page geometry and typography for the generated document.
///
/// Every field has a default, so a layout file only needs the values it
/// overrides:
///
/// ```json
/// { "body_font_size": 10, "label_column_pct": 80 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub page_size: PageSize,
    /// Left and right margin; the table spans the width between them.
    pub side_margin: f32,
    pub top_margin: f32,
    pub bottom_margin: f32,
    /// Distance from the top edge to the heading baseline.
    pub heading_offset: f32,
    /// Space between the top of the content area and the first table row.
    pub heading_gap: f32,
    pub heading_font_size: f32,
    pub body_font_size: f32,
    /// Share of the row given to the page name; the ordinal gets the rest.
    pub label_column_pct: f32,
    /// Vertical placement of text in index rows: "top", "middle" or "bottom".
    pub row_align: VAlign,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            page_size: PageSize::LANDSCAPE_LETTER,
            side_margin: 36.0,
            top_margin: 21.0,
            bottom_margin: 21.0,
            heading_offset: 45.0,
            heading_gap: 30.0,
            heading_font_size: 14.0,
            body_font_size: 12.0,
            label_column_pct: 75.0,
            row_align: VAlign::Middle,
        }
    }
}

impl Layout {
    /// Load a layout from a JSON file and validate it
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read layout: {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Invalid layout: {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let layout: Layout = serde_json::from_str(text)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("page width", self.page_size.width),
            ("page height", self.page_size.height),
            ("heading font size", self.heading_font_size),
            ("body font size", self.body_font_size),
        ];
        for (what, value) in positive {
            if !(value > 0.0) {
                anyhow::bail!("{} must be positive (got {})", what, value);
            }
        }

        let margins = [
            ("side margin", self.side_margin),
            ("top margin", self.top_margin),
            ("bottom margin", self.bottom_margin),
            ("heading offset", self.heading_offset),
            ("heading gap", self.heading_gap),
        ];
        for (what, value) in margins {
            if !(value >= 0.0) {
                anyhow::bail!("{} must not be negative (got {})", what, value);
            }
        }

        if !(self.label_column_pct > 0.0 && self.label_column_pct < 100.0) {
            anyhow::bail!(
                "label column must be between 0 and 100 percent (got {})",
                self.label_column_pct
            );
        }

        let region = self.table_region(self.page_size);
        if region.width <= 0.0 {
            anyhow::bail!("side margins leave no room for the table");
        }
        if region.top <= region.bottom {
            anyhow::bail!("vertical margins leave no room for the table");
        }
        Ok(())
    }

    /// Where the index table goes on a page of the given size.
    pub fn table_region(&self, page: PageSize) -> TableRegion {
        let content_top = page.height - 2.0 * self.top_margin;
        TableRegion {
            left: self.side_margin,
            width: page.width - 2.0 * self.side_margin,
            top: content_top - self.heading_gap,
            bottom: self.bottom_margin,
        }
    }

    /// Baseline origin of a page heading.
    pub fn heading_origin(&self, page: PageSize) -> (f32, f32) {
        (self.side_margin, page.height - self.heading_offset)
    }
}
