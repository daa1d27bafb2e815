//! A minimal single-page table engine: fixed-width columns given as
//! percentages of the table width. Cell text wraps at word boundaries and
//! rows grow to fit their tallest cell.

use crate::error::IndexError;
use crate::pdf::content::PageCanvas;
use crate::pdf::font::Font;
use serde::{Deserialize, Serialize};

/// Padding applied to each side of every cell.
pub const CELL_PADDING: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// Where on the page a table may draw. `top` is where the first row
/// starts; rows grow downward and may not cross `bottom`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableRegion {
    pub left: f32,
    pub width: f32,
    pub top: f32,
    pub bottom: f32,
}

impl TableRegion {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }
}

#[derive(Debug, Clone)]
pub struct Cell {
    width_pct: f32,
    text: String,
    h_align: HAlign,
    v_align: VAlign,
    font: Font,
    font_size: f32,
}

impl Cell {
    pub fn set_font(&mut self, font: Font) -> &mut Self {
        self.font = font;
        self
    }

    pub fn set_font_size(&mut self, size: f32) -> &mut Self {
        self.font_size = size;
        self
    }

    fn lines(&self, width: f32) -> Vec<String> {
        wrap_text(self.font, self.font_size, &self.text, width - 2.0 * CELL_PADDING)
    }

    fn content_height(&self, width: f32) -> f32 {
        let lines = self.lines(width).len().max(1);
        lines as f32 * self.font.line_height(self.font_size) + 2.0 * CELL_PADDING
    }
}

#[derive(Debug, Clone)]
pub struct Row {
    min_height: f32,
    width: f32,
    cells: Vec<Cell>,
    font: Font,
    font_size: f32,
}

impl Row {
    pub fn add_cell(
        &mut self,
        width_pct: f32,
        text: impl Into<String>,
        h_align: HAlign,
        v_align: VAlign,
    ) -> &mut Cell {
        self.cells.push(Cell {
            width_pct,
            text: text.into(),
            h_align,
            v_align,
            font: self.font,
            font_size: self.font_size,
        });
        let last = self.cells.len() - 1;
        &mut self.cells[last]
    }

    #[cfg(test)]
    pub(crate) fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn cell_width(&self, cell: &Cell) -> f32 {
        self.width * cell.width_pct / 100.0
    }

    /// Height of the row once drawn: the tallest cell, but never less than
    /// the height requested when the row was created.
    pub fn height(&self) -> f32 {
        self.cells
            .iter()
            .map(|cell| cell.content_height(self.cell_width(cell)))
            .fold(self.min_height, f32::max)
    }
}

pub struct Table {
    region: TableRegion,
    font: Font,
    font_size: f32,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(region: TableRegion, font: Font, font_size: f32) -> Self {
        Table {
            region,
            font,
            font_size,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, min_height: f32) -> &mut Row {
        self.rows.push(Row {
            min_height,
            width: self.region.width,
            cells: Vec::new(),
            font: self.font,
            font_size: self.font_size,
        });
        let last = self.rows.len() - 1;
        &mut self.rows[last]
    }

    /// Check that every row added so far fits above the region's bottom edge.
    pub fn fits(&self) -> Result<(), IndexError> {
        let mut y = self.region.top;
        for (i, row) in self.rows.iter().enumerate() {
            let height = row.height();
            if y - height < self.region.bottom {
                return Err(IndexError::TableOverflow {
                    row: i,
                    needed: height,
                    available: y - self.region.bottom,
                });
            }
            y -= height;
        }
        Ok(())
    }

    /// Draw every row top-down. Nothing is drawn unless the whole table fits.
    pub fn draw(&self, canvas: &mut PageCanvas<'_>) -> Result<(), IndexError> {
        self.fits()?;

        let mut top = self.region.top;
        for row in &self.rows {
            let bottom = top - row.height();
            let mut x = self.region.left;
            for cell in &row.cells {
                let width = row.cell_width(cell);
                for (tx, ty, line) in line_origins(cell, x, width, top, bottom) {
                    canvas.text(cell.font, cell.font_size, tx, ty, &line);
                }
                x += width;
            }
            top = bottom;
        }
        Ok(())
    }
}

/// Break `text` into lines no wider than `max_width`. Words are kept whole
/// unless a single word is wider than a line, in which case it is split.
pub fn wrap_text(font: Font, size: f32, text: &str, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", line, word)
        };
        if font.text_width(&candidate, size) <= max_width {
            line = candidate;
            continue;
        }

        if !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        for c in word.chars() {
            let mut next = line.clone();
            next.push(c);
            if !line.is_empty() && font.text_width(&next, size) > max_width {
                lines.push(std::mem::replace(&mut line, c.to_string()));
            } else {
                line = next;
            }
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Baseline origin of each wrapped line of a cell inside the box
/// `[x, x + width] x [bottom, top]`.
fn line_origins(cell: &Cell, x: f32, width: f32, top: f32, bottom: f32) -> Vec<(f32, f32, String)> {
    let lines = cell.lines(width);
    let line_height = cell.font.line_height(cell.font_size);
    let ascent = cell.font.ascent() * cell.font_size / 1000.0;
    let descent = cell.font.descent() * cell.font_size / 1000.0;
    let block = lines.len() as f32 * line_height;

    let first = match cell.v_align {
        VAlign::Top => top - CELL_PADDING - ascent,
        VAlign::Middle => (top + bottom) / 2.0 + block / 2.0 - ascent,
        VAlign::Bottom => bottom + CELL_PADDING - descent + block - line_height,
    };

    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let tx = match cell.h_align {
                HAlign::Left => x + CELL_PADDING,
                HAlign::Right => {
                    x + width - CELL_PADDING - cell.font.text_width(&line, cell.font_size)
                }
            };
            (tx, first - i as f32 * line_height, line)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::content::page_strings;
    use crate::pdf::{PageSize, PdfDocument};

    fn region() -> TableRegion {
        TableRegion {
            left: 36.0,
            width: 720.0,
            top: 540.0,
            bottom: 21.0,
        }
    }

    #[test]
    fn test_row_height_from_font() {
        let mut table = Table::new(region(), Font::Helvetica, 12.0);
        let row = table.add_row(0.0);
        row.add_cell(75.0, "Page 1", HAlign::Left, VAlign::Middle);
        row.add_cell(25.0, "2", HAlign::Right, VAlign::Middle);
        let expected = Font::Helvetica.line_height(12.0) + 2.0 * CELL_PADDING;
        assert_eq!(row.height(), expected);
    }

    #[test]
    fn test_min_height_wins() {
        let mut table = Table::new(region(), Font::Helvetica, 12.0);
        let row = table.add_row(40.0);
        row.add_cell(100.0, "x", HAlign::Left, VAlign::Top);
        assert_eq!(row.height(), 40.0);
    }

    #[test]
    fn test_larger_cell_font_grows_row() {
        let mut table = Table::new(region(), Font::Helvetica, 12.0);
        let row = table.add_row(0.0);
        row.add_cell(50.0, "small", HAlign::Left, VAlign::Middle);
        row.add_cell(50.0, "big", HAlign::Left, VAlign::Middle)
            .set_font(Font::HelveticaBold)
            .set_font_size(24.0);
        assert_eq!(row.height(), Font::HelveticaBold.line_height(24.0) + 2.0 * CELL_PADDING);
    }

    #[test]
    fn test_alignment() {
        let mut table = Table::new(region(), Font::Helvetica, 12.0);
        let row = table.add_row(0.0);
        row.add_cell(75.0, "Page 1", HAlign::Left, VAlign::Middle);
        row.add_cell(25.0, "2", HAlign::Right, VAlign::Middle);
        let cells = row.cells();

        let left = line_origins(&cells[0], 36.0, 540.0, 540.0, 518.9);
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].0, 36.0 + CELL_PADDING);

        let right = line_origins(&cells[1], 576.0, 180.0, 540.0, 518.9);
        let digit = Font::Helvetica.text_width("2", 12.0);
        assert_eq!(right[0].0, 576.0 + 180.0 - CELL_PADDING - digit);
    }

    #[test]
    fn test_middle_alignment_centers_glyph_box() {
        let mut table = Table::new(region(), Font::Helvetica, 10.0);
        let row = table.add_row(0.0);
        row.add_cell(100.0, "x", HAlign::Left, VAlign::Middle);
        let origins = line_origins(&row.cells()[0], 0.0, 100.0, 100.0, 0.0);
        // glyph box spans y - 2.07 .. y + 7.18
        let box_mid = origins[0].1 + (7.18 - 2.07) / 2.0;
        assert!((box_mid - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_top_and_bottom_alignment() {
        let mut table = Table::new(region(), Font::Helvetica, 10.0);
        let row = table.add_row(0.0);
        row.add_cell(50.0, "x", HAlign::Left, VAlign::Top);
        row.add_cell(50.0, "y", HAlign::Left, VAlign::Bottom);
        let cells = row.cells();

        let top = line_origins(&cells[0], 0.0, 100.0, 100.0, 0.0);
        assert!((top[0].1 - (100.0 - CELL_PADDING - 7.18)).abs() < 1e-3);

        let bottom = line_origins(&cells[1], 100.0, 100.0, 100.0, 0.0);
        assert!((bottom[0].1 - (CELL_PADDING + 2.07)).abs() < 1e-3);
    }

    #[test]
    fn test_wrap_keeps_words_whole() {
        let lines = wrap_text(Font::Helvetica, 10.0, "alpha beta gamma", 60.0);
        assert_eq!(lines, vec!["alpha beta", "gamma"]);
        for line in &lines {
            assert!(Font::Helvetica.text_width(line, 10.0) <= 60.0);
        }
    }

    #[test]
    fn test_wrap_splits_oversized_word() {
        let word = "W".repeat(20);
        let lines = wrap_text(Font::Helvetica, 10.0, &word, 50.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(Font::Helvetica.text_width(line, 10.0) <= 50.0);
        }
    }

    #[test]
    fn test_wrap_empty() {
        assert!(wrap_text(Font::Helvetica, 12.0, "", 100.0).is_empty());
        assert!(wrap_text(Font::Helvetica, 12.0, "   ", 100.0).is_empty());
    }

    #[test]
    fn test_long_label_wraps_inside_its_column() {
        let label = "Appendix with a remarkably long descriptive title ".repeat(3);
        let mut table = Table::new(region(), Font::Helvetica, 12.0);
        let row = table.add_row(0.0);
        row.add_cell(75.0, label.trim(), HAlign::Left, VAlign::Middle);
        row.add_cell(25.0, "12", HAlign::Right, VAlign::Middle);

        let line_height = Font::Helvetica.line_height(12.0);
        let single = line_height + 2.0 * CELL_PADDING;
        assert!(row.height() > single);

        let cells = row.cells();
        let label_lines = line_origins(&cells[0], 36.0, 540.0, 540.0, 540.0 - row.height());
        assert!(label_lines.len() >= 2);
        assert_eq!(
            row.height(),
            label_lines.len() as f32 * line_height + 2.0 * CELL_PADDING
        );

        let ordinal = line_origins(&cells[1], 576.0, 180.0, 540.0, 540.0 - row.height());
        let ordinal_x = ordinal[0].0;
        for (tx, ty, line) in &label_lines {
            let end = tx + Font::Helvetica.text_width(line, 12.0);
            assert!(end <= 576.0 - CELL_PADDING, "{:?} runs into the ordinal column", line);
            assert!(end < ordinal_x);
            assert!(*ty > 540.0 - row.height() && *ty < 540.0);
        }
    }

    #[test]
    fn test_draw_writes_cells_in_order() {
        let mut doc = PdfDocument::new();
        let page = doc.append_page(PageSize::LANDSCAPE_LETTER);

        let mut table = Table::new(region(), Font::Helvetica, 12.0);
        for (name, n) in [("Page 1", "2"), ("Page 2", "3")] {
            let row = table.add_row(0.0);
            row.add_cell(75.0, name, HAlign::Left, VAlign::Middle);
            row.add_cell(25.0, n, HAlign::Right, VAlign::Middle);
        }

        let mut canvas = doc.canvas(page).unwrap();
        table.draw(&mut canvas).unwrap();
        canvas.close().unwrap();

        assert_eq!(page_strings(&doc, page), vec!["Page 1", "2", "Page 2", "3"]);
    }

    #[test]
    fn test_overflow_draws_nothing() {
        let mut doc = PdfDocument::new();
        let page = doc.append_page(PageSize::LANDSCAPE_LETTER);

        let tight = TableRegion {
            top: 60.0,
            bottom: 21.0,
            ..region()
        };
        let mut table = Table::new(tight, Font::Helvetica, 12.0);
        table
            .add_row(0.0)
            .add_cell(100.0, "a", HAlign::Left, VAlign::Middle);
        assert!(table.fits().is_ok());
        table
            .add_row(0.0)
            .add_cell(100.0, "b", HAlign::Left, VAlign::Middle);
        assert!(matches!(
            table.fits(),
            Err(IndexError::TableOverflow { row: 1, .. })
        ));

        let mut canvas = doc.canvas(page).unwrap();
        let err = table.draw(&mut canvas).unwrap_err();
        assert!(matches!(err, IndexError::TableOverflow { row: 1, .. }));
        assert_eq!(canvas.operation_count(), 0);
        canvas.close().unwrap();
    }
}
