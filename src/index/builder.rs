use crate::config::Layout;
use crate::error::IndexError;
use crate::index::registry::PageRegistry;
use crate::index::resolver::page_number;
use crate::pdf::font::Font;
use crate::pdf::table::{HAlign, Table};
use crate::pdf::{PageHandle, PdfDocument, Rect};

/// The band of the index page a single row occupies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowGeometry {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl RowGeometry {
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.left, self.bottom, self.right, self.top)
    }
}

/// One drawn index row and the page it refers to.
#[derive(Debug, Clone, PartialEq)]
pub struct RowPlacement {
    pub name: String,
    pub ordinal: u32,
    pub geometry: RowGeometry,
    pub target: PageHandle,
}

/// Lays out the index table: one row per name, page name on the left and
/// the page's ordinal on the right.
pub struct IndexTableBuilder<'a> {
    layout: &'a Layout,
}

impl<'a> IndexTableBuilder<'a> {
    pub fn new(layout: &'a Layout) -> Self {
        IndexTableBuilder { layout }
    }

    /// Draw the table on `index_page` and report where each row landed.
    ///
    /// Every name is resolved and every row measured before anything is
    /// drawn, so on error the page is left exactly as it was.
    pub fn build<S: AsRef<str>>(
        &self,
        doc: &mut PdfDocument,
        index_page: PageHandle,
        names: &[S],
        registry: &PageRegistry,
    ) -> Result<Vec<RowPlacement>, IndexError> {
        let page_size = doc.page_size(index_page)?;
        let region = self.layout.table_region(page_size);

        log::debug!(
            "index table at x={} width={} from y={} down to y={}",
            region.left,
            region.width,
            region.top,
            region.bottom
        );

        let mut table = Table::new(region, Font::Helvetica, self.layout.body_font_size);
        let mut placements = Vec::with_capacity(names.len());
        let mut cursor = region.top;

        for (i, name) in names.iter().enumerate() {
            let name = name.as_ref();
            let target = registry.lookup(name)?;
            let ordinal = page_number(doc, target)?;

            let row = table.add_row(0.0);
            row.add_cell(self.layout.label_column_pct, name, HAlign::Left, self.layout.row_align)
                .set_font(Font::Helvetica)
                .set_font_size(self.layout.body_font_size);
            row.add_cell(
                100.0 - self.layout.label_column_pct,
                ordinal.to_string(),
                HAlign::Right,
                self.layout.row_align,
            )
            .set_font(Font::Helvetica)
            .set_font_size(self.layout.body_font_size);

            let height = row.height();
            table.fits()?;

            let geometry = RowGeometry {
                top: cursor,
                bottom: cursor - height,
                left: region.left,
                right: region.right(),
            };
            log::debug!("row {} {:?} -> page {} at {}", i, name, ordinal, geometry.to_rect());
            cursor = geometry.bottom;

            placements.push(RowPlacement {
                name: name.to_string(),
                ordinal,
                geometry,
                target,
            });
        }

        let mut canvas = doc.canvas(index_page)?;
        table.draw(&mut canvas)?;
        canvas.close()?;

        Ok(placements)
    }
}
