use serde::{Deserialize, Serialize};
use std::fmt;

/// Width and height of a page in PDF points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub const POINTS_PER_INCH: f32 = 72.0;

    /// US letter, long edge horizontal (792 x 612).
    pub const LANDSCAPE_LETTER: PageSize = PageSize {
        width: 11.0 * Self::POINTS_PER_INCH,
        height: 8.5 * Self::POINTS_PER_INCH,
    };

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// An axis-aligned rectangle in PDF user space (origin bottom-left).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub llx: f32,
    pub lly: f32,
    pub urx: f32,
    pub ury: f32,
}

impl Rect {
    pub fn new(llx: f32, lly: f32, urx: f32, ury: f32) -> Self {
        Rect { llx, lly, urx, ury }
    }

    /// Overlapping area of two rectangles, or `None` if they are disjoint.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let r = Rect::new(
            self.llx.max(other.llx),
            self.lly.max(other.lly),
            self.urx.min(other.urx),
            self.ury.min(other.ury),
        );
        if r.llx <= r.urx && r.lly <= r.ury {
            Some(r)
        } else {
            None
        }
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.llx, self.lly, self.urx, self.ury]
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.2} {:.2} {:.2} {:.2}]",
            self.llx, self.lly, self.urx, self.ury
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landscape_letter() {
        assert_eq!(PageSize::LANDSCAPE_LETTER.width, 792.0);
        assert_eq!(PageSize::LANDSCAPE_LETTER.height, 612.0);
    }

    #[test]
    fn test_intersect_inside() {
        let page = PageSize::LANDSCAPE_LETTER.bounds();
        let r = Rect::new(36.0, 500.0, 756.0, 540.0);
        assert_eq!(page.intersect(&r), Some(r));
    }

    #[test]
    fn test_intersect_bleeding_off_page() {
        let page = PageSize::LANDSCAPE_LETTER.bounds();
        let r = Rect::new(36.0, -10.0, 756.0, 10.0);
        assert_eq!(page.intersect(&r), Some(Rect::new(36.0, 0.0, 756.0, 10.0)));
    }

    #[test]
    fn test_disjoint() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 20.0, 30.0, 30.0);
        assert_eq!(a.intersect(&b), None);
    }
}
