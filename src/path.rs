//! The top-level path type: an ordered sequence of independent
//! contours. Grounded on `pathfinder_content::outline::Outline`, whose
//! `contours: Vec<Contour>` plus cached bounds is carried over
//! directly; `Outline::from_segments`'s per-subpath bookkeeping is what
//! `PathBuilderImpl` in `builder.rs` generalizes.

use crate::contour::{Contour, ContourContract};
use crate::rect::RectF;

/// An ordered collection of contours, each independently open or
/// closed, together forming one drawable path.
#[derive(Clone, Debug, Default)]
pub struct Path {
    contours: Vec<Contour>,
}

impl Path {
    #[inline]
    pub fn new() -> Path {
        Path::default()
    }

    #[inline]
    pub fn from_contours(contours: Vec<Contour>) -> Path {
        Path { contours }
    }

    #[inline]
    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    #[inline]
    pub fn push_contour(&mut self, contour: Contour) {
        self.contours.push(contour);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// The union of every contour's bounds, or `None` if the path has
    /// no contours with non-degenerate bounds.
    pub fn bounds(&self) -> Option<RectF> {
        let mut result: Option<RectF> = None;
        for contour in &self.contours {
            if let Some(b) = contour.bounds() {
                result = Some(match result {
                    Some(acc) => acc.union_rect(b),
                    None => b,
                });
            }
        }
        result
    }

    /// Appends the SVG-style textual description of every contour,
    /// space separated.
    pub fn print(&self) -> String {
        let mut out = String::new();
        for (index, contour) in self.contours.iter().enumerate() {
            if index > 0 {
                out.push(' ');
            }
            contour.print(&mut out);
        }
        out
    }

    /// A new path with every contour reversed, in the same order.
    pub fn reversed(&self) -> Path {
        Path {
            contours: self.contours.iter().map(|c| c.reverse()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contour::rect::RectContour;
    use crate::vector::vec2f;

    #[test]
    fn bounds_is_union_of_contours() {
        let mut path = Path::new();
        path.push_contour(Contour::Rect(RectContour::new(vec2f(0.0, 0.0), vec2f(10.0, 10.0))));
        path.push_contour(Contour::Rect(RectContour::new(vec2f(20.0, 20.0), vec2f(5.0, 5.0))));
        let bounds = path.bounds().unwrap();
        assert_eq!(bounds.min_x(), 0.0);
        assert_eq!(bounds.max_x(), 25.0);
    }
}
