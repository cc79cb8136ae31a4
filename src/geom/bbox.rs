use geo::{Coord, Rect};
use rstar::{RTreeObject, AABB};

/// A bounding box in an R-tree, associated with a MultiPolygon by index.
#[derive(Debug, Clone)]
pub(crate) struct BoundingBox {
    idx: usize, // Index of corresponding MultiPolygon in shapes
    bbox: Rect<f64>,
}

impl BoundingBox {
    pub(crate) fn new(idx: usize, bbox: Rect<f64>) -> Self {
        Self { idx, bbox }
    }

    /// Get the index of the corresponding MultiPolygon.
    pub(crate) fn idx(&self) -> usize { self.idx }

    /// Get a reference to the bounding rectangle.
    pub(crate) fn bbox(&self) -> &Rect<f64> { &self.bbox }
}

impl RTreeObject for BoundingBox {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.bbox.min().into(), self.bbox.max().into())
    }
}

/// Smallest rectangle containing both inputs.
#[inline]
pub(crate) fn merge_rects(a: Rect<f64>, b: Rect<f64>) -> Rect<f64> {
    Rect::new(
        Coord { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
        Coord { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
    )
}

/// Rectangle as `[min_lon, min_lat, max_lon, max_lat]`.
#[inline]
pub fn rect_to_array(rect: &Rect<f64>) -> [f64; 4] {
    [rect.min().x, rect.min().y, rect.max().x, rect.max().y]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merged_rect_covers_both() {
        let a = Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 2.0, y: 1.0 });
        let b = Rect::new(Coord { x: 1.0, y: -1.0 }, Coord { x: 3.0, y: 0.5 });
        assert_eq!(rect_to_array(&merge_rects(a, b)), [0.0, -1.0, 3.0, 1.0]);
    }

    #[test]
    fn envelope_matches_rect() {
        let bb = BoundingBox::new(7, Rect::new(Coord { x: 1.0, y: 2.0 }, Coord { x: 3.0, y: 4.0 }));
        assert_eq!(bb.idx(), 7);
        let env = bb.envelope();
        assert_eq!(env.lower(), [1.0, 2.0]);
        assert_eq!(env.upper(), [3.0, 4.0]);
    }
}
