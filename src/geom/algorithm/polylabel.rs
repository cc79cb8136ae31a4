use std::{cmp::Ordering, collections::BinaryHeap, f64::consts::SQRT_2};

use geo::{Area, Coord, LineString, MultiPolygon, Point, Polygon};

/// Outcome of a label placement search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// A point strictly inside the geometry.
    Interior(Point<f64>),
    /// The geometry is empty or degenerate and no interior point was found.
    Failed,
}

impl Placement {
    #[inline]
    pub fn point(&self) -> Option<Point<f64>> {
        match self {
            Placement::Interior(point) => Some(*point),
            Placement::Failed => None,
        }
    }
}

/// Find the pole of inaccessibility of a (multi)polygon: the interior point
/// farthest from any edge, to within `precision` source units.
///
/// Multi-part geometries are searched on their largest part, which is where a
/// reader expects the name to appear.
pub fn pole_of_inaccessibility(shape: &MultiPolygon<f64>, precision: f64) -> Placement {
    let largest = shape.0.iter()
        .map(|polygon| (polygon.unsigned_area(), polygon))
        .filter(|(area, _)| area.is_finite() && *area > 0.0)
        .max_by(|a, b| a.0.total_cmp(&b.0));

    match largest {
        Some((_, polygon)) => polylabel(polygon, precision),
        None => Placement::Failed,
    }
}

/// A square search cell centered on (x, y) with half-size `h`.
#[derive(Debug, Clone, Copy)]
struct Cell {
    x: f64,
    y: f64,
    h: f64,
    /// Signed distance from the center to the polygon outline (negative outside).
    d: f64,
    /// Upper bound on the distance achievable anywhere inside this cell.
    max: f64,
}

impl Cell {
    fn new(x: f64, y: f64, h: f64, polygon: &Polygon<f64>) -> Self {
        let d = signed_distance(Coord { x, y }, polygon);
        Self { x, y, h, d, max: d + h * SQRT_2 }
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool { self.max.total_cmp(&other.max) == Ordering::Equal }
}

impl Eq for Cell {}

impl Ord for Cell {
    // Max-heap on the achievable distance.
    fn cmp(&self, other: &Self) -> Ordering { self.max.total_cmp(&other.max) }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

fn polylabel(polygon: &Polygon<f64>, precision: f64) -> Placement {
    let exterior = polygon.exterior();
    let (mut min, mut max) = (Coord { x: f64::INFINITY, y: f64::INFINITY }, Coord { x: f64::NEG_INFINITY, y: f64::NEG_INFINITY });
    for c in exterior.coords() {
        min = Coord { x: min.x.min(c.x), y: min.y.min(c.y) };
        max = Coord { x: max.x.max(c.x), y: max.y.max(c.y) };
    }

    let (width, height) = (max.x - min.x, max.y - min.y);
    let cell_size = width.min(height);
    if !cell_size.is_finite() || cell_size <= 0.0 { return Placement::Failed }
    let precision = if precision > 0.0 { precision } else { cell_size * 1e-3 };

    // Cover the bounding box with initial square cells.
    let h = cell_size / 2.0;
    let mut queue = BinaryHeap::new();
    let mut x = min.x;
    while x < max.x {
        let mut y = min.y;
        while y < max.y {
            queue.push(Cell::new(x + h, y + h, h, polygon));
            y += cell_size;
        }
        x += cell_size;
    }

    // Seed with the area centroid, then the bounding box center if that is better.
    let mut best = centroid_cell(exterior, polygon);
    let bbox_cell = Cell::new(min.x + width / 2.0, min.y + height / 2.0, 0.0, polygon);
    if bbox_cell.d > best.d { best = bbox_cell }

    while let Some(cell) = queue.pop() {
        if cell.d > best.d { best = cell }

        // Nothing inside this cell can beat the current best by more than the precision.
        if cell.max - best.d <= precision { continue }

        let h = cell.h / 2.0;
        for (dx, dy) in [(-h, -h), (h, -h), (-h, h), (h, h)] {
            queue.push(Cell::new(cell.x + dx, cell.y + dy, h, polygon));
        }
    }

    if best.d > 0.0 && best.x.is_finite() && best.y.is_finite() {
        Placement::Interior(Point::new(best.x, best.y))
    } else {
        Placement::Failed
    }
}

/// Cell at the area centroid of the exterior ring (first vertex if the ring has no area).
fn centroid_cell(ring: &LineString<f64>, polygon: &Polygon<f64>) -> Cell {
    let (mut area, mut cx, mut cy) = (0.0, 0.0, 0.0);
    for w in ring.0.windows(2) {
        let (a, b) = (w[0], w[1]);
        let f = a.x * b.y - b.x * a.y;
        cx += (a.x + b.x) * f;
        cy += (a.y + b.y) * f;
        area += f * 3.0;
    }
    if area == 0.0 {
        let first = ring.0.first().copied().unwrap_or(Coord { x: f64::NAN, y: f64::NAN });
        return Cell::new(first.x, first.y, 0.0, polygon);
    }
    Cell::new(cx / area, cy / area, 0.0, polygon)
}

/// Distance from `p` to the polygon outline, positive inside and negative outside.
/// Holes count as outside.
fn signed_distance(p: Coord<f64>, polygon: &Polygon<f64>) -> f64 {
    let mut inside = false;
    let mut min_dist_sq = f64::INFINITY;

    for ring in std::iter::once(polygon.exterior()).chain(polygon.interiors()) {
        for w in ring.0.windows(2) {
            let (a, b) = (w[0], w[1]);
            if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
                inside = !inside;
            }
            min_dist_sq = min_dist_sq.min(segment_distance_sq(p, a, b));
        }
    }

    let distance = min_dist_sq.sqrt();
    if inside { distance } else { -distance }
}

/// Squared distance from `p` to the segment `a`-`b`.
fn segment_distance_sq(p: Coord<f64>, a: Coord<f64>, b: Coord<f64>) -> f64 {
    let (mut x, mut y) = (a.x, a.y);
    let (dx, dy) = (b.x - x, b.y - y);

    if dx != 0.0 || dy != 0.0 {
        let t = ((p.x - x) * dx + (p.y - y) * dy) / (dx * dx + dy * dy);
        if t > 1.0 {
            x = b.x;
            y = b.y;
        } else if t > 0.0 {
            x += dx * t;
            y += dy * t;
        }
    }

    let (dx, dy) = (p.x - x, p.y - y);
    dx * dx + dy * dy
}
