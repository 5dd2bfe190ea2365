//! Closed polygons tagged with a mask layer.
//!
//! A `Polygon` is the unit every path operation emits: a closed, ordered
//! point list (closure from the last point back to the first is implied)
//! plus the (layer, datatype) pair it is drawn on.

use serde::{Deserialize, Serialize};

use crate::core::vec2::Point;

// =============================================================================
// LAYER SPEC
// =============================================================================

/// GDSII-style (layer, datatype) tag.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct LayerSpec {
    /// Layer number.
    pub layer: u16,
    /// Datatype number.
    pub datatype: u16,
}

impl LayerSpec {
    /// Creates a layer tag.
    pub const fn new(layer: u16, datatype: u16) -> Self {
        Self { layer, datatype }
    }
}

impl From<(u16, u16)> for LayerSpec {
    fn from((layer, datatype): (u16, u16)) -> Self {
        Self { layer, datatype }
    }
}

// =============================================================================
// POLYGON
// =============================================================================

/// A closed polygon on one layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    /// Vertices, counter-clockwise for everything the path builder emits.
    pub points: Vec<Point>,
    /// Layer the polygon is drawn on.
    pub layer: LayerSpec,
}

impl Polygon {
    /// Creates a polygon from its vertices.
    pub fn new(points: Vec<Point>, layer: LayerSpec) -> Self {
        Self { points, layer }
    }

    /// Vertex count.
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    /// Signed area (shoelace); positive for counter-clockwise winding.
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let twice: f64 = (0..n)
            .map(|i| self.points[i].perp_dot(self.points[(i + 1) % n]))
            .sum();
        0.5 * twice
    }

    /// Unsigned area.
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Whether the vertices wind counter-clockwise.
    pub fn is_counter_clockwise(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Reverses the vertex order if the polygon winds clockwise.
    pub fn ensure_counter_clockwise(&mut self) {
        if self.signed_area() < 0.0 {
            self.points.reverse();
        }
    }

    /// Axis-aligned bounding box as `(min, max)`, or `None` when empty.
    pub fn bounding_box(&self) -> Option<(Point, Point)> {
        let first = *self.points.first()?;
        Some(
            self.points
                .iter()
                .fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p))),
        )
    }

    /// Whether any two non-adjacent edges cross.
    ///
    /// Quadratic in the vertex count, which the GDSII vertex limit keeps
    /// small.
    pub fn has_self_intersection(&self) -> bool {
        let n = self.points.len();
        if n < 4 {
            return false;
        }
        for i in 0..n {
            let (a, b) = (self.points[i], self.points[(i + 1) % n]);
            for j in (i + 2)..n {
                if i == 0 && j == n - 1 {
                    continue;
                }
                let (c, d) = (self.points[j], self.points[(j + 1) % n]);
                if segments_cross(a, b, c, d) {
                    return true;
                }
            }
        }
        false
    }
}

/// Proper crossing test: the segments intersect at a single point interior
/// to both.
fn segments_cross(a: Point, b: Point, c: Point, d: Point) -> bool {
    let o1 = (b - a).perp_dot(c - a);
    let o2 = (b - a).perp_dot(d - a);
    let o3 = (d - c).perp_dot(a - c);
    let o4 = (d - c).perp_dot(b - c);
    o1 * o2 < 0.0 && o3 * o4 < 0.0
}
