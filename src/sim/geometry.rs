//! Geometry kernel
//!
//! Closed-form 2D primitives the collision resolver is built on. All
//! functions are pure; degenerate inputs (zero-length segments,
//! concentric equal circles) yield sentinel results instead of
//! panicking.

use glam::Vec2;

/// Axis-aligned bounding box in absolute table coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_points(points: &[Vec2]) -> Self {
        let mut min = points.first().copied().unwrap_or(Vec2::ZERO);
        let mut max = min;
        for p in points {
            min = min.min(*p);
            max = max.max(*p);
        }
        Self { min, max }
    }

    pub fn from_circle(center: Vec2, radius: f32) -> Self {
        Self {
            min: center - Vec2::splat(radius),
            max: center + Vec2::splat(radius),
        }
    }

    /// Strict interior test; boundary contact does not count.
    #[inline]
    pub fn contains_strict(&self, p: Vec2) -> bool {
        p.x > self.min.x && p.x < self.max.x && p.y > self.min.y && p.y < self.max.y
    }

    fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            self.max,
            Vec2::new(self.min.x, self.max.y),
        ]
    }

    /// True when any corner of either box lies strictly inside the
    /// other (checked both directions, so containment counts too).
    pub fn overlaps(&self, other: &Aabb) -> bool {
        for (a, b) in [(self, other), (other, self)] {
            if a.corners().iter().any(|c| b.contains_strict(*c)) {
                return true;
            }
        }
        false
    }
}

/// Closest point on a segment plus its distance
#[derive(Debug, Clone, Copy)]
pub struct SegmentHit {
    pub closest: Vec2,
    pub distance: f32,
}

fn closer(to: f32, first: f32, second: f32) -> f32 {
    if (first - to).abs() < (second - to).abs() {
        first
    } else {
        second
    }
}

/// Minimum distance from `p` to the segment `a`-`b`, with the closest
/// boundary point.
///
/// Axis-aligned segments take a closed-form branch (which also covers
/// the zero-length segment: it degenerates to point distance). The
/// general case solves the perpendicular foot algebraically and falls
/// back to the nearer endpoint when the foot lies outside the segment.
pub fn segment_point_distance(a: Vec2, b: Vec2, p: Vec2) -> SegmentHit {
    if a.y == b.y {
        // Horizontal
        if (a.x <= p.x && p.x <= b.x) || (a.x >= p.x && p.x >= b.x) {
            return SegmentHit {
                closest: Vec2::new(p.x, a.y),
                distance: (p.y - a.y).abs(),
            };
        }
        let closest = Vec2::new(closer(p.x, a.x, b.x), a.y);
        return SegmentHit {
            closest,
            distance: closest.distance(p),
        };
    }
    if a.x == b.x {
        // Vertical
        if (a.y <= p.y && p.y <= b.y) || (a.y >= p.y && p.y >= b.y) {
            return SegmentHit {
                closest: Vec2::new(a.x, p.y),
                distance: (p.x - a.x).abs(),
            };
        }
        let closest = Vec2::new(a.x, closer(p.y, a.y, b.y));
        return SegmentHit {
            closest,
            distance: closest.distance(p),
        };
    }

    // General case. `ca` and `cb` are both nonzero here; segments that
    // are nearly axis-aligned can still lose precision in the division.
    let ca = b.y - a.y;
    let cb = a.x - b.x;

    // Perpendicular distance to the infinite line, then the foot of the
    // perpendicular.
    let dl = (ca * p.x + cb * p.y - cb * a.y - ca * a.x).abs() / (ca * ca + cb * cb).sqrt();
    let x = ((ca / cb) * a.x + a.y + (cb / ca) * p.x - p.y) / ((cb / ca) + (ca / cb));
    let y = -(ca / cb) * (x - a.x) + a.y;

    let on_segment = ((a.x <= x && x <= b.x) || (b.x <= x && x <= a.x))
        && ((a.y <= y && y <= b.y) || (b.y <= y && y <= a.y));
    if on_segment {
        SegmentHit {
            closest: Vec2::new(x, y),
            distance: dl,
        }
    } else {
        let da = a.distance(p);
        let db = b.distance(p);
        if da < db {
            SegmentHit {
                closest: a,
                distance: da,
            }
        } else {
            SegmentHit {
                closest: b,
                distance: db,
            }
        }
    }
}

/// Where two circle boundaries meet
#[derive(Debug, Clone, Copy)]
pub struct CircleContact {
    /// Midpoint of the two boundary intersection points; lies on the
    /// line connecting the centers
    pub midpoint: Vec2,
    /// Distance between the circle centers
    pub center_distance: f32,
}

/// Intersection of two circle boundaries.
///
/// Returns `None` when the circles are disjoint, one fully contains the
/// other, or they are concentric with equal radii (the intersection is
/// the whole boundary, so no single midpoint exists).
pub fn circle_circle_intersection(
    c1: Vec2,
    r1: f32,
    c2: Vec2,
    r2: f32,
) -> Option<CircleContact> {
    let delta = c2 - c1;
    let d = delta.length();

    if d > r1 + r2 {
        return None;
    }
    if d < (r1 - r2).abs() {
        return None;
    }
    if d == 0.0 && r1 == r2 {
        return None;
    }

    // Distance from c1 to the chord through the intersection points;
    // the chord midpoint is the contact midpoint.
    let a = (r1 * r1 - r2 * r2 + d * d) / (2.0 * d);
    Some(CircleContact {
        midpoint: c1 + delta * (a / d),
        center_distance: d,
    })
}

/// Ray-casting point-in-polygon test.
///
/// Edges are taken cyclically (last corner connects back to the first);
/// horizontal edges never flip the crossing parity.
pub fn point_in_polygon(p: Vec2, corners: &[Vec2]) -> bool {
    let n = corners.len();
    if n == 0 {
        return false;
    }

    let mut inside = false;
    let mut p1 = corners[0];
    for i in 1..=n {
        let p2 = corners[i % n];
        if p.y > p1.y.min(p2.y) && p.y <= p1.y.max(p2.y) && p.x <= p1.x.max(p2.x) && p1.y != p2.y
        {
            let x_intersect = (p.y - p1.y) * (p2.x - p1.x) / (p2.y - p1.y) + p1.x;
            if p1.x == p2.x || p.x <= x_intersect {
                inside = !inside;
            }
        }
        p1 = p2;
    }
    inside
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    fn pentagon() -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, -10.0),
            Vec2::new(9.5, -3.1),
            Vec2::new(5.9, 8.1),
            Vec2::new(-5.9, 8.1),
            Vec2::new(-9.5, -3.1),
        ]
    }

    proptest! {
        #[test]
        fn segment_distance_never_negative(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            px in -500.0f32..500.0, py in -500.0f32..500.0,
        ) {
            let hit = segment_point_distance(
                Vec2::new(ax, ay),
                Vec2::new(bx, by),
                Vec2::new(px, py),
            );
            prop_assert!(hit.distance >= 0.0);
        }

        #[test]
        fn circle_midpoint_lies_on_center_line(
            cx in -200.0f32..200.0, cy in -200.0f32..200.0,
            r1 in 1.0f32..100.0, r2 in 1.0f32..100.0,
        ) {
            let c1 = Vec2::ZERO;
            let c2 = Vec2::new(cx, cy);
            if let Some(contact) = circle_circle_intersection(c1, r1, c2, r2) {
                let to_mid = contact.midpoint - c1;
                let to_c2 = c2 - c1;
                let cross = to_mid.x * to_c2.y - to_mid.y * to_c2.x;
                prop_assert!(cross.abs() < 1e-2 * to_c2.length().max(1.0) * to_mid.length().max(1.0));
            }
        }

        #[test]
        fn polygon_test_invariant_under_cyclic_rotation(
            px in -20.0f32..20.0, py in -20.0f32..20.0,
            shift in 0usize..5,
        ) {
            let corners = pentagon();
            let mut rotated = corners.clone();
            rotated.rotate_left(shift);
            let p = Vec2::new(px, py);
            prop_assert_eq!(point_in_polygon(p, &corners), point_in_polygon(p, &rotated));
        }
    }
}
