//! Collision shapes
//!
//! A [`Shape`] is the geometric footprint of a table object. Paddles
//! and slopes are polygons, bouncers and rollover lamps are circles,
//! and a bare point is allowed for degenerate fixtures. Shapes know how
//! to report their bounding box, test containment, and find the
//! boundary point nearest to an approaching ball.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{
    circle_circle_intersection, point_in_polygon, segment_point_distance, Aabb,
};
use crate::table::TableError;

/// Geometric footprint of a table object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Shape {
    Point(Vec2),
    Circle { center: Vec2, radius: f32 },
    Polygon { corners: Vec<Vec2> },
}

/// Nearest point on a shape boundary as seen from a ball
#[derive(Debug, Clone, Copy)]
pub struct SurfaceContact {
    /// Contact point on the shape boundary
    pub point: Vec2,
    /// For polygons and points: distance from the ball center to
    /// `point`. For circles: distance between the two centers.
    pub distance: f32,
    /// The polygon edge the contact lies on, if any
    pub edge: Option<[Vec2; 2]>,
}

impl Shape {
    pub fn circle(center: Vec2, radius: f32) -> Result<Self, TableError> {
        if radius <= 0.0 {
            return Err(TableError::NonPositiveRadius(radius));
        }
        Ok(Self::Circle { center, radius })
    }

    pub fn polygon(corners: Vec<Vec2>) -> Result<Self, TableError> {
        if corners.len() < 2 {
            return Err(TableError::TooFewCorners(corners.len()));
        }
        Ok(Self::Polygon { corners })
    }

    pub fn bounding_box(&self) -> Aabb {
        match self {
            Self::Point(p) => Aabb::from_points(&[*p]),
            Self::Circle { center, radius } => Aabb::from_circle(*center, *radius),
            Self::Polygon { corners } => Aabb::from_points(corners),
        }
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        match self {
            Self::Point(q) => *q == p,
            Self::Circle { center, radius } => center.distance_squared(p) <= radius * radius,
            Self::Polygon { corners } => point_in_polygon(p, corners),
        }
    }

    /// Mean of the polygon corners (or the natural center for the
    /// other variants). Rotation pivots here.
    pub fn centroid(&self) -> Vec2 {
        match self {
            Self::Point(p) => *p,
            Self::Circle { center, .. } => *center,
            Self::Polygon { corners } => {
                let sum: Vec2 = corners.iter().copied().sum();
                sum / corners.len() as f32
            }
        }
    }

    /// Rotate the shape by `delta` radians about its centroid.
    pub fn rotate(&mut self, delta: f32) {
        let pivot = self.centroid();
        let (sin, cos) = delta.sin_cos();
        match self {
            Self::Point(_) | Self::Circle { .. } => {}
            Self::Polygon { corners } => {
                for c in corners.iter_mut() {
                    let rel = *c - pivot;
                    *c = pivot + Vec2::new(rel.x * cos - rel.y * sin, rel.x * sin + rel.y * cos);
                }
            }
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Self::Point(p) => *p += delta,
            Self::Circle { center, .. } => *center += delta,
            Self::Polygon { corners } => {
                for c in corners.iter_mut() {
                    *c += delta;
                }
            }
        }
    }

    /// Boundary point nearest to a ball at `from` with radius
    /// `from_radius`.
    ///
    /// Polygons scan every edge (including the closing edge back to the
    /// first corner) and keep the closest. Circles intersect their
    /// boundary with the ball's; no intersection means no contact.
    pub fn nearest_boundary_point(&self, from: Vec2, from_radius: f32) -> Option<SurfaceContact> {
        match self {
            Self::Point(p) => Some(SurfaceContact {
                point: *p,
                distance: p.distance(from),
                edge: None,
            }),
            Self::Circle { center, radius } => {
                let contact = circle_circle_intersection(from, from_radius, *center, *radius)?;
                Some(SurfaceContact {
                    point: contact.midpoint,
                    distance: contact.center_distance,
                    edge: None,
                })
            }
            Self::Polygon { corners } => {
                let n = corners.len();
                let mut best: Option<SurfaceContact> = None;
                for i in 0..n {
                    let a = corners[i];
                    let b = corners[(i + 1) % n];
                    let hit = segment_point_distance(a, b, from);
                    if best.is_none_or(|c| hit.distance < c.distance) {
                        best = Some(SurfaceContact {
                            point: hit.closest,
                            distance: hit.distance,
                            edge: Some([a, b]),
                        });
                    }
                }
                best
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Shape {
        Shape::polygon(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_constructor_validation() {
        assert!(Shape::circle(Vec2::ZERO, 0.0).is_err());
        assert!(Shape::circle(Vec2::ZERO, -3.0).is_err());
        assert!(Shape::polygon(vec![Vec2::ZERO]).is_err());
        assert!(Shape::circle(Vec2::ZERO, 1.0).is_ok());
        assert!(Shape::polygon(vec![Vec2::ZERO, Vec2::ONE]).is_ok());
    }

    #[test]
    fn test_centroid() {
        assert!((square().centroid() - Vec2::new(5.0, 5.0)).length() < 1e-6);
    }

    #[test]
    fn test_rotation_preserves_centroid() {
        let mut s = square();
        let before = s.centroid();
        s.rotate(0.7);
        assert!((s.centroid() - before).length() < 1e-4);
    }

    #[test]
    fn test_rotation_quarter_turn() {
        let mut s = square();
        s.rotate(std::f32::consts::FRAC_PI_2);
        // Corner (0,0) swings to (10,0) about the centroid (5,5)
        let Shape::Polygon { corners } = &s else {
            panic!("not a polygon");
        };
        assert!((corners[0] - Vec2::new(10.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_translate() {
        let mut s = square();
        s.translate(Vec2::new(3.0, -2.0));
        assert!((s.centroid() - Vec2::new(8.0, 3.0)).length() < 1e-6);
    }

    #[test]
    fn test_contains_point() {
        assert!(square().contains_point(Vec2::new(5.0, 5.0)));
        assert!(!square().contains_point(Vec2::new(11.0, 5.0)));

        let c = Shape::circle(Vec2::new(5.0, 5.0), 2.0).unwrap();
        assert!(c.contains_point(Vec2::new(6.0, 5.0)));
        assert!(!c.contains_point(Vec2::new(8.0, 5.0)));
    }

    #[test]
    fn test_polygon_nearest_edge() {
        let contact = square()
            .nearest_boundary_point(Vec2::new(5.0, -4.0), 1.0)
            .unwrap();
        assert!((contact.distance - 4.0).abs() < 1e-5);
        assert!((contact.point - Vec2::new(5.0, 0.0)).length() < 1e-5);
        let edge = contact.edge.unwrap();
        assert_eq!(edge[0], Vec2::new(0.0, 0.0));
        assert_eq!(edge[1], Vec2::new(10.0, 0.0));
    }

    #[test]
    fn test_polygon_closing_edge() {
        // Nearest edge is the wrap-around from the last corner back to
        // the first.
        let contact = square()
            .nearest_boundary_point(Vec2::new(-4.0, 5.0), 1.0)
            .unwrap();
        assert!((contact.distance - 4.0).abs() < 1e-5);
        let edge = contact.edge.unwrap();
        assert_eq!(edge[0], Vec2::new(0.0, 10.0));
        assert_eq!(edge[1], Vec2::new(0.0, 0.0));
    }

    #[test]
    fn test_circle_contact_uses_center_distance() {
        let c = Shape::circle(Vec2::new(10.0, 0.0), 5.0).unwrap();
        let contact = c.nearest_boundary_point(Vec2::ZERO, 6.0).unwrap();
        assert!((contact.distance - 10.0).abs() < 1e-5);
        assert!(contact.edge.is_none());

        // Far away: no boundary intersection, no contact
        assert!(c.nearest_boundary_point(Vec2::new(100.0, 0.0), 6.0).is_none());
    }
}
