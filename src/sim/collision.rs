//! Collision resolution
//!
//! One pass over the table per ball per tick: a cheap bounding-box
//! broad phase, then the exact narrow phase against each candidate's
//! boundary. Contacts trigger the object (scoring, lamp flips), scale
//! the ball's speed by the object's factor, and reflect the velocity
//! off the surface tangent. Objects are visited in table order and the
//! last contact wins. Arena walls and the drain are handled after the
//! object pass.

use std::f32::consts::{FRAC_PI_2, PI};

use rand_pcg::Pcg32;

use super::object::{GameObject, ObjectKind};
use super::shape::Shape;
use super::state::{Ball, ScoreSink};
use crate::table::TableConfig;
use glam::Vec2;

/// Whether the ball survived the tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BallOutcome {
    Live,
    Lost,
}

pub(crate) struct ResolveReport {
    pub outcome: BallOutcome,
    pub points: u64,
}

/// Resolve all contacts for one ball.
///
/// Position, angle and speed are folded locally and written back only
/// if the ball survives; a drained ball leaves no stale state behind.
pub(crate) fn resolve_ball<S: ScoreSink>(
    ball: &mut Ball,
    objects: &mut [GameObject],
    config: &TableConfig,
    now_secs: f32,
    rng: &mut Pcg32,
    sink: &mut S,
) -> ResolveReport {
    let radius = ball.radius;
    let mut pos = ball.pos;
    let mut angle = ball.angle;
    let mut speed = ball.speed;
    let mut points_gained: u64 = 0;

    for obj in objects.iter_mut() {
        // Earlier contacts may have moved the ball already
        let ball_box = super::geometry::Aabb::from_circle(pos, radius);
        if !ball_box.overlaps(&obj.shape.bounding_box()) {
            continue;
        }
        let Some(contact) = obj.shape.nearest_boundary_point(pos, radius) else {
            continue;
        };

        // Fast balls get a wider touch margin so they cannot tunnel
        // through a thin surface in one step.
        let margin = radius + speed * 2.0 / 3.0;
        let touches = match obj.shape {
            Shape::Circle { radius: obj_r, .. } => contact.distance - obj_r <= margin,
            _ => contact.distance <= margin,
        };
        let inside = obj.shape.contains_point(pos);
        if !touches && !inside {
            continue;
        }

        // The cooldown gates the trigger and its score only; the ball
        // deflects on every contact.
        if obj.is_action_applicable(now_secs) {
            if obj.trigger(now_secs) {
                sink.on_state_change(obj.id);
            }
            if obj.points > 0 {
                points_gained += obj.points;
                sink.add_points(obj.points);
                log::debug!("object {} scored {} points", obj.id, obj.points);
            }
        }
        if obj.passive {
            continue;
        }

        speed *= obj.speed_factor(&contact, pos, rng);

        if touches {
            // Reflect across the surface tangent and push the ball out
            // along the surface normal by the penetration depth.
            let to_contact = contact.point - pos;
            let tangent = to_contact.y.atan2(to_contact.x);
            angle = 2.0 * tangent - angle;

            let hit_angle = FRAC_PI_2 + tangent;
            let depth = (radius - contact.distance).abs();
            pos.x -= hit_angle.sin() * depth;
            pos.y += hit_angle.cos() * depth;
        } else {
            // Center already inside: mirror the position through the
            // contact point and nudge clear vertically.
            pos = 2.0 * contact.point - pos;
            pos.y += if pos.y > contact.point.y { 4.0 } else { -4.0 };
        }

        if let ObjectKind::Paddle(state) = &obj.kind {
            if let Some(thrown) = state.override_angle() {
                angle = thrown;
            }
        }
    }

    // Arena walls. The bottom edge drains the ball when it falls
    // through the gap between the lower slopes.
    if pos.x > config.width - radius {
        pos.x = 2.0 * (config.width - radius) - pos.x;
        angle = -angle;
        speed *= config.bounce_elasticity;
    }
    if pos.x < radius {
        pos.x = 2.0 * radius - pos.x;
        angle = -angle;
        speed *= config.bounce_elasticity;
    }
    if pos.y > config.height - radius {
        if config.in_loss_zone(pos.x) {
            return ResolveReport {
                outcome: BallOutcome::Lost,
                points: points_gained,
            };
        }
        pos.y = 2.0 * (config.height - radius) - pos.y;
        angle = PI - angle;
        speed *= config.bounce_elasticity;
    }
    if pos.y < radius {
        pos.y = 2.0 * radius - pos.y;
        angle = PI - angle;
        speed *= config.bounce_elasticity;
    }

    ball.pos = pos;
    ball.angle = angle;
    ball.speed = speed;
    ResolveReport {
        outcome: BallOutcome::Live,
        points: points_gained,
    }
}
