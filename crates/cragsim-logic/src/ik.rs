//! Two-bone analytical inverse kinematics.
//!
//! Solves for the interior joint (elbow or knee) as a circle-circle
//! intersection via the law of cosines. The solver is purely geometric and
//! must never fail: out-of-reach targets degrade to a fully extended limb,
//! and coincident root/target falls back to a minimum distance floor.

use crate::climber::Point;

/// Distance floor for degenerate (root ≈ target) input.
const MIN_DISTANCE: f32 = 1.0;
/// Targets within this epsilon of full extension are treated as out of reach.
const EXTENSION_EPSILON: f32 = 1e-3;

/// Compute the interior joint position for a two-segment limb.
///
/// `bend_sign` selects which of the two circle intersections to use (+1.0 or
/// -1.0) so that left and right limbs bend in opposite, natural directions.
pub fn solve_two_bone(root: Point, target: Point, len1: f32, len2: f32, bend_sign: f32) -> Point {
    let dx = target.x - root.x;
    let dy = target.y - root.y;
    let dist = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);

    let base_angle = dy.atan2(dx);

    if dist >= len1 + len2 - EXTENSION_EPSILON {
        // Out of reach — fully extended along the root→target ray.
        return Point::new(
            root.x + len1 * base_angle.cos(),
            root.y + len1 * base_angle.sin(),
        );
    }

    // Law of cosines; clamp against floating-point overshoot.
    let cos_joint = ((len1 * len1 + dist * dist - len2 * len2) / (2.0 * len1 * dist))
        .clamp(-1.0, 1.0);
    let joint_angle = base_angle + bend_sign.signum() * cos_joint.acos();

    Point::new(
        root.x + len1 * joint_angle.cos(),
        root.y + len1 * joint_angle.sin(),
    )
}
