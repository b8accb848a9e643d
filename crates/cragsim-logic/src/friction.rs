//! Friction and slip model.
//!
//! Accumulates independent penalty terms: low chalk, campusing (no foot
//! contact), poor foot friction, smearing on steep walls, and hand pull
//! directions outside a hold's tolerance window. The penalty is used both to
//! flag a "slipping" warning and as an input term to the stability score.

use crate::climber::{ClimberState, Limb};
use crate::holds::{pull_tolerance, Hold, HoldTables};
use crate::route::Route;

/// Chalk below this level starts costing grip.
const CHALK_COMFORT: f32 = 30.0;
/// Friction coefficients below this are penalized for attached feet.
const FOOT_COEFF_FLOOR: f32 = 0.3;

/// Shoulder approximation sits this far above the center of mass when
/// computing a hand's pull direction.
const SHOULDER_LIFT: f32 = 10.0;

/// Compute the accumulated slip-risk penalty (>= 0).
pub fn friction_penalty(
    state: &ClimberState,
    route: &Route,
    tables: &HoldTables,
    realism: bool,
) -> f32 {
    let angle = route.wall_angle;
    let mut penalty = 0.0;

    // Dry hands: cheap to fix, costly to ignore.
    let chalk_rate = if realism { 0.8 } else { 0.5 };
    penalty += (CHALK_COMFORT - state.chalk).max(0.0) * chalk_rate;

    let left_foot = route.resolve(&state.limbs.left_foot);
    let right_foot = route.resolve(&state.limbs.right_foot);
    let hands_attached = [&state.limbs.left_hand, &state.limbs.right_hand]
        .iter()
        .filter(|ls| matches!(route.resolve(ls), Some((_, Some(_)))))
        .count();

    // Campusing: both feet off the wall entirely. Slab campusing is easy
    // (the wall leans away), anything steeper is heavily discouraged.
    if left_foot.is_none() && right_foot.is_none() && hands_attached >= 1 {
        penalty += if angle < 0.0 {
            30.0
        } else {
            150.0 + (angle / 45.0) * 60.0
        };
    }

    for foot in [&left_foot, &right_foot] {
        match foot {
            Some((_, Some(hold))) => {
                // Angle-adjusted coefficient; slab gives feet extra bite.
                let mut coeff = tables.friction(hold.hold_type) * angle.to_radians().cos();
                if angle < 0.0 {
                    coeff *= 1.2;
                }
                if coeff < FOOT_COEFF_FLOOR {
                    penalty += (FOOT_COEFF_FLOOR - coeff) * 40.0;
                }
            }
            Some((_, None)) => {
                // Smearing on the bare wall.
                penalty += if angle < 0.0 {
                    2.0
                } else {
                    let base = 6.0 + (angle / 45.0) * 20.0;
                    if realism && angle > 0.0 {
                        base * 1.5
                    } else {
                        base
                    }
                };
            }
            None => {}
        }
    }

    let strictness = if realism { 0.5 } else { 1.0 };
    let mismatch_rate = if realism { 80.0 } else { 40.0 };
    for limb in [Limb::LeftHand, Limb::RightHand] {
        if let Some((pos, Some(hold))) = route.resolve(state.limbs.get(limb)) {
            let diff = pull_angle_error(pos, state.center_of_mass, hold);
            let tolerance = pull_tolerance(hold.hold_type, strictness);
            if diff > tolerance && tolerance < 180.0 {
                penalty += (diff - tolerance) / (180.0 - tolerance) * mismatch_rate;
            }
        }
    }

    penalty
}

/// Angular error (degrees, 0–180) between the actual pull direction of a
/// hand and the hold's ideal pull direction.
///
/// The pull direction points from the hand toward an approximate shoulder
/// (center of mass lifted by 10 units); the ideal direction is the hold's
/// grain rotated a quarter turn.
pub fn pull_angle_error(hand: crate::climber::Point, center_of_mass: crate::climber::Point, hold: &Hold) -> f32 {
    let shoulder = center_of_mass.offset(0.0, -SHOULDER_LIFT);
    let pull = (shoulder.y - hand.y)
        .atan2(shoulder.x - hand.x)
        .to_degrees()
        .rem_euclid(360.0);
    let ideal = (hold.rotation + 90.0).rem_euclid(360.0);
    let diff = (pull - ideal).abs();
    diff.min(360.0 - diff)
}
