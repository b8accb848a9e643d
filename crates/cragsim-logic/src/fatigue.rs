//! Stamina and localized-fatigue (pump) model.
//!
//! Computes the per-drain-tick core stamina cost and per-arm pump deltas
//! from hold difficulty, load distribution, wall angle, and pull-angle
//! mismatch. Negative pump deltas are recovery.

use crate::climber::{ClimberState, Limb};
use crate::friction::pull_angle_error;
use crate::holds::HoldTables;
use crate::route::Route;

/// Resting metabolic cost while any limb is engaged.
const BASE_METABOLIC: f32 = 0.02;
/// Near-zero core cost while fully at rest.
const RESTING_CORE: f32 = 0.002;
/// Pump recovery per tick for a hanging (detached) arm.
const DETACHED_RECOVERY: f32 = -0.05;
/// Fast pump recovery while fully at rest.
const RESTING_RECOVERY: f32 = -0.15;
/// Pump recovery while shaking out on a restful hold.
const SHAKE_OUT_RECOVERY: f32 = -0.03;
/// Pump multiplier when both feet are off the wall.
const NO_FEET_MULT: f32 = 2.5;

/// Per-tick drain amounts. Positive drains, negative recovers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickDrain {
    pub core: f32,
    pub left_pump: f32,
    pub right_pump: f32,
}

/// Compute the drain for one drain interval.
pub fn tick_drain(
    state: &ClimberState,
    route: &Route,
    tables: &HoldTables,
    realism: bool,
) -> TickDrain {
    let any_active = state
        .limbs
        .iter()
        .any(|(_, ls)| route.resolve(ls).is_some());
    if !any_active {
        return TickDrain {
            core: RESTING_CORE,
            left_pump: RESTING_RECOVERY,
            right_pump: RESTING_RECOVERY,
        };
    }

    let angle = route.wall_angle;
    let feet_off = route.resolve(&state.limbs.left_foot).is_none()
        && route.resolve(&state.limbs.right_foot).is_none();

    let mut core = BASE_METABOLIC;
    if angle > 0.0 {
        core += angle / 45.0 * 0.06;
    }
    core += state.balance / 100.0 * if realism { 0.05 } else { 0.03 };
    if feet_off && angle > 0.0 {
        // Campusing: the core is doing all the footwork.
        core += if realism { 0.25 } else { 0.15 };
    }

    TickDrain {
        core,
        left_pump: hand_pump(state, route, tables, Limb::LeftHand, feet_off, realism),
        right_pump: hand_pump(state, route, tables, Limb::RightHand, feet_off, realism),
    }
}

fn hand_pump(
    state: &ClimberState,
    route: &Route,
    tables: &HoldTables,
    hand: Limb,
    feet_off: bool,
    realism: bool,
) -> f32 {
    let angle = route.wall_angle;
    match route.resolve(state.limbs.get(hand)) {
        Some((pos, Some(hold))) => {
            let mut difficulty = tables.drain(hold.hold_type);

            if realism {
                let error = pull_angle_error(pos, state.center_of_mass, hold);
                if error > 45.0 {
                    // Pulling against the grain loads the forearm hard.
                    difficulty *= 1.5 + (error - 45.0) / 135.0;
                }
            }

            // Shake-out: restful hold, stable body, gentle wall.
            if hold.hold_type.is_restful() && state.balance < 30.0 && angle < 10.0 {
                return SHAKE_OUT_RECOVERY;
            }

            let overhang_mult = 1.0 + angle.max(0.0) / 30.0;
            let foot_mult = if feet_off { NO_FEET_MULT } else { 1.0 };
            difficulty * overhang_mult * foot_mult * 0.8
        }
        // Hanging free (or dangling attachment) — slow recovery.
        _ => DETACHED_RECOVERY,
    }
}
