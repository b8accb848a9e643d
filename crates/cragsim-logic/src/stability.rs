//! Balance / instability model.
//!
//! Produces a 0–100 instability score from the offset of the weighted system
//! center of mass relative to the support base, with wall-angle-specific
//! treatment: barn-door rotation around a single hand on overhangs, foot
//! re-weighting on slab, and a dynamic factor that suppresses the static
//! penalty during fast moves (momentum, not position, governs a dyno).
//!
//! A score of 100 forces a fall at the next drain evaluation.

use crate::climber::{ClimberState, Limb, Point};
use crate::friction::friction_penalty;
use crate::holds::HoldTables;
use crate::kinematics;
use crate::route::Route;

/// Torso share of the weighted system center of mass.
const TORSO_WEIGHT: f32 = 0.6;
/// Each limb's share of the weighted system center of mass.
const LIMB_WEIGHT: f32 = 0.1;
/// Barn-door deviation multiplier, empirically tuned.
const BARN_DOOR_MULT: f32 = 3.5;
/// Feet closer together than this cannot brace against rotation.
const BARN_DOOR_SPREAD: f32 = 10.0;

/// Compute the instability score, clamped to [0, 100].
pub fn instability_score(
    state: &ClimberState,
    route: &Route,
    tables: &HoldTables,
    realism: bool,
) -> f32 {
    let com = state.center_of_mass;
    let angle = route.wall_angle;

    // Active limb positions form the support base.
    let mut active: Vec<(Limb, Point)> = Vec::with_capacity(4);
    for (limb, ls) in state.limbs.iter() {
        if let Some((pos, _)) = route.resolve(ls) {
            active.push((limb, pos));
        }
    }
    if active.is_empty() {
        return 100.0;
    }

    let support_x = active.iter().map(|(_, p)| p.x).sum::<f32>() / active.len() as f32;

    // Weighted system center of mass: torso 0.6, each limb 0.1. Inactive
    // limbs hang at their anchor offset.
    let mut system_x = com.x * TORSO_WEIGHT;
    for limb in Limb::ALL {
        let x = active
            .iter()
            .find(|(l, _)| *l == limb)
            .map(|(_, p)| p.x)
            .unwrap_or_else(|| kinematics::anchor(com, limb).x);
        system_x += x * LIMB_WEIGHT;
    }

    let mut deviation = (system_x - support_x).abs();

    let attached_hands: Vec<Point> = [Limb::LeftHand, Limb::RightHand]
        .into_iter()
        .filter_map(|l| match route.resolve(state.limbs.get(l)) {
            Some((p, Some(_))) => Some(p),
            _ => None,
        })
        .collect();

    if angle > 0.0 && attached_hands.len() == 1 {
        // Barn door: rotating around a single hand on an overhang. Feet
        // without lateral spread cannot brace against it.
        let feet: Vec<f32> = active
            .iter()
            .filter(|(l, _)| l.is_foot())
            .map(|(_, p)| p.x)
            .collect();
        let spread = if feet.len() == 2 {
            (feet[0] - feet[1]).abs()
        } else {
            0.0
        };
        if spread < BARN_DOOR_SPREAD && state.velocity.x.abs() > 0.01 {
            deviation *= BARN_DOOR_MULT;
        }
        deviation += (com.x - attached_hands[0].x).abs() * 0.6;
    }

    if angle < 0.0 {
        // Slab: balance lives over the feet, not the whole support base.
        let feet: Vec<f32> = active
            .iter()
            .filter(|(l, _)| l.is_foot())
            .map(|(_, p)| p.x)
            .collect();
        if !feet.is_empty() {
            let foot_x = feet.iter().sum::<f32>() / feet.len() as f32;
            deviation = 0.5 * deviation + 0.5 * (system_x - foot_x).abs();
        }
    }

    // Fast moves ride on momentum — suppress the static-equilibrium penalty.
    let dynamic_factor = 1.0 / (1.0 + 3.0 * state.velocity.length());
    deviation *= dynamic_factor;

    let swing_rate = if angle > 0.0 { 25.0 } else { 10.0 };
    let score = friction_penalty(state, route, tables, realism) / 4.5
        + state.velocity.x.abs() * swing_rate
        + deviation * 2.5;

    score.clamp(0.0, 100.0)
}
