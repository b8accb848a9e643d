//! Iterative body constraint solver.
//!
//! Projects a proposed center of mass so that no engaged limb exceeds its
//! max reach or collapses below the minimum compression distance. This is a
//! relaxation scheme, not an exact solve: opposing constraints converge
//! toward a compromise over a fixed number of passes. The pass count and the
//! limb order (hands before feet, left before right) are part of the tuned
//! swing behavior — do not change them.

use crate::climber::{Limbs, Point};
use crate::kinematics;
use crate::route::Route;

/// Relaxation pass count, empirically tuned.
const PASSES: usize = 4;
/// Distances below this are too degenerate to push against.
const NEGLIGIBLE_DISTANCE: f32 = 0.1;

/// Adjust a proposed center of mass against the engaged limbs.
///
/// Detached limbs and dangling attachments impose no constraint.
pub fn constrain_body(proposed: Point, limbs: &Limbs, route: &Route) -> Point {
    let mut com = proposed;

    for _ in 0..PASSES {
        for (limb, state) in limbs.iter() {
            let Some((limb_pos, _)) = route.resolve(state) else {
                continue;
            };

            let anchor = kinematics::anchor(com, limb);
            let dx = limb_pos.x - anchor.x;
            let dy = limb_pos.y - anchor.y;
            let dist = (dx * dx + dy * dy).sqrt();

            let max_reach = kinematics::max_reach(limb) * kinematics::REACH_SLACK;
            if dist > max_reach {
                // Pull the body toward the limb so the anchor sits at max
                // reach — this is what makes a fixed hand swing like a
                // pendulum under gravity.
                let excess = dist - max_reach;
                com.x += dx / dist * excess;
                com.y += dy / dist * excess;
            } else if dist < kinematics::MIN_COMPRESSION && dist > NEGLIGIBLE_DISTANCE {
                // Push the body away to keep it from collapsing onto the limb.
                let shortfall = kinematics::MIN_COMPRESSION - dist;
                com.x -= dx / dist * shortfall;
                com.y -= dy / dist * shortfall;
            }
        }
    }

    com
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::climber::{Limb, LimbState};
    use crate::holds::{Hold, HoldType};

    fn route_with_hold(id: u32, x: f32, y: f32) -> Route {
        Route::new(
            vec![Hold {
                id,
                x,
                y,
                hold_type: HoldType::Jug,
                rotation: 0.0,
                color: None,
            }],
            0.0,
            100.0,
        )
    }

    fn attach(limbs: &mut Limbs, limb: Limb, x: f32, y: f32, hold_id: u32) {
        limbs.set(
            limb,
            LimbState::Attached {
                point: Point::new(x, y),
                hold_id,
            },
        );
    }

    #[test]
    fn test_detached_limbs_impose_nothing() {
        let route = Route::empty();
        let limbs = Limbs::detached();
        let proposed = Point::new(50.0, 60.0);
        assert_eq!(constrain_body(proposed, &limbs, &route), proposed);
    }

    #[test]
    fn test_overreach_pulls_body_toward_limb() {
        let route = route_with_hold(1, 50.0, 20.0);
        let mut limbs = Limbs::detached();
        attach(&mut limbs, Limb::LeftHand, 50.0, 20.0, 1);

        // Body proposed far below the hold — well past hand reach
        let proposed = Point::new(50.0, 60.0);
        let adjusted = constrain_body(proposed, &limbs, &route);

        let anchor = kinematics::anchor(adjusted, Limb::LeftHand);
        let dist = anchor.distance(Point::new(50.0, 20.0));
        assert!(
            dist <= kinematics::max_reach(Limb::LeftHand) * kinematics::REACH_SLACK * 1.001,
            "dist={dist}"
        );
        assert!(adjusted.y < proposed.y); // pulled upward
    }

    #[test]
    fn test_compression_pushes_body_away() {
        let route = route_with_hold(1, 50.0, 40.0);
        let mut limbs = Limbs::detached();
        attach(&mut limbs, Limb::LeftHand, 50.0, 40.0, 1);

        // Body proposed so the shoulder anchor nearly sits on the hold
        let off = kinematics::anchor_offset(Limb::LeftHand);
        let proposed = Point::new(50.0 - off.x - 1.0, 40.0 - off.y);
        let adjusted = constrain_body(proposed, &limbs, &route);

        let anchor = kinematics::anchor(adjusted, Limb::LeftHand);
        let dist = anchor.distance(Point::new(50.0, 40.0));
        assert!(
            dist >= kinematics::MIN_COMPRESSION * 0.999,
            "dist={dist} below min compression"
        );
    }

    #[test]
    fn test_dangling_attachment_ignored() {
        let route = Route::empty(); // hold 1 does not exist
        let mut limbs = Limbs::detached();
        attach(&mut limbs, Limb::LeftHand, 50.0, 20.0, 1);

        let proposed = Point::new(50.0, 60.0);
        assert_eq!(constrain_body(proposed, &limbs, &route), proposed);
    }

    #[test]
    fn test_opposing_constraints_compromise() {
        // Two hands on holds far apart: neither can be fully satisfied, the
        // relaxation should settle between them.
        let route = Route::new(
            vec![
                Hold {
                    id: 1,
                    x: 30.0,
                    y: 40.0,
                    hold_type: HoldType::Jug,
                    rotation: 0.0,
                    color: None,
                },
                Hold {
                    id: 2,
                    x: 70.0,
                    y: 40.0,
                    hold_type: HoldType::Jug,
                    rotation: 0.0,
                    color: None,
                },
            ],
            0.0,
            100.0,
        );
        let mut limbs = Limbs::detached();
        attach(&mut limbs, Limb::LeftHand, 30.0, 40.0, 1);
        attach(&mut limbs, Limb::RightHand, 70.0, 40.0, 2);

        let adjusted = constrain_body(Point::new(30.0, 55.0), &limbs, &route);
        // Pulled toward the middle of the two holds rather than snapping
        // fully to either side.
        assert!(adjusted.x > 32.0 && adjusted.x < 68.0, "x={}", adjusted.x);
    }

    #[test]
    fn test_smearing_foot_constrains() {
        let route = Route::empty();
        let mut limbs = Limbs::detached();
        limbs.set(Limb::LeftFoot, LimbState::Smearing(Point::new(50.0, 90.0)));

        // Proposed body too far above the foot
        let adjusted = constrain_body(Point::new(50.0, 55.0), &limbs, &route);
        let anchor = kinematics::anchor(adjusted, Limb::LeftFoot);
        let dist = anchor.distance(Point::new(50.0, 90.0));
        assert!(dist <= kinematics::max_reach(Limb::LeftFoot) * kinematics::REACH_SLACK * 1.001);
    }
}
