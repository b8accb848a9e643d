//! Fixed anatomical constants — segment lengths, anchor offsets, reach.
//!
//! All values are in wall-normalized units (percent of wall size). They are
//! tuned for game feel on a 0–100 wall, not for anatomical accuracy.

use crate::climber::{Limb, Point};

pub const TORSO_HEIGHT: f32 = 12.0;
pub const SHOULDER_WIDTH: f32 = 6.0;
pub const HIP_WIDTH: f32 = 5.0;
pub const ARM_UPPER: f32 = 6.5;
pub const ARM_LOWER: f32 = 6.0;
pub const LEG_UPPER: f32 = 7.0;
pub const LEG_LOWER: f32 = 6.5;
pub const HEAD_RADIUS: f32 = 2.5;

/// Full hand reach from the shoulder anchor.
pub const HAND_REACH: f32 = ARM_UPPER + ARM_LOWER;
/// Full foot reach from the hip anchor.
pub const FOOT_REACH: f32 = LEG_UPPER + LEG_LOWER;

/// Body may not compress a limb closer to its anchor than this.
pub const MIN_COMPRESSION: f32 = 3.0;
/// Constraint solver allows 1% of slack past full reach.
pub const REACH_SLACK: f32 = 1.01;
/// Limbs auto-detach past 105% of reach rather than yanking the body.
pub const DETACH_FACTOR: f32 = 1.05;

/// Floor level in wall-normalized coordinates (y grows downward).
pub const GROUND_Y: f32 = 100.0;
/// Standing center-of-mass height above the ground.
pub const STANDING_HEIGHT: f32 = 14.0;
/// A hand-free climber higher than this above the ground is in free fall.
pub const FREE_FALL_CLEARANCE: f32 = 18.0;

/// Fixed offset of a limb's anchor joint (shoulder or hip) relative to the
/// center of mass.
pub fn anchor_offset(limb: Limb) -> Point {
    let half_shoulder = SHOULDER_WIDTH / 2.0;
    let half_hip = HIP_WIDTH / 2.0;
    match limb {
        Limb::LeftHand => Point::new(-half_shoulder, -TORSO_HEIGHT * 0.4),
        Limb::RightHand => Point::new(half_shoulder, -TORSO_HEIGHT * 0.4),
        Limb::LeftFoot => Point::new(-half_hip, TORSO_HEIGHT * 0.5),
        Limb::RightFoot => Point::new(half_hip, TORSO_HEIGHT * 0.5),
    }
}

/// Anchor joint position for a limb given the center of mass.
pub fn anchor(center_of_mass: Point, limb: Limb) -> Point {
    let off = anchor_offset(limb);
    center_of_mass.offset(off.x, off.y)
}

/// Maximum anchor-to-limb distance.
pub fn max_reach(limb: Limb) -> f32 {
    if limb.is_hand() {
        HAND_REACH
    } else {
        FOOT_REACH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reach_is_segment_sum() {
        assert_eq!(max_reach(Limb::LeftHand), ARM_UPPER + ARM_LOWER);
        assert_eq!(max_reach(Limb::RightFoot), LEG_UPPER + LEG_LOWER);
    }

    #[test]
    fn test_anchor_offsets_mirror() {
        let left = anchor_offset(Limb::LeftHand);
        let right = anchor_offset(Limb::RightHand);
        assert_eq!(left.x, -right.x);
        assert_eq!(left.y, right.y);

        let lf = anchor_offset(Limb::LeftFoot);
        let rf = anchor_offset(Limb::RightFoot);
        assert_eq!(lf.x, -rf.x);
        assert_eq!(lf.y, rf.y);
    }

    #[test]
    fn test_hand_anchors_above_foot_anchors() {
        // y grows downward: shoulders must have smaller y offsets than hips
        assert!(anchor_offset(Limb::LeftHand).y < anchor_offset(Limb::LeftFoot).y);
    }

    #[test]
    fn test_anchor_applies_offset() {
        let com = Point::new(50.0, 60.0);
        let a = anchor(com, Limb::RightHand);
        assert_eq!(a.x, 50.0 + SHOULDER_WIDTH / 2.0);
        assert_eq!(a.y, 60.0 - TORSO_HEIGHT * 0.4);
    }
}
