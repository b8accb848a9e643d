//! Climber state: limbs, vitals, and the top-level status machine data.
//!
//! A limb is always in exactly one of three states — detached, smearing
//! against the wall surface, or attached to a discrete hold. The attachment
//! carries only a hold id, never an owning reference: the route can be edited
//! out from under the climber, and a dangling id degrades to "detached".

use serde::{Deserialize, Serialize};

use crate::kinematics;

/// A 2D position in wall-normalized coordinates (0–100 on each axis,
/// y grows downward).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Returns this point shifted by (dx, dy).
    pub fn offset(&self, dx: f32, dy: f32) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// The four limb identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Limb {
    LeftHand,
    RightHand,
    LeftFoot,
    RightFoot,
}

impl Limb {
    /// Solver order matters: hands before feet, left before right.
    pub const ALL: [Limb; 4] = [
        Limb::LeftHand,
        Limb::RightHand,
        Limb::LeftFoot,
        Limb::RightFoot,
    ];

    pub fn is_hand(&self) -> bool {
        matches!(self, Limb::LeftHand | Limb::RightHand)
    }

    pub fn is_foot(&self) -> bool {
        !self.is_hand()
    }
}

/// Tri-state limb contact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LimbState {
    /// Dangling — imposes no constraint, position derived from body pose.
    Detached,
    /// Foot pressed against the bare wall surface at a free point.
    Smearing(Point),
    /// Gripping a discrete hold. `hold_id` is a weak reference into the
    /// active route's hold list.
    Attached { point: Point, hold_id: u32 },
}

impl LimbState {
    pub fn is_attached(&self) -> bool {
        matches!(self, LimbState::Attached { .. })
    }

    pub fn is_detached(&self) -> bool {
        matches!(self, LimbState::Detached)
    }
}

/// One `LimbState` per limb, always present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Limbs {
    pub left_hand: LimbState,
    pub right_hand: LimbState,
    pub left_foot: LimbState,
    pub right_foot: LimbState,
}

impl Limbs {
    /// All four limbs detached.
    pub fn detached() -> Self {
        Self {
            left_hand: LimbState::Detached,
            right_hand: LimbState::Detached,
            left_foot: LimbState::Detached,
            right_foot: LimbState::Detached,
        }
    }

    /// Grounded reset pose: hands free, feet smearing at floor level on
    /// either side of the given center-of-mass x.
    pub fn grounded(com_x: f32) -> Self {
        let half_hip = kinematics::HIP_WIDTH / 2.0;
        Self {
            left_hand: LimbState::Detached,
            right_hand: LimbState::Detached,
            left_foot: LimbState::Smearing(Point::new(com_x - half_hip, kinematics::GROUND_Y)),
            right_foot: LimbState::Smearing(Point::new(com_x + half_hip, kinematics::GROUND_Y)),
        }
    }

    pub fn get(&self, limb: Limb) -> &LimbState {
        match limb {
            Limb::LeftHand => &self.left_hand,
            Limb::RightHand => &self.right_hand,
            Limb::LeftFoot => &self.left_foot,
            Limb::RightFoot => &self.right_foot,
        }
    }

    pub fn set(&mut self, limb: Limb, state: LimbState) {
        match limb {
            Limb::LeftHand => self.left_hand = state,
            Limb::RightHand => self.right_hand = state,
            Limb::LeftFoot => self.left_foot = state,
            Limb::RightFoot => self.right_foot = state,
        }
    }

    /// Iterate in solver order (hands before feet, left before right).
    pub fn iter(&self) -> impl Iterator<Item = (Limb, &LimbState)> {
        Limb::ALL.iter().map(move |&l| (l, self.get(l)))
    }
}

/// Per-arm localized forearm fatigue, 0 (fresh) to 100 (forced release).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ArmPump {
    pub left: f32,
    pub right: f32,
}

/// Top-level climber status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClimberStatus {
    /// Standing on the ground, no risk.
    Idle,
    /// At least one limb engaged above the ground.
    Climbing,
    /// Airborne with all limbs forcibly detached; ends on landing.
    Falling,
    /// Both hands on finish holds. Terminal.
    Topped,
}

/// The complete mutable climber state, owned by the tick orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimberState {
    pub limbs: Limbs,
    pub center_of_mass: Point,
    /// Derived each tick from the change in center of mass, scaled to the
    /// reference frame duration. Not independently integrated.
    pub velocity: Point,
    /// Core energy, 0–100.
    pub stamina: f32,
    pub arm_pump: ArmPump,
    /// Consumable, 0–100. Depleted by time spent climbing.
    pub chalk: f32,
    /// Last computed instability score, 0–100.
    pub balance: f32,
    pub status: ClimberStatus,
}

impl ClimberState {
    /// Fresh state standing on the ground at the given x position.
    pub fn standing(com_x: f32) -> Self {
        Self {
            limbs: Limbs::grounded(com_x),
            center_of_mass: Point::new(com_x, kinematics::GROUND_Y - kinematics::STANDING_HEIGHT),
            velocity: Point::default(),
            stamina: 100.0,
            arm_pump: ArmPump::default(),
            chalk: 100.0,
            balance: 0.0,
            status: ClimberStatus::Idle,
        }
    }

    /// Clamp stamina, chalk, pump, and balance into [0, 100].
    pub fn clamp_vitals(&mut self) {
        self.stamina = self.stamina.clamp(0.0, 100.0);
        self.chalk = self.chalk.clamp(0.0, 100.0);
        self.arm_pump.left = self.arm_pump.left.clamp(0.0, 100.0);
        self.arm_pump.right = self.arm_pump.right.clamp(0.0, 100.0);
        self.balance = self.balance.clamp(0.0, 100.0);
    }

    /// Forcibly release every limb (fall entry).
    pub fn detach_all(&mut self) {
        self.limbs = Limbs::detached();
    }
}

impl Default for ClimberState {
    fn default() -> Self {
        Self::standing(50.0)
    }
}
