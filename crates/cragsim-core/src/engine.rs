//! Simulation engine - the per-tick orchestrator and climber state machine.
//!
//! The tick is a pure function of (previous state, route, config, elapsed
//! time), invoked once per host rendering callback. Elapsed time is clamped
//! to bound integration error on slow frames; slower evaluations (balance,
//! friction, fatigue) run on a fixed drain interval rather than every frame.
//! External limb placement events are applied between ticks, never during
//! one.

use cragsim_logic::climber::{ClimberState, ClimberStatus, Limb, LimbState, Limbs, Point};
use cragsim_logic::constraint::constrain_body;
use cragsim_logic::fatigue::tick_drain;
use cragsim_logic::friction::friction_penalty;
use cragsim_logic::holds::HoldTables;
use cragsim_logic::kinematics;
use cragsim_logic::route::Route;
use cragsim_logic::stability::instability_score;

/// Elapsed time per tick is clamped to this (seconds).
const MAX_TICK_SECONDS: f32 = 0.05;
/// Velocity is expressed in units per reference frame (60 Hz).
const REF_FRAME_SECONDS: f32 = 1.0 / 60.0;
/// Balance/friction/fatigue evaluation interval (seconds of simulated time).
const DRAIN_INTERVAL: f32 = 0.1;

/// Downward speed while falling, units per reference frame.
const FALL_SPEED: f32 = 1.2;
/// Baseline gravity pull on the center of mass, units per reference frame.
const GRAVITY: f32 = 0.35;
/// Fraction of derived velocity carried into the next frame.
const MOMENTUM_CARRY: f32 = 0.85;
/// Horizontal momentum damping while falling.
const FALL_DAMPING: f32 = 0.95;

/// Stamina recovery per second while standing on the ground.
const GROUND_RECOVERY: f32 = 3.0;
/// Stamina ceiling applied on landing from a fall.
const LANDING_STAMINA: f32 = 50.0;
/// Chalk used per drain interval while climbing.
const CHALK_PER_DRAIN: f32 = 0.05;

/// Per-tick mode flags, passed explicitly so the tick stays a pure function
/// of its inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimConfig {
    /// Stricter pull-angle windows and harsher penalties.
    pub realism: bool,
    /// Suspends stamina/pump drain (debug override).
    pub infinite_stamina: bool,
    /// User is dragging the center of mass: gravity and auto-physics pause.
    pub user_dragging: bool,
}

/// Where an external placement event puts a limb.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacementTarget {
    /// Onto a specific hold by id.
    Hold(u32),
    /// Against the bare wall surface (feet only - smearing).
    Surface(Point),
}

/// Main simulation engine. Owns the climber state exclusively; all mutation
/// happens inside `update` or a discrete event method.
pub struct SimulationEngine {
    pub state: ClimberState,
    pub route: Route,
    pub tables: HoldTables,

    sim_time: f64,
    drain_accum: f32,
    prev_com: Point,
    slipping: bool,
}

impl SimulationEngine {
    pub fn new(route: Route, tables: HoldTables) -> Self {
        let state = ClimberState::standing(50.0);
        let prev_com = state.center_of_mass;
        Self {
            state,
            route,
            tables,
            sim_time: 0.0,
            drain_accum: 0.0,
            prev_com,
            slipping: false,
        }
    }

    /// Reinitialize the climber at the grounded reset pose.
    pub fn reset(&mut self) {
        self.state = ClimberState::standing(50.0);
        self.prev_com = self.state.center_of_mass;
        self.drain_accum = 0.0;
        self.slipping = false;
    }

    /// Swap in a new route and reset the climber.
    pub fn set_route(&mut self, route: Route) {
        self.route = route;
        self.reset();
    }

    /// Restore a previously saved climber state and clock.
    pub fn restore(&mut self, state: ClimberState, sim_time: f64) {
        self.prev_com = state.center_of_mass;
        self.state = state;
        self.sim_time = sim_time;
        self.drain_accum = 0.0;
        self.slipping = false;
    }

    /// Whether the last drain evaluation flagged slip risk.
    pub fn is_slipping(&self) -> bool {
        self.slipping
    }

    /// Total simulated time in seconds.
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// Advance the simulation by `delta_seconds` (clamped to 50 ms).
    pub fn update(&mut self, delta_seconds: f32, config: &SimConfig) {
        // Terminal: a topped climber is frozen entirely.
        if self.state.status == ClimberStatus::Topped {
            return;
        }

        let dt = delta_seconds.clamp(0.0, MAX_TICK_SECONDS);
        if dt <= 0.0 {
            return;
        }
        self.sim_time += dt as f64;
        let frames = dt / REF_FRAME_SECONDS;

        // 1. Derive velocity from center-of-mass movement since last tick.
        let com = self.state.center_of_mass;
        self.state.velocity = Point::new(
            (com.x - self.prev_com.x) / frames,
            (com.y - self.prev_com.y) / frames,
        );
        self.prev_com = com;

        // 2. Falling: simple ballistic descent until the ground.
        if self.state.status == ClimberStatus::Falling {
            self.integrate_fall(frames);
            return;
        }

        let standing_y = kinematics::GROUND_Y - kinematics::STANDING_HEIGHT;

        if !config.user_dragging {
            if self.state.center_of_mass.y >= standing_y - 0.25 {
                // 3. Grounded: snap to standing, recover, and go idle.
                self.settle_on_ground(dt);
                return;
            }

            // 4. Airborne: gravity, muscle activation, constraints.
            self.integrate_airborne(frames);
        }

        // 5. Fixed-interval drain evaluation.
        self.drain_accum += dt;
        if self.drain_accum > DRAIN_INTERVAL {
            self.drain_accum = 0.0;
            if self.state.status == ClimberStatus::Climbing && !config.user_dragging {
                self.apply_drain(config);
            }
        }

        // 6. Unsupported free-fall: hands off and well above the ground.
        if !config.user_dragging && self.state.status != ClimberStatus::Falling {
            let hands_on = self.state.limbs.left_hand.is_attached()
                && self.route.resolve(&self.state.limbs.left_hand).is_some()
                || self.state.limbs.right_hand.is_attached()
                    && self.route.resolve(&self.state.limbs.right_hand).is_some();
            let above_ground =
                self.state.center_of_mass.y < kinematics::GROUND_Y - kinematics::FREE_FALL_CLEARANCE;
            if !hands_on && above_ground {
                self.state.center_of_mass.y += 0.5 * frames;
                if self.state.status == ClimberStatus::Climbing {
                    self.fall();
                }
            }
        }
    }

    fn integrate_fall(&mut self, frames: f32) {
        let vel = self.state.velocity;
        self.state.center_of_mass.y += FALL_SPEED * frames;
        self.state.center_of_mass.x += vel.x * FALL_DAMPING * frames;
        self.state.center_of_mass.x = self.state.center_of_mass.x.clamp(0.0, 100.0);

        let standing_y = kinematics::GROUND_Y - kinematics::STANDING_HEIGHT;
        if self.state.center_of_mass.y >= standing_y {
            // Landed: back on two feet, winded.
            self.state.center_of_mass = Point::new(self.state.center_of_mass.x, standing_y);
            self.state.limbs = Limbs::grounded(self.state.center_of_mass.x);
            self.state.velocity = Point::default();
            self.state.stamina = self.state.stamina.min(LANDING_STAMINA);
            self.state.status = ClimberStatus::Idle;
            self.slipping = false;
        }
    }

    fn settle_on_ground(&mut self, dt: f32) {
        let standing_y = kinematics::GROUND_Y - kinematics::STANDING_HEIGHT;
        self.state.center_of_mass.y = standing_y;
        self.state.velocity = Point::default();
        self.state.stamina = (self.state.stamina + GROUND_RECOVERY * dt).min(100.0);
        self.state.arm_pump.left = 0.0;
        self.state.arm_pump.right = 0.0;
        self.state.balance = 0.0;
        self.state.status = ClimberStatus::Idle;
        self.slipping = false;

        // Feet find the floor on their own.
        let com_x = self.state.center_of_mass.x;
        if self.route.resolve(&self.state.limbs.left_foot).is_none() {
            self.state.limbs.left_foot = LimbState::Smearing(Point::new(
                com_x - kinematics::HIP_WIDTH / 2.0,
                kinematics::GROUND_Y,
            ));
        }
        if self.route.resolve(&self.state.limbs.right_foot).is_none() {
            self.state.limbs.right_foot = LimbState::Smearing(Point::new(
                com_x + kinematics::HIP_WIDTH / 2.0,
                kinematics::GROUND_Y,
            ));
        }
    }

    fn integrate_airborne(&mut self, frames: f32) {
        let com = self.state.center_of_mass;
        let angle = self.route.wall_angle;

        let mut gravity = GRAVITY;
        if angle >= 0.0 {
            // Overhangs pull the body away from the wall.
            gravity *= 1.0 + angle / 90.0 * 0.5;
        } else {
            // The slab carries most of the weight; keep a small residual.
            gravity *= (1.0 + angle / 60.0).max(0.15);
        }

        // Standing or mantling: weight is over the feet, not hanging.
        let foot_positions: Vec<Point> = [&self.state.limbs.left_foot, &self.state.limbs.right_foot]
            .iter()
            .filter_map(|ls| self.route.resolve(ls).map(|(p, _)| p))
            .collect();
        if !foot_positions.is_empty() {
            let foot_y =
                foot_positions.iter().map(|p| p.y).sum::<f32>() / foot_positions.len() as f32;
            if com.y < foot_y - 1.0 {
                gravity *= 0.35;
            }
        }

        // Muscle activation: with a hand on and stamina to spare, a nearly
        // stationary climber holds tension instead of sagging.
        let hands_on = matches!(
            self.route.resolve(&self.state.limbs.left_hand),
            Some((_, Some(_)))
        ) || matches!(
            self.route.resolve(&self.state.limbs.right_hand),
            Some((_, Some(_)))
        );
        let mut carry = MOMENTUM_CARRY;
        let speed = self.state.velocity.length();
        if hands_on && self.state.stamina > 5.0 && speed < 1.0 {
            let activation = (self.state.stamina / 20.0).min(1.0);
            gravity *= 1.0 - 0.85 * activation;
            carry *= 1.0 - 0.6 * activation;
        }

        let proposed = Point::new(
            (com.x + self.state.velocity.x * carry * frames).clamp(0.0, 100.0),
            com.y + self.state.velocity.y * carry * frames + gravity * frames,
        );

        // Auto-detach anything stretched past 105% of reach before solving,
        // so an out-of-range limb cannot yank the body ("wall bounce").
        for limb in Limb::ALL {
            if let Some((pos, _)) = self.route.resolve(self.state.limbs.get(limb)) {
                let anchor = kinematics::anchor(proposed, limb);
                if anchor.distance(pos) > kinematics::max_reach(limb) * kinematics::DETACH_FACTOR {
                    self.state.limbs.set(limb, LimbState::Detached);
                }
            }
        }

        let mut solved = constrain_body(proposed, &self.state.limbs, &self.route);
        solved.x = solved.x.clamp(0.0, 100.0);
        solved.y = solved.y.min(kinematics::GROUND_Y - kinematics::STANDING_HEIGHT);
        self.state.center_of_mass = solved;
    }

    fn apply_drain(&mut self, config: &SimConfig) {
        self.state.balance =
            instability_score(&self.state, &self.route, &self.tables, config.realism);
        let penalty = friction_penalty(&self.state, &self.route, &self.tables, config.realism);
        let slip_threshold = if config.realism { 15.0 } else { 20.0 };
        self.slipping = penalty > slip_threshold;

        if self.state.balance >= 100.0 {
            self.fall();
            return;
        }

        if !config.infinite_stamina {
            let drain = tick_drain(&self.state, &self.route, &self.tables, config.realism);
            self.state.stamina -= drain.core;
            self.state.arm_pump.left += drain.left_pump;
            self.state.arm_pump.right += drain.right_pump;
        }
        self.state.chalk -= CHALK_PER_DRAIN;
        self.state.clamp_vitals();

        // A fully pumped forearm opens the hand on its own.
        if self.state.arm_pump.left >= 100.0 {
            self.state.limbs.left_hand = LimbState::Detached;
        }
        if self.state.arm_pump.right >= 100.0 {
            self.state.limbs.right_hand = LimbState::Detached;
        }

        if self.state.stamina <= 0.0 {
            self.fall();
        }
    }

    fn fall(&mut self) {
        self.state.status = ClimberStatus::Falling;
        self.state.detach_all();
        self.slipping = false;
    }

    // ── External events ─────────────────────────────────────────────────

    /// Place a limb onto a hold or (feet only) against the wall surface.
    ///
    /// Returns false if the placement is invalid: unknown hold id, hand
    /// smear, or a terminal/falling climber.
    pub fn place_limb(&mut self, limb: Limb, target: PlacementTarget) -> bool {
        if matches!(
            self.state.status,
            ClimberStatus::Falling | ClimberStatus::Topped
        ) {
            return false;
        }

        match target {
            PlacementTarget::Hold(id) => {
                let Some(hold) = self.route.hold(id) else {
                    return false;
                };
                let point = Point::new(hold.x, hold.y);
                self.state
                    .limbs
                    .set(limb, LimbState::Attached { point, hold_id: id });
            }
            PlacementTarget::Surface(point) => {
                if !limb.is_foot() {
                    return false;
                }
                self.state.limbs.set(limb, LimbState::Smearing(point));
            }
        }

        if self.both_hands_on_finish() {
            self.state.status = ClimberStatus::Topped;
        } else if self.state.status == ClimberStatus::Idle {
            self.state.status = ClimberStatus::Climbing;
        }
        true
    }

    /// Release a limb.
    pub fn clear_limb(&mut self, limb: Limb) {
        if self.state.status == ClimberStatus::Topped {
            return;
        }
        self.state.limbs.set(limb, LimbState::Detached);
    }

    /// Drag the center of mass to a target point (user manipulation).
    /// Limbs stretched past their release distance let go; the rest
    /// constrain the final position.
    pub fn drag_center_of_mass(&mut self, to: Point) {
        if matches!(
            self.state.status,
            ClimberStatus::Falling | ClimberStatus::Topped
        ) {
            return;
        }
        for limb in Limb::ALL {
            if let Some((pos, _)) = self.route.resolve(self.state.limbs.get(limb)) {
                let anchor = kinematics::anchor(to, limb);
                if anchor.distance(pos) > kinematics::max_reach(limb) * kinematics::DETACH_FACTOR {
                    self.state.limbs.set(limb, LimbState::Detached);
                }
            }
        }
        self.state.center_of_mass = constrain_body(to, &self.state.limbs, &self.route);
    }

    fn both_hands_on_finish(&self) -> bool {
        let on_finish = |ls: &LimbState| match ls {
            LimbState::Attached { hold_id, .. } => self.route.is_finish_hold(*hold_id),
            _ => false,
        };
        on_finish(&self.state.limbs.left_hand) && on_finish(&self.state.limbs.right_hand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cragsim_logic::climber::Limbs;
    use cragsim_logic::holds::{Hold, HoldType};

    fn hold(id: u32, x: f32, y: f32, t: HoldType) -> Hold {
        Hold {
            id,
            x,
            y,
            hold_type: t,
            rotation: 0.0,
            color: None,
        }
    }

    fn engine_with(holds: Vec<Hold>, angle: f32) -> SimulationEngine {
        SimulationEngine::new(Route::new(holds, angle, 100.0), HoldTables::default())
    }

    #[test]
    fn test_delta_clamped_to_50ms() {
        let mut engine = engine_with(vec![], 0.0);
        engine.update(10.0, &SimConfig::default());
        assert!((engine.sim_time() - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_standing_idle_recovers() {
        let mut engine = engine_with(vec![], 0.0);
        engine.state.stamina = 60.0;
        let mut last = engine.state.stamina;
        for _ in 0..10 {
            engine.update(1.0 / 60.0, &SimConfig::default());
            assert!(engine.state.stamina >= last);
            assert_eq!(engine.state.status, ClimberStatus::Idle);
            last = engine.state.stamina;
        }
        assert!(engine.state.stamina > 60.0);
    }

    #[test]
    fn test_vitals_stay_clamped_over_many_ticks() {
        let mut engine = engine_with(
            vec![hold(1, 50.0, 60.0, HoldType::Sloper)],
            45.0,
        );
        engine.place_limb(Limb::LeftHand, PlacementTarget::Hold(1));
        engine.state.center_of_mass = Point::new(50.0, 68.0);
        engine.prev_com = engine.state.center_of_mass;
        engine.state.chalk = 1.0;
        for _ in 0..600 {
            engine.update(1.0 / 60.0, &SimConfig::default());
            let s = &engine.state;
            for v in [
                s.stamina,
                s.chalk,
                s.arm_pump.left,
                s.arm_pump.right,
                s.balance,
            ] {
                assert!((0.0..=100.0).contains(&v), "out of range: {v}");
            }
        }
    }

    #[test]
    fn test_place_limb_transitions_to_climbing() {
        let mut engine = engine_with(vec![hold(1, 50.0, 80.0, HoldType::Jug)], 0.0);
        assert_eq!(engine.state.status, ClimberStatus::Idle);
        assert!(engine.place_limb(Limb::RightHand, PlacementTarget::Hold(1)));
        assert_eq!(engine.state.status, ClimberStatus::Climbing);
    }

    #[test]
    fn test_unknown_hold_rejected() {
        let mut engine = engine_with(vec![], 0.0);
        assert!(!engine.place_limb(Limb::RightHand, PlacementTarget::Hold(42)));
        assert_eq!(engine.state.status, ClimberStatus::Idle);
    }

    #[test]
    fn test_hand_cannot_smear() {
        let mut engine = engine_with(vec![], 0.0);
        assert!(!engine.place_limb(
            Limb::LeftHand,
            PlacementTarget::Surface(Point::new(50.0, 50.0))
        ));
        assert!(engine.place_limb(
            Limb::LeftFoot,
            PlacementTarget::Surface(Point::new(50.0, 90.0))
        ));
    }

    #[test]
    fn test_both_hands_on_finish_tops_out() {
        let mut engine = engine_with(
            vec![
                hold(1, 45.0, 10.0, HoldType::Finish),
                hold(2, 55.0, 10.0, HoldType::Finish),
            ],
            0.0,
        );
        engine.place_limb(Limb::LeftHand, PlacementTarget::Hold(1));
        assert_eq!(engine.state.status, ClimberStatus::Climbing);
        engine.place_limb(Limb::RightHand, PlacementTarget::Hold(2));
        assert_eq!(engine.state.status, ClimberStatus::Topped);
    }

    #[test]
    fn test_topped_is_terminal() {
        let mut engine = engine_with(
            vec![
                hold(1, 45.0, 10.0, HoldType::Finish),
                hold(2, 55.0, 10.0, HoldType::Finish),
            ],
            0.0,
        );
        engine.place_limb(Limb::LeftHand, PlacementTarget::Hold(1));
        engine.place_limb(Limb::RightHand, PlacementTarget::Hold(2));

        let before = engine.state.clone();
        for _ in 0..100 {
            engine.update(1.0 / 60.0, &SimConfig::default());
        }
        assert_eq!(engine.state.stamina, before.stamina);
        assert_eq!(engine.state.chalk, before.chalk);
        assert_eq!(engine.state.arm_pump, before.arm_pump);
        assert_eq!(engine.state.limbs, before.limbs);

        // Events are frozen out too
        engine.clear_limb(Limb::LeftHand);
        assert_eq!(engine.state.limbs, before.limbs);
    }

    #[test]
    fn test_unsupported_climber_free_falls() {
        let mut engine = engine_with(vec![], 0.0);
        // Mid-wall with nothing on: the free-fall guard fires immediately
        engine.state.status = ClimberStatus::Climbing;
        engine.state.limbs = Limbs::detached();
        engine.state.center_of_mass = Point::new(50.0, 50.0);
        engine.prev_com = engine.state.center_of_mass;

        engine.update(1.0 / 60.0, &SimConfig::default());

        assert_eq!(engine.state.status, ClimberStatus::Falling);
        for (_, ls) in engine.state.limbs.iter() {
            assert!(ls.is_detached());
        }
    }

    #[test]
    fn test_balance_100_forces_fall_at_drain_tick() {
        let mut engine = engine_with(vec![], 0.0);
        // No contact at all gives maximal instability. Low enough on the
        // wall that the free-fall guard stays quiet, high enough to stay
        // airborne for a few ticks — the fall must come from the drain
        // evaluation itself.
        engine.state.status = ClimberStatus::Climbing;
        engine.state.limbs = Limbs::detached();
        engine.state.center_of_mass = Point::new(50.0, 83.0);
        engine.prev_com = engine.state.center_of_mass;

        engine.update(0.04, &SimConfig::default());
        engine.update(0.04, &SimConfig::default());
        assert_eq!(engine.state.status, ClimberStatus::Climbing);
        engine.update(0.04, &SimConfig::default());

        assert_eq!(engine.state.status, ClimberStatus::Falling);
        for (_, ls) in engine.state.limbs.iter() {
            assert!(ls.is_detached());
        }
    }

    #[test]
    fn test_stamina_zero_forces_fall() {
        let mut engine = engine_with(vec![hold(1, 50.0, 55.0, HoldType::Crimp)], 20.0);
        engine.place_limb(Limb::LeftHand, PlacementTarget::Hold(1));
        engine.state.center_of_mass = Point::new(50.0, 63.0);
        engine.prev_com = engine.state.center_of_mass;
        engine.state.stamina = 0.05;

        for _ in 0..20 {
            engine.update(1.0 / 60.0, &SimConfig::default());
        }
        assert_eq!(engine.state.status, ClimberStatus::Falling);
    }

    #[test]
    fn test_infinite_stamina_override() {
        let mut engine = engine_with(vec![hold(1, 50.0, 55.0, HoldType::Sloper)], 30.0);
        engine.place_limb(Limb::LeftHand, PlacementTarget::Hold(1));
        engine.state.center_of_mass = Point::new(50.0, 63.0);
        engine.prev_com = engine.state.center_of_mass;

        let config = SimConfig {
            infinite_stamina: true,
            ..Default::default()
        };
        for _ in 0..30 {
            engine.update(1.0 / 60.0, &config);
        }
        assert_eq!(engine.state.stamina, 100.0);
        assert_eq!(engine.state.arm_pump.left, 0.0);
        // Chalk is still consumed - it is a physical resource, not effort
        assert!(engine.state.chalk < 100.0);
    }

    #[test]
    fn test_pumped_hand_releases() {
        let mut engine = engine_with(vec![hold(1, 50.0, 55.0, HoldType::Crimp)], 30.0);
        engine.place_limb(Limb::LeftHand, PlacementTarget::Hold(1));
        engine.state.center_of_mass = Point::new(50.0, 63.0);
        engine.prev_com = engine.state.center_of_mass;
        engine.state.arm_pump.left = 99.9;

        for _ in 0..20 {
            engine.update(1.0 / 60.0, &SimConfig::default());
        }
        assert!(engine.state.limbs.left_hand.is_detached());
    }

    #[test]
    fn test_falling_lands_idle_with_stamina_penalty() {
        let mut engine = engine_with(vec![], 0.0);
        engine.state.status = ClimberStatus::Falling;
        engine.state.limbs = Limbs::detached();
        engine.state.center_of_mass = Point::new(50.0, 40.0);
        engine.prev_com = engine.state.center_of_mass;
        engine.state.stamina = 90.0;

        for _ in 0..120 {
            engine.update(1.0 / 60.0, &SimConfig::default());
            if engine.state.status != ClimberStatus::Falling {
                break;
            }
        }
        assert_eq!(engine.state.status, ClimberStatus::Idle);
        assert!(engine.state.stamina <= LANDING_STAMINA);
        assert!(matches!(engine.state.limbs.left_foot, LimbState::Smearing(_)));
        assert!(matches!(engine.state.limbs.right_foot, LimbState::Smearing(_)));
    }

    #[test]
    fn test_auto_detach_beyond_reach() {
        let mut engine = engine_with(vec![hold(1, 50.0, 30.0, HoldType::Jug)], 0.0);
        engine.place_limb(Limb::LeftHand, PlacementTarget::Hold(1));
        // Body forced far from the hold: > 105% of hand reach from anchor
        engine.state.center_of_mass = Point::new(50.0, 70.0);
        engine.prev_com = engine.state.center_of_mass;

        engine.update(1.0 / 60.0, &SimConfig::default());
        assert!(engine.state.limbs.left_hand.is_detached());
    }

    #[test]
    fn test_dangling_attachment_degrades_to_detached() {
        let mut engine = engine_with(vec![hold(1, 50.0, 55.0, HoldType::Jug)], 0.0);
        engine.place_limb(Limb::LeftHand, PlacementTarget::Hold(1));
        engine.state.center_of_mass = Point::new(50.0, 63.0);
        engine.prev_com = engine.state.center_of_mass;

        // Route edited out from under the climber
        engine.route.holds.clear();

        // Must not panic; the limb imposes no constraint and the climber,
        // now unsupported, enters free fall.
        for _ in 0..10 {
            engine.update(1.0 / 60.0, &SimConfig::default());
        }
        assert_eq!(engine.state.status, ClimberStatus::Falling);
    }

    #[test]
    fn test_user_dragging_suspends_physics() {
        let mut engine = engine_with(vec![hold(1, 50.0, 40.0, HoldType::Jug)], 0.0);
        engine.place_limb(Limb::LeftHand, PlacementTarget::Hold(1));
        engine.state.center_of_mass = Point::new(50.0, 48.0);
        engine.prev_com = engine.state.center_of_mass;

        let dragging = SimConfig {
            user_dragging: true,
            ..Default::default()
        };
        let com_before = engine.state.center_of_mass;
        let stamina_before = engine.state.stamina;
        for _ in 0..30 {
            engine.update(1.0 / 60.0, &dragging);
        }
        assert_eq!(engine.state.center_of_mass, com_before);
        assert_eq!(engine.state.stamina, stamina_before);
    }

    #[test]
    fn test_drag_respects_constraints_and_releases() {
        let mut engine = engine_with(vec![hold(1, 50.0, 40.0, HoldType::Jug)], 0.0);
        engine.place_limb(Limb::LeftHand, PlacementTarget::Hold(1));

        // Small drag: hand keeps hold, body constrained within reach
        engine.drag_center_of_mass(Point::new(50.0, 52.0));
        assert!(engine.state.limbs.left_hand.is_attached());
        let anchor = kinematics::anchor(engine.state.center_of_mass, Limb::LeftHand);
        assert!(
            anchor.distance(Point::new(50.0, 40.0))
                <= kinematics::max_reach(Limb::LeftHand) * kinematics::REACH_SLACK * 1.001
        );

        // Huge drag: hand releases rather than stretching
        engine.drag_center_of_mass(Point::new(90.0, 90.0));
        assert!(engine.state.limbs.left_hand.is_detached());
    }

    #[test]
    fn test_reset_restores_grounded_pose() {
        let mut engine = engine_with(vec![hold(1, 50.0, 40.0, HoldType::Jug)], 0.0);
        engine.place_limb(Limb::LeftHand, PlacementTarget::Hold(1));
        engine.state.stamina = 10.0;
        engine.reset();
        assert_eq!(engine.state.status, ClimberStatus::Idle);
        assert_eq!(engine.state.stamina, 100.0);
        assert!(engine.state.limbs.left_hand.is_detached());
    }
}
