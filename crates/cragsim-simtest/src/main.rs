//! CragSim Headless Simulation Harness
//!
//! Validates pure simulation logic and data without a renderer.
//! Runs entirely in-process — no windowing, no networking.
//!
//! Usage:
//!   cargo run -p cragsim-simtest
//!   cargo run -p cragsim-simtest -- --verbose

use cragsim_core::config;
use cragsim_core::engine::{PlacementTarget, SimConfig, SimulationEngine};
use cragsim_logic::climber::{ClimberState, ClimberStatus, Limb, LimbState, Limbs, Point};
use cragsim_logic::constraint::constrain_body;
use cragsim_logic::fatigue::tick_drain;
use cragsim_logic::friction::friction_penalty;
use cragsim_logic::holds::{Hold, HoldTables, HoldType};
use cragsim_logic::ik::solve_two_bone;
use cragsim_logic::kinematics;
use cragsim_logic::route::Route;
use cragsim_logic::stability::instability_score;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::collections::BTreeMap;

// ── Hold tables (same JSON the engine ships with) ───────────────────────
const TABLES_JSON: &str = include_str!("../../../data/hold_tables.json");

#[derive(Debug, Deserialize)]
struct RawTables {
    drain: BTreeMap<String, f32>,
    friction: BTreeMap<String, f32>,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== CragSim Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Hold table validation
    results.extend(validate_hold_tables(verbose));

    // 2. Inverse kinematics sweep
    results.extend(validate_ik(verbose));

    // 3. Body constraint solver
    results.extend(validate_constraint_solver(verbose));

    // 4. Friction & slip model
    results.extend(validate_friction(verbose));

    // 5. Stability & balance model
    results.extend(validate_stability(verbose));

    // 6. Fatigue & pump model
    results.extend(validate_fatigue(verbose));

    // 7. Full engine scenarios
    results.extend(validate_engine_scenarios(verbose));

    // 8. Randomized soak run
    results.extend(validate_soak(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn hold(id: u32, x: f32, y: f32, t: HoldType, rotation: f32) -> Hold {
    Hold {
        id,
        x,
        y,
        hold_type: t,
        rotation,
        color: None,
    }
}

// ── 1. Hold Tables ──────────────────────────────────────────────────────

fn validate_hold_tables(verbose: bool) -> Vec<TestResult> {
    println!("--- Hold Tables ---");
    let mut results = Vec::new();

    let tables = match config::load_tables_from_str(TABLES_JSON) {
        Ok(t) => t,
        Err(e) => {
            results.push(TestResult {
                name: "tables_parse".into(),
                passed: false,
                detail: format!("parse error: {}", e),
            });
            return results;
        }
    };

    results.push(TestResult {
        name: "tables_parse".into(),
        passed: true,
        detail: "shipped tables parse and validate".into(),
    });

    // Raw shape check: both tables carry exactly the seven hold-type keys
    let raw: Result<RawTables, _> = serde_json::from_str(TABLES_JSON);
    let shape_ok = raw
        .as_ref()
        .map(|r| {
            r.drain.len() == 7
                && r.friction.len() == 7
                && r.drain.keys().eq(r.friction.keys())
        })
        .unwrap_or(false);
    results.push(TestResult {
        name: "tables_key_shape".into(),
        passed: shape_ok,
        detail: "7 hold-type keys, identical across drain and friction".into(),
    });

    // Every hold type has sane values
    let all_sane = HoldType::ALL.iter().all(|&t| {
        tables.drain(t) > 0.0 && (0.0..=1.0).contains(&tables.friction(t))
    });
    results.push(TestResult {
        name: "tables_values_sane".into(),
        passed: all_sane,
        detail: "drain > 0, friction in [0,1] for all 7 types".into(),
    });

    // Jugs are the easiest grip, slopers the hardest
    let ordering = tables.drain(HoldType::Jug) < tables.drain(HoldType::Crimp)
        && tables.drain(HoldType::Crimp) < tables.drain(HoldType::Sloper)
        && tables.friction(HoldType::Sloper) < tables.friction(HoldType::Crimp)
        && tables.friction(HoldType::Crimp) < tables.friction(HoldType::Jug);
    results.push(TestResult {
        name: "tables_difficulty_ordering".into(),
        passed: ordering,
        detail: "jug < crimp < sloper on drain, reversed on friction".into(),
    });

    // Start/finish holds are as forgiving as jugs
    results.push(TestResult {
        name: "tables_start_finish_restful".into(),
        passed: tables.drain(HoldType::Start) <= tables.drain(HoldType::Jug)
            && tables.friction(HoldType::Finish) >= tables.friction(HoldType::Jug),
        detail: "start/finish at least as easy as jugs".into(),
    });

    if verbose {
        println!("  Per-type values:");
        for t in HoldType::ALL {
            println!(
                "    {:8} drain={:.2} friction={:.2}",
                format!("{:?}", t),
                tables.drain(t),
                tables.friction(t)
            );
        }
    }

    results
}

// ── 2. Inverse Kinematics ───────────────────────────────────────────────

fn validate_ik(_verbose: bool) -> Vec<TestResult> {
    println!("--- Inverse Kinematics ---");
    let mut results = Vec::new();

    // Out of reach: joint lies on the root→target ray at len1
    let joint = solve_two_bone(Point::new(0.0, 0.0), Point::new(20.0, 0.0), 5.0, 5.0, 1.0);
    results.push(TestResult {
        name: "ik_out_of_reach_extends".into(),
        passed: (joint.x - 5.0).abs() < 1e-4 && joint.y.abs() < 1e-4,
        detail: format!("joint at ({:.2}, {:.2}), expected (5, 0)", joint.x, joint.y),
    });

    // In reach: both segment lengths hold exactly
    let root = Point::new(50.0, 60.0);
    let target = Point::new(55.0, 52.0);
    let joint = solve_two_bone(root, target, 6.5, 6.0, 1.0);
    let l1 = root.distance(joint);
    let l2 = joint.distance(target);
    results.push(TestResult {
        name: "ik_segment_lengths_exact".into(),
        passed: (l1 - 6.5).abs() < 1e-3 && (l2 - 6.0).abs() < 1e-3,
        detail: format!("l1={:.3} l2={:.3}", l1, l2),
    });

    // Bend sign flips the joint to the other side of the root→target line
    let up = solve_two_bone(root, target, 6.5, 6.0, 1.0);
    let down = solve_two_bone(root, target, 6.5, 6.0, -1.0);
    results.push(TestResult {
        name: "ik_bend_sign_mirrors".into(),
        passed: up != down && (root.distance(up) - root.distance(down)).abs() < 1e-3,
        detail: format!("up=({:.2},{:.2}) down=({:.2},{:.2})", up.x, up.y, down.x, down.y),
    });

    // Degenerate: target on top of root must not produce NaN
    let degenerate = solve_two_bone(root, root, 6.5, 6.0, 1.0);
    results.push(TestResult {
        name: "ik_degenerate_finite".into(),
        passed: degenerate.x.is_finite() && degenerate.y.is_finite(),
        detail: "coincident root/target stays finite".into(),
    });

    // Sweep: 360 targets at varied radii, all outputs finite, segment
    // lengths exact whenever the target is reachable
    let mut all_ok = true;
    for deg in 0..360 {
        let rad = (deg as f32).to_radians();
        for radius in [1.0f32, 4.0, 8.0, 12.0, 12.49, 20.0] {
            let target = root.offset(radius * rad.cos(), radius * rad.sin());
            let joint = solve_two_bone(root, target, 6.5, 6.0, 1.0);
            if !joint.x.is_finite() || !joint.y.is_finite() {
                all_ok = false;
                continue;
            }
            let reachable = radius <= 12.5 && radius >= 1.0;
            if reachable && (root.distance(joint) - 6.5).abs() > 1e-2 {
                all_ok = false;
            }
        }
    }
    results.push(TestResult {
        name: "ik_sweep_2160_targets".into(),
        passed: all_ok,
        detail: "360 angles x 6 radii: finite, lengths exact in range".into(),
    });

    results
}

// ── 3. Constraint Solver ────────────────────────────────────────────────

fn validate_constraint_solver(_verbose: bool) -> Vec<TestResult> {
    println!("--- Constraint Solver ---");
    let mut results = Vec::new();

    let route = Route::new(
        vec![
            hold(1, 45.0, 40.0, HoldType::Jug, 0.0),
            hold(2, 55.0, 40.0, HoldType::Jug, 0.0),
            hold(3, 46.0, 58.0, HoldType::Volume, 0.0),
            hold(4, 54.0, 58.0, HoldType::Volume, 0.0),
        ],
        0.0,
        100.0,
    );

    let mut limbs = Limbs::detached();
    limbs.set(
        Limb::LeftHand,
        LimbState::Attached {
            point: Point::new(45.0, 40.0),
            hold_id: 1,
        },
    );
    limbs.set(
        Limb::RightHand,
        LimbState::Attached {
            point: Point::new(55.0, 40.0),
            hold_id: 2,
        },
    );
    limbs.set(
        Limb::LeftFoot,
        LimbState::Attached {
            point: Point::new(46.0, 58.0),
            hold_id: 3,
        },
    );
    limbs.set(
        Limb::RightFoot,
        LimbState::Attached {
            point: Point::new(54.0, 58.0),
            hold_id: 4,
        },
    );

    // Reach invariant after solving, from a deliberately bad proposal
    let solved = constrain_body(Point::new(70.0, 80.0), &limbs, &route);
    let mut max_excess = 0.0f32;
    for limb in Limb::ALL {
        if let Some((pos, _)) = route.resolve(limbs.get(limb)) {
            let dist = kinematics::anchor(solved, limb).distance(pos);
            let limit = kinematics::max_reach(limb) * kinematics::REACH_SLACK;
            max_excess = max_excess.max(dist - limit);
        }
    }
    results.push(TestResult {
        name: "constraint_reach_invariant".into(),
        passed: max_excess < 0.5,
        detail: format!("max reach excess after solve: {:.3}", max_excess),
    });

    // Solving from an already-valid position barely moves the body
    let centered = Point::new(50.0, 49.0);
    let resolved = constrain_body(centered, &limbs, &route);
    results.push(TestResult {
        name: "constraint_stable_fixpoint".into(),
        passed: centered.distance(resolved) < 2.0,
        detail: format!("valid pose moved {:.3} units", centered.distance(resolved)),
    });

    // Detached limbs impose nothing
    let free = constrain_body(Point::new(30.0, 30.0), &Limbs::detached(), &route);
    results.push(TestResult {
        name: "constraint_detached_noop".into(),
        passed: free == Point::new(30.0, 30.0),
        detail: "all-detached body keeps the proposed position".into(),
    });

    // Dangling hold ids are skipped without panicking
    let mut dangling = Limbs::detached();
    dangling.set(
        Limb::LeftHand,
        LimbState::Attached {
            point: Point::new(45.0, 40.0),
            hold_id: 999,
        },
    );
    let out = constrain_body(Point::new(80.0, 80.0), &dangling, &route);
    results.push(TestResult {
        name: "constraint_dangling_skipped".into(),
        passed: out == Point::new(80.0, 80.0),
        detail: "unknown hold id imposes no constraint".into(),
    });

    results
}

// ── 4. Friction & Slip ──────────────────────────────────────────────────

fn validate_friction(_verbose: bool) -> Vec<TestResult> {
    println!("--- Friction & Slip ---");
    let mut results = Vec::new();
    let tables = HoldTables::default();

    // Chalk depletion raises the penalty
    let mut dry = ClimberState::default();
    dry.chalk = 0.0;
    let chalked = ClimberState::default();
    let route = Route::empty();
    let p_dry = friction_penalty(&dry, &route, &tables, false);
    let p_chalked = friction_penalty(&chalked, &route, &tables, false);
    results.push(TestResult {
        name: "friction_chalk_matters".into(),
        passed: p_dry > p_chalked,
        detail: format!("dry={:.1} chalked={:.1}", p_dry, p_chalked),
    });

    // Campusing penalty grows with wall angle
    let mut campus = ClimberState::default();
    campus.limbs = Limbs::detached();
    campus.limbs.set(
        Limb::LeftHand,
        LimbState::Attached {
            point: Point::new(50.0, 40.0),
            hold_id: 1,
        },
    );
    campus.center_of_mass = Point::new(50.0, 50.0);
    let mk = |angle| Route::new(vec![hold(1, 50.0, 40.0, HoldType::Jug, 0.0)], angle, 100.0);
    let p_slab = friction_penalty(&campus, &mk(-20.0), &tables, false);
    let p_vert = friction_penalty(&campus, &mk(0.0), &tables, false);
    let p_steep = friction_penalty(&campus, &mk(45.0), &tables, false);
    results.push(TestResult {
        name: "friction_campus_by_angle".into(),
        passed: p_slab < p_vert && p_vert < p_steep,
        detail: format!("slab={:.0} vert={:.0} 45°={:.0}", p_slab, p_vert, p_steep),
    });

    // Realism mode is strictly harsher for a sloppy pull on a crimp
    let mut puller = ClimberState::default();
    puller.limbs.set(
        Limb::LeftHand,
        LimbState::Attached {
            point: Point::new(50.0, 40.0),
            hold_id: 1,
        },
    );
    puller.center_of_mass = Point::new(50.0, 52.0);
    let crimp_route = Route::new(
        vec![hold(1, 50.0, 40.0, HoldType::Crimp, 180.0)],
        0.0,
        100.0,
    );
    let casual = friction_penalty(&puller, &crimp_route, &tables, false);
    let strict = friction_penalty(&puller, &crimp_route, &tables, true);
    results.push(TestResult {
        name: "friction_realism_harsher".into(),
        passed: strict > casual,
        detail: format!("casual={:.1} realism={:.1}", casual, strict),
    });

    // Penalty is non-negative in every configuration tried
    results.push(TestResult {
        name: "friction_non_negative".into(),
        passed: [p_dry, p_chalked, p_slab, p_vert, p_steep, casual, strict]
            .iter()
            .all(|&p| p >= 0.0),
        detail: "all sampled penalties >= 0".into(),
    });

    results
}

// ── 5. Stability & Balance ──────────────────────────────────────────────

fn validate_stability(_verbose: bool) -> Vec<TestResult> {
    println!("--- Stability & Balance ---");
    let mut results = Vec::new();
    let tables = HoldTables::default();

    // No contact at all: maximal instability
    let mut airborne = ClimberState::default();
    airborne.limbs = Limbs::detached();
    let score = instability_score(&airborne, &Route::empty(), &tables, false);
    results.push(TestResult {
        name: "stability_no_contact_maximal".into(),
        passed: (score - 100.0).abs() < 1e-4,
        detail: format!("score={:.1}", score),
    });

    // Centered four-point contact is near-stable
    let route = Route::new(
        vec![
            hold(1, 47.0, 40.0, HoldType::Jug, 0.0),
            hold(2, 53.0, 40.0, HoldType::Jug, 0.0),
            hold(3, 46.0, 58.0, HoldType::Jug, 0.0),
            hold(4, 54.0, 58.0, HoldType::Jug, 0.0),
        ],
        0.0,
        100.0,
    );
    let mut square = ClimberState::default();
    square.limbs = Limbs::detached();
    let contacts = [
        (Limb::LeftHand, 47.0, 40.0, 1),
        (Limb::RightHand, 53.0, 40.0, 2),
        (Limb::LeftFoot, 46.0, 58.0, 3),
        (Limb::RightFoot, 54.0, 58.0, 4),
    ];
    for (limb, x, y, id) in contacts {
        square.limbs.set(
            limb,
            LimbState::Attached {
                point: Point::new(x, y),
                hold_id: id,
            },
        );
    }
    square.center_of_mass = Point::new(50.0, 49.0);
    let square_score = instability_score(&square, &route, &tables, false);
    results.push(TestResult {
        name: "stability_square_stance_low".into(),
        passed: square_score < 30.0,
        detail: format!("four-point centered stance score={:.1}", square_score),
    });

    // Barn door: one hand, narrow feet, drifting sideways on an overhang
    let oh_route = Route::new(vec![hold(1, 50.0, 40.0, HoldType::Jug, 0.0)], 30.0, 100.0);
    let mut door = ClimberState::default();
    door.limbs = Limbs::detached();
    door.limbs.set(
        Limb::RightHand,
        LimbState::Attached {
            point: Point::new(50.0, 40.0),
            hold_id: 1,
        },
    );
    door.center_of_mass = Point::new(54.0, 50.0);
    door.velocity = Point::new(0.4, 0.0);
    let door_score = instability_score(&door, &oh_route, &tables, false);

    let mut braced = door.clone();
    braced.velocity = Point::default();
    let braced_score = instability_score(&braced, &oh_route, &tables, false);
    results.push(TestResult {
        name: "stability_barn_door".into(),
        passed: door_score > braced_score,
        detail: format!("swinging={:.1} > still={:.1}", door_score, braced_score),
    });

    // Clamped to [0, 100] even in pathological setups
    results.push(TestResult {
        name: "stability_clamped".into(),
        passed: [score, square_score, door_score, braced_score]
            .iter()
            .all(|&s| (0.0..=100.0).contains(&s)),
        detail: "all sampled scores in [0, 100]".into(),
    });

    results
}

// ── 6. Fatigue & Pump ───────────────────────────────────────────────────

fn validate_fatigue(_verbose: bool) -> Vec<TestResult> {
    println!("--- Fatigue & Pump ---");
    let mut results = Vec::new();
    let tables = HoldTables::default();

    // Resting on the ground recovers both arms
    let mut rest = ClimberState::default();
    rest.limbs = Limbs::detached();
    let drain = tick_drain(&rest, &Route::empty(), &tables, false);
    results.push(TestResult {
        name: "fatigue_rest_recovers".into(),
        passed: drain.left_pump < 0.0 && drain.right_pump < 0.0 && drain.core < 0.01,
        detail: format!(
            "core={:.3} left={:.3} right={:.3}",
            drain.core, drain.left_pump, drain.right_pump
        ),
    });

    // A crimp pumps faster than a jug
    let mk_state = |hold_id| {
        let mut s = ClimberState::default();
        s.limbs.set(
            Limb::LeftHand,
            LimbState::Attached {
                point: Point::new(50.0, 40.0),
                hold_id,
            },
        );
        s.center_of_mass = Point::new(50.0, 52.0);
        s
    };
    let route = Route::new(
        vec![
            hold(1, 50.0, 40.0, HoldType::Jug, 0.0),
            hold(2, 50.0, 40.0, HoldType::Crimp, 0.0),
        ],
        10.0,
        100.0,
    );
    let on_jug = tick_drain(&mk_state(1), &route, &tables, false);
    let on_crimp = tick_drain(&mk_state(2), &route, &tables, false);
    results.push(TestResult {
        name: "fatigue_crimp_pumps_faster".into(),
        passed: on_crimp.left_pump > on_jug.left_pump && on_jug.left_pump > 0.0,
        detail: format!("crimp={:.3} jug={:.3}", on_crimp.left_pump, on_jug.left_pump),
    });

    // Campusing multiplies the pump
    let mut campus = mk_state(2);
    campus.limbs.left_foot = LimbState::Detached;
    campus.limbs.right_foot = LimbState::Detached;
    let campused = tick_drain(&campus, &route, &tables, false);
    results.push(TestResult {
        name: "fatigue_campus_multiplier".into(),
        passed: campused.left_pump > on_crimp.left_pump * 2.0,
        detail: format!(
            "campus={:.3} > 2x footed={:.3}",
            campused.left_pump, on_crimp.left_pump
        ),
    });

    // A detached arm recovers while the other works
    let one_arm = tick_drain(&mk_state(1), &route, &tables, false);
    results.push(TestResult {
        name: "fatigue_hanging_arm_recovers".into(),
        passed: one_arm.right_pump < 0.0,
        detail: format!("free arm delta={:.3}", one_arm.right_pump),
    });

    // Steeper walls cost more core stamina
    let steep_route = Route::new(
        vec![hold(1, 50.0, 40.0, HoldType::Jug, 0.0)],
        45.0,
        100.0,
    );
    let steep = tick_drain(&mk_state(1), &steep_route, &tables, false);
    results.push(TestResult {
        name: "fatigue_angle_costs_core".into(),
        passed: steep.core > on_jug.core,
        detail: format!("45°={:.3} > 10°={:.3}", steep.core, on_jug.core),
    });

    results
}

// ── 7. Engine Scenarios ─────────────────────────────────────────────────

fn validate_engine_scenarios(verbose: bool) -> Vec<TestResult> {
    println!("--- Engine Scenarios ---");
    let mut results = Vec::new();

    // Standing idle: nothing drains, nothing falls
    let mut engine = SimulationEngine::new(Route::empty(), HoldTables::default());
    for _ in 0..300 {
        engine.update(1.0 / 60.0, &SimConfig::default());
    }
    results.push(TestResult {
        name: "engine_idle_is_safe".into(),
        passed: engine.state.status == ClimberStatus::Idle && engine.state.stamina == 100.0,
        detail: format!(
            "after 5s: status={:?} stamina={:.0}",
            engine.state.status, engine.state.stamina
        ),
    });

    // Hang on a jug: climber stays attached and vitals stay in range
    let route = Route::new(
        vec![
            hold(1, 50.0, 55.0, HoldType::Jug, 0.0),
            hold(2, 50.0, 70.0, HoldType::Volume, 0.0),
        ],
        10.0,
        100.0,
    );
    let mut engine = SimulationEngine::new(route, HoldTables::default());
    engine.place_limb(Limb::LeftHand, PlacementTarget::Hold(1));
    engine.place_limb(Limb::LeftFoot, PlacementTarget::Hold(2));
    let mut posed = engine.state.clone();
    posed.center_of_mass = Point::new(50.0, 63.0);
    engine.restore(posed, 0.0);
    let mut ok = true;
    for _ in 0..600 {
        engine.update(1.0 / 60.0, &SimConfig::default());
        let s = &engine.state;
        for v in [s.stamina, s.chalk, s.arm_pump.left, s.arm_pump.right, s.balance] {
            if !(0.0..=100.0).contains(&v) {
                ok = false;
            }
        }
        if !s.center_of_mass.x.is_finite() || !s.center_of_mass.y.is_finite() {
            ok = false;
        }
    }
    results.push(TestResult {
        name: "engine_hang_vitals_bounded".into(),
        passed: ok && engine.state.limbs.left_hand.is_attached(),
        detail: format!(
            "10s on jug: stamina={:.1} pump={:.1} attached={}",
            engine.state.stamina,
            engine.state.arm_pump.left,
            engine.state.limbs.left_hand.is_attached()
        ),
    });

    // Campusing on an overhang exhausts the arms far faster than resting
    let route = Route::new(vec![hold(1, 50.0, 50.0, HoldType::Crimp, 0.0)], 40.0, 100.0);
    let mut engine = SimulationEngine::new(route, HoldTables::default());
    engine.place_limb(Limb::LeftHand, PlacementTarget::Hold(1));
    engine.clear_limb(Limb::LeftFoot);
    engine.clear_limb(Limb::RightFoot);
    let mut posed = engine.state.clone();
    posed.center_of_mass = Point::new(50.0, 58.0);
    engine.restore(posed, 0.0);
    for _ in 0..600 {
        engine.update(1.0 / 60.0, &SimConfig::default());
        if engine.state.status == ClimberStatus::Falling {
            break;
        }
    }
    let pumped = engine.state.arm_pump.left > 5.0 || engine.state.status == ClimberStatus::Falling;
    results.push(TestResult {
        name: "engine_campus_exhausts".into(),
        passed: pumped,
        detail: format!(
            "10s campusing 40°: pump={:.1} status={:?}",
            engine.state.arm_pump.left, engine.state.status
        ),
    });

    // Top-out: both hands on finish holds ends the climb
    let route = Route::new(
        vec![
            hold(1, 45.0, 10.0, HoldType::Finish, 0.0),
            hold(2, 55.0, 10.0, HoldType::Finish, 0.0),
        ],
        0.0,
        100.0,
    );
    let mut engine = SimulationEngine::new(route, HoldTables::default());
    engine.place_limb(Limb::LeftHand, PlacementTarget::Hold(1));
    engine.place_limb(Limb::RightHand, PlacementTarget::Hold(2));
    let topped = engine.state.status == ClimberStatus::Topped;
    engine.update(1.0 / 60.0, &SimConfig::default());
    results.push(TestResult {
        name: "engine_top_out".into(),
        passed: topped && engine.state.status == ClimberStatus::Topped,
        detail: format!("status={:?} (terminal)", engine.state.status),
    });

    // Chalk slip: depleted chalk plus smeared feet on an overhang trips
    // the slip warning without (immediately) causing a fall
    let route = Route::new(vec![hold(1, 50.0, 55.0, HoldType::Jug, 0.0)], 30.0, 100.0);
    let mut engine = SimulationEngine::new(route, HoldTables::default());
    engine.place_limb(Limb::LeftHand, PlacementTarget::Hold(1));
    engine.place_limb(Limb::LeftFoot, PlacementTarget::Surface(Point::new(48.0, 72.0)));
    engine.place_limb(Limb::RightFoot, PlacementTarget::Surface(Point::new(52.0, 72.0)));
    let mut posed = engine.state.clone();
    posed.center_of_mass = Point::new(50.0, 63.0);
    posed.chalk = 0.0;
    engine.restore(posed, 0.0);
    let mut slipped = false;
    for _ in 0..60 {
        engine.update(1.0 / 60.0, &SimConfig::default());
        if engine.is_slipping() {
            slipped = true;
            break;
        }
    }
    results.push(TestResult {
        name: "engine_chalk_slip_warning".into(),
        passed: slipped,
        detail: format!(
            "no chalk on 30° smears: slipping={} status={:?}",
            slipped, engine.state.status
        ),
    });

    // Fall and land: a mid-wall fall ends on the ground, winded
    let mut engine = SimulationEngine::new(Route::empty(), HoldTables::default());
    let mut falling = engine.state.clone();
    falling.status = ClimberStatus::Falling;
    falling.limbs = Limbs::detached();
    falling.center_of_mass = Point::new(50.0, 30.0);
    engine.restore(falling, 0.0);
    let mut landed_at = None;
    for i in 0..600 {
        engine.update(1.0 / 60.0, &SimConfig::default());
        if engine.state.status == ClimberStatus::Idle {
            landed_at = Some(i);
            break;
        }
    }
    results.push(TestResult {
        name: "engine_fall_lands".into(),
        passed: landed_at.is_some() && engine.state.stamina <= 50.0,
        detail: format!(
            "landed after {:?} ticks, stamina={:.0}",
            landed_at, engine.state.stamina
        ),
    });

    // Save/load round trip through the persistence layer
    let route = Route::new(vec![hold(1, 50.0, 55.0, HoldType::Jug, 0.0)], 5.0, 100.0);
    let mut engine = SimulationEngine::new(route, HoldTables::default());
    engine.place_limb(Limb::LeftHand, PlacementTarget::Hold(1));
    for _ in 0..30 {
        engine.update(1.0 / 60.0, &SimConfig::default());
    }
    let mut buffer = Vec::new();
    let roundtrip = cragsim_core::persistence::save_simulation(&mut buffer, &engine)
        .is_ok()
        && match cragsim_core::persistence::load_simulation(&buffer[..]) {
            Ok(loaded) => loaded.state == engine.state,
            Err(_) => false,
        };
    results.push(TestResult {
        name: "engine_save_load".into(),
        passed: roundtrip,
        detail: format!("{} byte snapshot round-trips", buffer.len()),
    });

    if verbose {
        println!("  Snapshot size: {} bytes", buffer.len());
    }

    results
}

// ── 8. Randomized Soak ──────────────────────────────────────────────────

fn validate_soak(verbose: bool) -> Vec<TestResult> {
    println!("--- Randomized Soak ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(0xC11A6);

    let mut violations = 0u32;
    let mut panicked = false;
    let runs = 50;

    for _ in 0..runs {
        // Random route: 6-14 holds scattered over the wall
        let angle = rng.gen_range(-25.0..60.0);
        let n_holds: u32 = rng.gen_range(6..15);
        let holds: Vec<Hold> = (0..n_holds)
            .map(|i| {
                let t = HoldType::ALL[rng.gen_range(0..HoldType::ALL.len())];
                hold(
                    i,
                    rng.gen_range(20.0..80.0),
                    rng.gen_range(10.0..90.0),
                    t,
                    rng.gen_range(0.0..360.0),
                )
            })
            .collect();
        let route = Route::new(holds, angle, 100.0);
        let mut engine = SimulationEngine::new(route, HoldTables::default());
        let config = SimConfig {
            realism: rng.gen_bool(0.3),
            ..Default::default()
        };

        // 20 seconds of ticks with random limb events sprinkled in
        for tick in 0..1200u32 {
            if tick % 37 == 0 {
                let limb = Limb::ALL[rng.gen_range(0..4)];
                if rng.gen_bool(0.7) {
                    let id = rng.gen_range(0..n_holds);
                    engine.place_limb(limb, PlacementTarget::Hold(id));
                } else if limb.is_foot() {
                    engine.place_limb(
                        limb,
                        PlacementTarget::Surface(Point::new(
                            rng.gen_range(20.0..80.0),
                            rng.gen_range(40.0..100.0),
                        )),
                    );
                } else {
                    engine.clear_limb(limb);
                }
            }

            engine.update(1.0 / 60.0, &config);

            let s = &engine.state;
            let finite = s.center_of_mass.x.is_finite()
                && s.center_of_mass.y.is_finite()
                && s.velocity.x.is_finite()
                && s.velocity.y.is_finite();
            if !finite {
                panicked = true;
                break;
            }
            for v in [s.stamina, s.chalk, s.arm_pump.left, s.arm_pump.right, s.balance] {
                if !(0.0..=100.0).contains(&v) {
                    violations += 1;
                }
            }
            // Reach invariant: an airborne climber never stays attached
            // beyond release distance after a physics step
            if s.status == ClimberStatus::Climbing {
                for limb in Limb::ALL {
                    if let Some((pos, _)) = engine.route.resolve(s.limbs.get(limb)) {
                        let dist = kinematics::anchor(s.center_of_mass, limb).distance(pos);
                        if dist > kinematics::max_reach(limb) * kinematics::DETACH_FACTOR + 1.0 {
                            violations += 1;
                        }
                    }
                }
            }
        }
    }

    results.push(TestResult {
        name: "soak_no_nan".into(),
        passed: !panicked,
        detail: format!("{} random 20s runs, positions stayed finite", runs),
    });
    results.push(TestResult {
        name: "soak_invariants_hold".into(),
        passed: violations == 0,
        detail: format!("{} vitals/reach violations across {} runs", violations, runs),
    });

    if verbose {
        println!("  {} runs x 1200 ticks, seeded RNG", runs);
    }

    results
}
