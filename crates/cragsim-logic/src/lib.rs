//! Pure climbing-body simulation logic for CragSim.
//!
//! This crate contains all physics-model logic that is independent of any
//! engine, renderer, or runtime. Functions take plain data and return
//! results, making them unit-testable and portable.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`climber`] | Climber state: limbs, tri-state contacts, vitals, status |
//! | [`constraint`] | Iterative center-of-mass constraint solver (reach/compression) |
//! | [`fatigue`] | Core stamina drain and per-arm pump accumulation/recovery |
//! | [`friction`] | Slip-risk penalty from chalk, campusing, and pull angles |
//! | [`holds`] | Hold types, hold records, per-type parameter tables |
//! | [`ik`] | Two-bone analytical inverse kinematics (elbows and knees) |
//! | [`kinematics`] | Body segment constants, anchor offsets, reach limits |
//! | [`route`] | Active route data and weak hold-reference resolution |
//! | [`stability`] | 0–100 instability score (barn door, slab, dynamic moves) |

pub mod climber;
pub mod constraint;
pub mod fatigue;
pub mod friction;
pub mod holds;
pub mod ik;
pub mod kinematics;
pub mod route;
pub mod stability;
