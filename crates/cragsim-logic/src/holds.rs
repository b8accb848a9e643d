//! Hold types, hold records, and the per-type parameter tables.
//!
//! Drain rates and friction coefficients are configuration data supplied at
//! startup (see `data/hold_tables.json`), not values computed at runtime.
//! `HoldTables::default()` matches the shipped table.

use serde::{Deserialize, Serialize};

/// The seven hold types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoldType {
    Jug,
    Crimp,
    Sloper,
    Pocket,
    Volume,
    Start,
    Finish,
}

impl HoldType {
    pub const ALL: [HoldType; 7] = [
        HoldType::Jug,
        HoldType::Crimp,
        HoldType::Sloper,
        HoldType::Pocket,
        HoldType::Volume,
        HoldType::Start,
        HoldType::Finish,
    ];

    /// Holds restful enough to shake out on.
    pub fn is_restful(&self) -> bool {
        matches!(self, HoldType::Jug | HoldType::Start | HoldType::Finish)
    }
}

/// A single hold on a route. Immutable during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hold {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    #[serde(rename = "type")]
    pub hold_type: HoldType,
    /// Grain direction in degrees; the ideal pull direction is rotation + 90.
    pub rotation: f32,
    #[serde(default)]
    pub color: Option<String>,
}

/// Per-hold-type values, one entry per `HoldType`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerHoldType {
    pub jug: f32,
    pub crimp: f32,
    pub sloper: f32,
    pub pocket: f32,
    pub volume: f32,
    pub start: f32,
    pub finish: f32,
}

impl PerHoldType {
    pub fn get(&self, t: HoldType) -> f32 {
        match t {
            HoldType::Jug => self.jug,
            HoldType::Crimp => self.crimp,
            HoldType::Sloper => self.sloper,
            HoldType::Pocket => self.pocket,
            HoldType::Volume => self.volume,
            HoldType::Start => self.start,
            HoldType::Finish => self.finish,
        }
    }
}

/// The hold-type parameter tables: stamina drain per drain tick and base
/// friction coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoldTables {
    pub drain: PerHoldType,
    pub friction: PerHoldType,
}

impl HoldTables {
    pub fn drain(&self, t: HoldType) -> f32 {
        self.drain.get(t)
    }

    pub fn friction(&self, t: HoldType) -> f32 {
        self.friction.get(t)
    }
}

impl Default for HoldTables {
    fn default() -> Self {
        Self {
            drain: PerHoldType {
                jug: 0.05,
                crimp: 0.35,
                sloper: 0.45,
                pocket: 0.30,
                volume: 0.15,
                start: 0.05,
                finish: 0.05,
            },
            friction: PerHoldType {
                jug: 0.90,
                crimp: 0.70,
                sloper: 0.40,
                pocket: 0.75,
                volume: 0.60,
                start: 0.95,
                finish: 0.95,
            },
        }
    }
}

/// Tolerance window (degrees) around a hold's ideal pull direction before
/// friction penalties apply. `strictness` is 0.5 in realism mode, 1.0
/// otherwise; larger strictness values mean wider (more forgiving) windows.
pub fn pull_tolerance(t: HoldType, strictness: f32) -> f32 {
    match t {
        HoldType::Jug => 160.0,
        HoldType::Crimp => 60.0 * strictness,
        HoldType::Sloper => 40.0 * strictness,
        HoldType::Pocket => 70.0 * strictness,
        HoldType::Volume => 80.0 * strictness,
        // Fully forgiving — any pull direction works.
        HoldType::Start | HoldType::Finish => 180.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables_cover_all_types() {
        let tables = HoldTables::default();
        for t in HoldType::ALL {
            assert!(tables.drain(t) > 0.0);
            assert!(tables.friction(t) > 0.0 && tables.friction(t) <= 1.0);
        }
    }

    #[test]
    fn test_sloper_is_hardest() {
        let tables = HoldTables::default();
        for t in HoldType::ALL {
            assert!(tables.drain(HoldType::Sloper) >= tables.drain(t));
            assert!(tables.friction(HoldType::Sloper) <= tables.friction(t));
        }
    }

    #[test]
    fn test_pull_tolerance_strictness() {
        // Realism halves the tolerance window for technical holds
        assert_eq!(pull_tolerance(HoldType::Crimp, 1.0), 60.0);
        assert_eq!(pull_tolerance(HoldType::Crimp, 0.5), 30.0);
        // Jug and start/finish ignore strictness
        assert_eq!(pull_tolerance(HoldType::Jug, 0.5), 160.0);
        assert_eq!(pull_tolerance(HoldType::Finish, 0.5), 180.0);
    }

    #[test]
    fn test_sloper_strictest_window() {
        for t in HoldType::ALL {
            assert!(pull_tolerance(HoldType::Sloper, 1.0) <= pull_tolerance(t, 1.0));
        }
    }

    #[test]
    fn test_restful_types() {
        assert!(HoldType::Jug.is_restful());
        assert!(HoldType::Start.is_restful());
        assert!(HoldType::Finish.is_restful());
        assert!(!HoldType::Crimp.is_restful());
        assert!(!HoldType::Sloper.is_restful());
    }
}
