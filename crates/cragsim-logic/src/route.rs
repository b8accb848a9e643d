//! The active route: an ordered hold collection plus wall geometry.
//!
//! Limb attachments reference holds by id; resolution happens here and
//! tolerates misses (a removed hold leaves a dangling attachment, which every
//! model treats as a detached limb).

use serde::{Deserialize, Serialize};

use crate::climber::{LimbState, Point};
use crate::holds::{Hold, HoldType};

/// Wall angle is in degrees: negative = slab, 0 = vertical, positive =
/// overhang.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub holds: Vec<Hold>,
    pub wall_angle: f32,
    pub wall_height: f32,
}

impl Route {
    pub fn new(holds: Vec<Hold>, wall_angle: f32, wall_height: f32) -> Self {
        Self {
            holds,
            wall_angle,
            wall_height,
        }
    }

    /// An empty vertical wall.
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0.0, 100.0)
    }

    /// Look up a hold by id. `None` is the dangling-attachment path.
    pub fn hold(&self, id: u32) -> Option<&Hold> {
        self.holds.iter().find(|h| h.id == id)
    }

    /// True if the id resolves to a finish hold.
    pub fn is_finish_hold(&self, id: u32) -> bool {
        self.hold(id)
            .map(|h| h.hold_type == HoldType::Finish)
            .unwrap_or(false)
    }

    /// Resolve a limb state against this route.
    ///
    /// Returns the limb's wall position and, for hold attachments, the hold
    /// itself. A dangling attachment (missing hold id) and a detached limb
    /// both resolve to `None`.
    pub fn resolve<'a>(&'a self, limb: &LimbState) -> Option<(Point, Option<&'a Hold>)> {
        match limb {
            LimbState::Detached => None,
            LimbState::Smearing(p) => Some((*p, None)),
            LimbState::Attached { point, hold_id } => {
                self.hold(*hold_id).map(|h| (*point, Some(h)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_hold_lookup() {
        let route = Route::new(vec![hold(1, 50.0, 40.0, HoldType::Jug)], 0.0, 100.0);
        assert!(route.hold(1).is_some());
        assert!(route.hold(2).is_none());
    }

    #[test]
    fn test_is_finish_hold() {
        let route = Route::new(
            vec![
                hold(1, 50.0, 10.0, HoldType::Finish),
                hold(2, 50.0, 80.0, HoldType::Start),
            ],
            0.0,
            100.0,
        );
        assert!(route.is_finish_hold(1));
        assert!(!route.is_finish_hold(2));
        assert!(!route.is_finish_hold(99));
    }

    #[test]
    fn test_resolve_variants() {
        let route = Route::new(vec![hold(1, 50.0, 40.0, HoldType::Crimp)], 0.0, 100.0);

        assert!(route.resolve(&LimbState::Detached).is_none());

        let smear = LimbState::Smearing(Point::new(48.0, 70.0));
        let (p, h) = route.resolve(&smear).unwrap();
        assert_eq!(p, Point::new(48.0, 70.0));
        assert!(h.is_none());

        let attached = LimbState::Attached {
            point: Point::new(50.0, 40.0),
            hold_id: 1,
        };
        let (_, h) = route.resolve(&attached).unwrap();
        assert_eq!(h.unwrap().hold_type, HoldType::Crimp);
    }

    #[test]
    fn test_dangling_attachment_resolves_to_none() {
        let route = Route::empty();
        let dangling = LimbState::Attached {
            point: Point::new(50.0, 40.0),
            hold_id: 42,
        };
        assert!(route.resolve(&dangling).is_none());
    }
}
