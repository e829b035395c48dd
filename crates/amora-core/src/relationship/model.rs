//! Relationship meter models.

use serde::{Deserialize, Serialize};

/// Upper bound of the relationship level.
pub const MAX_LEVEL: u8 = 100;

/// Named tier derived from the relationship level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Standing {
    New,
    Acquaintance,
    Friend,
    CloseFriend,
}

impl std::fmt::Display for Standing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Standing::New => write!(f, "new"),
            Standing::Acquaintance => write!(f, "acquaintance"),
            Standing::Friend => write!(f, "friend"),
            Standing::CloseFriend => write!(f, "close_friend"),
        }
    }
}

/// Tracks the relationship level with the partner.
///
/// Every successfully delivered user message raises the level by 2, capped
/// at [`MAX_LEVEL`]. The level never decreases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipMeter {
    level: u8,
}

impl RelationshipMeter {
    /// Creates a meter at the given starting level, clamped to the cap.
    pub fn new(initial_level: u8) -> Self {
        Self {
            level: initial_level.min(MAX_LEVEL),
        }
    }

    /// Records one successfully delivered message and returns the new level.
    pub fn record_delivery(&mut self) -> u8 {
        self.level = self.level.saturating_add(2).min(MAX_LEVEL);
        self.level
    }

    /// The current level, in `0..=100`.
    pub fn level(&self) -> u8 {
        self.level
    }

    /// The named tier for the current level.
    pub fn standing(&self) -> Standing {
        match self.level {
            0..=9 => Standing::New,
            10..=34 => Standing::Acquaintance,
            35..=69 => Standing::Friend,
            _ => Standing::CloseFriend,
        }
    }
}

impl Default for RelationshipMeter {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_delivery_adds_two() {
        let mut meter = RelationshipMeter::new(35);
        assert_eq!(meter.record_delivery(), 37);
        assert_eq!(meter.level(), 37);
    }

    #[test]
    fn test_level_caps_at_max() {
        let mut meter = RelationshipMeter::new(99);
        assert_eq!(meter.record_delivery(), 100);
        assert_eq!(meter.record_delivery(), 100);
    }

    #[test]
    fn test_initial_level_is_clamped() {
        let meter = RelationshipMeter::new(200);
        assert_eq!(meter.level(), MAX_LEVEL);
    }

    #[test]
    fn test_standing_tiers() {
        assert_eq!(RelationshipMeter::new(0).standing(), Standing::New);
        assert_eq!(
            RelationshipMeter::new(10).standing(),
            Standing::Acquaintance
        );
        assert_eq!(RelationshipMeter::new(35).standing(), Standing::Friend);
        assert_eq!(
            RelationshipMeter::new(70).standing(),
            Standing::CloseFriend
        );
    }

    #[test]
    fn test_standing_display() {
        assert_eq!(Standing::CloseFriend.to_string(), "close_friend");
    }
}
