//! Typed records delivered by the external data collaborators.
//!
//! The rendering core never fetches these itself beyond the default REST
//! provider; it consumes whatever arrays the async providers resolve to.

use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

pub type ContinentId = u32;
pub type BaseId = u32;

/// Small integer faction enum delivered by status payloads
pub type FactionId = u8;

/// Faction id of unclaimed/neutral bases
pub const NEUTRAL_FACTION: FactionId = 0;

/// A playable continent/map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Continent {
    pub id: ContinentId,
    /// Lower-case code embedded in tile asset names
    pub code: String,
    pub name: String,
    /// Square map extent in map units
    pub map_size: f64,
}

/// Facility class of a base, driving marker styling and zoom gating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacilityClass {
    LargeFacility,
    LargeOutpost,
    SmallOutpost,
    Other,
}

/// A capturable base on a continent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Base {
    pub id: BaseId,
    pub continent_id: ContinentId,
    pub name: String,
    pub facility: FacilityClass,
    /// Position in the `[0, map_size]` camera frame
    pub map_pos: Point,
    /// Outline polygon vertices, same frame; empty for unoutlined bases
    #[serde(default)]
    pub outline: Vec<Point>,
    /// Resource reward, where the payload carries one
    #[serde(default)]
    pub resource: Option<String>,
}

/// A lattice connection between two bases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatticeLink {
    pub base_a: BaseId,
    pub base_b: BaseId,
    pub pos_a: Point,
    pub pos_b: Point,
}

/// Ownership snapshot entry for one base
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseStatus {
    pub base_id: BaseId,
    pub faction_id: FactionId,
    /// Unix timestamp of the last ownership change
    pub timestamp: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_deserializes_without_optionals() {
        let json = r#"{
            "id": 42,
            "continent_id": 2,
            "name": "Crossroads Watchtower",
            "facility": "large_outpost",
            "map_pos": {"x": 1024.0, "y": 2048.0}
        }"#;
        let base: Base = serde_json::from_str(json).unwrap();
        assert_eq!(base.facility, FacilityClass::LargeOutpost);
        assert!(base.outline.is_empty());
        assert!(base.resource.is_none());
    }

    #[test]
    fn test_status_round_trip() {
        let status = BaseStatus {
            base_id: 7,
            faction_id: NEUTRAL_FACTION,
            timestamp: 1_700_000_000,
        };
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(serde_json::from_str::<BaseStatus>(&json).unwrap(), status);
    }
}
