//! Bounds constants shared with the tile format.
//!
//! Each maximum is also the physical width of the packed field that holds
//! it. Changing a value here requires reviewing the record layout in
//! `tilegraph-edge`, not only the validation code.

/// Maximum edge length in meters (24 bits).
pub const MAX_EDGE_LENGTH: u32 = (1 << 24) - 1;

/// Maximum weighted grade factor (4 bits).
pub const MAX_GRADE_FACTOR: u32 = 15;

/// Weighted grade code for level ground.
pub const LEVEL_GRADE: u32 = 6;

/// Maximum curvature factor (4 bits).
pub const MAX_CURVATURE_FACTOR: u32 = 15;

/// Maximum lane count (4 bits).
pub const MAX_LANE_COUNT: u32 = 15;

/// Maximum speed in kph (8 bits). Applies to speed, speed limit and truck speed.
pub const MAX_SPEED_KPH: u32 = 255;

/// Maximum relative road density (4 bits).
pub const MAX_DENSITY: u32 = 15;

/// Maximum bicycle network mask (4 bits).
pub const MAX_BICYCLE_NETWORK: u32 = 15;

/// Maximum edges per node (7 bits).
pub const MAX_EDGES_PER_NODE: u32 = 127;

/// Maximum local edge index addressable by the per-index arrays (8 slots).
pub const MAX_LOCAL_EDGE_INDEX: u32 = 7;

/// Number of edges the simple turn restriction mask covers (8 bits).
pub const MAX_TURN_RESTRICTION_EDGES: u32 = 8;

/// Maximum shortcut edges from a node (7 bits of one-hot mask).
pub const MAX_SHORTCUTS_FROM_NODE: u32 = 7;

/// Maximum stop impact (3 bits per slot).
pub const MAX_STOP_IMPACT: u32 = 7;

/// Maximum offset into the edge info storage of a tile (25 bits).
pub const MAX_EDGE_INFO_OFFSET: u32 = (1 << 25) - 1;

/// Access bit positions. The same layout serves edge access and complex
/// restriction masks.
pub mod access {
    pub const CAR: u32 = 1;
    pub const PEDESTRIAN: u32 = 2;
    pub const BICYCLE: u32 = 4;
    pub const TRUCK: u32 = 8;
    pub const EMERGENCY: u32 = 16;
    pub const TAXI: u32 = 32;
    pub const BUS: u32 = 64;
    pub const HOV: u32 = 128;
    pub const WHEELCHAIR: u32 = 256;

    /// Every mode allowed (9 bits).
    pub const ALL: u32 = 0x1ff;
}

/// Bicycle network bit positions.
pub mod bike_network {
    /// National cycle network
    pub const NATIONAL: u32 = 1;
    /// Regional cycle network
    pub const REGIONAL: u32 = 2;
    /// Local cycle network
    pub const LOCAL: u32 = 4;
    /// Mountain bike network
    pub const MOUNTAIN: u32 = 8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_bits_cover_all() {
        let combined = access::CAR
            | access::PEDESTRIAN
            | access::BICYCLE
            | access::TRUCK
            | access::EMERGENCY
            | access::TAXI
            | access::BUS
            | access::HOV
            | access::WHEELCHAIR;
        assert_eq!(combined, access::ALL);
    }

    #[test]
    fn test_bike_network_bits_fit_mask() {
        let combined = bike_network::NATIONAL
            | bike_network::REGIONAL
            | bike_network::LOCAL
            | bike_network::MOUNTAIN;
        assert_eq!(combined, MAX_BICYCLE_NETWORK);
    }

    #[test]
    fn test_local_index_slots_fit_restriction_mask() {
        assert_eq!(MAX_LOCAL_EDGE_INDEX + 1, MAX_TURN_RESTRICTION_EDGES);
    }
}
