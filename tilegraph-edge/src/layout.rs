//! The six 64-bit words of a directed edge record.
//!
//! Field widths follow the bounds in `tilegraph_common::constants`. The
//! words are stored little-endian in this order.

use bitfield_struct::bitfield;

/// Word 0: where the edge goes.
#[bitfield(u64)]
#[derive(PartialEq, Eq, Hash)]
pub(crate) struct TopologyWord {
    /// Packed graph id of the end node
    #[bits(46)]
    pub end_node: u64,
    /// Simple turn restrictions, one bit per local edge index
    #[bits(8)]
    pub restrictions: u8,
    /// Index of the opposing edge at the end node
    #[bits(7)]
    pub opp_index: u8,
    /// Stored forward in the edge info
    pub forward: bool,
    /// End node is in another tile
    pub leaves_tile: bool,
    pub ctry_crossing: bool,
}

/// Word 1: edge info offset, restriction masks and boolean attributes.
#[bitfield(u64)]
#[derive(PartialEq, Eq, Hash)]
pub(crate) struct AttributeWord {
    #[bits(25)]
    pub edgeinfo_offset: u32,
    /// Modes with an access restriction on this edge
    #[bits(9)]
    pub access_restriction: u16,
    /// Modes with a complex restriction starting on this edge
    #[bits(9)]
    pub start_restriction: u16,
    /// Modes with a complex restriction ending on this edge
    #[bits(9)]
    pub end_restriction: u16,
    pub part_of_complex_restriction: bool,
    pub exitsign: bool,
    pub drive_on_right: bool,
    pub toll: bool,
    pub seasonal: bool,
    pub dest_only: bool,
    pub tunnel: bool,
    pub bridge: bool,
    pub roundabout: bool,
    pub unreachable: bool,
    pub traffic_signal: bool,
    pub not_thru: bool,
}

/// Word 2: geometry and classification.
#[bitfield(u64)]
#[derive(PartialEq, Eq, Hash)]
pub(crate) struct GeometryWord {
    #[bits(24)]
    pub length: u32,
    #[bits(4)]
    pub weighted_grade: u8,
    #[bits(4)]
    pub curvature: u8,
    #[bits(5)]
    pub max_up_slope: u8,
    #[bits(5)]
    pub max_down_slope: u8,
    #[bits(4)]
    pub lanecount: u8,
    #[bits(4)]
    pub density: u8,
    #[bits(3)]
    pub classification: u8,
    #[bits(3)]
    pub surface: u8,
    #[bits(6)]
    pub edge_use: u8,
    #[bits(2)]
    pub speed_type: u8,
}

/// Word 3: speeds, access and travel attributes.
#[bitfield(u64)]
#[derive(PartialEq, Eq, Hash)]
pub(crate) struct TravelWord {
    #[bits(8)]
    pub speed: u8,
    #[bits(8)]
    pub speed_limit: u8,
    #[bits(8)]
    pub truck_speed: u8,
    #[bits(9)]
    pub forwardaccess: u16,
    #[bits(9)]
    pub reverseaccess: u16,
    #[bits(4)]
    pub bike_network: u8,
    #[bits(2)]
    pub cycle_lane: u8,
    pub truck_route: bool,
    pub deadend: bool,
    pub link: bool,
    pub internal: bool,
    pub named: bool,
    pub sidewalk_left: bool,
    pub sidewalk_right: bool,
    #[bits(9)]
    __: u16,
}

/// Word 4: per-local-index turn metadata.
#[bitfield(u64)]
#[derive(PartialEq, Eq, Hash)]
pub(crate) struct TurnWord {
    /// 8 x 3-bit turn types
    #[bits(24)]
    pub turntype: u32,
    /// 8 x 1-bit edge-to-left flags
    #[bits(8)]
    pub edge_to_left: u8,
    /// Stop impacts (low 24 bits) and edge-to-right flags (high 8 bits),
    /// or the transit line id on transit line edges.
    #[bits(32)]
    pub transit_slot: u32,
}

/// Word 5: hierarchy bookkeeping.
#[bitfield(u64)]
#[derive(PartialEq, Eq, Hash)]
pub(crate) struct HierarchyWord {
    #[bits(7)]
    pub localedgeidx: u8,
    #[bits(7)]
    pub opp_local_idx: u8,
    /// One-hot shortcut slot
    #[bits(7)]
    pub shortcut: u8,
    /// One-hot slot of the shortcut that supersedes this edge
    #[bits(7)]
    pub superseded: u8,
    pub is_shortcut: bool,
    #[bits(35)]
    __: u64,
}

/// Bit offsets inside [`TurnWord::transit_slot`].
pub(crate) const STOP_IMPACT_BITS: u32 = 24;
pub(crate) const EDGE_TO_RIGHT_SHIFT: u32 = STOP_IMPACT_BITS;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_are_u64() {
        assert_eq!(std::mem::size_of::<TopologyWord>(), 8);
        assert_eq!(std::mem::size_of::<HierarchyWord>(), 8);
    }

    #[test]
    fn test_end_node_uses_low_46_bits() {
        let word = TopologyWord::new().with_end_node((1 << 46) - 1);
        assert_eq!(word.into_bits(), (1 << 46) - 1);
        let word = word.with_ctry_crossing(true);
        assert_eq!(word.into_bits() >> 63, 1);
    }

    #[test]
    fn test_transit_slot_is_high_half() {
        let word = TurnWord::new().with_transit_slot(0xdead_beef);
        assert_eq!(word.into_bits() >> 32, 0xdead_beef);
        assert_eq!(word.turntype(), 0);
        assert_eq!(word.edge_to_left(), 0);
    }

    #[test]
    fn test_geometry_field_order() {
        let word = GeometryWord::new().with_length(1).with_speed_type(1);
        assert_eq!(word.into_bits(), 1 | 1 << 62);
    }
}
