//! The directed edge record: read side and byte image.
//!
//! A record is written once by [`DirectedEdgeBuilder`](crate::DirectedEdgeBuilder)
//! and is read-only afterwards, so it can be shared freely between threads.

use tilegraph_common::constants::LEVEL_GRADE;
use tilegraph_common::{CycleLane, GraphId, RoadClass, SpeedType, Surface, TurnType, Use};
use tracing::debug;

use crate::access::{AccessFlags, BikeNetworkFlags};
use crate::bits::{EdgeFlags, StopImpacts, TurnTypes};
use crate::error::{EdgeError, Result};
use crate::layout::{
    AttributeWord, GeometryWord, HierarchyWord, TopologyWord, TravelWord, TurnWord,
    EDGE_TO_RIGHT_SHIFT,
};
use crate::slope;

const WORDS: usize = 6;

/// One directed edge of a routing graph tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(C)]
pub struct DirectedEdge {
    pub(crate) topology: TopologyWord,
    pub(crate) attributes: AttributeWord,
    pub(crate) geometry: GeometryWord,
    pub(crate) travel: TravelWord,
    pub(crate) turns: TurnWord,
    pub(crate) hierarchy: HierarchyWord,
}

const _: () = assert!(std::mem::size_of::<DirectedEdge>() == DirectedEdge::SIZE);

/// The two readings of the overlapping 32-bit slot, chosen by the edge's use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitSlot {
    /// Every edge except transit lines: per-inbound-edge stop impacts and
    /// edge-to-right flags.
    Junction {
        stop_impacts: StopImpacts,
        edge_to_right: EdgeFlags,
    },
    /// Transit line edges: the line id.
    Line(u32),
}

impl Default for DirectedEdge {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectedEdge {
    /// Size of the record image in bytes.
    pub const SIZE: usize = WORDS * 8;

    /// A zeroed record whose weighted grade reads as level.
    pub fn new() -> Self {
        Self {
            topology: TopologyWord::from_bits(0),
            attributes: AttributeWord::from_bits(0),
            geometry: GeometryWord::from_bits(0).with_weighted_grade(LEVEL_GRADE as u8),
            travel: TravelWord::from_bits(0),
            turns: TurnWord::from_bits(0),
            hierarchy: HierarchyWord::from_bits(0),
        }
    }

    // ------------------------------------------------------------------
    // Byte image
    // ------------------------------------------------------------------

    fn words(&self) -> [u64; WORDS] {
        [
            self.topology.into_bits(),
            self.attributes.into_bits(),
            self.geometry.into_bits(),
            self.travel.into_bits(),
            self.turns.into_bits(),
            self.hierarchy.into_bits(),
        ]
    }

    /// Little-endian image of the record.
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        for (chunk, word) in out.chunks_exact_mut(8).zip(self.words()) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        out
    }

    /// Decodes a record image.
    ///
    /// # Errors
    ///
    /// Fails on a wrong length, an unknown use or speed type code, or a
    /// shortcut/superseded mask with more than one bit set.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::SIZE {
            return Err(EdgeError::RecordLength {
                expected: Self::SIZE,
                actual: bytes.len(),
            });
        }

        let mut words = [0u64; WORDS];
        for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(8)) {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(chunk);
            *word = u64::from_le_bytes(buf);
        }

        let edge = Self {
            topology: TopologyWord::from_bits(words[0]),
            attributes: AttributeWord::from_bits(words[1]),
            geometry: GeometryWord::from_bits(words[2]),
            travel: TravelWord::from_bits(words[3]),
            turns: TurnWord::from_bits(words[4]),
            hierarchy: HierarchyWord::from_bits(words[5]),
        };
        edge.validate()?;
        Ok(edge)
    }

    fn validate(&self) -> Result<()> {
        Use::try_from(self.geometry.edge_use())?;
        SpeedType::try_from(self.geometry.speed_type())?;
        for (field, mask) in [
            ("shortcut", self.hierarchy.shortcut()),
            ("superseded", self.hierarchy.superseded()),
        ] {
            if mask.count_ones() > 1 {
                return Err(EdgeError::NotOneHot { field, mask });
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Topology
    // ------------------------------------------------------------------

    /// End node of the edge.
    pub fn endnode(&self) -> GraphId {
        GraphId::from_packed(self.topology.end_node())
    }

    /// Offset to the shared edge info (names, shape) in the tile.
    pub fn edgeinfo_offset(&self) -> u32 {
        self.attributes.edgeinfo_offset()
    }

    /// Index of the opposing directed edge at the end node.
    pub fn opp_index(&self) -> u32 {
        u32::from(self.topology.opp_index())
    }

    /// Is the edge stored forward in its edge info?
    pub fn forward(&self) -> bool {
        self.topology.forward()
    }

    /// Does the end node lie in a different tile?
    pub fn leaves_tile(&self) -> bool {
        self.topology.leaves_tile()
    }

    // ------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------

    /// Length in meters.
    pub fn length(&self) -> u32 {
        self.geometry.length()
    }

    /// Weighted grade factor, 6 is level.
    pub fn weighted_grade(&self) -> u32 {
        u32::from(self.geometry.weighted_grade())
    }

    pub fn curvature(&self) -> u32 {
        u32::from(self.geometry.curvature())
    }

    /// Maximum upward slope in degrees. 1 degree precision up to 16
    /// degrees, 4 degree precision above (up to 76).
    pub fn max_up_slope(&self) -> i32 {
        slope::decode_up_slope(self.geometry.max_up_slope())
    }

    /// Maximum downward slope in degrees (non-positive).
    pub fn max_down_slope(&self) -> i32 {
        slope::decode_down_slope(self.geometry.max_down_slope())
    }

    // ------------------------------------------------------------------
    // Routing flags
    // ------------------------------------------------------------------

    pub fn drive_on_right(&self) -> bool {
        self.attributes.drive_on_right()
    }

    /// No other driveable edges at the end node.
    pub fn deadend(&self) -> bool {
        self.travel.deadend()
    }

    pub fn toll(&self) -> bool {
        self.attributes.toll()
    }

    pub fn seasonal(&self) -> bool {
        self.attributes.seasonal()
    }

    /// Destination only (no through traffic).
    pub fn dest_only(&self) -> bool {
        self.attributes.dest_only()
    }

    pub fn tunnel(&self) -> bool {
        self.attributes.tunnel()
    }

    pub fn bridge(&self) -> bool {
        self.attributes.bridge()
    }

    pub fn roundabout(&self) -> bool {
        self.attributes.roundabout()
    }

    /// Driveable edge that cannot be reached by driving.
    pub fn unreachable(&self) -> bool {
        self.attributes.unreachable()
    }

    /// Traffic signal at the end of the edge.
    pub fn traffic_signal(&self) -> bool {
        self.attributes.traffic_signal()
    }

    /// Edge leads into a region with no exit other than back.
    pub fn not_thru(&self) -> bool {
        self.attributes.not_thru()
    }

    pub fn ctry_crossing(&self) -> bool {
        self.topology.ctry_crossing()
    }

    /// Intersection internal edge.
    pub fn internal(&self) -> bool {
        self.travel.internal()
    }

    /// Ramp or turn channel.
    pub fn link(&self) -> bool {
        self.travel.link()
    }

    pub fn exitsign(&self) -> bool {
        self.attributes.exitsign()
    }

    // ------------------------------------------------------------------
    // Access and restrictions
    // ------------------------------------------------------------------

    pub fn forwardaccess(&self) -> u32 {
        u32::from(self.travel.forwardaccess())
    }

    pub fn reverseaccess(&self) -> u32 {
        u32::from(self.travel.reverseaccess())
    }

    /// Modes with an access restriction on this edge.
    pub fn access_restriction(&self) -> u32 {
        u32::from(self.attributes.access_restriction())
    }

    /// Modes with a complex restriction starting on this edge.
    pub fn start_restriction(&self) -> u32 {
        u32::from(self.attributes.start_restriction())
    }

    /// Modes with a complex restriction ending on this edge.
    pub fn end_restriction(&self) -> u32 {
        u32::from(self.attributes.end_restriction())
    }

    pub fn part_of_complex_restriction(&self) -> bool {
        self.attributes.part_of_complex_restriction()
    }

    /// Simple turn restrictions, bit `i` bans the turn onto local edge `i`.
    pub fn restrictions(&self) -> u32 {
        u32::from(self.topology.restrictions())
    }

    pub fn forward_access_flags(&self) -> AccessFlags {
        AccessFlags::from_mask(self.forwardaccess())
    }

    pub fn reverse_access_flags(&self) -> AccessFlags {
        AccessFlags::from_mask(self.reverseaccess())
    }

    // ------------------------------------------------------------------
    // Classification and speeds
    // ------------------------------------------------------------------

    pub fn classification(&self) -> RoadClass {
        RoadClass::from_code(self.geometry.classification()).unwrap_or_default()
    }

    pub fn surface(&self) -> Surface {
        Surface::from_code(self.geometry.surface()).unwrap_or_default()
    }

    /// Specialized use. Codes are checked when a record is decoded.
    pub fn edge_use(&self) -> Use {
        Use::from_code(self.geometry.edge_use()).unwrap_or_default()
    }

    pub fn speed_type(&self) -> SpeedType {
        SpeedType::from_code(self.geometry.speed_type()).unwrap_or_default()
    }

    pub fn cyclelane(&self) -> CycleLane {
        CycleLane::from_code(self.travel.cycle_lane()).unwrap_or_default()
    }

    /// Average speed in kph.
    pub fn speed(&self) -> u32 {
        u32::from(self.travel.speed())
    }

    /// Posted speed limit in kph, 0 if unknown.
    pub fn speed_limit(&self) -> u32 {
        u32::from(self.travel.speed_limit())
    }

    /// Truck speed in kph.
    pub fn truck_speed(&self) -> u32 {
        u32::from(self.travel.truck_speed())
    }

    pub fn truck_route(&self) -> bool {
        self.travel.truck_route()
    }

    pub fn lanecount(&self) -> u32 {
        u32::from(self.geometry.lanecount())
    }

    pub fn bike_network(&self) -> u32 {
        u32::from(self.travel.bike_network())
    }

    pub fn bike_network_flags(&self) -> BikeNetworkFlags {
        BikeNetworkFlags::from_mask(self.bike_network())
    }

    /// Relative road density (0-15).
    pub fn density(&self) -> u32 {
        u32::from(self.geometry.density())
    }

    pub fn named(&self) -> bool {
        self.travel.named()
    }

    pub fn sidewalk_left(&self) -> bool {
        self.travel.sidewalk_left()
    }

    pub fn sidewalk_right(&self) -> bool {
        self.travel.sidewalk_right()
    }

    // ------------------------------------------------------------------
    // Per-local-index metadata
    // ------------------------------------------------------------------

    pub fn turntypes(&self) -> TurnTypes {
        TurnTypes::from_bits(self.turns.turntype())
    }

    /// Turn type from the inbound edge with local index `localidx`.
    pub fn turntype(&self, localidx: u32) -> Option<TurnType> {
        self.turntypes()
            .get(localidx)
            .and_then(|code| TurnType::from_code(code as u8))
    }

    pub fn edges_to_left(&self) -> EdgeFlags {
        EdgeFlags::from_bits(u32::from(self.turns.edge_to_left()))
    }

    /// Is there an edge to the left between the inbound edge `localidx`
    /// and this edge?
    pub fn edge_to_left(&self, localidx: u32) -> Option<bool> {
        self.edges_to_left().get(localidx).map(|bit| bit != 0)
    }

    /// Raw overlapping slot. See [`DirectedEdge::transit_slot`].
    pub fn transit_slot_bits(&self) -> u32 {
        self.turns.transit_slot()
    }

    /// Stop impacts, read from the overlapping slot regardless of use.
    pub fn stopimpacts(&self) -> StopImpacts {
        StopImpacts::from_bits(self.transit_slot_bits())
    }

    /// Stop impact when coming from inbound edge `localidx`. Meaningless on
    /// transit line edges.
    pub fn stopimpact(&self, localidx: u32) -> Option<u32> {
        self.stopimpacts().get(localidx)
    }

    pub fn edges_to_right(&self) -> EdgeFlags {
        EdgeFlags::from_bits(self.transit_slot_bits() >> EDGE_TO_RIGHT_SHIFT)
    }

    /// Is there an edge to the right between the inbound edge `localidx`
    /// and this edge? Meaningless on transit line edges.
    pub fn edge_to_right(&self, localidx: u32) -> Option<bool> {
        self.edges_to_right().get(localidx).map(|bit| bit != 0)
    }

    /// Transit line id. Only meaningful on transit line edges.
    pub fn lineid(&self) -> u32 {
        self.transit_slot_bits()
    }

    /// The overlapping slot interpreted according to the edge's use.
    pub fn transit_slot(&self) -> TransitSlot {
        if self.is_transit_line() {
            TransitSlot::Line(self.lineid())
        } else {
            TransitSlot::Junction {
                stop_impacts: self.stopimpacts(),
                edge_to_right: self.edges_to_right(),
            }
        }
    }

    // ------------------------------------------------------------------
    // Hierarchy
    // ------------------------------------------------------------------

    /// Index of this edge at its start node on the local level.
    pub fn localedgeidx(&self) -> u32 {
        u32::from(self.hierarchy.localedgeidx())
    }

    /// Local index of the opposing edge at the end node.
    pub fn opp_local_idx(&self) -> u32 {
        u32::from(self.hierarchy.opp_local_idx())
    }

    /// One-hot shortcut mask.
    pub fn shortcut(&self) -> u32 {
        u32::from(self.hierarchy.shortcut())
    }

    /// One-hot mask of the shortcut superseding this edge.
    pub fn superseded(&self) -> u32 {
        u32::from(self.hierarchy.superseded())
    }

    pub fn is_shortcut(&self) -> bool {
        self.hierarchy.is_shortcut()
    }

    pub fn trans_up(&self) -> bool {
        self.edge_use() == Use::TransitionUp
    }

    pub fn trans_down(&self) -> bool {
        self.edge_use() == Use::TransitionDown
    }

    /// Hierarchy transition edge (not a real road).
    pub fn is_transition(&self) -> bool {
        self.edge_use().is_transition()
    }

    pub fn is_transit_line(&self) -> bool {
        self.edge_use().is_transit_line()
    }
}

/// Decodes a buffer of concatenated records.
///
/// # Errors
///
/// Fails if the buffer ends in a partial record or any record is invalid.
pub fn edges_from_bytes(bytes: &[u8]) -> Result<Vec<DirectedEdge>> {
    let remainder = bytes.len() % DirectedEdge::SIZE;
    if remainder != 0 {
        return Err(EdgeError::TrailingBytes {
            len: bytes.len(),
            remainder,
        });
    }
    debug!(count = bytes.len() / DirectedEdge::SIZE, "decoding directed edges");
    bytes
        .chunks_exact(DirectedEdge::SIZE)
        .enumerate()
        .map(|(index, chunk)| {
            DirectedEdge::from_bytes(chunk).map_err(|e| EdgeError::Record {
                index,
                source: Box::new(e),
            })
        })
        .collect()
}

/// Concatenates record images.
pub fn edges_to_bytes(edges: &[DirectedEdge]) -> Vec<u8> {
    let mut out = Vec::with_capacity(edges.len() * DirectedEdge::SIZE);
    for edge in edges {
        out.extend_from_slice(&edge.to_bytes());
    }
    out
}
