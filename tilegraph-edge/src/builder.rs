//! Write side of a directed edge.
//!
//! Every setter applies the policy of its field: clamp to the maximum, mask
//! to the valid bits, reset to a fallback, or skip the write. Each correction
//! is logged and kept as an [`EdgeDiagnostic`]. The only fatal write is an
//! edge info offset past [`MAX_EDGE_INFO_OFFSET`], which poisons the builder.

use tilegraph_common::constants::{
    access::ALL as ALL_ACCESS, LEVEL_GRADE, MAX_BICYCLE_NETWORK, MAX_CURVATURE_FACTOR,
    MAX_DENSITY, MAX_EDGES_PER_NODE, MAX_EDGE_INFO_OFFSET, MAX_EDGE_LENGTH, MAX_GRADE_FACTOR,
    MAX_LANE_COUNT, MAX_SHORTCUTS_FROM_NODE, MAX_SPEED_KPH, MAX_STOP_IMPACT,
    MAX_TURN_RESTRICTION_EDGES,
};
use tilegraph_common::{CycleLane, GraphId, RoadClass, SpeedType, Surface, TurnType, Use};
use tracing::{error, warn};

use crate::bits::{overwrite_bits, LOCAL_SLOTS};
use crate::diagnostic::{Correction, EdgeDiagnostic, EdgeField, Severity};
use crate::directed_edge::DirectedEdge;
use crate::error::{EdgeError, Result};
use crate::layout::EDGE_TO_RIGHT_SHIFT;
use crate::slope;

const RESTRICTION_MASK: u32 = (1 << MAX_TURN_RESTRICTION_EDGES) - 1;
const TURN_TYPE_WIDTH: u32 = 3;
const STOP_IMPACT_WIDTH: u32 = 3;

/// Single writer of a [`DirectedEdge`].
///
/// ```
/// use tilegraph_common::{GraphId, RoadClass};
/// use tilegraph_edge::DirectedEdgeBuilder;
///
/// let mut builder = DirectedEdgeBuilder::new();
/// builder
///     .set_endnode(GraphId::new(42, 2, 7).unwrap())
///     .set_length(120)
///     .set_classification(RoadClass::Residential)
///     .set_all_forward_access();
/// let edge = builder.build().unwrap();
/// assert_eq!(edge.length(), 120);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DirectedEdgeBuilder {
    edge: DirectedEdge,
    diagnostics: Vec<EdgeDiagnostic>,
    fatal: Option<EdgeError>,
}

impl DirectedEdgeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reopens an existing record, e.g. to mark shortcuts after a
    /// hierarchy pass.
    pub fn from_edge(edge: DirectedEdge) -> Self {
        Self {
            edge,
            diagnostics: Vec::new(),
            fatal: None,
        }
    }

    /// The record as written so far.
    pub fn edge(&self) -> &DirectedEdge {
        &self.edge
    }

    /// Corrections applied so far, in write order.
    pub fn diagnostics(&self) -> &[EdgeDiagnostic] {
        &self.diagnostics
    }

    /// Hands out the finished record.
    ///
    /// # Errors
    ///
    /// Returns the fatal error if one was raised during construction.
    pub fn build(self) -> Result<DirectedEdge> {
        self.finish().map(|(edge, _)| edge)
    }

    /// Hands out the finished record with every correction made on the way.
    ///
    /// # Errors
    ///
    /// Returns the fatal error if one was raised during construction.
    pub fn finish(self) -> Result<(DirectedEdge, Vec<EdgeDiagnostic>)> {
        match self.fatal {
            Some(err) => Err(err),
            None => Ok((self.edge, self.diagnostics)),
        }
    }

    // ------------------------------------------------------------------
    // Diagnostics
    // ------------------------------------------------------------------

    fn report(
        &mut self,
        field: EdgeField,
        index: Option<u32>,
        value: f64,
        correction: Correction,
        severity: Severity,
    ) {
        let diagnostic = EdgeDiagnostic {
            field,
            index,
            value,
            correction,
            severity,
        };
        match severity {
            Severity::Warning => warn!(field = field.name(), "{diagnostic}"),
            Severity::Error | Severity::Fatal => error!(field = field.name(), "{diagnostic}"),
        }
        self.diagnostics.push(diagnostic);
    }

    /// Clamp-to-max policy.
    fn clamp(&mut self, field: EdgeField, value: u32, max: u32) -> u32 {
        if value > max {
            self.report(
                field,
                None,
                f64::from(value),
                Correction::Clamped { stored: max },
                Severity::Warning,
            );
            max
        } else {
            value
        }
    }

    /// Mask-to-valid-bits policy.
    fn mask(&mut self, field: EdgeField, value: u32, mask: u32, severity: Severity) -> u32 {
        if value > mask {
            let stored = value & mask;
            self.report(
                field,
                None,
                f64::from(value),
                Correction::Masked { stored },
                severity,
            );
            stored
        } else {
            value
        }
    }

    /// Store a fallback instead of an out-of-range value.
    fn reset(&mut self, field: EdgeField, value: u32, max: u32, fallback: u32) -> u32 {
        if value > max {
            self.report(
                field,
                None,
                f64::from(value),
                Correction::Reset { stored: fallback },
                Severity::Warning,
            );
            fallback
        } else {
            value
        }
    }

    /// Reject policy for per-local-index writes. True if `localidx` is usable.
    fn check_local_index(&mut self, field: EdgeField, localidx: u32, value: u32) -> bool {
        if localidx >= LOCAL_SLOTS {
            self.report(
                field,
                Some(localidx),
                f64::from(value),
                Correction::Rejected,
                Severity::Warning,
            );
            return false;
        }
        true
    }

    // ------------------------------------------------------------------
    // Topology
    // ------------------------------------------------------------------

    pub fn set_endnode(&mut self, endnode: GraphId) -> &mut Self {
        self.edge.topology.set_end_node(endnode.value());
        self
    }

    /// Sets the offset to the shared edge info.
    ///
    /// # Errors
    ///
    /// An offset past [`MAX_EDGE_INFO_OFFSET`] cannot be stored without
    /// corrupting the record: returns [`EdgeError::EdgeInfoOffsetOverflow`]
    /// and every later [`build`](Self::build) fails with it.
    pub fn set_edgeinfo_offset(&mut self, offset: u32) -> Result<&mut Self> {
        if offset > MAX_EDGE_INFO_OFFSET {
            self.report(
                EdgeField::EdgeInfoOffset,
                None,
                f64::from(offset),
                Correction::Fatal,
                Severity::Fatal,
            );
            let err = EdgeError::EdgeInfoOffsetOverflow {
                offset,
                max: MAX_EDGE_INFO_OFFSET,
            };
            self.fatal = Some(err.clone());
            return Err(err);
        }
        self.edge.attributes.set_edgeinfo_offset(offset);
        Ok(self)
    }

    /// Index of the opposing edge at the end node.
    pub fn set_opp_index(&mut self, opp_index: u32) -> &mut Self {
        let value = self.clamp(EdgeField::OppIndex, opp_index, MAX_EDGES_PER_NODE);
        self.edge.topology.set_opp_index(value as u8);
        self
    }

    /// Is the edge stored forward in its edge info?
    pub fn set_forward(&mut self, forward: bool) -> &mut Self {
        self.edge.topology.set_forward(forward);
        self
    }

    pub fn set_leaves_tile(&mut self, leaves_tile: bool) -> &mut Self {
        self.edge.topology.set_leaves_tile(leaves_tile);
        self
    }

    // ------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------

    /// Length in meters, clamped to [`MAX_EDGE_LENGTH`].
    pub fn set_length(&mut self, length: u32) -> &mut Self {
        let value = self.clamp(EdgeField::Length, length, MAX_EDGE_LENGTH);
        self.edge.geometry.set_length(value);
        self
    }

    /// Weighted grade factor (0-15). Out of range values store level.
    pub fn set_weighted_grade(&mut self, factor: u32) -> &mut Self {
        let value = self.reset(
            EdgeField::WeightedGrade,
            factor,
            MAX_GRADE_FACTOR,
            LEVEL_GRADE,
        );
        self.edge.geometry.set_weighted_grade(value as u8);
        self
    }

    /// Curvature factor (0-15). Out of range values store 0.
    pub fn set_curvature(&mut self, factor: u32) -> &mut Self {
        let value = self.reset(EdgeField::Curvature, factor, MAX_CURVATURE_FACTOR, 0);
        self.edge.geometry.set_curvature(value as u8);
        self
    }

    /// Maximum upward slope in degrees.
    pub fn set_max_up_slope(&mut self, degrees: f32) -> &mut Self {
        let code = self.quantize_slope(EdgeField::MaxUpSlope, degrees, degrees);
        self.edge.geometry.set_max_up_slope(code);
        self
    }

    /// Maximum downward slope in degrees (non-positive).
    pub fn set_max_down_slope(&mut self, degrees: f32) -> &mut Self {
        let code = self.quantize_slope(EdgeField::MaxDownSlope, degrees, -degrees);
        self.edge.geometry.set_max_down_slope(code);
        self
    }

    fn quantize_slope(&mut self, field: EdgeField, degrees: f32, magnitude: f32) -> u8 {
        if degrees.is_nan() {
            self.report(
                field,
                None,
                f64::from(degrees),
                Correction::Reset { stored: 0 },
                Severity::Warning,
            );
            return 0;
        }
        let code = slope::encode_magnitude(magnitude);
        if slope::saturates(magnitude) {
            self.report(
                field,
                None,
                f64::from(degrees),
                Correction::Clamped {
                    stored: u32::from(code),
                },
                Severity::Warning,
            );
        }
        code
    }

    // ------------------------------------------------------------------
    // Routing flags
    // ------------------------------------------------------------------

    pub fn set_drive_on_right(&mut self, rsd: bool) -> &mut Self {
        self.edge.attributes.set_drive_on_right(rsd);
        self
    }

    pub fn set_deadend(&mut self, deadend: bool) -> &mut Self {
        self.edge.travel.set_deadend(deadend);
        self
    }

    pub fn set_toll(&mut self, toll: bool) -> &mut Self {
        self.edge.attributes.set_toll(toll);
        self
    }

    pub fn set_seasonal(&mut self, seasonal: bool) -> &mut Self {
        self.edge.attributes.set_seasonal(seasonal);
        self
    }

    pub fn set_dest_only(&mut self, dest_only: bool) -> &mut Self {
        self.edge.attributes.set_dest_only(dest_only);
        self
    }

    pub fn set_tunnel(&mut self, tunnel: bool) -> &mut Self {
        self.edge.attributes.set_tunnel(tunnel);
        self
    }

    pub fn set_bridge(&mut self, bridge: bool) -> &mut Self {
        self.edge.attributes.set_bridge(bridge);
        self
    }

    pub fn set_roundabout(&mut self, roundabout: bool) -> &mut Self {
        self.edge.attributes.set_roundabout(roundabout);
        self
    }

    pub fn set_unreachable(&mut self, unreachable: bool) -> &mut Self {
        self.edge.attributes.set_unreachable(unreachable);
        self
    }

    pub fn set_traffic_signal(&mut self, signal: bool) -> &mut Self {
        self.edge.attributes.set_traffic_signal(signal);
        self
    }

    pub fn set_not_thru(&mut self, not_thru: bool) -> &mut Self {
        self.edge.attributes.set_not_thru(not_thru);
        self
    }

    pub fn set_ctry_crossing(&mut self, crossing: bool) -> &mut Self {
        self.edge.topology.set_ctry_crossing(crossing);
        self
    }

    pub fn set_internal(&mut self, internal: bool) -> &mut Self {
        self.edge.travel.set_internal(internal);
        self
    }

    pub fn set_link(&mut self, link: bool) -> &mut Self {
        self.edge.travel.set_link(link);
        self
    }

    pub fn set_exitsign(&mut self, exit: bool) -> &mut Self {
        self.edge.attributes.set_exitsign(exit);
        self
    }

    // ------------------------------------------------------------------
    // Access and restrictions
    // ------------------------------------------------------------------

    /// Forward access modes; bits outside [`ALL_ACCESS`] are dropped.
    pub fn set_forwardaccess(&mut self, modes: u32) -> &mut Self {
        let value = self.mask(EdgeField::ForwardAccess, modes, ALL_ACCESS, Severity::Error);
        self.edge.travel.set_forwardaccess(value as u16);
        self
    }

    /// Reverse access modes; bits outside [`ALL_ACCESS`] are dropped.
    pub fn set_reverseaccess(&mut self, modes: u32) -> &mut Self {
        let value = self.mask(EdgeField::ReverseAccess, modes, ALL_ACCESS, Severity::Error);
        self.edge.travel.set_reverseaccess(value as u16);
        self
    }

    /// Allows every mode in both directions, so the opposing edge of a
    /// transition edge matches.
    pub fn set_all_forward_access(&mut self) -> &mut Self {
        self.edge.travel.set_forwardaccess(ALL_ACCESS as u16);
        self.edge.travel.set_reverseaccess(ALL_ACCESS as u16);
        self
    }

    /// Modes with an access restriction on this edge.
    pub fn set_access_restriction(&mut self, modes: u32) -> &mut Self {
        let value = self.mask(
            EdgeField::AccessRestriction,
            modes,
            ALL_ACCESS,
            Severity::Warning,
        );
        self.edge.attributes.set_access_restriction(value as u16);
        self
    }

    /// Modes with a complex restriction starting on this edge.
    pub fn set_start_restriction(&mut self, modes: u32) -> &mut Self {
        let value = self.mask(
            EdgeField::StartRestriction,
            modes,
            ALL_ACCESS,
            Severity::Warning,
        );
        self.edge.attributes.set_start_restriction(value as u16);
        self
    }

    /// Modes with a complex restriction ending on this edge.
    pub fn set_end_restriction(&mut self, modes: u32) -> &mut Self {
        let value = self.mask(
            EdgeField::EndRestriction,
            modes,
            ALL_ACCESS,
            Severity::Warning,
        );
        self.edge.attributes.set_end_restriction(value as u16);
        self
    }

    pub fn set_part_of_complex_restriction(&mut self, part_of: bool) -> &mut Self {
        self.edge.attributes.set_part_of_complex_restriction(part_of);
        self
    }

    /// Simple turn restrictions: bit `i` bans the turn onto local edge `i`,
    /// for all vehicles at all times.
    pub fn set_restrictions(&mut self, mask: u32) -> &mut Self {
        let value = self.mask(
            EdgeField::Restrictions,
            mask,
            RESTRICTION_MASK,
            Severity::Warning,
        );
        self.edge.topology.set_restrictions(value as u8);
        self
    }

    // ------------------------------------------------------------------
    // Classification and speeds
    // ------------------------------------------------------------------

    pub fn set_classification(&mut self, roadclass: RoadClass) -> &mut Self {
        self.edge.geometry.set_classification(roadclass.code());
        self
    }

    pub fn set_surface(&mut self, surface: Surface) -> &mut Self {
        self.edge.geometry.set_surface(surface.code());
        self
    }

    /// Specialized use. Switching to or from a transit line use changes how
    /// the overlapping stop impact / line id slot is read.
    pub fn set_use(&mut self, edge_use: Use) -> &mut Self {
        self.edge.geometry.set_edge_use(edge_use.code());
        self
    }

    pub fn set_speed_type(&mut self, speed_type: SpeedType) -> &mut Self {
        self.edge.geometry.set_speed_type(speed_type.code());
        self
    }

    pub fn set_cyclelane(&mut self, cyclelane: CycleLane) -> &mut Self {
        self.edge.travel.set_cycle_lane(cyclelane.code());
        self
    }

    /// Bicycle network mask. An invalid mask is dropped entirely.
    pub fn set_bike_network(&mut self, bike_network: u32) -> &mut Self {
        let value = self.reset(EdgeField::BikeNetwork, bike_network, MAX_BICYCLE_NETWORK, 0);
        self.edge.travel.set_bike_network(value as u8);
        self
    }

    /// Average speed in kph.
    pub fn set_speed(&mut self, speed: u32) -> &mut Self {
        let value = self.clamp(EdgeField::Speed, speed, MAX_SPEED_KPH);
        self.edge.travel.set_speed(value as u8);
        self
    }

    /// Posted speed limit in kph.
    pub fn set_speed_limit(&mut self, speed_limit: u32) -> &mut Self {
        let value = self.clamp(EdgeField::SpeedLimit, speed_limit, MAX_SPEED_KPH);
        self.edge.travel.set_speed_limit(value as u8);
        self
    }

    /// Truck speed in kph.
    pub fn set_truck_speed(&mut self, speed: u32) -> &mut Self {
        let value = self.clamp(EdgeField::TruckSpeed, speed, MAX_SPEED_KPH);
        self.edge.travel.set_truck_speed(value as u8);
        self
    }

    pub fn set_truck_route(&mut self, truck_route: bool) -> &mut Self {
        self.edge.travel.set_truck_route(truck_route);
        self
    }

    pub fn set_lanecount(&mut self, lanecount: u32) -> &mut Self {
        let value = self.clamp(EdgeField::LaneCount, lanecount, MAX_LANE_COUNT);
        self.edge.geometry.set_lanecount(value as u8);
        self
    }

    pub fn set_density(&mut self, density: u32) -> &mut Self {
        let value = self.clamp(EdgeField::Density, density, MAX_DENSITY);
        self.edge.geometry.set_density(value as u8);
        self
    }

    pub fn set_named(&mut self, named: bool) -> &mut Self {
        self.edge.travel.set_named(named);
        self
    }

    pub fn set_sidewalk_left(&mut self, sidewalk: bool) -> &mut Self {
        self.edge.travel.set_sidewalk_left(sidewalk);
        self
    }

    pub fn set_sidewalk_right(&mut self, sidewalk: bool) -> &mut Self {
        self.edge.travel.set_sidewalk_right(sidewalk);
        self
    }

    // ------------------------------------------------------------------
    // Per-local-index metadata
    // ------------------------------------------------------------------

    /// Turn type from the inbound edge with local index `localidx`.
    pub fn set_turntype(&mut self, localidx: u32, turntype: TurnType) -> &mut Self {
        let code = u32::from(turntype.code());
        if self.check_local_index(EdgeField::TurnType, localidx, code) {
            let bits = overwrite_bits(
                self.edge.turns.turntype(),
                code,
                localidx,
                TURN_TYPE_WIDTH,
            );
            self.edge.turns.set_turntype(bits);
        }
        self
    }

    /// Flags an edge to the left between inbound edge `localidx` and this one.
    pub fn set_edge_to_left(&mut self, localidx: u32, left: bool) -> &mut Self {
        if self.check_local_index(EdgeField::EdgeToLeft, localidx, u32::from(left)) {
            let bits = overwrite_bits(
                u32::from(self.edge.turns.edge_to_left()),
                u32::from(left),
                localidx,
                1,
            );
            self.edge.turns.set_edge_to_left(bits as u8);
        }
        self
    }

    /// Flags an edge to the right between inbound edge `localidx` and this
    /// one. Shares storage with the transit line id.
    pub fn set_edge_to_right(&mut self, localidx: u32, right: bool) -> &mut Self {
        if self.check_local_index(EdgeField::EdgeToRight, localidx, u32::from(right)) {
            let bits = overwrite_bits(
                self.edge.turns.transit_slot(),
                u32::from(right),
                localidx + EDGE_TO_RIGHT_SHIFT,
                1,
            );
            self.edge.turns.set_transit_slot(bits);
        }
        self
    }

    /// Stop impact when coming from inbound edge `localidx`, clamped to
    /// [`MAX_STOP_IMPACT`]. Shares storage with the transit line id.
    pub fn set_stopimpact(&mut self, localidx: u32, stopimpact: u32) -> &mut Self {
        if !self.check_local_index(EdgeField::StopImpact, localidx, stopimpact) {
            return self;
        }
        let value = if stopimpact > MAX_STOP_IMPACT {
            self.report(
                EdgeField::StopImpact,
                Some(localidx),
                f64::from(stopimpact),
                Correction::Clamped {
                    stored: MAX_STOP_IMPACT,
                },
                Severity::Warning,
            );
            MAX_STOP_IMPACT
        } else {
            stopimpact
        };
        let bits = overwrite_bits(
            self.edge.turns.transit_slot(),
            value,
            localidx,
            STOP_IMPACT_WIDTH,
        );
        self.edge.turns.set_transit_slot(bits);
        self
    }

    /// Transit line id. Overwrites stop impacts and edge-to-right flags.
    pub fn set_lineid(&mut self, lineid: u32) -> &mut Self {
        self.edge.turns.set_transit_slot(lineid);
        self
    }

    // ------------------------------------------------------------------
    // Hierarchy
    // ------------------------------------------------------------------

    /// Index of this edge at its start node on the local level.
    pub fn set_localedgeidx(&mut self, idx: u32) -> &mut Self {
        let value = self.clamp(EdgeField::LocalEdgeIdx, idx, MAX_EDGES_PER_NODE);
        self.edge.hierarchy.set_localedgeidx(value as u8);
        self
    }

    /// Local index of the opposing edge at the end node.
    pub fn set_opp_local_idx(&mut self, idx: u32) -> &mut Self {
        let value = self.clamp(EdgeField::OppLocalIdx, idx, MAX_EDGES_PER_NODE);
        self.edge.hierarchy.set_opp_local_idx(value as u8);
        self
    }

    /// Marks the edge as shortcut number `shortcut` (1-based) from its
    /// start node.
    ///
    /// Slot 0 is rejected. A slot past [`MAX_SHORTCUTS_FROM_NODE`] leaves
    /// the mask alone but still flags the edge as a shortcut.
    pub fn set_shortcut(&mut self, shortcut: u32) -> &mut Self {
        if shortcut == 0 {
            self.report(
                EdgeField::Shortcut,
                None,
                0.0,
                Correction::Rejected,
                Severity::Warning,
            );
            return self;
        }

        if shortcut <= MAX_SHORTCUTS_FROM_NODE {
            self.edge.hierarchy.set_shortcut(1 << (shortcut - 1));
        } else {
            self.report(
                EdgeField::Shortcut,
                None,
                f64::from(shortcut),
                Correction::Rejected,
                Severity::Warning,
            );
        }

        self.edge.hierarchy.set_is_shortcut(true);
        self
    }

    /// Marks the edge as superseded by shortcut number `superseded`
    /// (1-based). Slot 0 and slots past [`MAX_SHORTCUTS_FROM_NODE`] are
    /// rejected.
    pub fn set_superseded(&mut self, superseded: u32) -> &mut Self {
        if superseded == 0 || superseded > MAX_SHORTCUTS_FROM_NODE {
            self.report(
                EdgeField::Superseded,
                None,
                f64::from(superseded),
                Correction::Rejected,
                Severity::Warning,
            );
            return self;
        }
        self.edge.hierarchy.set_superseded(1 << (superseded - 1));
        self
    }

    /// Marks the edge as a transition to the next higher hierarchy level.
    pub fn set_trans_up(&mut self) -> &mut Self {
        self.set_use(Use::TransitionUp)
    }

    /// Marks the edge as a transition to the next lower hierarchy level.
    pub fn set_trans_down(&mut self) -> &mut Self {
        self.set_use(Use::TransitionDown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tilegraph_common::constants::{access, MAX_LOCAL_EDGE_INDEX};

    fn single_diagnostic(builder: &DirectedEdgeBuilder) -> EdgeDiagnostic {
        assert_eq!(builder.diagnostics().len(), 1, "{:?}", builder.diagnostics());
        builder.diagnostics()[0]
    }

    #[test]
    fn test_length_clamps() {
        let mut builder = DirectedEdgeBuilder::new();
        builder.set_length(MAX_EDGE_LENGTH + 10);
        assert_eq!(builder.edge().length(), MAX_EDGE_LENGTH);
        let diagnostic = single_diagnostic(&builder);
        assert_eq!(diagnostic.field, EdgeField::Length);
        assert_eq!(
            diagnostic.correction,
            Correction::Clamped {
                stored: MAX_EDGE_LENGTH
            }
        );

        let mut builder = DirectedEdgeBuilder::new();
        builder.set_length(MAX_EDGE_LENGTH);
        assert_eq!(builder.edge().length(), MAX_EDGE_LENGTH);
        assert!(builder.diagnostics().is_empty());
    }

    #[test]
    fn test_weighted_grade_resets_to_level() {
        let mut builder = DirectedEdgeBuilder::new();
        builder.set_weighted_grade(3);
        assert_eq!(builder.edge().weighted_grade(), 3);
        builder.set_weighted_grade(16);
        assert_eq!(builder.edge().weighted_grade(), LEVEL_GRADE);
        assert_eq!(
            single_diagnostic(&builder).correction,
            Correction::Reset { stored: 6 }
        );
    }

    #[test]
    fn test_curvature_resets_to_zero() {
        let mut builder = DirectedEdgeBuilder::new();
        builder.set_curvature(9).set_curvature(40);
        assert_eq!(builder.edge().curvature(), 0);
        assert_eq!(single_diagnostic(&builder).field, EdgeField::Curvature);
    }

    #[test]
    fn test_speeds_clamp() {
        let mut builder = DirectedEdgeBuilder::new();
        builder
            .set_speed(300)
            .set_speed_limit(256)
            .set_truck_speed(80)
            .set_lanecount(20)
            .set_density(16);
        let edge = builder.edge();
        assert_eq!(edge.speed(), MAX_SPEED_KPH);
        assert_eq!(edge.speed_limit(), MAX_SPEED_KPH);
        assert_eq!(edge.truck_speed(), 80);
        assert_eq!(edge.lanecount(), MAX_LANE_COUNT);
        assert_eq!(edge.density(), MAX_DENSITY);
        assert_eq!(builder.diagnostics().len(), 4);
    }

    #[test]
    fn test_forward_access_masks() {
        let mut builder = DirectedEdgeBuilder::new();
        builder.set_forwardaccess(access::CAR | access::BUS);
        assert_eq!(builder.edge().forwardaccess(), access::CAR | access::BUS);
        assert!(builder.diagnostics().is_empty());

        builder.set_forwardaccess(0x400 | access::TRUCK);
        assert_eq!(builder.edge().forwardaccess(), access::TRUCK);
        let diagnostic = single_diagnostic(&builder);
        assert_eq!(diagnostic.severity, Severity::Error);
        assert_eq!(
            diagnostic.correction,
            Correction::Masked {
                stored: access::TRUCK
            }
        );
    }

    #[test]
    fn test_reverse_access_masks() {
        let mut builder = DirectedEdgeBuilder::new();
        builder.set_reverseaccess(u32::MAX);
        assert_eq!(builder.edge().reverseaccess(), access::ALL);
        assert_eq!(single_diagnostic(&builder).field, EdgeField::ReverseAccess);
    }

    #[test]
    fn test_all_forward_access() {
        let mut builder = DirectedEdgeBuilder::new();
        builder.set_all_forward_access();
        assert_eq!(builder.edge().forwardaccess(), access::ALL);
        assert_eq!(builder.edge().reverseaccess(), access::ALL);
    }

    #[test]
    fn test_restrictions_mask() {
        let mut builder = DirectedEdgeBuilder::new();
        builder.set_restrictions(0x1_05);
        assert_eq!(builder.edge().restrictions(), 0x05);
        assert_eq!(
            single_diagnostic(&builder).correction,
            Correction::Masked { stored: 0x05 }
        );
    }

    #[test]
    fn test_complex_restrictions() {
        let mut builder = DirectedEdgeBuilder::new();
        builder
            .set_start_restriction(access::CAR)
            .set_end_restriction(access::PEDESTRIAN | 0x1000)
            .set_part_of_complex_restriction(true);
        let edge = builder.edge();
        assert_eq!(edge.start_restriction(), access::CAR);
        assert_eq!(edge.end_restriction(), access::PEDESTRIAN);
        assert!(edge.part_of_complex_restriction());
        assert_eq!(single_diagnostic(&builder).field, EdgeField::EndRestriction);
    }

    #[test]
    fn test_bike_network_rejects_invalid_mask() {
        let mut builder = DirectedEdgeBuilder::new();
        builder.set_bike_network(0b0101);
        assert_eq!(builder.edge().bike_network(), 0b0101);
        builder.set_bike_network(0b1_0001);
        assert_eq!(builder.edge().bike_network(), 0);
        assert_eq!(
            single_diagnostic(&builder).correction,
            Correction::Reset { stored: 0 }
        );
    }

    #[test]
    fn test_turntype_per_index() {
        let mut builder = DirectedEdgeBuilder::new();
        builder
            .set_turntype(0, TurnType::Left)
            .set_turntype(MAX_LOCAL_EDGE_INDEX, TurnType::SharpRight)
            .set_turntype(3, TurnType::Reverse);
        let edge = *builder.edge();
        assert_eq!(edge.turntype(0), Some(TurnType::Left));
        assert_eq!(edge.turntype(3), Some(TurnType::Reverse));
        assert_eq!(edge.turntype(MAX_LOCAL_EDGE_INDEX), Some(TurnType::SharpRight));
        assert_eq!(edge.turntype(1), Some(TurnType::Straight));

        builder.set_turntype(MAX_LOCAL_EDGE_INDEX + 1, TurnType::Right);
        assert_eq!(builder.edge().turntypes(), edge.turntypes());
        let diagnostic = single_diagnostic(&builder);
        assert_eq!(diagnostic.index, Some(MAX_LOCAL_EDGE_INDEX + 1));
        assert_eq!(diagnostic.correction, Correction::Rejected);
    }

    #[test]
    fn test_edge_to_left_and_right() {
        let mut builder = DirectedEdgeBuilder::new();
        builder
            .set_edge_to_left(2, true)
            .set_edge_to_right(5, true)
            .set_edge_to_right(9, true)
            .set_edge_to_left(8, true);
        let edge = builder.edge();
        assert_eq!(edge.edge_to_left(2), Some(true));
        assert_eq!(edge.edge_to_left(3), Some(false));
        assert_eq!(edge.edge_to_right(5), Some(true));
        assert_eq!(edge.edges_to_left().into_bits(), 0b100);
        assert_eq!(edge.edges_to_right().into_bits(), 0b10_0000);
        assert_eq!(builder.diagnostics().len(), 2);

        builder.set_edge_to_left(2, false);
        assert_eq!(builder.edge().edge_to_left(2), Some(false));
    }

    #[test]
    fn test_stopimpact_clamps_value_and_rejects_index() {
        let mut builder = DirectedEdgeBuilder::new();
        builder.set_stopimpact(1, 4).set_stopimpact(2, 12);
        assert_eq!(builder.edge().stopimpact(1), Some(4));
        assert_eq!(builder.edge().stopimpact(2), Some(MAX_STOP_IMPACT));

        builder.set_stopimpact(8, 3);
        assert_eq!(builder.edge().stopimpacts().into_bits(), (4 << 3) | (7 << 6));
        let corrections: Vec<Correction> =
            builder.diagnostics().iter().map(|d| d.correction).collect();
        assert_eq!(
            corrections,
            vec![Correction::Clamped { stored: 7 }, Correction::Rejected]
        );
    }

    #[test]
    fn test_stopimpact_and_edge_to_right_share_slot() {
        let mut builder = DirectedEdgeBuilder::new();
        builder.set_stopimpact(7, 7).set_edge_to_right(0, true);
        let edge = builder.edge();
        assert_eq!(edge.stopimpact(7), Some(7));
        assert_eq!(edge.edge_to_right(0), Some(true));
        assert_eq!(edge.transit_slot_bits(), (7 << 21) | (1 << 24));
    }

    #[test]
    fn test_lineid_overwrites_stop_impacts() {
        let mut builder = DirectedEdgeBuilder::new();
        builder
            .set_stopimpact(0, 3)
            .set_use(Use::Rail)
            .set_lineid(0xfeed_f00d);
        let edge = builder.build().unwrap();
        assert_eq!(edge.lineid(), 0xfeed_f00d);
        assert_eq!(
            edge.transit_slot(),
            crate::TransitSlot::Line(0xfeed_f00d)
        );
    }

    #[test]
    fn test_local_indices_clamp() {
        let mut builder = DirectedEdgeBuilder::new();
        builder.set_localedgeidx(5).set_opp_local_idx(200).set_opp_index(128);
        let edge = builder.edge();
        assert_eq!(edge.localedgeidx(), 5);
        assert_eq!(edge.opp_local_idx(), MAX_EDGES_PER_NODE);
        assert_eq!(edge.opp_index(), MAX_EDGES_PER_NODE);
        assert_eq!(builder.diagnostics().len(), 2);
    }

    #[test]
    fn test_shortcut_zero_rejected() {
        let mut builder = DirectedEdgeBuilder::new();
        builder.set_shortcut(0);
        assert_eq!(builder.edge().shortcut(), 0);
        assert!(!builder.edge().is_shortcut());
        assert_eq!(single_diagnostic(&builder).correction, Correction::Rejected);
    }

    #[test]
    fn test_shortcut_sets_one_hot_bit() {
        for slot in 1..=MAX_SHORTCUTS_FROM_NODE {
            let mut builder = DirectedEdgeBuilder::new();
            builder.set_shortcut(slot);
            assert_eq!(builder.edge().shortcut(), 1 << (slot - 1));
            assert!(builder.edge().is_shortcut());
            assert!(builder.diagnostics().is_empty());
        }
    }

    #[test]
    fn test_shortcut_past_max_still_flags_shortcut() {
        let mut builder = DirectedEdgeBuilder::new();
        builder.set_shortcut(MAX_SHORTCUTS_FROM_NODE + 1);
        assert_eq!(builder.edge().shortcut(), 0);
        assert!(builder.edge().is_shortcut());
        assert_eq!(single_diagnostic(&builder).field, EdgeField::Shortcut);
    }

    #[test]
    fn test_superseded() {
        let mut builder = DirectedEdgeBuilder::new();
        builder.set_superseded(3);
        assert_eq!(builder.edge().superseded(), 0b100);

        builder.set_superseded(0).set_superseded(MAX_SHORTCUTS_FROM_NODE + 1);
        assert_eq!(builder.edge().superseded(), 0b100);
        assert_eq!(builder.diagnostics().len(), 2);
    }

    #[test]
    fn test_edgeinfo_offset_fatal() {
        let mut builder = DirectedEdgeBuilder::new();
        assert!(builder.set_edgeinfo_offset(MAX_EDGE_INFO_OFFSET).is_ok());
        assert_eq!(builder.edge().edgeinfo_offset(), MAX_EDGE_INFO_OFFSET);

        let err = builder
            .set_edgeinfo_offset(MAX_EDGE_INFO_OFFSET + 1)
            .unwrap_err();
        assert_eq!(
            err,
            EdgeError::EdgeInfoOffsetOverflow {
                offset: MAX_EDGE_INFO_OFFSET + 1,
                max: MAX_EDGE_INFO_OFFSET
            }
        );
        assert_eq!(single_diagnostic(&builder).severity, Severity::Fatal);

        // The builder stays poisoned even after further valid writes.
        builder.set_length(10);
        assert_eq!(builder.build().unwrap_err(), err);
    }

    #[test]
    fn test_slopes() {
        let mut builder = DirectedEdgeBuilder::new();
        builder.set_max_up_slope(12.3).set_max_down_slope(-20.0);
        assert_eq!(builder.edge().max_up_slope(), 13);
        assert_eq!(builder.edge().max_down_slope(), -20);
        assert!(builder.diagnostics().is_empty());

        builder.set_max_up_slope(80.0).set_max_down_slope(f32::NAN);
        assert_eq!(builder.edge().max_up_slope(), slope::MAX_SLOPE_DEGREES);
        assert_eq!(builder.edge().max_down_slope(), 0);
        let fields: Vec<EdgeField> = builder.diagnostics().iter().map(|d| d.field).collect();
        assert_eq!(fields, vec![EdgeField::MaxUpSlope, EdgeField::MaxDownSlope]);
    }

    #[test]
    fn test_transitions() {
        let mut builder = DirectedEdgeBuilder::new();
        builder.set_trans_up();
        assert!(builder.edge().trans_up());
        assert!(builder.edge().is_transition());
        builder.set_trans_down();
        assert!(builder.edge().trans_down());
        assert!(!builder.edge().trans_up());
    }

    #[test]
    fn test_flags() {
        let mut builder = DirectedEdgeBuilder::new();
        builder
            .set_toll(true)
            .set_tunnel(true)
            .set_deadend(true)
            .set_sidewalk_right(true)
            .set_named(true)
            .set_not_thru(true);
        let edge = builder.build().unwrap();
        assert!(edge.toll());
        assert!(edge.tunnel());
        assert!(edge.deadend());
        assert!(edge.sidewalk_right());
        assert!(!edge.sidewalk_left());
        assert!(edge.named());
        assert!(edge.not_thru());
        assert!(!edge.bridge());
    }

    #[test]
    fn test_from_edge_keeps_fields() {
        let mut builder = DirectedEdgeBuilder::new();
        builder.set_length(500).set_superseded(1);
        let edge = builder.build().unwrap();

        let mut reopened = DirectedEdgeBuilder::from_edge(edge);
        reopened.set_shortcut(2);
        let (edge, diagnostics) = reopened.finish().unwrap();
        assert_eq!(edge.length(), 500);
        assert_eq!(edge.superseded(), 1);
        assert_eq!(edge.shortcut(), 2);
        assert!(diagnostics.is_empty());
    }

    fn turn_type() -> impl Strategy<Value = TurnType> {
        proptest::sample::select(TurnType::ALL)
    }

    proptest! {
        #[test]
        fn prop_length_never_exceeds_max(length in any::<u32>()) {
            let mut builder = DirectedEdgeBuilder::new();
            builder.set_length(length);
            prop_assert_eq!(builder.edge().length(), length.min(MAX_EDGE_LENGTH));
            prop_assert_eq!(builder.diagnostics().len(), usize::from(length > MAX_EDGE_LENGTH));
        }

        #[test]
        fn prop_grade_and_curvature_fallbacks(factor in 16u32..) {
            let mut builder = DirectedEdgeBuilder::new();
            builder.set_weighted_grade(factor).set_curvature(factor);
            prop_assert_eq!(builder.edge().weighted_grade(), LEVEL_GRADE);
            prop_assert_eq!(builder.edge().curvature(), 0);
        }

        #[test]
        fn prop_forward_access_is_masked(modes in any::<u32>()) {
            let mut builder = DirectedEdgeBuilder::new();
            builder.set_forwardaccess(modes);
            prop_assert_eq!(builder.edge().forwardaccess(), modes & access::ALL);
            if modes <= access::ALL {
                prop_assert_eq!(builder.edge().forwardaccess(), modes);
                prop_assert!(builder.diagnostics().is_empty());
            }
        }

        #[test]
        fn prop_turntype_written_at_index(
            idx in 0..=MAX_LOCAL_EDGE_INDEX,
            initial in proptest::collection::vec(turn_type(), 8),
            turntype in turn_type(),
        ) {
            let mut builder = DirectedEdgeBuilder::new();
            for (i, &t) in (0u32..).zip(&initial) {
                builder.set_turntype(i, t);
            }
            builder.set_turntype(idx, turntype);
            for i in 0..=MAX_LOCAL_EDGE_INDEX {
                let expected = if i == idx { turntype } else { initial[i as usize] };
                prop_assert_eq!(builder.edge().turntype(i), Some(expected));
            }
        }

        #[test]
        fn prop_turntype_out_of_range_is_noop(
            idx in (MAX_LOCAL_EDGE_INDEX + 1)..,
            turntype in turn_type(),
        ) {
            let mut builder = DirectedEdgeBuilder::new();
            builder.set_turntype(1, TurnType::Left);
            let before = builder.edge().turntypes();
            builder.set_turntype(idx, turntype);
            prop_assert_eq!(builder.edge().turntypes(), before);
        }

        #[test]
        fn prop_stopimpact_value_clamped(idx in 0..=MAX_LOCAL_EDGE_INDEX, value in any::<u32>()) {
            let mut builder = DirectedEdgeBuilder::new();
            builder.set_stopimpact(idx, value);
            prop_assert_eq!(builder.edge().stopimpact(idx), Some(value.min(MAX_STOP_IMPACT)));
        }
    }
}
