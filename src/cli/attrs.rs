//! JSON attribute documents accepted by `tilegraph build`.
//!
//! Every key is optional and maps onto one builder setter. Unknown keys are
//! rejected so a typo cannot silently produce a default field.

use serde::Deserialize;
use tilegraph_common::{CycleLane, GraphId, RoadClass, SpeedType, Surface, TurnType, Use};
use tilegraph_edge::{DirectedEdgeBuilder, EdgeError};

/// Attributes of one directed edge.
///
/// Per-local-index lists (`turn_types`, `edges_to_left`, `edges_to_right`,
/// `stop_impacts`) are positional: entry `i` is written for local index `i`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EdgeAttributes {
    pub end_node: Option<GraphId>,
    pub edgeinfo_offset: Option<u32>,
    pub forward: Option<bool>,
    pub leaves_tile: Option<bool>,
    pub opp_index: Option<u32>,

    pub length: Option<u32>,
    pub weighted_grade: Option<u32>,
    pub curvature: Option<u32>,
    pub max_up_slope: Option<f32>,
    pub max_down_slope: Option<f32>,

    pub drive_on_right: Option<bool>,
    pub deadend: Option<bool>,
    pub toll: Option<bool>,
    pub seasonal: Option<bool>,
    pub dest_only: Option<bool>,
    pub tunnel: Option<bool>,
    pub bridge: Option<bool>,
    pub roundabout: Option<bool>,
    pub unreachable: Option<bool>,
    pub traffic_signal: Option<bool>,
    pub not_thru: Option<bool>,
    pub ctry_crossing: Option<bool>,
    pub internal: Option<bool>,
    pub link: Option<bool>,
    pub exitsign: Option<bool>,

    pub forward_access: Option<u32>,
    pub reverse_access: Option<u32>,
    pub all_forward_access: bool,
    pub access_restriction: Option<u32>,
    pub start_restriction: Option<u32>,
    pub end_restriction: Option<u32>,
    pub part_of_complex_restriction: Option<bool>,
    pub restrictions: Option<u32>,

    pub classification: Option<RoadClass>,
    pub surface: Option<Surface>,
    #[serde(rename = "use")]
    pub edge_use: Option<Use>,
    pub speed_type: Option<SpeedType>,
    pub cycle_lane: Option<CycleLane>,
    pub bike_network: Option<u32>,
    pub speed: Option<u32>,
    pub speed_limit: Option<u32>,
    pub truck_speed: Option<u32>,
    pub truck_route: Option<bool>,
    pub lanecount: Option<u32>,
    pub density: Option<u32>,
    pub named: Option<bool>,
    pub sidewalk_left: Option<bool>,
    pub sidewalk_right: Option<bool>,

    pub turn_types: Vec<TurnType>,
    pub edges_to_left: Vec<bool>,
    pub edges_to_right: Vec<bool>,
    pub stop_impacts: Vec<u32>,
    pub line_id: Option<u32>,

    pub local_edge_idx: Option<u32>,
    pub opp_local_idx: Option<u32>,
    pub shortcut: Option<u32>,
    pub superseded: Option<u32>,
    pub trans_up: bool,
    pub trans_down: bool,
}

macro_rules! apply {
    ($builder:ident, $($field:expr => $setter:ident),+ $(,)?) => {
        $(
            if let Some(value) = $field {
                $builder.$setter(value);
            }
        )+
    };
}

impl EdgeAttributes {
    /// Writes every present attribute through `builder`.
    ///
    /// The use is written before the overlapping transit slot so a line id
    /// lands on an edge that reads it back as one.
    ///
    /// # Errors
    ///
    /// Returns the fatal edge info offset error; the builder is poisoned.
    pub fn apply(&self, builder: &mut DirectedEdgeBuilder) -> Result<(), EdgeError> {
        if let Some(offset) = self.edgeinfo_offset {
            builder.set_edgeinfo_offset(offset)?;
        }

        apply!(builder,
            self.end_node => set_endnode,
            self.forward => set_forward,
            self.leaves_tile => set_leaves_tile,
            self.opp_index => set_opp_index,
            self.length => set_length,
            self.weighted_grade => set_weighted_grade,
            self.curvature => set_curvature,
            self.max_up_slope => set_max_up_slope,
            self.max_down_slope => set_max_down_slope,
            self.drive_on_right => set_drive_on_right,
            self.deadend => set_deadend,
            self.toll => set_toll,
            self.seasonal => set_seasonal,
            self.dest_only => set_dest_only,
            self.tunnel => set_tunnel,
            self.bridge => set_bridge,
            self.roundabout => set_roundabout,
            self.unreachable => set_unreachable,
            self.traffic_signal => set_traffic_signal,
            self.not_thru => set_not_thru,
            self.ctry_crossing => set_ctry_crossing,
            self.internal => set_internal,
            self.link => set_link,
            self.exitsign => set_exitsign,
        );

        if self.all_forward_access {
            builder.set_all_forward_access();
        }
        apply!(builder,
            self.forward_access => set_forwardaccess,
            self.reverse_access => set_reverseaccess,
            self.access_restriction => set_access_restriction,
            self.start_restriction => set_start_restriction,
            self.end_restriction => set_end_restriction,
            self.part_of_complex_restriction => set_part_of_complex_restriction,
            self.restrictions => set_restrictions,
            self.classification => set_classification,
            self.surface => set_surface,
            self.edge_use => set_use,
            self.speed_type => set_speed_type,
            self.cycle_lane => set_cyclelane,
            self.bike_network => set_bike_network,
            self.speed => set_speed,
            self.speed_limit => set_speed_limit,
            self.truck_speed => set_truck_speed,
            self.truck_route => set_truck_route,
            self.lanecount => set_lanecount,
            self.density => set_density,
            self.named => set_named,
            self.sidewalk_left => set_sidewalk_left,
            self.sidewalk_right => set_sidewalk_right,
        );
        if self.trans_up {
            builder.set_trans_up();
        }
        if self.trans_down {
            builder.set_trans_down();
        }

        for (idx, &turntype) in (0u32..).zip(&self.turn_types) {
            builder.set_turntype(idx, turntype);
        }
        for (idx, &left) in (0u32..).zip(&self.edges_to_left) {
            builder.set_edge_to_left(idx, left);
        }
        for (idx, &impact) in (0u32..).zip(&self.stop_impacts) {
            builder.set_stopimpact(idx, impact);
        }
        for (idx, &right) in (0u32..).zip(&self.edges_to_right) {
            builder.set_edge_to_right(idx, right);
        }
        apply!(builder, self.line_id => set_lineid);

        apply!(builder,
            self.local_edge_idx => set_localedgeidx,
            self.opp_local_idx => set_opp_local_idx,
            self.shortcut => set_shortcut,
            self.superseded => set_superseded,
        );
        Ok(())
    }
}
