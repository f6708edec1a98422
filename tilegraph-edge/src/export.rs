//! Structured export of a directed edge.
//!
//! The projection is a public contract for consumers of the JSON: it carries
//! a curated subset of the record. The opposing index, the edge info offset,
//! the simple restriction mask, reverse access and the hierarchy fields are
//! internal and never exported.

use serde::Serialize;
use tilegraph_common::constants::LEVEL_GRADE;
use tilegraph_common::{CycleLane, GraphId, RoadClass, SpeedType, Surface, Use};

use crate::access::{AccessFlags, BikeNetworkFlags};
use crate::directed_edge::DirectedEdge;

/// Export document of one edge. Field order matches the JSON key order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeExport {
    pub end_node: GraphId,
    pub speed: u32,
    pub access_restriction: bool,
    pub start_restriction: AccessFlags,
    pub end_restriction: AccessFlags,
    pub part_of_complex_restriction: bool,
    pub has_exit_sign: bool,
    pub drive_on_right: bool,
    pub toll: bool,
    pub seasonal: bool,
    pub destination_only: bool,
    pub tunnel: bool,
    pub bridge: bool,
    pub round_about: bool,
    pub unreachable: bool,
    pub traffic_signal: bool,
    pub forward: bool,
    pub not_thru: bool,
    pub cycle_lane: CycleLane,
    pub bike_network: BikeNetworkFlags,
    pub truck_route: bool,
    pub lane_count: u32,
    #[serde(rename = "use")]
    pub edge_use: Use,
    pub speed_type: SpeedType,
    pub country_crossing: bool,
    pub geo_attributes: GeoAttributes,
    pub access: AccessFlags,
    pub classification: ClassificationExport,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoAttributes {
    pub length: u32,
    /// Grade factor normalized around level, two decimals.
    pub weighted_grade: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassificationExport {
    pub classification: RoadClass,
    pub surface: Surface,
    pub link: bool,
    pub internal: bool,
}

/// Maps a stored grade factor to the exported value `(factor - 6) / 0.6`.
pub fn normalized_grade(factor: u32) -> f64 {
    let grade = (f64::from(factor) - f64::from(LEVEL_GRADE)) / 0.6;
    (grade * 100.0).round() / 100.0
}

impl DirectedEdge {
    pub fn export(&self) -> EdgeExport {
        EdgeExport {
            end_node: self.endnode(),
            speed: self.speed(),
            access_restriction: self.access_restriction() != 0,
            start_restriction: AccessFlags::from_mask(self.start_restriction()),
            end_restriction: AccessFlags::from_mask(self.end_restriction()),
            part_of_complex_restriction: self.part_of_complex_restriction(),
            has_exit_sign: self.exitsign(),
            drive_on_right: self.drive_on_right(),
            toll: self.toll(),
            seasonal: self.seasonal(),
            destination_only: self.dest_only(),
            tunnel: self.tunnel(),
            bridge: self.bridge(),
            round_about: self.roundabout(),
            unreachable: self.unreachable(),
            traffic_signal: self.traffic_signal(),
            forward: self.forward(),
            not_thru: self.not_thru(),
            cycle_lane: self.cyclelane(),
            bike_network: self.bike_network_flags(),
            truck_route: self.truck_route(),
            lane_count: self.lanecount(),
            edge_use: self.edge_use(),
            speed_type: self.speed_type(),
            country_crossing: self.ctry_crossing(),
            geo_attributes: GeoAttributes {
                length: self.length(),
                weighted_grade: normalized_grade(self.weighted_grade()),
            },
            access: self.forward_access_flags(),
            classification: ClassificationExport {
                classification: self.classification(),
                surface: self.surface(),
                link: self.link(),
                internal: self.internal(),
            },
        }
    }

    /// The export document as a JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        // Plain structs, numbers and named enums: serialization cannot fail.
        serde_json::to_value(self.export()).unwrap_or_default()
    }
}
