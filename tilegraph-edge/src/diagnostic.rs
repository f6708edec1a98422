//! Observable record of every corrected or refused write.

use std::fmt;

use serde::Serialize;

/// Fields whose writes can be corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeField {
    EdgeInfoOffset,
    AccessRestriction,
    Length,
    WeightedGrade,
    Curvature,
    OppIndex,
    BikeNetwork,
    LaneCount,
    Restrictions,
    ForwardAccess,
    ReverseAccess,
    StartRestriction,
    EndRestriction,
    Speed,
    SpeedLimit,
    TruckSpeed,
    MaxUpSlope,
    MaxDownSlope,
    Density,
    TurnType,
    EdgeToLeft,
    EdgeToRight,
    StopImpact,
    LocalEdgeIdx,
    OppLocalIdx,
    Shortcut,
    Superseded,
}

impl EdgeField {
    pub const fn name(self) -> &'static str {
        match self {
            EdgeField::EdgeInfoOffset => "edge_info_offset",
            EdgeField::AccessRestriction => "access_restriction",
            EdgeField::Length => "length",
            EdgeField::WeightedGrade => "weighted_grade",
            EdgeField::Curvature => "curvature",
            EdgeField::OppIndex => "opp_index",
            EdgeField::BikeNetwork => "bike_network",
            EdgeField::LaneCount => "lane_count",
            EdgeField::Restrictions => "restrictions",
            EdgeField::ForwardAccess => "forward_access",
            EdgeField::ReverseAccess => "reverse_access",
            EdgeField::StartRestriction => "start_restriction",
            EdgeField::EndRestriction => "end_restriction",
            EdgeField::Speed => "speed",
            EdgeField::SpeedLimit => "speed_limit",
            EdgeField::TruckSpeed => "truck_speed",
            EdgeField::MaxUpSlope => "max_up_slope",
            EdgeField::MaxDownSlope => "max_down_slope",
            EdgeField::Density => "density",
            EdgeField::TurnType => "turn_type",
            EdgeField::EdgeToLeft => "edge_to_left",
            EdgeField::EdgeToRight => "edge_to_right",
            EdgeField::StopImpact => "stop_impact",
            EdgeField::LocalEdgeIdx => "local_edge_idx",
            EdgeField::OppLocalIdx => "opp_local_idx",
            EdgeField::Shortcut => "shortcut",
            EdgeField::Superseded => "superseded",
        }
    }
}

impl fmt::Display for EdgeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What happened to a write that did not fit its field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Correction {
    /// Stored the field maximum.
    Clamped { stored: u32 },
    /// Stored the value with invalid bits removed.
    Masked { stored: u32 },
    /// Stored a fixed fallback (default or zero) instead of the value.
    Reset { stored: u32 },
    /// Write dropped; the field keeps its prior value.
    Rejected,
    /// Construction cannot continue.
    Fatal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
    Fatal,
}

/// One corrected or refused write.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeDiagnostic {
    pub field: EdgeField,
    /// Local edge index for per-index writes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    /// The value the caller tried to write.
    pub value: f64,
    pub correction: Correction,
    pub severity: Severity,
}

impl fmt::Display for EdgeDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field)?;
        if let Some(index) = self.index {
            write!(f, "[{index}]")?;
        }
        write!(f, " = {}: ", self.value)?;
        match self.correction {
            Correction::Clamped { stored } => write!(f, "exceeds maximum, stored {stored}"),
            Correction::Masked { stored } => write!(f, "invalid bits removed, stored {stored}"),
            Correction::Reset { stored } => write!(f, "out of range, stored {stored}"),
            Correction::Rejected => f.write_str("out of range, write skipped"),
            Correction::Fatal => f.write_str("cannot be represented"),
        }
    }
}
