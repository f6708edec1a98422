//! Named enumerations stored in tile records as small integer codes.
//!
//! Records only keep the code; names exist for export and for attribute
//! documents handed to the tile builder.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

macro_rules! named_codes {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident = $code:literal => $label:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[repr(u8)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            #[default]
            $($(#[$vmeta])* $variant = $code,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            pub const fn code(self) -> u8 {
                self as u8
            }

            pub const fn from_code(code: u8) -> Option<Self> {
                match code {
                    $($code => Some($name::$variant),)+
                    _ => None,
                }
            }

            pub const fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($label => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl TryFrom<u8> for $name {
            type Error = Error;

            fn try_from(code: u8) -> Result<Self, Error> {
                Self::from_code(code).ok_or(Error::UnknownCode { kind: $kind, code })
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Error> {
                Self::from_name(s).ok_or_else(|| Error::UnknownName {
                    kind: $kind,
                    name: s.to_string(),
                })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.name())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let name = String::deserialize(deserializer)?;
                name.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

named_codes! {
    /// Importance of a road, most important first.
    RoadClass, "road class" {
        Motorway = 0 => "motorway",
        Trunk = 1 => "trunk",
        Primary = 2 => "primary",
        Secondary = 3 => "secondary",
        Tertiary = 4 => "tertiary",
        Unclassified = 5 => "unclassified",
        Residential = 6 => "residential",
        ServiceOther = 7 => "service_other",
    }
}

named_codes! {
    /// General smoothness of the surface, smoothest first.
    Surface, "surface" {
        PavedSmooth = 0 => "paved_smooth",
        Paved = 1 => "paved",
        PavedRough = 2 => "paved_rough",
        Compacted = 3 => "compacted",
        Dirt = 4 => "dirt",
        Gravel = 5 => "gravel",
        Path = 6 => "path",
        Impassable = 7 => "impassable",
    }
}

named_codes! {
    /// Specialized use of an edge.
    Use, "use" {
        Road = 0 => "road",
        Ramp = 1 => "ramp",
        TurnChannel = 2 => "turn_channel",
        Track = 3 => "track",
        Driveway = 4 => "driveway",
        Alley = 5 => "alley",
        ParkingAisle = 6 => "parking_aisle",
        EmergencyAccess = 7 => "emergency_access",
        DriveThru = 8 => "drive_through",
        Culdesac = 9 => "culdesac",
        Cycleway = 20 => "cycleway",
        MountainBike = 21 => "mountain_bike",
        Sidewalk = 24 => "sidewalk",
        Footway = 25 => "footway",
        Steps = 26 => "steps",
        Other = 40 => "other",
        Ferry = 41 => "ferry",
        RailFerry = 42 => "rail-ferry",
        /// Transit line (rail)
        Rail = 50 => "rail",
        /// Transit line (bus)
        Bus = 51 => "bus",
        RailConnection = 52 => "rail_connection",
        BusConnection = 53 => "bus_connection",
        TransitConnection = 54 => "transit_connection",
        /// Hierarchy transition to the next higher level
        TransitionUp = 60 => "transition_up",
        /// Hierarchy transition to the next lower level
        TransitionDown = 61 => "transition_down",
    }
}

impl Use {
    /// Transit line edges store a line id where other edges store stop impacts.
    pub const fn is_transit_line(self) -> bool {
        matches!(self, Use::Rail | Use::Bus)
    }

    pub const fn is_transition(self) -> bool {
        matches!(self, Use::TransitionUp | Use::TransitionDown)
    }
}

named_codes! {
    /// Where the speed of an edge came from.
    SpeedType, "speed type" {
        Tagged = 0 => "tagged",
        Classified = 1 => "classified",
    }
}

named_codes! {
    /// Kind of cycle lane along an edge.
    CycleLane, "cycle lane" {
        None = 0 => "none",
        Shared = 1 => "shared",
        Dedicated = 2 => "dedicated",
        Separated = 3 => "separated",
    }
}

named_codes! {
    /// Turn from an inbound edge onto this edge.
    TurnType, "turn type" {
        Straight = 0 => "straight",
        SlightRight = 1 => "slight_right",
        Right = 2 => "right",
        SharpRight = 3 => "sharp_right",
        Reverse = 4 => "reverse",
        SharpLeft = 5 => "sharp_left",
        Left = 6 => "left",
        SlightLeft = 7 => "slight_left",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for &class in RoadClass::ALL {
            assert_eq!(RoadClass::from_code(class.code()), Some(class));
        }
        for &u in Use::ALL {
            assert_eq!(Use::from_code(u.code()), Some(u));
            assert_eq!(Use::from_name(u.name()), Some(u));
        }
        for &t in TurnType::ALL {
            assert_eq!(TurnType::try_from(t.code()).unwrap(), t);
        }
    }

    #[test]
    fn test_unknown_codes() {
        assert_eq!(Use::from_code(17), None);
        assert_eq!(SpeedType::from_code(2), None);
        assert_eq!(
            Use::try_from(17u8),
            Err(Error::UnknownCode { kind: "use", code: 17 })
        );
    }

    #[test]
    fn test_codes_fit_field_widths() {
        assert!(RoadClass::ALL.iter().all(|c| c.code() < 8));
        assert!(Surface::ALL.iter().all(|c| c.code() < 8));
        assert!(Use::ALL.iter().all(|c| c.code() < 64));
        assert!(SpeedType::ALL.iter().all(|c| c.code() < 4));
        assert!(CycleLane::ALL.iter().all(|c| c.code() < 4));
        assert!(TurnType::ALL.iter().all(|c| c.code() < 8));
    }

    #[test]
    fn test_names() {
        assert_eq!(RoadClass::ServiceOther.to_string(), "service_other");
        assert_eq!(Use::RailFerry.name(), "rail-ferry");
        assert_eq!(CycleLane::default(), CycleLane::None);
        assert_eq!("paved_rough".parse::<Surface>().unwrap(), Surface::PavedRough);
        assert!("cobblestone".parse::<Surface>().is_err());
    }

    #[test]
    fn test_transit_line_uses() {
        assert!(Use::Rail.is_transit_line());
        assert!(Use::Bus.is_transit_line());
        assert!(!Use::BusConnection.is_transit_line());
        assert!(Use::TransitionDown.is_transition());
        assert!(!Use::Road.is_transition());
    }

    #[test]
    fn test_serde_by_name() {
        let json = serde_json::to_string(&Use::TurnChannel).unwrap();
        assert_eq!(json, "\"turn_channel\"");
        let parsed: CycleLane = serde_json::from_str("\"separated\"").unwrap();
        assert_eq!(parsed, CycleLane::Separated);
        assert!(serde_json::from_str::<CycleLane>("\"painted\"").is_err());
    }
}
