//! Named projections of access and bicycle network masks.

use serde::{Deserialize, Serialize};
use tilegraph_common::constants::{access, bike_network};

/// Per-mode view of an access mask.
///
/// Serves forward and reverse access as well as the start and end complex
/// restriction masks, which share the bit layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AccessFlags {
    pub bicycle: bool,
    pub bus: bool,
    pub car: bool,
    pub emergency: bool,
    #[serde(rename = "HOV")]
    pub hov: bool,
    pub pedestrian: bool,
    pub taxi: bool,
    pub truck: bool,
    pub wheelchair: bool,
}

impl AccessFlags {
    pub const fn from_mask(mask: u32) -> Self {
        Self {
            bicycle: mask & access::BICYCLE != 0,
            bus: mask & access::BUS != 0,
            car: mask & access::CAR != 0,
            emergency: mask & access::EMERGENCY != 0,
            hov: mask & access::HOV != 0,
            pedestrian: mask & access::PEDESTRIAN != 0,
            taxi: mask & access::TAXI != 0,
            truck: mask & access::TRUCK != 0,
            wheelchair: mask & access::WHEELCHAIR != 0,
        }
    }

    pub const fn to_mask(self) -> u32 {
        let mut mask = 0;
        if self.bicycle {
            mask |= access::BICYCLE;
        }
        if self.bus {
            mask |= access::BUS;
        }
        if self.car {
            mask |= access::CAR;
        }
        if self.emergency {
            mask |= access::EMERGENCY;
        }
        if self.hov {
            mask |= access::HOV;
        }
        if self.pedestrian {
            mask |= access::PEDESTRIAN;
        }
        if self.taxi {
            mask |= access::TAXI;
        }
        if self.truck {
            mask |= access::TRUCK;
        }
        if self.wheelchair {
            mask |= access::WHEELCHAIR;
        }
        mask
    }
}

impl From<u32> for AccessFlags {
    fn from(mask: u32) -> Self {
        Self::from_mask(mask)
    }
}

/// Which bicycle networks an edge belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BikeNetworkFlags {
    pub national: bool,
    pub regional: bool,
    pub local: bool,
    pub mountain: bool,
}

impl BikeNetworkFlags {
    pub const fn from_mask(mask: u32) -> Self {
        Self {
            national: mask & bike_network::NATIONAL != 0,
            regional: mask & bike_network::REGIONAL != 0,
            local: mask & bike_network::LOCAL != 0,
            mountain: mask & bike_network::MOUNTAIN != 0,
        }
    }

    pub const fn to_mask(self) -> u32 {
        (self.national as u32 * bike_network::NATIONAL)
            | (self.regional as u32 * bike_network::REGIONAL)
            | (self.local as u32 * bike_network::LOCAL)
            | (self.mountain as u32 * bike_network::MOUNTAIN)
    }
}

impl From<u32> for BikeNetworkFlags {
    fn from(mask: u32) -> Self {
        Self::from_mask(mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_projection() {
        let flags = AccessFlags::from_mask(access::CAR | access::HOV | access::WHEELCHAIR);
        assert!(flags.car);
        assert!(flags.hov);
        assert!(flags.wheelchair);
        assert!(!flags.pedestrian);
        assert!(!flags.bus);
        assert_eq!(flags.to_mask(), access::CAR | access::HOV | access::WHEELCHAIR);
    }

    #[test]
    fn test_all_access_sets_every_mode() {
        let flags = AccessFlags::from(access::ALL);
        assert_eq!(flags.to_mask(), access::ALL);
        assert!(flags.bicycle && flags.emergency && flags.taxi && flags.truck);
    }

    #[test]
    fn test_access_ignores_unknown_bits() {
        assert_eq!(AccessFlags::from_mask(0x200), AccessFlags::default());
    }

    #[test]
    fn test_access_json_keys() {
        let json = serde_json::to_value(AccessFlags::from_mask(access::HOV)).unwrap();
        assert_eq!(json["HOV"], true);
        assert_eq!(json["car"], false);
        assert!(json.get("hov").is_none());
        assert_eq!(json.as_object().unwrap().len(), 9);
    }

    #[test]
    fn test_bike_network_projection() {
        let flags = BikeNetworkFlags::from_mask(bike_network::REGIONAL | bike_network::MOUNTAIN);
        assert!(!flags.national);
        assert!(flags.regional);
        assert!(!flags.local);
        assert!(flags.mountain);
        assert_eq!(flags.to_mask(), 0b1010);
    }
}
