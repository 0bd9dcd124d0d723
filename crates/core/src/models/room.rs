//! Room model - the unit of housekeeping work

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::HousekeeperId;
use super::RoomId;
use crate::error::Error;

/// Whether a guest is staying or the room is in turnover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Occupancy {
    Stay,
    Out,
}

impl Occupancy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Occupancy::Stay => "stay",
            Occupancy::Out => "out",
        }
    }

    /// Capitalized label shown on the occupancy badge
    pub fn label(&self) -> &'static str {
        match self {
            Occupancy::Stay => "Stay",
            Occupancy::Out => "Out",
        }
    }
}

impl fmt::Display for Occupancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Occupancy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "stay" => Ok(Occupancy::Stay),
            "out" => Ok(Occupancy::Out),
            other => Err(Error::InvalidValue(format!(
                "occupancy must be 'stay' or 'out', got '{}'",
                other
            ))),
        }
    }
}

/// Cleaning state of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Dirty,
    Cleaned,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Dirty => "dirty",
            RoomStatus::Cleaned => "cleaned",
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "dirty" => Ok(RoomStatus::Dirty),
            "cleaned" => Ok(RoomStatus::Cleaned),
            other => Err(Error::InvalidValue(format!(
                "status must be 'dirty' or 'cleaned', got '{}'",
                other
            ))),
        }
    }
}

/// A hotel room tracked by housekeeping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    /// Unique, stored trimmed
    pub room_number: String,
    pub occupancy: Occupancy,
    /// Only meaningful when `occupancy` is `Out`
    pub is_vacant: bool,
    pub status: RoomStatus,
    /// Weak reference; the housekeeper may have been removed since
    pub assigned_to: Option<HousekeeperId>,
    /// Set when the room last became `Cleaned`, absent while `Dirty`
    pub assignment_date: Option<DateTime<Utc>>,
}

impl Room {
    pub fn new(
        room_number: String,
        occupancy: Occupancy,
        assigned_to: Option<HousekeeperId>,
    ) -> Self {
        Self {
            id: RoomId::new(),
            room_number,
            occupancy,
            is_vacant: false,
            status: RoomStatus::Dirty,
            assigned_to,
            assignment_date: None,
        }
    }

    pub fn is_cleaned(&self) -> bool {
        self.status == RoomStatus::Cleaned
    }

    pub fn is_assigned_to(&self, housekeeper_id: HousekeeperId) -> bool {
        self.assigned_to == Some(housekeeper_id)
    }
}
