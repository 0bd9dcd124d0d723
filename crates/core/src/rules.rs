//! Visibility and display rules
//!
//! Pure derivations over a store snapshot, shared by both role views.
//! Nothing here reads the clock: callers pass `now` explicitly.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Housekeeper, Message, Occupancy, Role, Room, RoomStatus};
use crate::permissions::{PermissionMatrix, StoreAction};

/// How long a cleaned room stays on its housekeeper's list
pub const ASSIGNMENT_WINDOW_DAYS: i64 = 3;

pub fn assignment_window() -> Duration {
    Duration::days(ASSIGNMENT_WINDOW_DAYS)
}

/// Rooms on a housekeeper's own worklist.
///
/// Dirty rooms are always listed. Cleaned rooms stay listed while they were
/// cleaned strictly after `now - 3 days`, so a room cleaned exactly three
/// days ago has dropped off.
pub fn assigned_rooms_for<'a>(
    housekeeper: &Housekeeper,
    rooms: &'a [Room],
    now: DateTime<Utc>,
) -> Vec<&'a Room> {
    let cutoff = now - assignment_window();
    rooms
        .iter()
        .filter(|room| room.is_assigned_to(housekeeper.id))
        .filter(|room| match room.status {
            RoomStatus::Dirty => true,
            RoomStatus::Cleaned => room.assignment_date.map_or(false, |at| at > cutoff),
        })
        .collect()
}

/// Every room assigned to a housekeeper, regardless of the window
pub fn rooms_assigned_to_housekeeper<'a>(
    housekeeper: &Housekeeper,
    rooms: &'a [Room],
) -> Vec<&'a Room> {
    rooms
        .iter()
        .filter(|room| room.is_assigned_to(housekeeper.id))
        .collect()
}

/// Occupancy badge classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    /// Guest checked out, room vacant
    Success,
    /// Check-out expected but guest not gone yet
    Destructive,
    /// Stay-over
    Neutral,
}

impl Badge {
    /// Presentation variant name; neutral renders as an outline badge
    pub fn variant(&self) -> &'static str {
        match self {
            Badge::Success => "success",
            Badge::Destructive => "destructive",
            Badge::Neutral => "outline",
        }
    }
}

pub fn badge_for(occupancy: Occupancy, is_vacant: bool) -> Badge {
    match (occupancy, is_vacant) {
        (Occupancy::Out, true) => Badge::Success,
        (Occupancy::Out, false) => Badge::Destructive,
        (Occupancy::Stay, _) => Badge::Neutral,
    }
}

pub fn room_badge(room: &Room) -> Badge {
    badge_for(room.occupancy, room.is_vacant)
}

/// Whether the front desk is offered "Mark Checked Out" for this room
pub fn can_mark_checked_out(room: &Room) -> bool {
    room.occupancy == Occupancy::Out && !room.is_vacant
}

/// One front desk roster section
#[derive(Debug, Clone)]
pub struct RosterSection<'a> {
    pub housekeeper: &'a Housekeeper,
    pub rooms: Vec<&'a Room>,
}

/// Rooms grouped by housekeeper in roster order.
/// Housekeepers without rooms are left out.
pub fn front_desk_roster<'a>(
    housekeepers: &'a [Housekeeper],
    rooms: &'a [Room],
) -> Vec<RosterSection<'a>> {
    housekeepers
        .iter()
        .map(|housekeeper| RosterSection {
            housekeeper,
            rooms: rooms_assigned_to_housekeeper(housekeeper, rooms),
        })
        .filter(|section| !section.rooms.is_empty())
        .collect()
}

/// Board display order
pub fn messages_newest_first(messages: &[Message]) -> Vec<&Message> {
    messages.iter().rev().collect()
}

/// The summarize action is only offered to the front desk on a non-empty board
pub fn can_summarize(role: Option<Role>, messages: &[Message]) -> bool {
    PermissionMatrix::allows(role, StoreAction::Summarize) && !messages.is_empty()
}
