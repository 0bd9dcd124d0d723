//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use std::collections::HashSet;

use crate::models::{Housekeeper, Room, RoomStatus, Session};

/// Validate that a Room's state is internally consistent
pub fn assert_room_invariants(room: &Room) {
    // Cleaning timestamp present exactly while cleaned
    debug_assert!(
        room.assignment_date.is_some() == (room.status == RoomStatus::Cleaned),
        "Room {} is {} but assignment_date is {:?}",
        room.room_number,
        room.status,
        room.assignment_date
    );

    debug_assert!(
        !room.room_number.trim().is_empty() && room.room_number.trim() == room.room_number,
        "Room {} has an empty or untrimmed number {:?}",
        room.id,
        room.room_number
    );
}

/// Validate that a housekeeper is displayable
pub fn assert_housekeeper_invariants(housekeeper: &Housekeeper) {
    debug_assert!(
        !housekeeper.name.trim().is_empty(),
        "Housekeeper {} has empty name",
        housekeeper.id
    );
}

/// Validate the whole store snapshot
pub fn assert_store_invariants(rooms: &[Room], housekeepers: &[Housekeeper], session: &Session) {
    let mut numbers = HashSet::new();
    for room in rooms {
        assert_room_invariants(room);
        debug_assert!(
            numbers.insert(room.room_number.as_str()),
            "Duplicate room number {}",
            room.room_number
        );
    }

    for housekeeper in housekeepers {
        assert_housekeeper_invariants(housekeeper);
    }

    // A selected housekeeper must still be on the roster
    if let Some(selected) = session.current_housekeeper {
        debug_assert!(
            housekeepers.iter().any(|h| h.id == selected),
            "Selected housekeeper {} is not on the roster",
            selected
        );
    }
}
