//! Domain store - single source of truth for rooms, roster, board and session
//!
//! Every mutation goes through here. Role gating is enforced by the store
//! itself rather than left to the views, and the invariants in
//! [`crate::invariants`] are checked after each mutation in debug builds.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::clock::{Clock, SystemClock};
use crate::error::{Error, Result};
use crate::invariants::assert_store_invariants;
use crate::models::{
    Housekeeper, HousekeeperId, Message, Occupancy, Role, Room, RoomId, RoomStatus, Session,
};
use crate::permissions::{PermissionMatrix, StoreAction};
use crate::rules::{self, RosterSection};
use crate::summary::SummaryEntry;

/// In-memory state shared by the front desk and housekeeping views
pub struct Store {
    rooms: Vec<Room>,
    housekeepers: Vec<Housekeeper>,
    messages: Vec<Message>,
    session: Session,
    clock: Arc<dyn Clock>,
}

impl Store {
    /// Empty store on the wall clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            rooms: Vec::new(),
            housekeepers: Vec::new(),
            messages: Vec::new(),
            session: Session::default(),
            clock,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    // ------------------------------------------------------------
    // Session
    // ------------------------------------------------------------

    /// Switch role. Moving to a different role drops the housekeeper selection.
    pub fn set_role(&mut self, role: Option<Role>) {
        if self.session.role != role {
            self.session.current_housekeeper = None;
        }
        self.session.role = role;
        tracing::info!(role = ?role, "Role changed");
    }

    /// Select (or clear with `None`) the housekeeper using the housekeeping view
    pub fn set_current_housekeeper(
        &mut self,
        housekeeper_id: Option<HousekeeperId>,
    ) -> Result<()> {
        if let Some(id) = housekeeper_id {
            self.housekeeper(id).ok_or(Error::HousekeeperNotFound(id))?;
        }
        self.session.current_housekeeper = housekeeper_id;
        tracing::info!(housekeeper = ?housekeeper_id, "Active housekeeper changed");
        Ok(())
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn role(&self) -> Option<Role> {
        self.session.role
    }

    pub fn current_housekeeper(&self) -> Option<&Housekeeper> {
        self.session
            .current_housekeeper
            .and_then(|id| self.housekeeper(id))
    }

    fn require(&self, action: StoreAction) -> Result<()> {
        if PermissionMatrix::allows(self.session.role, action) {
            Ok(())
        } else {
            let who = self
                .session
                .role
                .map_or("no role", |role| role.display_name());
            tracing::warn!(role = who, action = ?action, "Rejected store operation");
            Err(Error::PermissionDenied(format!(
                "{} cannot {}",
                who,
                action.describe()
            )))
        }
    }

    // ------------------------------------------------------------
    // Rooms
    // ------------------------------------------------------------

    /// Add a dirty, non-vacant room, optionally assigned to a housekeeper
    pub fn add_room(
        &mut self,
        room_number: &str,
        occupancy: Occupancy,
        assigned_to: Option<HousekeeperId>,
    ) -> Result<&Room> {
        self.require(StoreAction::AddRoom)?;

        let room_number = room_number.trim();
        if room_number.is_empty() {
            return Err(Error::EmptyRoomNumber);
        }
        if self.room_by_number(room_number).is_some() {
            return Err(Error::DuplicateRoomNumber(room_number.to_string()));
        }
        if let Some(id) = assigned_to {
            self.housekeeper(id).ok_or(Error::HousekeeperNotFound(id))?;
        }

        let room = Room::new(room_number.to_string(), occupancy, assigned_to);
        tracing::info!(
            room = %room.room_number,
            occupancy = %occupancy,
            housekeeper = ?assigned_to,
            "Room added"
        );
        self.rooms.push(room);
        self.check_invariants();

        let index = self.rooms.len() - 1;
        Ok(&self.rooms[index])
    }

    /// Mark a room cleaned or dirty.
    ///
    /// Only the selected housekeeper may do this, and only for rooms
    /// assigned to them. Becoming `Cleaned` stamps `assignment_date`;
    /// going back to `Dirty` clears it. Repeating the current status is a
    /// no-op and keeps the original cleaning time.
    pub fn update_room_status(&mut self, room_id: RoomId, status: RoomStatus) -> Result<&Room> {
        self.require(StoreAction::UpdateRoomStatus)?;

        let index = self.room_index(room_id)?;
        let housekeeper_id = self
            .session
            .current_housekeeper
            .ok_or(Error::NoHousekeeperSelected)?;
        if !self.rooms[index].is_assigned_to(housekeeper_id) {
            tracing::warn!(
                room = %self.rooms[index].room_number,
                housekeeper = %housekeeper_id,
                "Room not assigned to housekeeper"
            );
            return Err(Error::NotAssigned(room_id));
        }

        let now = self.clock.now();
        let room = &mut self.rooms[index];
        if room.status != status {
            room.status = status;
            room.assignment_date = match status {
                RoomStatus::Cleaned => Some(now),
                RoomStatus::Dirty => None,
            };
            tracing::info!(room = %room.room_number, status = %status, "Room status updated");
        }
        self.check_invariants();

        Ok(&self.rooms[index])
    }

    /// Record that the guest of an `out` room has left.
    ///
    /// Stay-over rooms and rooms already vacant are left untouched.
    pub fn mark_as_vacant(&mut self, room_id: RoomId) -> Result<&Room> {
        self.require(StoreAction::MarkVacant)?;

        let index = self.room_index(room_id)?;
        let room = &mut self.rooms[index];
        if rules::can_mark_checked_out(room) {
            room.is_vacant = true;
            tracing::info!(room = %room.room_number, "Room marked as vacant");
        } else {
            tracing::debug!(
                room = %room.room_number,
                occupancy = %room.occupancy,
                "Vacancy unchanged"
            );
        }
        self.check_invariants();

        Ok(&self.rooms[index])
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room(&self, room_id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == room_id)
    }

    /// Lookup by trimmed room number
    pub fn room_by_number(&self, room_number: &str) -> Option<&Room> {
        let room_number = room_number.trim();
        self.rooms.iter().find(|r| r.room_number == room_number)
    }

    fn room_index(&self, room_id: RoomId) -> Result<usize> {
        self.rooms
            .iter()
            .position(|r| r.id == room_id)
            .ok_or(Error::RoomNotFound(room_id))
    }

    /// Assignee of a room, `None` if unassigned or no longer on the roster
    pub fn assignee_of(&self, room: &Room) -> Option<&Housekeeper> {
        room.assigned_to.and_then(|id| self.housekeeper(id))
    }

    // ------------------------------------------------------------
    // Roster
    // ------------------------------------------------------------

    pub fn add_housekeeper(&mut self, name: &str) -> Result<&Housekeeper> {
        self.require(StoreAction::AddHousekeeper)?;

        let name = name.trim();
        if name.is_empty() {
            return Err(Error::EmptyName);
        }

        let housekeeper = Housekeeper::new(name.to_string());
        tracing::info!(
            housekeeper = %housekeeper.id,
            name = %housekeeper.name,
            "Housekeeper added"
        );
        self.housekeepers.push(housekeeper);
        self.check_invariants();

        let index = self.housekeepers.len() - 1;
        Ok(&self.housekeepers[index])
    }

    /// Take a housekeeper off the roster.
    ///
    /// Room assignments are kept as-is and read back as unassigned
    /// through [`Store::assignee_of`].
    pub fn remove_housekeeper(&mut self, housekeeper_id: HousekeeperId) -> Result<Housekeeper> {
        self.require(StoreAction::RemoveHousekeeper)?;

        let index = self
            .housekeepers
            .iter()
            .position(|h| h.id == housekeeper_id)
            .ok_or(Error::HousekeeperNotFound(housekeeper_id))?;
        let removed = self.housekeepers.remove(index);

        if self.session.current_housekeeper == Some(housekeeper_id) {
            self.session.current_housekeeper = None;
        }

        let orphaned = self.rooms.iter().filter(|r| r.is_assigned_to(housekeeper_id)).count();
        tracing::info!(
            housekeeper = %removed.id,
            name = %removed.name,
            orphaned,
            "Housekeeper removed"
        );
        self.check_invariants();

        Ok(removed)
    }

    pub fn housekeepers(&self) -> &[Housekeeper] {
        &self.housekeepers
    }

    pub fn housekeeper(&self, housekeeper_id: HousekeeperId) -> Option<&Housekeeper> {
        self.housekeepers.iter().find(|h| h.id == housekeeper_id)
    }

    /// First roster entry with this (trimmed) name
    pub fn housekeeper_by_name(&self, name: &str) -> Option<&Housekeeper> {
        let name = name.trim();
        self.housekeepers.iter().find(|h| h.name == name)
    }

    // ------------------------------------------------------------
    // Message board
    // ------------------------------------------------------------

    /// Post to the board as the current session identity
    pub fn add_message(&mut self, text: &str) -> Result<&Message> {
        if text.trim().is_empty() {
            return Err(Error::EmptyText);
        }
        self.require(StoreAction::SendMessages)?;
        let author = self.author()?;

        let message = Message::new(author, text.to_string(), self.clock.now());
        tracing::info!(author = %message.author, "Message posted");
        self.messages.push(message);

        let index = self.messages.len() - 1;
        Ok(&self.messages[index])
    }

    fn author(&self) -> Result<String> {
        match self.session.role {
            Some(Role::FrontDesk) => Ok(Role::FrontDesk.display_name().to_string()),
            Some(Role::Housekeeping) => self
                .current_housekeeper()
                .map(|h| h.name.clone())
                .ok_or(Error::NoHousekeeperSelected),
            None => Err(Error::PermissionDenied("no role selected".into())),
        }
    }

    /// Oldest first
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Snapshot of the board for the summarization service, oldest first.
    ///
    /// Taken under whatever lock guards the store; the service call itself
    /// happens after the lock is released.
    pub fn summary_request(&self) -> Result<Vec<SummaryEntry>> {
        self.require(StoreAction::Summarize)?;
        Ok(self.messages.iter().map(SummaryEntry::from).collect())
    }

    // ------------------------------------------------------------
    // Derived views
    // ------------------------------------------------------------

    /// Worklist of the selected housekeeper (3-day window applied)
    pub fn my_rooms(&self) -> Vec<&Room> {
        match self.current_housekeeper() {
            Some(housekeeper) => rules::assigned_rooms_for(housekeeper, &self.rooms, self.now()),
            None => Vec::new(),
        }
    }

    /// Front desk roster grouping (no window)
    pub fn roster(&self) -> Vec<RosterSection<'_>> {
        rules::front_desk_roster(&self.housekeepers, &self.rooms)
    }

    fn check_invariants(&self) {
        assert_store_invariants(&self.rooms, &self.housekeepers, &self.session);
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("rooms", &self.rooms)
            .field("housekeepers", &self.housekeepers)
            .field("messages", &self.messages)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::rules::assigned_rooms_for;
    use chrono::{Duration, TimeZone};

    fn setup() -> (Store, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
        ));
        let mut store = Store::with_clock(clock.clone());
        store.set_role(Some(Role::FrontDesk));
        (store, clock)
    }

    fn add_housekeeper(store: &mut Store, name: &str) -> HousekeeperId {
        store.add_housekeeper(name).unwrap().id
    }

    fn add_room(
        store: &mut Store,
        number: &str,
        occupancy: Occupancy,
        hk: Option<HousekeeperId>,
    ) -> RoomId {
        store.add_room(number, occupancy, hk).unwrap().id
    }

    fn act_as(store: &mut Store, hk: HousekeeperId) {
        store.set_role(Some(Role::Housekeeping));
        store.set_current_housekeeper(Some(hk)).unwrap();
    }

    #[test]
    fn test_add_room_defaults() {
        let (mut store, _) = setup();
        let room = store.add_room(" 101 ", Occupancy::Out, None).unwrap();

        assert_eq!(room.room_number, "101");
        assert_eq!(room.status, RoomStatus::Dirty);
        assert!(!room.is_vacant);
        assert!(room.assignment_date.is_none());
        assert!(room.assigned_to.is_none());
    }

    #[test]
    fn test_duplicate_room_number() {
        let (mut store, _) = setup();
        store.add_room("101", Occupancy::Out, None).unwrap();

        let err = store.add_room("  101", Occupancy::Stay, None).unwrap_err();
        assert_eq!(err, Error::DuplicateRoomNumber("101".into()));
        assert_eq!(store.rooms().len(), 1);

        // Comparison is case-sensitive
        store.add_room("12a", Occupancy::Out, None).unwrap();
        store.add_room("12A", Occupancy::Out, None).unwrap();
    }

    #[test]
    fn test_empty_room_number() {
        let (mut store, _) = setup();
        assert_eq!(
            store.add_room("   ", Occupancy::Out, None).unwrap_err(),
            Error::EmptyRoomNumber
        );
    }

    #[test]
    fn test_add_room_unknown_housekeeper() {
        let (mut store, _) = setup();
        let ghost = HousekeeperId::new();
        assert_eq!(
            store.add_room("101", Occupancy::Out, Some(ghost)).unwrap_err(),
            Error::HousekeeperNotFound(ghost)
        );
    }

    #[test]
    fn test_update_status_sets_and_clears_date() {
        let (mut store, clock) = setup();
        let alex = add_housekeeper(&mut store, "Alex");
        let room = add_room(&mut store, "101", Occupancy::Out, Some(alex));
        act_as(&mut store, alex);

        let cleaned = store.update_room_status(room, RoomStatus::Cleaned).unwrap();
        assert_eq!(cleaned.status, RoomStatus::Cleaned);
        assert_eq!(cleaned.assignment_date, Some(clock.now()));

        let dirty = store.update_room_status(room, RoomStatus::Dirty).unwrap();
        assert_eq!(dirty.status, RoomStatus::Dirty);
        assert!(dirty.assignment_date.is_none());
    }

    #[test]
    fn test_repeat_clean_keeps_original_time() {
        let (mut store, clock) = setup();
        let alex = add_housekeeper(&mut store, "Alex");
        let room = add_room(&mut store, "101", Occupancy::Out, Some(alex));
        act_as(&mut store, alex);

        let first = clock.now();
        store.update_room_status(room, RoomStatus::Cleaned).unwrap();
        clock.advance(Duration::hours(5));
        store.update_room_status(room, RoomStatus::Cleaned).unwrap();

        assert_eq!(store.room(room).unwrap().assignment_date, Some(first));
    }

    #[test]
    fn test_update_status_unknown_room() {
        let (mut store, _) = setup();
        let alex = add_housekeeper(&mut store, "Alex");
        act_as(&mut store, alex);

        let ghost = RoomId::new();
        assert_eq!(
            store.update_room_status(ghost, RoomStatus::Cleaned).unwrap_err(),
            Error::RoomNotFound(ghost)
        );
    }

    #[test]
    fn test_update_status_gating() {
        let (mut store, _) = setup();
        let alex = add_housekeeper(&mut store, "Alex");
        let sam = add_housekeeper(&mut store, "Sam");
        let room = add_room(&mut store, "101", Occupancy::Out, Some(alex));

        // Front desk does not clean rooms
        assert!(matches!(
            store.update_room_status(room, RoomStatus::Cleaned),
            Err(Error::PermissionDenied(_))
        ));

        // Housekeeping without a selection
        store.set_role(Some(Role::Housekeeping));
        assert_eq!(
            store.update_room_status(room, RoomStatus::Cleaned).unwrap_err(),
            Error::NoHousekeeperSelected
        );

        // Someone else's room
        store.set_current_housekeeper(Some(sam)).unwrap();
        assert_eq!(
            store.update_room_status(room, RoomStatus::Cleaned).unwrap_err(),
            Error::NotAssigned(room)
        );
        assert_eq!(store.room(room).unwrap().status, RoomStatus::Dirty);
    }

    #[test]
    fn test_mark_as_vacant_is_idempotent() {
        let (mut store, _) = setup();
        let room = add_room(&mut store, "101", Occupancy::Out, None);

        let once = store.mark_as_vacant(room).unwrap().clone();
        assert!(once.is_vacant);
        let twice = store.mark_as_vacant(room).unwrap().clone();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_mark_as_vacant_ignores_stay_rooms() {
        let (mut store, _) = setup();
        let room = add_room(&mut store, "102", Occupancy::Stay, None);

        assert!(!store.mark_as_vacant(room).unwrap().is_vacant);
        assert!(!store.mark_as_vacant(room).unwrap().is_vacant);
    }

    #[test]
    fn test_mark_as_vacant_unknown_room() {
        let (mut store, _) = setup();
        let ghost = RoomId::new();
        assert_eq!(store.mark_as_vacant(ghost).unwrap_err(), Error::RoomNotFound(ghost));
    }

    #[test]
    fn test_front_desk_only_operations() {
        let (mut store, _) = setup();
        let room = add_room(&mut store, "101", Occupancy::Out, None);
        let alex = add_housekeeper(&mut store, "Alex");
        act_as(&mut store, alex);

        assert!(matches!(store.mark_as_vacant(room), Err(Error::PermissionDenied(_))));
        assert!(matches!(
            store.add_room("102", Occupancy::Out, None),
            Err(Error::PermissionDenied(_))
        ));
        assert!(matches!(store.add_housekeeper("Sam"), Err(Error::PermissionDenied(_))));
        assert!(matches!(store.remove_housekeeper(alex), Err(Error::PermissionDenied(_))));
        assert!(matches!(store.summary_request(), Err(Error::PermissionDenied(_))));
    }

    #[test]
    fn test_add_housekeeper() {
        let (mut store, _) = setup();
        assert_eq!(store.add_housekeeper("").unwrap_err(), Error::EmptyName);
        assert_eq!(store.add_housekeeper("  \t").unwrap_err(), Error::EmptyName);

        let alex = store.add_housekeeper("  Alex ").unwrap().clone();
        assert_eq!(alex.name, "Alex");
        assert_eq!(store.housekeeper_by_name("Alex").map(|h| h.id), Some(alex.id));
    }

    #[test]
    fn test_remove_housekeeper_leaves_dangling_assignment() {
        let (mut store, _) = setup();
        let alex = add_housekeeper(&mut store, "Alex");
        let room = add_room(&mut store, "101", Occupancy::Out, Some(alex));

        let removed = store.remove_housekeeper(alex).unwrap();
        assert_eq!(removed.name, "Alex");
        assert!(store.housekeepers().is_empty());

        let room = store.room(room).unwrap();
        assert_eq!(room.assigned_to, Some(alex));
        assert!(store.assignee_of(room).is_none());
        assert!(store.roster().is_empty());

        assert_eq!(store.remove_housekeeper(alex).unwrap_err(), Error::HousekeeperNotFound(alex));
    }

    #[test]
    fn test_remove_active_housekeeper_clears_selection() {
        let (mut store, _) = setup();
        let alex = add_housekeeper(&mut store, "Alex");
        store.set_current_housekeeper(Some(alex)).unwrap();

        store.remove_housekeeper(alex).unwrap();
        assert!(store.session().current_housekeeper.is_none());
    }

    #[test]
    fn test_set_current_housekeeper() {
        let (mut store, _) = setup();
        let alex = add_housekeeper(&mut store, "Alex");
        store.set_role(Some(Role::Housekeeping));

        let ghost = HousekeeperId::new();
        assert_eq!(
            store.set_current_housekeeper(Some(ghost)).unwrap_err(),
            Error::HousekeeperNotFound(ghost)
        );

        store.set_current_housekeeper(Some(alex)).unwrap();
        assert_eq!(store.current_housekeeper().map(|h| h.name.as_str()), Some("Alex"));

        store.set_current_housekeeper(None).unwrap();
        assert!(store.current_housekeeper().is_none());
        assert!(store.my_rooms().is_empty());
    }

    #[test]
    fn test_role_change_drops_selection() {
        let (mut store, _) = setup();
        let alex = add_housekeeper(&mut store, "Alex");
        act_as(&mut store, alex);

        store.set_role(Some(Role::FrontDesk));
        assert!(store.session().current_housekeeper.is_none());
    }

    #[test]
    fn test_same_role_keeps_selection() {
        let (mut store, _) = setup();
        let alex = add_housekeeper(&mut store, "Alex");
        act_as(&mut store, alex);

        store.set_role(Some(Role::Housekeeping));
        assert_eq!(store.session().current_housekeeper, Some(alex));
        assert_eq!(store.role(), Some(Role::Housekeeping));
    }

    #[test]
    fn test_empty_messages_rejected() {
        let (mut store, _) = setup();
        assert_eq!(store.add_message("").unwrap_err(), Error::EmptyText);
        assert_eq!(store.add_message("   ").unwrap_err(), Error::EmptyText);
        assert!(store.messages().is_empty());
    }

    #[test]
    fn test_message_author_follows_session() {
        let (mut store, clock) = setup();
        let alex = add_housekeeper(&mut store, "Alex");

        let msg = store.add_message("hi").unwrap().clone();
        assert_eq!(msg.author, "Front Desk");
        assert_eq!(msg.text, "hi");
        assert_eq!(msg.timestamp, clock.now());
        assert_eq!(store.messages().len(), 1);

        act_as(&mut store, alex);
        clock.advance(Duration::minutes(3));
        let reply = store.add_message("on my way").unwrap().clone();
        assert_eq!(reply.author, "Alex");
        assert_eq!(store.messages().len(), 2);
    }

    #[test]
    fn test_messages_need_identity() {
        let (mut store, _) = setup();

        store.set_role(Some(Role::Housekeeping));
        assert_eq!(store.add_message("hello").unwrap_err(), Error::NoHousekeeperSelected);

        store.set_role(None);
        assert!(matches!(store.add_message("hello"), Err(Error::PermissionDenied(_))));
        assert!(store.messages().is_empty());
    }

    #[test]
    fn test_summary_request_is_oldest_first() {
        let (mut store, _) = setup();
        store.add_message("first").unwrap();
        store.add_message("second").unwrap();

        let request = store.summary_request().unwrap();
        assert_eq!(request.len(), 2);
        assert_eq!(request[0].text, "first");
        assert_eq!(request[1].author, "Front Desk");
    }

    #[test]
    fn test_alex_room_101_scenario() {
        let (mut store, clock) = setup();
        let alex_id = add_housekeeper(&mut store, "Alex");
        let room_id = add_room(&mut store, "101", Occupancy::Out, Some(alex_id));
        let alex = store.housekeeper(alex_id).unwrap().clone();

        let visible = assigned_rooms_for(&alex, store.rooms(), clock.now());
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].room_number, "101");
        assert_eq!(visible[0].status, RoomStatus::Dirty);

        act_as(&mut store, alex_id);
        let cleaned_at = clock.now();
        store.update_room_status(room_id, RoomStatus::Cleaned).unwrap();

        assert_eq!(assigned_rooms_for(&alex, store.rooms(), cleaned_at).len(), 1);
        let next_day = assigned_rooms_for(&alex, store.rooms(), cleaned_at + Duration::days(1));
        assert_eq!(next_day.len(), 1);
        assert_eq!(next_day[0].id, room_id);
        let later = cleaned_at + Duration::days(4);
        assert!(assigned_rooms_for(&alex, store.rooms(), later).is_empty());

        // The housekeeping view reads the injected clock
        clock.advance(Duration::days(2) + Duration::hours(23));
        assert_eq!(store.my_rooms().len(), 1);
        clock.set(cleaned_at + Duration::days(3) + Duration::seconds(1));
        assert!(store.my_rooms().is_empty());
    }
}
