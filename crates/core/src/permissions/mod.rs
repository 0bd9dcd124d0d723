//! Permission system for store operations

use crate::models::Role;

/// Mutations and requests that are gated by role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreAction {
    // Front desk administration
    AddRoom,
    MarkVacant,
    AddHousekeeper,
    RemoveHousekeeper,

    // Housekeeping
    UpdateRoomStatus,

    // Message board
    SendMessages,
    Summarize,
}

impl StoreAction {
    pub fn describe(&self) -> &'static str {
        match self {
            StoreAction::AddRoom => "add rooms",
            StoreAction::MarkVacant => "mark rooms as checked out",
            StoreAction::AddHousekeeper => "add housekeepers",
            StoreAction::RemoveHousekeeper => "remove housekeepers",
            StoreAction::UpdateRoomStatus => "update room status",
            StoreAction::SendMessages => "send messages",
            StoreAction::Summarize => "summarize the message board",
        }
    }
}

/// Permission matrix for session roles
pub struct PermissionMatrix;

impl PermissionMatrix {
    /// Check if a role has permission to perform an action
    pub fn can_perform(role: Role, action: StoreAction) -> bool {
        match action {
            StoreAction::AddRoom
            | StoreAction::MarkVacant
            | StoreAction::AddHousekeeper
            | StoreAction::RemoveHousekeeper
            | StoreAction::Summarize => role == Role::FrontDesk,

            StoreAction::UpdateRoomStatus => role == Role::Housekeeping,

            // Both roles post to the board
            StoreAction::SendMessages => true,
        }
    }

    /// Same as `can_perform`, treating an unset role as having no permissions
    pub fn allows(role: Option<Role>, action: StoreAction) -> bool {
        role.map_or(false, |r| Self::can_perform(r, action))
    }
}
