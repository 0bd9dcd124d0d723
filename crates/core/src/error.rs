//! Error types for CleanSweep Core

use thiserror::Error;

use crate::models::{HousekeeperId, RoomId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("A room with number {0} already exists")]
    DuplicateRoomNumber(String),

    #[error("Room number cannot be empty")]
    EmptyRoomNumber,

    #[error("Room not found: {0}")]
    RoomNotFound(RoomId),

    #[error("Housekeeper not found: {0}")]
    HousekeeperNotFound(HousekeeperId),

    #[error("Housekeeper name cannot be empty")]
    EmptyName,

    #[error("Message text cannot be empty")]
    EmptyText,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("No housekeeper selected")]
    NoHousekeeperSelected,

    #[error("Room {0} is not assigned to the selected housekeeper")]
    NotAssigned(RoomId),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Summarization unavailable: {0}")]
    SummarizationUnavailable(String),
}

pub type Result<T> = std::result::Result<T, Error>;
