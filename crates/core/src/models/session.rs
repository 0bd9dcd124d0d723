//! Session role and selection state

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::HousekeeperId;
use crate::error::Error;

/// The two collaborating roles, mutually exclusive per session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Administrative view - rooms, roster and assignments
    FrontDesk,
    /// Self-service cleaning view for a single housekeeper
    Housekeeping,
}

impl Role {
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::FrontDesk => "Front Desk",
            Role::Housekeeping => "Housekeeping",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "front-desk" | "frontdesk" | "front desk" => Ok(Role::FrontDesk),
            "housekeeping" => Ok(Role::Housekeeping),
            other => Err(Error::InvalidValue(format!("unknown role '{}'", other))),
        }
    }
}

/// Process-wide session state (never persisted)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub role: Option<Role>,
    /// Only meaningful while `role` is `Housekeeping`
    pub current_housekeeper: Option<HousekeeperId>,
}

impl Session {
    pub fn is_front_desk(&self) -> bool {
        self.role == Some(Role::FrontDesk)
    }
}
