//! Housekeeper model

use serde::{Deserialize, Serialize};

use super::HousekeeperId;

/// A housekeeper on today's roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Housekeeper {
    pub id: HousekeeperId,
    pub name: String,
}

impl Housekeeper {
    pub fn new(name: String) -> Self {
        Self {
            id: HousekeeperId::new(),
            name,
        }
    }
}
