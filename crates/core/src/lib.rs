//! CleanSweep Core Library
//!
//! Room, roster and message board models, role permissions, visibility
//! rules, and the shared domain store for the CleanSweep housekeeping desk.

pub mod clock;
pub mod error;
pub mod invariants;
pub mod models;
pub mod permissions;
pub mod rules;
pub mod store;
pub mod summary;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Error, Result};
pub use models::*;
pub use permissions::*;
pub use rules::{
    assigned_rooms_for, badge_for, can_mark_checked_out, can_summarize, front_desk_roster,
    messages_newest_first, room_badge, rooms_assigned_to_housekeeper, Badge, RosterSection,
    ASSIGNMENT_WINDOW_DAYS,
};
pub use store::Store;
pub use summary::{
    summarize_or_fallback, Summarizer, SummaryEntry, UnconfiguredSummarizer, FALLBACK_SUMMARY,
};
