//! Data models for the membership organization.
//!
//! This module contains the structures the report engine consumes:
//!
//! - `State`, `Region`, `OldGroup`, `Group`, `District`: the org hierarchy
//! - `AttendanceRecord`, `YhsfRecord`: weekly submissions
//! - `Month`: calendar month with fixed calendar ordering
//! - `UserContext`: the caller's roles and scope assignment

pub mod attendance;
pub mod org;
pub mod user;

pub use attendance::{AttendanceRecord, Month, YhsfRecord, CALENDAR};
pub use org::{District, Group, OldGroup, Region, State};
pub use user::UserContext;
