//! Attendance submission models and calendar month handling.
//!
//! Records arrive from the data-access layer as immutable snapshots: one
//! `AttendanceRecord` per district per ISO week, tagged with the full
//! ancestor chain of foreign keys, and one `YhsfRecord` per group per week
//! for the separately tracked youth ministry.

use serde::{Deserialize, Serialize};

/// Calendar month. Ordering is always calendar order, never alphabetical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

/// All twelve months in calendar order.
pub const CALENDAR: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

impl Month {
    /// 1-based calendar index (January = 1).
    pub fn index(self) -> u32 {
        self as u32 + 1
    }

    /// Month for a 1-based calendar index. Out-of-range indexes yield `None`.
    pub fn from_index(index: u32) -> Option<Month> {
        match index {
            1..=12 => Some(CALENDAR[(index - 1) as usize]),
            _ => None,
        }
    }

    /// Exact-match lookup on the English month name.
    pub fn from_name(name: &str) -> Option<Month> {
        CALENDAR.iter().copied().find(|m| m.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// Calendar month immediately before this one, with the year it falls
    /// in. January wraps to December of the previous year.
    pub fn previous(self, year: i32) -> (Month, i32) {
        match self {
            Month::January => (Month::December, year - 1),
            other => (CALENDAR[(other as usize) - 1], year),
        }
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One attendance submission for a district, for one ISO week of one
/// month/year. Immutable once created; `id` distinguishes records sharing
/// the same (district, year, month, week).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: i64,
    #[serde(rename = "stateId")]
    pub state_id: i64,
    #[serde(rename = "regionId")]
    pub region_id: i64,
    #[serde(rename = "oldGroupId")]
    pub old_group_id: i64,
    #[serde(rename = "groupId")]
    pub group_id: i64,
    #[serde(rename = "districtId")]
    pub district_id: i64,
    pub year: i32,
    pub month: Month,
    pub week: u8,
    pub men: i64,
    pub women: i64,
    #[serde(rename = "youthBoys")]
    pub youth_boys: i64,
    #[serde(rename = "youthGirls")]
    pub youth_girls: i64,
    #[serde(rename = "childrenBoys")]
    pub children_boys: i64,
    #[serde(rename = "childrenGirls")]
    pub children_girls: i64,
}

/// One YHSF weekly submission for a group. Member and visitor counts are
/// kept separate upstream; report columns sum them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YhsfRecord {
    pub id: i64,
    #[serde(rename = "groupId")]
    pub group_id: i64,
    pub year: i32,
    pub month: Month,
    pub week: u8,
    #[serde(rename = "malesMembers")]
    pub males_members: i64,
    #[serde(rename = "malesVisitors")]
    pub males_visitors: i64,
    #[serde(rename = "femalesMembers")]
    pub females_members: i64,
    #[serde(rename = "femalesVisitors")]
    pub females_visitors: i64,
}

impl YhsfRecord {
    /// Male attendance for the week, members and visitors combined.
    pub fn males(&self) -> i64 {
        self.males_members + self.males_visitors
    }

    /// Female attendance for the week, members and visitors combined.
    pub fn females(&self) -> i64 {
        self.females_members + self.females_visitors
    }
}
