//! Record filtering for a resolved scope and time window.
//!
//! Every provided criterion must match (AND semantics); unset criteria
//! impose no constraint. The month window compares the calendar index of
//! the record's month, inclusive on both ends, so {from: 1, to: 1} selects
//! January only and {from: 1, to: 12} the whole year.
//!
//! Filtering is async because the group criterion may need the group's
//! district candidate set from the data-access layer before record
//! matching can run; callers await completion before aggregating.

use std::collections::HashSet;

use tracing::debug;

use crate::api::{district_ids_for_groups, DataProvider};
use crate::error::ReportError;
use crate::models::AttendanceRecord;

/// Inclusive 1-based month window. Bound order does not matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    pub from: u32,
    pub to: u32,
}

impl MonthRange {
    fn contains(&self, month_index: u32) -> bool {
        let lo = self.from.min(self.to);
        let hi = self.from.max(self.to);
        (lo..=hi).contains(&month_index)
    }
}

/// The scope and window a record must match. All fields optional; an empty
/// criteria set matches everything.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub state_id: Option<i64>,
    pub region_id: Option<i64>,
    pub old_group_id: Option<i64>,
    pub group_id: Option<i64>,
    pub district_id: Option<i64>,
    pub year: Option<i32>,
    pub month_range: Option<MonthRange>,
}

/// Narrow the full record collection to those matching every provided
/// criterion.
///
/// When `group_id` is set, the group's district list is resolved through
/// the provider first: some feeds tag records only with their district, so
/// a record is accepted if its group FK matches or its district belongs to
/// the group.
pub async fn filter_records<P: DataProvider>(
    records: &[AttendanceRecord],
    criteria: &FilterCriteria,
    provider: &P,
) -> Result<Vec<AttendanceRecord>, ReportError> {
    let group_districts: Option<HashSet<i64>> = match criteria.group_id {
        Some(group_id) => Some(district_ids_for_groups(provider, &[group_id]).await?),
        None => None,
    };

    let matched: Vec<AttendanceRecord> = records
        .iter()
        .filter(|r| {
            if let Some(id) = criteria.state_id {
                if r.state_id != id {
                    return false;
                }
            }
            if let Some(id) = criteria.region_id {
                if r.region_id != id {
                    return false;
                }
            }
            if let Some(id) = criteria.old_group_id {
                if r.old_group_id != id {
                    return false;
                }
            }
            if let Some(group_id) = criteria.group_id {
                let in_group = r.group_id == group_id
                    || group_districts
                        .as_ref()
                        .is_some_and(|set| set.contains(&r.district_id));
                if !in_group {
                    return false;
                }
            }
            if let Some(id) = criteria.district_id {
                if r.district_id != id {
                    return false;
                }
            }
            if let Some(year) = criteria.year {
                if r.year != year {
                    return false;
                }
            }
            if let Some(range) = criteria.month_range {
                if !range.contains(r.month.index()) {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect();

    debug!(
        total = records.len(),
        matched = matched.len(),
        ?criteria,
        "filtered attendance records"
    );
    Ok(matched)
}
