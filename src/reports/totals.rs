//! The aggregation arithmetic every report level shares.
//!
//! One call per (scope child, month) pair produces a data row; one call per
//! (full scope, month) produces that month's sub-total row. The arithmetic
//! is fixed by the institutional template and reproduced exactly here.

use crate::models::AttendanceRecord;

/// Derived totals for one record subset. Computed on demand, never
/// persisted. Note: the "Total Adults" column includes youths; the name
/// comes from the template and is kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AggregateTotals {
    pub men: i64,
    pub women: i64,
    pub adults_total: i64,
    pub youth_boys: i64,
    pub youth_girls: i64,
    pub youths_total: i64,
    pub total_adults: i64,
    pub children_boys: i64,
    pub children_girls: i64,
    pub children_total: i64,
    pub grand_total: i64,
}

/// Sum a record subset into the fixed set of totals. Total function: empty
/// input yields all zeroes, never an error.
pub fn sum_for<'a, I>(records: I) -> AggregateTotals
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    let mut t = AggregateTotals::default();
    for r in records {
        t.men += r.men;
        t.women += r.women;
        t.youth_boys += r.youth_boys;
        t.youth_girls += r.youth_girls;
        t.children_boys += r.children_boys;
        t.children_girls += r.children_girls;
    }
    t.adults_total = t.men + t.women;
    t.youths_total = t.youth_boys + t.youth_girls;
    t.total_adults = t.adults_total + t.youths_total;
    t.children_total = t.children_boys + t.children_girls;
    t.grand_total = t.total_adults + t.children_total;
    t
}
