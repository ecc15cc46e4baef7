//! Month-window normalization and report subtitles.
//!
//! A report request names its months as an explicit list, a single month,
//! or a numeric {from,to} range. All three normalize to an ordered,
//! de-duplicated sequence in fixed calendar order. Callers may supply
//! months in arbitrary order and must get calendar order back.

use crate::models::{Month, CALENDAR};

/// Which calendar months a report covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthSpec {
    Single(Month),
    /// Inclusive 1-based bounds. Reversed bounds are auto-swapped and
    /// out-of-range bounds clamped to [1, 12].
    Range { from: u32, to: u32 },
    Months(Vec<Month>),
}

/// Normalize a month spec to the ordered, de-duplicated calendar slice it
/// denotes.
pub fn months_to_use(spec: &MonthSpec) -> Vec<Month> {
    match spec {
        MonthSpec::Single(m) => vec![*m],
        MonthSpec::Range { from, to } => {
            let lo = (*from.min(to)).clamp(1, 12);
            let hi = (*from.max(to)).clamp(1, 12);
            CALENDAR[(lo - 1) as usize..=(hi - 1) as usize].to_vec()
        }
        // Walking the fixed calendar both orders and de-duplicates
        MonthSpec::Months(months) => CALENDAR
            .iter()
            .copied()
            .filter(|m| months.contains(m))
            .collect(),
    }
}

/// Human-readable period text for the sheet subtitle.
///
/// - single month: `"February 2025"`
/// - range: `"January - November 2025"`
/// - explicit list covering all twelve months: `"January - December 2025"`
/// - any other list: `"Selected Months 2025"`
pub fn build_subtitle(spec: &MonthSpec, year: i32) -> String {
    match spec {
        MonthSpec::Single(m) => format!("{} {}", m.name(), year),
        MonthSpec::Range { .. } => {
            let months = months_to_use(spec);
            // Range bounds are clamped, so the slice is never empty
            let first = months.first().map(|m| m.name()).unwrap_or_default();
            let last = months.last().map(|m| m.name()).unwrap_or_default();
            if first == last {
                format!("{} {}", first, year)
            } else {
                format!("{} - {} {}", first, last, year)
            }
        }
        MonthSpec::Months(_) => {
            let months = months_to_use(spec);
            if months.len() == 12 {
                format!("January - December {}", year)
            } else {
                format!("Selected Months {}", year)
            }
        }
    }
}
