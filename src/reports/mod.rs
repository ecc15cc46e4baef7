//! The report pipeline: record filtering, aggregation, month-window
//! normalization, and sheet layout.
//!
//! Control flow for one report: resolve scope → await any child-list fetch
//! → filter records → aggregate per (child, month) → lay out the sheet.
//! Everything here works over immutable snapshots; the only async step is
//! the provider round trip.

pub mod filter;
pub mod months;
pub mod sheet;
pub mod totals;
pub mod youth;

pub use filter::{filter_records, FilterCriteria, MonthRange};
pub use months::{build_subtitle, months_to_use, MonthSpec};
pub use sheet::{
    build_attendance_sheet, Cell, MergeRange, ReportLevel, SheetLayout, StyleTag, StyledCell,
    HEADER_ROWS, SHEET_COLUMNS, WEEKS_PER_MONTH,
};
pub use totals::{sum_for, AggregateTotals};
pub use youth::{build_youth_monthly_sheet, YOUTH_HEADER_ROWS, YOUTH_SHEET_COLUMNS};
